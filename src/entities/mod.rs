pub mod accounts;
pub mod coin_transactions;
pub mod wheel_draws;
pub mod wheel_eligibility;
pub mod wheel_rewards;
pub mod wheel_threshold_grants;

pub use accounts as account_entity;
pub use coin_transactions as coin_transaction_entity;
pub use wheel_draws as wheel_draw_entity;
pub use wheel_eligibility as wheel_eligibility_entity;
pub use wheel_rewards as wheel_reward_entity;
pub use wheel_threshold_grants as wheel_threshold_grant_entity;

pub use coin_transactions::CurrencyType;
pub use wheel_rewards::WheelRarity;
