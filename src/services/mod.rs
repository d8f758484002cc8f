pub mod catalog_service;
pub mod draw_service;
pub mod eligibility_service;
pub mod stats_service;
pub mod wallet_service;

pub use catalog_service::*;
pub use draw_service::*;
pub use eligibility_service::*;
pub use stats_service::*;
pub use wallet_service::*;
