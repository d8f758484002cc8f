use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use super::{CurrencyType, WheelRarity};

/// 抽奖台账实体
/// 说明:
/// - 每次抽奖产生一条记录, 只追加, 永不删除
/// - draw_id 为不可枚举的领取凭证, 全表唯一
/// - amount/currency_type/rarity/description 为抽奖时刻的配置快照,
///   奖励配置后续修改或下线仍可回溯
/// - claimed_at 为 NULL 表示未领取; 置位一次后不再变更
/// - client_ip / user_agent 仅审计用, 不参与业务逻辑
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "wheel_draws")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 领取凭证
    pub draw_id: String,
    /// 账户ID
    pub account_id: i64,
    /// 奖励ID (指向 wheel_rewards.id)
    pub reward_id: i64,
    /// 奖励数量 (快照)
    pub amount: i64,
    /// 入账币种 (快照)
    pub currency_type: CurrencyType,
    /// 稀有度 (快照)
    pub rarity: WheelRarity,
    /// 展示文案 (快照)
    pub description: String,
    /// 抽奖时间
    pub drawn_at: Option<DateTime<Utc>>,
    /// 领取时间, NULL = 未领取
    pub claimed_at: Option<DateTime<Utc>>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl Model {
    /// 是否已领取
    pub fn is_claimed(&self) -> bool {
        self.claimed_at.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
