use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 抽奖资格统计实体
/// 说明:
/// - total_spins_available 为各来源未耗尽发放量之和 (首次 + 门槛 + 随机)
/// - 扣减走条件更新 (WHERE total_spins_available > 0), 与抽奖同事务
/// - last_random_grant_checked_at / last_random_grant_at 约束随机发放冷却窗口
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "wheel_eligibility")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    /// 首次奖励是否已发放
    pub first_time_grant_used: bool,
    /// 首次奖励剩余次数
    pub first_time_spins_remaining: i64,
    /// 随机发放剩余次数
    pub random_spins_remaining: i64,
    /// 可用总次数
    pub total_spins_available: i64,
    pub last_random_grant_checked_at: Option<DateTime<Utc>>,
    pub last_random_grant_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 是否还有可用次数
    pub fn has_spins(&self) -> bool {
        self.total_spins_available > 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
