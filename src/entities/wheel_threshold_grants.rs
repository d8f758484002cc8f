use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 消费门槛发放记录实体
/// 说明:
/// - 账户消费跨过某一门槛时追加一条, 同一 (account_id, threshold_id) 只发放一次
/// - spins_consumed 随抽奖递增, 达到 spins_awarded 即耗尽
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "wheel_threshold_grants")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    /// 门槛标识 (业务配置编号)
    pub threshold_id: i64,
    /// 触发门槛的累计消费 (美分)
    pub spend_threshold_cents: i64,
    pub spins_awarded: i64,
    pub spins_consumed: i64,
    pub reached_at: Option<DateTime<Utc>>,
}

impl Model {
    /// 该笔发放是否已耗尽
    pub fn is_exhausted(&self) -> bool {
        self.spins_consumed >= self.spins_awarded
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
