use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// 账户实体
/// 说明:
/// - gold_coin_balance / sweep_coin_balance 两套余额独立记账
/// - 余额只通过钱包服务入账, 每次入账同时写 coin_transactions 流水
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    /// 金币余额
    pub gold_coin_balance: i64,
    /// 抽奖币余额
    pub sweep_coin_balance: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
