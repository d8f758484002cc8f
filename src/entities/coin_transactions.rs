use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "currency_type")]
#[serde(rename_all = "snake_case")]
pub enum CurrencyType {
    #[sea_orm(string_value = "gold_coins")]
    GoldCoins,
    #[sea_orm(string_value = "sweep_coins")]
    SweepCoins,
}

impl std::fmt::Display for CurrencyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CurrencyType::GoldCoins => write!(f, "gold_coins"),
            CurrencyType::SweepCoins => write!(f, "sweep_coins"),
        }
    }
}

/// 币流水实体
/// 说明:
/// - 只追加, 每次入账一条
/// - balance_after 记录入账后该币种余额, 用于对账
/// - related_draw_id 关联抽奖台账 (转盘奖励入账时填写)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "coin_transactions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub account_id: i64,
    pub currency_type: CurrencyType,
    pub transaction_type: String,
    pub amount: i64,
    pub balance_after: i64,
    pub related_draw_id: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
