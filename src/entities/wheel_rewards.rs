use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::CurrencyType;

/// 稀有度, 从低到高排序
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema, DeriveActiveEnum, EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "wheel_rarity")]
#[serde(rename_all = "snake_case")]
pub enum WheelRarity {
    #[sea_orm(string_value = "common")]
    Common,
    #[sea_orm(string_value = "uncommon")]
    Uncommon,
    #[sea_orm(string_value = "rare")]
    Rare,
    #[sea_orm(string_value = "very_rare")]
    VeryRare,
    #[sea_orm(string_value = "ultra_rare")]
    UltraRare,
    #[sea_orm(string_value = "jackpot")]
    Jackpot,
}

impl std::fmt::Display for WheelRarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WheelRarity::Common => write!(f, "common"),
            WheelRarity::Uncommon => write!(f, "uncommon"),
            WheelRarity::Rare => write!(f, "rare"),
            WheelRarity::VeryRare => write!(f, "very_rare"),
            WheelRarity::UltraRare => write!(f, "ultra_rare"),
            WheelRarity::Jackpot => write!(f, "jackpot"),
        }
    }
}

/// 转盘奖励配置实体
/// 概念说明:
/// - probability_weight: 相对权重, 非归一化概率; 启用项合计应接近 100 (容差 0.1)
/// - 权重属于敏感配置, 对外接口不返回
/// - 抽奖时只读; 管理端修改不影响历史台账 (台账做字段快照)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wheel_rewards")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 奖励数量 (对应币种的最小单位)
    pub amount: i64,
    /// 入账币种
    pub currency_type: CurrencyType,
    /// 稀有度
    pub rarity: WheelRarity,
    /// 相对权重
    pub probability_weight: f64,
    /// 展示文案
    pub description: String,
    /// 是否启用
    pub is_active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
