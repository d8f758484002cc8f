use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{
    CurrencyType, WheelRarity, wheel_draw_entity as draw_entity,
    wheel_eligibility_entity as eligibility_entity, wheel_reward_entity as reward_entity,
};

use super::PaginatedResponse;

/// 台账查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct DrawHistoryQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20, 上限 50)
    pub per_page: Option<u32>,
}

/// 奖励公开信息 (对外展示, 不含权重)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WheelRewardPublicResponse {
    /// 奖励ID
    pub id: i64,
    /// 数量
    pub amount: i64,
    /// 入账币种
    pub currency_type: CurrencyType,
    /// 稀有度
    pub rarity: WheelRarity,
    /// 展示文案
    pub description: String,
}

impl From<reward_entity::Model> for WheelRewardPublicResponse {
    fn from(m: reward_entity::Model) -> Self {
        WheelRewardPublicResponse {
            id: m.id,
            amount: m.amount,
            currency_type: m.currency_type,
            rarity: m.rarity,
            description: m.description,
        }
    }
}

/// 抽中的奖励 (只含本次结果, 不泄露其它配置)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WheelWonReward {
    pub reward_id: i64,
    pub amount: i64,
    pub currency_type: CurrencyType,
    pub rarity: WheelRarity,
    pub description: String,
}

impl From<&draw_entity::Model> for WheelWonReward {
    fn from(m: &draw_entity::Model) -> Self {
        WheelWonReward {
            reward_id: m.reward_id,
            amount: m.amount,
            currency_type: m.currency_type.clone(),
            rarity: m.rarity.clone(),
            description: m.description.clone(),
        }
    }
}

/// 抽奖 (Spin) 响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SpinResponse {
    /// 领取凭证, 后续 claim 时回传
    pub draw_id: String,
    pub reward: WheelWonReward,
    pub drawn_at: DateTime<Utc>,
    /// 剩余抽奖次数
    pub remaining_spins: i64,
}

/// 领取请求
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ClaimRequest {
    pub draw_id: String,
}

/// 领取响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ClaimResponse {
    pub draw_id: String,
    pub currency_type: CurrencyType,
    pub amount: i64,
    /// 入账币种的最新余额
    pub new_balance: i64,
}

/// 抽奖台账响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DrawRecordResponse {
    pub draw_id: String,
    pub reward_id: i64,
    pub amount: i64,
    pub currency_type: CurrencyType,
    pub rarity: WheelRarity,
    pub description: String,
    pub drawn_at: DateTime<Utc>,
    /// NULL = 未领取
    pub claimed_at: Option<DateTime<Utc>>,
}

impl From<draw_entity::Model> for DrawRecordResponse {
    fn from(m: draw_entity::Model) -> Self {
        DrawRecordResponse {
            draw_id: m.draw_id,
            reward_id: m.reward_id,
            amount: m.amount,
            currency_type: m.currency_type,
            rarity: m.rarity,
            description: m.description,
            drawn_at: m.drawn_at.unwrap_or_else(Utc::now),
            claimed_at: m.claimed_at,
        }
    }
}

/// 台账分页响应
pub type DrawRecordPageResponse = PaginatedResponse<DrawRecordResponse>;

/// 资格信息响应 (按来源拆分)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EligibilityResponse {
    pub first_time_grant_used: bool,
    pub first_time_spins_remaining: i64,
    pub threshold_spins_remaining: i64,
    pub random_spins_remaining: i64,
    /// 可用总次数
    pub total_spins_available: i64,
}

impl EligibilityResponse {
    pub fn from_state(state: &eligibility_entity::Model, threshold_spins_remaining: i64) -> Self {
        EligibilityResponse {
            first_time_grant_used: state.first_time_grant_used,
            first_time_spins_remaining: state.first_time_spins_remaining,
            threshold_spins_remaining,
            random_spins_remaining: state.random_spins_remaining,
            total_spins_available: state.total_spins_available,
        }
    }
}

/// 随机发放响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RandomGrantResponse {
    /// 本次是否发放
    pub granted: bool,
    /// 未发放原因 (冷却中 / 未命中概率)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub eligibility: EligibilityResponse,
}

/// 门槛发放请求 (管理端 / 消费流水触发)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ThresholdGrantRequest {
    pub account_id: i64,
    /// 门槛标识 (业务配置编号)
    pub threshold_id: i64,
    /// 触发门槛的累计消费 (美分)
    pub spend_threshold_cents: i64,
    /// 发放次数
    pub spins: i64,
}

/// 配置校验响应 (管理端)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CatalogValidationResponse {
    pub valid: bool,
    pub issues: Vec<String>,
    pub total_weight: f64,
}

/// 统计查询参数 (管理端)
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct StatsQuery {
    /// 最近记录条数 (默认 20, 上限 50)
    pub recent_limit: Option<u64>,
}

/// 按稀有度的抽奖次数
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RarityCount {
    pub rarity: WheelRarity,
    pub count: i64,
}

/// 按币种的已领取发放总量
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CurrencyDisbursement {
    pub currency_type: CurrencyType,
    pub claimed_count: i64,
    pub total_amount: i64,
}

/// 管理端台账条目 (含账户)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminDrawRecordResponse {
    pub draw_id: String,
    pub account_id: i64,
    pub reward_id: i64,
    pub amount: i64,
    pub currency_type: CurrencyType,
    pub rarity: WheelRarity,
    pub drawn_at: DateTime<Utc>,
    pub claimed_at: Option<DateTime<Utc>>,
}

impl From<draw_entity::Model> for AdminDrawRecordResponse {
    fn from(m: draw_entity::Model) -> Self {
        AdminDrawRecordResponse {
            draw_id: m.draw_id,
            account_id: m.account_id,
            reward_id: m.reward_id,
            amount: m.amount,
            currency_type: m.currency_type,
            rarity: m.rarity,
            drawn_at: m.drawn_at.unwrap_or_else(Utc::now),
            claimed_at: m.claimed_at,
        }
    }
}

/// 统计响应 (管理端)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WheelStatsResponse {
    pub total_draws: i64,
    pub unclaimed_draws: i64,
    pub by_rarity: Vec<RarityCount>,
    pub disbursed_by_currency: Vec<CurrencyDisbursement>,
    pub recent: Vec<AdminDrawRecordResponse>,
}
