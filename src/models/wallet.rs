use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{CurrencyType, account_entity, coin_transaction_entity};

use super::PaginatedResponse;

/// 入账指令: 币种与数量的带标签变体
/// 入账路由只在 WalletService 内做一次穷尽 match;
/// 新增币种时此处与 CurrencyType 同步扩展, 漏分支无法通过编译
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credit {
    GoldCoins(i64),
    SweepCoins(i64),
}

impl Credit {
    pub fn from_reward(currency_type: &CurrencyType, amount: i64) -> Self {
        match currency_type {
            CurrencyType::GoldCoins => Credit::GoldCoins(amount),
            CurrencyType::SweepCoins => Credit::SweepCoins(amount),
        }
    }

    pub fn currency_type(&self) -> CurrencyType {
        match self {
            Credit::GoldCoins(_) => CurrencyType::GoldCoins,
            Credit::SweepCoins(_) => CurrencyType::SweepCoins,
        }
    }

    pub fn amount(&self) -> i64 {
        match self {
            Credit::GoldCoins(n) | Credit::SweepCoins(n) => *n,
        }
    }
}

/// 钱包余额响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct WalletBalanceResponse {
    /// 金币余额
    pub gold_coin_balance: i64,
    /// 抽奖币余额
    pub sweep_coin_balance: i64,
}

impl From<account_entity::Model> for WalletBalanceResponse {
    fn from(m: account_entity::Model) -> Self {
        WalletBalanceResponse {
            gold_coin_balance: m.gold_coin_balance,
            sweep_coin_balance: m.sweep_coin_balance,
        }
    }
}

/// 流水查询参数
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CoinTransactionQuery {
    /// 页码 (默认 1)
    pub page: Option<u32>,
    /// 每页数量 (默认 20, 上限 50)
    pub per_page: Option<u32>,
}

/// 流水响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CoinTransactionResponse {
    pub id: i64,
    pub currency_type: CurrencyType,
    pub transaction_type: String,
    /// 金额 (正数)
    pub amount: i64,
    /// 入账后该币种余额
    pub balance_after: i64,
    /// 关联的抽奖台账凭证 (转盘奖励入账时携带)
    pub related_draw_id: Option<String>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<coin_transaction_entity::Model> for CoinTransactionResponse {
    fn from(m: coin_transaction_entity::Model) -> Self {
        CoinTransactionResponse {
            id: m.id,
            currency_type: m.currency_type,
            transaction_type: m.transaction_type,
            amount: m.amount,
            balance_after: m.balance_after,
            related_draw_id: m.related_draw_id,
            description: m.description,
            created_at: m.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// 流水分页响应
pub type CoinTransactionPageResponse = PaginatedResponse<CoinTransactionResponse>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_routes_by_currency() {
        let gold = Credit::from_reward(&CurrencyType::GoldCoins, 500);
        assert_eq!(gold, Credit::GoldCoins(500));
        assert_eq!(gold.currency_type(), CurrencyType::GoldCoins);
        assert_eq!(gold.amount(), 500);

        let sweep = Credit::from_reward(&CurrencyType::SweepCoins, 5);
        assert_eq!(sweep, Credit::SweepCoins(5));
        assert_eq!(sweep.currency_type(), CurrencyType::SweepCoins);
        assert_eq!(sweep.amount(), 5);
    }
}
