use crate::entities::{account_entity as accounts, coin_transaction_entity as txs};
use crate::error::{AppError, AppResult};
use crate::models::{
    CoinTransactionPageResponse, CoinTransactionQuery, CoinTransactionResponse, Credit,
    PaginatedResponse, PaginationParams, WalletBalanceResponse,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

/// 转盘奖励入账的流水类型
pub const TX_TYPE_WHEEL_REWARD: &str = "wheel_reward";

#[derive(Clone)]
pub struct WalletService {
    pool: DatabaseConnection,
}

impl WalletService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 查询两种币余额
    pub async fn get_balances(&self, account_id: i64) -> AppResult<WalletBalanceResponse> {
        let account = accounts::Entity::find_by_id(account_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Account not found".to_string()))?;
        Ok(account.into())
    }

    /// 获取流水 (分页, 倒序)
    pub async fn list_transactions(
        &self,
        account_id: i64,
        query: &CoinTransactionQuery,
    ) -> AppResult<CoinTransactionPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);
        let offset = params.get_offset();
        let limit = params.get_limit();

        let base_query = txs::Entity::find().filter(txs::Column::AccountId.eq(account_id));

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(txs::Column::CreatedAt, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<CoinTransactionResponse> =
            items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            limit,
            total,
        ))
    }

    /// 入账: 余额自增 + 追加流水, 返回入账后该币种余额
    ///
    /// 入账与流水属于同一工作单元, 调用方必须传入事务连接;
    /// 币种路由在此做唯一一次穷尽 match, 两套余额永不混算
    pub async fn apply_credit<C: ConnectionTrait>(
        &self,
        conn: &C,
        account_id: i64,
        credit: &Credit,
        transaction_type: &str,
        related_draw_id: Option<String>,
        description: Option<String>,
    ) -> AppResult<i64> {
        let amount = credit.amount();
        if amount <= 0 {
            return Err(AppError::ValidationError(
                "Credit amount must be positive".to_string(),
            ));
        }

        let balance_column = match credit {
            Credit::GoldCoins(_) => accounts::Column::GoldCoinBalance,
            Credit::SweepCoins(_) => accounts::Column::SweepCoinBalance,
        };

        let res = accounts::Entity::update_many()
            .col_expr(balance_column, Expr::col(balance_column).add(amount))
            .col_expr(accounts::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(accounts::Column::Id.eq(account_id))
            .exec(conn)
            .await?;

        if res.rows_affected == 0 {
            return Err(AppError::NotFound("Account not found".to_string()));
        }

        // 读取入账后余额写入流水 (balance_after 用于对账)
        let account = accounts::Entity::find_by_id(account_id)
            .one(conn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Account disappeared after credit".to_string())
            })?;

        let balance_after = match credit {
            Credit::GoldCoins(_) => account.gold_coin_balance,
            Credit::SweepCoins(_) => account.sweep_coin_balance,
        };

        txs::ActiveModel {
            account_id: Set(account_id),
            currency_type: Set(credit.currency_type()),
            transaction_type: Set(transaction_type.to_string()),
            amount: Set(amount),
            balance_after: Set(balance_after),
            related_draw_id: Set(related_draw_id),
            description: Set(description),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(balance_after)
    }
}
