use crate::entities::{CurrencyType, WheelRarity, wheel_draw_entity as draws};
use crate::error::AppResult;
use crate::models::{
    AdminDrawRecordResponse, CurrencyDisbursement, RarityCount, StatsQuery, WheelStatsResponse,
};
use sea_orm::sea_query::{Alias, Expr};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
};

/// 只读统计, 不含任何业务规则
#[derive(Clone)]
pub struct StatsService {
    pool: DatabaseConnection,
}

impl StatsService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 管理端统计: 总量 / 按稀有度 / 已领取按币种 / 最近 N 条
    pub async fn get_stats(&self, query: &StatsQuery) -> AppResult<WheelStatsResponse> {
        let total_draws = draws::Entity::find().count(&self.pool).await? as i64;
        let unclaimed_draws = self.count_unclaimed().await?;

        #[derive(Debug, FromQueryResult)]
        struct RarityRow {
            rarity: WheelRarity,
            count: i64,
        }
        let by_rarity = draws::Entity::find()
            .select_only()
            .column(draws::Column::Rarity)
            .column_as(Expr::val(1).count(), "count")
            .group_by(draws::Column::Rarity)
            .into_model::<RarityRow>()
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|r| RarityCount {
                rarity: r.rarity,
                count: r.count,
            })
            .collect();

        // 发放口径: 只统计已领取的台账 (claimed_at 非空)
        #[derive(Debug, FromQueryResult)]
        struct DisbursementRow {
            currency_type: CurrencyType,
            claimed_count: i64,
            total_amount: i64,
        }
        let disbursed_by_currency = draws::Entity::find()
            .select_only()
            .column(draws::Column::CurrencyType)
            .column_as(Expr::val(1).count(), "claimed_count")
            .column_as(
                Expr::col(draws::Column::Amount)
                    .sum()
                    .cast_as(Alias::new("BIGINT")),
                "total_amount",
            )
            .filter(draws::Column::ClaimedAt.is_not_null())
            .group_by(draws::Column::CurrencyType)
            .into_model::<DisbursementRow>()
            .all(&self.pool)
            .await?
            .into_iter()
            .map(|r| CurrencyDisbursement {
                currency_type: r.currency_type,
                claimed_count: r.claimed_count,
                total_amount: r.total_amount,
            })
            .collect();

        let recent_limit = query.recent_limit.unwrap_or(20).clamp(1, 50);
        let recent = draws::Entity::find()
            .order_by(draws::Column::DrawnAt, Order::Desc)
            .limit(recent_limit)
            .all(&self.pool)
            .await?
            .into_iter()
            .map(AdminDrawRecordResponse::from)
            .collect();

        Ok(WheelStatsResponse {
            total_draws,
            unclaimed_draws,
            by_rarity,
            disbursed_by_currency,
            recent,
        })
    }

    /// 未领取台账数量 (定时任务与统计共用)
    pub async fn count_unclaimed(&self) -> AppResult<i64> {
        let count = draws::Entity::find()
            .filter(draws::Column::ClaimedAt.is_null())
            .count(&self.pool)
            .await? as i64;
        Ok(count)
    }
}
