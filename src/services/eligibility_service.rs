use crate::config::SpinWheelConfig;
use crate::entities::{
    wheel_eligibility_entity as eligibility, wheel_threshold_grant_entity as threshold_grants,
};
use crate::error::{AppError, AppResult};
use crate::models::{EligibilityResponse, RandomGrantResponse};
use chrono::{Duration, Utc};
use rand::Rng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// 本次抽奖消耗的发放来源
/// 优先级固定: 首次 -> 最早未耗尽门槛 -> 随机
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinSource {
    FirstTime,
    /// 携带门槛发放记录ID
    Threshold(i64),
    Random,
}

/// checkAndConsumeOneSpin 的结果: 业务拒绝是正常负结果, 不走错误通道
#[derive(Debug, Clone)]
pub struct ConsumeOutcome {
    pub allowed: bool,
    pub reason: Option<String>,
    pub source: Option<SpinSource>,
}

impl ConsumeOutcome {
    fn consumed(source: SpinSource) -> Self {
        Self {
            allowed: true,
            reason: None,
            source: Some(source),
        }
    }

    fn denied(reason: &str) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.to_string()),
            source: None,
        }
    }
}

#[derive(Clone)]
pub struct EligibilityService {
    pool: DatabaseConnection,
    config: SpinWheelConfig,
}

impl EligibilityService {
    pub fn new(pool: DatabaseConnection, config: SpinWheelConfig) -> Self {
        Self { pool, config }
    }

    /// 获取账户资格信息 (不存在则初始化)
    pub async fn get_eligibility(&self, account_id: i64) -> AppResult<EligibilityResponse> {
        let state = self.ensure_state(&self.pool, account_id).await?;
        let threshold_remaining = self
            .threshold_spins_remaining(&self.pool, account_id)
            .await?;
        Ok(EligibilityResponse::from_state(&state, threshold_remaining))
    }

    /// 原子地检查并消耗一次抽奖资格
    ///
    /// 必须在调用方事务内执行, 且先于抽奖台账写入 —— 没有成功的消耗就没有抽奖。
    /// 扣减走条件更新 (WHERE total_spins_available > 0), 并发下同一单位只会被
    /// 一个请求拿到; 随后在行锁保护下回写本次消耗的来源计数
    pub async fn check_and_consume_one_spin<C: ConnectionTrait>(
        &self,
        conn: &C,
        account_id: i64,
    ) -> AppResult<ConsumeOutcome> {
        self.ensure_state(conn, account_id).await?;

        let res = eligibility::Entity::update_many()
            .col_expr(
                eligibility::Column::TotalSpinsAvailable,
                Expr::col(eligibility::Column::TotalSpinsAvailable).sub(1),
            )
            .col_expr(eligibility::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(eligibility::Column::AccountId.eq(account_id))
            .filter(eligibility::Column::TotalSpinsAvailable.gt(0))
            .exec(conn)
            .await?;

        if res.rows_affected == 0 {
            return Ok(ConsumeOutcome::denied("No spins available"));
        }

        // 扣减成功后重读状态 (事务内持有行锁), 决定消耗来源
        let state = self.find_state(conn, account_id).await?.ok_or_else(|| {
            AppError::InternalError("Eligibility state disappeared after consume".to_string())
        })?;

        let grants = threshold_grants::Entity::find()
            .filter(threshold_grants::Column::AccountId.eq(account_id))
            .order_by_asc(threshold_grants::Column::ReachedAt)
            .all(conn)
            .await?;

        let source = pick_spin_source(&state, &grants).ok_or_else(|| {
            AppError::InternalError(
                "Spin availability out of sync with grant sources".to_string(),
            )
        })?;

        match &source {
            SpinSource::FirstTime => {
                let current = state.first_time_spins_remaining;
                let mut am = state.into_active_model();
                am.first_time_spins_remaining = Set(current - 1);
                am.update(conn).await?;
            }
            SpinSource::Threshold(grant_id) => {
                threshold_grants::Entity::update_many()
                    .col_expr(
                        threshold_grants::Column::SpinsConsumed,
                        Expr::col(threshold_grants::Column::SpinsConsumed).add(1),
                    )
                    .filter(threshold_grants::Column::Id.eq(*grant_id))
                    .exec(conn)
                    .await?;
            }
            SpinSource::Random => {
                let current = state.random_spins_remaining;
                let mut am = state.into_active_model();
                am.random_spins_remaining = Set(current - 1);
                am.update(conn).await?;
            }
        }

        Ok(ConsumeOutcome::consumed(source))
    }

    /// 首次发放 (每账户一次, 重复调用为空操作)
    pub async fn grant_first_time(&self, account_id: i64) -> AppResult<EligibilityResponse> {
        let txn = self.pool.begin().await?;
        let state = self.ensure_state(&txn, account_id).await?;

        if !state.first_time_grant_used {
            let count = self.config.first_time_spins;
            let current_first = state.first_time_spins_remaining;
            let current_total = state.total_spins_available;
            let mut am = state.into_active_model();
            am.first_time_grant_used = Set(true);
            am.first_time_spins_remaining = Set(current_first + count);
            am.total_spins_available = Set(current_total + count);
            am.updated_at = Set(Some(Utc::now()));
            am.update(&txn).await?;
        }

        let state = self.find_state(&txn, account_id).await?.ok_or_else(|| {
            AppError::InternalError("Eligibility state disappeared after grant".to_string())
        })?;
        let threshold_remaining = self.threshold_spins_remaining(&txn, account_id).await?;
        txn.commit().await?;

        Ok(EligibilityResponse::from_state(&state, threshold_remaining))
    }

    /// 门槛发放 (消费跨过门槛时调用, 同一门槛只发放一次)
    pub async fn grant_threshold(
        &self,
        account_id: i64,
        threshold_id: i64,
        spend_threshold_cents: i64,
        spins: i64,
    ) -> AppResult<EligibilityResponse> {
        if spins <= 0 {
            return Err(AppError::ValidationError(
                "Spins to grant must be positive".to_string(),
            ));
        }

        let txn = self.pool.begin().await?;
        let state = self.ensure_state(&txn, account_id).await?;

        let existing = threshold_grants::Entity::find()
            .filter(threshold_grants::Column::AccountId.eq(account_id))
            .filter(threshold_grants::Column::ThresholdId.eq(threshold_id))
            .one(&txn)
            .await?;

        if existing.is_none() {
            threshold_grants::ActiveModel {
                account_id: Set(account_id),
                threshold_id: Set(threshold_id),
                spend_threshold_cents: Set(spend_threshold_cents),
                spins_awarded: Set(spins),
                spins_consumed: Set(0),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            let current_total = state.total_spins_available;
            let mut am = state.into_active_model();
            am.total_spins_available = Set(current_total + spins);
            am.updated_at = Set(Some(Utc::now()));
            am.update(&txn).await?;
        }

        let state = self.find_state(&txn, account_id).await?.ok_or_else(|| {
            AppError::InternalError("Eligibility state disappeared after grant".to_string())
        })?;
        let threshold_remaining = self.threshold_spins_remaining(&txn, account_id).await?;
        txn.commit().await?;

        Ok(EligibilityResponse::from_state(&state, threshold_remaining))
    }

    /// 随机发放: 冷却窗口 + 概率掷签 (basis points)
    ///
    /// 掷签与转盘选奖的随机源无关, 不承载资金价值, 用普通 PRNG 即可
    pub async fn grant_random_if_eligible(
        &self,
        account_id: i64,
    ) -> AppResult<RandomGrantResponse> {
        let txn = self.pool.begin().await?;
        let state = self.ensure_state(&txn, account_id).await?;

        let now = Utc::now();
        let cooldown = Duration::hours(self.config.random_grant_cooldown_hours);

        if let Some(checked_at) = state.last_random_grant_checked_at
            && now - checked_at < cooldown
        {
            let threshold_remaining = self.threshold_spins_remaining(&txn, account_id).await?;
            let resp = RandomGrantResponse {
                granted: false,
                reason: Some("Cooldown active".to_string()),
                eligibility: EligibilityResponse::from_state(&state, threshold_remaining),
            };
            txn.commit().await?;
            return Ok(resp);
        }

        let hit = {
            let mut rng = rand::thread_rng();
            rng.gen_range(0..10000) < self.config.random_grant_probability_bp
        };

        let current_random = state.random_spins_remaining;
        let current_total = state.total_spins_available;
        let mut am = state.into_active_model();
        am.last_random_grant_checked_at = Set(Some(now));
        if hit {
            am.random_spins_remaining = Set(current_random + 1);
            am.total_spins_available = Set(current_total + 1);
            am.last_random_grant_at = Set(Some(now));
        }
        am.updated_at = Set(Some(Utc::now()));
        let state = am.update(&txn).await?;

        let threshold_remaining = self.threshold_spins_remaining(&txn, account_id).await?;
        txn.commit().await?;

        Ok(RandomGrantResponse {
            granted: hit,
            reason: if hit {
                None
            } else {
                Some("Probability check missed".to_string())
            },
            eligibility: EligibilityResponse::from_state(&state, threshold_remaining),
        })
    }

    // -----------------------------
    // 内部辅助方法
    // -----------------------------

    async fn find_state<C: ConnectionTrait>(
        &self,
        conn: &C,
        account_id: i64,
    ) -> Result<Option<eligibility::Model>, DbErr> {
        eligibility::Entity::find()
            .filter(eligibility::Column::AccountId.eq(account_id))
            .one(conn)
            .await
    }

    async fn ensure_state<C: ConnectionTrait>(
        &self,
        conn: &C,
        account_id: i64,
    ) -> Result<eligibility::Model, DbErr> {
        if let Some(m) = self.find_state(conn, account_id).await? {
            return Ok(m);
        }
        eligibility::ActiveModel {
            account_id: Set(account_id),
            first_time_grant_used: Set(false),
            first_time_spins_remaining: Set(0),
            random_spins_remaining: Set(0),
            total_spins_available: Set(0),
            ..Default::default()
        }
        .insert(conn)
        .await
    }

    /// 门槛来源的未耗尽总量
    async fn threshold_spins_remaining<C: ConnectionTrait>(
        &self,
        conn: &C,
        account_id: i64,
    ) -> AppResult<i64> {
        let grants = threshold_grants::Entity::find()
            .filter(threshold_grants::Column::AccountId.eq(account_id))
            .all(conn)
            .await?;
        Ok(grants
            .iter()
            .map(|g| g.spins_awarded - g.spins_consumed)
            .sum())
    }
}

/// 来源优先级: 首次 -> 最早未耗尽门槛 -> 随机
/// grants 须按 reached_at 升序传入
pub(crate) fn pick_spin_source(
    state: &eligibility::Model,
    grants: &[threshold_grants::Model],
) -> Option<SpinSource> {
    if state.first_time_spins_remaining > 0 {
        return Some(SpinSource::FirstTime);
    }
    if let Some(g) = grants.iter().find(|g| !g.is_exhausted()) {
        return Some(SpinSource::Threshold(g.id));
    }
    if state.random_spins_remaining > 0 {
        return Some(SpinSource::Random);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(first: i64, random: i64) -> eligibility::Model {
        eligibility::Model {
            id: 1,
            account_id: 7,
            first_time_grant_used: first > 0,
            first_time_spins_remaining: first,
            random_spins_remaining: random,
            total_spins_available: first + random,
            last_random_grant_checked_at: None,
            last_random_grant_at: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn grant(id: i64, awarded: i64, consumed: i64) -> threshold_grants::Model {
        threshold_grants::Model {
            id,
            account_id: 7,
            threshold_id: id,
            spend_threshold_cents: 10_000,
            spins_awarded: awarded,
            spins_consumed: consumed,
            reached_at: None,
        }
    }

    #[test]
    fn test_first_time_takes_priority() {
        let s = state(2, 1);
        let g = vec![grant(1, 3, 0)];
        assert_eq!(pick_spin_source(&s, &g), Some(SpinSource::FirstTime));
    }

    #[test]
    fn test_oldest_unexhausted_threshold_next() {
        let s = state(0, 1);
        let g = vec![grant(1, 2, 2), grant(2, 3, 1)];
        assert_eq!(pick_spin_source(&s, &g), Some(SpinSource::Threshold(2)));
    }

    #[test]
    fn test_random_last() {
        let s = state(0, 1);
        let g = vec![grant(1, 2, 2)];
        assert_eq!(pick_spin_source(&s, &g), Some(SpinSource::Random));
    }

    #[test]
    fn test_no_source_when_everything_exhausted() {
        let s = state(0, 0);
        let g = vec![grant(1, 2, 2)];
        assert_eq!(pick_spin_source(&s, &g), None);
    }
}
