use crate::entities::{wheel_draw_entity as draws, wheel_reward_entity as rewards};
use crate::error::{AppError, AppResult};
use crate::models::{
    ClaimResponse, Credit, DrawHistoryQuery, DrawRecordPageResponse, DrawRecordResponse,
    PaginatedResponse, PaginationParams, SpinResponse, WheelWonReward,
};
use crate::services::{EligibilityService, TX_TYPE_WHEEL_REWARD, WalletService};
use crate::utils::generate_draw_id;
use chrono::Utc;
use rand::Rng;
use rand::rngs::OsRng;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

/// 请求来源信息, 仅审计用
#[derive(Debug, Clone, Default)]
pub struct ClientMetadata {
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
    eligibility_service: EligibilityService,
    wallet_service: WalletService,
}

impl DrawService {
    pub fn new(
        pool: DatabaseConnection,
        eligibility_service: EligibilityService,
        wallet_service: WalletService,
    ) -> Self {
        Self {
            pool,
            eligibility_service,
            wallet_service,
        }
    }

    /// 抽奖 (Spin)
    ///
    /// 逻辑:
    /// 1. 同一事务内先消耗一次资格 (条件扣减, 失败即无可用次数)
    /// 2. 读取启用奖励并按权重选取 (加密安全随机源)
    /// 3. 写抽奖台账 (claimed_at = NULL, 奖励字段快照)
    /// 4. 返回结果与剩余次数
    ///
    /// 资格消耗与台账写入同事务: 不会出现扣了次数没记录、或没扣次数就抽奖的状态
    pub async fn spin(&self, account_id: i64, meta: ClientMetadata) -> AppResult<SpinResponse> {
        let txn = self.pool.begin().await?;

        let outcome = self
            .eligibility_service
            .check_and_consume_one_spin(&txn, account_id)
            .await?;
        if !outcome.allowed {
            return Err(AppError::ValidationError(
                outcome.reason.unwrap_or_else(|| "No spins available".to_string()),
            ));
        }

        let record = self.perform_draw(&txn, account_id, meta).await?;

        let remaining = self.remaining_spins(&txn, account_id).await?;

        txn.commit().await?;

        Ok(SpinResponse {
            draw_id: record.draw_id.clone(),
            reward: WheelWonReward::from(&record),
            drawn_at: record.drawn_at.unwrap_or_else(Utc::now),
            remaining_spins: remaining,
        })
    }

    /// 执行一次加权随机选取并落台账
    ///
    /// 前置条件: 调用方已在同一事务内消耗资格, 本方法不检查也不修改资格 ——
    /// 选奖逻辑因此保持无状态、可独立测试
    pub async fn perform_draw<C: ConnectionTrait>(
        &self,
        conn: &C,
        account_id: i64,
        meta: ClientMetadata,
    ) -> AppResult<draws::Model> {
        let defs = rewards::Entity::find()
            .filter(rewards::Column::IsActive.eq(true))
            .order_by_asc(rewards::Column::Id)
            .all(conn)
            .await?;

        if defs.is_empty() {
            return Err(AppError::InternalError(
                "No active rewards configured".to_string(),
            ));
        }

        // 奖励承载真实价值, 采样必须来自加密安全随机源, 不用普通 PRNG
        let sample: f64 = OsRng.gen_range(0.0..1.0);
        let selected = select_reward(&defs, sample).clone();

        let record = draws::ActiveModel {
            draw_id: Set(generate_draw_id()),
            account_id: Set(account_id),
            reward_id: Set(selected.id),
            amount: Set(selected.amount),
            currency_type: Set(selected.currency_type),
            rarity: Set(selected.rarity),
            description: Set(selected.description),
            client_ip: Set(meta.ip),
            user_agent: Set(meta.user_agent),
            ..Default::default()
        }
        .insert(conn)
        .await?;

        Ok(record)
    }

    /// 领取奖励: 台账到余额的一次性转换
    ///
    /// claimed_at 置位走单条条件更新 (仅当当前为 NULL), 并发重复领取只有
    /// 一个调用成功; 置位、入账与流水同事务提交, 失败整体回滚可重试
    pub async fn claim(&self, account_id: i64, draw_id: &str) -> AppResult<ClaimResponse> {
        let txn = self.pool.begin().await?;

        let res = draws::Entity::update_many()
            .col_expr(draws::Column::ClaimedAt, Expr::value(Utc::now()))
            .filter(draws::Column::DrawId.eq(draw_id))
            .filter(draws::Column::AccountId.eq(account_id))
            .filter(draws::Column::ClaimedAt.is_null())
            .exec(&txn)
            .await?;

        if res.rows_affected == 0 {
            // 区分不存在与已领取; 凭证属于他账户时一律 NOT_FOUND
            let existing = draws::Entity::find()
                .filter(draws::Column::DrawId.eq(draw_id))
                .filter(draws::Column::AccountId.eq(account_id))
                .one(&txn)
                .await?;
            return match existing {
                Some(_) => Err(AppError::AlreadyClaimed(format!(
                    "Draw {draw_id} has already been claimed"
                ))),
                None => Err(AppError::NotFound("Draw not found".to_string())),
            };
        }

        let record = draws::Entity::find()
            .filter(draws::Column::DrawId.eq(draw_id))
            .filter(draws::Column::AccountId.eq(account_id))
            .one(&txn)
            .await?
            .ok_or_else(|| {
                AppError::InternalError("Draw disappeared after claim".to_string())
            })?;

        let credit = Credit::from_reward(&record.currency_type, record.amount);
        let new_balance = self
            .wallet_service
            .apply_credit(
                &txn,
                account_id,
                &credit,
                TX_TYPE_WHEEL_REWARD,
                Some(record.draw_id.clone()),
                Some(record.description.clone()),
            )
            .await?;

        txn.commit().await?;

        Ok(ClaimResponse {
            draw_id: record.draw_id,
            currency_type: credit.currency_type(),
            amount: credit.amount(),
            new_balance,
        })
    }

    /// 获取抽奖台账 (分页, 倒序)
    pub async fn list_history(
        &self,
        account_id: i64,
        query: &DrawHistoryQuery,
    ) -> AppResult<DrawRecordPageResponse> {
        let params = PaginationParams::new(query.page, query.per_page);
        let offset = params.get_offset();
        let limit = params.get_limit();

        let base_query = draws::Entity::find().filter(draws::Column::AccountId.eq(account_id));

        let total = base_query.clone().count(&self.pool).await? as i64;

        let items_models = base_query
            .order_by(draws::Column::DrawnAt, Order::Desc)
            .limit(limit as u64)
            .offset(offset as u64)
            .all(&self.pool)
            .await?;

        let items: Vec<DrawRecordResponse> = items_models.into_iter().map(Into::into).collect();

        Ok(PaginatedResponse::new(
            items,
            params.get_page(),
            limit,
            total,
        ))
    }

    async fn remaining_spins<C: ConnectionTrait>(
        &self,
        conn: &C,
        account_id: i64,
    ) -> AppResult<i64> {
        use crate::entities::wheel_eligibility_entity as eligibility;
        let state = eligibility::Entity::find()
            .filter(eligibility::Column::AccountId.eq(account_id))
            .one(conn)
            .await?;
        Ok(state.map(|s| s.total_spins_available).unwrap_or(0))
    }
}

/// 加权随机选取
///
/// defs 须非空且顺序固定 (按 id 升序); sample 取自 [0, 1)。
/// 将 sample 放大到权重合计后沿固定顺序累计, 选第一个累计值 >= 放大样本的项;
/// 浮点累计在边界舍入时兜底返回第一项 (绝不允许选不出)
pub(crate) fn select_reward(defs: &[rewards::Model], sample: f64) -> &rewards::Model {
    let total_weight: f64 = defs.iter().map(|d| d.probability_weight).sum();
    let scaled = sample * total_weight;

    let mut acc = 0.0;
    for d in defs {
        acc += d.probability_weight;
        if acc >= scaled {
            return d;
        }
    }

    &defs[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CurrencyType, WheelRarity};

    fn reward(id: i64, weight: f64) -> rewards::Model {
        rewards::Model {
            id,
            amount: 100 * id,
            currency_type: CurrencyType::GoldCoins,
            rarity: WheelRarity::Common,
            probability_weight: weight,
            description: format!("Reward {id}"),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_select_reward_midpoint() {
        // 权重 70/30, sample 0.5 -> 放大后 50, A 累计 70 >= 50 -> 选 A
        let defs = vec![reward(1, 70.0), reward(2, 30.0)];
        assert_eq!(select_reward(&defs, 0.5).id, 1);
    }

    #[test]
    fn test_select_reward_boundaries() {
        let defs = vec![reward(1, 70.0), reward(2, 30.0)];
        assert_eq!(select_reward(&defs, 0.0).id, 1);
        // 0.7 恰好落在 A 的累计边界上
        assert_eq!(select_reward(&defs, 0.7).id, 1);
        assert_eq!(select_reward(&defs, 0.71).id, 2);
        assert_eq!(select_reward(&defs, 0.999_999).id, 2);
    }

    #[test]
    fn test_select_reward_single_definition() {
        let defs = vec![reward(1, 100.0)];
        assert_eq!(select_reward(&defs, 0.0).id, 1);
        assert_eq!(select_reward(&defs, 0.999_999).id, 1);
    }

    #[test]
    fn test_select_reward_statistical_fidelity() {
        // 大样本下观测频率应接近 weight / total (容差 1 个百分点)
        let defs = vec![reward(1, 60.0), reward(2, 30.0), reward(3, 10.0)];
        let mut counts = [0u32; 3];
        let n = 200_000;
        let mut rng = rand::thread_rng();
        for _ in 0..n {
            let sample: f64 = rng.gen_range(0.0..1.0);
            let idx = (select_reward(&defs, sample).id - 1) as usize;
            counts[idx] += 1;
        }
        let expected = [0.6, 0.3, 0.1];
        for (i, &count) in counts.iter().enumerate() {
            let observed = count as f64 / n as f64;
            assert!(
                (observed - expected[i]).abs() < 0.01,
                "reward {} observed {observed}, expected {}",
                i + 1,
                expected[i]
            );
        }
    }
}
