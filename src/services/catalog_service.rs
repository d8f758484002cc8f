use crate::entities::wheel_reward_entity as rewards;
use crate::error::AppResult;
use crate::models::{CatalogValidationResponse, WheelRewardPublicResponse};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// 启用奖励的权重合计目标值与容差
const TOTAL_WEIGHT_TARGET: f64 = 100.0;
const TOTAL_WEIGHT_TOLERANCE: f64 = 0.1;

#[derive(Clone)]
pub struct CatalogService {
    pool: DatabaseConnection,
}

impl CatalogService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 获取奖励列表 (仅启用的, 按 id 升序, 不含权重)
    pub async fn list_public(&self) -> AppResult<Vec<WheelRewardPublicResponse>> {
        let list = rewards::Entity::find()
            .filter(rewards::Column::IsActive.eq(true))
            .order_by_asc(rewards::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(list.into_iter().map(Into::into).collect())
    }

    /// 校验奖励配置 (管理端)
    ///
    /// 配置问题只报告不报错 —— 属于管理员配置失误, 不是运行时故障
    pub async fn validate(&self) -> AppResult<CatalogValidationResponse> {
        let list = rewards::Entity::find()
            .filter(rewards::Column::IsActive.eq(true))
            .order_by_asc(rewards::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(validate_definitions(&list))
    }
}

/// 校验规则:
/// - 启用项非空
/// - 每项 amount > 0 且 probability_weight > 0
/// - 权重合计接近 100 (容差 0.1)
pub(crate) fn validate_definitions(defs: &[rewards::Model]) -> CatalogValidationResponse {
    let mut issues = Vec::new();

    if defs.is_empty() {
        issues.push("No active rewards configured".to_string());
    }

    for d in defs {
        if d.amount <= 0 {
            issues.push(format!("Reward {} has non-positive amount {}", d.id, d.amount));
        }
        if d.probability_weight <= 0.0 {
            issues.push(format!(
                "Reward {} has non-positive probability weight {}",
                d.id, d.probability_weight
            ));
        }
    }

    let total_weight: f64 = defs.iter().map(|d| d.probability_weight).sum();
    if !defs.is_empty() && (total_weight - TOTAL_WEIGHT_TARGET).abs() > TOTAL_WEIGHT_TOLERANCE {
        issues.push(format!(
            "Total probability is {total_weight}%, should be close to 100%"
        ));
    }

    CatalogValidationResponse {
        valid: issues.is_empty(),
        issues,
        total_weight,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CurrencyType, WheelRarity};

    fn reward(id: i64, amount: i64, weight: f64) -> rewards::Model {
        rewards::Model {
            id,
            amount,
            currency_type: CurrencyType::GoldCoins,
            rarity: WheelRarity::Common,
            probability_weight: weight,
            description: format!("{amount} Gold Coins"),
            is_active: true,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_valid_catalog() {
        let defs = vec![reward(1, 500, 70.0), reward(2, 1000, 30.0)];
        let result = validate_definitions(&defs);
        assert!(result.valid);
        assert!(result.issues.is_empty());
        assert_eq!(result.total_weight, 100.0);
    }

    #[test]
    fn test_total_weight_out_of_tolerance() {
        let defs = vec![reward(1, 500, 70.0), reward(2, 1000, 35.0)];
        let result = validate_definitions(&defs);
        assert!(!result.valid);
        assert_eq!(result.total_weight, 105.0);
        assert_eq!(
            result.issues,
            vec!["Total probability is 105%, should be close to 100%".to_string()]
        );
    }

    #[test]
    fn test_total_weight_within_tolerance() {
        let defs = vec![reward(1, 500, 70.05), reward(2, 1000, 30.0)];
        let result = validate_definitions(&defs);
        assert!(result.valid);
    }

    #[test]
    fn test_non_positive_amount_and_weight() {
        // 合计恰为 100, 只报 amount 与 weight 两条
        let defs = vec![reward(1, 0, 100.0), reward(2, 1000, 0.0)];
        let result = validate_definitions(&defs);
        assert!(!result.valid);
        assert_eq!(result.issues.len(), 2);
    }

    #[test]
    fn test_empty_catalog() {
        let result = validate_definitions(&[]);
        assert!(!result.valid);
        assert_eq!(result.total_weight, 0.0);
    }
}
