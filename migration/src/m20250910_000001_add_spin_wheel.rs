use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;
use sea_orm_migration::sea_orm::Statement;

/// Wheel Rewards (转盘奖励配置表)
#[derive(DeriveIden)]
enum WheelRewards {
    Table,
    Id,
    Amount,
    CurrencyType,
    Rarity,
    ProbabilityWeight,
    Description,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

/// Wheel Draws (抽奖台账, 只追加)
#[derive(DeriveIden)]
enum WheelDraws {
    Table,
    Id,
    DrawId,
    AccountId,
    RewardId,
    Amount,
    CurrencyType,
    Rarity,
    Description,
    DrawnAt,
    ClaimedAt,
    ClientIp,
    UserAgent,
}

/// Wheel Eligibility (每账户抽奖资格统计)
#[derive(DeriveIden)]
enum WheelEligibility {
    Table,
    Id,
    AccountId,
    FirstTimeGrantUsed,
    FirstTimeSpinsRemaining,
    RandomSpinsRemaining,
    TotalSpinsAvailable,
    LastRandomGrantCheckedAt,
    LastRandomGrantAt,
    CreatedAt,
    UpdatedAt,
}

/// Wheel Threshold Grants (消费门槛发放记录, 只追加)
#[derive(DeriveIden)]
enum WheelThresholdGrants {
    Table,
    Id,
    AccountId,
    ThresholdId,
    SpendThresholdCents,
    SpinsAwarded,
    SpinsConsumed,
    ReachedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 转盘子系统:
/// - probability_weight: 相对权重 (double precision), 启用项合计应接近 100
/// - wheel_draws 对奖励字段做冗余快照, 配置后续修改不影响历史记录
/// - draw_id 为不可枚举的领取凭证, 全表唯一
///
/// 初始奖励配置 (合计权重 100.0):
/// - 500 Gold Coins    common     40.0
/// - 1500 Gold Coins   common     24.0
/// - 5000 Gold Coins   uncommon   15.0
/// - 10000 Gold Coins  rare       10.0
/// - 1 Sweep Coin      uncommon    6.5
/// - 5 Sweep Coins     rare        3.0
/// - 10 Sweep Coins    very_rare   1.0
/// - 50 Sweep Coins    ultra_rare  0.45
/// - 500 Sweep Coins   jackpot     0.05
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 稀有度枚举类型
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("wheel_rarity"))
                    .values(vec![
                        Alias::new("common"),
                        Alias::new("uncommon"),
                        Alias::new("rare"),
                        Alias::new("very_rare"),
                        Alias::new("ultra_rare"),
                        Alias::new("jackpot"),
                    ])
                    .to_owned(),
            )
            .await?;

        // 奖励配置表
        manager
            .create_table(
                Table::create()
                    .table(WheelRewards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WheelRewards::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WheelRewards::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelRewards::CurrencyType)
                            .custom(Alias::new("currency_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelRewards::Rarity)
                            .custom(Alias::new("wheel_rarity"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelRewards::ProbabilityWeight)
                            .double()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelRewards::Description)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelRewards::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(WheelRewards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(WheelRewards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 抽奖台账表
        manager
            .create_table(
                Table::create()
                    .table(WheelDraws::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WheelDraws::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WheelDraws::DrawId)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelDraws::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelDraws::RewardId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(WheelDraws::Amount).big_integer().not_null())
                    .col(
                        ColumnDef::new(WheelDraws::CurrencyType)
                            .custom(Alias::new("currency_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelDraws::Rarity)
                            .custom(Alias::new("wheel_rarity"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelDraws::Description)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelDraws::DrawnAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(WheelDraws::ClaimedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(WheelDraws::ClientIp).string_len(45).null())
                    .col(
                        ColumnDef::new(WheelDraws::UserAgent)
                            .string_len(255)
                            .null(),
                    )
                    .to_owned(),
            )
            .await?;

        // draw_id 全表唯一 (领取凭证)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_wheel_draws_draw_id_unique")
                    .table(WheelDraws::Table)
                    .col(WheelDraws::DrawId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 账户查询台账索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_wheel_draws_account")
                    .table(WheelDraws::Table)
                    .col(WheelDraws::AccountId)
                    .to_owned(),
            )
            .await?;

        // 奖励外键索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_wheel_draws_reward")
                    .table(WheelDraws::Table)
                    .col(WheelDraws::RewardId)
                    .to_owned(),
            )
            .await?;

        // 外键 (不加 ON DELETE CASCADE, 历史记录永久保留)
        manager
            .alter_table(
                Table::alter()
                    .table(WheelDraws::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_wheel_draw_reward")
                            .from_tbl(WheelDraws::Table)
                            .from_col(WheelDraws::RewardId)
                            .to_tbl(WheelRewards::Table)
                            .to_col(WheelRewards::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // 资格统计表
        manager
            .create_table(
                Table::create()
                    .table(WheelEligibility::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WheelEligibility::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WheelEligibility::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelEligibility::FirstTimeGrantUsed)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(WheelEligibility::FirstTimeSpinsRemaining)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WheelEligibility::RandomSpinsRemaining)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WheelEligibility::TotalSpinsAvailable)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WheelEligibility::LastRandomGrantCheckedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(WheelEligibility::LastRandomGrantAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(WheelEligibility::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(WheelEligibility::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // account_id 唯一索引 (一个账户一条统计记录)
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_wheel_eligibility_account_unique")
                    .table(WheelEligibility::Table)
                    .col(WheelEligibility::AccountId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 门槛发放表
        manager
            .create_table(
                Table::create()
                    .table(WheelThresholdGrants::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WheelThresholdGrants::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(WheelThresholdGrants::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelThresholdGrants::ThresholdId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelThresholdGrants::SpendThresholdCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelThresholdGrants::SpinsAwarded)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WheelThresholdGrants::SpinsConsumed)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(WheelThresholdGrants::ReachedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 同一账户同一门槛只发放一次
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_wheel_threshold_grants_account_threshold_unique")
                    .table(WheelThresholdGrants::Table)
                    .col(WheelThresholdGrants::AccountId)
                    .col(WheelThresholdGrants::ThresholdId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // 初始化奖励配置
        let conn = manager.get_connection();
        let insert_sql = r#"
INSERT INTO wheel_rewards (amount, currency_type, rarity, probability_weight, description, is_active)
VALUES
 (500,   'gold_coins',  'common',     40.0,  '500 Gold Coins',   TRUE),
 (1500,  'gold_coins',  'common',     24.0,  '1500 Gold Coins',  TRUE),
 (5000,  'gold_coins',  'uncommon',   15.0,  '5000 Gold Coins',  TRUE),
 (10000, 'gold_coins',  'rare',       10.0,  '10000 Gold Coins', TRUE),
 (1,     'sweep_coins', 'uncommon',   6.5,   '1 Sweep Coin',     TRUE),
 (5,     'sweep_coins', 'rare',       3.0,   '5 Sweep Coins',    TRUE),
 (10,    'sweep_coins', 'very_rare',  1.0,   '10 Sweep Coins',   TRUE),
 (50,    'sweep_coins', 'ultra_rare', 0.45,  '50 Sweep Coins',   TRUE),
 (500,   'sweep_coins', 'jackpot',    0.05,  '500 Sweep Coins',  TRUE);
"#;
        conn.execute(Statement::from_string(
            manager.get_database_backend(),
            insert_sql.to_string(),
        ))
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 删除顺序: 台账 -> 奖励 -> 资格 -> 门槛发放
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(WheelDraws::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(WheelRewards::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(WheelEligibility::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(WheelThresholdGrants::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_type(
                Type::drop()
                    .if_exists()
                    .name(Alias::new("wheel_rarity"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
