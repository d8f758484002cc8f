use sea_orm_migration::prelude::*;
use sea_orm_migration::prelude::extension::postgres::Type;

/// Accounts (玩家账户, 含两种币余额)
#[derive(DeriveIden)]
enum Accounts {
    Table,
    Id,
    Username,
    GoldCoinBalance,
    SweepCoinBalance,
    CreatedAt,
    UpdatedAt,
}

/// Coin Transactions (币流水, 每次入账一条, 含入账后余额)
#[derive(DeriveIden)]
enum CoinTransactions {
    Table,
    Id,
    AccountId,
    CurrencyType,
    TransactionType,
    Amount,
    BalanceAfter,
    RelatedDrawId,
    Description,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// 账户与钱包流水基础表:
/// - gold_coin_balance: 金币余额 (娱乐币)
/// - sweep_coin_balance: 抽奖币余额 (可兑付, 与金币独立记账, 永不混算)
/// - coin_transactions: 只追加流水, balance_after 记录入账后余额便于对账
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 币种枚举类型
        manager
            .create_type(
                Type::create()
                    .as_enum(Alias::new("currency_type"))
                    .values(vec![Alias::new("gold_coins"), Alias::new("sweep_coins")])
                    .to_owned(),
            )
            .await?;

        // 账户表
        manager
            .create_table(
                Table::create()
                    .table(Accounts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Accounts::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Accounts::Username)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Accounts::GoldCoinBalance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Accounts::SweepCoinBalance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Accounts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .col(
                        ColumnDef::new(Accounts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 流水表
        manager
            .create_table(
                Table::create()
                    .table(CoinTransactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CoinTransactions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CoinTransactions::AccountId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoinTransactions::CurrencyType)
                            .custom(Alias::new("currency_type"))
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoinTransactions::TransactionType)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoinTransactions::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoinTransactions::BalanceAfter)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CoinTransactions::RelatedDrawId)
                            .string_len(64)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CoinTransactions::Description)
                            .string_len(255)
                            .null(),
                    )
                    .col(
                        ColumnDef::new(CoinTransactions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::cust("NOW()")),
                    )
                    .to_owned(),
            )
            .await?;

        // 账户查询流水索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_coin_transactions_account")
                    .table(CoinTransactions::Table)
                    .col(CoinTransactions::AccountId)
                    .to_owned(),
            )
            .await?;

        // 外键
        manager
            .alter_table(
                Table::alter()
                    .table(CoinTransactions::Table)
                    .add_foreign_key(
                        TableForeignKey::new()
                            .name("fk_coin_transaction_account")
                            .from_tbl(CoinTransactions::Table)
                            .from_col(CoinTransactions::AccountId)
                            .to_tbl(Accounts::Table)
                            .to_col(Accounts::Id),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(
                Table::drop()
                    .if_exists()
                    .table(CoinTransactions::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().if_exists().table(Accounts::Table).to_owned())
            .await?;

        manager
            .drop_type(
                Type::drop()
                    .if_exists()
                    .name(Alias::new("currency_type"))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}
