pub use sea_orm_migration::prelude::*;

mod m20250903_000001_create_accounts;
mod m20250910_000001_add_spin_wheel;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250903_000001_create_accounts::Migration),
            Box::new(m20250910_000001_add_spin_wheel::Migration),
        ]
    }
}
