pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_twitch_identities_table;
mod m20250801_000002_create_twitch_tokens_table;
mod m20250801_000003_create_app_settings_table;
mod m20250801_000004_create_bot_installations_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_twitch_identities_table::Migration),
            Box::new(m20250801_000002_create_twitch_tokens_table::Migration),
            Box::new(m20250801_000003_create_app_settings_table::Migration),
            Box::new(m20250801_000004_create_bot_installations_table::Migration),
        ]
    }
}
