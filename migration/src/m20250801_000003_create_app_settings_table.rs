use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 app_settings 表 - 布尔主键恒为 true，强制单行
        manager
            .create_table(
                Table::create()
                    .table(AppSettings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppSettings::Id)
                            .boolean()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AppSettings::DefaultBotIdentityId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(AppSettings::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_app_settings_default_bot_identity_id")
                            .from(AppSettings::Table, AppSettings::DefaultBotIdentityId)
                            .to(TwitchIdentities::Table, TwitchIdentities::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AppSettings::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum AppSettings {
    #[sea_orm(iden = "app_settings")]
    Table,
    Id,
    DefaultBotIdentityId,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TwitchIdentities {
    #[sea_orm(iden = "twitch_identities")]
    Table,
    Id,
}
