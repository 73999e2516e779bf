use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 bot_installations 表 - 每个主播一条安装记录
        manager
            .create_table(
                Table::create()
                    .table(BotInstallations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BotInstallations::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BotInstallations::BroadcasterIdentityId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(BotInstallations::MainBotIdentityId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BotInstallations::FallbackBotIdentityId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BotInstallations::IsEnabled)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(BotInstallations::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BotInstallations::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bot_installations_broadcaster_identity_id")
                            .from(
                                BotInstallations::Table,
                                BotInstallations::BroadcasterIdentityId,
                            )
                            .to(TwitchIdentities::Table, TwitchIdentities::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bot_installations_main_bot_identity_id")
                            .from(
                                BotInstallations::Table,
                                BotInstallations::MainBotIdentityId,
                            )
                            .to(TwitchIdentities::Table, TwitchIdentities::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bot_installations_fallback_bot_identity_id")
                            .from(
                                BotInstallations::Table,
                                BotInstallations::FallbackBotIdentityId,
                            )
                            .to(TwitchIdentities::Table, TwitchIdentities::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bot_installations_main_bot_identity_id")
                    .table(BotInstallations::Table)
                    .col(BotInstallations::MainBotIdentityId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BotInstallations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum BotInstallations {
    #[sea_orm(iden = "bot_installations")]
    Table,
    Id,
    BroadcasterIdentityId,
    MainBotIdentityId,
    FallbackBotIdentityId,
    IsEnabled,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TwitchIdentities {
    #[sea_orm(iden = "twitch_identities")]
    Table,
    Id,
}
