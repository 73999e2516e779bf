use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 twitch_tokens 表 - 每个身份恰好一行当前凭证
        manager
            .create_table(
                Table::create()
                    .table(TwitchTokens::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TwitchTokens::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TwitchTokens::IdentityId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TwitchTokens::AccessToken)
                            .text()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TwitchTokens::RefreshToken)
                            .text()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TwitchTokens::Scopes).text().not_null())
                    .col(
                        ColumnDef::new(TwitchTokens::ExpiresAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TwitchTokens::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TwitchTokens::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_twitch_tokens_identity_id")
                            .from(TwitchTokens::Table, TwitchTokens::IdentityId)
                            .to(TwitchIdentities::Table, TwitchIdentities::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 内部导出接口按更新时间倒序返回
        manager
            .create_index(
                Index::create()
                    .name("idx_twitch_tokens_updated_at")
                    .table(TwitchTokens::Table)
                    .col(TwitchTokens::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TwitchTokens::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TwitchTokens {
    #[sea_orm(iden = "twitch_tokens")]
    Table,
    Id,
    IdentityId,
    AccessToken,
    RefreshToken,
    Scopes,
    ExpiresAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum TwitchIdentities {
    #[sea_orm(iden = "twitch_identities")]
    Table,
    Id,
}
