use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 twitch_identities 表 - 按 twitch_user_id 唯一记录 Twitch 账号
        manager
            .create_table(
                Table::create()
                    .table(TwitchIdentities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TwitchIdentities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TwitchIdentities::TwitchUserId)
                            .string_len(64)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(TwitchIdentities::Login)
                            .string_len(64)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TwitchIdentities::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(TwitchIdentities::UpdatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // 按 login 查询的索引（login 不唯一，可能随改名变化）
        manager
            .create_index(
                Index::create()
                    .name("idx_twitch_identities_login")
                    .table(TwitchIdentities::Table)
                    .col(TwitchIdentities::Login)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TwitchIdentities::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum TwitchIdentities {
    #[sea_orm(iden = "twitch_identities")]
    Table,
    Id,
    TwitchUserId,
    Login,
    CreatedAt,
    UpdatedAt,
}
