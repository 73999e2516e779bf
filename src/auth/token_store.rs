//! # 令牌存储
//!
//! OAuth 回调的持久化协作者。所有写入都是数据库级的
//! `INSERT ... ON CONFLICT` 单语句 upsert，自然键冲突时只更新可变字段，
//! 绝不产生重复行，也不做应用层的先读后写

use chrono::Utc;
use entity::{app_settings, bot_installations, twitch_identities, twitch_tokens};
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;

/// 令牌存储操作错误
#[derive(Debug, Error)]
pub enum TokenStoreError {
    /// 依赖全局默认机器人的操作在其未配置时执行
    #[error("app_settings.default_bot_identity_id not set")]
    DefaultBotNotConfigured,

    #[error(transparent)]
    Db(#[from] DbErr),

    #[error("serialize scopes failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// 身份与令牌的 upsert 输入
#[derive(Debug, Clone)]
pub struct IdentityTokenUpsert {
    pub twitch_user_id: String,
    pub login: String,
    pub access_token: String,
    pub refresh_token: String,
    pub scopes: Vec<String>,
    pub expires_at: chrono::NaiveDateTime,
}

/// 内部导出接口返回的单行令牌数据
#[derive(Debug, Clone, Serialize)]
pub struct TokenExportRow {
    pub user_id: String,
    pub login: String,
    pub access_token: String,
    pub refresh_token: String,
    pub scopes: Vec<String>,
    pub expires_at: chrono::NaiveDateTime,
}

/// 令牌存储
#[derive(Debug, Clone)]
pub struct TokenStore {
    db: Arc<DatabaseConnection>,
}

impl TokenStore {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// upsert 身份与令牌，返回身份ID
    ///
    /// 两条 upsert 在同一事务中执行，并发回调同一账号时不会出现
    /// 身份与令牌互相错位的中间状态
    pub async fn upsert_identity_and_token(
        &self,
        input: IdentityTokenUpsert,
    ) -> Result<i32, TokenStoreError> {
        let now = Utc::now().naive_utc();
        let scopes_json = serde_json::to_string(&input.scopes)?;

        let txn = self.db.begin().await?;

        let identity = twitch_identities::Entity::insert(twitch_identities::ActiveModel {
            twitch_user_id: Set(input.twitch_user_id),
            login: Set(input.login),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(twitch_identities::Column::TwitchUserId)
                .update_columns([
                    twitch_identities::Column::Login,
                    twitch_identities::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(&txn)
        .await?;

        twitch_tokens::Entity::insert(twitch_tokens::ActiveModel {
            identity_id: Set(identity.id),
            access_token: Set(input.access_token),
            refresh_token: Set(input.refresh_token),
            scopes: Set(scopes_json),
            expires_at: Set(input.expires_at),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(twitch_tokens::Column::IdentityId)
                .update_columns([
                    twitch_tokens::Column::AccessToken,
                    twitch_tokens::Column::RefreshToken,
                    twitch_tokens::Column::Scopes,
                    twitch_tokens::Column::ExpiresAt,
                    twitch_tokens::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(&txn)
        .await?;

        txn.commit().await?;

        Ok(identity.id)
    }

    /// 按登录名查找身份ID
    pub async fn identity_id_by_login(&self, login: &str) -> Result<Option<i32>, TokenStoreError> {
        let identity = twitch_identities::Entity::find()
            .filter(twitch_identities::Column::Login.eq(login))
            .one(self.db.as_ref())
            .await?;

        Ok(identity.map(|row| row.id))
    }

    /// 按 Twitch 用户ID查找身份ID
    pub async fn identity_id_by_twitch_user_id(
        &self,
        twitch_user_id: &str,
    ) -> Result<Option<i32>, TokenStoreError> {
        let identity = twitch_identities::Entity::find()
            .filter(twitch_identities::Column::TwitchUserId.eq(twitch_user_id))
            .one(self.db.as_ref())
            .await?;

        Ok(identity.map(|row| row.id))
    }

    /// 读取全局默认机器人身份ID
    pub async fn default_bot_identity_id(&self) -> Result<Option<i32>, TokenStoreError> {
        let settings = app_settings::Entity::find_by_id(true)
            .one(self.db.as_ref())
            .await?;

        Ok(settings.map(|row| row.default_bot_identity_id))
    }

    /// 设置全局默认机器人
    ///
    /// `force = false` 时只在未设置过的情况下写入（`ON CONFLICT DO NOTHING`），
    /// `force = true` 时无条件覆盖
    pub async fn set_default_bot(
        &self,
        identity_id: i32,
        force: bool,
    ) -> Result<(), TokenStoreError> {
        let insert = app_settings::Entity::insert(app_settings::ActiveModel {
            id: Set(true),
            default_bot_identity_id: Set(identity_id),
            updated_at: Set(Utc::now().naive_utc()),
        });

        if force {
            insert
                .on_conflict(
                    OnConflict::column(app_settings::Column::Id)
                        .update_columns([
                            app_settings::Column::DefaultBotIdentityId,
                            app_settings::Column::UpdatedAt,
                        ])
                        .to_owned(),
                )
                .exec(self.db.as_ref())
                .await?;
            return Ok(());
        }

        match insert
            .on_conflict(
                OnConflict::column(app_settings::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(self.db.as_ref())
            .await
        {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// 为主播惰性创建安装记录，主/备用机器人都指向当前默认机器人
    ///
    /// 记录已存在时只刷新 `updated_at`，已有的指向保持不变。
    /// 默认机器人未配置时拒绝执行
    pub async fn install_with_defaults(
        &self,
        broadcaster_identity_id: i32,
    ) -> Result<(), TokenStoreError> {
        let default_bot = self
            .default_bot_identity_id()
            .await?
            .ok_or(TokenStoreError::DefaultBotNotConfigured)?;

        let now = Utc::now().naive_utc();

        bot_installations::Entity::insert(bot_installations::ActiveModel {
            broadcaster_identity_id: Set(broadcaster_identity_id),
            main_bot_identity_id: Set(default_bot),
            fallback_bot_identity_id: Set(default_bot),
            is_enabled: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(bot_installations::Column::BroadcasterIdentityId)
                .update_column(bot_installations::Column::UpdatedAt)
                .to_owned(),
        )
        .exec(self.db.as_ref())
        .await?;

        Ok(())
    }

    /// 将主播安装记录的主机器人重新指向给定身份
    ///
    /// 记录不存在时创建，存在时覆盖主/备用指向并强制启用
    pub async fn set_installation_main_bot(
        &self,
        broadcaster_identity_id: i32,
        main_bot_identity_id: i32,
        fallback_bot_identity_id: i32,
    ) -> Result<(), TokenStoreError> {
        let now = Utc::now().naive_utc();

        bot_installations::Entity::insert(bot_installations::ActiveModel {
            broadcaster_identity_id: Set(broadcaster_identity_id),
            main_bot_identity_id: Set(main_bot_identity_id),
            fallback_bot_identity_id: Set(fallback_bot_identity_id),
            is_enabled: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(bot_installations::Column::BroadcasterIdentityId)
                .update_columns([
                    bot_installations::Column::MainBotIdentityId,
                    bot_installations::Column::FallbackBotIdentityId,
                    bot_installations::Column::IsEnabled,
                    bot_installations::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec(self.db.as_ref())
        .await?;

        Ok(())
    }

    /// 导出全部已存储的令牌，按更新时间倒序
    pub async fn export_tokens(&self) -> Result<Vec<TokenExportRow>, TokenStoreError> {
        let rows = twitch_tokens::Entity::find()
            .find_also_related(twitch_identities::Entity)
            .order_by_desc(twitch_tokens::Column::UpdatedAt)
            .all(self.db.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(token, identity)| {
                identity.map(|identity| TokenExportRow {
                    user_id: identity.twitch_user_id,
                    login: identity.login,
                    scopes: token.parse_scopes(),
                    access_token: token.access_token,
                    refresh_token: token.refresh_token,
                    expires_at: token.expires_at,
                })
            })
            .collect())
    }
}
