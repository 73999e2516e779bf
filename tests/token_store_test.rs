//! 令牌存储行为测试
//!
//! 关注点：
//! 1. 所有 upsert 在自然键冲突时只更新可变字段，绝不产生重复行
//! 2. 默认机器人指针"仅在未设置时写入"与"强制覆盖"是两种不同操作
//! 3. 安装记录的惰性创建依赖默认机器人已配置

use chrono::Utc;
use migration::{Migrator, MigratorTrait};
use pretty_assertions::assert_eq;
use sea_orm::{DatabaseConnection, EntityTrait};
use std::sync::Arc;
use twitch_auth::auth::token_store::{IdentityTokenUpsert, TokenStore, TokenStoreError};

async fn create_test_db() -> Arc<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Arc::new(db)
}

fn upsert_input(twitch_user_id: &str, login: &str, access_token: &str) -> IdentityTokenUpsert {
    IdentityTokenUpsert {
        twitch_user_id: twitch_user_id.to_string(),
        login: login.to_string(),
        access_token: access_token.to_string(),
        refresh_token: format!("refresh-{access_token}"),
        scopes: vec!["chat:read".to_string(), "chat:edit".to_string()],
        expires_at: Utc::now().naive_utc() + chrono::Duration::hours(4),
    }
}

#[tokio::test]
async fn test_reauth_updates_identity_and_token_in_place() {
    let db = create_test_db().await;
    let store = TokenStore::new(db.clone());

    let first_id = store
        .upsert_identity_and_token(upsert_input("111", "old_login", "token-a"))
        .await
        .unwrap();

    // 同一账号重复登录多次，改名也只是覆盖 login
    for round in 0..3 {
        let id = store
            .upsert_identity_and_token(upsert_input("111", "new_login", &format!("token-{round}")))
            .await
            .unwrap();
        assert_eq!(id, first_id);
    }

    let identities = entity::twitch_identities::Entity::find()
        .all(db.as_ref())
        .await
        .unwrap();
    assert_eq!(identities.len(), 1);
    assert_eq!(identities[0].login, "new_login");

    let tokens = entity::twitch_tokens::Entity::find()
        .all(db.as_ref())
        .await
        .unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].access_token, "token-2");
    assert_eq!(tokens[0].refresh_token, "refresh-token-2");
    assert_eq!(
        tokens[0].parse_scopes(),
        vec!["chat:read".to_string(), "chat:edit".to_string()]
    );
}

#[tokio::test]
async fn test_default_bot_set_only_if_unset() {
    let db = create_test_db().await;
    let store = TokenStore::new(db.clone());

    let bot_a = store
        .upsert_identity_and_token(upsert_input("201", "bot_a", "token-a"))
        .await
        .unwrap();
    let bot_b = store
        .upsert_identity_and_token(upsert_input("202", "bot_b", "token-b"))
        .await
        .unwrap();

    assert_eq!(store.default_bot_identity_id().await.unwrap(), None);

    store.set_default_bot(bot_a, false).await.unwrap();
    assert_eq!(store.default_bot_identity_id().await.unwrap(), Some(bot_a));

    // 第二次非强制写入是空操作
    store.set_default_bot(bot_b, false).await.unwrap();
    assert_eq!(store.default_bot_identity_id().await.unwrap(), Some(bot_a));

    // 强制写入才会覆盖
    store.set_default_bot(bot_b, true).await.unwrap();
    assert_eq!(store.default_bot_identity_id().await.unwrap(), Some(bot_b));
}

#[tokio::test]
async fn test_install_requires_default_bot() {
    let db = create_test_db().await;
    let store = TokenStore::new(db.clone());

    let broadcaster = store
        .upsert_identity_and_token(upsert_input("301", "streamer", "token-s"))
        .await
        .unwrap();

    let err = store.install_with_defaults(broadcaster).await.unwrap_err();
    assert!(matches!(err, TokenStoreError::DefaultBotNotConfigured));

    let installations = entity::bot_installations::Entity::find()
        .all(db.as_ref())
        .await
        .unwrap();
    assert!(installations.is_empty());
}

#[tokio::test]
async fn test_install_with_defaults_is_idempotent() {
    let db = create_test_db().await;
    let store = TokenStore::new(db.clone());

    let bot = store
        .upsert_identity_and_token(upsert_input("401", "service_bot", "token-bot"))
        .await
        .unwrap();
    let broadcaster = store
        .upsert_identity_and_token(upsert_input("402", "streamer", "token-s"))
        .await
        .unwrap();
    store.set_default_bot(bot, false).await.unwrap();

    store.install_with_defaults(broadcaster).await.unwrap();

    let installations = entity::bot_installations::Entity::find()
        .all(db.as_ref())
        .await
        .unwrap();
    assert_eq!(installations.len(), 1);
    assert_eq!(installations[0].broadcaster_identity_id, broadcaster);
    assert_eq!(installations[0].main_bot_identity_id, bot);
    assert_eq!(installations[0].fallback_bot_identity_id, bot);
    assert!(installations[0].is_enabled);

    // 重复创建不改动已有指向
    let custom_bot = store
        .upsert_identity_and_token(upsert_input("403", "custom_bot", "token-c"))
        .await
        .unwrap();
    store
        .set_installation_main_bot(broadcaster, custom_bot, bot)
        .await
        .unwrap();
    store.install_with_defaults(broadcaster).await.unwrap();

    let installations = entity::bot_installations::Entity::find()
        .all(db.as_ref())
        .await
        .unwrap();
    assert_eq!(installations.len(), 1);
    assert_eq!(installations[0].main_bot_identity_id, custom_bot);
    assert_eq!(installations[0].fallback_bot_identity_id, bot);
}

#[tokio::test]
async fn test_set_installation_main_bot_repoints_single_row() {
    let db = create_test_db().await;
    let store = TokenStore::new(db.clone());

    let bot = store
        .upsert_identity_and_token(upsert_input("501", "service_bot", "token-bot"))
        .await
        .unwrap();
    let broadcaster = store
        .upsert_identity_and_token(upsert_input("502", "streamer", "token-s"))
        .await
        .unwrap();
    let custom_a = store
        .upsert_identity_and_token(upsert_input("503", "custom_a", "token-a"))
        .await
        .unwrap();
    let custom_b = store
        .upsert_identity_and_token(upsert_input("504", "custom_b", "token-b"))
        .await
        .unwrap();
    store.set_default_bot(bot, false).await.unwrap();

    // 安装记录不存在时直接创建
    store
        .set_installation_main_bot(broadcaster, custom_a, bot)
        .await
        .unwrap();
    // 换一个自定义机器人再指一次
    store
        .set_installation_main_bot(broadcaster, custom_b, bot)
        .await
        .unwrap();

    let installations = entity::bot_installations::Entity::find()
        .all(db.as_ref())
        .await
        .unwrap();
    assert_eq!(installations.len(), 1);
    assert_eq!(installations[0].main_bot_identity_id, custom_b);
    assert_eq!(installations[0].fallback_bot_identity_id, bot);
    assert!(installations[0].is_enabled);
}

#[tokio::test]
async fn test_identity_lookups() {
    let db = create_test_db().await;
    let store = TokenStore::new(db.clone());

    let id = store
        .upsert_identity_and_token(upsert_input("601", "some_login", "token-x"))
        .await
        .unwrap();

    assert_eq!(
        store.identity_id_by_twitch_user_id("601").await.unwrap(),
        Some(id)
    );
    assert_eq!(
        store.identity_id_by_login("some_login").await.unwrap(),
        Some(id)
    );
    assert_eq!(store.identity_id_by_twitch_user_id("999").await.unwrap(), None);
    assert_eq!(store.identity_id_by_login("nobody").await.unwrap(), None);
}

#[tokio::test]
async fn test_export_tokens_ordered_by_most_recent_update() {
    let db = create_test_db().await;
    let store = TokenStore::new(db.clone());

    store
        .upsert_identity_and_token(upsert_input("701", "first", "token-1"))
        .await
        .unwrap();
    store
        .upsert_identity_and_token(upsert_input("702", "second", "token-2"))
        .await
        .unwrap();

    let rows = store.export_tokens().await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].user_id, "702");
    assert_eq!(rows[1].user_id, "701");

    // 重新授权第一个账号后，它应当排到最前
    store
        .upsert_identity_and_token(upsert_input("701", "first", "token-3"))
        .await
        .unwrap();

    let rows = store.export_tokens().await.unwrap();
    assert_eq!(rows[0].user_id, "701");
    assert_eq!(rows[0].access_token, "token-3");
    assert_eq!(
        rows[0].scopes,
        vec!["chat:read".to_string(), "chat:edit".to_string()]
    );
}

