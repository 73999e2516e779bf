//! # OAuth 认证处理器
//!
//! 两个端点组成完整的授权码流程：`authorize` 生成防伪 state 并把浏览器
//! 重定向到 Twitch；`callback` 校验 state、换取并校验令牌、落库，
//! 再按认证模式完成安装记录的维护

use crate::auth::cookies::{
    MODE_COOKIE, OWNER_COOKIE, STATE_COOKIE, build_flow_cookie, clear_flow_cookies,
};
use crate::auth::mode::AuthMode;
use crate::auth::token_store::IdentityTokenUpsert;
use crate::error::auth::AuthFlowError;
use crate::management::server::AppState;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use serde::Deserialize;
use uuid::Uuid;

/// 授权入口查询参数
#[derive(Debug, Deserialize)]
pub struct AuthorizeQuery {
    /// 认证模式，默认 broadcaster
    pub mode: Option<String>,
    /// custom_bot 模式下接入方主播的 Twitch 用户ID
    pub owner: Option<String>,
}

/// 回调查询参数
#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

// 跳转统一使用 302，与对外契约一致
fn found_redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

/// 签发授权跳转
///
/// 生成一次性防伪 state，写入短时 cookie 后把浏览器重定向到 Twitch
/// 授权端点。不产生任何持久化
pub async fn authorize(
    State(state): State<AppState>,
    Query(query): Query<AuthorizeQuery>,
    jar: CookieJar,
) -> Result<(CookieJar, Response), AuthFlowError> {
    let mode = match query.mode.as_deref() {
        None => AuthMode::default(),
        Some(raw) => AuthMode::parse(raw).ok_or_else(|| AuthFlowError::InvalidMode(raw.to_string()))?,
    };

    let owner = query.owner.filter(|value| !value.is_empty());
    if mode == AuthMode::CustomBot && owner.is_none() {
        return Err(AuthFlowError::MissingOwner);
    }

    let csrf_token = Uuid::new_v4().to_string();
    let redirect = state.oauth.authorize_url(&csrf_token);
    let secure = state.config.cookies_secure();

    let mut jar = jar
        .add(build_flow_cookie(STATE_COOKIE, &csrf_token, secure))
        .add(build_flow_cookie(MODE_COOKIE, mode.as_str(), secure));

    if mode == AuthMode::CustomBot {
        if let Some(owner) = &owner {
            jar = jar.add(build_flow_cookie(OWNER_COOKIE, owner, secure));
        }
    }

    tracing::info!(mode = mode.as_str(), "redirecting to twitch authorize endpoint");

    Ok((jar, found_redirect(&redirect)))
}

/// 处理授权回调
///
/// 状态机按固定顺序推进，任何一步失败都终止请求：
/// 上游错误透传 → 参数校验 → 防伪校验 → 模式复验 → 换取令牌 →
/// 校验令牌 → 持久化 → 模式分发 → 成功跳转并清除临时 cookie
pub async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
    jar: CookieJar,
) -> Result<(CookieJar, Response), AuthFlowError> {
    // 1. 上游把错误带回来时原样透传，不做任何持久化
    if let Some(error) = query.error {
        tracing::warn!(error = %error, "twitch reported an authorize error");
        return Err(AuthFlowError::Provider {
            error,
            desc: query.error_description,
        });
    }

    // 2. code 与 state 缺一不可
    let (Some(code), Some(csrf_token)) = (query.code, query.state) else {
        return Err(AuthFlowError::MissingCodeOrState);
    };

    // 3. 防伪校验：state 必须与 cookie 中的值完全一致，cookie 缺失视为不一致
    match jar.get(STATE_COOKIE) {
        Some(cookie) if cookie.value() == csrf_token => {}
        _ => return Err(AuthFlowError::InvalidState),
    }

    // 4. 模式复验：cookie 可被篡改，未知值直接拒绝
    let mode = match jar.get(MODE_COOKIE) {
        None => AuthMode::default(),
        Some(cookie) => AuthMode::parse(cookie.value())
            .ok_or_else(|| AuthFlowError::InvalidMode(cookie.value().to_string()))?,
    };
    let owner = jar.get(OWNER_COOKIE).map(|cookie| cookie.value().to_string());

    // 5. 授权码换令牌
    let token = state.oauth.exchange_code(&code).await?;

    // 6. 校验令牌，取得权威身份；绝对过期时间 = 当前时间 + 剩余秒数
    let session = state.oauth.validate_token(&token.access_token).await?;
    let expires_at = Utc::now().naive_utc() + Duration::seconds(session.expires_in);

    // 7. 持久化身份与令牌
    let identity_id = state
        .token_store
        .upsert_identity_and_token(IdentityTokenUpsert {
            twitch_user_id: session.user_id.clone(),
            login: session.login.clone(),
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            scopes: session.scopes,
            expires_at,
        })
        .await?;

    tracing::info!(
        user_id = %session.user_id,
        login = %session.login,
        mode = mode.as_str(),
        "persisted twitch identity and token"
    );

    // 8. 模式分发
    match mode {
        AuthMode::ServiceBot => {
            // 只在默认机器人尚未设置时生效
            state.token_store.set_default_bot(identity_id, false).await?;
        }
        AuthMode::Broadcaster => {
            // 主播接入：创建安装记录，主/备用都指向默认机器人
            state.token_store.install_with_defaults(identity_id).await?;
        }
        AuthMode::CustomBot => {
            // owner 是接入自定义机器人的主播的 Twitch 用户ID
            // TODO: 之后必须校验 owner 与已登录主播会话的一致性
            let owner = owner.ok_or(AuthFlowError::MissingOwnerCookie)?;

            let broadcaster_id = state
                .token_store
                .identity_id_by_twitch_user_id(&owner)
                .await?
                .ok_or(AuthFlowError::OwnerNotFound)?;

            let fallback_bot_id = state
                .token_store
                .default_bot_identity_id()
                .await?
                .ok_or(AuthFlowError::DefaultBotNotConfigured)?;

            state
                .token_store
                .set_installation_main_bot(broadcaster_id, identity_id, fallback_bot_id)
                .await?;
        }
    }

    // 9. 成功：清除全部临时 cookie 并跳转到成功页
    let jar = clear_flow_cookies(jar);
    Ok((jar, found_redirect(&state.config.success_url())))
}
