//! # 路由配置
//!
//! 定义所有API路由和路由组织

use crate::management::server::AppState;
use axum::Router;
use axum::routing::get;

/// 创建所有路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // OAuth 认证路由
        .nest("/auth", auth_routes())
        // 调试路由
        .nest("/debug", debug_routes())
        // 内部接口路由
        .nest("/internal", internal_routes())
        .with_state(state)
}

/// OAuth 认证路由
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/twitch", get(crate::auth::handlers::authorize))
        .route("/twitch/callback", get(crate::auth::handlers::callback))
}

/// 调试路由
fn debug_routes() -> Router<AppState> {
    Router::new()
        .route("/db", get(crate::management::handlers::debug::get_db_info))
        .route(
            "/tables",
            get(crate::management::handlers::debug::list_legacy_token_tables),
        )
}

/// 内部接口路由
fn internal_routes() -> Router<AppState> {
    Router::new().route(
        "/twitch-tokens",
        get(crate::management::handlers::internal::export_twitch_tokens),
    )
}
