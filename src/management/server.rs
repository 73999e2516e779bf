//! # 管理服务器
//!
//! Axum HTTP服务器，承载 OAuth 认证流程和内部只读接口

use crate::auth::{TokenStore, TwitchOAuthClient};
use crate::config::{AppConfig, ServerConfig};
use crate::error::{GatewayError, Result};
use axum::Json;
use axum::Router;
use axum::response::IntoResponse;
use axum::routing::get;
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::ops::Deref;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// 共享的应用上下文
pub struct AppContext {
    /// 应用配置
    pub config: Arc<AppConfig>,
    /// 数据库连接
    pub database: Arc<DatabaseConnection>,
    /// Twitch OAuth 客户端
    pub oauth: TwitchOAuthClient,
    /// 令牌存储
    pub token_store: TokenStore,
}

impl AppContext {
    /// 从配置和数据库连接组装上下文
    pub fn new(config: Arc<AppConfig>, database: Arc<DatabaseConnection>) -> Result<Self> {
        let oauth = TwitchOAuthClient::new(config.twitch.clone())?;
        let token_store = TokenStore::new(database.clone());

        Ok(Self {
            config,
            database,
            oauth,
            token_store,
        })
    }
}

/// 管理服务器应用状态
#[derive(Clone)]
pub struct AppState {
    context: Arc<AppContext>,
}

impl AppState {
    #[must_use]
    pub fn new(context: AppContext) -> Self {
        Self {
            context: Arc::new(context),
        }
    }
}

impl Deref for AppState {
    type Target = AppContext;

    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

/// 管理服务器
pub struct ManagementServer {
    /// 监听配置
    config: ServerConfig,
    /// 路由器
    router: Router,
}

impl ManagementServer {
    /// 创建新的管理服务器
    pub fn new(config: Arc<AppConfig>, database: Arc<DatabaseConnection>) -> Result<Self> {
        let server_config = config.server.clone();
        let state = AppState::new(AppContext::new(config, database)?);
        let router = Self::create_router(state);

        Ok(Self {
            config: server_config,
            router,
        })
    }

    /// 创建路由器
    fn create_router(state: AppState) -> Router {
        let api_routes = super::routes::create_routes(state);

        Router::new()
            .route("/health", get(health_check))
            .nest("/api", api_routes)
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(
                        CorsLayer::new()
                            .allow_origin(Any)
                            .allow_methods(Any)
                            .allow_headers(Any),
                    ),
            )
    }

    /// 仅构建路由器（测试用）
    pub fn router(state: AppState) -> Router {
        Self::create_router(state)
    }

    /// 启动服务器
    pub async fn run(self) -> Result<()> {
        let addr = format!("{}:{}", self.config.bind_address, self.config.port);

        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            GatewayError::server_start_with_source(format!("无法绑定监听地址: {addr}"), e)
        })?;

        tracing::info!("管理服务器监听于 {addr}");

        axum::serve(listener, self.router)
            .await
            .map_err(|e| GatewayError::server_start_with_source("服务器运行失败", e))?;

        Ok(())
    }
}

/// 健康检查
pub async fn health_check() -> axum::response::Response {
    Json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
    }))
    .into_response()
}
