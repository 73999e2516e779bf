//! # 内部接口处理器
//!
//! 供内部组件拉取令牌的批量导出接口。访问方必须携带与配置完全一致的
//! `x-internal-secret` 请求头，任何偏差（包括空值和大小写差异）都拒绝

use crate::management::server::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// 内部密钥请求头
const INTERNAL_SECRET_HEADER: &str = "x-internal-secret";

/// 导出全部已存储的 Twitch 令牌，按更新时间倒序
pub async fn export_twitch_tokens(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let provided = headers
        .get(INTERNAL_SECRET_HEADER)
        .and_then(|value| value.to_str().ok());

    if provided != Some(state.config.app.internal_api_secret.as_str()) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "unauthorized" })),
        )
            .into_response();
    }

    match state.token_store.export_tokens().await {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => {
            tracing::error!("token export query failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "database_error" })),
            )
                .into_response()
        }
    }
}
