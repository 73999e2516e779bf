//! # 调试处理器
//!
//! 只读的运维诊断查询，按字面行为返回原始行。`information_schema`
//! 查询只在 Postgres 上有意义

use crate::management::server::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::{ConnectionTrait, FromQueryResult, JsonValue, Statement};
use serde_json::json;

/// 旧版一体化令牌表，仅用于排查历史部署
const LEGACY_TOKENS_TABLE: &str = "twitch_oauth_tokens";

/// 返回当前数据库连接的基本信息
pub async fn get_db_info(State(state): State<AppState>) -> Response {
    let stmt = Statement::from_string(
        state.database.get_database_backend(),
        r#"select current_database() as db, current_schema() as schema, current_user as "user""#,
    );

    match JsonValue::find_by_statement(stmt)
        .one(state.database.as_ref())
        .await
    {
        Ok(Some(row)) => Json(row).into_response(),
        Ok(None) => Json(json!({})).into_response(),
        Err(err) => {
            tracing::error!("debug db info query failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "database_error" })),
            )
                .into_response()
        }
    }
}

/// 列出旧版令牌表在各 schema 下的存在情况
pub async fn list_legacy_token_tables(State(state): State<AppState>) -> Response {
    let stmt = Statement::from_string(
        state.database.get_database_backend(),
        format!(
            "select table_schema, table_name \
             from information_schema.tables \
             where table_name = '{LEGACY_TOKENS_TABLE}' \
             order by table_schema, table_name"
        ),
    );

    match JsonValue::find_by_statement(stmt)
        .all(state.database.as_ref())
        .await
    {
        Ok(rows) => Json(rows).into_response(),
        Err(err) => {
            tracing::error!("debug tables query failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "database_error" })),
            )
                .into_response()
        }
    }
}
