//! Errors produced by the OAuth authorize/callback flow.
//!
//! Every failure here is terminal for its request. The `IntoResponse`
//! implementation is the single place that fixes the wire format: a short
//! machine-readable tag under `error`, plus the raw upstream body where one
//! exists. Caller/input problems map to 400, upstream and configuration
//! problems to 500.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::auth::token_store::TokenStoreError;

/// The primary error type for the OAuth authorize and callback endpoints.
#[derive(Debug, Error)]
pub enum AuthFlowError {
    /// The provider redirected back with an `error` query parameter.
    #[error("provider returned an error: {error}")]
    Provider {
        error: String,
        desc: Option<String>,
    },

    #[error("missing code or state query parameter")]
    MissingCodeOrState,

    /// Anti-forgery token mismatch, including an absent state cookie.
    #[error("state parameter does not match the state cookie")]
    InvalidState,

    #[error("unknown auth mode: {0}")]
    InvalidMode(String),

    #[error("custom_bot mode requires an owner reference")]
    MissingOwner,

    #[error("custom_bot callback is missing the owner cookie")]
    MissingOwnerCookie,

    #[error("owner reference does not resolve to a known identity")]
    OwnerNotFound,

    #[error("token endpoint returned a non-success response")]
    TokenExchangeFailed { body: String },

    #[error("validate endpoint returned a non-success response")]
    ValidateFailed { body: String },

    #[error("app_settings.default_bot_identity_id is not set")]
    DefaultBotNotConfigured,

    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<TokenStoreError> for AuthFlowError {
    fn from(err: TokenStoreError) -> Self {
        match err {
            TokenStoreError::DefaultBotNotConfigured => Self::DefaultBotNotConfigured,
            TokenStoreError::Db(db) => Self::Database(db),
            TokenStoreError::Serialization(e) => {
                Self::Database(sea_orm::DbErr::Custom(e.to_string()))
            }
        }
    }
}

impl IntoResponse for AuthFlowError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Provider { error, desc } => (
                StatusCode::BAD_REQUEST,
                json!({ "error": error, "desc": desc }),
            ),
            Self::MissingCodeOrState => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "missing_code_or_state" }),
            ),
            Self::InvalidState => (StatusCode::BAD_REQUEST, json!({ "error": "invalid_state" })),
            Self::InvalidMode(_) => (StatusCode::BAD_REQUEST, json!({ "error": "invalid_mode" })),
            Self::MissingOwner => (StatusCode::BAD_REQUEST, json!({ "error": "missing_owner" })),
            Self::MissingOwnerCookie => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "missing_owner_cookie" }),
            ),
            Self::OwnerNotFound => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "owner_not_found" }),
            ),
            Self::TokenExchangeFailed { body } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "token_exchange_failed", "body": body }),
            ),
            Self::ValidateFailed { body } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "validate_failed", "body": body }),
            ),
            Self::DefaultBotNotConfigured => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "default_bot_not_configured" }),
            ),
            Self::Database(err) => {
                tracing::error!("oauth callback database error: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "database_error" }),
                )
            }
            Self::Network(err) => {
                tracing::error!("oauth upstream request failed: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "network_error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
