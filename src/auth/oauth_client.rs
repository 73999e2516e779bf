//! # Twitch OAuth 客户端
//!
//! 封装对 Twitch 三个 OAuth 端点的调用：授权URL构造、授权码换取令牌、
//! 令牌校验。上游返回非成功状态时，原始响应体原样向上传递用于诊断

use crate::config::TwitchConfig;
use crate::error::auth::AuthFlowError;
use serde::Deserialize;
use url::Url;

/// 令牌端点的成功响应
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: i64,
    pub token_type: String,
    #[serde(default)]
    pub scope: Option<Vec<String>>,
}

/// 校验端点的成功响应，提供账号的权威身份信息
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateResponse {
    pub client_id: String,
    pub login: String,
    pub user_id: String,
    pub scopes: Vec<String>,
    /// 令牌剩余有效秒数
    pub expires_in: i64,
}

/// Twitch OAuth 客户端
#[derive(Debug, Clone)]
pub struct TwitchOAuthClient {
    http: reqwest::Client,
    config: TwitchConfig,
    authorize_endpoint: Url,
}

impl TwitchOAuthClient {
    /// 创建客户端，授权端点URL在此处完成解析校验
    pub fn new(config: TwitchConfig) -> crate::error::Result<Self> {
        let authorize_endpoint = Url::parse(&config.authorize_url).map_err(|e| {
            crate::error::GatewayError::config_with_source(
                format!("无效的授权端点URL: {}", config.authorize_url),
                e,
            )
        })?;

        Ok(Self {
            http: reqwest::Client::new(),
            config,
            authorize_endpoint,
        })
    }

    /// 构造携带防伪 state 的授权跳转URL
    pub fn authorize_url(&self, state: &str) -> String {
        let mut url = self.authorize_endpoint.clone();
        let scope = self.config.scopes.join(" ");

        url.query_pairs_mut()
            .clear()
            .append_pair("response_type", "code")
            .append_pair("client_id", &self.config.client_id)
            .append_pair("redirect_uri", &self.config.redirect_uri)
            .append_pair("scope", &scope)
            .append_pair("state", state);

        url.to_string()
    }

    /// 用授权码换取访问/刷新令牌
    pub async fn exchange_code(&self, code: &str) -> Result<TokenResponse, AuthFlowError> {
        let response = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthFlowError::TokenExchangeFailed { body });
        }

        serde_json::from_str(&body).map_err(|_| AuthFlowError::TokenExchangeFailed { body })
    }

    /// 校验访问令牌，取得权威的 user_id、login、scopes 与剩余有效期
    pub async fn validate_token(
        &self,
        access_token: &str,
    ) -> Result<ValidateResponse, AuthFlowError> {
        let response = self
            .http
            .get(&self.config.validate_url)
            .header("Authorization", format!("OAuth {access_token}"))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(AuthFlowError::ValidateFailed { body });
        }

        serde_json::from_str(&body).map_err(|_| AuthFlowError::ValidateFailed { body })
    }
}
