//! # 应用配置结构定义

use serde::{Deserialize, Serialize};

/// 应用主配置结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// 数据库配置
    pub database: super::DatabaseConfig,
    /// Twitch OAuth 配置
    pub twitch: TwitchConfig,
    /// 服务对外配置
    pub app: ServiceConfig,
}

/// HTTP服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// 监听地址
    pub bind_address: String,
    /// 监听端口
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Twitch OAuth 配置
///
/// 端点URL带默认值，测试时可指向本地模拟服务
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwitchConfig {
    /// OAuth 客户端ID
    pub client_id: String,
    /// OAuth 客户端密钥
    pub client_secret: String,
    /// 回调地址（必须与 Twitch 应用注册的一致）
    pub redirect_uri: String,
    /// 授权端点
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    /// 令牌端点
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// 令牌校验端点
    #[serde(default = "default_validate_url")]
    pub validate_url: String,
    /// 请求的授权作用域
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
}

fn default_authorize_url() -> String {
    "https://id.twitch.tv/oauth2/authorize".to_string()
}

fn default_token_url() -> String {
    "https://id.twitch.tv/oauth2/token".to_string()
}

fn default_validate_url() -> String {
    "https://id.twitch.tv/oauth2/validate".to_string()
}

fn default_scopes() -> Vec<String> {
    // 只申请真正需要的作用域
    vec!["chat:read".to_string(), "chat:edit".to_string()]
}

/// 服务对外配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// 对外可见的基础URL，决定成功页地址和 cookie 的 secure 属性
    pub base_url: String,
    /// 内部导出接口的访问密钥
    pub internal_api_secret: String,
}

impl AppConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err(format!("无效的服务器端口: {}", self.server.port));
        }

        if self.database.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        if self.twitch.client_id.is_empty() || self.twitch.client_secret.is_empty() {
            return Err("Twitch client_id and client_secret must be configured".to_string());
        }

        if self.twitch.redirect_uri.is_empty() {
            return Err("Twitch redirect_uri must be configured".to_string());
        }

        if self.app.base_url.is_empty() {
            return Err("app.base_url must be configured".to_string());
        }

        if self.app.internal_api_secret.is_empty() {
            return Err("app.internal_api_secret must be configured".to_string());
        }

        Ok(())
    }

    /// cookie 的 secure 属性取决于对外基础URL是否为 https
    pub fn cookies_secure(&self) -> bool {
        self.app.base_url.starts_with("https://")
    }

    /// 认证成功后的跳转地址
    pub fn success_url(&self) -> String {
        format!("{}/auth/success", self.app.base_url.trim_end_matches('/'))
    }
}
