//! # 配置管理模块
//!
//! 处理应用配置加载、验证和管理

mod app_config;
mod database;

pub use app_config::{AppConfig, ServerConfig, ServiceConfig, TwitchConfig};
pub use database::DatabaseConfig;

use std::env;
use std::path::Path;

/// 加载配置文件
pub fn load_config() -> crate::error::Result<AppConfig> {
    let env = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());
    let config_file = format!("config/config.{env}.toml");

    if !Path::new(&config_file).exists() {
        return Err(crate::error::GatewayError::config(format!(
            "配置文件不存在: {config_file}"
        )));
    }

    let config_content = std::fs::read_to_string(&config_file).map_err(|e| {
        crate::error::GatewayError::config_with_source(
            format!("读取配置文件失败: {config_file}"),
            e,
        )
    })?;

    let config: AppConfig = toml::from_str(&config_content)?;

    // 验证配置的有效性
    config
        .validate()
        .map_err(crate::error::GatewayError::config)?;

    Ok(config)
}
