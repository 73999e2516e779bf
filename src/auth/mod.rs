//! # OAuth 认证模块
//!
//! 实现针对 Twitch 的授权码流程：签发授权跳转、处理回调、
//! 持久化身份与令牌，并根据认证模式维护机器人安装记录

pub mod cookies;
pub mod handlers;
pub mod mode;
pub mod oauth_client;
pub mod token_store;

pub use mode::AuthMode;
pub use oauth_client::TwitchOAuthClient;
pub use token_store::{TokenStore, TokenStoreError};
