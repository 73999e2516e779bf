//! # 管理服务模块
//!
//! Axum HTTP 服务器：认证流程端点、调试端点与内部导出端点

pub mod handlers;
pub mod routes;
pub mod server;
