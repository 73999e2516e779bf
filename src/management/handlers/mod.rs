//! # 管理API处理器模块

pub mod debug;
pub mod internal;
