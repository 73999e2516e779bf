//! # 认证模式
//!
//! 授权入口通过 `mode` 参数区分三种登录用途。模式值会写入 cookie 并在
//! 回调时读回，cookie 内容可被调用方篡改，所以两端都按封闭枚举校验

use std::fmt;

/// 认证模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// 主播绑定自己的账号，创建默认安装记录
    Broadcaster,
    /// 服务默认机器人登录，首次登录时设置全局默认机器人
    ServiceBot,
    /// 主播为自己的频道接入自定义机器人
    CustomBot,
}

impl AuthMode {
    /// 模式的字符串形式
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Broadcaster => "broadcaster",
            Self::ServiceBot => "service_bot",
            Self::CustomBot => "custom_bot",
        }
    }

    /// 解析模式字符串，未知值返回 `None`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "broadcaster" => Some(Self::Broadcaster),
            "service_bot" => Some(Self::ServiceBot),
            "custom_bot" => Some(Self::CustomBot),
            _ => None,
        }
    }
}

impl Default for AuthMode {
    fn default() -> Self {
        Self::Broadcaster
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
