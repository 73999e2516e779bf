//! # 认证流程临时 cookie
//!
//! 授权跳转与回调之间的状态通过三个短时 cookie 传递：防伪 state、
//! 认证模式、以及 custom_bot 模式下的 owner 引用。全部 HttpOnly、
//! SameSite=Lax、五分钟过期；secure 属性跟随对外基础URL的协议

use axum_extra::extract::CookieJar;
use axum_extra::extract::cookie::{Cookie, SameSite};

/// 防伪 state cookie
pub const STATE_COOKIE: &str = "twitch_oauth_state";
/// 认证模式 cookie
pub const MODE_COOKIE: &str = "twitch_oauth_mode";
/// custom_bot 模式的 owner 引用 cookie
pub const OWNER_COOKIE: &str = "twitch_oauth_owner";

/// 流程 cookie 的有效期（分钟）
const FLOW_COOKIE_TTL_MINUTES: i64 = 5;

/// 构造一个流程 cookie
pub fn build_flow_cookie(name: &'static str, value: &str, secure: bool) -> Cookie<'static> {
    let mut cookie = Cookie::new(name, value.to_string());
    cookie.set_http_only(true);
    cookie.set_secure(secure);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_path("/");
    cookie.set_max_age(cookie::time::Duration::minutes(FLOW_COOKIE_TTL_MINUTES));
    cookie
}

/// 移除全部流程 cookie（成功回调后调用）
pub fn clear_flow_cookies(jar: CookieJar) -> CookieJar {
    jar.remove(removal_cookie(STATE_COOKIE))
        .remove(removal_cookie(MODE_COOKIE))
        .remove(removal_cookie(OWNER_COOKIE))
}

// 删除 cookie 时 path 必须与设置时一致
fn removal_cookie(name: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::from(name);
    cookie.set_path("/");
    cookie
}
