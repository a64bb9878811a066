//! Panic 钩子
//!
//! 先用统一的日志宏记录一行摘要，再交给 `console_error_panic_hook`
//! 输出带 JS 调用栈的完整信息。

use std::panic;
use std::sync::Once;

use testhub_shared::log_error;

static INSTALL: Once = Once::new();

/// 记录 panic 位置与消息
pub fn hook(info: &panic::PanicHookInfo) {
    let location = info
        .location()
        .map(|l| format!("{}:{}", l.file(), l.line()))
        .unwrap_or_else(|| "<unknown>".to_string());
    log_error!("[Panic] at {}", location);

    console_error_panic_hook::hook(info);
}

/// 注册钩子，重复调用只生效一次
pub fn install() {
    INSTALL.call_once(|| panic::set_hook(Box::new(hook)));
}
