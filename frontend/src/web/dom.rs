//! 零散的 DOM 工具

use testhub_shared::mask::is_allowed_masked_key;
use web_sys::KeyboardEvent;

/// 浏览器确认框，无法弹出时视为取消
pub fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// 掩码输入框的按键过滤：只放行数字、编辑键与组合键
pub fn filter_masked_key(ev: &KeyboardEvent) {
    if !is_allowed_masked_key(&ev.key(), ev.ctrl_key(), ev.meta_key()) {
        ev.prevent_default();
    }
}
