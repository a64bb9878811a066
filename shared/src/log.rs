//! 跨平台日志
//!
//! wasm32 下写入浏览器 console，本机（测试）下写入 stdout/stderr。
//! 通过 `log_info!` / `log_warn!` / `log_error!` 宏使用。

#[cfg(target_arch = "wasm32")]
pub fn info(msg: &str) {
    web_sys::console::log_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(target_arch = "wasm32")]
pub fn warn(msg: &str) {
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(target_arch = "wasm32")]
pub fn error(msg: &str) {
    web_sys::console::error_1(&wasm_bindgen::JsValue::from_str(msg));
}

#[cfg(not(target_arch = "wasm32"))]
pub fn info(msg: &str) {
    println!("{}", msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn warn(msg: &str) {
    eprintln!("{}", msg);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn error(msg: &str) {
    eprintln!("{}", msg);
}

#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::log::info(&format!($($t)*)))
}

#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => ($crate::log::warn(&format!($($t)*)))
}

#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::log::error(&format!($($t)*)))
}
