//! LocalStorage 封装模块
//!
//! 使用 `web_sys::Storage` 替代 `gloo-storage`，并作为会话的 token 存储。

use testhub_shared::STORAGE_TOKEN_KEY;
use testhub_shared::session::TokenStore;

/// 本地存储操作封装
///
/// 提供静态方法访问浏览器 LocalStorage API。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorage;

impl LocalStorage {
    /// 获取 LocalStorage 实例
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }

    /// 获取存储的字符串值，键不存在或出错时为 `None`
    pub fn get(key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    /// 设置存储值，返回是否成功
    pub fn set(key: &str, value: &str) -> bool {
        Self::storage()
            .and_then(|s| s.set_item(key, value).ok())
            .is_some()
    }

    /// 删除存储的键值对，返回是否成功
    pub fn delete(key: &str) -> bool {
        Self::storage()
            .and_then(|s| s.remove_item(key).ok())
            .is_some()
    }
}

impl TokenStore for LocalStorage {
    fn load(&self) -> Option<String> {
        Self::get(STORAGE_TOKEN_KEY)
    }

    fn save(&self, token: &str) -> bool {
        Self::set(STORAGE_TOKEN_KEY, token)
    }

    fn clear(&self) -> bool {
        Self::delete(STORAGE_TOKEN_KEY)
    }
}
