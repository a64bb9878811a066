//! 会话
//!
//! 持有一个可选的 Bearer Token。启动时从持久化存储加载，
//! 登录时写入，登出或收到 401 时清除。

/// Token 的持久化存储（浏览器中为 LocalStorage）
pub trait TokenStore {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> bool;
    fn clear(&self) -> bool;
}

/// 会话状态
///
/// 由调用方显式持有并注入到网关，不使用全局可变状态。
#[derive(Debug, Clone, Default)]
pub struct Session<S> {
    store: S,
    token: Option<String>,
}

impl<S: TokenStore> Session<S> {
    /// 从存储中恢复会话
    pub fn init(store: S) -> Self {
        let token = store.load().filter(|t| !t.is_empty());
        Self { store, token }
    }

    /// 保存 token 并进入已认证状态
    pub fn login(&mut self, token: impl Into<String>) {
        let token = token.into();
        if token.is_empty() {
            self.logout();
            return;
        }
        if !self.store.save(&token) {
            crate::log_warn!("[Session] 无法持久化 token，仅在内存中保存");
        }
        self.token = Some(token);
    }

    /// 清除 token
    pub fn logout(&mut self) {
        self.store.clear();
        self.token = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }
}
