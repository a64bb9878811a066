//! 认证模块
//!
//! 管理会话状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态；
//! 会话被清除（主动登出或收到 401）后，路由服务负责跳转到登录页。

use crate::web::LocalStorage;
use leptos::prelude::*;
use testhub_shared::gateway::SessionHandle;
use testhub_shared::log_info;
use testhub_shared::session::Session;

/// 认证上下文
///
/// 包含会话信号，通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    session: RwSignal<Session<LocalStorage>>,
}

impl AuthContext {
    /// 从 LocalStorage 恢复会话
    pub fn init() -> Self {
        let session = Session::init(LocalStorage);
        if session.is_authenticated() {
            log_info!("[Auth] 已从本地存储恢复会话");
        }
        Self {
            session: RwSignal::new(session),
        }
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.with(|s| s.is_authenticated()))
    }

    /// 保存 token 并进入已认证状态
    ///
    /// 跳转由路由服务的认证状态监听自动处理。
    pub fn login(&self, token: String) {
        self.session.update(|s| s.login(token));
    }

    /// 注销并清除 token
    pub fn logout(&self) {
        self.session.update(|s| s.logout());
    }
}

impl SessionHandle for AuthContext {
    fn token(&self) -> Option<String> {
        self.session
            .try_with_untracked(|s| s.token().map(str::to_owned))
            .flatten()
    }

    fn on_unauthorized(&self) {
        // 已经登出时不再触发信号更新
        if self
            .session
            .try_with_untracked(|s| s.is_authenticated())
            .unwrap_or(false)
        {
            self.logout();
        }
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
