//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其守卫规则。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    Login,
    /// 人员管理 (默认路由，需要认证)
    #[default]
    People,
    /// 订单管理 (需要认证)
    Orders,
    /// 新用户注册 (需要认证)
    NewUser,
}

impl AppRoute {
    /// 导航栏中显示的路由
    pub const NAV: [AppRoute; 3] = [AppRoute::People, AppRoute::Orders, AppRoute::NewUser];

    /// 将 URL path 解析为路由枚举
    ///
    /// 根路径与未知路径都归入默认路由，由路由服务替换为规范地址。
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/login" => Self::Login,
            "/pessoas" => Self::People,
            "/pedidos" => Self::Orders,
            "/usuarios/novo" => Self::NewUser,
            _ => Self::default(),
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::People => "/pessoas",
            Self::Orders => "/pedidos",
            Self::NewUser => "/usuarios/novo",
        }
    }

    /// 导航栏文本
    pub fn label(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::People => "Pessoas",
            Self::Orders => "Pedidos",
            Self::NewUser => "Novo usuário",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::People
    }

    /// 按认证状态执行守卫，返回实际应显示的路由
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else {
            self
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_paths_round_trip() {
        for route in [AppRoute::Login, AppRoute::People, AppRoute::Orders, AppRoute::NewUser] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }

    #[test]
    fn test_root_and_unknown_paths_fall_back_to_people() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::People);
        assert_eq!(AppRoute::from_path(""), AppRoute::People);
        assert_eq!(AppRoute::from_path("/nada"), AppRoute::People);
        assert_eq!(AppRoute::from_path("/pessoas/"), AppRoute::People);
        // 回退后的地址与请求地址不同，需要 replace
        assert_ne!(AppRoute::from_path("/nada").to_path(), "/nada");
    }

    #[test]
    fn test_guard_when_anonymous() {
        assert_eq!(AppRoute::People.guard(false), AppRoute::Login);
        assert_eq!(AppRoute::Orders.guard(false), AppRoute::Login);
        assert_eq!(AppRoute::NewUser.guard(false), AppRoute::Login);
        assert_eq!(AppRoute::Login.guard(false), AppRoute::Login);
    }

    #[test]
    fn test_guard_when_authenticated() {
        assert_eq!(AppRoute::Login.guard(true), AppRoute::People);
        assert_eq!(AppRoute::Orders.guard(true), AppRoute::Orders);
        assert_eq!(AppRoute::NewUser.guard(true), AppRoute::NewUser);
    }

    #[test]
    fn test_display_uses_path() {
        assert_eq!(AppRoute::NewUser.to_string(), "/usuarios/novo");
    }
}
