//! TestHub 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `auth`: 会话状态管理
//! - `api`: 认证请求网关
//! - `components`: UI 组件层
//!
//! 不依赖 DOM 的业务逻辑全部位于 `testhub-shared`。

mod api;
mod auth;
mod components {
    pub mod banner;
    pub mod form_state;
    pub mod login;
    pub mod navbar;
    pub mod orders;
    pub mod people;
    pub mod register_user;
}
pub mod panic_hook;

use crate::auth::AuthContext;
use crate::components::login::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::orders::OrdersPage;
use crate::components::people::PeoplePage;
use crate::components::register_user::RegisterUserPage;

use leptos::prelude::*;

// 原生 Web API 封装模块
// 此模块提供对浏览器原生 API 的轻量级封装，替代 gloo-* 系列 crate，
// 以减小 WASM 二进制体积。
pub(crate) mod web {
    pub mod dom;
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchClient;
    pub use storage::LocalStorage;
}

use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::People => view! { <PeoplePage /> }.into_any(),
        AppRoute::Orders => view! { <OrdersPage /> }.into_any(),
        AppRoute::NewUser => view! { <RegisterUserPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 从 LocalStorage 恢复会话并放入 Context
    let auth_ctx = AuthContext::init();
    provide_context(auth_ctx);

    // 2. 网关依赖会话，在其之后提供
    api::provide_api(auth_ctx);

    // 3. 获取认证状态信号，用于注入路由服务
    let is_authenticated = auth_ctx.is_authenticated_signal();

    view! {
        // 4. 路由器组件：注入认证信号实现守卫
        <Router is_authenticated=is_authenticated>
            <Show when=move || is_authenticated.get()>
                <Navbar />
            </Show>
            <main class="min-h-screen bg-base-200">
                <RouterOutlet matcher=route_matcher />
            </main>
        </Router>
    }
}
