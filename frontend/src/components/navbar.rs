use crate::auth::use_auth;
use crate::web::route::AppRoute;
use crate::web::router::Link;
use leptos::prelude::*;

/// 顶部导航栏，仅在已认证时由 App 渲染
#[component]
pub fn Navbar() -> impl IntoView {
    let auth = use_auth();

    // 登出后路由服务会自动跳转到登录页
    let on_logout = move |_| auth.logout();

    view! {
        <div class="navbar bg-base-100 shadow-md">
            <div class="flex-1">
                <Link to=AppRoute::auth_success_redirect() class="btn btn-ghost text-xl">
                    "TestHub"
                </Link>
            </div>
            <div class="flex-none gap-2">
                <ul class="menu menu-horizontal px-1">
                    {AppRoute::NAV
                        .into_iter()
                        .map(|route| {
                            view! {
                                <li>
                                    <Link to=route>{route.label()}</Link>
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
                <button on:click=on_logout class="btn btn-outline btn-error btn-sm">
                    "Sair"
                </button>
            </div>
        </div>
    }
}
