use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::banner::Banner;
use leptos::prelude::*;
use leptos::task::spawn_local;
use testhub_shared::service::AccountService;
use testhub_shared::status::StatusMessage;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();
    let gateway = use_api();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<StatusMessage>::None);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        let gateway = gateway.clone();
        let email = email.get_untracked();
        let password = password.get_untracked();
        spawn_local(async move {
            match AccountService::new(&gateway).login(&email, &password).await {
                // 路由服务监听到认证状态变化后跳转到 /pessoas
                Ok(token) => auth.login(token),
                Err(status) => set_error_msg.set(Some(status)),
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"TestHub"</h1>
                    <p class="text-base-content/70">"Entre com seu email e senha"</p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Banner status=error_msg />

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="voce@exemplo.com"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="senha">
                                <span class="label-text">"Senha"</span>
                            </label>
                            <input
                                id="senha"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || if is_submitting.get() {
                                    view! { <span class="loading loading-spinner"></span> "Entrando..." }.into_any()
                                } else {
                                    "Entrar".into_any()
                                }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
