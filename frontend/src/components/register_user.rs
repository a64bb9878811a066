use crate::api::use_api;
use crate::components::banner::Banner;
use leptos::prelude::*;
use leptos::task::spawn_local;
use testhub_shared::Role;
use testhub_shared::draft::UserDraft;
use testhub_shared::service::AccountService;
use testhub_shared::status::StatusMessage;

/// 新用户注册页（需要管理员 token，权限由后端校验）
#[component]
pub fn RegisterUserPage() -> impl IntoView {
    let gateway = use_api();

    let draft = RwSignal::new(UserDraft::default());
    let status = RwSignal::new(Option::<StatusMessage>::None);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if is_submitting.get_untracked() {
            return;
        }
        set_is_submitting.set(true);
        status.set(None);

        let gateway = gateway.clone();
        let user = draft.get_untracked();
        spawn_local(async move {
            let result = AccountService::new(&gateway).register(&user).await;
            if result.as_ref().is_some_and(StatusMessage::is_success) {
                draft.set(UserDraft::default());
            }
            status.set(result);
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="max-w-md mx-auto p-4 md:p-8">
            <div class="card bg-base-100 shadow-xl">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h2 class="card-title">"Novo usuário"</h2>

                    <Banner status=status />

                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input id="email"
                            type="email"
                            class="input input-bordered w-full"
                            on:input=move |ev| draft.update(|d| d.email = event_target_value(&ev))
                            prop:value=move || draft.with(|d| d.email.clone())
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="senha">
                            <span class="label-text">"Senha"</span>
                        </label>
                        <input id="senha"
                            type="password"
                            class="input input-bordered w-full"
                            on:input=move |ev| draft.update(|d| d.password = event_target_value(&ev))
                            prop:value=move || draft.with(|d| d.password.clone())
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="role">
                            <span class="label-text">"Perfil"</span>
                        </label>
                        <select id="role"
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                if let Some(role) = Role::from_wire(&event_target_value(&ev)) {
                                    draft.update(|d| d.role = role);
                                }
                            }
                        >
                            {Role::ALL
                                .into_iter()
                                .map(|role| view! {
                                    <option value=role.as_str() selected=move || draft.with(|d| d.role == role)>
                                        {role.as_str()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="card-actions justify-end mt-4">
                        <button type="submit" class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Salvando..." }.into_any()
                            } else {
                                "Cadastrar".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
