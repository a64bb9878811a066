//! 人员管理页面
//!
//! 左侧为新建 / 编辑表单，右侧为可搜索、可排序的列表。
//! CPF 与年龄输入框带掩码，并过滤非数字按键。

use crate::api::use_api;
use crate::components::banner::Banner;
use crate::components::form_state::FormState;
use crate::web::dom::{confirm, filter_masked_key};
use leptos::prelude::*;
use leptos::task::spawn_local;
use testhub_shared::draft::PersonDraft;
use testhub_shared::mask::{format_cpf, normalize_age};
use testhub_shared::projection::{PersonSortKey, SortDirection, project};
use testhub_shared::service::{LoadState, PeopleService, PeopleSnapshot};
use testhub_shared::{Person, PersonId};

#[component]
pub fn PeoplePage() -> impl IntoView {
    let gateway = use_api();
    let form = FormState::<PersonDraft>::new();

    let snapshot = RwSignal::new(PeopleSnapshot::default());
    let load_state = RwSignal::new(LoadState::Idle);
    let saving = RwSignal::new(false);

    let search = RwSignal::new(String::new());
    let sort_key = RwSignal::new(PersonSortKey::default());
    let direction = RwSignal::new(SortDirection::default());

    // 挂载时并发加载人员与订单
    load_state.set(LoadState::Loading);
    spawn_local({
        let gateway = gateway.clone();
        async move {
            let loaded = PeopleService::new(&gateway).load().await;
            snapshot.set(loaded);
            load_state.set(LoadState::Ready);
        }
    });

    let projected = Memo::new(move |_| {
        snapshot.with(|s| project(&s.people, &search.get(), sort_key.get(), direction.get()))
    });

    let on_submit = {
        let gateway = gateway.clone();
        move |ev: web_sys::SubmitEvent| {
            ev.prevent_default();
            if saving.get_untracked() {
                return;
            }
            saving.set(true);

            let gateway = gateway.clone();
            let draft = form.snapshot();
            let editing = form.editing_id();
            spawn_local(async move {
                let outcome = PeopleService::new(&gateway).submit(&draft, editing).await;
                form.apply_submit(|people| snapshot.update(|s| s.people = people), outcome);
                saving.set(false);
            });
        }
    };

    let on_delete = move |id: PersonId| {
        let gateway = gateway.clone();
        spawn_local(async move {
            let linkage = snapshot.with_untracked(|s| s.linkage.clone());
            let service = PeopleService::new(&gateway);
            // 用户取消时什么都不做
            if let Some(outcome) = service.delete(id, &linkage, confirm).await {
                form.set_status(outcome.status);
                if let Some(people) = outcome.refreshed {
                    snapshot.update(|s| s.people = people);
                }
            }
        });
    };

    let on_edit = move |person: Person| form.begin_edit(&person);

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 grid gap-8 lg:grid-cols-3">
            <div class="card bg-base-100 shadow-xl lg:col-span-1">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h2 class="card-title">
                        {move || if form.is_editing() { "Editar pessoa" } else { "Nova pessoa" }}
                    </h2>

                    <Banner status=form.status() />

                    <div class="form-control">
                        <label class="label" for="nome">
                            <span class="label-text">"Nome"</span>
                        </label>
                        <input id="nome"
                            type="text"
                            class="input input-bordered w-full"
                            on:input=move |ev| form.update(|d| d.name = event_target_value(&ev))
                            prop:value=move || form.field(|d| d.name.clone())
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input id="email"
                            type="email"
                            class="input input-bordered w-full"
                            on:input=move |ev| form.update(|d| d.email = event_target_value(&ev))
                            prop:value=move || form.field(|d| d.email.clone())
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="cpf">
                            <span class="label-text">"CPF"</span>
                        </label>
                        <input id="cpf"
                            type="text"
                            inputmode="numeric"
                            placeholder="000.000.000-00"
                            class="input input-bordered w-full"
                            on:keydown=move |ev| filter_masked_key(&ev)
                            on:input=move |ev| form.update(|d| d.cpf = format_cpf(&event_target_value(&ev)))
                            prop:value=move || form.field(|d| d.cpf.clone())
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="idade">
                            <span class="label-text">"Idade"</span>
                        </label>
                        <input id="idade"
                            type="text"
                            inputmode="numeric"
                            class="input input-bordered w-full"
                            on:keydown=move |ev| filter_masked_key(&ev)
                            on:input=move |ev| form.update(|d| d.age = normalize_age(&event_target_value(&ev)))
                            prop:value=move || form.field(|d| d.age.clone())
                        />
                    </div>

                    <div class="card-actions justify-end mt-4">
                        <Show when=move || form.is_editing()>
                            <button type="button" class="btn btn-ghost" on:click=move |_| form.cancel()>
                                "Cancelar"
                            </button>
                        </Show>
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if form.is_editing() { "Atualizar" } else { "Cadastrar" }}
                        </button>
                    </div>
                </form>
            </div>

            <div class="card bg-base-100 shadow-xl lg:col-span-2">
                <div class="card-body p-0">
                    <div class="flex flex-wrap items-center gap-2 p-6 pb-2">
                        <h3 class="card-title flex-1">"Pessoas"</h3>
                        <input
                            type="search"
                            placeholder="Buscar por nome ou email"
                            class="input input-bordered input-sm"
                            on:input=move |ev| search.set(event_target_value(&ev))
                            prop:value=search
                        />
                        <select
                            class="select select-bordered select-sm"
                            on:change=move |ev| sort_key.set(PersonSortKey::parse(&event_target_value(&ev)))
                        >
                            {PersonSortKey::ALL
                                .into_iter()
                                .map(|key| view! {
                                    <option value=key.as_str() selected=move || sort_key.get() == key>
                                        {key.label()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                        <button
                            type="button"
                            class="btn btn-sm btn-outline"
                            on:click=move |_| direction.update(|d| *d = d.toggle())
                        >
                            {move || direction.get().label()}
                        </button>
                    </div>

                    <div class="overflow-x-auto w-full">
                        <table class="table table-zebra w-full">
                            <thead>
                                <tr>
                                    <th>"Nome"</th>
                                    <th>"Email"</th>
                                    <th>"CPF"</th>
                                    <th>"Idade"</th>
                                    <th></th>
                                </tr>
                            </thead>
                            <tbody>
                                <Show when=move || load_state.get() != LoadState::Ready>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            <span class="loading loading-spinner loading-md"></span> " Carregando..."
                                        </td>
                                    </tr>
                                </Show>
                                <Show when=move || load_state.get() == LoadState::Ready && projected.with(|p| p.is_empty())>
                                    <tr>
                                        <td colspan="5" class="text-center py-8 text-base-content/50">
                                            "Nenhum registro encontrado."
                                        </td>
                                    </tr>
                                </Show>
                                {move || {
                                    projected
                                        .get()
                                        .into_iter()
                                        .map(|person| {
                                            let id = person.id;
                                            let linked = move || snapshot.with(|s| s.linkage.is_linked(id));
                                            let age = person.display_age().map(|a| a.to_string());
                                            let cpf = format_cpf(&person.cpf);
                                            let name = person.name.clone();
                                            let email = person.email.clone();
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{name}</td>
                                                    <td>{email}</td>
                                                    <td class="font-mono text-sm">{cpf}</td>
                                                    <td>{age}</td>
                                                    <td class="flex gap-2 justify-end">
                                                        <button
                                                            class="btn btn-ghost btn-xs"
                                                            on:click=move |_| on_edit(person.clone())
                                                        >
                                                            "Editar"
                                                        </button>
                                                        <span
                                                            class:tooltip=linked
                                                            data-tip="Cliente vinculado a pedido(s)"
                                                        >
                                                            <button
                                                                class="btn btn-ghost btn-xs text-error"
                                                                disabled=linked
                                                                on:click={
                                                                    let on_delete = on_delete.clone();
                                                                    move |_| on_delete(id)
                                                                }
                                                            >
                                                                "Excluir"
                                                            </button>
                                                        </span>
                                                    </td>
                                                </tr>
                                            }
                                        })
                                        .collect_view()
                                }}
                            </tbody>
                        </table>
                    </div>
                </div>
            </div>
        </div>
    }
}
