//! 订单管理页面

use crate::api::use_api;
use crate::components::banner::Banner;
use crate::components::form_state::FormState;
use crate::web::dom::{confirm, filter_masked_key};
use leptos::prelude::*;
use leptos::task::spawn_local;
use testhub_shared::draft::OrderDraft;
use testhub_shared::mask::{format_brl, format_currency};
use testhub_shared::projection::{OrderSortKey, SortDirection, project};
use testhub_shared::service::{LoadState, OrdersService, OrdersSnapshot};
use testhub_shared::{Order, OrderId, OrderStatus};

#[component]
pub fn OrdersPage() -> impl IntoView {
    let gateway = use_api();
    let form = FormState::<OrderDraft>::new();

    let snapshot = RwSignal::new(OrdersSnapshot::default());
    let load_state = RwSignal::new(LoadState::Idle);
    let saving = RwSignal::new(false);

    let search = RwSignal::new(String::new());
    let sort_key = RwSignal::new(OrderSortKey::default());
    let direction = RwSignal::new(SortDirection::default());

    load_state.set(LoadState::Loading);
    spawn_local({
        let gateway = gateway.clone();
        async move {
            let loaded = OrdersService::new(&gateway).load().await;
            snapshot.set(loaded);
            load_state.set(LoadState::Ready);
        }
    });

    let projected = Memo::new(move |_| {
        snapshot.with(|s| project(&s.orders, &search.get(), sort_key.get(), direction.get()))
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
            let people = snapshot.with_untracked(|s| s.people.clone());
            spawn_local(async move {
                let outcome = OrdersService::new(&gateway)
                    .submit(&draft, editing, &people)
                    .await;
                form.apply_submit(|orders| snapshot.update(|s| s.orders = orders), outcome);
                saving.set(false);
            });
        }
    };

    let on_delete = move |id: OrderId| {
        let gateway = gateway.clone();
        spawn_local(async move {
            if let Some(outcome) = OrdersService::new(&gateway).delete(id, confirm).await {
                form.set_status(outcome.status);
                if let Some(orders) = outcome.refreshed {
                    snapshot.update(|s| s.orders = orders);
                }
            }
        });
    };

    let on_edit = move |order: Order| form.begin_edit(&order);

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 grid gap-8 lg:grid-cols-3">
            <div class="card bg-base-100 shadow-xl lg:col-span-1">
                <form class="card-body space-y-2" on:submit=on_submit>
                    <h2 class="card-title">
                        {move || if form.is_editing() { "Editar pedido" } else { "Novo pedido" }}
                    </h2>

                    <Banner status=form.status() />

                    <div class="form-control">
                        <label class="label" for="descricao">
                            <span class="label-text">"Descrição"</span>
                        </label>
                        <input id="descricao"
                            type="text"
                            class="input input-bordered w-full"
                            on:input=move |ev| form.update(|d| d.description = event_target_value(&ev))
                            prop:value=move || form.field(|d| d.description.clone())
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="valor">
                            <span class="label-text">"Valor (R$)"</span>
                        </label>
                        <input id="valor"
                            type="text"
                            inputmode="numeric"
                            placeholder="0,00"
                            class="input input-bordered w-full"
                            on:keydown=move |ev| filter_masked_key(&ev)
                            on:input=move |ev| form.update(|d| d.value = format_currency(&event_target_value(&ev)))
                            prop:value=move || form.field(|d| d.value.clone())
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="status">
                            <span class="label-text">"Status"</span>
                        </label>
                        <select id="status"
                            class="select select-bordered w-full"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                if let Some(status) = OrderStatus::from_wire(&value) {
                                    form.update(|d| d.status = status);
                                }
                            }
                        >
                            {OrderStatus::ALL
                                .into_iter()
                                .map(|status| view! {
                                    <option
                                        value=status.as_str()
                                        selected=move || form.field(|d| d.status == status)
                                    >
                                        {status.label()}
                                    </option>
                                })
                                .collect_view()}
                        </select>
                    </div>
                    <div class="form-control">
                        <label class="label" for="pessoa">
                            <span class="label-text">"Pessoa"</span>
                        </label>
                        <select id="pessoa"
                            class="select select-bordered w-full"
                            on:change=move |ev| form.update(|d| d.person_id = event_target_value(&ev))
                        >
                            <option value="" selected=move || form.field(|d| d.person_id.is_empty())>
                                "Selecione uma pessoa"
                            </option>
                            {move || {
                                snapshot
                                    .with(|s| s.people.clone())
                                    .into_iter()
                                    .map(|person| {
                                        let value = person.id.to_string();
                                        let selected = {
                                            let value = value.clone();
                                            move || form.field(|d| d.person_id == value)
                                        };
                                        view! {
                                            <option value=value selected=selected>
                                                {person.name}
                                            </option>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </select>
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
                        <h3 class="card-title flex-1">"Pedidos"</h3>
                        <input
                            type="search"
                            placeholder="Buscar por descrição ou status"
                            class="input input-bordered input-sm"
                            on:input=move |ev| search.set(event_target_value(&ev))
                            prop:value=search
                        />
                        <select
                            class="select select-bordered select-sm"
                            on:change=move |ev| sort_key.set(OrderSortKey::parse(&event_target_value(&ev)))
                        >
                            {OrderSortKey::ALL
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
                                    <th>"Descrição"</th>
                                    <th>"Valor"</th>
                                    <th>"Status"</th>
                                    <th>"Pessoa"</th>
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
                                        .map(|order| {
                                            let id = order.id;
                                            let description = order.description.clone();
                                            let value = format_brl(order.value);
                                            let status = order.status.label();
                                            let owner = snapshot.with(|s| {
                                                s.owner_name(&order)
                                                    .map(str::to_owned)
                                                    .unwrap_or_else(|| "N/A".to_string())
                                            });
                                            view! {
                                                <tr>
                                                    <td class="font-bold">{description}</td>
                                                    <td class="font-mono">{value}</td>
                                                    <td>
                                                        <div class="badge badge-outline">{status}</div>
                                                    </td>
                                                    <td>{owner}</td>
                                                    <td class="flex gap-2 justify-end">
                                                        <button
                                                            class="btn btn-ghost btn-xs"
                                                            on:click=move |_| on_edit(order.clone())
                                                        >
                                                            "Editar"
                                                        </button>
                                                        <button
                                                            class="btn btn-ghost btn-xs text-error"
                                                            on:click={
                                                                let on_delete = on_delete.clone();
                                                                move |_| on_delete(id)
                                                            }
                                                        >
                                                            "Excluir"
                                                        </button>
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
