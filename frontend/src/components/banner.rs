use leptos::prelude::*;
use testhub_shared::status::{StatusKind, StatusMessage};

fn alert_class(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Success => "alert alert-success text-sm py-2",
        StatusKind::Error => "alert alert-error text-sm py-2",
    }
}

/// 操作结果提示条，按消息类型选择样式；没有消息时不渲染
#[component]
pub fn Banner(#[prop(into)] status: Signal<Option<StatusMessage>>) -> impl IntoView {
    move || {
        status.get().map(|message| {
            view! {
                <div role="alert" class=alert_class(message.kind)>
                    <span>{message.text}</span>
                </div>
            }
        })
    }
}
