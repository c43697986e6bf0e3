use clinic_core::{Notifier, Toast, ToastKind};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

const DISMISS_AFTER_MS: u32 = 4_000;

/// Reactive toast list; every toast removes itself after a few seconds
#[derive(Clone, Copy)]
pub struct ToastCenter {
    entries: RwSignal<Vec<(u64, Toast)>>,
    next_id: StoredValue<u64>,
}

impl ToastCenter {
    pub fn new() -> Self {
        Self {
            entries: RwSignal::new(Vec::new()),
            next_id: StoredValue::new(0),
        }
    }

    fn dismiss(entries: RwSignal<Vec<(u64, Toast)>>, id: u64) {
        entries.try_update(|e| e.retain(|(i, _)| *i != id));
    }
}

impl Notifier for ToastCenter {
    fn notify(&self, toast: Toast) {
        let id = self.next_id.get_value();
        self.next_id.set_value(id + 1);
        self.entries.update(|e| e.push((id, toast)));

        let entries = self.entries;
        spawn_local(async move {
            TimeoutFuture::new(DISMISS_AFTER_MS).await;
            ToastCenter::dismiss(entries, id);
        });
    }
}

pub fn use_toasts() -> ToastCenter {
    expect_context::<ToastCenter>()
}

fn toast_class(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "border-green-300 bg-green-50 text-green-900",
        ToastKind::Error => "border-red-300 bg-red-50 text-red-900",
        ToastKind::Info => "border-blue-300 bg-blue-50 text-blue-900",
    }
}

#[component]
pub fn ToastHost() -> impl IntoView {
    let center = use_toasts();
    view! {
        <div class="fixed bottom-4 right-4 space-y-2 z-50">
            <For
                each=move || center.entries.get()
                key=|(id, _)| *id
                children=move |(id, toast)| {
                    view! {
                        <div class=format!("border rounded-lg shadow px-4 py-3 flex gap-4 items-start {}", toast_class(toast.kind))>
                            <span class="flex-1">{toast.message}</span>
                            <button class="text-sm opacity-60" on:click=move |_| ToastCenter::dismiss(center.entries, id)>
                                "×"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}
