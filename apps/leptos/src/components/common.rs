//! Small building blocks shared by the pages.

use clinic_core::fetcher::load;
use clinic_core::{Entity, RecordFetcher, Route, ValidationResult};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::use_store;

#[component]
pub fn PageHeader(page: Route) -> impl IntoView {
    view! {
        <div class="mb-6">
            <h1 class="text-3xl font-bold">{page.title()}</h1>
            <p class="text-slate-500">{page.subtitle()}</p>
        </div>
    }
}

#[component]
pub fn Loading(#[prop(into)] label: String) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center h-64 border rounded-lg bg-white">
            <p>{label}</p>
        </div>
    }
}

#[component]
pub fn EmptyState(message: &'static str) -> impl IntoView {
    view! { <p class="text-center text-slate-500 py-8">{message}</p> }
}

#[component]
pub fn SearchBox(value: RwSignal<String>, placeholder: &'static str) -> impl IntoView {
    view! {
        <input
            type="search"
            class="border rounded px-3 py-2 w-72"
            placeholder=placeholder
            prop:value=move || value.get()
            on:input=move |ev| value.set(event_target_value(&ev))
        />
    }
}

#[component]
pub fn Badge(tone: &'static str, #[prop(into)] text: String) -> impl IntoView {
    view! { <span class=format!("px-2 py-0.5 rounded text-xs font-medium {}", tone)>{text}</span> }
}

/// Inline message under a form input
pub fn field_error(errors: RwSignal<ValidationResult>, field: &'static str) -> impl IntoView {
    move || {
        errors.with(|e| {
            e.message_for(field)
                .map(|m| view! { <p class="text-sm text-red-600">{m.to_string()}</p> })
        })
    }
}

/// Labelled text input bound to one `String` field of a form-values signal
pub fn text_field<V>(
    label: &'static str,
    name: &'static str,
    kind: &'static str,
    values: RwSignal<V>,
    get: fn(&V) -> &String,
    set: fn(&mut V) -> &mut String,
    errors: RwSignal<ValidationResult>,
) -> impl IntoView
where
    V: Send + Sync + 'static,
{
    view! {
        <label class="block space-y-1">
            <span class="text-sm font-medium">{label}</span>
            <input
                type=kind
                name=name
                class="w-full border rounded px-3 py-2"
                prop:value=move || values.with(|v| get(v).clone())
                on:input=move |ev| {
                    let value = event_target_value(&ev);
                    values.update(|v| *set(v) = value);
                }
            />
            {field_error(errors, name)}
        </label>
    }
}

/// Labelled select bound to one `String` field; the first option is a blank prompt
pub fn select_field<V>(
    label: &'static str,
    name: &'static str,
    options: Vec<(String, String)>,
    values: RwSignal<V>,
    get: fn(&V) -> &String,
    set: fn(&mut V) -> &mut String,
    errors: RwSignal<ValidationResult>,
) -> impl IntoView
where
    V: Send + Sync + 'static,
{
    view! {
        <label class="block space-y-1">
            <span class="text-sm font-medium">{label}</span>
            <select
                name=name
                class="w-full border rounded px-3 py-2"
                prop:value=move || values.with(|v| get(v).clone())
                on:change=move |ev| {
                    let value = event_target_value(&ev);
                    values.update(|v| *set(v) = value);
                }
            >
                <option value="">"Select..."</option>
                {options
                    .into_iter()
                    .map(|(value, text)| view! { <option value=value>{text}</option> })
                    .collect_view()}
            </select>
            {field_error(errors, name)}
        </label>
    }
}

/// `(value, text)` options for an enumeration, value and text both the wire string
pub fn enum_options<T: Copy>(all: &[T], as_str: fn(&T) -> &'static str) -> Vec<(String, String)> {
    all.iter()
        .map(|v| (as_str(v).to_string(), as_str(v).to_string()))
        .collect()
}

/// List state for one entity plus a callback that reloads it.
///
/// The first load starts immediately. A reload finishing after the page
/// is gone is dropped.
pub fn use_fetcher<E>() -> (RwSignal<RecordFetcher<E>>, Callback<()>)
where
    E: Entity + Send + Sync + 'static,
{
    let store = use_store();
    let fetcher = RwSignal::new(RecordFetcher::<E>::new());
    let refresh = Callback::new(move |()| {
        fetcher.update(|f| f.begin());
        let store = store.get();
        spawn_local(async move {
            let outcome = load::<E>(&*store).await;
            fetcher.try_update(|f| f.complete(outcome));
        });
    });
    refresh.run(());
    (fetcher, refresh)
}
