use clinic_core::{MedicalRecord, SearchFilter};
use leptos::prelude::*;

use crate::components::common::{use_fetcher, Badge, EmptyState, Loading, SearchBox};
use crate::components::forms::AddRecordPanel;

#[component]
pub fn RecordsPage() -> impl IntoView {
    let (records, refresh) = use_fetcher::<MedicalRecord>();
    let search = RwSignal::new(String::new());
    let adding = RwSignal::new(false);

    let on_added = Callback::new(move |()| {
        adding.set(false);
        refresh.run(());
    });
    let on_cancel = Callback::new(move |()| adding.set(false));

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between">
                <SearchBox value=search placeholder="Search medical records..."/>
                <button
                    class="px-4 py-2 rounded bg-blue-600 text-white"
                    on:click=move |_| adding.update(|a| *a = !*a)
                >
                    "Add Record"
                </button>
            </div>

            <Show when=move || adding.get()>
                <AddRecordPanel on_success=on_added on_cancel=on_cancel/>
            </Show>

            {move || {
                if records.with(|f| f.is_loading() && f.rows().is_empty()) {
                    return view! { <Loading label="Loading medical records..."/> }.into_any();
                }
                let filter = SearchFilter::new(search.get());
                let (rows, empty) = records.with(|f| {
                    (
                        f.visible(&filter).into_iter().cloned().collect::<Vec<_>>(),
                        f.empty_state(&filter),
                    )
                });
                match empty {
                    Some(message) => view! { <EmptyState message=message/> }.into_any(),
                    None => view! {
                        <div class="grid gap-4 md:grid-cols-2">
                            {rows.into_iter().map(|r| view! { <RecordCard record=r/> }).collect_view()}
                        </div>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn RecordCard(record: MedicalRecord) -> impl IntoView {
    let file = record.file_url.clone().filter(|u| !u.is_empty());
    view! {
        <div class="border rounded-lg bg-white p-4 space-y-2">
            <div class="flex items-start justify-between">
                <div>
                    <h3 class="font-semibold">{record.title.clone()}</h3>
                    <p class="text-sm text-slate-500">
                        {format!("{} ({})", record.patient_name(), record.patient_code())}
                    </p>
                </div>
                <Badge tone=record.record_type.badge_class() text=record.record_type.to_string()/>
            </div>
            <p class="text-sm">{record.description_or_placeholder().to_string()}</p>
            <div class="flex justify-between text-xs text-slate-500">
                <span>{record.record_date.clone()}</span>
                <span>{record.provider_name.clone().unwrap_or_default()}</span>
            </div>
            {file.map(|url| view! {
                <a href=url target="_blank" rel="noopener" class="text-sm text-blue-600">"View attachment"</a>
            })}
        </div>
    }
}
