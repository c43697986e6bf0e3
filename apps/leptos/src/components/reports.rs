use clinic_core::reports::{self, ReportKind};
use clinic_core::{Report, SearchFilter};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::use_store;
use crate::components::common::{use_fetcher, Badge, EmptyState, Loading, SearchBox};
use crate::components::toast::use_toasts;
use crate::download::save_json;

#[component]
pub fn ReportsPage() -> impl IntoView {
    let store = use_store();
    let toasts = use_toasts();
    let (list, refresh) = use_fetcher::<Report>();
    let search = RwSignal::new(String::new());
    let generating = RwSignal::new(None::<ReportKind>);

    let generate = move |kind: ReportKind| {
        if generating.get_untracked().is_some() {
            return;
        }
        generating.set(Some(kind));
        let store = store.get();
        spawn_local(async move {
            let outcome = reports::generate(kind, &*store, &toasts).await;
            generating.try_set(None);
            if outcome.is_ok() {
                refresh.run(());
            }
        });
    };

    view! {
        <div class="space-y-6">
            <div class="grid gap-4 md:grid-cols-3">
                {ReportKind::ALL
                    .into_iter()
                    .map(|kind| view! {
                        <div class="border rounded-lg bg-white p-4 space-y-3">
                            <h3 class="font-semibold">{kind.report_type()}</h3>
                            <p class="text-sm text-slate-500">{kind.description()}</p>
                            <button
                                class="w-full px-4 py-2 rounded bg-blue-600 text-white disabled:opacity-50"
                                disabled=move || generating.get().is_some()
                                on:click=move |_| generate(kind)
                            >
                                {move || {
                                    if generating.get() == Some(kind) { "Generating..." } else { "Generate" }
                                }}
                            </button>
                        </div>
                    })
                    .collect_view()}
            </div>

            <div class="space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-xl font-semibold">"Generated Reports"</h2>
                    <SearchBox value=search placeholder="Search reports..."/>
                </div>
                {move || {
                    if list.with(|f| f.is_loading() && f.rows().is_empty()) {
                        return view! { <Loading label="Loading reports..."/> }.into_any();
                    }
                    let filter = SearchFilter::new(search.get());
                    let (rows, empty) = list.with(|f| {
                        (
                            f.visible(&filter).into_iter().cloned().collect::<Vec<_>>(),
                            f.empty_state(&filter),
                        )
                    });
                    if let Some(message) = empty {
                        return view! { <EmptyState message=message/> }.into_any();
                    }
                    view! {
                        <table class="w-full bg-white border rounded-lg">
                            <thead class="bg-slate-50 text-left text-sm">
                                <tr>
                                    <th class="p-3">"Report"</th>
                                    <th class="p-3">"Type"</th>
                                    <th class="p-3">"Generated"</th>
                                    <th class="p-3">"By"</th>
                                    <th class="p-3"></th>
                                </tr>
                            </thead>
                            <tbody class="divide-y">
                                {rows.into_iter().map(|r| view! { <ReportRow report=r/> }).collect_view()}
                            </tbody>
                        </table>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}

#[component]
fn ReportRow(report: Report) -> impl IntoView {
    let generated = report.generated_at.format("%Y-%m-%d %H:%M").to_string();
    let by = report.generated_by.clone().unwrap_or_default();
    let tone = report.badge_class();
    let kind = report.report_type.clone();
    let name = report.report_name.clone();

    let download = move |_| {
        let saved = report
            .to_export_json()
            .map_err(|e| e.to_string())
            .and_then(|json| {
                save_json(&report.export_file_name(), &json).map_err(|e| format!("{:?}", e))
            });
        if let Err(err) = saved {
            tracing::error!(report = %report.id, error = %err, "report download failed");
        }
    };

    view! {
        <tr>
            <td class="p-3 font-medium">{name}</td>
            <td class="p-3"><Badge tone=tone text=kind/></td>
            <td class="p-3 text-sm">{generated}</td>
            <td class="p-3 text-sm">{by}</td>
            <td class="p-3">
                <button class="text-blue-600 text-sm" on:click=download>"Download"</button>
            </td>
        </tr>
    }
}
