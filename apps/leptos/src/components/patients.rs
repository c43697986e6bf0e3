use chrono::Local;
use clinic_core::filter::ALL;
use clinic_core::model::format_phone;
use clinic_core::{ExactFilter, Gender, Patient, SearchFilter};
use leptos::prelude::*;

use crate::components::common::{use_fetcher, EmptyState, Loading, SearchBox};
use crate::components::forms::AddPatientPanel;

#[component]
pub fn PatientsPage() -> impl IntoView {
    let (patients, refresh) = use_fetcher::<Patient>();
    let search = RwSignal::new(String::new());
    let gender = RwSignal::new(ALL.to_string());
    let adding = RwSignal::new(false);
    let selected = RwSignal::new(None::<Patient>);

    let visible = move || {
        let search = SearchFilter::new(search.get());
        let exact = ExactFilter::gender(gender.get());
        patients.with(|f| {
            f.visible_with(&search, &exact)
                .into_iter()
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let on_added = Callback::new(move |()| {
        adding.set(false);
        refresh.run(());
    });
    let on_cancel = Callback::new(move |()| adding.set(false));

    view! {
        <div class="space-y-4">
            <div class="flex items-center justify-between gap-4">
                <div class="flex gap-2">
                    <SearchBox value=search placeholder="Search patients..."/>
                    <select
                        class="border rounded px-3 py-2"
                        prop:value=move || gender.get()
                        on:change=move |ev| gender.set(event_target_value(&ev))
                    >
                        <option value=ALL>"All genders"</option>
                        {Gender::ALL
                            .iter()
                            .map(|g| view! { <option value=g.as_str()>{g.as_str()}</option> })
                            .collect_view()}
                    </select>
                </div>
                <button
                    class="px-4 py-2 rounded bg-blue-600 text-white"
                    on:click=move |_| adding.update(|a| *a = !*a)
                >
                    "Add Patient"
                </button>
            </div>

            <Show when=move || adding.get()>
                <AddPatientPanel on_success=on_added on_cancel=on_cancel/>
            </Show>

            {move || selected.get().map(|p| view! { <PatientDetails patient=p on_close=Callback::new(move |()| selected.set(None))/> })}

            {move || {
                if patients.with(|f| f.is_loading() && f.rows().is_empty()) {
                    return view! { <Loading label="Loading patients..."/> }.into_any();
                }
                let rows = visible();
                if rows.is_empty() {
                    let message = SearchFilter::new(search.get()).empty_message::<Patient>();
                    return view! { <EmptyState message=message/> }.into_any();
                }
                let today = Local::now().date_naive();
                view! {
                    <table class="w-full bg-white border rounded-lg">
                        <thead class="bg-slate-50 text-left text-sm">
                            <tr>
                                <th class="p-3">"Name"</th>
                                <th class="p-3">"Patient ID"</th>
                                <th class="p-3">"Age"</th>
                                <th class="p-3">"Gender"</th>
                                <th class="p-3">"Phone"</th>
                                <th class="p-3">"Email"</th>
                                <th class="p-3"></th>
                            </tr>
                        </thead>
                        <tbody class="divide-y">
                            {rows
                                .into_iter()
                                .map(|p| {
                                    let age = p.age_on(today).map(|a| a.to_string()).unwrap_or_default();
                                    let shown = p.clone();
                                    view! {
                                        <tr>
                                            <td class="p-3 font-medium">{p.display_name()}</td>
                                            <td class="p-3 font-mono text-sm">{p.patient_id.clone()}</td>
                                            <td class="p-3">{age}</td>
                                            <td class="p-3">{p.gender.as_str()}</td>
                                            <td class="p-3">{format_phone(&p.primary_phone)}</td>
                                            <td class="p-3">{p.email.clone().unwrap_or_default()}</td>
                                            <td class="p-3">
                                                <button
                                                    class="text-blue-600 text-sm"
                                                    on:click=move |_| selected.set(Some(shown.clone()))
                                                >
                                                    "View"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_any()
            }}
        </div>
    }
}

/// Read-only summary of one patient
#[component]
fn PatientDetails(patient: Patient, on_close: Callback<()>) -> impl IntoView {
    let optional = |v: &Option<String>| v.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| "-".to_string());
    let rows = [
        ("Patient ID", patient.patient_id.clone()),
        ("Date of Birth", patient.date_of_birth.clone()),
        ("Gender", patient.gender.as_str().to_string()),
        ("Primary Phone", format_phone(&patient.primary_phone)),
        ("Secondary Phone", optional(&patient.secondary_phone)),
        ("Email", optional(&patient.email)),
        ("National ID", optional(&patient.national_id)),
        (
            "Marital Status",
            patient
                .marital_status
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        ("Preferred Language", optional(&patient.preferred_language)),
    ];

    view! {
        <div class="border rounded-lg bg-white p-6">
            <div class="flex justify-between mb-4">
                <h2 class="text-lg font-semibold">{patient.display_name()}</h2>
                <button class="text-sm text-slate-500" on:click=move |_| on_close.run(())>"Close"</button>
            </div>
            <dl class="grid gap-3 md:grid-cols-3">
                {rows
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div>
                            <dt class="text-xs text-slate-500">{label}</dt>
                            <dd>{value}</dd>
                        </div>
                    })
                    .collect_view()}
            </dl>
        </div>
    }
}
