use clinic_core::{Appointment, SearchFilter};
use leptos::prelude::*;

use crate::components::common::{use_fetcher, Badge, EmptyState, Loading, SearchBox};
use crate::components::forms::AddAppointmentPanel;

#[component]
pub fn AppointmentsPage() -> impl IntoView {
    let (appointments, refresh) = use_fetcher::<Appointment>();
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
                <SearchBox value=search placeholder="Search appointments..."/>
                <button
                    class="px-4 py-2 rounded bg-blue-600 text-white"
                    on:click=move |_| adding.update(|a| *a = !*a)
                >
                    "Schedule Appointment"
                </button>
            </div>

            <Show when=move || adding.get()>
                <AddAppointmentPanel on_success=on_added on_cancel=on_cancel/>
            </Show>

            {move || {
                if appointments.with(|f| f.is_loading() && f.rows().is_empty()) {
                    return view! { <Loading label="Loading appointments..."/> }.into_any();
                }
                let filter = SearchFilter::new(search.get());
                let (rows, empty) = appointments.with(|f| {
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
                                <th class="p-3">"Patient"</th>
                                <th class="p-3">"Date"</th>
                                <th class="p-3">"Time"</th>
                                <th class="p-3">"Case"</th>
                                <th class="p-3">"Provider"</th>
                                <th class="p-3">"Status"</th>
                            </tr>
                        </thead>
                        <tbody class="divide-y">
                            {rows
                                .into_iter()
                                .map(|a| view! {
                                    <tr>
                                        <td class="p-3">
                                            <p class="font-medium">{a.patient_name()}</p>
                                            <p class="text-xs font-mono text-slate-500">{a.patient_code().to_string()}</p>
                                        </td>
                                        <td class="p-3">{a.appointment_date.clone()}</td>
                                        <td class="p-3">{a.appointment_time.clone()}</td>
                                        <td class="p-3">{a.appointment_case.clone()}</td>
                                        <td class="p-3">{a.provider_name.clone().unwrap_or_default()}</td>
                                        <td class="p-3">
                                            <Badge tone=a.status.badge_class() text=a.status.to_string()/>
                                        </td>
                                    </tr>
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
