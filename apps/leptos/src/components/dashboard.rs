use clinic_core::dashboard::{load_overview, Overview};
use clinic_core::model::format_phone;
use leptos::prelude::*;

use crate::app::use_store;
use crate::components::common::{Badge, Loading};

#[component]
pub fn DashboardPage() -> impl IntoView {
    let store = use_store();
    let overview = LocalResource::new(move || {
        let store = store.get();
        async move { load_overview(&*store).await }
    });

    move || match overview.get() {
        None => view! { <Loading label="Loading dashboard..."/> }.into_any(),
        Some(overview) => view! { <OverviewView overview=overview/> }.into_any(),
    }
}

#[component]
fn OverviewView(overview: Overview) -> impl IntoView {
    let cards = overview.cards();
    let upcoming = overview.upcoming;
    view! {
        <div class="space-y-6">
            <div class="grid gap-4 md:grid-cols-4">
                {cards
                    .into_iter()
                    .map(|(label, value)| view! {
                        <div class="border rounded-lg bg-white p-4">
                            <p class="text-sm text-slate-500">{label}</p>
                            <p class="text-3xl font-bold">{value}</p>
                        </div>
                    })
                    .collect_view()}
            </div>
            <div class="border rounded-lg bg-white p-4">
                <h2 class="font-semibold mb-4">"Upcoming Appointments"</h2>
                {if upcoming.is_empty() {
                    view! { <p class="text-slate-500">"No upcoming appointments."</p> }.into_any()
                } else {
                    view! {
                        <ul class="divide-y">
                            {upcoming
                                .into_iter()
                                .map(|a| {
                                    let phone = a.patient.as_ref().and_then(|p| p.primary_phone.clone()).map(|p| format_phone(&p));
                                    view! {
                                        <li class="py-3 flex items-center justify-between">
                                            <div>
                                                <p class="font-medium">{a.patient_name()}</p>
                                                <p class="text-sm text-slate-500">
                                                    {format!("{} · {} · {}", a.appointment_date, a.appointment_time, a.appointment_case)}
                                                </p>
                                                {phone.map(|p| view! { <p class="text-xs text-slate-400">{p}</p> })}
                                            </div>
                                            <Badge tone=a.status.badge_class() text=a.status.to_string()/>
                                        </li>
                                    }
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any()
                }}
            </div>
        </div>
    }
}
