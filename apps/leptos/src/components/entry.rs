use clinic_core::Route;
use leptos::prelude::*;
use leptos_meta::Title;

const FEATURES: [(&str, &str); 3] = [
    ("Patient Management", "Register patients and keep their details in one place."),
    ("Appointments", "Schedule visits and track them from booking to completion."),
    ("Medical Records", "Record consultations, lab results and treatments."),
];

#[component]
pub fn EntryPage() -> impl IntoView {
    view! {
        <Title text=Route::Entry.title()/>
        <div class="min-h-screen bg-slate-50">
            <div class="bg-gradient-to-br from-blue-600 to-blue-800 text-white py-20 text-center">
                <h1 class="text-5xl font-bold mb-4">{Route::Entry.title()}</h1>
                <p class="text-lg opacity-90 mb-8">{Route::Entry.subtitle()}</p>
                <a href=Route::Dashboard.path() class="px-6 py-3 rounded bg-white text-blue-700 font-semibold">
                    "Open dashboard"
                </a>
            </div>
            <div class="max-w-5xl mx-auto grid gap-6 md:grid-cols-3 p-8">
                {FEATURES
                    .iter()
                    .map(|(title, text)| view! {
                        <div class="border rounded-lg bg-white p-6">
                            <h2 class="font-semibold mb-2">{*title}</h2>
                            <p class="text-slate-600">{*text}</p>
                        </div>
                    })
                    .collect_view()}
            </div>
        </div>
    }
}

#[component]
pub fn NotFound() -> impl IntoView {
    view! {
        <Title text=Route::NotFound.title()/>
        <div class="min-h-screen flex flex-col items-center justify-center gap-4">
            <h1 class="text-4xl font-bold">"404"</h1>
            <p class="text-slate-600">{Route::NotFound.subtitle()}</p>
            <a href=Route::Entry.path() class="text-blue-600 underline">"Return to home"</a>
        </div>
    }
}
