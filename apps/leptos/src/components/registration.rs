//! Six-step registration wizard screen.

use clinic_core::model::{AlcoholConsumption, ExerciseFrequency, SmokingStatus};
use clinic_core::{DraftField, Gender, MaritalStatus, RegistrationWizard, WizardError, WizardStep};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::use_store;
use crate::components::common::enum_options;
use crate::components::toast::use_toasts;

enum Input {
    Text(&'static str),
    Area,
    Choice(Vec<(String, String)>),
}

fn input_for(field: DraftField) -> Input {
    match field {
        DraftField::DateOfBirth | DraftField::PreferredDate => Input::Text("date"),
        DraftField::PreferredTime => Input::Text("time"),
        DraftField::Email | DraftField::EmergencyEmail => Input::Text("email"),
        DraftField::PrimaryPhone | DraftField::SecondaryPhone | DraftField::EmergencyPhone => {
            Input::Text("tel")
        }
        DraftField::Gender => Input::Choice(enum_options(Gender::ALL, Gender::as_str)),
        DraftField::MaritalStatus => {
            Input::Choice(enum_options(MaritalStatus::ALL, MaritalStatus::as_str))
        }
        DraftField::SmokingStatus => {
            Input::Choice(enum_options(SmokingStatus::ALL, SmokingStatus::as_str))
        }
        DraftField::AlcoholConsumption => {
            Input::Choice(enum_options(AlcoholConsumption::ALL, AlcoholConsumption::as_str))
        }
        DraftField::ExerciseHabits => {
            Input::Choice(enum_options(ExerciseFrequency::ALL, ExerciseFrequency::as_str))
        }
        DraftField::EmergencyAddress
        | DraftField::CurrentMedications
        | DraftField::KnownAllergies
        | DraftField::PreviousSurgeries
        | DraftField::ChronicConditions
        | DraftField::FamilyHistory
        | DraftField::CurrentSymptoms
        | DraftField::PreviousProviders => Input::Area,
        _ => Input::Text("text"),
    }
}

fn field_view(wizard: RwSignal<RegistrationWizard>, field: DraftField) -> impl IntoView {
    let value = move || wizard.with(|w| w.draft().get(field).to_string());
    let set = move |v: String| wizard.update(|w| w.set_field(field, v));
    let input = input_for(field);
    let wide = matches!(input, Input::Area);
    let control = match input {
        Input::Text(kind) => view! {
            <input
                type=kind
                class="w-full border rounded px-3 py-2"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            />
        }
        .into_any(),
        Input::Area => view! {
            <textarea
                rows="3"
                class="w-full border rounded px-3 py-2"
                prop:value=value
                on:input=move |ev| set(event_target_value(&ev))
            ></textarea>
        }
        .into_any(),
        Input::Choice(options) => view! {
            <select
                class="w-full border rounded px-3 py-2"
                prop:value=value
                on:change=move |ev| set(event_target_value(&ev))
            >
                <option value="">"Select..."</option>
                {options
                    .into_iter()
                    .map(|(value, text)| view! { <option value=value>{text}</option> })
                    .collect_view()}
            </select>
        }
        .into_any(),
    };

    view! {
        <label class=if wide { "block space-y-1 md:col-span-2" } else { "block space-y-1" }>
            <span class="text-sm font-medium">{field.label()}</span>
            {control}
        </label>
    }
}

/// Human-readable text for a failed submission
fn failure_text(err: &WizardError) -> String {
    match err {
        WizardError::Partial {
            created, failed_step, ..
        } if !created.is_empty() => {
            let saved: Vec<String> = created.iter().map(|c| c.step.to_string()).collect();
            format!(
                "Saving the {} failed. Already saved: {}.",
                failed_step,
                saved.join(", ")
            )
        }
        other => other.to_string(),
    }
}

#[component]
pub fn RegistrationPage() -> impl IntoView {
    let store = use_store();
    let toasts = use_toasts();
    let wizard = RwSignal::new(RegistrationWizard::new());
    let submitting = RwSignal::new(false);
    let problem = RwSignal::new(None::<String>);
    // Typing must not rebuild the inputs, only a step change does
    let current = Memo::new(move |_| wizard.with(|w| w.step()));

    let submit = move |_: leptos::ev::MouseEvent| {
        if submitting.get_untracked() {
            return;
        }
        submitting.set(true);
        problem.set(None);
        let snapshot = wizard.get_untracked();
        let store = store.get();
        spawn_local(async move {
            match snapshot.submit(&*store, &toasts).await {
                Ok(_) => {
                    wizard.try_update(|w| w.reset());
                }
                Err(err) => {
                    problem.try_set(Some(failure_text(&err)));
                }
            }
            submitting.try_set(false);
        });
    };

    view! {
        <div class="max-w-4xl space-y-6">
            <div class="flex justify-between">
                {WizardStep::ALL
                    .into_iter()
                    .map(|step| view! {
                        <div class="flex flex-col items-center text-xs gap-1">
                            <span class=move || {
                                if current.get().number() >= step.number() {
                                    "w-8 h-8 rounded-full flex items-center justify-center bg-blue-600 text-white"
                                } else {
                                    "w-8 h-8 rounded-full flex items-center justify-center bg-slate-200"
                                }
                            }>
                                {step.number()}
                            </span>
                            <span>{step.title()}</span>
                        </div>
                    })
                    .collect_view()}
            </div>
            <div class="w-full h-2 bg-slate-200 rounded">
                <div
                    class="h-2 bg-blue-600 rounded transition-all"
                    style:width=move || format!("{}%", wizard.with(|w| w.progress_percent()))
                ></div>
            </div>

            <div class="border rounded-lg bg-white p-6 space-y-4">
                <h2 class="text-lg font-semibold">
                    {move || format!("Step {}: {}", current.get().number(), current.get().title())}
                </h2>
                {move || view! {
                    <div class="grid gap-4 md:grid-cols-2">
                        {DraftField::on_step(current.get()).map(|f| field_view(wizard, f)).collect_view()}
                    </div>
                }}
                {move || problem.get().map(|p| view! { <p class="text-sm text-red-600">{p}</p> })}
                <div class="flex justify-between pt-4">
                    <button
                        class="px-4 py-2 border rounded disabled:opacity-50"
                        disabled=move || current.get() == WizardStep::Personal
                        on:click=move |_| wizard.update(|w| w.previous())
                    >
                        "Previous"
                    </button>
                    <Show
                        when=move || current.get().is_final()
                        fallback=move || view! {
                            <button
                                class="px-4 py-2 rounded bg-blue-600 text-white"
                                on:click=move |_| wizard.update(|w| w.next())
                            >
                                "Next"
                            </button>
                        }
                    >
                        <button
                            class="px-4 py-2 rounded bg-green-600 text-white disabled:opacity-50"
                            disabled=move || submitting.get()
                            on:click=submit
                        >
                            {move || if submitting.get() { "Registering..." } else { "Register Patient" }}
                        </button>
                    </Show>
                </div>
            </div>
        </div>
    }
}
