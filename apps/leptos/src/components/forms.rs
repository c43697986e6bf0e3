//! Add-patient, add-appointment and add-medical-record panels.
//!
//! Each panel keeps its values in a signal, hands them to a
//! [`FormController`] on submit and reports back through `on_success` or
//! `on_cancel`. Values stay as typed when the insert fails.

use std::rc::Rc;

use clinic_core::forms::{AppointmentFormValues, MedicalRecordFormValues, PatientFormValues};
use clinic_core::{
    AddAppointmentForm, AddMedicalRecordForm, AddPatientForm, EntryForm, FormController, FormError,
    Gender, MaritalStatus, PatientPicker, RecordType, ValidationResult,
};
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::app::{use_store, AppStore};
use crate::components::common::{enum_options, field_error, select_field, text_field};
use crate::components::toast::{use_toasts, ToastCenter};

const LANGUAGES: [&str; 4] = ["English", "Indonesian", "Spanish", "French"];

/// Per-panel submission state
struct Submission<F: EntryForm> {
    store: AppStore,
    toasts: ToastCenter,
    controller: StoredValue<Rc<FormController<F>>, LocalStorage>,
    errors: RwSignal<ValidationResult>,
    submitting: RwSignal<bool>,
}

impl<F: EntryForm> Clone for Submission<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: EntryForm> Copy for Submission<F> {}

impl<F> Submission<F>
where
    F: EntryForm + 'static,
    F::Values: 'static,
{
    fn new() -> Self {
        Self {
            store: use_store(),
            toasts: use_toasts(),
            controller: StoredValue::new_local(Rc::new(FormController::new())),
            errors: RwSignal::new(ValidationResult::new()),
            submitting: RwSignal::new(false),
        }
    }

    fn submit(self, values: F::Values, on_success: Callback<()>) {
        let controller = self.controller.get_value();
        if controller.is_submitting() || self.submitting.get_untracked() {
            return;
        }
        self.submitting.set(true);
        let store = self.store.get();
        let toasts = self.toasts;
        let errors = self.errors;
        let submitting = self.submitting;
        spawn_local(async move {
            let outcome = controller
                .submit(&*store, &values, &toasts, || on_success.run(()))
                .await;
            let Some(shown) = FormError::settled(&outcome) else {
                return;
            };
            // The panel may already be gone after on_success
            errors.try_set(shown);
            submitting.try_set(false);
        });
    }
}

#[component]
fn FormButtons(submitting: RwSignal<bool>, on_cancel: Callback<()>, label: &'static str) -> impl IntoView {
    view! {
        <div class="flex justify-end gap-2 pt-4">
            <button type="button" class="px-4 py-2 border rounded" on:click=move |_| on_cancel.run(())>
                "Cancel"
            </button>
            <button
                type="submit"
                class="px-4 py-2 rounded bg-blue-600 text-white disabled:opacity-50"
                disabled=move || submitting.get()
            >
                {move || if submitting.get() { "Saving..." } else { label }}
            </button>
        </div>
    }
}

#[component]
pub fn AddPatientPanel(on_success: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let values = RwSignal::new(PatientFormValues::default());
    let submission = Submission::<AddPatientForm>::new();
    let errors = submission.errors;

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        submission.submit(values.get_untracked(), on_success);
    };

    let languages: Vec<(String, String)> = LANGUAGES
        .iter()
        .map(|l| (l.to_string(), l.to_string()))
        .collect();

    view! {
        <form class="border rounded-lg bg-white p-6 space-y-4" on:submit=on_submit>
            <h2 class="text-lg font-semibold">"Add New Patient"</h2>
            <div class="grid gap-4 md:grid-cols-3">
                {text_field("First Name *", "first_name", "text", values, |v| &v.first_name, |v| &mut v.first_name, errors)}
                {text_field("Middle Name", "middle_name", "text", values, |v| &v.middle_name, |v| &mut v.middle_name, errors)}
                {text_field("Last Name *", "last_name", "text", values, |v| &v.last_name, |v| &mut v.last_name, errors)}
                {text_field("Date of Birth *", "date_of_birth", "date", values, |v| &v.date_of_birth, |v| &mut v.date_of_birth, errors)}
                {select_field("Gender *", "gender", enum_options(Gender::ALL, Gender::as_str), values, |v| &v.gender, |v| &mut v.gender, errors)}
                {select_field("Marital Status", "marital_status", enum_options(MaritalStatus::ALL, MaritalStatus::as_str), values, |v| &v.marital_status, |v| &mut v.marital_status, errors)}
                {text_field("Email", "email", "email", values, |v| &v.email, |v| &mut v.email, errors)}
                {text_field("Primary Phone *", "primary_phone", "tel", values, |v| &v.primary_phone, |v| &mut v.primary_phone, errors)}
                {text_field("Secondary Phone", "secondary_phone", "tel", values, |v| &v.secondary_phone, |v| &mut v.secondary_phone, errors)}
                {text_field("National ID", "national_id", "text", values, |v| &v.national_id, |v| &mut v.national_id, errors)}
                {select_field("Preferred Language", "preferred_language", languages, values, |v| &v.preferred_language, |v| &mut v.preferred_language, errors)}
            </div>
            <FormButtons submitting=submission.submitting on_cancel=on_cancel label="Add Patient"/>
        </form>
    }
}

/// Patient dropdown fed by its own picker query
#[component]
fn PatientSelect(
    selected: Signal<String>,
    on_pick: Callback<String>,
    errors: RwSignal<ValidationResult>,
) -> impl IntoView {
    let store = use_store();
    let picker = LocalResource::new(move || {
        let store = store.get();
        async move { PatientPicker::load(&*store).await }
    });

    view! {
        <label class="block space-y-1">
            <span class="text-sm font-medium">"Patient *"</span>
            <select
                name="patient_id"
                class="w-full border rounded px-3 py-2"
                prop:value=move || selected.get()
                on:change=move |ev| on_pick.run(event_target_value(&ev))
            >
                <option value="">"Select a patient"</option>
                {move || {
                    picker
                        .get()
                        .map(|p| {
                            p.options()
                                .iter()
                                .map(|o| view! { <option value=o.id.clone()>{o.label()}</option> })
                                .collect_view()
                        })
                }}
            </select>
            {field_error(errors, "patient_id")}
        </label>
    }
}

#[component]
pub fn AddAppointmentPanel(on_success: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let values = RwSignal::new(AppointmentFormValues::default());
    let submission = Submission::<AddAppointmentForm>::new();
    let errors = submission.errors;

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        submission.submit(values.get_untracked(), on_success);
    };

    view! {
        <form class="border rounded-lg bg-white p-6 space-y-4" on:submit=on_submit>
            <h2 class="text-lg font-semibold">"Schedule Appointment"</h2>
            <div class="grid gap-4 md:grid-cols-2">
                <PatientSelect
                    selected=Signal::derive(move || values.with(|v| v.patient_id.clone()))
                    on_pick=Callback::new(move |id: String| values.update(|v| v.patient_id = id))
                    errors=errors
                />
                {text_field("Appointment Case *", "appointment_case", "text", values, |v| &v.appointment_case, |v| &mut v.appointment_case, errors)}
                {text_field("Date *", "appointment_date", "date", values, |v| &v.appointment_date, |v| &mut v.appointment_date, errors)}
                {text_field("Time *", "appointment_time", "time", values, |v| &v.appointment_time, |v| &mut v.appointment_time, errors)}
                {text_field("Provider", "provider_name", "text", values, |v| &v.provider_name, |v| &mut v.provider_name, errors)}
                {text_field("Notes", "notes", "text", values, |v| &v.notes, |v| &mut v.notes, errors)}
            </div>
            <FormButtons submitting=submission.submitting on_cancel=on_cancel label="Schedule"/>
        </form>
    }
}

#[component]
pub fn AddRecordPanel(on_success: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let values = RwSignal::new(MedicalRecordFormValues::default());
    let submission = Submission::<AddMedicalRecordForm>::new();
    let errors = submission.errors;

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        submission.submit(values.get_untracked(), on_success);
    };

    view! {
        <form class="border rounded-lg bg-white p-6 space-y-4" on:submit=on_submit>
            <h2 class="text-lg font-semibold">"Add Medical Record"</h2>
            <div class="grid gap-4 md:grid-cols-2">
                <PatientSelect
                    selected=Signal::derive(move || values.with(|v| v.patient_id.clone()))
                    on_pick=Callback::new(move |id: String| values.update(|v| v.patient_id = id))
                    errors=errors
                />
                {select_field("Record Type *", "record_type", enum_options(RecordType::ALL, RecordType::as_str), values, |v| &v.record_type, |v| &mut v.record_type, errors)}
                {text_field("Title *", "title", "text", values, |v| &v.title, |v| &mut v.title, errors)}
                {text_field("Record Date *", "record_date", "date", values, |v| &v.record_date, |v| &mut v.record_date, errors)}
                {text_field("Provider", "provider_name", "text", values, |v| &v.provider_name, |v| &mut v.provider_name, errors)}
                {text_field("Description", "description", "text", values, |v| &v.description, |v| &mut v.description, errors)}
            </div>
            <FormButtons submitting=submission.submitting on_cancel=on_cancel label="Add Record"/>
        </form>
    }
}
