//! Single-screen entry forms.
//!
//! Each form validates its raw string values, builds one insert payload and
//! hands it to a [`FormController`], which owns the in-flight guard and the
//! success/failure toasts.

use std::cell::Cell;
use std::marker::PhantomData;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, warn};

use crate::error::{FormError, StoreError};
use crate::model::PatientOption;
use crate::notify::{Notifier, Toast};
use crate::store::{insert_as, select_as, tables, Query, RemoteStore};
use crate::validation::ValidationResult;

mod appointment;
mod patient;
mod record;

pub use appointment::{AddAppointmentForm, AppointmentFormValues};
pub use patient::{AddPatientForm, PatientFormValues};
pub use record::{AddMedicalRecordForm, MedicalRecordFormValues};

/// Field schema and payload mapping of one entry form
pub trait EntryForm {
    /// Raw input, as typed
    type Values;
    /// Insert payload
    type Row: Serialize;

    const TABLE: &'static str;
    const SUCCESS_MESSAGE: &'static str;
    const FAILURE_MESSAGE: &'static str;

    /// Check every field rule and build the payload, or return all failures
    fn prepare(values: &Self::Values) -> Result<Self::Row, ValidationResult>;

    fn validate(values: &Self::Values) -> ValidationResult {
        Self::prepare(values).err().unwrap_or_default()
    }
}

/// Submission driver for one form instance
#[derive(Debug)]
pub struct FormController<F> {
    in_flight: Cell<bool>,
    _form: PhantomData<F>,
}

impl<F> Default for FormController<F> {
    fn default() -> Self {
        Self {
            in_flight: Cell::new(false),
            _form: PhantomData,
        }
    }
}

/// Clears the in-flight flag when the submission ends, however it ends
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        InFlight(flag)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl<F: EntryForm> FormController<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while an insert is awaiting the store; the submit control is disabled
    pub fn is_submitting(&self) -> bool {
        self.in_flight.get()
    }

    /// Validate, insert, toast and call `on_success` exactly once on success.
    ///
    /// Validation failures return before the store is touched and raise no
    /// toast; the caller shows them inline. The caller's values are never
    /// modified.
    pub async fn submit(
        &self,
        store: &dyn RemoteStore,
        values: &F::Values,
        notifier: &dyn Notifier,
        on_success: impl FnOnce(),
    ) -> Result<Value, FormError> {
        if self.in_flight.get() {
            warn!(table = F::TABLE, "ignoring submit while another is in flight");
            return Err(FormError::SubmissionInFlight);
        }
        let row = F::prepare(values)?;

        let _guard = InFlight::enter(&self.in_flight);
        match insert_as(store, F::TABLE, &row).await {
            Ok(stored) => {
                notifier.notify(Toast::success(F::SUCCESS_MESSAGE));
                on_success();
                Ok(stored)
            }
            Err(err) => {
                error!(table = F::TABLE, error = %err, "insert failed");
                notifier.notify(Toast::error(F::FAILURE_MESSAGE));
                Err(FormError::Store(err))
            }
        }
    }
}

/// Patient choices for the appointment and medical-record forms
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PatientPicker {
    options: Vec<PatientOption>,
    last_error: Option<StoreError>,
}

impl PatientPicker {
    pub fn query() -> Query {
        Query::from(tables::PATIENTS)
            .columns(&["id", "patient_id", "first_name", "last_name"])
            .order("first_name", true)
    }

    /// Fetch the options; a failure is logged and leaves the list empty
    pub async fn load(store: &dyn RemoteStore) -> Self {
        match select_as::<PatientOption>(store, &Self::query()).await {
            Ok(options) => Self {
                options,
                last_error: None,
            },
            Err(err) => {
                error!(error = %err, "could not load patient options");
                Self {
                    options: Vec::new(),
                    last_error: Some(err),
                }
            }
        }
    }

    pub fn options(&self) -> &[PatientOption] {
        &self.options
    }

    pub fn last_error(&self) -> Option<&StoreError> {
        self.last_error.as_ref()
    }

    pub fn find(&self, id: &str) -> Option<&PatientOption> {
        self.options.iter().find(|o| o.id == id)
    }
}
