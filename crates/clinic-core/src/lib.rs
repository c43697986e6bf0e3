//! Clinic Core - Patient Management Dashboard Library
//!
//! Pure Rust building blocks for a clinic dashboard backed by a hosted
//! relational store (PostgREST / Supabase REST surface).
//!
//! # Features
//!
//! - Typed rows for patients, appointments, medical records and reports
//! - Remote store boundary with REST and in-memory implementations
//! - One generic record fetcher plus client-side search filtering
//! - Schema-validated entry forms with a double-submit guard
//! - Six-step registration wizard over an immutable draft
//! - Report builders computed from live rows
//! - Route table, sidebar and session gate for the presentation shell
//!
//! # Example
//!
//! ```rust,no_run
//! use clinic_core::{RecordFetcher, SearchFilter, MemoryStore, Patient};
//!
//! # async fn demo() {
//! let store = MemoryStore::new();
//! let mut patients = RecordFetcher::<Patient>::new();
//! patients.refresh(&store).await;
//!
//! let filter = SearchFilter::new("raisa");
//! for patient in patients.visible(&filter) {
//!     println!("{} {}", patient.patient_id, patient.full_name());
//! }
//! # }
//! ```

pub mod config;
pub mod dashboard;
pub mod entity;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod forms;
pub mod model;
pub mod notify;
pub mod reports;
pub mod shell;
pub mod store;
pub mod validation;
pub mod wizard;

// Re-export commonly used types for convenience
pub use config::StoreConfig;
pub use dashboard::Overview;
pub use entity::Entity;
pub use error::{ConfigError, FormError, StoreError, WizardError};
pub use fetcher::RecordFetcher;
pub use filter::{ExactFilter, SearchFilter};
pub use forms::{
    AddAppointmentForm, AddMedicalRecordForm, AddPatientForm, EntryForm, FormController,
    PatientPicker,
};
pub use model::{
    Appointment, AppointmentStatus, Gender, MaritalStatus, MedicalRecord, Patient, PatientOption,
    RecordType, Report,
};
pub use notify::{Notifier, Toast, ToastKind, ToastQueue};
pub use reports::ReportKind;
pub use shell::{Access, Route, Sidebar};
pub use store::{MemoryStore, Query, RemoteStore, RestStore, Session};
pub use validation::{ValidationError, ValidationErrorCode, ValidationResult};
pub use wizard::{DraftField, RegistrationDraft, RegistrationOutcome, RegistrationWizard, WizardStep};
