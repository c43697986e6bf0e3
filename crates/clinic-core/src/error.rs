//! Error types shared across the dashboard core.

use thiserror::Error;

use crate::validation::ValidationResult;
use crate::wizard::{CreatedRow, IntakeStep};

/// Failures talking to the remote store.
///
/// Variants carry strings rather than source errors so fetch state can be
/// cloned into UI signals.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("request to remote store failed: {0}")]
    Http(String),
    #[error("remote store returned {code}: {message}")]
    Status { code: u16, message: String },
    #[error("could not decode rows from `{table}`: {message}")]
    Decode { table: String, message: String },
    #[error("unknown table `{0}`")]
    UnknownTable(String),
    #[error("no authenticated session")]
    Unauthenticated,
    #[error("insert into `{table}` rejected: {reason}")]
    Rejected { table: String, reason: String },
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Http(err.to_string())
    }
}

/// Configuration problems, raised before any request is made.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing configuration value `{0}`")]
    Missing(&'static str),
    #[error("invalid configuration value `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("could not parse configuration: {0}")]
    Parse(String),
}

/// Outcome of a rejected form submission.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FormError {
    #[error("{0}")]
    Validation(ValidationResult),
    #[error("a submission is already in flight")]
    SubmissionInFlight,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl FormError {
    /// Per-field validation errors, if this was a validation failure.
    pub fn validation(&self) -> Option<&ValidationResult> {
        match self {
            FormError::Validation(result) => Some(result),
            _ => None,
        }
    }

    /// Inline errors a form should show once a submit settles.
    ///
    /// `None` when the submit was turned away because another one is still
    /// in flight; the form state then belongs to the running submit.
    pub fn settled<T>(outcome: &Result<T, FormError>) -> Option<ValidationResult> {
        match outcome {
            Ok(_) => Some(ValidationResult::new()),
            Err(FormError::SubmissionInFlight) => None,
            Err(err) => Some(err.validation().cloned().unwrap_or_default()),
        }
    }
}

impl From<ValidationResult> for FormError {
    fn from(result: ValidationResult) -> Self {
        FormError::Validation(result)
    }
}

/// Outcome of a rejected or interrupted registration.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("registration can only be submitted from the final step (on step {0})")]
    NotOnFinalStep(u8),
    #[error("{0}")]
    Validation(ValidationResult),
    /// Inserts before `failed_step` were kept; nothing after it ran.
    #[error("registration stopped while saving the {failed_step}: {source}")]
    Partial {
        created: Vec<CreatedRow>,
        failed_step: IntakeStep,
        source: StoreError,
    },
}
