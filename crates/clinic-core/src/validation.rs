//! Input validation - ensures form data is well-formed before any insert
//!
//! Provides validators for:
//! - Required fields and minimum lengths
//! - Email addresses
//! - Calendar dates (YYYY-MM-DD)
//! - Enumerated choices (gender, marital status, record type, ...)

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Validation error with detailed context
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub code: ValidationErrorCode,
}

/// Specific validation error codes for programmatic handling
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValidationErrorCode {
    Required,
    TooShort,
    InvalidFormat,
    InvalidChoice,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result that can accumulate multiple errors
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add_error(&mut self, field: &str, message: &str, code: ValidationErrorCode) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.to_string(),
            code,
        });
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// First message recorded against `field`, for inline display under the input.
    pub fn message_for(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn into_result(self) -> Result<(), ValidationResult> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let messages: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        write!(f, "Validation failed: {}", messages.join("; "))
    }
}

/// Validate that a field has a non-empty value
pub fn validate_required(value: &str, field: &str, message: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    if value.is_empty() {
        result.add_error(field, message, ValidationErrorCode::Required);
    }
    result
}

/// Validate a minimum length, counted in characters
pub fn validate_min_length(value: &str, min: usize, field: &str, message: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    if value.chars().count() < min {
        result.add_error(field, message, ValidationErrorCode::TooShort);
    }
    result
}

/// Validate an email address
///
/// Email must have:
/// - exactly one `@` with a non-empty local part
/// - a domain containing a dot that neither starts nor ends the domain
/// - no whitespace
pub fn validate_email(value: &str, field: &str, message: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    if !is_valid_email(value) {
        result.add_error(field, message, ValidationErrorCode::InvalidFormat);
    }
    result
}

/// Validate an email that may be left blank
pub fn validate_optional_email(value: &str, field: &str, message: &str) -> ValidationResult {
    if value.is_empty() {
        return ValidationResult::new();
    }
    validate_email(value, field, message)
}

/// Validate a calendar date in YYYY-MM-DD format
pub fn validate_date(value: &str, field: &str, message: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    if parse_date(value).is_none() {
        result.add_error(field, message, ValidationErrorCode::InvalidFormat);
    }
    result
}

/// Validate that a value names one of the variants of `T`
pub fn validate_choice<T: FromStr>(value: &str, field: &str, message: &str) -> ValidationResult {
    let mut result = ValidationResult::new();
    if value.parse::<T>().is_err() {
        result.add_error(field, message, ValidationErrorCode::InvalidChoice);
    }
    result
}

pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => (local, domain),
        _ => return false,
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !domain.contains("..")
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    // Basic YYYY-MM-DD shape before handing to chrono, which accepts unpadded fields
    if value.len() != 10 {
        return None;
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
