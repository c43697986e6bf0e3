//! Clinic Dashboard Test Suite
//!
//! Cross-module scenarios for the dashboard core:
//! - Add-patient form rules and business codes
//! - Registration wizard persistence over randomized drafts
//! - Report payloads over generated rows
//! - Route table and sidebar navigation

pub mod navigation;
pub mod patient;
pub mod registration;
pub mod reports;
