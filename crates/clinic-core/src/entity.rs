//! Per-entity list configuration.
//!
//! An [`Entity`] tells the generic fetcher which query loads its list, and
//! tells the search filter which fields to look at.

use serde::de::DeserializeOwned;

use crate::model::{Appointment, MedicalRecord, Patient, Report};
use crate::store::{tables, Query};

pub trait Entity: DeserializeOwned + Clone {
    const TABLE: &'static str;
    /// Shown when the list is empty and no search is active
    const EMPTY_MESSAGE: &'static str;
    /// Shown when an active search matches nothing
    const NO_MATCH_MESSAGE: &'static str;

    /// The one query issued on mount
    fn list_query() -> Query;

    /// Text fields the free-text search looks at
    fn search_fields(&self) -> Vec<String>;

    fn empty_message(search: &str) -> &'static str {
        if search.is_empty() {
            Self::EMPTY_MESSAGE
        } else {
            Self::NO_MATCH_MESSAGE
        }
    }
}

const PATIENT_EMBED: &[&str] = &["patient_id", "first_name", "last_name", "primary_phone"];

impl Entity for Patient {
    const TABLE: &'static str = tables::PATIENTS;
    const EMPTY_MESSAGE: &'static str = "No patients registered yet.";
    const NO_MATCH_MESSAGE: &'static str = "No patients found matching your search.";

    fn list_query() -> Query {
        Query::from(Self::TABLE).order("created_at", false)
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.full_name(),
            self.patient_id.clone(),
            self.email.clone().unwrap_or_default(),
            self.primary_phone.clone(),
        ]
    }
}

impl Entity for Appointment {
    const TABLE: &'static str = tables::APPOINTMENTS;
    const EMPTY_MESSAGE: &'static str = "No appointments scheduled yet.";
    const NO_MATCH_MESSAGE: &'static str = "No appointments found matching your search.";

    fn list_query() -> Query {
        Query::from(Self::TABLE)
            .embed("patient", tables::PATIENTS, "patient_id", PATIENT_EMBED)
            .order("appointment_date", true)
            .order("appointment_time", true)
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.patient_name(),
            self.patient_code().to_string(),
            self.appointment_case.clone(),
        ]
    }
}

impl Entity for MedicalRecord {
    const TABLE: &'static str = tables::MEDICAL_RECORDS;
    const EMPTY_MESSAGE: &'static str = "No medical records available yet.";
    const NO_MATCH_MESSAGE: &'static str = "No medical records found matching your search.";

    fn list_query() -> Query {
        Query::from(Self::TABLE)
            .embed(
                "patient",
                tables::PATIENTS,
                "patient_id",
                &["patient_id", "first_name", "last_name"],
            )
            .order("record_date", false)
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.patient_name(),
            self.patient_code().to_string(),
            self.title.clone(),
            self.record_type.to_string(),
        ]
    }
}

impl Entity for Report {
    const TABLE: &'static str = tables::REPORTS;
    const EMPTY_MESSAGE: &'static str = "No reports generated yet.";
    const NO_MATCH_MESSAGE: &'static str = "No reports found matching your search.";

    fn list_query() -> Query {
        Query::from(Self::TABLE).order("generated_at", false)
    }

    fn search_fields(&self) -> Vec<String> {
        vec![
            self.report_name.clone(),
            self.report_type.clone(),
            self.generated_by.clone().unwrap_or_default(),
        ]
    }
}
