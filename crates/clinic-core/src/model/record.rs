use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{PatientRef, RecordType};

/// Medical record row from `medical_records`, optionally embedding its patient
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecord {
    pub id: String,
    /// Reference to `patients.id`
    pub patient_id: String,
    #[serde(default)]
    pub appointment_id: Option<String>,
    pub record_type: RecordType,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    pub record_date: String,
    /// Link to an attached document, if one was uploaded
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub patient: Option<PatientRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl MedicalRecord {
    pub fn patient_name(&self) -> String {
        self.patient
            .as_ref()
            .map(PatientRef::full_name)
            .unwrap_or_default()
    }

    pub fn patient_code(&self) -> &str {
        self.patient
            .as_ref()
            .map(|p| p.patient_id.as_str())
            .unwrap_or("")
    }

    pub fn description_or_placeholder(&self) -> &str {
        match self.description.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => "No description",
        }
    }
}

/// Insert payload for `medical_records`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewMedicalRecord {
    pub patient_id: String,
    pub appointment_id: Option<String>,
    pub record_type: RecordType,
    pub title: String,
    pub description: Option<String>,
    pub provider_name: Option<String>,
    pub record_date: String,
}
