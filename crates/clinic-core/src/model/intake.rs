//! Rows written only by the registration wizard.

use serde::{Deserialize, Serialize};

use super::{AlcoholConsumption, ExerciseFrequency, SmokingStatus};

/// Insert payload for `patient_addresses`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewPatientAddress {
    pub patient_id: String,
    pub street_address: String,
    pub city: String,
    pub state_province: String,
    pub zip_postal_code: String,
    pub country: Option<String>,
}

/// Insert payload for `emergency_contacts`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewEmergencyContact {
    pub patient_id: String,
    pub contact_name: String,
    pub relationship: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub street_address: Option<String>,
}

/// Insert payload for `patient_lifestyle`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewPatientLifestyle {
    pub patient_id: String,
    pub occupation: Option<String>,
    pub smoking_status: Option<SmokingStatus>,
    pub alcohol_consumption: Option<AlcoholConsumption>,
    pub exercise_habits: Option<ExerciseFrequency>,
    pub dietary_restrictions: Option<String>,
}
