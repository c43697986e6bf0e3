use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{AppointmentStatus, PatientRef};

/// Appointment row from `appointments`, optionally embedding its patient
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    /// Reference to `patients.id`
    pub patient_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub appointment_case: String,
    #[serde(default)]
    pub provider_name: Option<String>,
    /// A null status in storage reads as the creation default
    #[serde(default, deserialize_with = "status_or_default")]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub patient: Option<PatientRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Appointment {
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
}

fn status_or_default<'de, D>(deserializer: D) -> Result<AppointmentStatus, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<AppointmentStatus>::deserialize(deserializer)?.unwrap_or_default())
}

/// Insert payload for `appointments`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewAppointment {
    pub patient_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub appointment_case: String,
    pub provider_name: Option<String>,
    pub notes: Option<String>,
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_status_reads_as_scheduled() {
        let row = serde_json::json!({
            "id": "a1",
            "patient_id": "p1",
            "appointment_date": "2024-07-01",
            "appointment_time": "09:00",
            "appointment_case": "Follow-up",
            "status": null
        });
        let appointment: Appointment = serde_json::from_value(row).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::Scheduled);
        assert_eq!(appointment.patient_name(), "");
    }

    #[test]
    fn test_embedded_patient() {
        let row = serde_json::json!({
            "id": "a1",
            "patient_id": "p1",
            "appointment_date": "2024-07-01",
            "appointment_time": "09:00",
            "appointment_case": "Fever",
            "status": "No Show",
            "patient": {
                "patient_id": "PAT000001001",
                "first_name": "Keisya",
                "last_name": "Korieen",
                "primary_phone": "081200000000"
            }
        });
        let appointment: Appointment = serde_json::from_value(row).unwrap();
        assert_eq!(appointment.status, AppointmentStatus::NoShow);
        assert_eq!(appointment.patient_name(), "Keisya Korieen");
        assert_eq!(appointment.patient_code(), "PAT000001001");
    }
}
