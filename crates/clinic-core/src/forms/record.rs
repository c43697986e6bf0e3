use chrono::{Local, NaiveDate};

use super::EntryForm;
use crate::model::{non_empty, NewMedicalRecord, RecordType};
use crate::store::tables;
use crate::validation::{validate_required, ValidationErrorCode, ValidationResult};

/// Raw add-medical-record input. Records entered here are not linked to an
/// appointment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MedicalRecordFormValues {
    pub patient_id: String,
    pub record_type: String,
    pub title: String,
    pub description: String,
    pub provider_name: String,
    pub record_date: String,
}

impl MedicalRecordFormValues {
    /// Blank form with the record date preset to `today`
    pub fn dated(today: NaiveDate) -> Self {
        Self {
            patient_id: String::new(),
            record_type: String::new(),
            title: String::new(),
            description: String::new(),
            provider_name: String::new(),
            record_date: today.format("%Y-%m-%d").to_string(),
        }
    }
}

impl Default for MedicalRecordFormValues {
    fn default() -> Self {
        Self::dated(Local::now().date_naive())
    }
}

pub struct AddMedicalRecordForm;

impl EntryForm for AddMedicalRecordForm {
    type Values = MedicalRecordFormValues;
    type Row = NewMedicalRecord;

    const TABLE: &'static str = tables::MEDICAL_RECORDS;
    const SUCCESS_MESSAGE: &'static str = "Medical record added successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to add medical record. Please try again.";

    fn prepare(values: &MedicalRecordFormValues) -> Result<NewMedicalRecord, ValidationResult> {
        let mut result = ValidationResult::new();
        result.merge(validate_required(&values.patient_id, "patient_id", "Patient is required"));

        let record_type = if values.record_type.is_empty() {
            result.add_error("record_type", "Record type is required", ValidationErrorCode::Required);
            None
        } else {
            let parsed = values.record_type.parse::<RecordType>().ok();
            if parsed.is_none() {
                result.add_error(
                    "record_type",
                    "Record type is required",
                    ValidationErrorCode::InvalidChoice,
                );
            }
            parsed
        };

        result.merge(validate_required(&values.title, "title", "Title is required"));
        result.merge(validate_required(
            &values.record_date,
            "record_date",
            "Record date is required",
        ));

        let record_type = match record_type {
            Some(record_type) if result.is_valid() => record_type,
            _ => return Err(result),
        };

        Ok(NewMedicalRecord {
            patient_id: values.patient_id.clone(),
            appointment_id: None,
            record_type,
            title: values.title.clone(),
            description: non_empty(&values.description),
            provider_name: non_empty(&values.provider_name),
            record_date: values.record_date.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_date_defaults_to_given_day() {
        let values = MedicalRecordFormValues::dated(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        assert_eq!(values.record_date, "2024-07-01");
    }

    #[test]
    fn test_required_fields() {
        let mut values = MedicalRecordFormValues::dated(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap());
        let errors = AddMedicalRecordForm::validate(&values);
        assert_eq!(errors.errors.len(), 3);
        assert_eq!(errors.message_for("record_type"), Some("Record type is required"));

        values.record_date.clear();
        assert_eq!(
            AddMedicalRecordForm::validate(&values).message_for("record_date"),
            Some("Record date is required")
        );
    }

    #[test]
    fn test_builds_row() {
        let row = AddMedicalRecordForm::prepare(&MedicalRecordFormValues {
            patient_id: "p1".to_string(),
            record_type: "Lab Result".to_string(),
            title: "CBC".to_string(),
            ..MedicalRecordFormValues::dated(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
        })
        .unwrap();
        assert_eq!(row.record_type, RecordType::LabResult);
        assert_eq!(row.appointment_id, None);
        assert_eq!(row.record_date, "2024-07-01");
    }

    #[test]
    fn test_payload_sends_null_appointment() {
        let row = AddMedicalRecordForm::prepare(&MedicalRecordFormValues {
            patient_id: "p1".to_string(),
            record_type: "Consultation".to_string(),
            title: "Walk-in".to_string(),
            ..MedicalRecordFormValues::dated(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap())
        })
        .unwrap();
        let payload = serde_json::to_value(&row).unwrap();
        assert!(payload["appointment_id"].is_null());
        assert!(payload["description"].is_null());
    }
}
