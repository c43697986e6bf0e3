use chrono::Utc;

use super::EntryForm;
use crate::model::{generate_patient_code, non_empty, Gender, MaritalStatus, NewPatient};
use crate::store::tables;
use crate::validation::{
    parse_date, validate_min_length, validate_optional_email, validate_required,
    ValidationErrorCode, ValidationResult,
};

/// Raw add-patient input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatientFormValues {
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: String,
    pub email: String,
    pub primary_phone: String,
    pub secondary_phone: String,
    pub national_id: String,
    pub marital_status: String,
    pub preferred_language: String,
}

impl Default for PatientFormValues {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            middle_name: String::new(),
            last_name: String::new(),
            date_of_birth: String::new(),
            gender: String::new(),
            email: String::new(),
            primary_phone: String::new(),
            secondary_phone: String::new(),
            national_id: String::new(),
            marital_status: String::new(),
            preferred_language: "English".to_string(),
        }
    }
}

pub struct AddPatientForm;

impl AddPatientForm {
    /// Validate and build a `patients` row carrying the given business code
    pub fn prepare_with_code(
        values: &PatientFormValues,
        patient_code: String,
    ) -> Result<NewPatient, ValidationResult> {
        let mut result = ValidationResult::new();
        result.merge(validate_min_length(
            &values.first_name,
            2,
            "first_name",
            "First name must be at least 2 characters",
        ));
        result.merge(validate_min_length(
            &values.last_name,
            2,
            "last_name",
            "Last name must be at least 2 characters",
        ));

        let date_of_birth = validate_required(
            &values.date_of_birth,
            "date_of_birth",
            "Date of birth is required",
        );
        if date_of_birth.is_valid() && parse_date(&values.date_of_birth).is_none() {
            result.add_error(
                "date_of_birth",
                "Date of birth must be a valid date (YYYY-MM-DD)",
                ValidationErrorCode::InvalidFormat,
            );
        }
        result.merge(date_of_birth);

        let gender = if values.gender.is_empty() {
            result.add_error("gender", "Gender is required", ValidationErrorCode::Required);
            None
        } else {
            match values.gender.parse::<Gender>() {
                Ok(gender) => Some(gender),
                Err(_) => {
                    result.add_error(
                        "gender",
                        "Gender must be Male, Female or Other",
                        ValidationErrorCode::InvalidChoice,
                    );
                    None
                }
            }
        };

        result.merge(validate_optional_email(
            &values.email,
            "email",
            "Invalid email address",
        ));
        result.merge(validate_min_length(
            &values.primary_phone,
            10,
            "primary_phone",
            "Phone number must be at least 10 digits",
        ));

        let marital_status = match non_empty(&values.marital_status) {
            None => None,
            Some(raw) => match raw.parse::<MaritalStatus>() {
                Ok(status) => Some(status),
                Err(_) => {
                    result.add_error(
                        "marital_status",
                        "Invalid marital status",
                        ValidationErrorCode::InvalidChoice,
                    );
                    None
                }
            },
        };

        let gender = match gender {
            Some(gender) if result.is_valid() => gender,
            _ => return Err(result),
        };

        Ok(NewPatient {
            patient_id: patient_code,
            first_name: values.first_name.clone(),
            middle_name: non_empty(&values.middle_name),
            last_name: values.last_name.clone(),
            date_of_birth: values.date_of_birth.clone(),
            gender,
            email: non_empty(&values.email),
            primary_phone: values.primary_phone.clone(),
            secondary_phone: non_empty(&values.secondary_phone),
            national_id: non_empty(&values.national_id),
            marital_status,
            preferred_language: non_empty(&values.preferred_language),
        })
    }
}

impl EntryForm for AddPatientForm {
    type Values = PatientFormValues;
    type Row = NewPatient;

    const TABLE: &'static str = tables::PATIENTS;
    const SUCCESS_MESSAGE: &'static str = "Patient registered successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to register patient. Please try again.";

    fn prepare(values: &PatientFormValues) -> Result<NewPatient, ValidationResult> {
        let code = generate_patient_code(Utc::now().timestamp_millis(), &mut rand::thread_rng());
        Self::prepare_with_code(values, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> PatientFormValues {
        PatientFormValues {
            first_name: "Raisa".to_string(),
            last_name: "Anggiani".to_string(),
            date_of_birth: "1995-03-02".to_string(),
            gender: "Female".to_string(),
            primary_phone: "081234567890".to_string(),
            ..PatientFormValues::default()
        }
    }

    #[test]
    fn test_valid_patient_builds_row() {
        let row = AddPatientForm::prepare(&valid()).unwrap();
        assert!(row.patient_id.starts_with("PAT"));
        assert_eq!(row.patient_id.len(), 12);
        assert_eq!(row.gender, Gender::Female);
        assert_eq!(row.preferred_language.as_deref(), Some("English"));
    }

    #[test]
    fn test_optional_blanks_serialize_as_null() {
        let row = AddPatientForm::prepare_with_code(&valid(), "PAT000000000".to_string()).unwrap();
        let json = serde_json::to_value(&row).unwrap();
        assert!(json["email"].is_null());
        assert!(json["middle_name"].is_null());
        assert!(json["marital_status"].is_null());
        assert_eq!(json["gender"], "Female");
    }

    #[test]
    fn test_short_first_name() {
        let values = PatientFormValues {
            first_name: "R".to_string(),
            ..valid()
        };
        let errors = AddPatientForm::validate(&values);
        assert_eq!(
            errors.message_for("first_name"),
            Some("First name must be at least 2 characters")
        );
        assert_eq!(errors.errors.len(), 1);
    }

    #[test]
    fn test_every_rule_reported_at_once() {
        let errors = AddPatientForm::validate(&PatientFormValues {
            email: "not-an-email".to_string(),
            ..PatientFormValues::default()
        });
        assert_eq!(errors.message_for("date_of_birth"), Some("Date of birth is required"));
        assert_eq!(errors.message_for("gender"), Some("Gender is required"));
        assert_eq!(errors.message_for("email"), Some("Invalid email address"));
        assert_eq!(
            errors.message_for("primary_phone"),
            Some("Phone number must be at least 10 digits")
        );
        assert!(errors.message_for("last_name").is_some());
    }

    #[test]
    fn test_bad_choices_and_dates() {
        let errors = AddPatientForm::validate(&PatientFormValues {
            gender: "Robot".to_string(),
            marital_status: "Complicated".to_string(),
            date_of_birth: "02/03/1995".to_string(),
            ..valid()
        });
        assert_eq!(errors.errors.len(), 3);
        assert!(errors.message_for("marital_status").is_some());
    }
}
