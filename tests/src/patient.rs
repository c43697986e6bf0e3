//! Add-Patient Form Tests
//!
//! Tests for field rules, optional-field handling and business codes.

use clinic_core::forms::PatientFormValues;

/// A form filled in the way the front desk usually does
pub fn front_desk_values() -> PatientFormValues {
    PatientFormValues {
        first_name: "Raisa".to_string(),
        middle_name: String::new(),
        last_name: "Anggiani".to_string(),
        date_of_birth: "1990-06-15".to_string(),
        gender: "Female".to_string(),
        email: "raisa@example.com".to_string(),
        primary_phone: "08123456789".to_string(),
        secondary_phone: String::new(),
        national_id: String::new(),
        marital_status: "Single".to_string(),
        preferred_language: "English".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::model::generate_patient_code;
    use clinic_core::{AddPatientForm, EntryForm, Gender, MaritalStatus};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_front_desk_form_is_valid() {
        let row = AddPatientForm::prepare(&front_desk_values()).unwrap();
        assert_eq!(row.first_name, "Raisa");
        assert_eq!(row.gender, Gender::Female);
        assert_eq!(row.marital_status, Some(MaritalStatus::Single));
        assert_eq!(row.preferred_language.as_deref(), Some("English"));
    }

    #[test]
    fn test_blank_optionals_become_null() {
        let row = AddPatientForm::prepare(&front_desk_values()).unwrap();
        assert_eq!(row.middle_name, None);
        assert_eq!(row.secondary_phone, None);
        assert_eq!(row.national_id, None);
    }

    #[test]
    fn test_generated_code_shape() {
        let row = AddPatientForm::prepare(&front_desk_values()).unwrap();
        assert!(row.patient_id.starts_with("PAT"));
        assert_eq!(row.patient_id.len(), 12);
        assert!(row.patient_id[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_code_uses_timestamp_tail() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let code = generate_patient_code(1_720_000_123_456, &mut rng);
            assert!(code.starts_with("PAT123456"));
            assert_eq!(code.len(), 12);
        }
    }

    #[test]
    fn test_blank_form_reports_every_required_field() {
        let values = PatientFormValues {
            preferred_language: String::new(),
            ..PatientFormValues::default()
        };
        let errors = AddPatientForm::validate(&values);
        for field in ["first_name", "last_name", "date_of_birth", "gender", "primary_phone"] {
            assert!(errors.message_for(field).is_some(), "no error for {}", field);
        }
        assert!(errors.message_for("email").is_none());
    }

    #[test]
    fn test_short_names_rejected() {
        let values = PatientFormValues {
            first_name: "R".to_string(),
            ..front_desk_values()
        };
        let errors = AddPatientForm::validate(&values);
        assert_eq!(
            errors.message_for("first_name"),
            Some("First name must be at least 2 characters")
        );
        assert_eq!(errors.errors.len(), 1);
    }

    #[test]
    fn test_short_phone_rejected() {
        let values = PatientFormValues {
            primary_phone: "0812".to_string(),
            ..front_desk_values()
        };
        assert_eq!(
            AddPatientForm::validate(&values).message_for("primary_phone"),
            Some("Phone number must be at least 10 digits")
        );
    }

    #[test]
    fn test_bad_email_rejected() {
        let values = PatientFormValues {
            email: "raisa@".to_string(),
            ..front_desk_values()
        };
        assert_eq!(
            AddPatientForm::validate(&values).message_for("email"),
            Some("Invalid email address")
        );
    }

    #[test]
    fn test_gender_choice() {
        let lower = PatientFormValues {
            gender: "male".to_string(),
            ..front_desk_values()
        };
        assert_eq!(AddPatientForm::prepare(&lower).unwrap().gender, Gender::Male);

        let unknown = PatientFormValues {
            gender: "Unknown".to_string(),
            ..front_desk_values()
        };
        assert_eq!(
            AddPatientForm::validate(&unknown).message_for("gender"),
            Some("Gender must be Male, Female or Other")
        );
    }

    #[test]
    fn test_impossible_birth_date_rejected() {
        let values = PatientFormValues {
            date_of_birth: "1990-02-30".to_string(),
            ..front_desk_values()
        };
        assert!(AddPatientForm::validate(&values)
            .message_for("date_of_birth")
            .is_some());
    }
}
