use super::EntryForm;
use crate::model::{non_empty, AppointmentStatus, NewAppointment};
use crate::store::tables;
use crate::validation::{validate_required, ValidationResult};

/// Raw add-appointment input
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppointmentFormValues {
    /// `patients.id` chosen in the picker
    pub patient_id: String,
    pub appointment_date: String,
    pub appointment_time: String,
    pub appointment_case: String,
    pub provider_name: String,
    pub notes: String,
}

pub struct AddAppointmentForm;

impl EntryForm for AddAppointmentForm {
    type Values = AppointmentFormValues;
    type Row = NewAppointment;

    const TABLE: &'static str = tables::APPOINTMENTS;
    const SUCCESS_MESSAGE: &'static str = "Appointment scheduled successfully!";
    const FAILURE_MESSAGE: &'static str = "Failed to schedule appointment. Please try again.";

    fn prepare(values: &AppointmentFormValues) -> Result<NewAppointment, ValidationResult> {
        let mut result = ValidationResult::new();
        result.merge(validate_required(&values.patient_id, "patient_id", "Patient is required"));
        result.merge(validate_required(
            &values.appointment_date,
            "appointment_date",
            "Appointment date is required",
        ));
        result.merge(validate_required(
            &values.appointment_time,
            "appointment_time",
            "Appointment time is required",
        ));
        result.merge(validate_required(
            &values.appointment_case,
            "appointment_case",
            "Appointment case is required",
        ));
        result.into_result()?;

        Ok(NewAppointment {
            patient_id: values.patient_id.clone(),
            appointment_date: values.appointment_date.clone(),
            appointment_time: values.appointment_time.clone(),
            appointment_case: values.appointment_case.clone(),
            provider_name: non_empty(&values.provider_name),
            notes: non_empty(&values.notes),
            status: AppointmentStatus::Scheduled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let errors = AddAppointmentForm::validate(&AppointmentFormValues::default());
        assert_eq!(errors.errors.len(), 4);
        assert_eq!(errors.message_for("patient_id"), Some("Patient is required"));
        assert_eq!(
            errors.message_for("appointment_case"),
            Some("Appointment case is required")
        );
    }

    #[test]
    fn test_row_is_scheduled_with_null_optionals() {
        let row = AddAppointmentForm::prepare(&AppointmentFormValues {
            patient_id: "p1".to_string(),
            appointment_date: "2024-07-01".to_string(),
            appointment_time: "09:30".to_string(),
            appointment_case: "Fever".to_string(),
            ..AppointmentFormValues::default()
        })
        .unwrap();
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["status"], "Scheduled");
        assert!(json["notes"].is_null());
        assert!(json["provider_name"].is_null());
    }
}
