use chrono::{Local, Utc};
use derive_more::Display;
use serde::Serialize;
use tracing::{error, info, warn};

use super::{DraftField, RegistrationDraft, RegistrationWizard};
use crate::error::{StoreError, WizardError};
use crate::forms::{AddPatientForm, PatientFormValues};
use crate::model::{
    generate_patient_code, non_empty, AppointmentStatus, NewAppointment, NewEmergencyContact,
    NewMedicalRecord, NewPatientAddress, NewPatientLifestyle, RecordType,
};
use crate::notify::{Notifier, Toast};
use crate::store::{insert_as, row_id, tables, RemoteStore};

/// One insert in the registration sequence, in the order they run
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum IntakeStep {
    #[display(fmt = "patient")]
    Patient,
    #[display(fmt = "address")]
    Address,
    #[display(fmt = "emergency contact")]
    EmergencyContact,
    #[display(fmt = "lifestyle")]
    Lifestyle,
    #[display(fmt = "medical history")]
    MedicalHistory,
    #[display(fmt = "appointment")]
    Appointment,
}

impl IntakeStep {
    pub fn table(self) -> &'static str {
        match self {
            IntakeStep::Patient => tables::PATIENTS,
            IntakeStep::Address => tables::PATIENT_ADDRESSES,
            IntakeStep::EmergencyContact => tables::EMERGENCY_CONTACTS,
            IntakeStep::Lifestyle => tables::PATIENT_LIFESTYLE,
            IntakeStep::MedicalHistory => tables::MEDICAL_RECORDS,
            IntakeStep::Appointment => tables::APPOINTMENTS,
        }
    }
}

/// A row written by a registration, identified by its store id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreatedRow {
    pub step: IntakeStep,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationOutcome {
    /// Business code of the new patient
    pub patient_code: String,
    pub created: Vec<CreatedRow>,
}

pub const INTAKE_RECORD_TITLE: &str = "Registration intake";
pub const SUCCESS_MESSAGE: &str = "Patient registered successfully!";
pub const FAILURE_MESSAGE: &str = "Registration was only partially saved. Please complete it manually.";

const ADDRESS_FIELDS: &[DraftField] = &[
    DraftField::StreetAddress,
    DraftField::City,
    DraftField::State,
    DraftField::ZipCode,
];
const CONTACT_FIELDS: &[DraftField] = &[
    DraftField::EmergencyName,
    DraftField::EmergencyRelationship,
    DraftField::EmergencyPhone,
];
const LIFESTYLE_FIELDS: &[DraftField] = &[
    DraftField::Occupation,
    DraftField::SmokingStatus,
    DraftField::AlcoholConsumption,
    DraftField::ExerciseHabits,
    DraftField::DietaryRestrictions,
];
const HISTORY_FIELDS: &[DraftField] = &[
    DraftField::CurrentMedications,
    DraftField::KnownAllergies,
    DraftField::PreviousSurgeries,
    DraftField::ChronicConditions,
    DraftField::FamilyHistory,
    DraftField::CurrentSymptoms,
    DraftField::PreviousProviders,
];
const APPOINTMENT_FIELDS: &[DraftField] = &[
    DraftField::PreferredDate,
    DraftField::PreferredTime,
    DraftField::AppointmentCase,
];

impl RegistrationDraft {
    /// The subset of the draft that becomes the `patients` row
    pub fn patient_values(&self) -> PatientFormValues {
        PatientFormValues {
            first_name: self.get(DraftField::FirstName).to_string(),
            middle_name: self.get(DraftField::MiddleName).to_string(),
            last_name: self.get(DraftField::LastName).to_string(),
            date_of_birth: self.get(DraftField::DateOfBirth).to_string(),
            gender: self.get(DraftField::Gender).to_string(),
            email: self.get(DraftField::Email).to_string(),
            primary_phone: self.get(DraftField::PrimaryPhone).to_string(),
            secondary_phone: self.get(DraftField::SecondaryPhone).to_string(),
            national_id: self.get(DraftField::NationalId).to_string(),
            marital_status: self.get(DraftField::MaritalStatus).to_string(),
            preferred_language: self.get(DraftField::PreferredLanguage).to_string(),
        }
    }

    /// "Label: value" lines for every non-empty medical-history field
    pub fn history_summary(&self) -> String {
        HISTORY_FIELDS
            .iter()
            .filter(|f| !self.get(**f).is_empty())
            .map(|f| format!("{}: {}", f.label(), self.get(*f)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn optional(&self, field: DraftField) -> Option<String> {
        non_empty(self.get(field))
    }

    /// Parse an optional enumerated field, dropping values that don't parse
    fn choice<T: std::str::FromStr>(&self, field: DraftField) -> Option<T> {
        let raw = self.get(field);
        if raw.is_empty() {
            return None;
        }
        let parsed = raw.parse().ok();
        if parsed.is_none() {
            warn!(field = field.label(), value = raw, "dropping unrecognised choice");
        }
        parsed
    }
}

/// Insert sequence state: what has been written so far
struct Intake<'a> {
    store: &'a dyn RemoteStore,
    created: Vec<CreatedRow>,
}

impl Intake<'_> {
    async fn insert<T: Serialize>(&mut self, step: IntakeStep, row: &T) -> Result<String, StoreError> {
        let stored = insert_as(self.store, step.table(), row).await?;
        let id = row_id(&stored).ok_or_else(|| StoreError::Rejected {
            table: step.table().to_string(),
            reason: "no id returned".to_string(),
        })?;
        self.created.push(CreatedRow { step, id: id.clone() });
        Ok(id)
    }
}

impl RegistrationWizard {
    /// Persist the draft. Only allowed on the final step.
    ///
    /// Inserts run one after another with no transaction: the patient first,
    /// then address, emergency contact, lifestyle, medical history and
    /// appointment, each only when its fields were filled in. The first
    /// failing insert stops the sequence and is reported with everything
    /// created before it.
    pub async fn submit(
        &self,
        store: &dyn RemoteStore,
        notifier: &dyn Notifier,
    ) -> Result<RegistrationOutcome, WizardError> {
        if !self.can_submit() {
            return Err(WizardError::NotOnFinalStep(self.step().number()));
        }
        let draft = self.draft();

        let patient_code = match draft.optional(DraftField::PatientCode) {
            Some(code) => code,
            None => generate_patient_code(Utc::now().timestamp_millis(), &mut rand::thread_rng()),
        };
        let patient = AddPatientForm::prepare_with_code(&draft.patient_values(), patient_code.clone())
            .map_err(WizardError::Validation)?;

        let mut intake = Intake {
            store,
            created: Vec::new(),
        };
        match persist(&mut intake, draft, &patient).await {
            Ok(()) => {
                info!(patient_code = %patient_code, rows = intake.created.len(), "registration saved");
                notifier.notify(Toast::success(SUCCESS_MESSAGE));
                Ok(RegistrationOutcome {
                    patient_code,
                    created: intake.created,
                })
            }
            Err((failed_step, source)) => {
                error!(step = %failed_step, error = %source, "registration stopped");
                notifier.notify(Toast::error(FAILURE_MESSAGE));
                Err(WizardError::Partial {
                    created: intake.created,
                    failed_step,
                    source,
                })
            }
        }
    }
}

async fn persist<P: Serialize>(
    intake: &mut Intake<'_>,
    draft: &RegistrationDraft,
    patient: &P,
) -> Result<(), (IntakeStep, StoreError)> {
    let patient_id = intake
        .insert(IntakeStep::Patient, patient)
        .await
        .map_err(|e| (IntakeStep::Patient, e))?;

    if draft.has_all(ADDRESS_FIELDS) {
        let row = NewPatientAddress {
            patient_id: patient_id.clone(),
            street_address: draft.get(DraftField::StreetAddress).to_string(),
            city: draft.get(DraftField::City).to_string(),
            state_province: draft.get(DraftField::State).to_string(),
            zip_postal_code: draft.get(DraftField::ZipCode).to_string(),
            country: draft.optional(DraftField::Country),
        };
        intake
            .insert(IntakeStep::Address, &row)
            .await
            .map_err(|e| (IntakeStep::Address, e))?;
    }

    if draft.has_all(CONTACT_FIELDS) {
        let row = NewEmergencyContact {
            patient_id: patient_id.clone(),
            contact_name: draft.get(DraftField::EmergencyName).to_string(),
            relationship: draft.get(DraftField::EmergencyRelationship).to_string(),
            phone_number: draft.get(DraftField::EmergencyPhone).to_string(),
            email: draft.optional(DraftField::EmergencyEmail),
            street_address: draft.optional(DraftField::EmergencyAddress),
        };
        intake
            .insert(IntakeStep::EmergencyContact, &row)
            .await
            .map_err(|e| (IntakeStep::EmergencyContact, e))?;
    }

    if draft.has_any(LIFESTYLE_FIELDS) {
        let row = NewPatientLifestyle {
            patient_id: patient_id.clone(),
            occupation: draft.optional(DraftField::Occupation),
            smoking_status: draft.choice(DraftField::SmokingStatus),
            alcohol_consumption: draft.choice(DraftField::AlcoholConsumption),
            exercise_habits: draft.choice(DraftField::ExerciseHabits),
            dietary_restrictions: draft.optional(DraftField::DietaryRestrictions),
        };
        intake
            .insert(IntakeStep::Lifestyle, &row)
            .await
            .map_err(|e| (IntakeStep::Lifestyle, e))?;
    }

    if draft.has_any(HISTORY_FIELDS) {
        let row = NewMedicalRecord {
            patient_id: patient_id.clone(),
            appointment_id: None,
            record_type: RecordType::Consultation,
            title: INTAKE_RECORD_TITLE.to_string(),
            description: Some(draft.history_summary()),
            provider_name: None,
            record_date: Local::now().date_naive().format("%Y-%m-%d").to_string(),
        };
        intake
            .insert(IntakeStep::MedicalHistory, &row)
            .await
            .map_err(|e| (IntakeStep::MedicalHistory, e))?;
    }

    if draft.has_all(APPOINTMENT_FIELDS) {
        let row = NewAppointment {
            patient_id,
            appointment_date: draft.get(DraftField::PreferredDate).to_string(),
            appointment_time: draft.get(DraftField::PreferredTime).to_string(),
            appointment_case: draft.get(DraftField::AppointmentCase).to_string(),
            provider_name: None,
            notes: None,
            status: AppointmentStatus::Scheduled,
        };
        intake
            .insert(IntakeStep::Appointment, &row)
            .await
            .map_err(|e| (IntakeStep::Appointment, e))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_summary_lists_filled_fields() {
        let draft = RegistrationDraft::default()
            .with_field(DraftField::KnownAllergies, "Penicillin")
            .with_field(DraftField::CurrentSymptoms, "Cough");
        assert_eq!(
            draft.history_summary(),
            "Known Allergies: Penicillin\nCurrent Symptoms or Reason for Visit: Cough"
        );
    }

    #[test]
    fn test_patient_values_map_personal_fields() {
        let draft = RegistrationDraft::default()
            .with_field(DraftField::FirstName, "Raisa")
            .with_field(DraftField::Gender, "female");
        let values = draft.patient_values();
        assert_eq!(values.first_name, "Raisa");
        assert_eq!(values.gender, "female");
        assert_eq!(values.preferred_language, "");
    }

    #[test]
    fn test_unknown_choice_is_dropped() {
        let draft = RegistrationDraft::default().with_field(DraftField::SmokingStatus, "sometimes");
        assert_eq!(draft.choice::<crate::model::SmokingStatus>(DraftField::SmokingStatus), None);
    }
}
