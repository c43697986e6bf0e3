//! Six-step patient registration wizard.
//!
//! The wizard is a step counter over one immutable [`RegistrationDraft`].
//! Every input on every step goes through the same single-field update,
//! which produces a new draft; nothing is cleared when moving between steps.

use std::fmt;

mod submit;

pub use submit::{
    CreatedRow, IntakeStep, RegistrationOutcome, FAILURE_MESSAGE, INTAKE_RECORD_TITLE, SUCCESS_MESSAGE,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    Personal = 1,
    Address = 2,
    EmergencyContact = 3,
    MedicalHistory = 4,
    Lifestyle = 5,
    Appointment = 6,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::Personal,
        WizardStep::Address,
        WizardStep::EmergencyContact,
        WizardStep::MedicalHistory,
        WizardStep::Lifestyle,
        WizardStep::Appointment,
    ];

    pub const COUNT: u8 = 6;

    /// 1-based position
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Personal => "Personal Information",
            WizardStep::Address => "Address Information",
            WizardStep::EmergencyContact => "Emergency Contact",
            WizardStep::MedicalHistory => "Medical History",
            WizardStep::Lifestyle => "Lifestyle Information",
            WizardStep::Appointment => "Appointment",
        }
    }

    pub fn is_final(self) -> bool {
        self == WizardStep::Appointment
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Declares the draft struct and its field enum from one table.
///
/// Each entry is `Variant => struct_field, "Label"`, grouped by the step
/// that collects it.
macro_rules! draft_fields {
    ($($step:ident { $($variant:ident => $field:ident, $label:literal;)+ })+) => {
        /// One input of the registration wizard
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum DraftField {
            $($($variant,)+)+
        }

        /// Everything typed into the wizard so far.
        ///
        /// Immutable: [`RegistrationDraft::with_field`] returns a new draft.
        #[derive(Clone, Debug, Default, PartialEq, Eq)]
        pub struct RegistrationDraft {
            $($($field: String,)+)+
        }

        impl DraftField {
            pub const ALL: &'static [DraftField] = &[$($(DraftField::$variant,)+)+];

            pub fn label(self) -> &'static str {
                match self {
                    $($(DraftField::$variant => $label,)+)+
                }
            }

            /// The step whose screen collects this field
            pub fn step(self) -> WizardStep {
                match self {
                    $($(DraftField::$variant => WizardStep::$step,)+)+
                }
            }
        }

        impl RegistrationDraft {
            pub fn get(&self, field: DraftField) -> &str {
                match field {
                    $($(DraftField::$variant => &self.$field,)+)+
                }
            }

            /// A copy of this draft with exactly one field replaced
            #[must_use]
            pub fn with_field(&self, field: DraftField, value: impl Into<String>) -> Self {
                let mut next = self.clone();
                let value = value.into();
                match field {
                    $($(DraftField::$variant => next.$field = value,)+)+
                }
                next
            }
        }
    };
}

draft_fields! {
    Personal {
        PatientCode => patient_code, "Patient ID";
        FirstName => first_name, "First Name";
        MiddleName => middle_name, "Middle Name";
        LastName => last_name, "Last Name";
        DateOfBirth => date_of_birth, "Date of Birth";
        Gender => gender, "Gender";
        NationalId => national_id, "National ID";
        MaritalStatus => marital_status, "Marital Status";
        PreferredLanguage => preferred_language, "Preferred Language";
        Email => email, "Email Address";
        PrimaryPhone => primary_phone, "Primary Phone";
        SecondaryPhone => secondary_phone, "Secondary/Mobile Phone";
    }
    Address {
        StreetAddress => street_address, "Street Address";
        City => city, "City";
        State => state, "State/Province";
        ZipCode => zip_code, "ZIP/Postal Code";
        Country => country, "Country";
    }
    EmergencyContact {
        EmergencyName => emergency_name, "Contact Name";
        EmergencyRelationship => emergency_relationship, "Relationship to Patient";
        EmergencyPhone => emergency_phone, "Phone Number";
        EmergencyEmail => emergency_email, "Email Address";
        EmergencyAddress => emergency_address, "Address";
    }
    MedicalHistory {
        CurrentMedications => current_medications, "Current Medications";
        KnownAllergies => known_allergies, "Known Allergies";
        PreviousSurgeries => previous_surgeries, "Previous Surgeries";
        ChronicConditions => chronic_conditions, "Chronic Conditions";
        FamilyHistory => family_history, "Family Medical History";
        CurrentSymptoms => current_symptoms, "Current Symptoms or Reason for Visit";
        PreviousProviders => previous_providers, "Previous Healthcare Providers";
    }
    Lifestyle {
        Occupation => occupation, "Occupation";
        SmokingStatus => smoking_status, "Smoking Status";
        AlcoholConsumption => alcohol_consumption, "Alcohol Consumption";
        ExerciseHabits => exercise_habits, "Exercise Habits";
        DietaryRestrictions => dietary_restrictions, "Dietary Restrictions";
    }
    Appointment {
        PreferredDate => preferred_date, "Preferred Appointment Date";
        PreferredTime => preferred_time, "Preferred Time";
        AppointmentCase => appointment_case, "Appointment Case/Reason";
    }
}

impl DraftField {
    /// Fields shown on `step`, in screen order
    pub fn on_step(step: WizardStep) -> impl Iterator<Item = DraftField> {
        Self::ALL.iter().copied().filter(move |f| f.step() == step)
    }
}

impl RegistrationDraft {
    /// True when every listed field has a non-empty value
    pub fn has_all(&self, fields: &[DraftField]) -> bool {
        fields.iter().all(|f| !self.get(*f).is_empty())
    }

    /// True when at least one listed field has a non-empty value
    pub fn has_any(&self, fields: &[DraftField]) -> bool {
        fields.iter().any(|f| !self.get(*f).is_empty())
    }
}

/// Step counter plus the current draft
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationWizard {
    step: WizardStep,
    draft: RegistrationDraft,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self {
            step: WizardStep::Personal,
            draft: RegistrationDraft::default(),
        }
    }
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &RegistrationDraft {
        &self.draft
    }

    /// Advance one step; no-op on the last step. There is no validation gate.
    pub fn next(&mut self) {
        if let Some(step) = WizardStep::from_number(self.step.number() + 1) {
            self.step = step;
        }
    }

    /// Go back one step; no-op on the first step
    pub fn previous(&mut self) {
        if let Some(step) = WizardStep::from_number(self.step.number() - 1) {
            self.step = step;
        }
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft = self.draft.with_field(field, value);
    }

    /// Whole-number share of the steps reached, 16 on step 1 and 100 on step 6
    pub fn progress_percent(&self) -> u8 {
        let percent = u16::from(self.step.number()) * 100 / u16::from(WizardStep::COUNT);
        u8::try_from(percent).unwrap_or(100)
    }

    pub fn can_submit(&self) -> bool {
        self.step.is_final()
    }

    /// Start over with a blank draft at step 1
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
