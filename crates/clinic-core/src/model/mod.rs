//! Row types mirrored from the remote store.
//!
//! Field names are wire-level: they serialize to exactly the column names
//! the hosted database exposes. Enumerations serialize to their display
//! strings ("In Progress", "Lab Result", ...).

use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod appointment;
mod intake;
mod patient;
mod record;
mod report;

pub use appointment::{Appointment, NewAppointment};
pub use intake::{NewEmergencyContact, NewPatientAddress, NewPatientLifestyle};
pub use patient::{age_on, format_phone, generate_patient_code, NewPatient, Patient, PatientOption, PatientRef};
pub use record::{MedicalRecord, NewMedicalRecord};
pub use report::{NewReport, Report};

/// A string that does not name any variant of an enumeration.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("`{value}` is not a valid {kind}")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

/// Declares a closed enumeration whose wire form is a fixed string.
///
/// Parsing is case-insensitive so lowercase select values still resolve.
macro_rules! wire_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $wire:tt),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
        pub enum $name {
            $(
                #[serde(rename = $wire)]
                #[display(fmt = $wire)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = UnknownVariant;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| UnknownVariant {
                        kind: stringify!($name),
                        value: s.to_string(),
                    })
            }
        }
    };
}

wire_enum!(
    /// Patient gender as stored in `patients.gender`
    Gender {
        Male => "Male",
        Female => "Female",
        Other => "Other",
    }
);

wire_enum!(
    MaritalStatus {
        Single => "Single",
        Married => "Married",
        Divorced => "Divorced",
        Widowed => "Widowed",
        Separated => "Separated",
    }
);

wire_enum!(
    /// Appointment lifecycle; new appointments start as `Scheduled`
    AppointmentStatus {
        Scheduled => "Scheduled",
        Confirmed => "Confirmed",
        InProgress => "In Progress",
        Completed => "Completed",
        Cancelled => "Cancelled",
        NoShow => "No Show",
    }
);

wire_enum!(
    RecordType {
        Consultation => "Consultation",
        LabResult => "Lab Result",
        Imaging => "Imaging",
        Treatment => "Treatment",
        Prescription => "Prescription",
        Referral => "Referral",
    }
);

wire_enum!(
    SmokingStatus {
        Never => "Never",
        Former => "Former",
        Current => "Current",
    }
);

wire_enum!(
    AlcoholConsumption {
        Never => "Never",
        Occasionally => "Occasionally",
        Regularly => "Regularly",
        Heavily => "Heavily",
    }
);

wire_enum!(
    ExerciseFrequency {
        Never => "Never",
        Rarely => "Rarely",
        Weekly => "Weekly",
        Daily => "Daily",
    }
);

impl Default for AppointmentStatus {
    fn default() -> Self {
        AppointmentStatus::Scheduled
    }
}

const NEUTRAL_BADGE: &str = "bg-gray-100 text-gray-800";

impl AppointmentStatus {
    pub fn badge_class(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "bg-blue-100 text-blue-800",
            AppointmentStatus::Confirmed => "bg-green-100 text-green-800",
            AppointmentStatus::InProgress => "bg-yellow-100 text-yellow-800",
            AppointmentStatus::Completed => NEUTRAL_BADGE,
            AppointmentStatus::Cancelled => "bg-red-100 text-red-800",
            AppointmentStatus::NoShow => "bg-orange-100 text-orange-800",
        }
    }
}

impl RecordType {
    pub fn badge_class(&self) -> &'static str {
        match self {
            RecordType::Consultation => "bg-blue-100 text-blue-800",
            RecordType::LabResult => "bg-green-100 text-green-800",
            RecordType::Imaging => "bg-purple-100 text-purple-800",
            RecordType::Treatment => "bg-orange-100 text-orange-800",
            RecordType::Prescription => "bg-pink-100 text-pink-800",
            RecordType::Referral => "bg-indigo-100 text-indigo-800",
        }
    }
}

/// Maps an optional form value to the store's "absent" sentinel.
///
/// Empty strings become `None` so they serialize as JSON `null`, never `""`.
pub fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
