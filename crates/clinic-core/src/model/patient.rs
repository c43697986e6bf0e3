use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{Gender, MaritalStatus};
use crate::validation::parse_date;

/// Patient row from `patients`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Internal row key assigned by the store
    pub id: String,
    /// Human-readable business code (PAT + 9 digits), never edited
    pub patient_id: String,
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    /// Date of birth (YYYY-MM-DD format)
    pub date_of_birth: String,
    pub gender: Gender,
    #[serde(default)]
    pub email: Option<String>,
    pub primary_phone: String,
    #[serde(default)]
    pub secondary_phone: Option<String>,
    #[serde(default)]
    pub national_id: Option<String>,
    #[serde(default)]
    pub marital_status: Option<MaritalStatus>,
    #[serde(default)]
    pub preferred_language: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Patient {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Name including the middle name when one is on file
    pub fn display_name(&self) -> String {
        match self.middle_name.as_deref() {
            Some(middle) if !middle.is_empty() => {
                format!("{} {} {}", self.first_name, middle, self.last_name)
            }
            _ => self.full_name(),
        }
    }

    /// Age in whole years on `today`, if the stored date of birth parses
    pub fn age_on(&self, today: NaiveDate) -> Option<i32> {
        parse_date(&self.date_of_birth).map(|dob| age_on(dob, today))
    }
}

/// Patient columns embedded into appointment and medical-record rows
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PatientRef {
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub primary_phone: Option<String>,
}

impl PatientRef {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Lightweight picker row: id plus display name only
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PatientOption {
    pub id: String,
    pub patient_id: String,
    pub first_name: String,
    pub last_name: String,
}

impl PatientOption {
    pub fn label(&self) -> String {
        format!("{} {} ({})", self.first_name, self.last_name, self.patient_id)
    }
}

/// Insert payload for `patients`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub patient_id: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub email: Option<String>,
    pub primary_phone: String,
    pub secondary_phone: Option<String>,
    pub national_id: Option<String>,
    pub marital_status: Option<MaritalStatus>,
    pub preferred_language: Option<String>,
}

/// Generate a business code: `PAT` + last 6 digits of the millisecond
/// timestamp + 3 zero-padded random digits.
pub fn generate_patient_code<R: Rng + ?Sized>(now_millis: i64, rng: &mut R) -> String {
    let timestamp = now_millis.to_string();
    let tail = &timestamp[timestamp.len().saturating_sub(6)..];
    let suffix: u16 = rng.gen_range(0..1000);
    format!("PAT{}{:03}", tail, suffix)
}

/// Whole years between `dob` and `today`, one less if the birthday is still ahead
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Render an 11-digit number as `+D (DDD) DDD-DDDD`; anything else unchanged
pub fn format_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.len() != 11 {
        return phone.to_string();
    }
    format!(
        "+{} ({}) {}-{}",
        &digits[0..1],
        &digits[1..4],
        &digits[4..7],
        &digits[7..11]
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_patient_code_shape() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = generate_patient_code(1_718_000_123_456, &mut rng);
        assert!(code.starts_with("PAT123456"));
        assert_eq!(code.len(), 12);
        assert!(code[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_patient_code_short_timestamp() {
        let mut rng = StdRng::seed_from_u64(7);
        let code = generate_patient_code(42, &mut rng);
        assert!(code.starts_with("PAT42"));
        assert_eq!(code.len(), 8);
    }

    #[test]
    fn test_age_before_and_after_birthday() {
        let dob = date("1990-06-15");
        assert_eq!(age_on(dob, date("2024-06-14")), 33);
        assert_eq!(age_on(dob, date("2024-06-15")), 34);
        assert_eq!(age_on(dob, date("2024-12-01")), 34);
    }

    #[test]
    fn test_format_phone() {
        assert_eq!(format_phone("15551234567"), "+1 (555) 123-4567");
        assert_eq!(format_phone("+1-555-123-4567"), "+1 (555) 123-4567");
        assert_eq!(format_phone("0812345678"), "0812345678");
    }

    #[test]
    fn test_patient_decodes_with_nulls() {
        let row = serde_json::json!({
            "id": "b7e2",
            "patient_id": "PAT123456001",
            "first_name": "Raisa",
            "middle_name": null,
            "last_name": "Anggiani",
            "date_of_birth": "1995-03-02",
            "gender": "Female",
            "email": null,
            "primary_phone": "081234567890",
            "marital_status": "Single",
            "created_at": "2024-05-01T08:30:00.000000+00:00"
        });
        let patient: Patient = serde_json::from_value(row).unwrap();
        assert_eq!(patient.display_name(), "Raisa Anggiani");
        assert_eq!(patient.marital_status, Some(MaritalStatus::Single));
        assert!(patient.created_at.is_some());
        assert_eq!(patient.age_on(date("2025-03-02")), Some(30));
    }
}
