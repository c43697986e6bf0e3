//! Registration Wizard Tests
//!
//! Randomized drafts pushed through the full six-step flow against the
//! in-memory store.

use clinic_core::{DraftField, RegistrationWizard, WizardStep};
use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &["Raisa", "Keisya", "Budi", "Siti", "Agus", "Dewi"];
const LAST_NAMES: &[&str] = &["Anggiani", "Korieen", "Santoso", "Rahayu", "Wijaya"];
const GENDERS: &[&str] = &["Male", "Female", "Other"];
const CITIES: &[&str] = &["Bandung", "Jakarta", "Surabaya", "Medan"];

/// Fill one step's worth of fields with plausible values
fn fill_step<R: Rng>(wizard: &mut RegistrationWizard, rng: &mut R, step: WizardStep) {
    let pick = |rng: &mut R, options: &[&str]| options.choose(rng).copied().unwrap_or("").to_string();
    for field in DraftField::on_step(step) {
        let value = match field {
            DraftField::PatientCode | DraftField::MiddleName | DraftField::NationalId => String::new(),
            DraftField::FirstName | DraftField::EmergencyName => pick(rng, FIRST_NAMES),
            DraftField::LastName => pick(rng, LAST_NAMES),
            DraftField::DateOfBirth => format!(
                "{}-{:02}-{:02}",
                rng.gen_range(1940..2020),
                rng.gen_range(1..=12),
                rng.gen_range(1..=28)
            ),
            DraftField::Gender => pick(rng, GENDERS),
            DraftField::MaritalStatus => pick(rng, &["Single", "Married", "Widowed"]),
            DraftField::PreferredLanguage => "English".to_string(),
            DraftField::Email | DraftField::EmergencyEmail => {
                format!("patient{}@example.com", rng.gen_range(0..10_000))
            }
            DraftField::PrimaryPhone | DraftField::SecondaryPhone | DraftField::EmergencyPhone => {
                format!("0812{:07}", rng.gen_range(0..10_000_000))
            }
            DraftField::City => pick(rng, CITIES),
            DraftField::ZipCode => format!("{:05}", rng.gen_range(10_000..99_999)),
            DraftField::Country => "Indonesia".to_string(),
            DraftField::SmokingStatus => pick(rng, &["Never", "Former", "Current"]),
            DraftField::AlcoholConsumption => pick(rng, &["Never", "Occasionally"]),
            DraftField::ExerciseHabits => pick(rng, &["Rarely", "Weekly", "Daily"]),
            DraftField::PreferredDate => format!("2026-11-{:02}", rng.gen_range(1..=28)),
            DraftField::PreferredTime => format!("{:02}:00", rng.gen_range(8..17)),
            other => format!("{} {}", other.label(), rng.gen_range(0..100)),
        };
        wizard.set_field(field, value);
    }
}

/// Walk the wizard to the last step, filling only the steps in `filled`
pub fn random_wizard<R: Rng>(rng: &mut R, filled: &[WizardStep]) -> RegistrationWizard {
    let mut wizard = RegistrationWizard::new();
    loop {
        let step = wizard.step();
        if filled.contains(&step) {
            fill_step(&mut wizard, rng, step);
        }
        if step.is_final() {
            return wizard;
        }
        wizard.next();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clinic_core::store::tables;
    use clinic_core::wizard::{IntakeStep, FAILURE_MESSAGE, SUCCESS_MESSAGE};
    use clinic_core::{MemoryStore, ToastKind, ToastQueue, WizardError};
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_complete_drafts_write_every_table() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let store = MemoryStore::signed_in("staff-1");
            let toasts = ToastQueue::new();
            let wizard = random_wizard(&mut rng, &WizardStep::ALL);

            let outcome = block_on(wizard.submit(&store, &toasts)).unwrap();
            let steps: Vec<IntakeStep> = outcome.created.iter().map(|c| c.step).collect();
            assert_eq!(
                steps,
                vec![
                    IntakeStep::Patient,
                    IntakeStep::Address,
                    IntakeStep::EmergencyContact,
                    IntakeStep::Lifestyle,
                    IntakeStep::MedicalHistory,
                    IntakeStep::Appointment,
                ]
            );
            let patients = store.rows(tables::PATIENTS);
            assert_eq!(patients.len(), 1);
            assert_eq!(patients[0]["patient_id"], outcome.patient_code.as_str());
            assert_eq!(toasts.last().map(|t| t.message), Some(SUCCESS_MESSAGE.to_string()));
        }
    }

    #[test]
    fn test_personal_only_draft_writes_patient_only() {
        let mut rng = StdRng::seed_from_u64(3);
        let store = MemoryStore::signed_in("staff-1");
        let wizard = random_wizard(&mut rng, &[WizardStep::Personal]);

        let outcome = block_on(wizard.submit(&store, &ToastQueue::new())).unwrap();
        assert_eq!(outcome.created.len(), 1);
        assert_eq!(store.insert_count(), 1);
        assert!(store.rows(tables::PATIENT_ADDRESSES).is_empty());
        assert!(store.rows(tables::APPOINTMENTS).is_empty());
    }

    #[test]
    fn test_typed_code_is_kept() {
        let mut rng = StdRng::seed_from_u64(9);
        let store = MemoryStore::signed_in("staff-1");
        let mut wizard = random_wizard(&mut rng, &[WizardStep::Personal]);
        wizard.set_field(DraftField::PatientCode, "PAT000000777");

        let outcome = block_on(wizard.submit(&store, &ToastQueue::new())).unwrap();
        assert_eq!(outcome.patient_code, "PAT000000777");
    }

    #[test]
    fn test_failed_insert_stops_the_sequence() {
        let mut rng = StdRng::seed_from_u64(11);
        let store = MemoryStore::signed_in("staff-1");
        store.fail_table(tables::EMERGENCY_CONTACTS, "contacts offline");
        let toasts = ToastQueue::new();
        let wizard = random_wizard(&mut rng, &WizardStep::ALL);

        match block_on(wizard.submit(&store, &toasts)) {
            Err(WizardError::Partial {
                created,
                failed_step,
                ..
            }) => {
                assert_eq!(failed_step, IntakeStep::EmergencyContact);
                let steps: Vec<IntakeStep> = created.iter().map(|c| c.step).collect();
                assert_eq!(steps, vec![IntakeStep::Patient, IntakeStep::Address]);
            }
            other => panic!("expected a partial registration, got {:?}", other),
        }
        assert!(store.rows(tables::PATIENT_LIFESTYLE).is_empty());
        let last = toasts.last().unwrap();
        assert_eq!(last.kind, ToastKind::Error);
        assert_eq!(last.message, FAILURE_MESSAGE);
    }

    #[test]
    fn test_missing_personal_details_write_nothing() {
        let mut rng = StdRng::seed_from_u64(5);
        let store = MemoryStore::signed_in("staff-1");
        let wizard = random_wizard(&mut rng, &[WizardStep::Address, WizardStep::Appointment]);

        match block_on(wizard.submit(&store, &ToastQueue::new())) {
            Err(WizardError::Validation(errors)) => {
                assert!(errors.message_for("first_name").is_some());
            }
            other => panic!("expected validation errors, got {:?}", other),
        }
        assert_eq!(store.insert_count(), 0);
    }

    #[test]
    fn test_history_summary_lists_filled_fields() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut wizard = random_wizard(&mut rng, &[WizardStep::Personal]);
        wizard.set_field(DraftField::KnownAllergies, "Penicillin");
        wizard.set_field(DraftField::CurrentSymptoms, "Headache");

        assert_eq!(
            wizard.draft().history_summary(),
            "Known Allergies: Penicillin\nCurrent Symptoms or Reason for Visit: Headache"
        );
    }

    #[test]
    fn test_walk_keeps_every_value() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut wizard = random_wizard(&mut rng, &WizardStep::ALL);
        let before = wizard.draft().clone();
        for _ in 0..10 {
            wizard.previous();
        }
        assert_eq!(wizard.step(), WizardStep::Personal);
        assert_eq!(wizard.draft(), &before);
    }
}
