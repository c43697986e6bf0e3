//! Report Payload Tests
//!
//! Payload builders checked against generated rows.

use clinic_core::{Appointment, MedicalRecord, Patient};
use rand::seq::SliceRandom;
use rand::Rng;
use serde_json::json;

/// `count` patients with random gender and birth year, all created on `created`
pub fn random_patients<R: Rng>(rng: &mut R, count: usize, created: &str) -> Vec<Patient> {
    (0..count)
        .map(|i| {
            let gender = ["Male", "Female", "Other"].choose(rng).copied().unwrap_or("Other");
            serde_json::from_value(json!({
                "id": format!("p{}", i),
                "patient_id": format!("PAT{:09}", i),
                "first_name": "Test",
                "last_name": format!("Patient{}", i),
                "date_of_birth": format!("{}-01-01", rng.gen_range(1950..2010)),
                "gender": gender,
                "primary_phone": "08123456789",
                "created_at": created,
            }))
            .unwrap()
        })
        .collect()
}

pub fn appointments_with(statuses: &[&str]) -> Vec<Appointment> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            serde_json::from_value(json!({
                "id": format!("a{}", i),
                "patient_id": "p0",
                "appointment_date": "2026-10-18",
                "appointment_time": "09:00",
                "appointment_case": "Checkup",
                "status": status,
            }))
            .unwrap()
        })
        .collect()
}

pub fn records_with(types: &[&str]) -> Vec<MedicalRecord> {
    types
        .iter()
        .enumerate()
        .map(|(i, record_type)| {
            serde_json::from_value(json!({
                "id": format!("r{}", i),
                "patient_id": "p0",
                "record_type": record_type,
                "title": "Visit",
                "record_date": "2026-10-18",
            }))
            .unwrap()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use clinic_core::reports::{appointment_stats, medical_analysis, patient_summary, rate};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    #[test]
    fn test_gender_distribution_adds_up() {
        let mut rng = StdRng::seed_from_u64(17);
        for count in [0, 1, 7, 40] {
            let patients = random_patients(&mut rng, count, "2026-10-02T08:00:00Z");
            let summary = patient_summary(&patients, today());
            let split = &summary["genderDistribution"];
            let total = split["male"].as_u64().unwrap()
                + split["female"].as_u64().unwrap()
                + split["other"].as_u64().unwrap();
            assert_eq!(total, count as u64);
            assert_eq!(summary["totalPatients"], count);
        }
    }

    #[test]
    fn test_new_this_month_counts_current_month_only() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut patients = random_patients(&mut rng, 3, "2026-10-01T00:00:00Z");
        patients.extend(random_patients(&mut rng, 2, "2026-09-30T23:00:00Z"));
        patients.extend(random_patients(&mut rng, 1, "2025-10-15T12:00:00Z"));

        let summary = patient_summary(&patients, today());
        assert_eq!(summary["newPatientsThisMonth"], 3);
    }

    #[test]
    fn test_average_age_of_nobody_is_zero() {
        assert_eq!(patient_summary(&[], today())["averageAge"], 0);
    }

    #[test]
    fn test_appointment_stats() {
        let appointments = appointments_with(&[
            "Completed",
            "Completed",
            "Cancelled",
            "No Show",
            "Scheduled",
            "Scheduled",
            "Scheduled",
            "Confirmed",
        ]);
        let stats = appointment_stats(&appointments);
        assert_eq!(stats["totalAppointments"], 8);
        assert_eq!(stats["completedAppointments"], 2);
        assert_eq!(stats["cancelledAppointments"], 1);
        assert_eq!(stats["statusCounts"]["Scheduled"], 3);
        assert_eq!(stats["statusCounts"]["In Progress"], 0);
        assert_eq!(stats["noShowRate"], "12.5%");
    }

    #[test]
    fn test_most_common_type_breaks_ties_by_listing_order() {
        let analysis = medical_analysis(&records_with(&["Imaging", "Lab Result", "Imaging", "Lab Result"]));
        assert_eq!(analysis["totalRecords"], 4);
        assert_eq!(analysis["recordTypeCounts"]["Imaging"], 2);
        assert_eq!(analysis["mostCommonType"], "Lab Result");

        assert!(medical_analysis(&[])["mostCommonType"].is_null());
    }

    #[test]
    fn test_rate_formatting() {
        assert_eq!(rate(0, 0), "0.0%");
        assert_eq!(rate(1, 3), "33.3%");
        assert_eq!(rate(3, 3), "100.0%");
    }
}
