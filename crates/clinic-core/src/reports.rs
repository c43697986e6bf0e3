//! Report builders.
//!
//! A report is a snapshot computed from the live tables and written once to
//! `reports`. Payload keys are camelCase to match the rows already stored.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde_json::{json, Map, Value};
use tracing::{error, info};

use crate::error::StoreError;
use crate::fetcher::load;
use crate::model::{
    Appointment, AppointmentStatus, Gender, MedicalRecord, NewReport, Patient, RecordType, Report,
};
use crate::notify::{Notifier, Toast};
use crate::store::{insert_as, tables, RemoteStore};

pub const GENERATED_BY: &str = "System";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ReportKind {
    PatientSummary,
    AppointmentStats,
    MedicalAnalysis,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::PatientSummary,
        ReportKind::AppointmentStats,
        ReportKind::MedicalAnalysis,
    ];

    /// Value stored in `reports.report_type`
    pub fn report_type(self) -> &'static str {
        match self {
            ReportKind::PatientSummary => "Patient Summary",
            ReportKind::AppointmentStats => "Appointment Stats",
            ReportKind::MedicalAnalysis => "Medical Analysis",
        }
    }

    /// Value stored in `reports.report_name`
    pub fn report_name(self) -> &'static str {
        match self {
            ReportKind::PatientSummary => "Monthly Patient Summary",
            ReportKind::AppointmentStats => "Appointment Statistics",
            ReportKind::MedicalAnalysis => "Medical Trends Analysis",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            ReportKind::PatientSummary => "Patient demographics and registrations",
            ReportKind::AppointmentStats => "Appointment volume and outcomes",
            ReportKind::MedicalAnalysis => "Medical record types and trends",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.report_type())
    }
}

pub fn patient_summary(patients: &[Patient], today: NaiveDate) -> Value {
    let new_this_month = patients
        .iter()
        .filter_map(|p| p.created_at)
        .filter(|created| {
            let created = created.date_naive();
            created.year() == today.year() && created.month() == today.month()
        })
        .count();

    let ages: Vec<i32> = patients.iter().filter_map(|p| p.age_on(today)).collect();
    let average_age = if ages.is_empty() {
        0
    } else {
        let total: i64 = ages.iter().map(|a| i64::from(*a)).sum();
        (total as f64 / ages.len() as f64).round() as i64
    };

    let count = |gender: Gender| patients.iter().filter(|p| p.gender == gender).count();

    json!({
        "totalPatients": patients.len(),
        "newPatientsThisMonth": new_this_month,
        "averageAge": average_age,
        "genderDistribution": {
            "male": count(Gender::Male),
            "female": count(Gender::Female),
            "other": count(Gender::Other),
        }
    })
}

pub fn appointment_stats(appointments: &[Appointment]) -> Value {
    let count = |status: AppointmentStatus| {
        appointments.iter().filter(|a| a.status == status).count()
    };

    let mut by_status = Map::new();
    for status in AppointmentStatus::ALL {
        by_status.insert(status.as_str().to_string(), json!(count(*status)));
    }

    json!({
        "totalAppointments": appointments.len(),
        "completedAppointments": count(AppointmentStatus::Completed),
        "cancelledAppointments": count(AppointmentStatus::Cancelled),
        "statusCounts": by_status,
        "noShowRate": rate(count(AppointmentStatus::NoShow), appointments.len()),
    })
}

pub fn medical_analysis(records: &[MedicalRecord]) -> Value {
    let mut by_type: BTreeMap<&'static str, usize> = BTreeMap::new();
    for record in records {
        *by_type.entry(record.record_type.as_str()).or_default() += 1;
    }

    // Ties go to the type listed first
    let mut most_common: Option<(RecordType, usize)> = None;
    for record_type in RecordType::ALL {
        let n = by_type.get(record_type.as_str()).copied().unwrap_or(0);
        if n > 0 && most_common.map_or(true, |(_, best)| n > best) {
            most_common = Some((*record_type, n));
        }
    }

    json!({
        "totalRecords": records.len(),
        "recordTypeCounts": by_type,
        "mostCommonType": most_common.map(|(t, _)| t.as_str()),
    })
}

/// Percentage with one decimal, e.g. `"12.5%"`; `"0.0%"` when `total` is zero
pub fn rate(part: usize, total: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", part as f64 * 100.0 / total as f64)
}

/// Fetch what `kind` needs and compute its payload
pub async fn build_payload(
    kind: ReportKind,
    store: &dyn RemoteStore,
    today: NaiveDate,
) -> Result<Value, StoreError> {
    Ok(match kind {
        ReportKind::PatientSummary => patient_summary(&load::<Patient>(store).await?, today),
        ReportKind::AppointmentStats => appointment_stats(&load::<Appointment>(store).await?),
        ReportKind::MedicalAnalysis => medical_analysis(&load::<MedicalRecord>(store).await?),
    })
}

/// Generate and store a report as of now
pub async fn generate(
    kind: ReportKind,
    store: &dyn RemoteStore,
    notifier: &dyn Notifier,
) -> Result<Report, StoreError> {
    generate_at(kind, store, notifier, Utc::now(), Local::now().date_naive()).await
}

pub async fn generate_at(
    kind: ReportKind,
    store: &dyn RemoteStore,
    notifier: &dyn Notifier,
    now: DateTime<Utc>,
    today: NaiveDate,
) -> Result<Report, StoreError> {
    let outcome = async {
        let payload = build_payload(kind, store, today).await?;
        let row = NewReport {
            report_name: kind.report_name().to_string(),
            report_type: kind.report_type().to_string(),
            generated_by: Some(GENERATED_BY.to_string()),
            report_data: payload,
            generated_at: now,
        };
        let stored = insert_as(store, tables::REPORTS, &row).await?;
        serde_json::from_value::<Report>(stored).map_err(|e| StoreError::Decode {
            table: tables::REPORTS.to_string(),
            message: e.to_string(),
        })
    }
    .await;

    match &outcome {
        Ok(report) => {
            info!(report_type = %kind, id = %report.id, "report generated");
            notifier.notify(Toast::success(format!("{} generated successfully!", kind.report_name())));
        }
        Err(err) => {
            error!(report_type = %kind, error = %err, "report generation failed");
            notifier.notify(Toast::error("Failed to generate report. Please try again."));
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate() {
        assert_eq!(rate(0, 0), "0.0%");
        assert_eq!(rate(1, 8), "12.5%");
        assert_eq!(rate(1, 3), "33.3%");
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(ReportKind::AppointmentStats.report_type(), "Appointment Stats");
        assert_eq!(ReportKind::AppointmentStats.report_name(), "Appointment Statistics");
        for kind in ReportKind::ALL {
            assert_eq!(kind.to_string(), kind.report_type());
        }
    }

    #[test]
    fn test_empty_payloads() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let summary = patient_summary(&[], today);
        assert_eq!(summary["totalPatients"], 0);
        assert_eq!(summary["averageAge"], 0);
        assert_eq!(appointment_stats(&[])["noShowRate"], "0.0%");
        assert!(medical_analysis(&[])["mostCommonType"].is_null());
    }
}
