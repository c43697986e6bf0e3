//! Headline numbers for the dashboard landing page.

use chrono::{Local, NaiveDate};
use tracing::error;

use crate::entity::Entity;
use crate::fetcher::load;
use crate::model::{Appointment, MedicalRecord, Patient};
use crate::store::RemoteStore;
use crate::validation::parse_date;

pub const UPCOMING_LIMIT: usize = 5;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Overview {
    pub total_patients: usize,
    pub total_appointments: usize,
    pub appointments_today: usize,
    pub total_records: usize,
    /// Next appointments dated today or later, in fetch order
    pub upcoming: Vec<Appointment>,
}

impl Overview {
    pub fn compute(
        patients: &[Patient],
        appointments: &[Appointment],
        records: &[MedicalRecord],
        today: NaiveDate,
    ) -> Self {
        let dated = |a: &&Appointment| parse_date(&a.appointment_date);
        Self {
            total_patients: patients.len(),
            total_appointments: appointments.len(),
            appointments_today: appointments
                .iter()
                .filter(|a| dated(a) == Some(today))
                .count(),
            total_records: records.len(),
            upcoming: appointments
                .iter()
                .filter(|a| dated(a).map_or(false, |d| d >= today))
                .take(UPCOMING_LIMIT)
                .cloned()
                .collect(),
        }
    }

    /// (label, value) cards in display order
    pub fn cards(&self) -> [(&'static str, usize); 4] {
        [
            ("Total Patients", self.total_patients),
            ("Total Appointments", self.total_appointments),
            ("Appointments Today", self.appointments_today),
            ("Medical Records", self.total_records),
        ]
    }
}

/// Fetch the three lists and compute the overview for today.
///
/// Each list loads on its own; a failed table counts as empty without
/// hiding the others.
pub async fn load_overview(store: &dyn RemoteStore) -> Overview {
    let patients = load_or_empty::<Patient>(store).await;
    let appointments = load_or_empty::<Appointment>(store).await;
    let records = load_or_empty::<MedicalRecord>(store).await;
    Overview::compute(&patients, &appointments, &records, Local::now().date_naive())
}

async fn load_or_empty<E: Entity>(store: &dyn RemoteStore) -> Vec<E> {
    load::<E>(store).await.unwrap_or_else(|err| {
        error!(table = E::TABLE, error = %err, "dashboard fetch failed");
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppointmentStatus;

    fn appointment(id: &str, date: &str) -> Appointment {
        Appointment {
            id: id.to_string(),
            patient_id: "p1".to_string(),
            appointment_date: date.to_string(),
            appointment_time: "09:00".to_string(),
            appointment_case: "Checkup".to_string(),
            provider_name: None,
            status: AppointmentStatus::Scheduled,
            notes: None,
            patient: None,
            created_at: None,
        }
    }

    #[test]
    fn test_counts_and_upcoming() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let appointments: Vec<Appointment> = [
            "2024-06-30", "2024-07-01", "2024-07-01", "2024-07-02", "2024-07-03", "2024-07-04",
            "2024-07-05",
        ]
        .iter()
        .enumerate()
        .map(|(i, d)| appointment(&i.to_string(), d))
        .collect();

        let overview = Overview::compute(&[], &appointments, &[], today);
        assert_eq!(overview.total_appointments, 7);
        assert_eq!(overview.appointments_today, 2);
        assert_eq!(overview.upcoming.len(), UPCOMING_LIMIT);
        assert_eq!(overview.upcoming[0].id, "1");
        assert_eq!(overview.upcoming[4].id, "5");
        assert_eq!(overview.cards()[2], ("Appointments Today", 2));
    }
}
