use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generated report from `reports`; immutable once written
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub id: String,
    pub report_name: String,
    pub report_type: String,
    #[serde(default)]
    pub generated_by: Option<String>,
    /// Opaque structured payload
    #[serde(default)]
    pub report_data: Option<Value>,
    pub generated_at: DateTime<Utc>,
}

impl Report {
    pub fn badge_class(&self) -> &'static str {
        match self.report_type.as_str() {
            "Patient Summary" => "bg-blue-100 text-blue-800",
            "Appointment Stats" => "bg-green-100 text-green-800",
            "Medical Analysis" => "bg-orange-100 text-orange-800",
            _ => "bg-gray-100 text-gray-800",
        }
    }

    /// Pretty-printed JSON export of the whole report
    pub fn to_export_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// File name offered for the export download
    pub fn export_file_name(&self) -> String {
        let slug: String = self
            .report_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '-' })
            .collect();
        format!("{}-{}.json", slug, self.generated_at.format("%Y%m%d"))
    }
}

/// Insert payload for `reports`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct NewReport {
    pub report_name: String,
    pub report_type: String,
    pub generated_by: Option<String>,
    pub report_data: Value,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_export_file_name() {
        let report = Report {
            id: "r1".to_string(),
            report_name: "Monthly Patient Summary".to_string(),
            report_type: "Patient Summary".to_string(),
            generated_by: Some("System".to_string()),
            report_data: Some(serde_json::json!({ "totalPatients": 3 })),
            generated_at: Utc.with_ymd_and_hms(2024, 7, 1, 9, 0, 0).unwrap(),
        };
        assert_eq!(report.export_file_name(), "monthly-patient-summary-20240701.json");
        let json = report.to_export_json().unwrap();
        assert!(json.contains("\"totalPatients\": 3"));
        assert_eq!(report.badge_class(), "bg-blue-100 text-blue-800");
    }
}
