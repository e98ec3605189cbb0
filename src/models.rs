// Compliance report models

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::public_url;

pub const REPORT_STATUS: &str = "Success";
pub const REPORT_SUMMARY: &str = "This is a dummy compliance report for demonstration purposes.";

/// Placeholder control results attached to every report.
const PLACEHOLDER_CONTROLS: [(&str, &str); 3] = [
    ("AC-1", "Compliant"),
    ("AC-2", "Partially Compliant"),
    ("AC-3", "Non-Compliant"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlResult {
    pub control: String,
    pub status: String,
}

/// The document uploaded for each processed object. Field order is the
/// serialized order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub report_id: String,
    pub file_key: String,
    pub s3_url: String,
    pub processed_at: String,
    pub status: String,
    pub summary: String,
    pub details: Vec<ControlResult>,
}

impl ComplianceReport {
    /// Build the placeholder report for `file_key` in `bucket`. Nothing here
    /// depends on the object's contents.
    pub fn placeholder(bucket: &str, file_key: &str) -> Self {
        Self::placeholder_at(bucket, file_key, Utc::now())
    }

    pub fn placeholder_at(bucket: &str, file_key: &str, now: DateTime<Utc>) -> Self {
        Self {
            report_id: uuid::Uuid::new_v4().to_string(),
            file_key: file_key.to_string(),
            s3_url: public_url(bucket, file_key),
            processed_at: format_timestamp(now),
            status: REPORT_STATUS.to_string(),
            summary: REPORT_SUMMARY.to_string(),
            details: PLACEHOLDER_CONTROLS
                .iter()
                .map(|(control, status)| ControlResult {
                    control: control.to_string(),
                    status: status.to_string(),
                })
                .collect(),
        }
    }

    /// Pretty-printed JSON with a four space indent.
    pub fn to_pretty_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;
        Ok(buf)
    }
}

/// ISO-8601 UTC with microseconds and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}
