use crate::application::dto::ReconcileResponse;
use crate::ports::outbound::ReportFormatter;
use crate::shared::Result;

/// JsonReportFormatter adapter for machine-readable output
///
/// Emits the reconciliation response verbatim as pretty-printed JSON,
/// the form downstream automation (allowlist-update tooling) consumes.
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, response: &ReconcileResponse) -> Result<String> {
        let mut output = serde_json::to_string_pretty(response)?;
        output.push('\n');
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::ReconcileStatus;
    use crate::scan_reconciliation::domain::Severity;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_json_output_is_parseable_and_tagged() {
        let response = ReconcileResponse {
            run_id: Uuid::new_v4(),
            image_uri: "registry.example.com/image:tag".to_string(),
            threshold: Severity::Medium,
            completed_at: Utc::now(),
            status: ReconcileStatus::Pass,
            summary: None,
        };
        let formatter = JsonReportFormatter::new();
        let output = formatter.format(&response).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["status"], "pass");
        assert_eq!(parsed["image_uri"], "registry.example.com/image:tag");
        assert!(output.ends_with('\n'));
    }
}
