use crate::scan_reconciliation::domain::Severity;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A file the allowlist-update workflow should edit, pairing the
/// archived replacement content with the path of the original in the
/// repository.
#[derive(Debug, Clone, Serialize)]
pub struct EditedFile {
    pub archived_filename: String,
    pub original_filepath: String,
}

/// Everything automation needs to follow up on a failing verdict:
/// the partitions as package-keyed record maps, the files to edit, and
/// where the full lists were archived.
#[derive(Debug, Clone, Serialize)]
pub struct FailureSummary {
    pub edited_files: Vec<EditedFile>,
    /// Package name -> records fixable by upgrading packages in place.
    pub fixable_vulnerabilities: serde_json::Value,
    /// Package name -> records that survive the upgrade and are not
    /// allowlisted.
    pub non_fixable_vulnerabilities: serde_json::Value,
    pub archived_allowlist_candidate: String,
    pub archived_current_scan: String,
    pub archived_fixable_list: String,
    pub archived_non_fixable_list: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReconcileStatus {
    Pass,
    Fail,
}

/// ReconcileResponse - Result DTO of the reconciliation use case
///
/// Serializable as-is; the JSON report formatter emits it directly.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileResponse {
    pub run_id: Uuid,
    pub image_uri: String,
    pub threshold: Severity,
    pub completed_at: DateTime<Utc>,
    pub status: ReconcileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<FailureSummary>,
}

impl ReconcileResponse {
    pub fn passed(&self) -> bool {
        self.status == ReconcileStatus::Pass
    }
}
