use crate::shared::Result;

/// ArtifactArchive port for storing reconciliation artifacts.
///
/// On a failing verdict every list involved is archived for the
/// allowlist-update workflow. The returned string is the location
/// reference callers record in the failure summary (a path for the
/// local-directory adapter; a remote store adapter would return its own
/// addressing scheme).
///
/// Unlike collection persistence, archiving accepts empty documents: an
/// empty partition is data worth recording, not a caller error.
pub trait ArtifactArchive {
    /// Stores a JSON document under `file_name`.
    fn archive_json(&self, file_name: &str, document: &serde_json::Value) -> Result<String>;

    /// Stores plain text (the upgrade package list) under `file_name`.
    fn archive_text(&self, file_name: &str, content: &str) -> Result<String>;
}
