use crate::scan_reconciliation::domain::Severity;
use std::path::PathBuf;

/// ReconcileRequest - Internal request DTO for the reconciliation use case
///
/// Carries everything the use case needs besides the three collections
/// themselves: provenance (the image URI used for artifact naming), the
/// threshold the collections were built with, and the repository paths
/// recorded in the failure summary's edited-files section.
#[derive(Debug, Clone)]
pub struct ReconcileRequest {
    /// Image URI the three collections belong to.
    pub image_uri: String,
    /// Minimum severity the collections were constructed with.
    pub threshold: Severity,
    /// Repository path of the persisted allowlist, recorded in the
    /// summary so automation knows which file to propose edits for.
    pub allowlist_path: PathBuf,
    /// Repository path of the upgrade package list accompanying the
    /// allowlist; when present, the fixable partition's packages are
    /// merged into it.
    pub upgrade_package_list_path: Option<PathBuf>,
    /// Current content of the upgrade package list, one package per
    /// entry, loaded by the caller.
    pub existing_upgrade_packages: Vec<String>,
    /// When set, the post-upgrade list is also saved locally as the
    /// proposed replacement allowlist.
    pub proposed_allowlist_path: Option<PathBuf>,
}

impl ReconcileRequest {
    pub fn new(image_uri: impl Into<String>, threshold: Severity, allowlist_path: PathBuf) -> Self {
        Self {
            image_uri: image_uri.into(),
            threshold,
            allowlist_path,
            upgrade_package_list_path: None,
            existing_upgrade_packages: Vec::new(),
            proposed_allowlist_path: None,
        }
    }
}
