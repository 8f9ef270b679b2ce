use crate::scan_reconciliation::domain::Severity;
use crate::shared::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Capability interface implemented by both canonical record types.
///
/// The two upstream scan formats need different normalization and
/// equivalence logic, but the collection and set-algebra machinery is
/// written once against this trait and never duplicated per format.
///
/// Derived `PartialEq` on implementors is full structural equality and
/// is deliberately distinct from [`equivalent`](Self::equivalent):
/// exact equality drives duplicate removal, while equivalence drives
/// cross-scan matching.
pub trait VulnerabilityRecord: Clone + PartialEq + Serialize + DeserializeOwned {
    /// Normalizes raw scanner output into canonical records.
    ///
    /// Basic-scan findings already match the canonical shape, so this is
    /// pass-through validation. One enhanced-scan finding may reference
    /// several vulnerable packages and fans out to one record per package.
    ///
    /// # Errors
    /// Returns a structural error when a finding is missing required keys;
    /// malformed upstream data is never silently coerced.
    fn from_raw_findings(findings: &[serde_json::Value]) -> Result<Vec<Self>>;

    /// Identifier used to order records within one package entry
    /// (typically the CVE id).
    fn vulnerability_id(&self) -> &str;

    /// Package the finding is attached to, used as the grouping key.
    ///
    /// Returns `None` when the record carries no package identity; such a
    /// record is rejected at collection construction.
    fn package_name(&self) -> Option<&str>;

    /// Severity used for minimum-severity threshold filtering.
    fn severity(&self) -> Severity;

    /// Format-specific "same vulnerability" check.
    ///
    /// Must ignore the observed package version: the version is a
    /// scan-time observation, not part of the vulnerability's identity,
    /// and comparing it would misreport still-present vulnerabilities
    /// as new whenever the installed version drifts.
    fn equivalent(&self, other: &Self) -> bool;
}
