use crate::scan_reconciliation::domain::record::VulnerabilityRecord;
use crate::scan_reconciliation::domain::Severity;
use crate::shared::error::ScanGateError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Attribute key that names the affected package.
pub const PACKAGE_NAME_KEY: &str = "package_name";

/// Attribute key for the package version observed at scan time.
pub const PACKAGE_VERSION_KEY: &str = "package_version";

/// One `{key, value}` entry of a basic-scan finding's attribute list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanAttribute {
    pub key: String,
    pub value: String,
}

impl ScanAttribute {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Canonical record for the basic scan format.
///
/// For basic scans the raw scanner output and the allowlist format
/// coincide, so deserializing a raw finding is the whole normalization
/// step. An unrecognized `severity` string fails deserialization rather
/// than being defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicScanVulnerability {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    pub severity: Severity,
    pub attributes: Vec<ScanAttribute>,
}

impl BasicScanVulnerability {
    /// Value of the given attribute key, if present.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attribute| attribute.key == key)
            .map(|attribute| attribute.value.as_str())
    }

    /// Package version observed when the finding was recorded.
    pub fn package_version(&self) -> Option<&str> {
        self.attribute(PACKAGE_VERSION_KEY)
    }
}

impl VulnerabilityRecord for BasicScanVulnerability {
    fn from_raw_findings(findings: &[serde_json::Value]) -> Result<Vec<Self>> {
        findings
            .iter()
            .map(|finding| {
                serde_json::from_value(finding.clone()).map_err(|e| {
                    ScanGateError::MalformedFinding {
                        details: e.to_string(),
                    }
                    .into()
                })
            })
            .collect()
    }

    fn vulnerability_id(&self) -> &str {
        &self.name
    }

    fn package_name(&self) -> Option<&str> {
        self.attribute(PACKAGE_NAME_KEY)
    }

    fn severity(&self) -> Severity {
        self.severity
    }

    /// Two basic-scan records describe the same vulnerability when name
    /// and severity match and every non-version attribute of `self` is
    /// present in `other`.
    ///
    /// The subset containment is asymmetric on purpose: it tolerates the
    /// scanner attaching extra attributes to newer findings without
    /// breaking matches against older allowlist entries.
    fn equivalent(&self, other: &Self) -> bool {
        if self.name != other.name || self.severity != other.severity {
            return false;
        }
        self.attributes
            .iter()
            .filter(|attribute| attribute.key != PACKAGE_VERSION_KEY)
            .all(|attribute| other.attributes.contains(attribute))
    }
}
