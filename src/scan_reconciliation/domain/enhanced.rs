use crate::scan_reconciliation::domain::record::VulnerabilityRecord;
use crate::scan_reconciliation::domain::Severity;
use crate::shared::error::ScanGateError;
use crate::shared::Result;
use serde::{Deserialize, Serialize};

/// Details of one vulnerable package referenced by an enhanced finding.
///
/// `version` is the version observed at scan time; it is stored for
/// reporting but excluded from equivalence comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VulnerablePackageDetails {
    pub file_path: Option<String>,
    pub name: String,
    pub package_manager: Option<String>,
    pub version: String,
    pub release: Option<String>,
}

impl VulnerablePackageDetails {
    /// Structural match ignoring the scan-time `version` field.
    pub fn matches_ignoring_version(&self, other: &Self) -> bool {
        self.file_path == other.file_path
            && self.name == other.name
            && self.package_manager == other.package_manager
            && self.release == other.release
    }
}

/// Canonical (allowlist format) record for the enhanced scan format.
///
/// Field order matters: it is the order records are persisted in, so it
/// stays stable for diffability of allowlist files in version control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedScanVulnerability {
    pub description: String,
    pub vulnerability_id: String,
    pub name: String,
    pub package_name: String,
    pub package_details: VulnerablePackageDetails,
    pub remediation: serde_json::Value,
    pub cvss_v3_score: f64,
    pub cvss_v30_score: f64,
    pub cvss_v2_score: f64,
    pub cvss_v3_severity: Severity,
    pub source_url: String,
    pub source: String,
    pub severity: String,
    pub status: String,
    pub title: String,
}

impl VulnerabilityRecord for EnhancedScanVulnerability {
    fn from_raw_findings(findings: &[serde_json::Value]) -> Result<Vec<Self>> {
        let mut records = Vec::new();
        for finding in findings {
            let parsed: EnhancedScanFinding =
                serde_json::from_value(finding.clone()).map_err(|e| {
                    ScanGateError::MalformedFinding {
                        details: e.to_string(),
                    }
                })?;
            records.extend(parsed.into_allowlist_records());
        }
        Ok(records)
    }

    fn vulnerability_id(&self) -> &str {
        &self.name
    }

    fn package_name(&self) -> Option<&str> {
        Some(&self.package_name)
    }

    fn severity(&self) -> Severity {
        self.cvss_v3_severity
    }

    /// Two enhanced-scan records describe the same vulnerability when
    /// their package details match ignoring the observed version and
    /// every other field matches exactly.
    fn equivalent(&self, other: &Self) -> bool {
        self.package_details
            .matches_ignoring_version(&other.package_details)
            && self.description == other.description
            && self.vulnerability_id == other.vulnerability_id
            && self.name == other.name
            && self.package_name == other.package_name
            && self.remediation == other.remediation
            && self.cvss_v3_score == other.cvss_v3_score
            && self.cvss_v30_score == other.cvss_v30_score
            && self.cvss_v2_score == other.cvss_v2_score
            && self.cvss_v3_severity == other.cvss_v3_severity
            && self.source_url == other.source_url
            && self.source == other.source
            && self.severity == other.severity
            && self.status == other.status
            && self.title == other.title
    }
}

/// One raw finding as returned by the enhanced scan API.
///
/// Deserialization is the structural validation step: a finding missing
/// any required key is rejected at the boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedScanFinding {
    pub description: String,
    pub package_vulnerability_details: PackageVulnerabilityDetails,
    pub remediation: serde_json::Value,
    pub severity: String,
    pub status: String,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageVulnerabilityDetails {
    pub vulnerability_id: String,
    pub source_url: String,
    pub source: String,
    #[serde(default)]
    pub cvss: Vec<CvssScore>,
    pub vulnerable_packages: Vec<RawVulnerablePackage>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvssScore {
    pub version: String,
    pub base_score: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawVulnerablePackage {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub file_path: Option<String>,
    #[serde(default)]
    pub package_manager: Option<String>,
    #[serde(default)]
    pub release: Option<String>,
}

impl EnhancedScanFinding {
    /// Base score for the requested CVSS version, 0.0 when absent.
    fn cvss_base_score(&self, score_version: &str) -> f64 {
        self.package_vulnerability_details
            .cvss
            .iter()
            .find(|score| score.version == score_version)
            .map(|score| score.base_score)
            .unwrap_or(0.0)
    }

    /// Fans the finding out into one canonical record per vulnerable
    /// package, deriving `cvss_v3_severity` from the v3.1 base score and
    /// retaining v3.0 and v2.0 scores for reporting.
    pub fn into_allowlist_records(self) -> Vec<EnhancedScanVulnerability> {
        let cvss_v3_score = self.cvss_base_score("3.1");
        let cvss_v30_score = self.cvss_base_score("3.0");
        let cvss_v2_score = self.cvss_base_score("2.0");
        let cvss_v3_severity = Severity::from_cvss_v3_score(cvss_v3_score);
        let details = &self.package_vulnerability_details;

        details
            .vulnerable_packages
            .iter()
            .map(|package| EnhancedScanVulnerability {
                description: self.description.clone(),
                vulnerability_id: details.vulnerability_id.clone(),
                name: details.vulnerability_id.clone(),
                package_name: package.name.clone(),
                package_details: VulnerablePackageDetails {
                    file_path: package.file_path.clone(),
                    name: package.name.clone(),
                    package_manager: package.package_manager.clone(),
                    version: package.version.clone(),
                    release: package.release.clone(),
                },
                remediation: self.remediation.clone(),
                cvss_v3_score,
                cvss_v30_score,
                cvss_v2_score,
                cvss_v3_severity,
                source_url: details.source_url.clone(),
                source: details.source.clone(),
                severity: self.severity.clone(),
                status: self.status.clone(),
                title: self.title.clone(),
            })
            .collect()
    }
}
