//! scan-gate - CI gate for container image vulnerability scans
//!
//! This library reconciles registry scan findings against a persisted
//! allowlist so CI fails only on newly introduced, unaddressed
//! vulnerabilities instead of on every known issue.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`scan_reconciliation`): canonical records for both
//!   scan formats, the package-keyed collection with its set algebra, and
//!   the reconciliation services
//! - **Application Layer** (`application`): use cases and DTOs
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): concrete implementations of ports
//! - **Shared** (`shared`): common error types and the Result alias
//!
//! # Example
//!
//! ```no_run
//! use scan_gate::prelude::*;
//! use std::path::{Path, PathBuf};
//!
//! # fn main() -> Result<()> {
//! // Load the three collections of one image
//! let reader = FileSystemReader::new();
//! let threshold = Severity::Medium;
//! let current: VulnerabilityCollection<EnhancedScanVulnerability> =
//!     VulnerabilityCollection::from_scan_findings(
//!         &reader.read_findings(Path::new("current.json"))?,
//!         threshold,
//!     )?;
//! let upgraded: VulnerabilityCollection<EnhancedScanVulnerability> =
//!     VulnerabilityCollection::from_scan_findings(
//!         &reader.read_findings(Path::new("upgraded.json"))?,
//!         threshold,
//!     )?;
//! let allowlist: VulnerabilityCollection<EnhancedScanVulnerability> =
//!     VulnerabilityCollection::from_file(Path::new("allowlist.json"), threshold)?;
//!
//! // Reconcile and run the failure routine
//! let archive = DirectoryArchive::new(PathBuf::from("artifacts"));
//! let use_case = ReconcileImageUseCase::new(archive, StderrProgressReporter::new());
//! let request = ReconcileRequest::new(
//!     "registry.example.com/team/image:2.0",
//!     threshold,
//!     PathBuf::from("allowlist.json"),
//! );
//! let response = use_case.execute(&request, &allowlist, &current, &upgraded)?;
//! println!("passed: {}", response.passed());
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod scan_reconciliation;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        DirectoryArchive, FileReportWriter, FileSystemReader, StdoutReportWriter,
    };
    pub use crate::adapters::outbound::formatters::{JsonReportFormatter, TextReportFormatter};
    pub use crate::adapters::outbound::network::RegistryScanClient;
    pub use crate::application::dto::{
        EditedFile, FailureSummary, ReconcileRequest, ReconcileResponse, ReconcileStatus,
    };
    pub use crate::application::use_cases::{FetchScanListsUseCase, ReconcileImageUseCase};
    pub use crate::config::ScanGateConfig;
    pub use crate::ports::outbound::{
        ArtifactArchive, ImageReference, ProgressReporter, ReportFormatter, ReportSink,
        ScanResultsSource,
    };
    pub use crate::scan_reconciliation::domain::{
        BasicScanVulnerability, EnhancedScanFinding, EnhancedScanVulnerability, ScanAttribute,
        Severity, VulnerabilityCollection, VulnerabilityRecord, VulnerablePackageDetails,
    };
    pub use crate::scan_reconciliation::services::{
        reconcile, vulnerabilities_fixable_by_upgrade, ReconciliationVerdict,
    };
    pub use crate::shared::Result;
}
