pub mod basic;
pub mod collection;
pub mod enhanced;
pub mod record;
pub mod severity;

pub use basic::{BasicScanVulnerability, ScanAttribute};
pub use collection::VulnerabilityCollection;
pub use enhanced::{EnhancedScanFinding, EnhancedScanVulnerability, VulnerablePackageDetails};
pub use record::VulnerabilityRecord;
pub use severity::Severity;
