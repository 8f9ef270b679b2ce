use crate::ports::outbound::{ImageReference, ProgressReporter, ScanResultsSource};
use crate::scan_reconciliation::domain::{
    Severity, VulnerabilityCollection, VulnerabilityRecord,
};
use crate::shared::Result;

/// FetchScanListsUseCase - Builds collections straight from a scan source
///
/// Waits for the registry scan of an image to complete, fetches the raw
/// findings, and normalizes them into a collection. Used when the CLI is
/// pointed at a registry scan API instead of exported findings files.
///
/// # Type Parameters
/// * `S` - ScanResultsSource implementation
/// * `P` - ProgressReporter implementation
pub struct FetchScanListsUseCase<S, P> {
    scan_source: S,
    progress_reporter: P,
}

impl<S, P> FetchScanListsUseCase<S, P>
where
    S: ScanResultsSource,
    P: ProgressReporter,
{
    /// Creates a new FetchScanListsUseCase with injected dependencies
    pub fn new(scan_source: S, progress_reporter: P) -> Self {
        Self {
            scan_source,
            progress_reporter,
        }
    }

    /// Fetches the completed scan of `image` as a collection.
    ///
    /// # Arguments
    /// * `image` - Image whose scan findings to fetch
    /// * `threshold` - Minimum severity for the resulting collection
    pub fn fetch<R: VulnerabilityRecord>(
        &self,
        image: &ImageReference,
        threshold: Severity,
    ) -> Result<VulnerabilityCollection<R>> {
        self.progress_reporter
            .report(&format!("🔍 Waiting for the scan of {} to complete...", image));
        self.scan_source.wait_for_completion(image)?;

        let findings = self.scan_source.fetch_findings(image)?;
        self.progress_reporter.report_completion(&format!(
            "✅ Scan of {} complete: {} raw finding(s)",
            image,
            findings.len()
        ));

        VulnerabilityCollection::from_scan_findings(&findings, threshold)
    }
}
