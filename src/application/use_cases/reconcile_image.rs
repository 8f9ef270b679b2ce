use crate::application::dto::{
    EditedFile, FailureSummary, ReconcileRequest, ReconcileResponse, ReconcileStatus,
};
use crate::ports::outbound::{ArtifactArchive, ProgressReporter};
use crate::scan_reconciliation::domain::{VulnerabilityCollection, VulnerabilityRecord};
use crate::scan_reconciliation::services::{merge_upgrade_package_list, reconcile};
use crate::shared::Result;
use chrono::Utc;
use uuid::Uuid;

/// ReconcileImageUseCase - Core use case for gating one image
///
/// Reconciles the three collections of one image and, on a failing
/// verdict, runs the failure routine: archive every list involved,
/// merge the upgrade package list, optionally persist the proposed
/// allowlist, and assemble the failure summary automation consumes.
///
/// # Type Parameters
/// * `A` - ArtifactArchive implementation
/// * `P` - ProgressReporter implementation
pub struct ReconcileImageUseCase<A, P> {
    archive: A,
    progress_reporter: P,
}

impl<A, P> ReconcileImageUseCase<A, P>
where
    A: ArtifactArchive,
    P: ProgressReporter,
{
    /// Creates a new ReconcileImageUseCase with injected dependencies
    pub fn new(archive: A, progress_reporter: P) -> Self {
        Self {
            archive,
            progress_reporter,
        }
    }

    /// Executes the reconciliation use case for one image.
    ///
    /// # Arguments
    /// * `request` - Provenance and file paths for the summary
    /// * `image_allowlist` - Persisted allowlist collection
    /// * `current_scan` - Scan of the image as released
    /// * `upgraded_scan` - Scan of the same image after an in-place
    ///   package upgrade
    pub fn execute<R: VulnerabilityRecord>(
        &self,
        request: &ReconcileRequest,
        image_allowlist: &VulnerabilityCollection<R>,
        current_scan: &VulnerabilityCollection<R>,
        upgraded_scan: &VulnerabilityCollection<R>,
    ) -> Result<ReconcileResponse> {
        let verdict = reconcile(image_allowlist, current_scan, upgraded_scan);

        if verdict.passed() {
            self.progress_reporter.report_completion(&format!(
                "✅ {} passed: no outstanding vulnerabilities at threshold {}",
                request.image_uri, request.threshold
            ));
            return Ok(self.build_response(request, ReconcileStatus::Pass, None));
        }

        let slug = artifact_slug(&request.image_uri);

        // The upgraded image's list is the proposed allowlist: it holds
        // exactly what remains after every fixable finding is upgraded away.
        let archived_allowlist_candidate = self
            .archive
            .archive_json(&format!("{slug}-allowlist.json"), &upgraded_scan.sorted_json()?)?;
        let archived_current_scan = self.archive.archive_json(
            &format!("{slug}-current-scan-list.json"),
            &current_scan.sorted_json()?,
        )?;

        let fixable_vulnerabilities = match &verdict.fixable_by_upgrade {
            Some(collection) => collection.sorted_json()?,
            None => serde_json::json!({}),
        };
        let non_fixable_vulnerabilities = match &verdict.newly_found_non_fixable {
            Some(collection) => collection.sorted_json()?,
            None => serde_json::json!({}),
        };
        let archived_fixable_list = self.archive.archive_json(
            &format!("{slug}-fixable-vulnerability-list.json"),
            &fixable_vulnerabilities,
        )?;
        let archived_non_fixable_list = self.archive.archive_json(
            &format!("{slug}-non-fixable-vulnerability-list.json"),
            &non_fixable_vulnerabilities,
        )?;

        let mut edited_files = vec![EditedFile {
            archived_filename: archived_allowlist_candidate.clone(),
            original_filepath: request.allowlist_path.display().to_string(),
        }];

        if let Some(package_list_path) = &request.upgrade_package_list_path {
            let fixable_packages: Vec<String> = verdict
                .fixable_by_upgrade
                .as_ref()
                .map(|collection| {
                    collection
                        .package_names()
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            let merged = merge_upgrade_package_list(
                &request.existing_upgrade_packages,
                &fixable_packages,
            );
            let mut content = merged.join("\n");
            content.push('\n');
            let archived_package_list = self
                .archive
                .archive_text(&format!("{slug}-upgrade-package-list.txt"), &content)?;
            edited_files.push(EditedFile {
                archived_filename: archived_package_list,
                original_filepath: package_list_path.display().to_string(),
            });
        }

        if let Some(proposed_path) = &request.proposed_allowlist_path {
            if upgraded_scan.is_empty() {
                self.progress_reporter.report(
                    "Post-upgrade scan is empty; skipping proposed allowlist (nothing to allow)",
                );
            } else {
                upgraded_scan.save(proposed_path)?;
                self.progress_reporter.report(&format!(
                    "💾 Proposed allowlist saved to {}",
                    proposed_path.display()
                ));
            }
        }

        let fixable_count = verdict
            .fixable_by_upgrade
            .as_ref()
            .map_or(0, |collection| collection.record_count());
        let non_fixable_count = verdict
            .newly_found_non_fixable
            .as_ref()
            .map_or(0, |collection| collection.record_count());
        self.progress_reporter.report_error(&format!(
            "❌ {} failed: {} fixable by upgrade, {} non-fixable and not allowlisted",
            request.image_uri, fixable_count, non_fixable_count
        ));

        let summary = FailureSummary {
            edited_files,
            fixable_vulnerabilities,
            non_fixable_vulnerabilities,
            archived_allowlist_candidate,
            archived_current_scan,
            archived_fixable_list,
            archived_non_fixable_list,
        };
        Ok(self.build_response(request, ReconcileStatus::Fail, Some(summary)))
    }

    fn build_response(
        &self,
        request: &ReconcileRequest,
        status: ReconcileStatus,
        summary: Option<FailureSummary>,
    ) -> ReconcileResponse {
        ReconcileResponse {
            run_id: Uuid::new_v4(),
            image_uri: request.image_uri.clone(),
            threshold: request.threshold,
            completed_at: Utc::now(),
            status,
            summary,
        }
    }
}

/// File-name slug for an image URI: URI separators become hyphens so
/// the archive holds flat, filesystem-safe names.
fn artifact_slug(image_uri: &str) -> String {
    image_uri.replace(['.', '/', ':'], "-")
}
