use crate::scan_reconciliation::domain::{VulnerabilityCollection, VulnerabilityRecord};

/// Result of reconciling the three collections of one image.
///
/// Both partitions use the empty sentinel (`None`) the set algebra
/// produces, so "no fixable vulnerabilities" and "empty collection"
/// stay indistinguishable downstream, exactly like the set operations
/// themselves.
#[derive(Debug, Clone)]
pub struct ReconciliationVerdict<R: VulnerabilityRecord> {
    /// Present before the upgrade or already allowlisted, gone after the
    /// upgrade: remediated by upgrading packages.
    pub fixable_by_upgrade: Option<VulnerabilityCollection<R>>,
    /// Survives the upgrade and is not allowlisted: must be newly
    /// accepted or block the build.
    pub newly_found_non_fixable: Option<VulnerabilityCollection<R>>,
}

impl<R: VulnerabilityRecord> ReconciliationVerdict<R> {
    /// True when nothing gates the build.
    pub fn passed(&self) -> bool {
        self.fixable_by_upgrade.is_none() && self.newly_found_non_fixable.is_none()
    }
}

/// Vulnerabilities that disappear when the image's packages are upgraded
/// in place.
///
/// Takes the union of what the upgrade removes from the current scan and
/// what it removes from the allowlist, so allowlist entries that became
/// fixable are surfaced even when the current scan no longer reports them.
pub fn vulnerabilities_fixable_by_upgrade<R: VulnerabilityRecord>(
    image_allowlist: &VulnerabilityCollection<R>,
    current_scan: &VulnerabilityCollection<R>,
    upgraded_scan: &VulnerabilityCollection<R>,
) -> Option<VulnerabilityCollection<R>> {
    let fixable_from_scan = current_scan.difference(upgraded_scan);
    let fixable_from_allowlist = image_allowlist.difference(upgraded_scan);
    match (fixable_from_scan, fixable_from_allowlist) {
        (Some(from_scan), Some(from_allowlist)) => from_scan.union(&from_allowlist),
        (Some(from_scan), None) => Some(from_scan),
        (None, Some(from_allowlist)) => Some(from_allowlist),
        (None, None) => None,
    }
}

/// Reconciles one image's current scan, persisted allowlist, and
/// post-upgrade scan into a verdict.
///
/// Pure given the three collections; running the upgrade and rescanning
/// is the caller's concern.
pub fn reconcile<R: VulnerabilityRecord>(
    image_allowlist: &VulnerabilityCollection<R>,
    current_scan: &VulnerabilityCollection<R>,
    upgraded_scan: &VulnerabilityCollection<R>,
) -> ReconciliationVerdict<R> {
    ReconciliationVerdict {
        fixable_by_upgrade: vulnerabilities_fixable_by_upgrade(
            image_allowlist,
            current_scan,
            upgraded_scan,
        ),
        newly_found_non_fixable: upgraded_scan.difference(image_allowlist),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan_reconciliation::domain::basic::{
        BasicScanVulnerability, ScanAttribute, PACKAGE_NAME_KEY,
    };
    use crate::scan_reconciliation::domain::Severity;

    fn record(cve: &str, package: &str, severity: Severity) -> BasicScanVulnerability {
        BasicScanVulnerability {
            name: cve.to_string(),
            description: None,
            uri: None,
            severity,
            attributes: vec![ScanAttribute::new(PACKAGE_NAME_KEY, package)],
        }
    }

    fn collection(
        records: Vec<BasicScanVulnerability>,
    ) -> VulnerabilityCollection<BasicScanVulnerability> {
        VulnerabilityCollection::from_records(records, Severity::Medium).unwrap()
    }

    fn empty() -> VulnerabilityCollection<BasicScanVulnerability> {
        VulnerabilityCollection::new(Severity::Medium)
    }

    #[test]
    fn test_upgrade_fixed_everything() {
        // current scan reports one finding, the upgraded image none
        let current = collection(vec![record("CVE-1", "pkg-a", Severity::Medium)]);
        let upgraded = empty();
        let allowlist = empty();

        let verdict = reconcile(&allowlist, &current, &upgraded);
        assert!(!verdict.passed());

        let fixable = verdict.fixable_by_upgrade.unwrap();
        assert_eq!(fixable.record_count(), 1);
        assert!(fixable.records_for("pkg-a").is_some());
        assert!(verdict.newly_found_non_fixable.is_none());
    }

    #[test]
    fn test_upgrade_did_not_fix_unallowlisted_finding() {
        let current = collection(vec![record("CVE-2", "pkg-b", Severity::High)]);
        let upgraded = collection(vec![record("CVE-2", "pkg-b", Severity::High)]);
        let allowlist = empty();

        let verdict = reconcile(&allowlist, &current, &upgraded);
        assert!(!verdict.passed());
        assert!(verdict.fixable_by_upgrade.is_none());

        let non_fixable = verdict.newly_found_non_fixable.unwrap();
        assert_eq!(non_fixable.record_count(), 1);
        assert!(non_fixable.records_for("pkg-b").is_some());
    }

    #[test]
    fn test_allowlisted_and_unfixed_passes() {
        let current = collection(vec![record("CVE-3", "pkg-c", Severity::High)]);
        let upgraded = collection(vec![record("CVE-3", "pkg-c", Severity::High)]);
        let allowlist = collection(vec![record("CVE-3", "pkg-c", Severity::High)]);

        let verdict = reconcile(&allowlist, &current, &upgraded);
        assert!(verdict.passed());
    }

    #[test]
    fn test_allowlist_entry_fixed_by_upgrade_is_surfaced() {
        // the current scan no longer reports the allowlisted finding,
        // but the allowlist still carries it: the upgrade obsoletes it
        let current = empty();
        let upgraded = empty();
        let allowlist = collection(vec![record("CVE-4", "pkg-d", Severity::High)]);

        let verdict = reconcile(&allowlist, &current, &upgraded);
        assert!(!verdict.passed());
        let fixable = verdict.fixable_by_upgrade.unwrap();
        assert!(fixable.records_for("pkg-d").is_some());
    }

    #[test]
    fn test_fixable_union_merges_scan_and_allowlist_sides() {
        let current = collection(vec![
            record("CVE-5", "pkg-e", Severity::High),
            record("CVE-6", "pkg-f", Severity::High),
        ]);
        let upgraded = collection(vec![record("CVE-6", "pkg-f", Severity::High)]);
        let allowlist = collection(vec![
            record("CVE-6", "pkg-f", Severity::High),
            record("CVE-7", "pkg-g", Severity::High),
        ]);

        let verdict = reconcile(&allowlist, &current, &upgraded);
        let fixable = verdict.fixable_by_upgrade.unwrap();
        // CVE-5 from the scan side, CVE-7 from the allowlist side
        assert_eq!(fixable.record_count(), 2);
        assert!(fixable.records_for("pkg-e").is_some());
        assert!(fixable.records_for("pkg-g").is_some());
        // CVE-6 survives the upgrade but is allowlisted
        assert!(verdict.newly_found_non_fixable.is_none());
    }

    #[test]
    fn test_all_empty_passes() {
        let verdict = reconcile(&empty(), &empty(), &empty());
        assert!(verdict.passed());
    }
}
