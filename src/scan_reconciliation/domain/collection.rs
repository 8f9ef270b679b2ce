use crate::scan_reconciliation::domain::record::VulnerabilityRecord;
use crate::scan_reconciliation::domain::Severity;
use crate::shared::error::ScanGateError;
use crate::shared::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A package-keyed collection of canonical vulnerability records.
///
/// Collections are parameterized by a minimum-severity threshold at
/// construction time; records below the threshold are never inserted.
/// All transformations (difference, union) produce a new collection,
/// never mutate in place.
///
/// The persisted form is the [`sorted_view`](Self::sorted_view) written
/// with 4-space indentation, keeping allowlist files diffable in version
/// control.
#[derive(Debug, Clone)]
pub struct VulnerabilityCollection<R: VulnerabilityRecord> {
    records: BTreeMap<String, Vec<R>>,
    threshold: Severity,
}

impl<R: VulnerabilityRecord> VulnerabilityCollection<R> {
    /// Creates an empty collection with the given inclusion threshold.
    pub fn new(threshold: Severity) -> Self {
        Self {
            records: BTreeMap::new(),
            threshold,
        }
    }

    /// Builds a collection from canonical records, grouping by package
    /// name and dropping records below the threshold.
    ///
    /// # Errors
    /// A record with no derivable package name is a structural error.
    pub fn from_records(records: Vec<R>, threshold: Severity) -> Result<Self> {
        for record in &records {
            if record.package_name().is_none() {
                return Err(ScanGateError::MalformedFinding {
                    details: format!(
                        "finding {} carries no package name",
                        record.vulnerability_id()
                    ),
                }
                .into());
            }
        }
        Ok(Self::regroup(records, threshold))
    }

    /// Normalizes raw scanner output and builds a collection from it.
    pub fn from_scan_findings(findings: &[serde_json::Value], threshold: Severity) -> Result<Self> {
        Self::from_records(R::from_raw_findings(findings)?, threshold)
    }

    /// Loads a previously saved canonical-form JSON mapping.
    ///
    /// The severity filter is reapplied on load, so a collection built
    /// from a file honors its own threshold even when the file was
    /// produced with a lower one. Grouping keys are re-derived from the
    /// records themselves, which keeps the key/record consistency
    /// invariant even for hand-edited files.
    pub fn from_file(path: &Path, threshold: Severity) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ScanGateError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        let persisted: BTreeMap<String, Vec<R>> =
            serde_json::from_str(&content).map_err(|e| ScanGateError::AllowlistParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;
        let records = persisted.into_values().flatten().collect();
        Self::from_records(records, threshold)
    }

    /// Writes the sorted canonical form to `path`.
    ///
    /// # Errors
    /// Persisting an empty collection is an explicit usage error; callers
    /// must check emptiness first or treat it as "nothing to report".
    pub fn save(&self, path: &Path) -> Result<()> {
        if self.is_empty() {
            return Err(ScanGateError::EmptyCollectionSave {
                path: path.to_path_buf(),
            }
            .into());
        }
        let sorted = self.sorted_view();
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        sorted.serialize(&mut serializer)?;
        fs::write(path, buffer).map_err(|e| ScanGateError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        Ok(())
    }

    /// True when the collection holds no records at all.
    pub fn is_empty(&self) -> bool {
        self.records.values().all(|records| records.is_empty())
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    /// Package names present in the collection, in sorted order.
    pub fn package_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.keys().map(String::as_str)
    }

    /// Number of records across all packages.
    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    /// Records of one package, if present.
    pub fn records_for(&self, package_name: &str) -> Option<&[R]> {
        self.records.get(package_name).map(Vec::as_slice)
    }

    /// All records across all packages, the substrate for the set
    /// operations.
    pub fn flattened(&self) -> Vec<&R> {
        self.records.values().flatten().collect()
    }

    /// True when an equivalent record exists under the probe's package.
    ///
    /// Package-name lookup first, then a linear scan with the
    /// format-specific equivalence predicate. A probe without a package
    /// name, or with an unknown package, is never contained.
    pub fn contains(&self, probe: &R) -> bool {
        let Some(package_name) = probe.package_name() else {
            return false;
        };
        let Some(candidates) = self.records.get(package_name) else {
            return false;
        };
        candidates.iter().any(|record| probe.equivalent(record))
    }

    /// Deduplicated, deterministically ordered view of the collection.
    ///
    /// Inner lists are deduplicated by full-record equality (not the
    /// equivalence predicate) and sorted by vulnerability identifier;
    /// the outer map is key-sorted. Required before persistence and
    /// before position-paired equality checks.
    pub fn sorted_view(&self) -> BTreeMap<String, Vec<R>> {
        let mut view = BTreeMap::new();
        for (package_name, records) in &self.records {
            let mut unique: Vec<R> = Vec::new();
            for record in records {
                if !unique.contains(record) {
                    unique.push(record.clone());
                }
            }
            unique.sort_by(|a, b| a.vulnerability_id().cmp(b.vulnerability_id()));
            view.insert(package_name.clone(), unique);
        }
        view
    }

    /// The sorted view as a JSON value, used for archiving and summaries.
    pub fn sorted_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self.sorted_view())?)
    }

    /// Position-paired equality under the equivalence predicate.
    ///
    /// True iff both collections hold the same package keys with the same
    /// per-key cardinality and every sorted-position pair is equivalent.
    pub fn same_vulnerabilities(&self, other: &Self) -> bool {
        let own = self.sorted_view();
        let theirs = other.sorted_view();
        if own.len() != theirs.len() {
            return false;
        }
        for ((own_key, own_records), (their_key, their_records)) in
            own.iter().zip(theirs.iter())
        {
            if own_key != their_key || own_records.len() != their_records.len() {
                return false;
            }
            let all_equivalent = own_records
                .iter()
                .zip(their_records.iter())
                .all(|(a, b)| a.equivalent(b));
            if !all_equivalent {
                return false;
            }
        }
        true
    }

    /// Records of `self` with no equivalent record anywhere in `other`.
    ///
    /// Returns `None` when `self` is empty or nothing is missing; the
    /// result is rebuilt through normal construction, so it is
    /// re-filtered by `self`'s threshold.
    pub fn difference(&self, other: &Self) -> Option<Self> {
        if self.is_empty() {
            return None;
        }
        let missing: Vec<R> = self
            .flattened()
            .into_iter()
            .filter(|record| !other.contains(record))
            .cloned()
            .collect::<Vec<R>>();
        if missing.is_empty() {
            return None;
        }
        Some(Self::regroup(missing, self.threshold))
    }

    /// Union of both collections with exact duplicates removed.
    ///
    /// Deduplication uses full structural equality, not the equivalence
    /// predicate: near-matches from different scans are both kept, only
    /// literal duplicate entries collapse. Returns `None` when both
    /// sides are empty.
    pub fn union(&self, other: &Self) -> Option<Self> {
        let mut combined: Vec<R> = Vec::new();
        for record in self.flattened().into_iter().chain(other.flattened()) {
            if !combined.contains(record) {
                combined.push(record.clone());
            }
        }
        if combined.is_empty() {
            return None;
        }
        Some(Self::regroup(combined, self.threshold))
    }

    /// Groups already-validated records; records without a package name
    /// cannot occur inside a collection and are skipped.
    fn regroup(records: impl IntoIterator<Item = R>, threshold: Severity) -> Self {
        let mut collection = Self::new(threshold);
        for record in records {
            if record.severity() < threshold {
                continue;
            }
            let Some(package_name) = record.package_name().map(str::to_string) else {
                continue;
            };
            collection
                .records
                .entry(package_name)
                .or_default()
                .push(record);
        }
        collection
    }
}
