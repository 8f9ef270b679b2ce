use std::collections::BTreeSet;

/// Maps a scanner-reported package name to the name the distribution's
/// package manager uses.
///
/// A handful of packages are reported by the scanner under their source
/// package name while the installable binary package is named
/// differently. Unknown names pass through unchanged. The table is a
/// fixed, process-wide lookup; it is never mutated at runtime.
pub fn distribution_package_name(scanner_name: &str) -> &str {
    match scanner_name {
        "cyrus-sasl2" => "libsasl2-2",
        "glibc" => "libc6",
        "libopenmpt" => "libopenmpt-dev",
        "fribidi" => "libfribidi-dev",
        other => other,
    }
}

/// Merges the packages named by a fixable partition into an existing
/// upgrade package list.
///
/// Scanner names are remapped first, then the union is returned sorted
/// and deduplicated, one package per entry, ready to be written back one
/// name per line.
pub fn merge_upgrade_package_list(
    existing: &[String],
    newly_fixable: &[String],
) -> Vec<String> {
    let mut merged: BTreeSet<String> = existing
        .iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| name.trim().to_string())
        .collect();
    merged.extend(
        newly_fixable
            .iter()
            .map(|name| distribution_package_name(name).to_string()),
    );
    merged.into_iter().collect()
}
