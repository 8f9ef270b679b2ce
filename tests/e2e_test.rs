/// End-to-end tests for the CLI
mod test_utilities;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use test_utilities::fixtures::{raw_basic_finding, raw_enhanced_finding};

fn write_json(dir: &Path, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string_pretty(value).unwrap()).unwrap();
    path
}

// Exit code tests for CLI
mod exit_code_tests {
    use assert_cmd::cargo::cargo_bin_cmd;

    /// Exit code 0: --help should return success
    #[test]
    fn test_exit_code_help() {
        cargo_bin_cmd!("scan-gate").arg("--help").assert().code(0);
    }

    /// Exit code 0: --version should return success
    #[test]
    fn test_exit_code_version() {
        cargo_bin_cmd!("scan-gate").arg("--version").assert().code(0);
    }

    /// Exit code 2: Invalid arguments
    #[test]
    fn test_exit_code_invalid_argument() {
        cargo_bin_cmd!("scan-gate")
            .arg("--invalid-option")
            .assert()
            .code(2);
    }

    /// Exit code 2: Unknown severity for --threshold
    #[test]
    fn test_exit_code_unknown_threshold() {
        cargo_bin_cmd!("scan-gate")
            .args([
                "--image-uri",
                "registry.example.com/image:tag",
                "--allowlist",
                "allowlist.json",
                "--threshold",
                "severe",
            ])
            .assert()
            .code(2);
    }

    /// Exit code 3: Application error - missing scan export
    #[test]
    fn test_exit_code_missing_scan_export() {
        cargo_bin_cmd!("scan-gate")
            .args([
                "--image-uri",
                "registry.example.com/image:tag",
                "--allowlist",
                "allowlist.json",
                "--current",
                "/nonexistent/current.json",
                "--upgraded",
                "/nonexistent/upgraded.json",
            ])
            .assert()
            .code(3);
    }

    /// Exit code 3: Application error - export paths omitted entirely
    #[test]
    fn test_exit_code_no_inputs() {
        cargo_bin_cmd!("scan-gate")
            .args([
                "--image-uri",
                "registry.example.com/image:tag",
                "--allowlist",
                "allowlist.json",
            ])
            .assert()
            .code(3);
    }
}

#[test]
fn test_e2e_enhanced_pass() {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    let temp_dir = TempDir::new().unwrap();
    let finding = raw_enhanced_finding("CVE-2024-1000", "openssl", 7.5);
    let current = write_json(temp_dir.path(), "current.json", &serde_json::json!([finding]));
    let upgraded = write_json(temp_dir.path(), "upgraded.json", &serde_json::json!([finding]));

    // allowlist the finding so nothing gates the build
    let allowlist_dir = temp_dir.path().join("allowlists");
    fs::create_dir_all(&allowlist_dir).unwrap();
    let allowlist = allowlist_dir.join("image.os_scan_allowlist.json");
    {
        use scan_gate::prelude::*;
        let collection: VulnerabilityCollection<EnhancedScanVulnerability> =
            VulnerabilityCollection::from_scan_findings(
                &[raw_enhanced_finding("CVE-2024-1000", "openssl", 7.5)],
                Severity::Medium,
            )
            .unwrap();
        collection.save(&allowlist).unwrap();
    }

    cargo_bin_cmd!("scan-gate")
        .args([
            "--image-uri",
            "registry.example.com/team/image:2.0",
            "--current",
            current.to_str().unwrap(),
            "--upgraded",
            upgraded.to_str().unwrap(),
            "--allowlist",
            allowlist.to_str().unwrap(),
            "--archive-dir",
            temp_dir.path().join("artifacts").to_str().unwrap(),
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn test_e2e_enhanced_failure_writes_report_and_artifacts() {
    use assert_cmd::cargo::cargo_bin_cmd;

    let temp_dir = TempDir::new().unwrap();
    let current = write_json(
        temp_dir.path(),
        "current.json",
        &serde_json::json!([raw_enhanced_finding("CVE-2024-1001", "glibc", 9.8)]),
    );
    // upgrade did not help and nothing is allowlisted
    let upgraded = write_json(
        temp_dir.path(),
        "upgraded.json",
        &serde_json::json!([raw_enhanced_finding("CVE-2024-1001", "glibc", 9.8)]),
    );
    let allowlist = temp_dir.path().join("missing-allowlist.json");
    let archive_dir = temp_dir.path().join("artifacts");
    let report_path = temp_dir.path().join("report.json");

    cargo_bin_cmd!("scan-gate")
        .args([
            "--image-uri",
            "registry.example.com/team/image:2.0",
            "--current",
            current.to_str().unwrap(),
            "--upgraded",
            upgraded.to_str().unwrap(),
            "--allowlist",
            allowlist.to_str().unwrap(),
            "--archive-dir",
            archive_dir.to_str().unwrap(),
            "--format",
            "json",
            "--output",
            report_path.to_str().unwrap(),
        ])
        .assert()
        .code(1);

    // structured report for downstream automation
    let report: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(report["status"], "fail");
    assert!(report["summary"]["non_fixable_vulnerabilities"]["glibc"].is_array());

    // all four lists archived
    let archived: Vec<String> = fs::read_dir(&archive_dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(archived.len(), 4);
    assert!(archived.iter().any(|name| name.ends_with("-allowlist.json")));
    assert!(archived
        .iter()
        .any(|name| name.ends_with("-non-fixable-vulnerability-list.json")));
}

#[test]
fn test_e2e_basic_format_fixable_failure() {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    let temp_dir = TempDir::new().unwrap();
    let current = write_json(
        temp_dir.path(),
        "current.json",
        &serde_json::json!([raw_basic_finding("CVE-2024-1002", "openssl", "HIGH")]),
    );
    // the upgrade fixed it, so it lands in the fixable partition
    let upgraded = write_json(temp_dir.path(), "upgraded.json", &serde_json::json!([]));
    let allowlist = temp_dir.path().join("missing-allowlist.json");

    cargo_bin_cmd!("scan-gate")
        .args([
            "--image-uri",
            "registry.example.com/team/image:2.0",
            "--scan-format",
            "basic",
            "--current",
            current.to_str().unwrap(),
            "--upgraded",
            upgraded.to_str().unwrap(),
            "--allowlist",
            allowlist.to_str().unwrap(),
            "--archive-dir",
            temp_dir.path().join("artifacts").to_str().unwrap(),
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Fixable by package upgrade"))
        .stdout(predicate::str::contains("openssl (CVE-2024-1002)"));
}

#[test]
fn test_e2e_threshold_filters_below_minimum() {
    use assert_cmd::cargo::cargo_bin_cmd;
    use predicates::prelude::*;

    let temp_dir = TempDir::new().unwrap();
    // MEDIUM finding only; with --threshold high nothing is in scope
    let current = write_json(
        temp_dir.path(),
        "current.json",
        &serde_json::json!([raw_enhanced_finding("CVE-2024-1003", "zlib", 5.0)]),
    );
    let upgraded = write_json(temp_dir.path(), "upgraded.json", &serde_json::json!([]));
    let allowlist = temp_dir.path().join("missing-allowlist.json");

    cargo_bin_cmd!("scan-gate")
        .args([
            "--image-uri",
            "registry.example.com/team/image:2.0",
            "--current",
            current.to_str().unwrap(),
            "--upgraded",
            upgraded.to_str().unwrap(),
            "--allowlist",
            allowlist.to_str().unwrap(),
            "--threshold",
            "high",
            "--archive-dir",
            temp_dir.path().join("artifacts").to_str().unwrap(),
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("PASS"));
}

#[test]
fn test_e2e_malformed_export_is_application_error() {
    use assert_cmd::cargo::cargo_bin_cmd;

    let temp_dir = TempDir::new().unwrap();
    let current = temp_dir.path().join("current.json");
    fs::write(&current, "not json at all").unwrap();
    let upgraded = write_json(temp_dir.path(), "upgraded.json", &serde_json::json!([]));

    cargo_bin_cmd!("scan-gate")
        .args([
            "--image-uri",
            "registry.example.com/team/image:2.0",
            "--current",
            current.to_str().unwrap(),
            "--upgraded",
            upgraded.to_str().unwrap(),
            "--allowlist",
            temp_dir.path().join("allowlist.json").to_str().unwrap(),
        ])
        .assert()
        .code(3);
}
