use serde_json::json;

/// One raw basic-scan finding, the shape the basic scan API returns.
pub fn raw_basic_finding(cve: &str, package: &str, severity: &str) -> serde_json::Value {
    json!({
        "name": cve,
        "description": format!("{} affects {}", cve, package),
        "uri": format!("https://cve.example.com/{}", cve),
        "severity": severity,
        "attributes": [
            {"key": "package_name", "value": package},
            {"key": "package_version", "value": "1.0.0"}
        ]
    })
}

/// One raw enhanced-scan finding with a single vulnerable package.
pub fn raw_enhanced_finding(cve: &str, package: &str, base_score: f64) -> serde_json::Value {
    json!({
        "description": format!("{} affects {}", cve, package),
        "packageVulnerabilityDetails": {
            "vulnerabilityId": cve,
            "sourceUrl": format!("https://nvd.example.com/{}", cve),
            "source": "NVD",
            "cvss": [{"version": "3.1", "baseScore": base_score}],
            "vulnerablePackages": [{
                "name": package,
                "version": "2.31-0ubuntu9",
                "release": "9",
                "filePath": format!("/usr/lib/{}", package),
                "packageManager": "OS"
            }]
        },
        "remediation": {"recommendation": {"text": "Upgrade the package"}},
        "severity": "HIGH",
        "status": "ACTIVE",
        "title": format!("{} - {}", cve, package)
    })
}
