use crate::ports::outbound::{ImageReference, ProgressReporter, ScanResultsSource};
use crate::shared::error::ScanGateError;
use crate::shared::Result;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// How a reported scan status is to be acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusClass {
    Complete,
    InProgress,
    Failed,
}

/// Registry scan API client
///
/// Implements the ScanResultsSource port against the registry's scan
/// HTTP API: poll the per-image scan status until it settles, then pull
/// the raw findings.
///
/// # Behavior
/// - Request timeout of 30 seconds per call
/// - Fixed poll interval; overall deadline defaults to 20 minutes, the
///   time freshly pushed images need before their first scan surfaces
/// - Does not retry failed requests (fail fast; CI retries the job)
pub struct RegistryScanClient<P> {
    client: reqwest::blocking::Client,
    base_url: String,
    poll_timeout: Duration,
    poll_interval: Duration,
    progress_reporter: P,
}

impl<P: ProgressReporter> RegistryScanClient<P> {
    const TIMEOUT_SECONDS: u64 = 30;
    const DEFAULT_POLL_TIMEOUT_SECS: u64 = 1200;
    const POLL_INTERVAL_SECS: u64 = 15;

    /// Creates a new client for the scan API at `base_url`.
    pub fn new(base_url: impl Into<String>, progress_reporter: P) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("scan-gate/{}", version);
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(Self::TIMEOUT_SECONDS))
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            poll_timeout: Duration::from_secs(Self::DEFAULT_POLL_TIMEOUT_SECS),
            poll_interval: Duration::from_secs(Self::POLL_INTERVAL_SECS),
            progress_reporter,
        })
    }

    /// Overrides the polling deadline.
    pub fn with_poll_timeout(mut self, poll_timeout: Duration) -> Self {
        self.poll_timeout = poll_timeout;
        self
    }

    fn status_url(&self, image: &ImageReference) -> String {
        format!(
            "{}/v1/repositories/{}/images/{}/scan-status",
            self.base_url,
            urlencoding::encode(&image.repository),
            urlencoding::encode(&image.tag)
        )
    }

    fn findings_url(&self, image: &ImageReference) -> String {
        format!(
            "{}/v1/repositories/{}/images/{}/scan-findings",
            self.base_url,
            urlencoding::encode(&image.repository),
            urlencoding::encode(&image.tag)
        )
    }

    fn fetch_status(&self, image: &ImageReference) -> Result<ScanStatusResponse> {
        let response = self.client.get(self.status_url(image)).send()?;
        if !response.status().is_success() {
            return Err(ScanGateError::ScanServiceError {
                image: image.to_string(),
                details: format!("scan status endpoint returned {}", response.status()),
            }
            .into());
        }
        Ok(response.json()?)
    }
}

#[derive(Debug, Deserialize)]
struct ScanStatusResponse {
    status: String,
    #[serde(default)]
    description: String,
}

/// Maps the scan API's status vocabulary onto poll decisions.
///
/// `PENDING` covers freshly pushed images whose first scan has not
/// surfaced yet; anything outside the known vocabulary is treated as a
/// failure rather than polled forever.
fn classify_status(status: &str) -> StatusClass {
    match status {
        "COMPLETE" | "ACTIVE" => StatusClass::Complete,
        "PENDING" | "IN_PROGRESS" | "SCANNING" => StatusClass::InProgress,
        _ => StatusClass::Failed,
    }
}

/// Unwraps the findings array from the API response body, which is
/// either a bare array or an envelope with a `findings` or
/// `enhancedFindings` key.
fn extract_findings(
    body: serde_json::Value,
    image: &ImageReference,
) -> Result<Vec<serde_json::Value>> {
    match body {
        serde_json::Value::Array(findings) => Ok(findings),
        serde_json::Value::Object(mut envelope) => envelope
            .remove("findings")
            .or_else(|| envelope.remove("enhancedFindings"))
            .and_then(|value| match value {
                serde_json::Value::Array(findings) => Some(findings),
                _ => None,
            })
            .ok_or_else(|| {
                ScanGateError::ScanServiceError {
                    image: image.to_string(),
                    details: "scan findings response carries no findings array".to_string(),
                }
                .into()
            }),
        _ => Err(ScanGateError::ScanServiceError {
            image: image.to_string(),
            details: "scan findings response is neither an array nor an object".to_string(),
        }
        .into()),
    }
}

impl<P: ProgressReporter> ScanResultsSource for RegistryScanClient<P> {
    fn wait_for_completion(&self, image: &ImageReference) -> Result<()> {
        let started = Instant::now();
        loop {
            let status = self.fetch_status(image)?;
            match classify_status(&status.status) {
                StatusClass::Complete => return Ok(()),
                StatusClass::Failed => {
                    return Err(ScanGateError::ScanServiceError {
                        image: image.to_string(),
                        details: format!(
                            "scan ended in state {} ({})",
                            status.status, status.description
                        ),
                    }
                    .into());
                }
                StatusClass::InProgress => {
                    let waited = started.elapsed();
                    if waited >= self.poll_timeout {
                        return Err(ScanGateError::ScanTimeout {
                            image: image.to_string(),
                            status: status.status,
                            waited_secs: waited.as_secs(),
                        }
                        .into());
                    }
                    self.progress_reporter
                        .report_waiting(waited.as_secs(), &status.status);
                    std::thread::sleep(self.poll_interval);
                }
            }
        }
    }

    fn fetch_findings(&self, image: &ImageReference) -> Result<Vec<serde_json::Value>> {
        let response = self.client.get(self.findings_url(image)).send()?;
        if !response.status().is_success() {
            return Err(ScanGateError::ScanServiceError {
                image: image.to_string(),
                details: format!("scan findings endpoint returned {}", response.status()),
            }
            .into());
        }
        let body: serde_json::Value = response.json()?;
        extract_findings(body, image)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct NullProgressReporter;

    impl ProgressReporter for NullProgressReporter {
        fn report(&self, _message: &str) {}
        fn report_waiting(&self, _waited_secs: u64, _status: &str) {}
        fn report_error(&self, _message: &str) {}
        fn report_completion(&self, _message: &str) {}
    }

    fn client() -> RegistryScanClient<NullProgressReporter> {
        RegistryScanClient::new("https://scans.example.com/", NullProgressReporter).unwrap()
    }

    fn image() -> ImageReference {
        "registry.example.com/team/image:2.0-gpu".parse().unwrap()
    }

    #[test]
    fn test_status_url_percent_encodes_repository() {
        let url = client().status_url(&image());
        assert_eq!(
            url,
            "https://scans.example.com/v1/repositories/team%2Fimage/images/2.0-gpu/scan-status"
        );
    }

    #[test]
    fn test_findings_url_shape() {
        let url = client().findings_url(&image());
        assert!(url.ends_with("/images/2.0-gpu/scan-findings"));
        assert!(url.starts_with("https://scans.example.com/v1/repositories/"));
    }

    #[test]
    fn test_classify_status() {
        assert_eq!(classify_status("COMPLETE"), StatusClass::Complete);
        assert_eq!(classify_status("ACTIVE"), StatusClass::Complete);
        assert_eq!(classify_status("PENDING"), StatusClass::InProgress);
        assert_eq!(classify_status("IN_PROGRESS"), StatusClass::InProgress);
        assert_eq!(classify_status("FAILED"), StatusClass::Failed);
        assert_eq!(classify_status("UNSUPPORTED_IMAGE"), StatusClass::Failed);
    }

    #[test]
    fn test_extract_findings_bare_array() {
        let findings = extract_findings(json!([{"name": "CVE-1"}]), &image()).unwrap();
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_extract_findings_enveloped() {
        let findings =
            extract_findings(json!({"findings": [{"name": "CVE-1"}]}), &image()).unwrap();
        assert_eq!(findings.len(), 1);
        let enhanced =
            extract_findings(json!({"enhancedFindings": []}), &image()).unwrap();
        assert!(enhanced.is_empty());
    }

    #[test]
    fn test_extract_findings_rejects_missing_array() {
        assert!(extract_findings(json!({"count": 3}), &image()).is_err());
        assert!(extract_findings(json!("oops"), &image()).is_err());
    }
}
