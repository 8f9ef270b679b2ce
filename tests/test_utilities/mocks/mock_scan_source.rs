use scan_gate::prelude::*;
use std::collections::HashMap;

/// Mock ScanResultsSource serving canned findings per image tag
#[derive(Default)]
pub struct MockScanSource {
    findings_by_tag: HashMap<String, Vec<serde_json::Value>>,
    fail_for_tag: Option<String>,
}

impl MockScanSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_findings(mut self, tag: &str, findings: Vec<serde_json::Value>) -> Self {
        self.findings_by_tag.insert(tag.to_string(), findings);
        self
    }

    pub fn with_failure_for(mut self, tag: &str) -> Self {
        self.fail_for_tag = Some(tag.to_string());
        self
    }
}

impl ScanResultsSource for MockScanSource {
    fn wait_for_completion(&self, image: &ImageReference) -> Result<()> {
        if self.fail_for_tag.as_deref() == Some(image.tag.as_str()) {
            anyhow::bail!("scan ended in state FAILED for {}", image);
        }
        Ok(())
    }

    fn fetch_findings(&self, image: &ImageReference) -> Result<Vec<serde_json::Value>> {
        Ok(self
            .findings_by_tag
            .get(&image.tag)
            .cloned()
            .unwrap_or_default())
    }
}
