use scan_gate::prelude::*;
use std::sync::{Arc, Mutex};

/// Mock ArtifactArchive that captures archived documents in memory
#[derive(Default, Clone)]
pub struct MockArtifactArchive {
    pub stored: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockArtifactArchive {
    pub fn new() -> Self {
        Self {
            stored: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn stored_names(&self) -> Vec<String> {
        self.stored
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    pub fn stored_content(&self, file_name_suffix: &str) -> Option<String> {
        self.stored
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name.ends_with(file_name_suffix))
            .map(|(_, content)| content.clone())
    }
}

impl ArtifactArchive for MockArtifactArchive {
    fn archive_json(&self, file_name: &str, document: &serde_json::Value) -> Result<String> {
        self.stored
            .lock()
            .unwrap()
            .push((file_name.to_string(), document.to_string()));
        Ok(format!("mock-archive/{file_name}"))
    }

    fn archive_text(&self, file_name: &str, content: &str) -> Result<String> {
        self.stored
            .lock()
            .unwrap()
            .push((file_name.to_string(), content.to_string()));
        Ok(format!("mock-archive/{file_name}"))
    }
}
