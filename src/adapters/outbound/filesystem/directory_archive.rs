use crate::ports::outbound::ArtifactArchive;
use crate::shared::error::ScanGateError;
use crate::shared::Result;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::Serializer;
use std::fs;
use std::path::{Path, PathBuf};

/// DirectoryArchive adapter for archiving artifacts on the local disk
///
/// Implements the ArtifactArchive port against a directory, the default
/// archive in CI environments that mount a shared workspace. The
/// directory is created on first use; returned location references are
/// the written file paths.
pub struct DirectoryArchive {
    directory: PathBuf,
}

impl DirectoryArchive {
    pub fn new(directory: PathBuf) -> Self {
        Self { directory }
    }

    fn target_path(&self, file_name: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.directory).map_err(|e| ScanGateError::FileWriteError {
            path: self.directory.clone(),
            details: e.to_string(),
        })?;
        Ok(self.directory.join(file_name))
    }

    fn write(&self, path: &Path, bytes: &[u8]) -> Result<String> {
        fs::write(path, bytes).map_err(|e| ScanGateError::FileWriteError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        Ok(path.display().to_string())
    }
}

impl ArtifactArchive for DirectoryArchive {
    fn archive_json(&self, file_name: &str, document: &serde_json::Value) -> Result<String> {
        let path = self.target_path(file_name)?;
        // same 4-space indentation as persisted allowlists, so archived
        // lists diff cleanly against files in the repository
        let mut buffer = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        document.serialize(&mut serializer)?;
        self.write(&path, &buffer)
    }

    fn archive_text(&self, file_name: &str, content: &str) -> Result<String> {
        let path = self.target_path(file_name)?;
        self.write(&path, content.as_bytes())
    }
}
