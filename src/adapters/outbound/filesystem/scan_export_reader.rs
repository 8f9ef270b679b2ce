use crate::shared::error::ScanGateError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum file size for security (100 MB)
const MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// FileSystemReader adapter for loading scan exports and package lists
///
/// Reads the raw findings a scan API returned, as exported to disk by
/// the CI pipeline. Exports come in two envelopes: a bare findings
/// array, or an object wrapping the array under `findings` (basic) or
/// `enhancedFindings` (enhanced).
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Safely read a file with security checks:
    /// - Reject symbolic links
    /// - Check file size limits
    /// - Validate file is a regular file
    fn safe_read_file(&self, path: &Path) -> Result<String> {
        let metadata = fs::symlink_metadata(path).map_err(|e| ScanGateError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;

        if metadata.is_symlink() {
            anyhow::bail!(
                "Security: {} is a symbolic link. For security reasons, symbolic links are not allowed.",
                path.display()
            );
        }

        if !metadata.is_file() {
            anyhow::bail!("{} is not a regular file", path.display());
        }

        let file_size = metadata.len();
        if file_size > MAX_FILE_SIZE {
            anyhow::bail!(
                "Security: {} is too large ({} bytes). Maximum allowed size is {} bytes.",
                path.display(),
                file_size,
                MAX_FILE_SIZE
            );
        }

        fs::read_to_string(path).map_err(|e| {
            ScanGateError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    /// Reads a scan export into one JSON value per raw finding.
    pub fn read_findings(&self, path: &Path) -> Result<Vec<serde_json::Value>> {
        let content = self.safe_read_file(path)?;
        let parsed: serde_json::Value =
            serde_json::from_str(&content).map_err(|e| ScanGateError::ScanExportParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            })?;

        let findings = match &parsed {
            serde_json::Value::Array(findings) => findings.clone(),
            serde_json::Value::Object(envelope) => envelope
                .get("findings")
                .or_else(|| envelope.get("enhancedFindings"))
                .and_then(|value| value.as_array())
                .cloned()
                .ok_or_else(|| ScanGateError::ScanExportParseError {
                    path: path.to_path_buf(),
                    details: "expected a findings array or an object with a \
                              `findings`/`enhancedFindings` key"
                        .to_string(),
                })?,
            _ => {
                return Err(ScanGateError::ScanExportParseError {
                    path: path.to_path_buf(),
                    details: "top-level JSON value is neither an array nor an object".to_string(),
                }
                .into())
            }
        };
        Ok(findings)
    }

    /// Reads an upgrade package list, one package name per line.
    ///
    /// A missing file yields an empty list: a new image simply has no
    /// list yet.
    pub fn read_package_lines(&self, path: &Path) -> Result<Vec<String>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = self.safe_read_file(path)?;
        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}
