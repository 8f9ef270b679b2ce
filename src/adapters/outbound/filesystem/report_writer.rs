use crate::ports::outbound::ReportSink;
use crate::shared::error::ScanGateError;
use crate::shared::Result;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// FileReportWriter adapter for writing the report to a file
///
/// This adapter implements the ReportSink port for file output.
pub struct FileReportWriter {
    output_path: PathBuf,
}

impl FileReportWriter {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Validates that the parent directory exists before writing
    fn validate_parent_directory(&self) -> Result<()> {
        if let Some(parent) = self.output_path.parent() {
            if !parent.exists() && parent != Path::new("") {
                return Err(ScanGateError::FileWriteError {
                    path: self.output_path.clone(),
                    details: format!("Parent directory does not exist: {}", parent.display()),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Rejects writing through a symbolic link at the output path.
    fn validate_output_security(&self) -> Result<()> {
        if self.output_path.exists() {
            let metadata =
                fs::symlink_metadata(&self.output_path).map_err(|e| ScanGateError::FileWriteError {
                    path: self.output_path.clone(),
                    details: e.to_string(),
                })?;
            if metadata.is_symlink() {
                return Err(ScanGateError::FileWriteError {
                    path: self.output_path.clone(),
                    details: "Security: Output path is a symbolic link. For security reasons, writing to symbolic links is not allowed.".to_string(),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl ReportSink for FileReportWriter {
    fn present(&self, content: &str) -> Result<()> {
        self.validate_parent_directory()?;
        self.validate_output_security()?;

        fs::write(&self.output_path, content).map_err(|e| ScanGateError::FileWriteError {
            path: self.output_path.clone(),
            details: e.to_string(),
        })?;

        eprintln!("✅ Report written: {}", self.output_path.display());
        Ok(())
    }
}

/// StdoutReportWriter adapter for writing the report to stdout
pub struct StdoutReportWriter;

impl StdoutReportWriter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StdoutReportWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportSink for StdoutReportWriter {
    fn present(&self, content: &str) -> Result<()> {
        io::stdout()
            .write_all(content.as_bytes())
            .map_err(|e| anyhow::anyhow!("Failed to write to stdout: {}", e))?;
        Ok(())
    }
}
