use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow CI systems to distinguish between different
/// types of failures and successes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - reconciliation passed, nothing gates the build
    Success = 0,
    /// Outstanding vulnerabilities were found and gate the build
    VulnerabilitiesDetected = 1,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (malformed input, scan API error, file I/O error, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::VulnerabilitiesDetected => write!(f, "Vulnerabilities Detected (1)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for scan reconciliation.
///
/// Uses thiserror to derive Display and Error traits automatically,
/// reducing boilerplate while maintaining user-friendly error messages.
#[derive(Debug, Error)]
pub enum ScanGateError {
    #[error("Allowlist file not found: {}\n\n💡 Hint: {suggestion}", .path.display())]
    AllowlistNotFound { path: PathBuf, suggestion: String },

    #[error("Failed to parse allowlist file: {}\nDetails: {details}\n\n💡 Hint: Please verify that the file holds a package-keyed vulnerability map", .path.display())]
    AllowlistParseError { path: PathBuf, details: String },

    #[error("Failed to parse scan export: {}\nDetails: {details}\n\n💡 Hint: Expected the raw findings array as returned by the registry scan API", .path.display())]
    ScanExportParseError { path: PathBuf, details: String },

    /// A raw finding is structurally incomplete (missing required keys).
    #[error("Malformed scan finding: {details}")]
    MalformedFinding { details: String },

    /// Unrecognized severity vocabulary is propagated, never defaulted,
    /// so a scanner vocabulary change cannot be masked.
    #[error("Unknown severity: {value:?}. Expected one of UNDEFINED, INFORMATIONAL, LOW, MEDIUM, HIGH, CRITICAL")]
    UnknownSeverity { value: String },

    /// Persisting an empty collection is a caller error, distinct from
    /// "no vulnerabilities found".
    #[error("Refusing to save an empty vulnerability collection to {}", .path.display())]
    EmptyCollectionSave { path: PathBuf },

    #[error("Failed to read file: {}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions", .path.display())]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions", .path.display())]
    FileWriteError { path: PathBuf, details: String },

    #[error("Scan service error for {image}: {details}")]
    ScanServiceError { image: String, details: String },

    #[error("Scan for {image} did not complete within {waited_secs}s (last status: {status})")]
    ScanTimeout {
        image: String,
        status: String,
        waited_secs: u64,
    },

    #[error("Invalid image reference {value:?}: {reason}")]
    InvalidImageReference { value: String, reason: String },
}
