use clap::Parser;
use std::path::PathBuf;
use std::str::FromStr;

use crate::adapters::outbound::formatters::{JsonReportFormatter, TextReportFormatter};
use crate::ports::outbound::ReportFormatter;
use crate::scan_reconciliation::domain::Severity;

/// Upstream scan format the exports were produced by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanFormat {
    Basic,
    Enhanced,
}

impl FromStr for ScanFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "basic" => Ok(ScanFormat::Basic),
            "enhanced" => Ok(ScanFormat::Enhanced),
            _ => Err(format!(
                "Invalid scan format: {}. Please specify 'basic' or 'enhanced'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum ReportFormat {
    Json,
    Text,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            _ => Err(format!(
                "Invalid format: {}. Please specify 'json' or 'text'",
                s
            )),
        }
    }
}

impl ReportFormat {
    /// Creates a formatter instance for the specified report format
    pub fn create_formatter(&self) -> Box<dyn ReportFormatter> {
        match self {
            ReportFormat::Json => Box::new(JsonReportFormatter::new()),
            ReportFormat::Text => Box::new(TextReportFormatter::new()),
        }
    }
}

/// Gate CI on newly introduced container image vulnerabilities
#[derive(Parser, Debug)]
#[command(name = "scan-gate")]
#[command(version)]
#[command(
    about = "Gate CI on newly introduced container image vulnerabilities",
    long_about = None
)]
pub struct Args {
    /// Image URI the scans belong to, used for artifact naming
    #[arg(short, long)]
    pub image_uri: String,

    /// Raw scan export of the image as released
    #[arg(long)]
    pub current: Option<PathBuf>,

    /// Raw scan export of the same image after an in-place package upgrade
    #[arg(long)]
    pub upgraded: Option<PathBuf>,

    /// Persisted allowlist file (a missing file is an empty allowlist)
    #[arg(short, long)]
    pub allowlist: PathBuf,

    /// Upstream scan format: basic or enhanced
    #[arg(short = 'F', long, default_value = "enhanced")]
    pub scan_format: ScanFormat,

    /// Minimum severity included in every collection (default: medium)
    #[arg(short, long)]
    pub threshold: Option<Severity>,

    /// Directory the failure-routine artifacts are archived into
    #[arg(long)]
    pub archive_dir: Option<PathBuf>,

    /// Report format: json or text
    #[arg(short, long, default_value = "text")]
    pub format: ReportFormat,

    /// Report file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Upgrade package list accompanying the allowlist; fixable packages
    /// are merged into it on failure
    #[arg(long)]
    pub upgrade_package_list: Option<PathBuf>,

    /// Save the post-upgrade scan list here as the proposed allowlist
    #[arg(long)]
    pub proposed_allowlist: Option<PathBuf>,

    /// Fetch scans from this registry scan API instead of export files
    #[arg(long)]
    pub registry_endpoint: Option<String>,

    /// TOML config file (defaults to ./scan-gate.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
