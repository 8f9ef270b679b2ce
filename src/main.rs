mod adapters;
mod application;
mod cli;
mod config;
mod ports;
mod scan_reconciliation;
mod shared;

use adapters::outbound::console::StderrProgressReporter;
use adapters::outbound::filesystem::{
    DirectoryArchive, FileReportWriter, FileSystemReader, StdoutReportWriter,
};
use adapters::outbound::network::RegistryScanClient;
use application::dto::ReconcileRequest;
use application::use_cases::{FetchScanListsUseCase, ReconcileImageUseCase};
use cli::{Args, ScanFormat};
use config::ScanGateConfig;
use ports::outbound::{ImageReference, ProgressReporter, ReportSink};
use scan_reconciliation::domain::{
    BasicScanVulnerability, EnhancedScanVulnerability, Severity, VulnerabilityCollection,
    VulnerabilityRecord,
};
use shared::error::ExitCode;
use shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;
use std::time::Duration;

fn main() {
    match run() {
        Ok(exit_code) => process::exit(exit_code.as_i32()),
        Err(e) => {
            eprintln!("\n❌ An error occurred:\n");
            eprintln!("{}", e);

            // Display error chain
            let mut source = e.source();
            while let Some(err) = source {
                eprintln!("\nCaused by: {}", err);
                source = err.source();
            }

            eprintln!();
            process::exit(ExitCode::ApplicationError.as_i32());
        }
    }
}

fn run() -> Result<ExitCode> {
    // Parse command-line arguments and merge the optional config file
    let args = Args::parse_args();
    let config = ScanGateConfig::load_or_default(args.config.as_deref())?;

    let threshold = resolve_threshold(&args, &config)?;
    let archive_dir = args
        .archive_dir
        .clone()
        .or(config.defaults.archive_dir.clone())
        .unwrap_or_else(|| PathBuf::from("scan-gate-artifacts"));

    match args.scan_format {
        ScanFormat::Basic => run_gate::<BasicScanVulnerability>(&args, &config, threshold, archive_dir),
        ScanFormat::Enhanced => {
            run_gate::<EnhancedScanVulnerability>(&args, &config, threshold, archive_dir)
        }
    }
}

/// CLI threshold flag wins over the config file; the default matches the
/// severity the allowlists are curated at.
fn resolve_threshold(args: &Args, config: &ScanGateConfig) -> Result<Severity> {
    if let Some(threshold) = args.threshold {
        return Ok(threshold);
    }
    match &config.defaults.threshold {
        Some(name) => Ok(Severity::from_str(name)?),
        None => Ok(Severity::Medium),
    }
}

fn run_gate<R: VulnerabilityRecord>(
    args: &Args,
    config: &ScanGateConfig,
    threshold: Severity,
    archive_dir: PathBuf,
) -> Result<ExitCode> {
    let progress_reporter = StderrProgressReporter::new();
    let reader = FileSystemReader::new();

    // Current and upgraded scan lists, from export files or the scan API
    let (current_scan, upgraded_scan) = load_scan_lists::<R>(args, config, threshold, &reader)?;

    // Persisted allowlist; a missing file simply means nothing has been
    // allowlisted for this image yet
    let allowlist = if args.allowlist.exists() {
        VulnerabilityCollection::<R>::from_file(&args.allowlist, threshold)?
    } else {
        progress_reporter.report(&format!(
            "No allowlist at {}; starting from an empty one",
            args.allowlist.display()
        ));
        VulnerabilityCollection::new(threshold)
    };

    let mut request = ReconcileRequest::new(args.image_uri.clone(), threshold, args.allowlist.clone());
    request.proposed_allowlist_path = args.proposed_allowlist.clone();
    if let Some(package_list_path) = &args.upgrade_package_list {
        request.existing_upgrade_packages = reader.read_package_lines(package_list_path)?;
        request.upgrade_package_list_path = Some(package_list_path.clone());
    }

    let use_case = ReconcileImageUseCase::new(DirectoryArchive::new(archive_dir), progress_reporter);
    let response = use_case.execute(&request, &allowlist, &current_scan, &upgraded_scan)?;

    // Render and deliver the report
    let formatter = args.format.create_formatter();
    let report = formatter.format(&response)?;
    let sink: Box<dyn ReportSink> = match &args.output {
        Some(output_path) => Box::new(FileReportWriter::new(output_path.clone())),
        None => Box::new(StdoutReportWriter::new()),
    };
    sink.present(&report)?;

    if response.passed() {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::VulnerabilitiesDetected)
    }
}

/// Loads the current and post-upgrade scan lists.
///
/// With `--registry-endpoint` both are fetched live; the upgraded image
/// is expected under the `<tag>-upgraded` tag the upgrade pipeline
/// pushes. Otherwise both come from export files.
fn load_scan_lists<R: VulnerabilityRecord>(
    args: &Args,
    config: &ScanGateConfig,
    threshold: Severity,
    reader: &FileSystemReader,
) -> Result<(VulnerabilityCollection<R>, VulnerabilityCollection<R>)> {
    let endpoint = args
        .registry_endpoint
        .clone()
        .or(config.registry.endpoint.clone());

    // Explicitly given export files win over a configured endpoint.
    let use_endpoint = args.current.is_none() && args.upgraded.is_none();

    if let (Some(endpoint), true) = (endpoint, use_endpoint) {
        let image: ImageReference = args.image_uri.parse()?;
        let upgraded_image = ImageReference::new(
            image.registry.clone(),
            image.repository.clone(),
            format!("{}-upgraded", image.tag),
        );

        let mut client = RegistryScanClient::new(endpoint, StderrProgressReporter::new())?;
        if let Some(poll_timeout_secs) = config.registry.poll_timeout_secs {
            client = client.with_poll_timeout(Duration::from_secs(poll_timeout_secs));
        }
        let fetch = FetchScanListsUseCase::new(client, StderrProgressReporter::new());
        let current_scan = fetch.fetch::<R>(&image, threshold)?;
        let upgraded_scan = fetch.fetch::<R>(&upgraded_image, threshold)?;
        return Ok((current_scan, upgraded_scan));
    }

    let current_path = require_export_path(args.current.as_deref(), "--current")?;
    let upgraded_path = require_export_path(args.upgraded.as_deref(), "--upgraded")?;
    let current_scan =
        VulnerabilityCollection::from_scan_findings(&reader.read_findings(current_path)?, threshold)?;
    let upgraded_scan = VulnerabilityCollection::from_scan_findings(
        &reader.read_findings(upgraded_path)?,
        threshold,
    )?;
    Ok((current_scan, upgraded_scan))
}

fn require_export_path<'a>(path: Option<&'a Path>, flag: &str) -> Result<&'a Path> {
    path.ok_or_else(|| {
        anyhow::anyhow!(
            "{} is required unless --registry-endpoint (or a configured endpoint) is used",
            flag
        )
    })
}
