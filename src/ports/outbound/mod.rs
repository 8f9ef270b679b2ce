/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces the application core uses to
/// interact with external systems (file system, scan API, console).
pub mod artifact_archive;
pub mod progress_reporter;
pub mod report_formatter;
pub mod report_sink;
pub mod scan_source;

pub use artifact_archive::ArtifactArchive;
pub use progress_reporter::ProgressReporter;
pub use report_formatter::ReportFormatter;
pub use report_sink::ReportSink;
pub use scan_source::{ImageReference, ScanResultsSource};
