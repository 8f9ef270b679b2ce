/// Mock implementations for testing
mod mock_artifact_archive;
mod mock_progress_reporter;
mod mock_scan_source;

pub use mock_artifact_archive::MockArtifactArchive;
pub use mock_progress_reporter::MockProgressReporter;
pub use mock_scan_source::MockScanSource;
