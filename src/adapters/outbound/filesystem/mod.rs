pub mod directory_archive;
pub mod report_writer;
pub mod scan_export_reader;

pub use directory_archive::DirectoryArchive;
pub use report_writer::{FileReportWriter, StdoutReportWriter};
pub use scan_export_reader::FileSystemReader;
