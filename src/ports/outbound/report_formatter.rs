use crate::application::dto::ReconcileResponse;
use crate::shared::Result;

/// ReportFormatter port for rendering a reconciliation response.
///
/// This port abstracts the output representation (machine-readable JSON,
/// colored human-readable text) from the use case that produced the
/// response.
pub trait ReportFormatter {
    /// Renders the response as a complete report.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    fn format(&self, response: &ReconcileResponse) -> Result<String>;
}
