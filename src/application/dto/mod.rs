pub mod reconcile_request;
pub mod reconcile_response;

pub use reconcile_request::ReconcileRequest;
pub use reconcile_response::{EditedFile, FailureSummary, ReconcileResponse, ReconcileStatus};
