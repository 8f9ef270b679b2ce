pub mod fetch_scan_lists;
pub mod reconcile_image;

pub use fetch_scan_lists::FetchScanListsUseCase;
pub use reconcile_image::ReconcileImageUseCase;
