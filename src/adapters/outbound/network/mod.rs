pub mod registry_scan_client;

pub use registry_scan_client::RegistryScanClient;
