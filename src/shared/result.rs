/// Crate-wide Result alias over anyhow::Error, so fallible functions
/// compose with `?` across layers without per-module error plumbing.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
