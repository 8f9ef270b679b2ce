use crate::shared::error::ScanGateError;
use crate::shared::Result;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Optional TOML configuration (`scan-gate.toml`).
///
/// Everything here can also be given on the command line; flags win over
/// file values. The file exists so CI jobs can keep the stable parts
/// (registry endpoint, archive directory, threshold) out of pipeline
/// definitions.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScanGateConfig {
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub registry: RegistryConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Minimum severity name, parsed with the same rules as the CLI flag.
    pub threshold: Option<String>,
    pub archive_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistryConfig {
    /// Base URL of the registry scan API.
    pub endpoint: Option<String>,
    /// Overall deadline when waiting for a scan to complete.
    pub poll_timeout_secs: Option<u64>,
}

impl ScanGateConfig {
    /// Loads the configuration from `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ScanGateError::FileReadError {
            path: path.to_path_buf(),
            details: e.to_string(),
        })?;
        toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))
    }

    /// Loads `path` when given, falls back to `scan-gate.toml` in the
    /// working directory when that exists, otherwise defaults.
    pub fn load_or_default(explicit_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit_path {
            return Self::load(path);
        }
        let implicit = Path::new("scan-gate.toml");
        if implicit.exists() {
            return Self::load(implicit);
        }
        Ok(Self::default())
    }
}
