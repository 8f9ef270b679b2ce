use crate::shared::error::ScanGateError;
use crate::shared::Result;
use std::fmt;
use std::str::FromStr;

/// A container image reference of the form `[registry/]repository:tag`.
///
/// The repository part may itself contain slashes; the tag separator is
/// the last `:` after the last `/`, so registries with a port number
/// parse correctly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    pub registry: Option<String>,
    pub repository: String,
    pub tag: String,
}

impl ImageReference {
    pub fn new(
        registry: Option<String>,
        repository: impl Into<String>,
        tag: impl Into<String>,
    ) -> Self {
        Self {
            registry,
            repository: repository.into(),
            tag: tag.into(),
        }
    }
}

impl FromStr for ImageReference {
    type Err = ScanGateError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let last_slash = s.rfind('/');
        let tag_separator = match s.rfind(':') {
            Some(position) if last_slash.map_or(true, |slash| position > slash) => position,
            _ => {
                return Err(ScanGateError::InvalidImageReference {
                    value: s.to_string(),
                    reason: "missing tag".to_string(),
                })
            }
        };
        let (name_part, tag) = (&s[..tag_separator], &s[tag_separator + 1..]);
        if tag.is_empty() {
            return Err(ScanGateError::InvalidImageReference {
                value: s.to_string(),
                reason: "empty tag".to_string(),
            });
        }
        let (registry, repository) = match name_part.split_once('/') {
            Some((registry, repository)) => (Some(registry.to_string()), repository),
            None => (None, name_part),
        };
        if repository.is_empty() {
            return Err(ScanGateError::InvalidImageReference {
                value: s.to_string(),
                reason: "empty repository".to_string(),
            });
        }
        Ok(Self {
            registry,
            repository: repository.to_string(),
            tag: tag.to_string(),
        })
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.registry {
            Some(registry) => write!(f, "{}/{}:{}", registry, self.repository, self.tag),
            None => write!(f, "{}:{}", self.repository, self.tag),
        }
    }
}

/// ScanResultsSource port for obtaining raw scan findings.
///
/// The polling state machine behind a registry scan (start, pending,
/// active, failed) lives behind this port; the core only consumes
/// already-materialized finding lists.
pub trait ScanResultsSource {
    /// Blocks until the scan for `image` has completed.
    ///
    /// # Errors
    /// Returns an error when the scan fails, or when it does not reach a
    /// completed state within the source's deadline; the error carries
    /// the last observed status.
    fn wait_for_completion(&self, image: &ImageReference) -> Result<()>;

    /// Returns the raw findings of a completed scan, one JSON value per
    /// finding, in the upstream format selected by the caller's record
    /// type.
    fn fetch_findings(&self, image: &ImageReference) -> Result<Vec<serde_json::Value>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_reference() {
        let reference: ImageReference =
            "registry.example.com/team/image:2.0-gpu".parse().unwrap();
        assert_eq!(reference.registry.as_deref(), Some("registry.example.com"));
        assert_eq!(reference.repository, "team/image");
        assert_eq!(reference.tag, "2.0-gpu");
    }

    #[test]
    fn test_parse_registry_with_port() {
        let reference: ImageReference = "localhost:5000/image:latest".parse().unwrap();
        assert_eq!(reference.registry.as_deref(), Some("localhost:5000"));
        assert_eq!(reference.repository, "image");
        assert_eq!(reference.tag, "latest");
    }

    #[test]
    fn test_parse_without_registry() {
        let reference: ImageReference = "image:latest".parse().unwrap();
        assert_eq!(reference.registry, None);
        assert_eq!(reference.repository, "image");
    }

    #[test]
    fn test_parse_missing_tag_is_error() {
        assert!("registry.example.com/image".parse::<ImageReference>().is_err());
        assert!("localhost:5000/image".parse::<ImageReference>().is_err());
    }

    #[test]
    fn test_parse_empty_repository_is_error() {
        assert!("registry.example.com/:tag".parse::<ImageReference>().is_err());
    }

    #[test]
    fn test_display_round_trip() {
        let raw = "registry.example.com/team/image:2.0";
        let reference: ImageReference = raw.parse().unwrap();
        assert_eq!(reference.to_string(), raw);
    }
}
