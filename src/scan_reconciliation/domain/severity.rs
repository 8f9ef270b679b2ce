use crate::shared::error::ScanGateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordered severity scale shared by both scan formats.
///
/// The variant order defines the ordering used for minimum-severity
/// threshold filtering, so `Severity::Medium < Severity::High` holds.
/// The string form is the upper-case variant name, matching what the
/// scanners emit and what persisted allowlists store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Undefined,
    Informational,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Maps a CVSS v3.1 base score to a severity rating.
    ///
    /// Thresholds follow section 5 of the CVSS v3.1 specification
    /// (first.org/cvss/specification-document). A score of 0.0, or an
    /// absent score recorded as 0.0, maps to `Undefined`.
    pub fn from_cvss_v3_score(score: f64) -> Self {
        if score >= 9.0 {
            Severity::Critical
        } else if score >= 7.0 {
            Severity::High
        } else if score >= 4.0 {
            Severity::Medium
        } else if score >= 0.1 {
            Severity::Low
        } else {
            Severity::Undefined
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Undefined => "UNDEFINED",
            Severity::Informational => "INFORMATIONAL",
            Severity::Low => "LOW",
            Severity::Medium => "MEDIUM",
            Severity::High => "HIGH",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ScanGateError;

    /// Parses a severity name, case-insensitively.
    ///
    /// An unrecognized name is an error: silently defaulting could mask
    /// a vocabulary change in the scanner output.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "UNDEFINED" => Ok(Severity::Undefined),
            "INFORMATIONAL" => Ok(Severity::Informational),
            "LOW" => Ok(Severity::Low),
            "MEDIUM" => Ok(Severity::Medium),
            "HIGH" => Ok(Severity::High),
            "CRITICAL" => Ok(Severity::Critical),
            _ => Err(ScanGateError::UnknownSeverity {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Undefined < Severity::Informational);
        assert!(Severity::Informational < Severity::Low);
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn test_from_cvss_v3_score_boundaries() {
        assert_eq!(Severity::from_cvss_v3_score(9.5), Severity::Critical);
        assert_eq!(Severity::from_cvss_v3_score(9.0), Severity::Critical);
        assert_eq!(Severity::from_cvss_v3_score(8.9), Severity::High);
        assert_eq!(Severity::from_cvss_v3_score(7.0), Severity::High);
        assert_eq!(Severity::from_cvss_v3_score(6.9), Severity::Medium);
        assert_eq!(Severity::from_cvss_v3_score(4.0), Severity::Medium);
        assert_eq!(Severity::from_cvss_v3_score(3.9), Severity::Low);
        assert_eq!(Severity::from_cvss_v3_score(0.1), Severity::Low);
        assert_eq!(Severity::from_cvss_v3_score(0.0), Severity::Undefined);
    }

    #[test]
    fn test_from_str_valid() {
        assert_eq!(Severity::from_str("HIGH").unwrap(), Severity::High);
        assert_eq!(Severity::from_str("medium").unwrap(), Severity::Medium);
        assert_eq!(Severity::from_str("Critical").unwrap(), Severity::Critical);
    }

    #[test]
    fn test_from_str_unknown_is_error() {
        let result = Severity::from_str("SEVERE");
        assert!(result.is_err());
        let message = format!("{}", result.unwrap_err());
        assert!(message.contains("SEVERE"));
    }

    #[test]
    fn test_serde_round_trip_uses_uppercase_names() {
        let json = serde_json::to_string(&Severity::High).unwrap();
        assert_eq!(json, "\"HIGH\"");
        let parsed: Severity = serde_json::from_str("\"CRITICAL\"").unwrap();
        assert_eq!(parsed, Severity::Critical);
    }

    #[test]
    fn test_serde_rejects_unknown_severity() {
        let parsed: Result<Severity, _> = serde_json::from_str("\"SEVERE\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Severity::Informational), "INFORMATIONAL");
        assert_eq!(format!("{}", Severity::Undefined), "UNDEFINED");
    }
}
