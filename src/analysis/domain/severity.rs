//! Detection severity levels.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tier attached to a single detection.
///
/// The gate only counts [`Severity::Critical`]; every other tier is carried
/// for reporting collaborators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Severity {
    /// Highest tier, counted against `max_critical_issues`.
    Critical,
    /// Significant problem.
    High,
    /// Moderate problem.
    Medium,
    /// Minor problem.
    Low,
    /// Informational note.
    Info,
    /// Any severity label the analyzer emitted that is not recognised.
    #[default]
    Unknown,
}

impl Severity {
    /// Returns the canonical lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
            Self::Unknown => "unknown",
        }
    }

    /// Returns `true` for the tier the gate counts as critical.
    #[must_use]
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Critical)
    }
}

impl From<&str> for Severity {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "critical" => Self::Critical,
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "info" => Self::Info,
            _ => Self::Unknown,
        }
    }
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
