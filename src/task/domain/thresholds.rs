//! Per-task quality thresholds evaluated by the gate.

use super::TaskDomainError;

/// Limits a task's analysis report must satisfy before completion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateThresholds {
    min_quality_score: f64,
    max_critical_issues: usize,
}

impl GateThresholds {
    /// Minimum quality score applied when a task does not set one.
    pub const DEFAULT_MIN_QUALITY_SCORE: f64 = 80.0;
    /// Maximum critical issue count applied when a task does not set one.
    pub const DEFAULT_MAX_CRITICAL_ISSUES: usize = 0;

    /// Creates validated thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidQualityThreshold`] when the score is
    /// not finite or lies outside `0..=100`.
    pub fn new(
        min_quality_score: f64,
        max_critical_issues: usize,
    ) -> Result<Self, TaskDomainError> {
        if !(0.0..=100.0).contains(&min_quality_score) {
            return Err(TaskDomainError::InvalidQualityThreshold(min_quality_score));
        }
        Ok(Self {
            min_quality_score,
            max_critical_issues,
        })
    }

    /// Builds thresholds from optional settings, filling gaps with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidQualityThreshold`] for an invalid
    /// explicit score.
    pub fn from_optional(
        min_quality_score: Option<f64>,
        max_critical_issues: Option<usize>,
    ) -> Result<Self, TaskDomainError> {
        Self::new(
            min_quality_score.unwrap_or(Self::DEFAULT_MIN_QUALITY_SCORE),
            max_critical_issues.unwrap_or(Self::DEFAULT_MAX_CRITICAL_ISSUES),
        )
    }

    /// Returns the minimum acceptable average quality score.
    #[must_use]
    pub const fn min_quality_score(&self) -> f64 {
        self.min_quality_score
    }

    /// Returns the maximum tolerated number of critical issues.
    #[must_use]
    pub const fn max_critical_issues(&self) -> usize {
        self.max_critical_issues
    }
}

impl Default for GateThresholds {
    fn default() -> Self {
        Self {
            min_quality_score: Self::DEFAULT_MIN_QUALITY_SCORE,
            max_critical_issues: Self::DEFAULT_MAX_CRITICAL_ISSUES,
        }
    }
}
