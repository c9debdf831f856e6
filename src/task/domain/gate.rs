//! Quality gate decision.
//!
//! [`evaluate`] is a pure function of a report and a task's thresholds. It
//! never invokes the analyzer and holds no state, so a report can be
//! re-evaluated freely.

use super::GateThresholds;
use crate::analysis::domain::AnalysisReport;
use serde::Serialize;
use std::fmt;

/// Why the gate passed or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateReason {
    /// The analyzer invocation failed; never a pass.
    Error,
    /// More critical issues than the task tolerates.
    CriticalIssuesExceeded,
    /// Average quality score under the task's minimum.
    QualityBelowThreshold,
    /// All thresholds met.
    Passed,
}

impl GateReason {
    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::CriticalIssuesExceeded => "critical_issues_exceeded",
            Self::QualityBelowThreshold => "quality_below_threshold",
            Self::Passed => "passed",
        }
    }
}

impl fmt::Display for GateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one gate evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GateResult {
    passed: bool,
    reason: GateReason,
}

impl GateResult {
    const fn from_reason(reason: GateReason) -> Self {
        Self {
            passed: matches!(reason, GateReason::Passed),
            reason,
        }
    }

    /// Returns `true` when the task may be marked completed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    /// Returns the deciding reason.
    #[must_use]
    pub const fn reason(&self) -> GateReason {
        self.reason
    }
}

/// Decides whether a report satisfies the given thresholds.
///
/// Rules are checked in a fixed order and the first match wins:
///
/// 1. an errored report fails with [`GateReason::Error`];
/// 2. too many critical issues fail with
///    [`GateReason::CriticalIssuesExceeded`];
/// 3. a low average score fails with [`GateReason::QualityBelowThreshold`];
/// 4. anything else passes.
///
/// # Examples
///
/// ```
/// use sniff_gate::analysis::domain::AnalysisReport;
/// use sniff_gate::task::domain::{GateReason, GateThresholds, evaluate};
///
/// let thresholds = GateThresholds::new(85.0, 0).expect("valid thresholds");
/// let report = AnalysisReport::from_summary(3, 1, 90.0);
///
/// let result = evaluate(&report, thresholds);
/// assert!(!result.passed());
/// assert_eq!(result.reason(), GateReason::CriticalIssuesExceeded);
/// ```
#[must_use]
pub fn evaluate(report: &AnalysisReport, thresholds: GateThresholds) -> GateResult {
    let reason = if report.is_errored() {
        GateReason::Error
    } else if report.critical_issues() > thresholds.max_critical_issues() {
        GateReason::CriticalIssuesExceeded
    } else if report.average_quality_score().value() < thresholds.min_quality_score() {
        GateReason::QualityBelowThreshold
    } else {
        GateReason::Passed
    };
    GateResult::from_reason(reason)
}
