//! Analyzer port wrapping the external static-analysis tool.

use crate::analysis::domain::{AnalysisReport, FileSet};
use async_trait::async_trait;

/// Invocation contract for the external analyzer.
///
/// Implementations always produce a report. Spawn failures, timeouts, and
/// unusable output are folded into [`AnalysisReport::errored`] rather than
/// returned as errors, so a failed invocation can only ever fail the gate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyses the given files and returns the resulting report.
    async fn analyze(&self, files: &FileSet) -> AnalysisReport;
}
