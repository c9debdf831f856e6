//! Analyzer report model.

use super::Severity;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Quality score in the closed range `0..=100`.
///
/// Out-of-range values are clamped and `NaN` becomes `0`, so a malformed
/// score can never satisfy a threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct QualityScore(f64);

impl QualityScore {
    /// Lowest representable score.
    pub const MIN: Self = Self(0.0);
    /// Highest representable score.
    pub const MAX: Self = Self(100.0);

    /// Creates a normalized score.
    #[must_use]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self::MIN;
        }
        Self(value.clamp(Self::MIN.0, Self::MAX.0))
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }
}

impl From<f64> for QualityScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<QualityScore> for f64 {
    fn from(score: QualityScore) -> Self {
        score.0
    }
}

/// Single issue reported by the analyzer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Detection {
    /// Severity tier.
    pub severity: Severity,
    /// Stable rule identifier.
    pub rule_id: String,
    /// Human-readable rule name.
    pub rule_name: String,
    /// One-based line number of the finding.
    pub line_number: usize,
    /// Source excerpt that triggered the rule.
    pub code_snippet: String,
}

impl Detection {
    /// Creates a detection with the given severity and rule.
    #[must_use]
    pub fn new(severity: Severity, rule_id: impl Into<String>, line_number: usize) -> Self {
        let id: String = rule_id.into();
        Self {
            severity,
            rule_name: id.clone(),
            rule_id: id,
            line_number,
            code_snippet: String::new(),
        }
    }

    /// Sets the human-readable rule name.
    #[must_use]
    pub fn with_rule_name(mut self, rule_name: impl Into<String>) -> Self {
        self.rule_name = rule_name.into();
        self
    }

    /// Sets the code excerpt.
    #[must_use]
    pub fn with_code_snippet(mut self, code_snippet: impl Into<String>) -> Self {
        self.code_snippet = code_snippet.into();
        self
    }
}

/// Per-file analysis result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileResult {
    /// Analysed file.
    pub file_path: PathBuf,
    /// Quality score for this file.
    pub quality_score: QualityScore,
    /// Findings in source order.
    pub detections: Vec<Detection>,
}

impl FileResult {
    /// Creates a file result with no detections.
    #[must_use]
    pub fn new(file_path: impl Into<PathBuf>, quality_score: f64) -> Self {
        Self {
            file_path: file_path.into(),
            quality_score: QualityScore::new(quality_score),
            detections: Vec::new(),
        }
    }

    /// Sets the detections for this file.
    #[must_use]
    pub fn with_detections(mut self, detections: impl IntoIterator<Item = Detection>) -> Self {
        self.detections = detections.into_iter().collect();
        self
    }
}

/// Structured result of one analyzer invocation.
///
/// Every field is optional in the raw analyzer output and falls back to its
/// zero value. An errored report always carries zeroed counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisReport {
    errored: bool,
    #[serde(rename = "error", skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    total_detections: usize,
    critical_issues: usize,
    average_quality_score: QualityScore,
    file_results: Vec<FileResult>,
}

impl AnalysisReport {
    /// Creates a successful report from aggregate figures.
    #[must_use]
    pub fn from_summary(
        total_detections: usize,
        critical_issues: usize,
        average_quality_score: f64,
    ) -> Self {
        Self {
            errored: false,
            error_message: None,
            total_detections,
            critical_issues,
            average_quality_score: QualityScore::new(average_quality_score),
            file_results: Vec::new(),
        }
    }

    /// Creates a successful report by aggregating per-file results.
    ///
    /// The average of an empty result list is the maximum score, matching
    /// an analyzer run that found nothing to inspect.
    #[must_use]
    pub fn from_file_results(file_results: Vec<FileResult>) -> Self {
        let total_detections = file_results.iter().map(|r| r.detections.len()).sum();
        let critical_issues = file_results
            .iter()
            .flat_map(|r| r.detections.iter())
            .filter(|d| d.severity.is_critical())
            .count();
        let average_quality_score = if file_results.is_empty() {
            QualityScore::MAX
        } else {
            let total: f64 = file_results.iter().map(|r| r.quality_score.value()).sum();
            #[expect(
                clippy::cast_precision_loss,
                reason = "file counts stay far below f64 mantissa precision"
            )]
            let count = file_results.len() as f64;
            #[expect(
                clippy::float_arithmetic,
                reason = "averaging scores is inherently floating-point"
            )]
            let mean = total / count;
            QualityScore::new(mean)
        };

        Self {
            errored: false,
            error_message: None,
            total_detections,
            critical_issues,
            average_quality_score,
            file_results,
        }
    }

    /// Creates the canonical failure report for an analyzer that could not
    /// produce usable output.
    #[must_use]
    pub fn errored(message: impl Into<String>) -> Self {
        Self {
            errored: true,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Parses raw analyzer JSON.
    ///
    /// A top-level `"error"` key, or `"errored": true`, yields an errored
    /// report with zeroed counts.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the payload is not a JSON object
    /// of the expected shape.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let parsed: Self = serde_json::from_str(raw)?;
        if parsed.errored || parsed.error_message.is_some() {
            let message = parsed
                .error_message
                .unwrap_or_else(|| "analyzer reported an error".to_owned());
            return Ok(Self::errored(message));
        }
        Ok(parsed)
    }

    /// Attaches per-file results.
    #[must_use]
    pub fn with_file_results(mut self, file_results: Vec<FileResult>) -> Self {
        if !self.errored {
            self.file_results = file_results;
        }
        self
    }

    /// Returns `true` when the analyzer invocation itself failed.
    #[must_use]
    pub const fn is_errored(&self) -> bool {
        self.errored
    }

    /// Returns the failure diagnostic for errored reports.
    #[must_use]
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Returns the number of detections across all files.
    #[must_use]
    pub const fn total_detections(&self) -> usize {
        self.total_detections
    }

    /// Returns the number of critical detections.
    #[must_use]
    pub const fn critical_issues(&self) -> usize {
        self.critical_issues
    }

    /// Returns the aggregate quality score.
    #[must_use]
    pub const fn average_quality_score(&self) -> QualityScore {
        self.average_quality_score
    }

    /// Returns the per-file results in analyzer order.
    #[must_use]
    pub fn file_results(&self) -> &[FileResult] {
        &self.file_results
    }

    /// Iterates over files that have at least one detection.
    pub fn files_with_detections(&self) -> impl Iterator<Item = &FileResult> {
        self.file_results
            .iter()
            .filter(|result| !result.detections.is_empty())
    }

    /// Iterates over critical detections paired with their file.
    pub fn critical_detections(&self) -> impl Iterator<Item = (&FileResult, &Detection)> {
        self.file_results.iter().flat_map(|result| {
            result
                .detections
                .iter()
                .filter(|d| d.severity.is_critical())
                .map(move |d| (result, d))
        })
    }
}
