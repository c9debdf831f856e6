//! Analyzer adapter that runs the external analysis tool as a subprocess.

use super::AnalyzerConfig;
use crate::analysis::{
    domain::{AnalysisReport, FileSet},
    ports::Analyzer,
};
use async_trait::async_trait;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, warn};

/// Reasons an invocation produced no usable report.
#[derive(Debug, Error)]
enum InvocationError {
    #[error("failed to spawn analyzer: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("analyzer timed out after {0:?}")]
    TimedOut(Duration),

    #[error("analyzer exited with {status}: {stderr}")]
    ExitStatus { status: ExitStatus, stderr: String },

    #[error("analyzer output is not valid UTF-8")]
    NonUtf8(#[source] std::string::FromUtf8Error),

    #[error("analyzer output is not a valid report: {0}")]
    Malformed(#[source] serde_json::Error),
}

/// Runs the configured analyzer executable once per gate evaluation.
///
/// File paths are appended after the configured arguments and the report is
/// read from standard output as JSON. The child is killed if the timeout
/// elapses.
#[derive(Debug, Clone, Default)]
pub struct ProcessAnalyzer {
    config: AnalyzerConfig,
}

impl ProcessAnalyzer {
    /// Creates an adapter with the given configuration.
    #[must_use]
    pub const fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    async fn invoke(&self, files: &FileSet) -> Result<AnalysisReport, InvocationError> {
        let mut command = Command::new(&self.config.program);
        command
            .args(&self.config.args)
            .args(files.iter())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.config.working_dir {
            command.current_dir(dir);
        }

        debug!(
            program = %self.config.program.display(),
            file_count = files.len(),
            "invoking analyzer"
        );

        let output = tokio::time::timeout(self.config.timeout, command.output())
            .await
            .map_err(|_| InvocationError::TimedOut(self.config.timeout))?
            .map_err(InvocationError::Spawn)?;

        if !output.status.success() {
            return Err(InvocationError::ExitStatus {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(InvocationError::NonUtf8)?;
        AnalysisReport::from_json(&stdout).map_err(InvocationError::Malformed)
    }
}

#[async_trait]
impl Analyzer for ProcessAnalyzer {
    async fn analyze(&self, files: &FileSet) -> AnalysisReport {
        match self.invoke(files).await {
            Ok(report) => report,
            Err(err) => {
                warn!(
                    program = %self.config.program.display(),
                    error = %err,
                    "analyzer invocation failed"
                );
                AnalysisReport::errored(err.to_string())
            }
        }
    }
}
