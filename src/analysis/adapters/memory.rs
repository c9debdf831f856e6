//! In-memory analysis adapters for tests and dry runs.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use crate::analysis::{
    domain::{AnalysisReport, FileSet},
    ports::{Analyzer, ChangeDiscovery, ChangeDiscoveryResult},
};

/// Analyzer that returns a preconfigured report and records every call.
///
/// This adapter never spawns a process. Clones share state, so a test can
/// hand one clone to a service and inspect the calls through another.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnalyzer {
    state: Arc<RwLock<ScriptedState>>,
}

#[derive(Debug, Default)]
struct ScriptedState {
    report: AnalysisReport,
    calls: Vec<FileSet>,
}

impl ScriptedAnalyzer {
    /// Creates an analyzer that answers every call with `report`.
    #[must_use]
    pub fn new(report: AnalysisReport) -> Self {
        Self {
            state: Arc::new(RwLock::new(ScriptedState {
                report,
                calls: Vec::new(),
            })),
        }
    }

    /// Replaces the report returned by subsequent calls.
    pub fn set_report(&self, report: AnalysisReport) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.report = report;
    }

    /// Returns how many times the analyzer has been invoked.
    #[must_use]
    pub fn call_count(&self) -> usize {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.calls.len()
    }

    /// Returns the file sets passed to each invocation, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<FileSet> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state.calls.clone()
    }
}

#[async_trait]
impl Analyzer for ScriptedAnalyzer {
    async fn analyze(&self, files: &FileSet) -> AnalysisReport {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.calls.push(files.clone());
        state.report.clone()
    }
}

/// Change discovery returning a fixed file list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChangeDiscovery {
    files: Vec<PathBuf>,
}

impl InMemoryChangeDiscovery {
    /// Creates a discovery source reporting `files` as changed.
    #[must_use]
    pub fn new<P>(files: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<PathBuf>,
    {
        let mut changed: Vec<PathBuf> = files.into_iter().map(Into::into).collect();
        changed.sort();
        changed.dedup();
        Self { files: changed }
    }
}

#[async_trait]
impl ChangeDiscovery for InMemoryChangeDiscovery {
    async fn changed_files(&self) -> ChangeDiscoveryResult<Vec<PathBuf>> {
        Ok(self.files.clone())
    }
}
