//! Audit of the files a task reports against files changed on disk.

use crate::analysis::ports::{ChangeDiscovery, ChangeDiscoveryError};
use crate::task::{
    domain::TaskId,
    ports::{TaskRegistry, TaskRegistryError},
};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Comparison between a task's reported files and discovered changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileAudit {
    /// Files the task declares, in task order.
    pub reported: Vec<PathBuf>,
    /// Files the discovery source reports as changed.
    pub discovered: Vec<PathBuf>,
    /// Changed files the task does not declare, sorted.
    pub unreported: Vec<PathBuf>,
}

impl FileAudit {
    /// Returns `true` when every changed file is declared by the task.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.unreported.is_empty()
    }
}

/// Errors returned by the file audit service.
#[derive(Debug, Error)]
pub enum FileAuditError {
    /// No task has the requested identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Registry lookup failed.
    #[error(transparent)]
    Registry(#[from] TaskRegistryError),
    /// Change discovery failed.
    #[error(transparent)]
    Discovery(#[from] ChangeDiscoveryError),
}

/// Result type for file audit operations.
pub type FileAuditResult<T> = Result<T, FileAuditError>;

/// Flags changed files that a task does not declare.
///
/// The audit is read-only: it neither alters the task nor feeds into the
/// gate decision.
#[derive(Clone)]
pub struct FileAuditService<R, D>
where
    R: TaskRegistry,
    D: ChangeDiscovery,
{
    registry: Arc<R>,
    discovery: Arc<D>,
}

impl<R, D> FileAuditService<R, D>
where
    R: TaskRegistry,
    D: ChangeDiscovery,
{
    /// Creates a new audit service.
    #[must_use]
    pub const fn new(registry: Arc<R>, discovery: Arc<D>) -> Self {
        Self {
            registry,
            discovery,
        }
    }

    /// Compares the task's files with the discovered changes.
    ///
    /// # Errors
    ///
    /// Returns [`FileAuditError::NotFound`] for an unknown task, or the
    /// registry or discovery failure.
    pub async fn audit_reported_files(&self, task_id: &TaskId) -> FileAuditResult<FileAudit> {
        let task = self
            .registry
            .find(task_id)
            .await?
            .ok_or_else(|| FileAuditError::NotFound(task_id.clone()))?;
        let discovered = self.discovery.changed_files().await?;

        let declared: BTreeSet<PathBuf> =
            task.files().iter().map(|path| normalize(path)).collect();
        let unreported: Vec<PathBuf> = discovered
            .iter()
            .filter(|path| !declared.contains(&normalize(path)))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .cloned()
            .collect();

        for path in &unreported {
            warn!(task_id = %task_id, file = %path.display(), "changed file not reported by task");
        }
        info!(
            task_id = %task_id,
            reported = task.files().len(),
            discovered = discovered.len(),
            unreported = unreported.len(),
            "file audit finished"
        );

        Ok(FileAudit {
            reported: task.files().to_vec(),
            discovered,
            unreported,
        })
    }
}

/// Drops `.` components so `./src/a.rs` and `src/a.rs` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}
