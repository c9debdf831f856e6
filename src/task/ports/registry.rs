//! Registry port for task lookup and status mutation.

use crate::task::domain::{Task, TaskId, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task registry operations.
pub type TaskRegistryResult<T> = Result<T, TaskRegistryError>;

/// Task registry contract.
///
/// [`TaskRegistry::update_status`] is the only mutation entry point after a
/// task is stored. Implementations shared between concurrent callers must
/// apply each update under mutual exclusion for the task identifier.
#[async_trait]
pub trait TaskRegistry: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::DuplicateTask`] when the task ID already
    /// exists.
    async fn store(&self, task: &Task) -> TaskRegistryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find(&self, id: &TaskId) -> TaskRegistryResult<Option<Task>>;

    /// Sets a task's status and verification flag as one operation and
    /// returns the updated task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRegistryError::NotFound`] when the task does not exist.
    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
        verified: bool,
        at: DateTime<Utc>,
    ) -> TaskRegistryResult<Task>;

    /// Returns all tasks in insertion order.
    async fn list(&self) -> TaskRegistryResult<Vec<Task>>;
}

/// Errors returned by task registry implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRegistryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// Storage-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRegistryError {
    /// Wraps a storage error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
