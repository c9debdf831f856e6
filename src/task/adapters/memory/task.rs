//! In-memory task registry.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskRegistry, TaskRegistryError, TaskRegistryResult},
};

/// Thread-safe in-memory task registry.
///
/// Every status update runs under the write lock, which serializes
/// concurrent gate runs touching the same state.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRegistry {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    insertion_order: Vec<TaskId>,
}

impl InMemoryTaskRegistry {
    /// Creates an empty in-memory registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(err: impl std::fmt::Display) -> TaskRegistryError {
    TaskRegistryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRegistry for InMemoryTaskRegistry {
    async fn store(&self, task: &Task) -> TaskRegistryResult<()> {
        let mut state = self.state.write().map_err(poisoned)?;
        if state.tasks.contains_key(task.id()) {
            return Err(TaskRegistryError::DuplicateTask(task.id().clone()));
        }

        state.insertion_order.push(task.id().clone());
        state.tasks.insert(task.id().clone(), task.clone());
        Ok(())
    }

    async fn find(&self, id: &TaskId) -> TaskRegistryResult<Option<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state.tasks.get(id).cloned())
    }

    async fn update_status(
        &self,
        id: &TaskId,
        status: TaskStatus,
        verified: bool,
        at: DateTime<Utc>,
    ) -> TaskRegistryResult<Task> {
        let mut state = self.state.write().map_err(poisoned)?;
        let task = state
            .tasks
            .get_mut(id)
            .ok_or_else(|| TaskRegistryError::NotFound(id.clone()))?;
        task.record_status(status, verified, at);
        Ok(task.clone())
    }

    async fn list(&self) -> TaskRegistryResult<Vec<Task>> {
        let state = self.state.read().map_err(poisoned)?;
        Ok(state
            .insertion_order
            .iter()
            .filter_map(|id| state.tasks.get(id).cloned())
            .collect())
    }
}
