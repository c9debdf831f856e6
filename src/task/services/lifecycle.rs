//! Service layer for gated task completion.

use crate::analysis::{
    domain::{AnalysisReport, FileSet},
    ports::Analyzer,
};
use crate::task::{
    domain::{
        GateResult, GateThresholds, Task, TaskDomainError, TaskId, TaskPriority, TaskStatus,
        evaluate,
    },
    ports::{TaskRegistry, TaskRegistryError},
};
use mockable::Clock;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Request payload for registering a new task.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    id: String,
    content: String,
    priority: TaskPriority,
    files: Vec<PathBuf>,
    min_quality_score: Option<f64>,
    max_critical_issues: Option<usize>,
}

impl CreateTaskRequest {
    /// Creates a request with required task fields.
    #[must_use]
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            priority: TaskPriority::default(),
            files: Vec::new(),
            min_quality_score: None,
            max_critical_issues: None,
        }
    }

    /// Sets the advisory priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the files the gate verifies.
    #[must_use]
    pub fn with_files<P>(mut self, files: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the minimum average quality score.
    #[must_use]
    pub const fn with_min_quality_score(mut self, score: f64) -> Self {
        self.min_quality_score = Some(score);
        self
    }

    /// Sets the maximum tolerated critical issue count.
    #[must_use]
    pub const fn with_max_critical_issues(mut self, count: usize) -> Self {
        self.max_critical_issues = Some(count);
        self
    }
}

/// Result of [`TaskLifecycleService::complete_with_verification`].
///
/// Failed gates carry the report and reason for whichever collaborator
/// renders them; nothing from the report is stored on the task.
#[derive(Debug, Clone, PartialEq)]
pub enum CompletionOutcome {
    /// The task had no files and was completed without running the gate.
    CompletedWithoutFiles {
        /// Updated task.
        task: Task,
    },
    /// The gate passed and the task is completed and verified.
    Verified {
        /// Updated task.
        task: Task,
        /// Report the gate evaluated.
        report: AnalysisReport,
    },
    /// The gate failed and the task needs revision.
    NeedsRevision {
        /// Updated task.
        task: Task,
        /// Failing gate result.
        result: GateResult,
        /// Report the gate evaluated.
        report: AnalysisReport,
    },
}

impl CompletionOutcome {
    /// Returns the task after the transition was applied.
    #[must_use]
    pub const fn task(&self) -> &Task {
        match self {
            Self::CompletedWithoutFiles { task }
            | Self::Verified { task, .. }
            | Self::NeedsRevision { task, .. } => task,
        }
    }

    /// Consumes the outcome, returning the updated task.
    #[must_use]
    pub fn into_task(self) -> Task {
        match self {
            Self::CompletedWithoutFiles { task }
            | Self::Verified { task, .. }
            | Self::NeedsRevision { task, .. } => task,
        }
    }

    /// Returns the analyzer report, if the gate ran.
    #[must_use]
    pub const fn report(&self) -> Option<&AnalysisReport> {
        match self {
            Self::CompletedWithoutFiles { .. } => None,
            Self::Verified { report, .. } | Self::NeedsRevision { report, .. } => Some(report),
        }
    }

    /// Returns the failing gate result when the task needs revision.
    #[must_use]
    pub const fn failure(&self) -> Option<GateResult> {
        match self {
            Self::NeedsRevision { result, .. } => Some(*result),
            Self::CompletedWithoutFiles { .. } | Self::Verified { .. } => None,
        }
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Registry operation failed.
    #[error(transparent)]
    Registry(#[from] TaskRegistryError),
    /// No task has the requested identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
///
/// Gate runs are strictly sequential per call: look up, analyse, evaluate,
/// then apply the resulting status through the registry.
#[derive(Clone)]
pub struct TaskLifecycleService<R, A, C>
where
    R: TaskRegistry,
    A: Analyzer,
    C: Clock + Send + Sync,
{
    registry: Arc<R>,
    analyzer: Arc<A>,
    clock: Arc<C>,
}

impl<R, A, C> TaskLifecycleService<R, A, C>
where
    R: TaskRegistry,
    A: Analyzer,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(registry: Arc<R>, analyzer: Arc<A>, clock: Arc<C>) -> Self {
        Self {
            registry,
            analyzer,
            clock,
        }
    }

    /// Registers a new `Todo` task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError`] when input validation fails or the
    /// registry rejects the task.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let id = TaskId::new(request.id)?;
        let thresholds =
            GateThresholds::from_optional(request.min_quality_score, request.max_critical_issues)?;
        let task = Task::new(id, request.content, &*self.clock)
            .with_priority(request.priority)
            .with_files(request.files)
            .with_thresholds(thresholds);
        self.registry.store(&task).await?;
        Ok(task)
    }

    /// Registers a task handed over by the surrounding workflow as-is.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Registry`] when the registry rejects the
    /// task.
    pub async fn register(&self, task: Task) -> TaskLifecycleResult<Task> {
        self.registry.store(&task).await?;
        Ok(task)
    }

    /// Retrieves a task by identifier.
    ///
    /// Returns `Ok(None)` when no such task exists.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Registry`] when lookup fails.
    pub async fn find_task(&self, task_id: &TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.registry.find(task_id).await?)
    }

    /// Returns every registered task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Registry`] when listing fails.
    pub async fn list_tasks(&self) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.registry.list().await?)
    }

    /// Moves a `Todo` or `NeedsRevision` task to `InProgress`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task and
    /// [`TaskDomainError::InvalidStatusTransition`] from any other status.
    pub async fn start_task(&self, task_id: &TaskId) -> TaskLifecycleResult<Task> {
        let mut task = self.require_task(task_id).await?;
        task.transition_to(TaskStatus::InProgress, &*self.clock)?;
        let started = self
            .registry
            .update_status(task_id, task.status(), false, task.updated_at())
            .await?;
        Ok(started)
    }

    /// Completes a task, gating on analysis of its files.
    ///
    /// A task without files is completed directly and the analyzer is not
    /// called. Otherwise the analyzer runs on the task's files and the gate
    /// decides between `Completed` (verified) and `NeedsRevision`. Each call
    /// re-runs the analyzer; earlier reports are never reused.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task, leaving
    /// the registry unchanged, or [`TaskLifecycleError::Registry`] when the
    /// status update fails.
    pub async fn complete_with_verification(
        &self,
        task_id: &TaskId,
    ) -> TaskLifecycleResult<CompletionOutcome> {
        let task = self.require_task(task_id).await?;

        let Some(files) = FileSet::new(task.files().iter().cloned()) else {
            info!(task_id = %task_id, "no files to verify; completing without gate");
            let completed = self
                .apply_status(task_id, TaskStatus::Completed, false)
                .await?;
            return Ok(CompletionOutcome::CompletedWithoutFiles { task: completed });
        };

        info!(task_id = %task_id, file_count = files.len(), "running quality gate");
        let report = self.analyzer.analyze(&files).await;
        let result = evaluate(&report, task.thresholds());

        if result.passed() {
            let verified = self
                .apply_status(task_id, TaskStatus::Completed, true)
                .await?;
            info!(
                task_id = %task_id,
                quality = report.average_quality_score().value(),
                detections = report.total_detections(),
                "quality gate passed"
            );
            return Ok(CompletionOutcome::Verified {
                task: verified,
                report,
            });
        }

        warn!(
            task_id = %task_id,
            reason = %result.reason(),
            critical_issues = report.critical_issues(),
            quality = report.average_quality_score().value(),
            "quality gate failed"
        );
        let revised = self
            .apply_status(task_id, TaskStatus::NeedsRevision, false)
            .await?;
        Ok(CompletionOutcome::NeedsRevision {
            task: revised,
            result,
            report,
        })
    }

    async fn require_task(&self, task_id: &TaskId) -> TaskLifecycleResult<Task> {
        self.registry
            .find(task_id)
            .await?
            .ok_or_else(|| TaskLifecycleError::NotFound(task_id.clone()))
    }

    async fn apply_status(
        &self,
        task_id: &TaskId,
        status: TaskStatus,
        verified: bool,
    ) -> TaskLifecycleResult<Task> {
        let task = self
            .registry
            .update_status(task_id, status, verified, self.clock.utc())
            .await?;
        Ok(task)
    }
}
