//! Task aggregate root and related lifecycle types.

use super::{GateThresholds, ParseTaskStatusError, TaskDomainError, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Task lifecycle status.
///
/// `Todo -> InProgress -> {Completed, NeedsRevision}`. `NeedsRevision` is
/// not terminal: remediated work moves back to `InProgress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaskStatus {
    /// Task has been created but work has not started.
    Todo,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed.
    Completed,
    /// Task failed the quality gate and needs further work.
    NeedsRevision,
}

impl TaskStatus {
    /// Returns the canonical record representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::NeedsRevision => "needs_revision",
        }
    }

    /// Returns whether a caller-driven transition to `target` is allowed.
    ///
    /// Gate outcomes are applied by the lifecycle service and do not pass
    /// through this check.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Todo | Self::NeedsRevision, Self::InProgress)
                | (Self::InProgress, Self::Completed | Self::NeedsRevision)
        )
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "todo" | "pending" => Ok(Self::Todo),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "needs_revision" => Ok(Self::NeedsRevision),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.as_str().to_owned()
    }
}

/// Advisory task priority. Has no effect on the gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
}

/// Plain task record exchanged with the surrounding workflow.
///
/// Threshold fields are optional here; defaults are applied when the record
/// is turned into a [`Task`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task identifier.
    pub id: String,
    /// Human description.
    pub content: String,
    /// Lifecycle status.
    pub status: TaskStatus,
    /// Advisory priority.
    #[serde(default)]
    pub priority: TaskPriority,
    /// Files the gate verifies.
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Minimum average quality score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_quality_score: Option<f64>,
    /// Maximum tolerated critical issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_critical_issues: Option<usize>,
    /// Whether completion was certified by a passed gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sniff_verified: Option<bool>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    id: TaskId,
    content: String,
    status: TaskStatus,
    priority: TaskPriority,
    files: Vec<PathBuf>,
    thresholds: GateThresholds,
    sniff_verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Todo` task with default thresholds and no files.
    ///
    /// The content is free text and may be empty.
    #[must_use]
    pub fn new(id: TaskId, content: impl Into<String>, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();

        Self {
            id,
            content: content.into(),
            status: TaskStatus::Todo,
            priority: TaskPriority::default(),
            files: Vec::new(),
            thresholds: GateThresholds::default(),
            sniff_verified: false,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from a plain record, applying threshold defaults.
    ///
    /// A `sniff_verified` flag that the record cannot justify (task not
    /// completed, or no files) is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError`] when the identifier or thresholds are
    /// invalid.
    pub fn from_record(record: TaskRecord, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let id = TaskId::new(record.id)?;
        let thresholds =
            GateThresholds::from_optional(record.min_quality_score, record.max_critical_issues)?;
        let mut task = Self::new(id, record.content, clock)
            .with_priority(record.priority)
            .with_files(record.files)
            .with_thresholds(thresholds);
        let at = task.updated_at;
        task.record_status(record.status, record.sniff_verified.unwrap_or(false), at);
        Ok(task)
    }

    /// Converts the task into a plain record with explicit thresholds.
    #[must_use]
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            id: self.id.to_string(),
            content: self.content.clone(),
            status: self.status,
            priority: self.priority,
            files: self.files.clone(),
            min_quality_score: Some(self.thresholds.min_quality_score()),
            max_critical_issues: Some(self.thresholds.max_critical_issues()),
            sniff_verified: self.sniff_verified.then_some(true),
        }
    }

    /// Sets the advisory priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the files verified by the gate, preserving order.
    #[must_use]
    pub fn with_files<P>(mut self, files: impl IntoIterator<Item = P>) -> Self
    where
        P: Into<PathBuf>,
    {
        self.files = files.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the gate thresholds.
    #[must_use]
    pub const fn with_thresholds(mut self, thresholds: GateThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the task description.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the advisory priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the files verified by the gate.
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Returns the gate thresholds.
    #[must_use]
    pub const fn thresholds(&self) -> GateThresholds {
        self.thresholds
    }

    /// Returns `true` only when completion was certified by a passed gate.
    #[must_use]
    pub const fn sniff_verified(&self) -> bool {
        self.sniff_verified
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest status change timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a caller-driven status change.
    ///
    /// Only moves allowed by [`TaskStatus::can_transition_to`] are accepted,
    /// and they always clear verification.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidStatusTransition`] when the move is
    /// not permitted; the task is left unchanged.
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(TaskDomainError::InvalidStatusTransition {
                task_id: self.id.clone(),
                from: self.status,
                to: target,
            });
        }
        self.record_status(target, false, clock.utc());
        Ok(())
    }

    /// Sets status and verification together.
    ///
    /// Verification only sticks to a completed task with files, so a task
    /// completed without anything to check is never reported as verified.
    pub fn record_status(&mut self, status: TaskStatus, verified: bool, at: DateTime<Utc>) {
        self.status = status;
        self.sniff_verified = verified && status == TaskStatus::Completed && !self.files.is_empty();
        self.updated_at = at;
    }
}
