//! Application services for task lifecycle orchestration.

mod audit;
mod lifecycle;

pub use audit::{FileAudit, FileAuditError, FileAuditResult, FileAuditService};
pub use lifecycle::{
    CompletionOutcome, CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult,
    TaskLifecycleService,
};
