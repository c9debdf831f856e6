//! Domain model for gated task completion.
//!
//! The task domain models task records, their quality thresholds, and the
//! pure gate decision while keeping analyzer invocation and storage outside
//! of the domain boundary.

mod error;
mod gate;
mod ids;
mod task;
mod thresholds;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use gate::{GateReason, GateResult, evaluate};
pub use ids::TaskId;
pub use task::{Task, TaskPriority, TaskRecord, TaskStatus};
pub use thresholds::GateThresholds;
