//! Sniff gate: quality-gated task completion.
//!
//! A task cannot move to completed until an external static-analysis tool
//! certifies that its files meet the task's quality thresholds. Failing
//! tasks fall back to needing revision.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (processes, memory)
//!
//! # Modules
//!
//! - [`analysis`]: Analyzer report model and invocation adapters
//! - [`task`]: Task model, gate evaluation, and lifecycle orchestration

pub mod analysis;
pub mod task;
