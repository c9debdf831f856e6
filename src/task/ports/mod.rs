//! Port contracts for task lifecycle management.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod registry;

pub use registry::{TaskRegistry, TaskRegistryError, TaskRegistryResult};
