//! In-memory adapters for task lifecycle ports.

mod task;

pub use task::InMemoryTaskRegistry;
