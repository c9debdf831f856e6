//! Gated task lifecycle.
//!
//! A task may only be marked completed once the external analyzer certifies
//! its files against the task's quality thresholds. Tasks without files
//! complete directly. The module follows hexagonal architecture:
//!
//! - Domain types and the gate decision in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
