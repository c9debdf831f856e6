//! Static-analysis boundary for the quality gate.
//!
//! The analyzer itself is an opaque external process. This module owns the
//! report shape it produces and the port through which the task lifecycle
//! reaches it:
//!
//! - Report model in [`domain`]
//! - Port contracts in [`ports`]
//! - Process, git, and scripted adapters in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;
