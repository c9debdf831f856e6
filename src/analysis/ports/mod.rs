//! Port contracts for the analysis boundary.
//!
//! Ports define infrastructure-agnostic interfaces used by task services.

pub mod analyzer;
pub mod change_discovery;

pub use analyzer::Analyzer;
pub use change_discovery::{ChangeDiscovery, ChangeDiscoveryError, ChangeDiscoveryResult};

#[cfg(test)]
pub use analyzer::MockAnalyzer;
