//! Adapter implementations for the analysis ports.

pub mod config;
pub mod git;
pub mod memory;
pub mod process;

pub use config::AnalyzerConfig;
pub use git::GitChangeDiscovery;
pub use memory::{InMemoryChangeDiscovery, ScriptedAnalyzer};
pub use process::ProcessAnalyzer;
