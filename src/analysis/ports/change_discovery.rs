//! Change discovery port used to audit the files a task reports.

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Result type for change discovery operations.
pub type ChangeDiscoveryResult<T> = Result<T, ChangeDiscoveryError>;

/// Source of files changed in the working copy.
#[async_trait]
pub trait ChangeDiscovery: Send + Sync {
    /// Returns changed files, sorted and without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`ChangeDiscoveryError`] when the underlying source cannot be
    /// queried.
    async fn changed_files(&self) -> ChangeDiscoveryResult<Vec<PathBuf>>;
}

/// Errors returned by change discovery adapters.
#[derive(Debug, Clone, Error)]
pub enum ChangeDiscoveryError {
    /// The discovery command exited unsuccessfully.
    #[error("change discovery command `{command}` failed: {stderr}")]
    CommandFailed {
        /// Command line that was run.
        command: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The discovery source could not be reached.
    #[error("change discovery unavailable: {0}")]
    Unavailable(Arc<dyn std::error::Error + Send + Sync>),
}

impl ChangeDiscoveryError {
    /// Wraps an I/O or runtime error.
    pub fn unavailable(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Unavailable(Arc::new(err))
    }
}
