//! Change discovery adapter backed by the `git` CLI.

use crate::analysis::ports::{ChangeDiscovery, ChangeDiscoveryError, ChangeDiscoveryResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tracing::debug;

/// Extensions treated as source code when collecting untracked files.
const CODE_EXTENSIONS: [&str; 11] = [
    "rs", "py", "ts", "js", "jsx", "tsx", "go", "c", "cpp", "h", "hpp",
];

/// Discovers changed files by shelling out to `git`.
///
/// Collects unstaged and staged modifications, untracked source files, and
/// optionally files touched by the last few commits. Paths that no longer
/// exist on disk are dropped.
#[derive(Debug, Clone, Default)]
pub struct GitChangeDiscovery {
    repo_root: Option<PathBuf>,
    recent_commits: u32,
}

impl GitChangeDiscovery {
    /// Creates a discovery adapter for the current working directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs git inside the given repository root.
    #[must_use]
    pub fn with_repo_root(mut self, repo_root: impl Into<PathBuf>) -> Self {
        self.repo_root = Some(repo_root.into());
        self
    }

    /// Also includes files changed in the last `count` commits.
    #[must_use]
    pub const fn with_recent_commits(mut self, count: u32) -> Self {
        self.recent_commits = count;
        self
    }

    async fn git_lines(&self, args: &[&str]) -> ChangeDiscoveryResult<Vec<PathBuf>> {
        let mut command = Command::new("git");
        command.args(args).kill_on_drop(true);
        if let Some(root) = &self.repo_root {
            command.current_dir(root);
        }

        let output = command
            .output()
            .await
            .map_err(ChangeDiscoveryError::unavailable)?;
        if !output.status.success() {
            return Err(ChangeDiscoveryError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        Ok(parse_path_lines(&output.stdout))
    }

    async fn exists(&self, path: &Path) -> bool {
        let resolved = self
            .repo_root
            .as_ref()
            .map_or_else(|| path.to_path_buf(), |root| root.join(path));
        tokio::fs::try_exists(resolved).await.unwrap_or(false)
    }
}

#[async_trait]
impl ChangeDiscovery for GitChangeDiscovery {
    async fn changed_files(&self) -> ChangeDiscoveryResult<Vec<PathBuf>> {
        let mut files = self.git_lines(&["diff", "--name-only"]).await?;
        files.extend(self.git_lines(&["diff", "--cached", "--name-only"]).await?);
        files.extend(
            self.git_lines(&["ls-files", "--others", "--exclude-standard"])
                .await?
                .into_iter()
                .filter(|path| is_code_file(path)),
        );

        if self.recent_commits > 0 {
            let base = format!("HEAD~{}", self.recent_commits);
            // Shallow histories may not reach `base`.
            match self.git_lines(&["diff", base.as_str(), "--name-only"]).await {
                Ok(recent) => files.extend(recent),
                Err(err) => debug!(error = %err, "skipping recent commit changes"),
            }
        }

        files.sort();
        files.dedup();

        let mut existing = Vec::with_capacity(files.len());
        for file in files {
            if self.exists(&file).await {
                existing.push(file);
            }
        }
        Ok(existing)
    }
}

fn parse_path_lines(output: &[u8]) -> Vec<PathBuf> {
    String::from_utf8_lossy(output)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn is_code_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| CODE_EXTENSIONS.contains(&ext))
}
