//! Integration tests for git-backed change discovery.

use rstest::rstest;
use sniff_gate::analysis::{
    adapters::GitChangeDiscovery,
    ports::{ChangeDiscovery, ChangeDiscoveryError},
};
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn untracked_code_files_are_discovered() -> eyre::Result<()> {
    if !git_available() {
        return Ok(());
    }
    let dir = TempDir::new()?;
    let status = Command::new("git")
        .args(["init", "--quiet"])
        .current_dir(dir.path())
        .status()?;
    eyre::ensure!(status.success(), "git init failed");
    std::fs::create_dir_all(dir.path().join("src"))?;
    std::fs::write(dir.path().join("src/new.rs"), "fn main() {}\n")?;
    std::fs::write(dir.path().join("notes.md"), "# notes\n")?;

    let discovery = GitChangeDiscovery::new().with_repo_root(dir.path());
    let files = discovery.changed_files().await?;

    eyre::ensure!(files == [PathBuf::from("src/new.rs")], "unexpected files: {files:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn directory_outside_a_repository_is_an_error() -> eyre::Result<()> {
    if !git_available() {
        return Ok(());
    }
    let dir = TempDir::new()?;

    let result = GitChangeDiscovery::new()
        .with_repo_root(dir.path())
        .changed_files()
        .await;

    eyre::ensure!(
        matches!(result, Err(ChangeDiscoveryError::CommandFailed { .. })),
        "expected command failure, got {result:?}"
    );
    Ok(())
}
