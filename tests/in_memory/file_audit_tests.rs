//! In-memory integration tests for the reported-file audit.

use std::sync::Arc;

use super::helpers::{Wiring, task_id, wiring};
use rstest::rstest;
use sniff_gate::{
    analysis::adapters::InMemoryChangeDiscovery,
    task::services::{CreateTaskRequest, FileAuditError, FileAuditService},
};
use std::path::PathBuf;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn flags_changed_files_the_task_omits(wiring: Wiring) -> eyre::Result<()> {
    wiring
        .service
        .create_task(
            CreateTaskRequest::new("auth", "Auth work").with_files(["src/auth.rs"]),
        )
        .await?;
    let discovery =
        InMemoryChangeDiscovery::new(["src/session.rs", "src/auth.rs", "src/db.rs", "src/db.rs"]);
    let audit_service = FileAuditService::new(Arc::new(wiring.registry.clone()), Arc::new(discovery));

    let audit = audit_service.audit_reported_files(&task_id("auth")?).await?;

    eyre::ensure!(!audit.is_complete());
    eyre::ensure!(audit.reported == [PathBuf::from("src/auth.rs")]);
    eyre::ensure!(
        audit.unreported == [PathBuf::from("src/db.rs"), PathBuf::from("src/session.rs")]
    );
    eyre::ensure!(wiring.analyzer.call_count() == 0);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn complete_audit_when_all_changes_reported(wiring: Wiring) -> eyre::Result<()> {
    wiring
        .service
        .create_task(
            CreateTaskRequest::new("full", "Full report").with_files(["src/a.rs", "src/b.rs"]),
        )
        .await?;
    let audit_service = FileAuditService::new(
        Arc::new(wiring.registry.clone()),
        Arc::new(InMemoryChangeDiscovery::new(["src/b.rs"])),
    );

    let audit = audit_service.audit_reported_files(&task_id("full")?).await?;

    eyre::ensure!(audit.is_complete());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn current_dir_prefix_does_not_hide_reported_files(wiring: Wiring) -> eyre::Result<()> {
    wiring
        .service
        .create_task(
            CreateTaskRequest::new("dotted", "Dotted paths")
                .with_files(["./src/a.rs", "src/b.rs"]),
        )
        .await?;
    let audit_service = FileAuditService::new(
        Arc::new(wiring.registry.clone()),
        Arc::new(InMemoryChangeDiscovery::new(["src/a.rs", "./src/b.rs"])),
    );

    let audit = audit_service.audit_reported_files(&task_id("dotted")?).await?;

    eyre::ensure!(audit.is_complete(), "unexpected unreported files: {:?}", audit.unreported);
    eyre::ensure!(
        audit.reported == [PathBuf::from("./src/a.rs"), PathBuf::from("src/b.rs")],
        "reported files keep their declared spelling"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn audit_of_unknown_task_is_not_found(wiring: Wiring) -> eyre::Result<()> {
    let audit_service = FileAuditService::new(
        Arc::new(wiring.registry.clone()),
        Arc::new(InMemoryChangeDiscovery::default()),
    );

    let result = audit_service.audit_reported_files(&task_id("nobody")?).await;

    eyre::ensure!(matches!(result, Err(FileAuditError::NotFound(_))));
    Ok(())
}
