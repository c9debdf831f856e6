//! In-memory integration tests for gated task completion.

use super::helpers::{Wiring, task_id, wiring};
use mockable::DefaultClock;
use rstest::rstest;
use sniff_gate::{
    analysis::domain::AnalysisReport,
    task::{
        domain::{GateReason, Task, TaskRecord, TaskStatus},
        services::{CompletionOutcome, CreateTaskRequest},
    },
};

const UPSTREAM_TODOS: &str = r#"[
    {
        "id": "implement-auth",
        "content": "Implement user authentication system",
        "status": "todo",
        "priority": "high",
        "files": ["src/auth.rs", "src/middleware/auth.rs"],
        "min_quality_score": 85,
        "max_critical_issues": 0
    },
    {
        "id": "add-validation",
        "content": "Add input validation",
        "status": "todo",
        "priority": "medium",
        "files": ["src/validation.rs"],
        "min_quality_score": 80,
        "max_critical_issues": 1
    },
    {
        "id": "update-readme",
        "content": "Refresh the README",
        "status": "todo"
    }
]"#;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn plain_records_flow_through_the_gate(wiring: Wiring) -> eyre::Result<()> {
    let records: Vec<TaskRecord> = serde_json::from_str(UPSTREAM_TODOS)?;
    for record in records {
        let task = Task::from_record(record, &DefaultClock)?;
        wiring.service.register(task).await?;
    }

    wiring
        .analyzer
        .set_report(AnalysisReport::from_summary(3, 0, 83.0));

    let auth = wiring
        .service
        .complete_with_verification(&task_id("implement-auth")?)
        .await?;
    let validation = wiring
        .service
        .complete_with_verification(&task_id("add-validation")?)
        .await?;
    let readme = wiring
        .service
        .complete_with_verification(&task_id("update-readme")?)
        .await?;

    eyre::ensure!(auth.failure().map(|r| r.reason()) == Some(GateReason::QualityBelowThreshold));
    eyre::ensure!(matches!(validation, CompletionOutcome::Verified { .. }));
    eyre::ensure!(matches!(readme, CompletionOutcome::CompletedWithoutFiles { .. }));
    eyre::ensure!(wiring.analyzer.call_count() == 2);

    let records: Vec<TaskRecord> = wiring
        .service
        .list_tasks()
        .await?
        .iter()
        .map(Task::to_record)
        .collect();
    let summary: Vec<(&str, TaskStatus, Option<bool>)> = records
        .iter()
        .map(|r| (r.id.as_str(), r.status, r.sniff_verified))
        .collect();
    eyre::ensure!(
        summary
            == vec![
                ("implement-auth", TaskStatus::NeedsRevision, None),
                ("add-validation", TaskStatus::Completed, Some(true)),
                ("update-readme", TaskStatus::Completed, None),
            ],
        "unexpected final state: {summary:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn analyzer_sees_task_files_exactly(wiring: Wiring) -> eyre::Result<()> {
    wiring
        .service
        .create_task(
            CreateTaskRequest::new("ordered", "Ordered files")
                .with_files(["src/z.rs", "src/a.rs", "src/m.rs"]),
        )
        .await?;

    wiring
        .service
        .complete_with_verification(&task_id("ordered")?)
        .await?;

    let calls = wiring.analyzer.calls();
    let first = calls
        .first()
        .ok_or_else(|| eyre::eyre!("analyzer was not called"))?;
    let paths: Vec<String> = first
        .iter()
        .map(|p| p.to_string_lossy().into_owned())
        .collect();
    eyre::ensure!(paths == ["src/z.rs", "src/a.rs", "src/m.rs"]);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn verified_completion_is_visible_through_lookup(wiring: Wiring) -> eyre::Result<()> {
    wiring
        .service
        .create_task(CreateTaskRequest::new("lookup", "Lookup").with_files(["src/lib.rs"]))
        .await?;
    let id = task_id("lookup")?;
    wiring.service.start_task(&id).await?;

    wiring.service.complete_with_verification(&id).await?;

    let found = wiring
        .service
        .find_task(&id)
        .await?
        .ok_or_else(|| eyre::eyre!("task should exist"))?;
    eyre::ensure!(found.status() == TaskStatus::Completed);
    eyre::ensure!(found.sniff_verified());
    eyre::ensure!(found.updated_at() >= found.created_at());
    Ok(())
}
