//! Integration tests for the subprocess analyzer adapter.
//!
//! Each test writes a small shell script and runs it through `sh`, so the
//! script itself never needs the executable bit.

use rstest::rstest;
use sniff_gate::analysis::{
    adapters::{AnalyzerConfig, ProcessAnalyzer},
    domain::{FileSet, QualityScore},
    ports::Analyzer,
};
use std::path::PathBuf;
use std::time::Duration;
use tempfile::TempDir;

fn script_analyzer(dir: &TempDir, body: &str) -> eyre::Result<ProcessAnalyzer> {
    let script = dir.path().join("analyzer.sh");
    std::fs::write(&script, body)?;
    let script_arg = script
        .to_str()
        .ok_or_else(|| eyre::eyre!("temp path is not UTF-8"))?
        .to_owned();
    let config = AnalyzerConfig::new("sh")
        .with_args([script_arg])
        .with_timeout(Duration::from_secs(10));
    Ok(ProcessAnalyzer::new(config))
}

fn files() -> eyre::Result<FileSet> {
    FileSet::new([PathBuf::from("src/a.rs"), PathBuf::from("src/b.rs")])
        .ok_or_else(|| eyre::eyre!("file set should be non-empty"))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn parses_report_from_stdout() -> eyre::Result<()> {
    let dir = TempDir::new()?;
    let analyzer = script_analyzer(
        &dir,
        r#"printf '{"total_detections": %d, "critical_issues": 0, "average_quality_score": 91.5}' "$#""#,
    )?;

    let report = analyzer.analyze(&files()?).await;

    eyre::ensure!(!report.is_errored(), "unexpected error: {:?}", report.error_message());
    eyre::ensure!(report.total_detections() == 2, "file paths should be passed as arguments");
    eyre::ensure!(report.average_quality_score() == QualityScore::new(91.5));
    Ok(())
}

#[rstest]
#[case::non_zero_exit("echo boom >&2; exit 3", "exited with")]
#[case::malformed_output("echo 'not json'", "not a valid report")]
#[case::error_payload(r#"echo '{"error": "parser crashed"}'"#, "parser crashed")]
#[tokio::test(flavor = "multi_thread")]
async fn failures_become_errored_reports(
    #[case] body: &str,
    #[case] expected_message: &str,
) -> eyre::Result<()> {
    let dir = TempDir::new()?;
    let analyzer = script_analyzer(&dir, body)?;

    let report = analyzer.analyze(&files()?).await;

    eyre::ensure!(report.is_errored());
    eyre::ensure!(report.critical_issues() == 0);
    eyre::ensure!(
        report
            .error_message()
            .is_some_and(|message| message.contains(expected_message)),
        "unexpected message: {:?}",
        report.error_message()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn hung_analyzer_times_out() -> eyre::Result<()> {
    let dir = TempDir::new()?;
    let analyzer = ProcessAnalyzer::new(
        script_analyzer(&dir, "sleep 30")?
            .config()
            .clone()
            .with_timeout(Duration::from_millis(200)),
    );

    let report = analyzer.analyze(&files()?).await;

    eyre::ensure!(report.is_errored());
    eyre::ensure!(
        report
            .error_message()
            .is_some_and(|message| message.contains("timed out after 200ms")),
        "unexpected message: {:?}",
        report.error_message()
    );
    Ok(())
}
