//! Shared world state for quality gate BDD scenarios.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use sniff_gate::{
    analysis::{adapters::ScriptedAnalyzer, domain::AnalysisReport},
    task::{
        adapters::memory::InMemoryTaskRegistry,
        services::{CompletionOutcome, TaskLifecycleError, TaskLifecycleService},
    },
};

/// Service type used by the BDD world.
pub type TestGateService =
    TaskLifecycleService<InMemoryTaskRegistry, ScriptedAnalyzer, DefaultClock>;

/// Scenario world for quality gate behaviour tests.
pub struct QualityGateWorld {
    pub service: TestGateService,
    pub analyzer: ScriptedAnalyzer,
    pub last_completion: Option<Result<CompletionOutcome, TaskLifecycleError>>,
}

impl QualityGateWorld {
    /// Creates a world whose analyzer reports a clean run until told
    /// otherwise.
    #[must_use]
    pub fn new() -> Self {
        let analyzer = ScriptedAnalyzer::new(AnalysisReport::from_summary(0, 0, 100.0));
        let service = TaskLifecycleService::new(
            Arc::new(InMemoryTaskRegistry::new()),
            Arc::new(analyzer.clone()),
            Arc::new(DefaultClock),
        );

        Self {
            service,
            analyzer,
            last_completion: None,
        }
    }

    /// Returns the successful completion outcome of the `When` step.
    ///
    /// # Errors
    ///
    /// Returns an error when no completion ran or it failed.
    pub fn outcome(&self) -> Result<&CompletionOutcome, eyre::Report> {
        match self.last_completion.as_ref() {
            Some(Ok(outcome)) => Ok(outcome),
            Some(Err(err)) => Err(eyre::eyre!("completion failed: {err}")),
            None => Err(eyre::eyre!("missing completion result in scenario world")),
        }
    }
}

impl Default for QualityGateWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> QualityGateWorld {
    QualityGateWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
