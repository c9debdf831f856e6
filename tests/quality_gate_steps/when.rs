//! When steps for quality gate BDD scenarios.

use super::world::{QualityGateWorld, run_async};
use rstest_bdd_macros::when;
use sniff_gate::task::domain::TaskId;

#[when(r#"completion with verification is requested for "{task_id}""#)]
fn request_completion(world: &mut QualityGateWorld, task_id: String) -> Result<(), eyre::Report> {
    let id = TaskId::new(task_id).map_err(|err| eyre::eyre!("invalid task id: {err}"))?;
    let result = run_async(world.service.complete_with_verification(&id));
    world.last_completion = Some(result);
    Ok(())
}
