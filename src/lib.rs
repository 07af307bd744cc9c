use crate::api::scenario_dto::ScenarioDto;
use crate::domain::triage::{Scenario, TriageEngine, TriageReport};
use crate::error::Result;
use crate::loader::parser::parse_json_file;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;
pub mod report;

/// Loads a scenario file and runs one triage pass over it.
///
/// `seed_override` replaces the scenario's seed when given.
pub fn run_triage(file_path: &str, seed_override: Option<u64>) -> Result<TriageReport> {
    let dto: ScenarioDto = parse_json_file::<ScenarioDto>(file_path)?;
    log::info!("Scenario file '{}' parsed successfully.", file_path);

    let mut scenario = Scenario::from_dto(dto)?;
    if seed_override.is_some() {
        scenario.seed = seed_override;
    }

    Ok(TriageEngine::default().run(scenario))
}
