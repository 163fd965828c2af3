// optflow_sim/src/lib.rs

// This prelude is for convenience for other files and binaries using the harness.
pub mod prelude;

pub mod cli;
pub mod simulation;

use cli::Cli;
use simulation::config::load_scenario;
use simulation::core::error::SimError;
use simulation::core::runner::{run_scenario, RunSummary};

/// Loads the scenario named on the command line, applies the CLI overrides
/// and runs it.
pub fn run(cli: &Cli) -> Result<RunSummary, SimError> {
    let mut config = load_scenario(&cli.scenario)?;
    if let Some(seed) = cli.seed {
        config.simulation.seed = Some(seed);
    }
    if cli.disable_optflow {
        config.optflow.enabled = false;
    }
    run_scenario(&config, cli.ticks)
}
