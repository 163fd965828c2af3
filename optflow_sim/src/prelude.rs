// optflow_sim/src/prelude.rs

pub use crate::cli::Cli;
pub use crate::simulation::config::{load_scenario, parse_scenario, ScenarioConfig};
pub use crate::simulation::core::error::SimError;
pub use crate::simulation::core::runner::{run_scenario, RunSummary};
pub use crate::simulation::plugins::consumer::Telemetry;

pub use optflow_core::prelude::*;
