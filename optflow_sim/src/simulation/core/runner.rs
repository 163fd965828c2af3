// optflow_sim/src/simulation/core/runner.rs

use optflow_core::messages::FlowSnapshot;
use serde::Serialize;
use std::sync::PoisonError;
use tracing::info;

use crate::simulation::config::ScenarioConfig;
use crate::simulation::core::error::SimError;
use crate::simulation::core::ground_truth::{GroundTruth, TruthHandle};
use crate::simulation::core::prng::SimulationRng;
use crate::simulation::plugins::build_control_tick;
use crate::simulation::plugins::consumer::Telemetry;

/// The outcome of one scenario run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub optflow_present: bool,
    /// What the consumer saw. `None` when the block was gated off.
    pub telemetry: Option<Telemetry>,
    /// The block as it stood after the last tick.
    pub final_state: Option<FlowSnapshot>,
}

impl RunSummary {
    pub fn to_toml(&self) -> Result<String, SimError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Runs `ticks` control-loop iterations (or the scenario duration).
pub fn run_scenario(config: &ScenarioConfig, ticks: Option<u64>) -> Result<RunSummary, SimError> {
    config.validate()?;
    let ticks = ticks.unwrap_or_else(|| config.tick_count());
    let dt = config.dt();

    let Some(mut state) = config.optflow.gate().instantiate() else {
        info!("Running {} ticks without optical flow.", ticks);
        return Ok(RunSummary {
            ticks,
            optflow_present: false,
            telemetry: None,
            final_state: None,
        });
    };

    let truth = TruthHandle::new(GroundTruth::from_config(&config.vehicle));
    let mut rng = SimulationRng::from_seed_option(config.simulation.seed);
    let (mut tick, telemetry) = build_control_tick(config, &truth, &mut rng)?;

    info!("Running {} ticks at {} Hz.", ticks, config.simulation.rate_hz);
    for _ in 0..ticks {
        truth.advance(dt);
        tick.run(&mut state, dt);
    }

    let telemetry = telemetry
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone();
    info!(
        "Run complete: {} of {} ticks with trusted optical flow, peak |v| {} cm/s.",
        telemetry.active_ticks, telemetry.ticks, telemetry.max_abs_velocity_cmps
    );

    Ok(RunSummary {
        ticks,
        optflow_present: true,
        telemetry: Some(telemetry),
        final_state: Some(state.snapshot()),
    })
}
