// optflow_sim/src/simulation/plugins/mod.rs

pub mod arbiter;
pub mod consumer;
pub mod estimation;
pub mod sensors;

use optflow_core::roles::ControlTick;
#[cfg(test)]
use optflow_core::{gate::OptflowGate, state::OpticalFlowState};
use std::sync::{Arc, Mutex};
use tracing::info;

use crate::simulation::config::ScenarioConfig;
use crate::simulation::core::error::SimError;
use crate::simulation::core::ground_truth::TruthHandle;
use crate::simulation::core::prng::SimulationRng;
use arbiter::QualityArbiter;
use consumer::{Telemetry, TelemetryRecorder};
use estimation::flow_rate::FlowRateEstimator;
use sensors::accelerometer::SimulatedAccelerometer;
use sensors::flow::SimulatedFlowSensor;

/// Wires the simulated collaborators around the state block.
///
/// Sensors fork their generators from `rng` in a fixed order, so a seeded
/// scenario replays identically.
pub fn build_control_tick(
    config: &ScenarioConfig,
    truth: &TruthHandle,
    rng: &mut SimulationRng,
) -> Result<(ControlTick, Arc<Mutex<Telemetry>>), SimError> {
    info!("  -> Flow sensor, noise {:.2} counts", config.sensor.noise_stddev_counts);
    let flow = SimulatedFlowSensor::new(&config.sensor, truth.clone(), rng.fork())?;

    info!(
        "  -> Accelerometer, {} counts/g",
        config.accelerometer.counts_per_g
    );
    let accel = SimulatedAccelerometer::new(&config.accelerometer, truth.clone(), rng.fork())?;

    let estimator =
        FlowRateEstimator::new(accel, config.vehicle.height_m, config.estimator.smoothing);
    let arbiter = QualityArbiter::new(&config.optflow);
    let (recorder, telemetry) =
        TelemetryRecorder::new(config.vehicle.height_m, config.simulation.log_every);

    let tick = ControlTick::new(Box::new(flow), Box::new(estimator), Box::new(arbiter))
        .with_consumer(Box::new(recorder));
    Ok((tick, telemetry))
}

/// A fresh block through the gate, for plugin unit tests.
#[cfg(test)]
pub(crate) fn gated_state() -> OpticalFlowState {
    OptflowGate::new(true)
        .instantiate()
        .expect("optflow feature is on by default")
}
