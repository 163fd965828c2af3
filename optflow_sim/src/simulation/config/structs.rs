// optflow_sim/src/simulation/config/structs.rs

use optflow_core::gate::OptflowGate;
use serde::{Deserialize, Serialize};

use crate::simulation::core::error::SimError;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # ScenarioConfig
/// The root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [simulation] section is missing
    pub simulation: Simulation,

    #[serde(default)]
    pub optflow: Optflow,

    #[serde(default)]
    pub vehicle: Vehicle,

    #[serde(default)]
    pub sensor: FlowSensor,

    #[serde(default)]
    pub accelerometer: Accelerometer,

    #[serde(default)]
    pub estimator: Estimator,
}

impl ScenarioConfig {
    /// Rejects values the sensor models can't be built from.
    pub fn validate(&self) -> Result<(), SimError> {
        let rate = self.simulation.rate_hz;
        if !(rate.is_finite() && rate > 0.0) {
            return Err(SimError::InvalidRate(rate));
        }
        if !(self.simulation.duration_seconds.is_finite() && self.simulation.duration_seconds >= 0.0)
        {
            return Err(SimError::InvalidDuration(self.simulation.duration_seconds));
        }
        if !(self.vehicle.height_m.is_finite() && self.vehicle.height_m > 0.0) {
            return Err(SimError::InvalidHeight(self.vehicle.height_m));
        }
        let p = self.sensor.dropout_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(SimError::InvalidProbability(p));
        }
        let alpha = self.estimator.smoothing;
        if !(0.0..1.0).contains(&alpha) {
            return Err(SimError::InvalidSmoothing(alpha));
        }
        Ok(())
    }

    /// Number of control-loop ticks covered by `duration_seconds`.
    pub fn tick_count(&self) -> u64 {
        (self.simulation.duration_seconds * self.simulation.rate_hz).round() as u64
    }

    pub fn dt(&self) -> f64 {
        1.0 / self.simulation.rate_hz
    }
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in the scenario.toml file.
// =========================================================================

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Simulation {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Control-loop rate in Hz.
    pub rate_hz: f64,
    /// Duration of the run in seconds.
    pub duration_seconds: f64,
    /// Log a telemetry line every this many ticks (0 = never).
    #[serde(default = "default_log_every")]
    pub log_every: u64,
}

fn default_log_every() -> u64 {
    50
}

impl Default for Simulation {
    fn default() -> Self {
        Self {
            seed: None,
            rate_hz: 50.0,
            duration_seconds: 10.0,
            log_every: default_log_every(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Optflow {
    /// Whether the optical-flow block is instantiated at all.
    pub enabled: bool,
    /// Minimum surface quality for a sample to count as healthy.
    pub quality_threshold: u8,
    /// Consecutive healthy samples needed before the arbiter goes active.
    pub activation_samples: u32,
}

impl Default for Optflow {
    fn default() -> Self {
        Self {
            enabled: true,
            quality_threshold: 100,
            activation_samples: 5,
        }
    }
}

impl Optflow {
    pub fn gate(&self) -> OptflowGate {
        OptflowGate::new(self.enabled)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Vehicle {
    /// Height above ground in metres, held constant.
    pub height_m: f64,
    /// Initial ground velocity `[roll, pitch]` in cm/s.
    pub ground_velocity_cmps: [f64; 2],
    /// Constant horizontal acceleration `[roll, pitch]` in m/s^2.
    #[serde(default)]
    pub acceleration_mps2: [f64; 2],
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            height_m: 1.0,
            ground_velocity_cmps: [0.0, 0.0],
            acceleration_mps2: [0.0, 0.0],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FlowSensor {
    /// Standard deviation of the per-sample displacement noise, in counts.
    pub noise_stddev_counts: f64,
    /// Mean surface quality reported on a good surface.
    pub nominal_quality: f64,
    /// Standard deviation of the reported quality.
    pub quality_stddev: f64,
    /// Chance that a tick produces no sample at all.
    pub dropout_probability: f64,
}

impl Default for FlowSensor {
    fn default() -> Self {
        Self {
            noise_stddev_counts: 2.0,
            nominal_quality: 180.0,
            quality_stddev: 20.0,
            dropout_probability: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Accelerometer {
    /// Raw counts for 1 g.
    pub counts_per_g: f64,
    pub noise_stddev_counts: f64,
}

impl Default for Accelerometer {
    fn default() -> Self {
        Self {
            counts_per_g: 512.0,
            noise_stddev_counts: 1.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Estimator {
    /// Weight of the previous velocity estimate, in `[0, 1)`. 0 disables smoothing.
    pub smoothing: f64,
}

impl Default for Estimator {
    fn default() -> Self {
        Self { smoothing: 0.5 }
    }
}
