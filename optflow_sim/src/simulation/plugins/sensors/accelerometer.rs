// optflow_sim/src/simulation/plugins/sensors/accelerometer.rs

use optflow_core::types::{Axis, AxisPair};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

use crate::simulation::config::structs::Accelerometer;
use crate::simulation::core::error::SimError;
use crate::simulation::core::ground_truth::TruthHandle;

const STANDARD_GRAVITY: f64 = 9.80665;

/// Horizontal accelerometer channels, already rotated into the level frame,
/// reporting raw counts.
pub struct SimulatedAccelerometer {
    truth: TruthHandle,
    rng: ChaCha8Rng,
    noise: Normal<f64>,
    counts_per_mps2: f64,
}

impl SimulatedAccelerometer {
    pub fn new(
        config: &Accelerometer,
        truth: TruthHandle,
        rng: ChaCha8Rng,
    ) -> Result<Self, SimError> {
        let noise = Normal::new(0.0, config.noise_stddev_counts).map_err(|e| SimError::InvalidNoise {
            name: "accelerometer.noise_stddev_counts",
            reason: e.to_string(),
        })?;
        Ok(Self {
            truth,
            rng,
            noise,
            counts_per_mps2: config.counts_per_g / STANDARD_GRAVITY,
        })
    }

    pub fn read_counts(&mut self) -> AxisPair<i16> {
        let accel = self.truth.get().acceleration_mps2;
        let mut counts = AxisPair::zero();
        for axis in Axis::ALL {
            let raw = accel[axis.index()] * self.counts_per_mps2 + self.noise.sample(&mut self.rng);
            counts[axis] = raw.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16;
        }
        counts
    }
}
