// optflow_sim/src/simulation/plugins/sensors/flow.rs

use nalgebra::Vector2;
use optflow_core::messages::{SensorReport, METERS_PER_DISPLACEMENT_COUNT};
use optflow_core::roles::DisplacementSource;
use optflow_core::state::OpticalFlowState;
use optflow_core::types::{Axis, AxisPair};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Bernoulli, Distribution, Normal};
use tracing::trace;

use crate::simulation::config::structs::FlowSensor;
use crate::simulation::core::error::SimError;
use crate::simulation::core::ground_truth::TruthHandle;

/// A downward-facing flow sensor looking at the ground under the vehicle.
///
/// Each sample reports the motion since the previous successful sample,
/// normalised to a 1 m height, with Gaussian noise added per axis. When a
/// sample drops out the motion is kept and reported on the next one, like a
/// sensor with an internal motion register.
pub struct SimulatedFlowSensor {
    truth: TruthHandle,
    rng: ChaCha8Rng,
    noise: Normal<f64>,
    quality: Normal<f64>,
    dropout: Bernoulli,
    last_position_m: Vector2<f64>,
}

impl SimulatedFlowSensor {
    pub fn new(config: &FlowSensor, truth: TruthHandle, rng: ChaCha8Rng) -> Result<Self, SimError> {
        let noise = Normal::new(0.0, config.noise_stddev_counts).map_err(|e| SimError::InvalidNoise {
            name: "sensor.noise_stddev_counts",
            reason: e.to_string(),
        })?;
        let quality = Normal::new(config.nominal_quality, config.quality_stddev).map_err(|e| {
            SimError::InvalidNoise {
                name: "sensor.quality_stddev",
                reason: e.to_string(),
            }
        })?;
        let dropout = Bernoulli::new(config.dropout_probability)
            .map_err(|_| SimError::InvalidProbability(config.dropout_probability))?;
        let last_position_m = truth.get().position_m;

        Ok(Self {
            truth,
            rng,
            noise,
            quality,
            dropout,
            last_position_m,
        })
    }

    fn normalised_counts(&mut self, moved_m: f64, height_m: f64) -> i16 {
        let counts = moved_m / height_m / METERS_PER_DISPLACEMENT_COUNT;
        let noisy = counts + self.noise.sample(&mut self.rng);
        noisy.round().clamp(f64::from(i16::MIN), f64::from(i16::MAX)) as i16
    }
}

impl DisplacementSource for SimulatedFlowSensor {
    fn sample(&mut self, state: &mut OpticalFlowState, _dt: f64) -> SensorReport {
        if self.dropout.sample(&mut self.rng) {
            trace!("Flow sensor dropped a sample.");
            return SensorReport::MISSING;
        }

        let truth = self.truth.get();
        let moved = truth.position_m - self.last_position_m;
        self.last_position_m = truth.position_m;

        let mut motion = AxisPair::zero();
        for axis in Axis::ALL {
            motion[axis] = self.normalised_counts(moved[axis.index()], truth.height_m);
            state.accumulate_displacement(axis, motion[axis]);
        }

        let quality = self.quality.sample(&mut self.rng).round().clamp(0.0, 255.0) as u8;
        SensorReport {
            quality,
            sampled: true,
            motion,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::config::structs::Vehicle;
    use crate::simulation::core::ground_truth::GroundTruth;
    use crate::simulation::plugins::gated_state;
    use rand::SeedableRng;

    fn noiseless() -> FlowSensor {
        FlowSensor {
            noise_stddev_counts: 0.0,
            nominal_quality: 150.0,
            quality_stddev: 0.0,
            dropout_probability: 0.0,
        }
    }

    #[test]
    fn test_displacement_is_normalised_to_one_metre() {
        // 50 cm/s at 2 m for 0.1 s: 5 cm on the ground, 2.5 cm at 1 m = 250 counts.
        let truth = TruthHandle::new(GroundTruth::from_config(&Vehicle {
            height_m: 2.0,
            ground_velocity_cmps: [50.0, -50.0],
            acceleration_mps2: [0.0, 0.0],
        }));
        let mut sensor =
            SimulatedFlowSensor::new(&noiseless(), truth.clone(), ChaCha8Rng::seed_from_u64(1))
                .expect("valid sensor config");

        let mut state = gated_state();
        truth.advance(0.1);
        let report = sensor.sample(&mut state, 0.1);

        assert!(report.sampled);
        assert_eq!(report.quality, 150);
        assert_eq!(report.motion, AxisPair::new(250, -250));
        assert_eq!(state.read_displacement(Axis::Roll), 250);
        assert_eq!(state.read_displacement(Axis::Pitch), -250);
    }

    #[test]
    fn test_dropout_keeps_motion_for_next_sample() {
        let truth = TruthHandle::new(GroundTruth::from_config(&Vehicle {
            height_m: 1.0,
            ground_velocity_cmps: [10.0, 0.0],
            acceleration_mps2: [0.0, 0.0],
        }));
        let mut config = noiseless();
        config.dropout_probability = 1.0;
        let mut sensor =
            SimulatedFlowSensor::new(&config, truth.clone(), ChaCha8Rng::seed_from_u64(1))
                .expect("valid sensor config");

        let mut state = gated_state();
        truth.advance(0.5);
        assert_eq!(sensor.sample(&mut state, 0.5), SensorReport::MISSING);
        assert_eq!(state.read_displacement(Axis::Roll), 0);

        sensor.dropout = Bernoulli::new(0.0).expect("valid probability");
        truth.advance(0.5);
        let report = sensor.sample(&mut state, 0.5);
        // 10 cm total at 1 m.
        assert_eq!(report.motion.roll, 1000);
        assert_eq!(state.read_displacement(Axis::Roll), 1000);
    }

    #[test]
    fn test_motion_is_reported_past_a_saturated_accumulator() {
        let truth = TruthHandle::new(GroundTruth::from_config(&Vehicle {
            height_m: 1.0,
            ground_velocity_cmps: [100.0, 0.0],
            acceleration_mps2: [0.0, 0.0],
        }));
        let mut sensor =
            SimulatedFlowSensor::new(&noiseless(), truth.clone(), ChaCha8Rng::seed_from_u64(1))
                .expect("valid sensor config");

        let mut state = gated_state();
        state.set_displacement(Axis::Roll, i16::MAX - 50);
        truth.advance(0.02);
        let report = sensor.sample(&mut state, 0.02);

        assert_eq!(report.motion.roll, 200);
        assert_eq!(state.read_displacement(Axis::Roll), i16::MAX);
    }

    #[test]
    fn test_negative_noise_is_rejected() {
        let truth = TruthHandle::new(GroundTruth::from_config(&Vehicle::default()));
        let mut config = noiseless();
        config.noise_stddev_counts = -1.0;
        let result = SimulatedFlowSensor::new(&config, truth, ChaCha8Rng::seed_from_u64(1));
        assert!(matches!(result, Err(SimError::InvalidNoise { .. })));
    }
}
