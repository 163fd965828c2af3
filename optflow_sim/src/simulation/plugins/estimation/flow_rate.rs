// optflow_sim/src/simulation/plugins/estimation/flow_rate.rs

use nalgebra::Vector2;
use optflow_core::messages::{SensorReport, METERS_PER_DISPLACEMENT_COUNT, MPS_PER_VELOCITY_COUNT};
use optflow_core::roles::MotionEstimator;
use optflow_core::state::OpticalFlowState;
use optflow_core::types::{Axis, AxisPair};

use crate::simulation::plugins::sensors::accelerometer::SimulatedAccelerometer;

/// Velocity from the motion counts of each flow sample divided by the time
/// since the previous sample, smoothed with a first-order low-pass;
/// acceleration passed through from the accelerometer.
///
/// The accumulated displacement is never read, so a saturated accumulator
/// does not stall the velocity. Missed samples hold the last velocity and
/// their time is charged to the next sample, which carries their motion.
pub struct FlowRateEstimator {
    accelerometer: SimulatedAccelerometer,
    height_m: f64,
    smoothing: f64,
    since_sample_s: f64,
    filtered_cmps: Vector2<f64>,
}

impl FlowRateEstimator {
    pub fn new(accelerometer: SimulatedAccelerometer, height_m: f64, smoothing: f64) -> Self {
        Self {
            accelerometer,
            height_m,
            smoothing,
            since_sample_s: 0.0,
            filtered_cmps: Vector2::zeros(),
        }
    }

    fn counts_to_cmps(&self, counts: i16, dt: f64) -> f64 {
        let metres = f64::from(counts) * METERS_PER_DISPLACEMENT_COUNT * self.height_m;
        metres / dt / MPS_PER_VELOCITY_COUNT
    }
}

impl MotionEstimator for FlowRateEstimator {
    fn estimate(&mut self, state: &mut OpticalFlowState, report: &SensorReport, dt: f64) {
        state.set_acceleration_pair(self.accelerometer.read_counts());

        self.since_sample_s += dt;
        if !report.sampled {
            return;
        }
        let elapsed = std::mem::take(&mut self.since_sample_s);
        if elapsed <= 0.0 {
            return;
        }

        for axis in Axis::ALL {
            let raw = self.counts_to_cmps(report.motion[axis], elapsed);
            let i = axis.index();
            self.filtered_cmps[i] =
                self.smoothing * self.filtered_cmps[i] + (1.0 - self.smoothing) * raw;
        }
        // The state clamps; the float-to-int cast saturates.
        state.set_velocity_pair(AxisPair::new(
            self.filtered_cmps.x.round() as i32,
            self.filtered_cmps.y.round() as i32,
        ));
    }

    fn reset(&mut self) {
        self.since_sample_s = 0.0;
        self.filtered_cmps = Vector2::zeros();
    }
}
