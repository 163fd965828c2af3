// optflow_core/src/messages.rs

use crate::mode::OptflowMode;
use crate::types::{Axis, AxisPair};
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

/// Metres per displacement count at the 1 m reference height (mm × 10).
pub const METERS_PER_DISPLACEMENT_COUNT: f64 = 1.0e-4;

/// Metres per second per velocity count (cm/s).
pub const MPS_PER_VELOCITY_COUNT: f64 = 1.0e-2;

/// A consistent copy of the whole state block, taken at one point in the
/// control loop. This is what consumers and loggers pass around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlowSnapshot {
    pub mode: OptflowMode,
    pub displacement: AxisPair<i16>,
    pub velocity: AxisPair<i16>,
    pub acceleration: AxisPair<i16>,
}

/// The three estimates for one axis, read together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AxisSample {
    pub displacement: i16,
    pub velocity: i16,
    pub acceleration: i16,
}

/// What the flow sensor reports about its own sample, for the mode arbiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SensorReport {
    /// Surface quality reported by the sensor, 0 = no usable texture.
    pub quality: u8,
    /// False when no sample was produced this tick (bus error, dropout).
    pub sampled: bool,
    /// Motion counts this sample added to the accumulator, before any
    /// saturation. Zero when nothing was sampled.
    pub motion: AxisPair<i16>,
}

impl SensorReport {
    pub const MISSING: SensorReport = SensorReport {
        quality: 0,
        sampled: false,
        motion: AxisPair::new(0, 0),
    };
}

impl FlowSnapshot {
    pub fn axis(&self, axis: Axis) -> AxisSample {
        AxisSample {
            displacement: self.displacement[axis],
            velocity: self.velocity[axis],
            acceleration: self.acceleration[axis],
        }
    }

    /// Horizontal velocity in m/s.
    pub fn velocity_mps(&self) -> Vector2<f64> {
        self.velocity.to_vector2() * MPS_PER_VELOCITY_COUNT
    }

    /// Accumulated displacement in metres at the given height above ground.
    ///
    /// The accumulator is normalised to 1 m, so the apparent ground distance
    /// scales linearly with height.
    pub fn displacement_m(&self, height_m: f64) -> Vector2<f64> {
        self.displacement.to_vector2() * (METERS_PER_DISPLACEMENT_COUNT * height_m)
    }

    /// Acceleration in raw accelerometer counts.
    pub fn acceleration_counts(&self) -> Vector2<f64> {
        self.acceleration.to_vector2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample_snapshot() -> FlowSnapshot {
        FlowSnapshot {
            mode: OptflowMode::ACTIVE,
            displacement: AxisPair::new(500, -300),
            velocity: AxisPair::new(100, -40),
            acceleration: AxisPair::new(7, 0),
        }
    }

    #[test]
    fn test_axis_sample_reads_one_index() {
        let snap = sample_snapshot();
        assert_eq!(
            snap.axis(Axis::Roll),
            AxisSample {
                displacement: 500,
                velocity: 100,
                acceleration: 7
            }
        );
        assert_eq!(snap.axis(Axis::Pitch).displacement, -300);
        assert_eq!(snap.axis(Axis::Pitch).velocity, -40);
    }

    #[test]
    fn test_unit_conversions() {
        let snap = sample_snapshot();

        let v = snap.velocity_mps();
        assert_abs_diff_eq!(v.x, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, -0.4, epsilon = 1e-12);

        // 500 counts of 0.1 mm at 1 m is 5 cm; at 2 m it's 10 cm.
        let d1 = snap.displacement_m(1.0);
        let d2 = snap.displacement_m(2.0);
        assert_abs_diff_eq!(d1.x, 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(d2.x, 0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(d2.y, -0.06, epsilon = 1e-12);

        assert_abs_diff_eq!(snap.acceleration_counts().x, 7.0);
    }
}
