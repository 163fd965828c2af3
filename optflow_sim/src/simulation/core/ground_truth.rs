// optflow_sim/src/simulation/core/ground_truth.rs

use nalgebra::Vector2;
use std::sync::{Arc, PoisonError, RwLock};

use crate::simulation::config::structs::Vehicle;

/// The vehicle's true horizontal motion, advanced once per tick before the
/// sensors sample it.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruth {
    pub time: f64,
    pub height_m: f64,
    /// Distance travelled since start, in metres.
    pub position_m: Vector2<f64>,
    pub velocity_mps: Vector2<f64>,
    pub acceleration_mps2: Vector2<f64>,
}

impl GroundTruth {
    pub fn from_config(vehicle: &Vehicle) -> Self {
        let [vx, vy] = vehicle.ground_velocity_cmps;
        let [ax, ay] = vehicle.acceleration_mps2;
        Self {
            time: 0.0,
            height_m: vehicle.height_m,
            position_m: Vector2::zeros(),
            velocity_mps: Vector2::new(vx, vy) / 100.0,
            acceleration_mps2: Vector2::new(ax, ay),
        }
    }

    /// Constant-acceleration step.
    pub fn advance(&mut self, dt: f64) {
        self.position_m += self.velocity_mps * dt + self.acceleration_mps2 * (0.5 * dt * dt);
        self.velocity_mps += self.acceleration_mps2 * dt;
        self.time += dt;
    }
}

/// Shared, read-mostly handle the sensor models sample from.
#[derive(Debug, Clone)]
pub struct TruthHandle(Arc<RwLock<GroundTruth>>);

impl TruthHandle {
    pub fn new(truth: GroundTruth) -> Self {
        Self(Arc::new(RwLock::new(truth)))
    }

    pub fn get(&self) -> GroundTruth {
        self.0.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn advance(&self, dt: f64) {
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .advance(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_constant_acceleration_step() {
        let vehicle = Vehicle {
            height_m: 1.5,
            ground_velocity_cmps: [100.0, 0.0],
            acceleration_mps2: [0.0, 2.0],
        };
        let handle = TruthHandle::new(GroundTruth::from_config(&vehicle));
        for _ in 0..10 {
            handle.advance(0.1);
        }
        let truth = handle.get();
        assert_abs_diff_eq!(truth.time, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(truth.position_m.x, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(truth.position_m.y, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(truth.velocity_mps.y, 2.0, epsilon = 1e-9);
    }
}
