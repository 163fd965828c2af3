// optflow_sim/src/simulation/plugins/consumer.rs

use optflow_core::messages::FlowSnapshot;
use optflow_core::roles::FlowConsumer;
use optflow_core::state::OpticalFlowState;
use serde::Serialize;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// What the position-hold side saw over a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Telemetry {
    pub ticks: u64,
    pub active_ticks: u64,
    /// Largest |velocity| on either axis among trusted reads, in cm/s.
    pub max_abs_velocity_cmps: i16,
    /// Most recent snapshot taken while the block was active.
    pub last_trusted: Option<FlowSnapshot>,
}

/// Stand-in for the position controller: reads the block only through
/// `trusted()`, records what it saw, and logs periodically.
pub struct TelemetryRecorder {
    telemetry: Arc<Mutex<Telemetry>>,
    height_m: f64,
    log_every: u64,
}

impl TelemetryRecorder {
    pub fn new(height_m: f64, log_every: u64) -> (Self, Arc<Mutex<Telemetry>>) {
        let telemetry = Arc::new(Mutex::new(Telemetry::default()));
        let recorder = Self {
            telemetry: telemetry.clone(),
            height_m,
            log_every,
        };
        (recorder, telemetry)
    }
}

impl FlowConsumer for TelemetryRecorder {
    fn consume(&mut self, state: &OpticalFlowState) {
        let mut telemetry = self.telemetry.lock().unwrap_or_else(PoisonError::into_inner);
        telemetry.ticks += 1;

        let trusted = state.trusted();
        if let Some(snap) = trusted {
            telemetry.active_ticks += 1;
            let peak = snap.velocity.roll.abs().max(snap.velocity.pitch.abs());
            telemetry.max_abs_velocity_cmps = telemetry.max_abs_velocity_cmps.max(peak);
            telemetry.last_trusted = Some(snap);
        }

        if self.log_every > 0 && telemetry.ticks % self.log_every == 0 {
            match trusted {
                Some(snap) => {
                    let d = snap.displacement_m(self.height_m);
                    let v = snap.velocity_mps();
                    info!(
                        "[tick {}] {} pos=({:.3}, {:.3}) m vel=({:.2}, {:.2}) m/s acc=({}, {})",
                        telemetry.ticks,
                        snap.mode,
                        d.x,
                        d.y,
                        v.x,
                        v.y,
                        snap.acceleration.roll,
                        snap.acceleration.pitch
                    );
                }
                None => info!("[tick {}] optical flow inactive, holding off.", telemetry.ticks),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::plugins::gated_state;
    use optflow_core::types::Axis;

    #[test]
    fn test_inactive_reads_are_not_recorded() {
        let (mut recorder, telemetry) = TelemetryRecorder::new(1.0, 0);
        let mut state = gated_state();
        state.set_velocity(Axis::Roll, 90);
        recorder.consume(&state);

        state.set_mode(1);
        state.set_velocity(Axis::Pitch, -60);
        recorder.consume(&state);

        let t = telemetry.lock().unwrap();
        assert_eq!(t.ticks, 2);
        assert_eq!(t.active_ticks, 1);
        assert_eq!(t.max_abs_velocity_cmps, 90);
        assert_eq!(t.last_trusted.map(|s| s.velocity.pitch), Some(-60));
    }
}
