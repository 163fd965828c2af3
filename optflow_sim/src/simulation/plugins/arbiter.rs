// optflow_sim/src/simulation/plugins/arbiter.rs

use optflow_core::messages::SensorReport;
use optflow_core::mode::OptflowMode;
use optflow_core::roles::ModeArbiter;
use optflow_core::state::OpticalFlowState;
use tracing::{info, warn};

use crate::simulation::config::structs::Optflow;

/// Activates optical flow after a run of healthy samples and drops it on the
/// first unhealthy one. Re-acquisition re-initializes the block, so the
/// displacement accumulator restarts from zero at the new hold point.
#[derive(Debug, Clone)]
pub struct QualityArbiter {
    quality_threshold: u8,
    activation_samples: u32,
    healthy_streak: u32,
}

impl QualityArbiter {
    pub fn new(config: &Optflow) -> Self {
        Self {
            quality_threshold: config.quality_threshold,
            activation_samples: config.activation_samples,
            healthy_streak: 0,
        }
    }

    fn is_healthy(&self, report: &SensorReport) -> bool {
        report.sampled && report.quality >= self.quality_threshold
    }
}

impl ModeArbiter for QualityArbiter {
    fn arbitrate(&mut self, state: &mut OpticalFlowState, report: &SensorReport) {
        if !self.is_healthy(report) {
            if state.is_active() {
                warn!(
                    "Optical flow lost (sampled: {}, quality: {}).",
                    report.sampled, report.quality
                );
                state.set_mode_flag(OptflowMode::INACTIVE);
            }
            self.healthy_streak = 0;
            return;
        }

        self.healthy_streak = self.healthy_streak.saturating_add(1);
        if !state.is_active() && self.healthy_streak >= self.activation_samples {
            info!(
                "Optical flow acquired after {} healthy samples.",
                self.healthy_streak
            );
            state.initialize();
            state.set_mode_flag(OptflowMode::ACTIVE);
        }
    }
}
