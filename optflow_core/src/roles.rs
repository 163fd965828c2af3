// optflow_core/src/roles.rs

//! Contracts for the collaborators around the state block.
//!
//! None of the algorithms live here. Each trait says which part of the
//! block a role may touch: producers get `&mut OpticalFlowState`, the
//! consumer only ever gets `&OpticalFlowState`.

use crate::messages::SensorReport;
use crate::state::OpticalFlowState;

/// The flow sensor driver. Writes (or accumulates) displacement once per
/// axis per sample period.
pub trait DisplacementSource: Send + Sync {
    /// Takes one sample and folds it into the block.
    ///
    /// `dt` is the time since the previous call, in seconds.
    fn sample(&mut self, state: &mut OpticalFlowState, dt: f64) -> SensorReport;
}

/// The velocity/acceleration estimator. Writes velocity (the block clamps
/// it) and acceleration.
///
/// Velocity should come from `report.motion` rather than from differencing
/// the accumulator: the accumulator saturates, the per-sample motion does not.
pub trait MotionEstimator: Send + Sync {
    fn estimate(&mut self, state: &mut OpticalFlowState, report: &SensorReport, dt: f64);

    /// Drops any history, e.g. after the block was re-initialized.
    fn reset(&mut self) {}
}

/// Sensor-health / failsafe logic. The only role allowed to write the mode.
pub trait ModeArbiter: Send + Sync {
    fn arbitrate(&mut self, state: &mut OpticalFlowState, report: &SensorReport);
}

/// The attitude/position controller side. Read-only.
pub trait FlowConsumer: Send + Sync {
    fn consume(&mut self, state: &OpticalFlowState);
}

/// One control-loop tick over the state block: sensor, estimator, arbiter,
/// then consumers, in that order. All writes of a tick land before any
/// consumer reads.
pub struct ControlTick {
    pub source: Box<dyn DisplacementSource>,
    pub estimator: Box<dyn MotionEstimator>,
    pub arbiter: Box<dyn ModeArbiter>,
    pub consumers: Vec<Box<dyn FlowConsumer>>,
}

impl ControlTick {
    pub fn new(
        source: Box<dyn DisplacementSource>,
        estimator: Box<dyn MotionEstimator>,
        arbiter: Box<dyn ModeArbiter>,
    ) -> Self {
        Self {
            source,
            estimator,
            arbiter,
            consumers: Vec::new(),
        }
    }

    pub fn with_consumer(mut self, consumer: Box<dyn FlowConsumer>) -> Self {
        self.consumers.push(consumer);
        self
    }

    pub fn run(&mut self, state: &mut OpticalFlowState, dt: f64) -> SensorReport {
        let was_active = state.is_active();

        let report = self.source.sample(state, dt);
        self.estimator.estimate(state, &report, dt);
        self.arbiter.arbitrate(state, &report);

        // Re-entering active mode starts the estimator from a clean history.
        if !was_active && state.is_active() {
            self.estimator.reset();
        }

        for consumer in &mut self.consumers {
            consumer.consume(state);
        }
        report
    }
}
