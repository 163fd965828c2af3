// optflow_core/src/state.rs

use crate::messages::FlowSnapshot;
use crate::mode::OptflowMode;
use crate::types::{Axis, AxisPair};
use tracing::{debug, trace};

/// Magnitude limit on the published horizontal velocity, in cm/s.
pub const VELOCITY_LIMIT_CMPS: i16 = 100;

/// The optical-flow estimator's shared state block.
///
/// One instance exists per vehicle, and only when the optical-flow feature
/// is enabled (see [`crate::gate::OptflowGate`]). It is owned explicitly and
/// handed by reference to the collaborators that produce and consume it:
///
/// | Field          | Units                         | Written by          |
/// |----------------|-------------------------------|---------------------|
/// | `displacement` | mm × 10, normalised to 1 m    | flow sensor driver  |
/// | `mode`         | 0 = inactive, nonzero = active| mode arbiter        |
/// | `velocity`     | cm/s, always in [-100, 100]   | velocity estimator  |
/// | `acceleration` | raw accelerometer counts      | accel estimator     |
///
/// The fields are private so the velocity range holds at every observation
/// point: the only way to write a velocity is through the clamping setters.
/// There is no public constructor and no `Default`; a block is obtained from
/// [`crate::gate::OptflowGate::instantiate`], which only builds one when the
/// `optflow` feature is compiled in.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
pub struct OpticalFlowState {
    displacement: AxisPair<i16>,
    mode: OptflowMode,
    velocity: AxisPair<i16>,
    acceleration: AxisPair<i16>,
}

impl OpticalFlowState {
    const ZEROED: Self = Self {
        displacement: AxisPair::new(0, 0),
        mode: OptflowMode::INACTIVE,
        velocity: AxisPair::new(0, 0),
        acceleration: AxisPair::new(0, 0),
    };

    /// Creates a zeroed, inactive state block.
    #[cfg(feature = "optflow")]
    pub(crate) const fn new() -> Self {
        Self::ZEROED
    }

    /// Resets every field to zero and the mode to inactive.
    ///
    /// Called by a collaborator on sensor re-acquisition or mode re-entry;
    /// the block never resets itself.
    pub fn initialize(&mut self) {
        debug!("Optical flow state re-initialized (was {}).", self.mode);
        *self = Self::ZEROED;
    }

    // --- Mode ---

    /// Stores the raw mode value verbatim. No range rule applies to it.
    pub fn set_mode(&mut self, raw: i8) {
        self.set_mode_flag(OptflowMode::from_raw(raw));
    }

    pub fn set_mode_flag(&mut self, mode: OptflowMode) {
        if mode.is_active() != self.mode.is_active() {
            debug!("Optical flow mode changed: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn read_mode(&self) -> OptflowMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode.is_active()
    }

    // --- Displacement ---

    pub fn set_displacement(&mut self, axis: Axis, value: i16) {
        self.displacement[axis] = value;
    }

    pub fn set_displacement_pair(&mut self, value: AxisPair<i16>) {
        self.displacement = value;
    }

    /// Adds a per-sample delta to the accumulator, saturating at the `i16`
    /// bounds rather than wrapping.
    pub fn accumulate_displacement(&mut self, axis: Axis, delta: i16) {
        let current = self.displacement[axis];
        let next = current.saturating_add(delta);
        if next != current.wrapping_add(delta) {
            trace!("Displacement on {} axis saturated at {}", axis, next);
        }
        self.displacement[axis] = next;
    }

    pub fn read_displacement(&self, axis: Axis) -> i16 {
        self.displacement[axis]
    }

    pub fn displacement(&self) -> AxisPair<i16> {
        self.displacement
    }

    // --- Velocity ---

    /// Stores the velocity for `axis` after clamping it into
    /// `[-VELOCITY_LIMIT_CMPS, VELOCITY_LIMIT_CMPS]`.
    pub fn set_velocity(&mut self, axis: Axis, value: i32) {
        self.velocity[axis] = clamp_velocity(value);
    }

    pub fn set_velocity_pair(&mut self, value: AxisPair<i32>) {
        self.velocity = value.map(clamp_velocity);
    }

    pub fn read_velocity(&self, axis: Axis) -> i16 {
        self.velocity[axis]
    }

    pub fn velocity(&self) -> AxisPair<i16> {
        self.velocity
    }

    // --- Acceleration ---

    pub fn set_acceleration(&mut self, axis: Axis, value: i16) {
        self.acceleration[axis] = value;
    }

    pub fn set_acceleration_pair(&mut self, value: AxisPair<i16>) {
        self.acceleration = value;
    }

    pub fn read_acceleration(&self, axis: Axis) -> i16 {
        self.acceleration[axis]
    }

    pub fn acceleration(&self) -> AxisPair<i16> {
        self.acceleration
    }

    // --- Whole-block reads ---

    /// A consistent copy of every field.
    pub fn snapshot(&self) -> FlowSnapshot {
        FlowSnapshot {
            mode: self.mode,
            displacement: self.displacement,
            velocity: self.velocity,
            acceleration: self.acceleration,
        }
    }

    /// The snapshot, but only when the mode says the data can be trusted.
    pub fn trusted(&self) -> Option<FlowSnapshot> {
        self.mode.is_active().then(|| self.snapshot())
    }
}

fn clamp_velocity(value: i32) -> i16 {
    let limit = i32::from(VELOCITY_LIMIT_CMPS);
    // The clamped value always fits.
    value.clamp(-limit, limit) as i16
}
