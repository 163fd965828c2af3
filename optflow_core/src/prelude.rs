// optflow_core/src/prelude.rs

// --- Core Abstractions (the collaborator contracts) ---
pub use crate::roles::{
    ControlTick, DisplacementSource, FlowConsumer, ModeArbiter, MotionEstimator,
};

// --- Core Data Structures ---
pub use crate::messages::{AxisSample, FlowSnapshot, SensorReport};
pub use crate::mode::OptflowMode;
pub use crate::state::{OpticalFlowState, VELOCITY_LIMIT_CMPS};
pub use crate::types::{Axis, AxisPair};

// --- Gating and Sharing ---
pub use crate::error::OptflowError;
pub use crate::gate::OptflowGate;
pub use crate::shared::SharedOpticalFlow;
