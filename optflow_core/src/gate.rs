// optflow_core/src/gate.rs

use crate::shared::SharedOpticalFlow;
use crate::state::OpticalFlowState;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Decides whether the optical-flow state block exists at all.
///
/// The block is present only if the crate was built with the `optflow`
/// feature AND the gate is enabled at startup. Everything downstream holds
/// an `Option` and must cope with `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptflowGate {
    pub enabled: bool,
}

impl Default for OptflowGate {
    fn default() -> Self {
        Self {
            enabled: Self::compiled_in(),
        }
    }
}

impl OptflowGate {
    pub const fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Whether this build carries the optical-flow subsystem.
    pub const fn compiled_in() -> bool {
        cfg!(feature = "optflow")
    }

    pub const fn is_open(&self) -> bool {
        self.enabled && Self::compiled_in()
    }

    /// Builds a zeroed, inactive state block if the gate is open.
    ///
    /// This is the only way to obtain an [`OpticalFlowState`]; without the
    /// `optflow` feature the constructor is not compiled at all.
    pub fn instantiate(&self) -> Option<OpticalFlowState> {
        if self.is_open() {
            return self.build();
        }
        info!(
            "Optical flow disabled (compiled in: {}, enabled: {}).",
            Self::compiled_in(),
            self.enabled
        );
        None
    }

    #[cfg(feature = "optflow")]
    fn build(&self) -> Option<OpticalFlowState> {
        info!("Optical flow enabled, state block created.");
        Some(OpticalFlowState::new())
    }

    #[cfg(not(feature = "optflow"))]
    fn build(&self) -> Option<OpticalFlowState> {
        None
    }

    /// Same as [`Self::instantiate`], wrapped for use across tasks.
    pub fn instantiate_shared(&self) -> Option<SharedOpticalFlow> {
        self.instantiate().map(SharedOpticalFlow::from_state)
    }
}
