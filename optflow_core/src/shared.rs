// optflow_core/src/shared.rs

use crate::messages::FlowSnapshot;
use crate::state::OpticalFlowState;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// The state block behind a lock, for setups where the sensor is polled on
/// a different task than the control loop.
///
/// Writers go through [`SharedOpticalFlow::write`], which holds the lock for
/// the whole closure, so a consumer never sees one axis of a pair updated
/// without the other. Readers take a [`FlowSnapshot`]. There is no
/// standalone constructor: wrap a block obtained from
/// [`crate::gate::OptflowGate`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "bevy", derive(bevy_ecs::prelude::Resource))]
pub struct SharedOpticalFlow {
    inner: Arc<Mutex<OpticalFlowState>>,
}

impl SharedOpticalFlow {
    pub fn from_state(state: OpticalFlowState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Runs `f` with exclusive access to the state and returns its result.
    pub fn write<R>(&self, f: impl FnOnce(&mut OpticalFlowState) -> R) -> R {
        f(&mut self.lock())
    }

    /// Runs `f` with shared access to the state.
    pub fn read<R>(&self, f: impl FnOnce(&OpticalFlowState) -> R) -> R {
        f(&self.lock())
    }

    pub fn snapshot(&self) -> FlowSnapshot {
        self.lock().snapshot()
    }

    pub fn trusted(&self) -> Option<FlowSnapshot> {
        self.lock().trusted()
    }

    // Every write is a plain field store, so a panicking writer can't leave
    // the block half-valid; keep serving it after poisoning.
    fn lock(&self) -> MutexGuard<'_, OpticalFlowState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
