// optflow_core/src/error.rs

use thiserror::Error;

/// Errors produced by the optical-flow core.
///
/// Everything on the state block itself is infallible. The only failure is
/// converting a raw axis index coming from index-based driver code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OptflowError {
    #[error("axis index {0} is out of range, expected 0 or 1")]
    InvalidAxis(usize),
}
