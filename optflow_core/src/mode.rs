// optflow_core/src/mode.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// The optical-flow mode flag.
///
/// Zero means inactive: the rest of the block may be stale and must not
/// drive control decisions. Any nonzero value means active. The raw value is
/// kept verbatim so an arbiter can encode finer sub-states in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptflowMode(i8);

impl OptflowMode {
    pub const INACTIVE: OptflowMode = OptflowMode(0);
    pub const ACTIVE: OptflowMode = OptflowMode(1);

    pub const fn from_raw(raw: i8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> i8 {
        self.0
    }

    pub const fn is_active(self) -> bool {
        self.0 != 0
    }
}

impl From<i8> for OptflowMode {
    fn from(raw: i8) -> Self {
        Self(raw)
    }
}

impl From<OptflowMode> for i8 {
    fn from(mode: OptflowMode) -> Self {
        mode.0
    }
}

impl From<bool> for OptflowMode {
    fn from(active: bool) -> Self {
        if active {
            Self::ACTIVE
        } else {
            Self::INACTIVE
        }
    }
}

impl fmt::Display for OptflowMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_active() {
            write!(f, "active({})", self.0)
        } else {
            write!(f, "inactive")
        }
    }
}
