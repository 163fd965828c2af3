// optflow_sim/src/simulation/core/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("scenario file not found: {}", .0.display())]
    MissingScenario(PathBuf),

    #[error("failed to load scenario: {0}")]
    Config(#[from] figment::Error),

    #[error("control-loop rate must be a positive number of Hz, got {0}")]
    InvalidRate(f64),

    #[error("duration must be non-negative, got {0} s")]
    InvalidDuration(f64),

    #[error("vehicle height must be positive, got {0} m")]
    InvalidHeight(f64),

    #[error("dropout probability must be within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("estimator smoothing must be within [0, 1), got {0}")]
    InvalidSmoothing(f64),

    #[error("invalid noise parameter '{name}': {reason}")]
    InvalidNoise { name: &'static str, reason: String },

    #[error("failed to encode run summary: {0}")]
    Summary(#[from] toml::ser::Error),
}
