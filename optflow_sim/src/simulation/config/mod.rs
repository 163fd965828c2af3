// optflow_sim/src/simulation/config/mod.rs

//! Loading and validating scenario configuration from disk.

pub mod structs;

use figment::{
    providers::{Format, Toml},
    Figment,
};
use std::path::Path;
use tracing::info;

use crate::simulation::core::error::SimError;
pub use structs::ScenarioConfig;

/// Loads a scenario file and validates it.
pub fn load_scenario(path: &Path) -> Result<ScenarioConfig, SimError> {
    info!("Loading scenario from: {}", path.display());
    // Figment treats a missing file as an empty source; we want a hard error.
    if !path.is_file() {
        return Err(SimError::MissingScenario(path.to_path_buf()));
    }
    let config: ScenarioConfig = Figment::new().merge(Toml::file(path)).extract()?;
    config.validate()?;
    Ok(config)
}

/// Parses a scenario from TOML text. Used by tests and embedded scenarios.
pub fn parse_scenario(text: &str) -> Result<ScenarioConfig, SimError> {
    let config: ScenarioConfig = Figment::new().merge(Toml::string(text)).extract()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_empty_scenario_uses_defaults() {
        let config = parse_scenario("").expect("defaults are valid");
        assert_eq!(config, ScenarioConfig::default());
        assert!(config.optflow.enabled);
        assert_eq!(config.tick_count(), 500);
        assert_abs_diff_eq!(config.dt(), 0.02);
    }

    #[test]
    fn test_sections_override_defaults() {
        let config = parse_scenario(
            r#"
            [simulation]
            seed = 7
            rate_hz = 100.0
            duration_seconds = 2.5

            [optflow]
            enabled = false
            quality_threshold = 80
            activation_samples = 3

            [vehicle]
            height_m = 2.0
            ground_velocity_cmps = [30.0, -10.0]
            "#,
        )
        .expect("valid scenario");

        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.tick_count(), 250);
        assert!(!config.optflow.gate().enabled);
        assert_eq!(config.vehicle.ground_velocity_cmps, [30.0, -10.0]);
        assert_eq!(config.vehicle.acceleration_mps2, [0.0, 0.0]);
        assert_eq!(config.simulation.log_every, 50);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = parse_scenario("[optflow]\nenabled = true\nquality_threshold = 1\nactivation_samples = 1\nbogus = 1\n");
        assert!(matches!(err, Err(SimError::Config(_))));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let bad_rate = parse_scenario("[simulation]\nrate_hz = 0.0\nduration_seconds = 1.0\n");
        assert!(matches!(bad_rate, Err(SimError::InvalidRate(_))));

        let bad_dropout = parse_scenario(
            "[sensor]\nnoise_stddev_counts = 1.0\nnominal_quality = 150.0\nquality_stddev = 1.0\ndropout_probability = 1.5\n",
        );
        assert!(matches!(bad_dropout, Err(SimError::InvalidProbability(_))));

        let bad_height = parse_scenario("[vehicle]\nheight_m = -1.0\nground_velocity_cmps = [0.0, 0.0]\n");
        assert!(matches!(bad_height, Err(SimError::InvalidHeight(_))));
    }
}
