// optflow_sim/src/simulation/core/mod.rs

pub mod error;
pub mod ground_truth;
pub mod prng;
pub mod runner;
