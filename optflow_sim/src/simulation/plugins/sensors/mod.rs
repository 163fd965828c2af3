// optflow_sim/src/simulation/plugins/sensors/mod.rs

pub mod accelerometer;
pub mod flow;
