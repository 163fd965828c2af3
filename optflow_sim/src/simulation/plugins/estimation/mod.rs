// optflow_sim/src/simulation/plugins/estimation/mod.rs

pub mod flow_rate;
