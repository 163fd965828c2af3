use clap::Parser;
use std::path::PathBuf;

/// Optflow sim: drives the optical-flow state block through a scripted
/// hover/drift scenario on a fixed-rate control loop.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/hover_drift.toml")]
    pub scenario: PathBuf,

    /// Run exactly this many control-loop ticks instead of the scenario duration.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Override the scenario's PRNG seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Force the optical-flow gate closed, as if the feature were not built in.
    #[arg(long, default_value_t = false)]
    pub disable_optflow: bool,
}
