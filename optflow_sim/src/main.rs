use clap::Parser;
use optflow_sim::{cli::Cli, run};
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let summary = match run(&cli).and_then(|summary| summary.to_toml()) {
        Ok(summary) => summary,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    println!("{summary}");
    ExitCode::SUCCESS
}
