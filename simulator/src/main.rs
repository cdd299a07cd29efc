use anyhow::Result;
use clap::Parser;
use tracing::info;

use simulator::{load_scenario, run_scenario, Args};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut scenario = load_scenario(&args.config)?;
    args.apply(&mut scenario);
    info!(?scenario, "Scenario loaded");

    let summary = run_scenario(&scenario)?;
    info!(?summary, "Run finished");
    Ok(())
}
