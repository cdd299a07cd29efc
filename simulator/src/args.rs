use std::path::PathBuf;

use clap::Parser;

use crate::Scenario;

#[derive(Parser, Debug, Clone)]
#[command(name = "submarine-sim")]
#[command(about = "Headless single-vessel run of the submarine control pipeline", long_about = None)]
pub struct Args {
    /// Scenario file (TOML)
    #[arg(long, default_value = "scenario.toml")]
    pub config: PathBuf,
    /// Stop after this many ticks instead of the scenario duration
    #[arg(long)]
    pub ticks: Option<u64>,
    /// Vessel class, overriding the scenario's
    #[arg(long)]
    pub class: Option<String>,
    /// Forward physics diagnostics to the log
    #[arg(long, default_value_t = false)]
    pub debug: bool,
}

impl Args {
    /// Command-line flags win over the scenario file.
    pub fn apply(&self, scenario: &mut Scenario) {
        if let Some(ticks) = self.ticks {
            scenario.duration_s = ticks as f32 * scenario.dt;
        }
        if let Some(class) = &self.class {
            scenario.vessel_class = class.clone();
        }
        if self.debug {
            scenario.debug = true;
        }
    }
}
