//! Headless driver for the `physics` pipeline: loads a TOML scenario, steps
//! one vessel with the reference integrator and logs its progress.

mod args;
mod run;
mod scenario;
mod swell;

pub use args::Args;
pub use run::{run_scenario, RunSummary};
pub use scenario::{load_scenario, parse_scenario, Scenario, StartState};
pub use swell::Swell;
