use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use physics::{ControlTargets, Vec3f, VesselConfig};
use serde::{Deserialize, Serialize};

use crate::Swell;

/// Initial pose and motion of the vessel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StartState {
    pub position: Vec3f,
    /// degrees
    pub heading: f32,
    /// m/s along the hull
    pub speed: f32,
}

impl Default for StartState {
    fn default() -> Self {
        Self { position: Vec3f::new(0.0, -50.0, 0.0), heading: 0.0, speed: 0.0 }
    }
}

/// One headless run: which vessel, where it starts, what it is ordered to do.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub vessel_class: String,
    /// Partial `VesselConfig` merged over the class preset.
    pub vessel: toml::Table,
    pub debug: bool,
    pub targets: ControlTargets,
    pub sea_level: f32,
    pub swell: Option<Swell>,
    pub start: StartState,
    /// Drag multipliers keyed by appendage name.
    pub appendages: BTreeMap<String, f32>,
    pub dt: f32,
    pub duration_s: f32,
    /// Seconds between progress lines.
    pub report_every_s: f32,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            vessel_class: "attack".into(),
            vessel: toml::Table::new(),
            debug: false,
            targets: ControlTargets { speed: 6.0, heading: 0.0, depth: 50.0 },
            sea_level: 0.0,
            swell: None,
            start: StartState::default(),
            appendages: BTreeMap::new(),
            dt: 1.0 / 60.0,
            duration_s: 120.0,
            report_every_s: 10.0,
        }
    }
}

impl Scenario {
    pub fn ticks(&self) -> u64 {
        if self.dt > 0.0 && self.duration_s > 0.0 {
            (self.duration_s / self.dt).round() as u64
        } else {
            0
        }
    }

    /// Class preset with the scenario's `[vessel]` overrides applied, validated.
    pub fn resolve_vessel(&self) -> Result<VesselConfig> {
        let preset = physics::vessel_classes::by_name(&self.vessel_class)?;
        let mut merged = match toml::Value::try_from(&preset).context("serializing vessel preset")? {
            toml::Value::Table(t) => t,
            other => anyhow::bail!("vessel preset serialized to {}", other.type_str()),
        };
        merge_tables(&mut merged, &self.vessel);
        let mut cfg: VesselConfig = toml::Value::Table(merged)
            .try_into()
            .with_context(|| format!("invalid [vessel] overrides for class `{}`", self.vessel_class))?;
        cfg.debug |= self.debug;
        cfg.validate()
            .with_context(|| format!("vessel `{}` failed validation", cfg.class_name))?;
        Ok(cfg)
    }
}

/// Recursively overlays `overrides` onto `base`; scalars and arrays replace.
fn merge_tables(base: &mut toml::Table, overrides: &toml::Table) {
    for (key, value) in overrides {
        match (base.get_mut(key), value) {
            (Some(toml::Value::Table(dst)), toml::Value::Table(src)) => merge_tables(dst, src),
            _ => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

pub fn parse_scenario(text: &str) -> Result<Scenario> {
    let scenario: Scenario = toml::from_str(text).context("parsing scenario TOML")?;
    anyhow::ensure!(scenario.dt.is_finite() && scenario.dt > 0.0, "dt must be positive, got {}", scenario.dt);
    Ok(scenario)
}

pub fn load_scenario(path: &Path) -> Result<Scenario> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scenario {}", path.display()))?;
    parse_scenario(&text).with_context(|| format!("loading scenario {}", path.display()))
}
