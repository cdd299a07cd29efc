//! Per-tick force/torque pipeline for a simulated submarine.
//!
//! The host advances the rigid body; every tick it hands the current
//! [`RigidBodyState`] and operator [`ControlTargets`] to a
//! [`SubmarineController`], which appends forces/torques (and, for a few
//! corrective snaps, writes velocity/position directly). [`host::integrate`]
//! is a minimal stand-in integrator for headless runs.

mod math;
pub use math::{Quatf, Vec2f, Vec3f};

pub mod heading;

mod error;
pub use error::ConfigError;

mod config;
pub use config::{
    BallastConfig, BuoyancyConfig, DivePlaneConfig, DragConfig, HullLiftConfig, PitchCap,
    PropulsionConfig, RudderConfig, SafetyConfig, VesselConfig,
};

pub mod vessel_classes;

mod diagnostics;
pub use diagnostics::{DiagnosticLog, Logger, NoopLog, TracingLog};

mod environment;
pub use environment::{Ocean, SeaLevel, StillWater, WaveSampler};

mod state;
pub use state::{ControlTargets, ForceTorque, RigidBodyState, VesselSnapshot};

pub mod subsystems;

pub mod controller;
pub use controller::{SubmarineController, SurfacingStage, TickDebug, TickOutcome};

pub mod host;
