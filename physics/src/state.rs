use serde::{Deserialize, Serialize};

use crate::math::{quat_rotate_vec3, BODY_FWD, BODY_RIGHT, BODY_UP};
use crate::{Quatf, Vec3f};

/// Rigid-body state owned by the host integrator.
///
/// Frame conventions:
/// - World axes: +Y up, North is −Z, East is +X.
/// - Body axes: −Z forward, +Y up, +X right (starboard).
/// - `angular_velocity` is world-frame, rad/s.
///
/// The pipeline appends into `force`/`torque`; the host applies and clears them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RigidBodyState {
    pub position: Vec3f,
    pub velocity: Vec3f,
    pub angular_velocity: Vec3f,
    /// Body→world rotation.
    pub orientation: Quatf,
    /// Accumulated world force for this tick (N).
    #[serde(default)]
    pub force: Vec3f,
    /// Accumulated world torque for this tick (N·m).
    #[serde(default)]
    pub torque: Vec3f,
}

impl Default for RigidBodyState {
    fn default() -> Self {
        Self {
            position: Vec3f::ZERO,
            velocity: Vec3f::ZERO,
            angular_velocity: Vec3f::ZERO,
            orientation: Quatf::IDENTITY,
            force: Vec3f::ZERO,
            torque: Vec3f::ZERO,
        }
    }
}

impl RigidBodyState {
    pub fn at(position: Vec3f, orientation: Quatf) -> Self {
        Self { position, orientation, ..Self::default() }
    }

    pub fn apply_force(&mut self, force: Vec3f) {
        self.force += force;
    }

    pub fn apply_torque(&mut self, torque: Vec3f) {
        self.torque += torque;
    }

    pub fn apply(&mut self, ft: ForceTorque) {
        self.force += ft.force;
        self.torque += ft.torque;
    }

    pub fn clear_accumulators(&mut self) {
        self.force = Vec3f::ZERO;
        self.torque = Vec3f::ZERO;
    }

    pub fn forward(&self) -> Vec3f {
        quat_rotate_vec3(self.orientation, BODY_FWD)
    }

    pub fn right(&self) -> Vec3f {
        quat_rotate_vec3(self.orientation, BODY_RIGHT)
    }

    pub fn up(&self) -> Vec3f {
        quat_rotate_vec3(self.orientation, BODY_UP)
    }
}

/// Operator targets from the command layer. Read-only to the pipeline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlTargets {
    /// m/s along the hull axis
    pub speed: f32,
    /// degrees, 0 = North
    pub heading: f32,
    /// metres below sea level
    pub depth: f32,
}

/// A force and torque pair in world space.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForceTorque {
    pub force: Vec3f,
    pub torque: Vec3f,
}

impl ForceTorque {
    pub const ZERO: Self = Self { force: Vec3f::ZERO, torque: Vec3f::ZERO };

    pub fn force(force: Vec3f) -> Self {
        Self { force, torque: Vec3f::ZERO }
    }

    pub fn torque(torque: Vec3f) -> Self {
        Self { force: Vec3f::ZERO, torque }
    }

    pub fn is_finite(&self) -> bool {
        self.force.is_finite() && self.torque.is_finite()
    }
}

/// What views, sonar and UI read back each frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VesselSnapshot {
    pub position: Vec3f,
    pub velocity: Vec3f,
    /// metres below sea level, never negative
    pub depth: f32,
    /// degrees in [0, 360)
    pub heading: f32,
    /// m/s, magnitude of velocity
    pub speed: f32,
}
