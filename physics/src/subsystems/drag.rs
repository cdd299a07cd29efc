use super::AppendageRegistry;
use crate::{ConfigError, DragConfig, ForceTorque, Vec3f};

/// Velocity-squared hull drag, split into forward and sideways parts.
#[derive(Debug, Clone)]
pub struct HydroDrag {
    cfg: DragConfig,
}

impl HydroDrag {
    pub fn new(cfg: DragConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    pub fn config(&self) -> &DragConfig {
        &self.cfg
    }

    /// 1.0 at or below `surface_threshold`, `surface_multiplier` at the
    /// surface, linear in between.
    pub fn surface_factor(&self, depth: f32) -> f32 {
        let c = &self.cfg;
        if depth >= c.surface_threshold {
            1.0
        } else if depth <= 0.0 {
            c.surface_multiplier
        } else {
            let t = depth / c.surface_threshold;
            c.surface_multiplier + (1.0 - c.surface_multiplier) * t
        }
    }

    pub fn compute(
        &self,
        velocity: Vec3f,
        forward: Vec3f,
        depth: f32,
        appendages: &AppendageRegistry,
    ) -> ForceTorque {
        let c = &self.cfg;
        if velocity.length_squared() < c.min_speed_sq {
            return ForceTorque::ZERO;
        }
        let v_fwd = velocity.dot(forward);
        let v_side = velocity - forward * v_fwd;

        let fwd_mag = c.base_forward_drag
            * (1.0 + appendages.total())
            * self.surface_factor(depth)
            * v_fwd
            * v_fwd;
        let forward_drag = -forward * v_fwd.signum() * fwd_mag;

        let side_speed_sq = v_side.length_squared();
        let sideways_drag = if side_speed_sq > 0.0 {
            -v_side.normalize() * c.sideways_drag * side_speed_sq
        } else {
            Vec3f::ZERO
        };

        ForceTorque::force(forward_drag + sideways_drag)
    }
}
