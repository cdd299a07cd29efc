use crate::{PropulsionConfig, Vec3f};

/// Proportional thrust along the hull toward a target speed.
#[derive(Debug, Clone)]
pub struct Propulsion {
    cfg: PropulsionConfig,
}

impl Propulsion {
    pub fn new(cfg: PropulsionConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &PropulsionConfig {
        &self.cfg
    }

    /// Cosine between the velocity direction and the hull axis; 1.0 when
    /// (almost) stationary.
    pub fn alignment(velocity: Vec3f, forward: Vec3f) -> f32 {
        if velocity.length_squared() <= 0.01 {
            1.0
        } else {
            velocity.normalize().dot(forward)
        }
    }

    /// Scalar thrust (N) along `forward`; negative is astern.
    pub fn thrust(&self, velocity: Vec3f, forward: Vec3f, target_speed: f32, max_speed: f32) -> f32 {
        let c = &self.cfg;
        let speed_along_axis = velocity.dot(forward);
        let error = target_speed - speed_along_axis;
        let mut force = c.kp * error * c.max_thrust / max_speed.max(1e-3);
        if Self::alignment(velocity, forward) < c.misalignment_cos {
            force *= c.misaligned_factor;
        }
        force.clamp(-c.reverse_fraction * c.max_thrust, c.max_thrust)
    }

    pub fn compute(&self, velocity: Vec3f, forward: Vec3f, target_speed: f32, max_speed: f32) -> Vec3f {
        forward * self.thrust(velocity, forward, target_speed, max_speed)
    }
}
