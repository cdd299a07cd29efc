//! Minimal rigid-body integrator standing in for the host physics engine.
//! The controller never calls this; the simulator and multi-tick tests do.

use crate::{Quatf, RigidBodyState, Vec3f};

/// Semi-implicit Euler step: applies gravity plus the accumulated force and
/// torque, advances the pose and clears the accumulators.
///
/// `inertia` is the body-frame principal inertia (x = pitch, y = yaw,
/// z = roll), kg·m².
pub fn integrate(state: &mut RigidBodyState, mass: f32, inertia: Vec3f, gravity: f32, dt: f32) {
    if !(dt.is_finite() && dt > 0.0 && mass > 0.0) {
        state.clear_accumulators();
        return;
    }

    let weight = Vec3f::new(0.0, -mass * gravity, 0.0);
    let accel = (state.force + weight) / mass;
    state.velocity += accel * dt;
    state.position += state.velocity * dt;

    // world torque -> body, divide by principal inertia, back to world
    let q = state.orientation;
    let body_torque = q.inverse() * state.torque;
    let body_alpha = body_torque / inertia.max(Vec3f::splat(1e-6));
    state.angular_velocity += (q * body_alpha) * dt;

    let spin = Quatf::from_scaled_axis(state.angular_velocity * dt);
    state.orientation = (spin * q).normalize();

    state.clear_accumulators();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_fall_without_forces() {
        let mut s = RigidBodyState::default();
        integrate(&mut s, 1000.0, Vec3f::ONE, 10.0, 0.1);
        assert!((s.velocity.y + 1.0).abs() < 1e-5, "v={:?}", s.velocity);
        assert!((s.position.y + 0.1).abs() < 1e-5, "p={:?}", s.position);
    }

    #[test]
    fn torque_about_yaw_spins_about_world_y() {
        let mut s = RigidBodyState::default();
        s.apply_torque(Vec3f::new(0.0, 8.0e8, 0.0));
        integrate(&mut s, 1.0, Vec3f::new(8.0e8, 8.0e8, 1.0e8), 0.0, 0.5);
        assert!((s.angular_velocity.y - 0.5).abs() < 1e-5, "w={:?}", s.angular_velocity);
        assert_eq!(s.torque, Vec3f::ZERO);
        assert!(s.orientation.is_normalized());
    }
}
