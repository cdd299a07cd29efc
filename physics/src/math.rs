//! Shared math aliases and the body-frame basis used across the pipeline.

pub type Vec3f = bevy_math::Vec3;
pub type Vec2f = bevy_math::Vec2;
pub type Quatf = bevy_math::Quat;

// Basis: +Y up, body forward is local -Z, body right is local +X
pub(crate) const BODY_FWD: Vec3f = Vec3f::new(0.0, 0.0, -1.0);
pub(crate) const BODY_RIGHT: Vec3f = Vec3f::new(1.0, 0.0, 0.0);
pub(crate) const BODY_UP: Vec3f = Vec3f::new(0.0, 1.0, 0.0);
/// Local +Z; positive roll is a rotation about this axis.
pub(crate) const BODY_BACK: Vec3f = Vec3f::new(0.0, 0.0, 1.0);

#[inline]
pub(crate) fn quat_rotate_vec3(q: Quatf, v: Vec3f) -> Vec3f {
    q * v
}

/// Pitch (nose up positive) and roll, in degrees, from a body orientation.
#[inline]
pub(crate) fn pitch_roll_deg(q: Quatf) -> (f32, f32) {
    let (_yaw, pitch, roll) = q.to_euler(bevy_math::EulerRot::YXZ);
    (pitch.to_degrees(), roll.to_degrees())
}

/// Horizontal right-hand vector for a forward direction, or zero when the
/// forward axis is (near) vertical.
#[inline]
pub(crate) fn horizontal_right(forward: Vec3f) -> Vec3f {
    Vec3f::new(-forward.z, 0.0, forward.x).normalize_or_zero()
}

#[inline]
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
