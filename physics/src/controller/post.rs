//! Direct velocity corrections run after all forces are applied.

use crate::math::horizontal_right;
use crate::{SafetyConfig, Vec3f};

/// Removes most of the horizontal sideslip once it exceeds the threshold,
/// keeping the forward and vertical components. Returns the corrected
/// velocity and the sideways speed before correction.
pub fn eliminate_sideways_velocity(cfg: &SafetyConfig, velocity: Vec3f, forward: Vec3f) -> (Vec3f, f32) {
    let right = horizontal_right(forward);
    if right == Vec3f::ZERO {
        return (velocity, 0.0);
    }
    let sideways = velocity.dot(right);
    if sideways.abs() <= cfg.sideways_threshold {
        return (velocity, sideways);
    }
    (velocity - right * (sideways * (1.0 - cfg.sideways_retain)), sideways)
}

/// Nudges horizontal velocity toward the hull axis at constant speed. Left
/// alone when slow, overspeeding or already mostly aligned. Motion astern is
/// aligned with the reversed axis.
pub fn align_velocity_to_heading(cfg: &SafetyConfig, velocity: Vec3f, forward: Vec3f, max_speed: f32) -> Vec3f {
    let horizontal = Vec3f::new(velocity.x, 0.0, velocity.z);
    let speed = horizontal.length();
    if speed < cfg.align_min_speed || speed > cfg.align_max_speed_factor * max_speed {
        return velocity;
    }
    let axis = Vec3f::new(forward.x, 0.0, forward.z).normalize_or_zero();
    if axis == Vec3f::ZERO {
        return velocity;
    }
    let along = (horizontal / speed).dot(axis);
    if along.abs() > cfg.align_skip_alignment {
        return velocity;
    }
    let sense = if along < 0.0 { -1.0 } else { 1.0 };
    let aligned = horizontal.lerp(axis * (speed * sense), cfg.align_rate);
    Vec3f::new(aligned.x, velocity.y, aligned.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NORTH: Vec3f = Vec3f::new(0.0, 0.0, -1.0);

    #[test]
    fn sideslip_cut_to_twenty_percent() {
        let cfg = SafetyConfig::default();
        // 5 m/s ahead, 4 m/s to starboard, slight climb
        let v = Vec3f::new(4.0, 0.3, -5.0);
        let (out, before) = eliminate_sideways_velocity(&cfg, v, NORTH);
        assert_eq!(before, 4.0);
        assert!((out.x - 0.8).abs() < 1e-5, "out={out:?}");
        assert_eq!(out.z, -5.0);
        assert_eq!(out.y, 0.3);
    }

    #[test]
    fn small_sideslip_is_left_alone() {
        let cfg = SafetyConfig::default();
        let v = Vec3f::new(0.4, 0.0, -5.0);
        assert_eq!(eliminate_sideways_velocity(&cfg, v, NORTH).0, v);
    }

    #[test]
    fn alignment_skips_aligned_slow_and_fast() {
        let cfg = SafetyConfig::default();
        let aligned = Vec3f::new(1.0, 0.0, -5.0);
        assert_eq!(align_velocity_to_heading(&cfg, aligned, NORTH, 12.0), aligned);
        let slow = Vec3f::new(0.5, 0.0, 0.0);
        assert_eq!(align_velocity_to_heading(&cfg, slow, NORTH, 12.0), slow);
        let fast = Vec3f::new(13.0, 0.0, 0.0);
        assert_eq!(align_velocity_to_heading(&cfg, fast, NORTH, 12.0), fast);
    }

    #[test]
    fn alignment_turns_velocity_toward_the_bow() {
        let cfg = SafetyConfig::default();
        let v = Vec3f::new(4.0, -1.0, -2.0);
        let out = align_velocity_to_heading(&cfg, v, NORTH, 12.0);
        let before = Vec3f::new(v.x, 0.0, v.z).normalize().dot(NORTH);
        let after = Vec3f::new(out.x, 0.0, out.z).normalize().dot(NORTH);
        assert!(after > before, "before={before} after={after}");
        assert_eq!(out.y, -1.0);
    }
}
