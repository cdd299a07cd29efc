//! Attitude guards layered over the dive planes. All torques are scalars
//! about a body axis: pitch about `right` (nose up positive), roll about the
//! local +Z axis. Angles in degrees, rates in rad/s.

use crate::SafetyConfig;

/// Strong correction once pitch passes the emergency threshold. `None` while
/// the attitude is inside the envelope.
pub fn emergency_pitch_torque(cfg: &SafetyConfig, pitch: f32, pitch_rate: f32) -> Option<f32> {
    let mag = pitch.abs();
    if mag <= cfg.emergency_pitch {
        return None;
    }
    let severity = 1.0 + (mag - cfg.emergency_pitch) / cfg.emergency_severity_span;
    Some(-pitch.signum() * cfg.emergency_torque * severity - pitch_rate * cfg.emergency_damping)
}

/// Pitch envelope allowed at a given distance from the target depth.
pub fn proactive_pitch_limit(cfg: &SafetyConfig, distance_to_target: f32) -> f32 {
    cfg.envelope_distances
        .iter()
        .position(|&band| distance_to_target >= band)
        .map_or(cfg.envelope_limits[3], |i| cfg.envelope_limits[i])
}

/// Pushes pitch back inside the distance-dependent envelope.
pub fn proactive_pitch_torque(cfg: &SafetyConfig, pitch: f32, pitch_rate: f32, distance_to_target: f32) -> f32 {
    let limit = proactive_pitch_limit(cfg, distance_to_target);
    let excess = pitch.abs() - limit;
    if excess <= 0.0 {
        return 0.0;
    }
    -pitch.signum() * excess * cfg.proactive_gain - pitch_rate * cfg.proactive_damping
}

/// Forces a level attitude near the target depth and close to the surface.
pub fn leveling_torque(cfg: &SafetyConfig, pitch: f32, pitch_rate: f32, distance_to_target: f32, depth: f32) -> f32 {
    if distance_to_target < cfg.level_distance || depth < cfg.level_depth {
        -pitch * cfg.level_gain - pitch_rate * cfg.level_damping
    } else {
        0.0
    }
}

/// Levels the hull while closing on the target depth quickly.
/// `closing_speed` is the vertical speed toward the target (m/s, positive
/// when approaching).
pub fn approach_damping_torque(
    cfg: &SafetyConfig,
    pitch: f32,
    pitch_rate: f32,
    closing_speed: f32,
    distance_to_target: f32,
) -> f32 {
    if closing_speed > cfg.approach_speed && distance_to_target < cfg.approach_distance {
        -pitch * cfg.approach_gain * (closing_speed / cfg.approach_speed) - pitch_rate * cfg.approach_damping
    } else {
        0.0
    }
}

/// Righting moment on roll, boosted during steep or fast vertical
/// manoeuvres and near the surface.
pub fn roll_stabilization_torque(
    cfg: &SafetyConfig,
    roll: f32,
    roll_rate: f32,
    pitch: f32,
    vertical_speed: f32,
    depth: f32,
) -> f32 {
    let aggressive =
        pitch.abs() > cfg.roll_boost_pitch || vertical_speed.abs() > cfg.roll_boost_vertical_speed;
    let boost = if aggressive { cfg.roll_boost } else { 1.0 };
    let mut torque = (-roll * cfg.roll_gain - roll_rate * cfg.roll_damping) * boost;
    if depth < cfg.surface_roll_depth {
        let near_surface = 1.0 - depth.max(0.0) / cfg.surface_roll_depth;
        torque -= roll * cfg.surface_roll_gain * near_surface;
    }
    torque
}

/// Stand-in for trim tanks when the planes have no flow over them.
pub fn low_speed_trim_torque(
    cfg: &SafetyConfig,
    forward_speed: f32,
    pitch: f32,
    desired_pitch: f32,
    pitch_rate: f32,
) -> f32 {
    let s = forward_speed.abs();
    if s >= cfg.trim_speed {
        return 0.0;
    }
    let weight = 1.0 - s / cfg.trim_speed;
    (desired_pitch - pitch) * cfg.trim_gain * weight - pitch_rate * cfg.trim_damping
}
