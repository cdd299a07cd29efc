//! Named vessel presets. Every class is the attack boat scaled by mass, so
//! accelerations and turn rates stay comparable while forces and torques
//! grow with the hull.

use crate::{
    BallastConfig, BuoyancyConfig, ConfigError, DivePlaneConfig, DragConfig, HullLiftConfig,
    PropulsionConfig, RudderConfig, SafetyConfig, Vec3f, VesselConfig,
};

pub const CLASS_NAMES: [&str; 3] = ["attack", "ballistic", "coastal"];

const REFERENCE_MASS: f32 = 2.0e6;

/// Fast hunter-killer; the reference hull all gains are tuned on.
pub fn attack_submarine() -> VesselConfig {
    scaled_class("attack", 2.0e6, 12.0, 400.0)
}

/// Large, slow missile boat.
pub fn ballistic_submarine() -> VesselConfig {
    scaled_class("ballistic", 8.0e6, 10.0, 350.0)
}

/// Small diesel-electric boat for littoral water.
pub fn coastal_submarine() -> VesselConfig {
    scaled_class("coastal", 1.0e6, 9.0, 250.0)
}

pub fn by_name(name: &str) -> Result<VesselConfig, ConfigError> {
    match name.trim().to_ascii_lowercase().as_str() {
        "attack" => Ok(attack_submarine()),
        "ballistic" => Ok(ballistic_submarine()),
        "coastal" => Ok(coastal_submarine()),
        _ => Err(ConfigError::UnknownClass(name.to_string())),
    }
}

fn scaled_class(name: &str, mass: f32, max_speed: f32, max_depth: f32) -> VesselConfig {
    let k = mass / REFERENCE_MASS;

    let drag = DragConfig::default();
    let drag = DragConfig {
        base_forward_drag: drag.base_forward_drag * k,
        sideways_drag: drag.sideways_drag * k,
        ..drag
    };

    let propulsion = PropulsionConfig::default();
    let propulsion = PropulsionConfig { max_thrust: propulsion.max_thrust * k, ..propulsion };

    let rudder = RudderConfig::default();
    let rudder = RudderConfig { coef: rudder.coef * k, damping_coef: rudder.damping_coef * k, ..rudder };

    let planes = DivePlaneConfig::default();
    let dive_planes = DivePlaneConfig {
        coef: planes.coef * k,
        torque_limit: planes.torque_limit * k,
        ..planes
    };

    let ballast = BallastConfig::default();
    let ballast = BallastConfig {
        max_force: ballast.max_force * k,
        damping_coef: ballast.damping_coef * k,
        ..ballast
    };

    let b = BuoyancyConfig::default();
    let buoyancy = BuoyancyConfig {
        displaced_volume: mass / b.water_density,
        wave_spring_coef: b.wave_spring_coef * k,
        wave_damping_coef: b.wave_damping_coef * k,
        wave_torque_coef: b.wave_torque_coef * k,
        deep_damping: b.deep_damping * k,
        ..b
    };

    let lift = HullLiftConfig::default();
    let hull_lift = HullLiftConfig { area: lift.area * k, ..lift };

    let s = SafetyConfig::default();
    let safety = SafetyConfig {
        emergency_torque: s.emergency_torque * k,
        emergency_damping: s.emergency_damping * k,
        proactive_gain: s.proactive_gain * k,
        proactive_damping: s.proactive_damping * k,
        level_gain: s.level_gain * k,
        level_damping: s.level_damping * k,
        approach_gain: s.approach_gain * k,
        approach_damping: s.approach_damping * k,
        roll_gain: s.roll_gain * k,
        roll_damping: s.roll_damping * k,
        surface_roll_gain: s.surface_roll_gain * k,
        trim_gain: s.trim_gain * k,
        trim_damping: s.trim_damping * k,
        torque_warning: s.torque_warning * k,
        ..s
    };

    VesselConfig {
        class_name: name.to_string(),
        mass,
        max_speed,
        max_depth,
        inertia: Vec3f::new(8.0e8, 8.0e8, 1.0e8) * k,
        world_boundary: None,
        debug: false,
        drag,
        propulsion,
        rudder,
        dive_planes,
        ballast,
        buoyancy,
        hull_lift,
        safety,
    }
}
