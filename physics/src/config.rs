use serde::{Deserialize, Serialize};

use crate::{ConfigError, Vec3f};

/// Complete parameter set for one vessel. Loaded once or replaced wholesale
/// when a vessel-class preset is applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VesselConfig {
    pub class_name: String,
    /// kg
    pub mass: f32,
    /// m/s
    pub max_speed: f32,
    /// m below sea level
    pub max_depth: f32,
    /// Body-frame principal inertia (x = pitch, y = yaw, z = roll), kg·m².
    pub inertia: Vec3f,
    /// Legacy square world bound on the horizontal axes; `None` = unbounded.
    pub world_boundary: Option<f32>,
    /// Enables the diagnostic sink.
    pub debug: bool,
    pub drag: DragConfig,
    pub propulsion: PropulsionConfig,
    pub rudder: RudderConfig,
    pub dive_planes: DivePlaneConfig,
    pub ballast: BallastConfig,
    pub buoyancy: BuoyancyConfig,
    pub hull_lift: HullLiftConfig,
    pub safety: SafetyConfig,
}

impl Default for VesselConfig {
    fn default() -> Self {
        crate::vessel_classes::attack_submarine()
    }
}

impl VesselConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("mass", self.mass)?;
        ConfigError::check_positive("max_speed", self.max_speed)?;
        ConfigError::check_positive("max_depth", self.max_depth)?;
        ConfigError::check_positive("inertia.x", self.inertia.x)?;
        ConfigError::check_positive("inertia.y", self.inertia.y)?;
        ConfigError::check_positive("inertia.z", self.inertia.z)?;
        if let Some(b) = self.world_boundary {
            ConfigError::check_positive("world_boundary", b)?;
        }
        self.drag.validate()?;
        self.propulsion.validate()?;
        self.rudder.validate()?;
        self.dive_planes.validate()?;
        self.ballast.validate()?;
        self.buoyancy.validate()?;
        self.hull_lift.validate()?;
        self.safety.validate()
    }
}

// ----- Hydrodynamic drag -----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// N per (m/s)² along the hull axis.
    pub base_forward_drag: f32,
    /// N per (m/s)² perpendicular to the hull axis.
    pub sideways_drag: f32,
    /// Depth at which the surface penalty vanishes.
    pub surface_threshold: f32,
    /// Forward drag multiplier at the surface.
    pub surface_multiplier: f32,
    pub min_speed_sq: f32,
    /// Cap on the summed appendage multipliers.
    pub max_appendage_total: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            base_forward_drag: 1.0e4,
            sideways_drag: 4.0e6,
            surface_threshold: 5.0,
            surface_multiplier: 1.5,
            min_speed_sq: 1e-4,
            max_appendage_total: 2.0,
        }
    }
}

impl DragConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("drag.base_forward_drag", self.base_forward_drag)?;
        ConfigError::check_positive("drag.surface_threshold", self.surface_threshold)?;
        ConfigError::check_positive("drag.surface_multiplier", self.surface_multiplier)?;
        ConfigError::check_positive("drag.max_appendage_total", self.max_appendage_total)?;
        if !(self.sideways_drag >= 400.0 * self.base_forward_drag) {
            return Err(ConfigError::SidewaysDragTooLow {
                sideways: self.sideways_drag,
                forward: self.base_forward_drag,
            });
        }
        Ok(())
    }
}

// ----- Propulsion -----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PropulsionConfig {
    /// N
    pub max_thrust: f32,
    pub kp: f32,
    /// Velocity/heading alignment below which thrust is penalized (cos 30°).
    pub misalignment_cos: f32,
    pub misaligned_factor: f32,
    /// Astern thrust limit as a fraction of `max_thrust`.
    pub reverse_fraction: f32,
}

impl Default for PropulsionConfig {
    fn default() -> Self {
        Self {
            max_thrust: 2.0e6,
            kp: 3.0,
            misalignment_cos: 0.866,
            misaligned_factor: 0.5,
            reverse_fraction: 0.5,
        }
    }
}

impl PropulsionConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("propulsion.max_thrust", self.max_thrust)?;
        ConfigError::check_positive("propulsion.kp", self.kp)
    }
}

// ----- Rudder -----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RudderConfig {
    /// N·m per (m/s · degree of rudder).
    pub coef: f32,
    /// N·m per rad/s of yaw rate.
    pub damping_coef: f32,
    /// degrees
    pub max_angle: f32,
    /// deg/s
    pub max_turn_rate: f32,
    pub low_speed_threshold: f32,
    pub low_speed_effectiveness: f32,
    /// Forward speed above which rudder authority stops growing.
    pub speed_cap: f32,
    /// Heading error band (degrees) inside which torque is scaled down.
    pub fine_band: f32,
}

impl Default for RudderConfig {
    fn default() -> Self {
        Self {
            coef: 4.0e4,
            damping_coef: 1.0e8,
            max_angle: 30.0,
            max_turn_rate: 3.0,
            low_speed_threshold: 0.5,
            low_speed_effectiveness: 0.2,
            speed_cap: 8.0,
            fine_band: 5.0,
        }
    }
}

impl RudderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("rudder.coef", self.coef)?;
        ConfigError::check_positive("rudder.max_angle", self.max_angle)?;
        ConfigError::check_positive("rudder.max_turn_rate", self.max_turn_rate)?;
        ConfigError::check_positive("rudder.fine_band", self.fine_band)
    }
}

// ----- Dive planes -----

/// Pitch cap applied while surfacing once shallower than `below_depth`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PitchCap {
    pub below_depth: f32,
    pub max_pitch: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DivePlaneConfig {
    /// N·m per (degree · (m/s)²).
    pub coef: f32,
    /// degrees
    pub max_plane_angle: f32,
    pub bow_fraction: f32,
    pub stern_fraction: f32,
    /// N·m
    pub torque_limit: f32,
    /// Seconds of vertical motion projected when checking for depth overshoot.
    pub depth_prediction_s: f32,
    /// Seconds of pitch rate projected when checking for pitch overshoot.
    pub pitch_prediction_s: f32,
    pub overshoot_min_distance: f32,
    /// Distance bands (m) selecting the base target pitch.
    pub level_band: f32,
    pub ramp_band: f32,
    pub cruise_band: f32,
    /// Target pitch (degrees) at the top of the ramp and in the cruise band.
    pub cruise_pitch: f32,
    pub deep_pitch: f32,
    pub overshoot_counter_gain: f32,
    pub overshoot_counter_max: f32,
    /// |pitch| at which plane authority starts fading, and where it reaches 0.
    pub rolloff_start: f32,
    pub rolloff_end: f32,
    /// Authority left when the command would deepen an already steep pitch.
    pub saturation_authority: f32,
    pub min_error_retention: f32,
    /// Degrees of plane per deg/s of pitch rate.
    pub rate_damping: f32,
    /// Speeds bounding the effectiveness curve.
    pub low_speed: f32,
    pub full_speed: f32,
    /// Targets shallower than this trigger staged surfacing.
    pub surfacing_target_depth: f32,
    pub surfacing_waypoints: Vec<f32>,
    pub waypoint_margin: f32,
    pub surfacing_caps: Vec<PitchCap>,
}

impl Default for DivePlaneConfig {
    fn default() -> Self {
        Self {
            coef: 8.0e3,
            max_plane_angle: 15.0,
            bow_fraction: 0.4,
            stern_fraction: 0.6,
            torque_limit: 1.0e7,
            depth_prediction_s: 3.0,
            pitch_prediction_s: 2.0,
            overshoot_min_distance: 2.0,
            level_band: 5.0,
            ramp_band: 20.0,
            cruise_band: 50.0,
            cruise_pitch: 8.0,
            deep_pitch: 10.0,
            overshoot_counter_gain: 0.5,
            overshoot_counter_max: 5.0,
            rolloff_start: 15.0,
            rolloff_end: 25.0,
            saturation_authority: 0.1,
            min_error_retention: 0.3,
            rate_damping: 2.0,
            low_speed: 1.0,
            full_speed: 5.0,
            surfacing_target_depth: 5.0,
            surfacing_waypoints: vec![50.0, 25.0, 0.0],
            waypoint_margin: 5.0,
            surfacing_caps: vec![
                PitchCap { below_depth: 15.0, max_pitch: 3.0 },
                PitchCap { below_depth: 30.0, max_pitch: 5.0 },
                PitchCap { below_depth: 50.0, max_pitch: 8.0 },
            ],
        }
    }
}

impl DivePlaneConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("dive_planes.coef", self.coef)?;
        ConfigError::check_positive("dive_planes.max_plane_angle", self.max_plane_angle)?;
        ConfigError::check_positive("dive_planes.torque_limit", self.torque_limit)?;
        if (self.bow_fraction + self.stern_fraction - 1.0).abs() > 1e-4
            || self.bow_fraction < 0.0
            || self.stern_fraction < 0.0
        {
            return Err(ConfigError::PlaneSplit {
                bow: self.bow_fraction,
                stern: self.stern_fraction,
            });
        }
        ConfigError::check_range("dive_planes.level_band", self.level_band, self.ramp_band)?;
        ConfigError::check_range("dive_planes.ramp_band", self.ramp_band, self.cruise_band)?;
        ConfigError::check_range("dive_planes.rolloff", self.rolloff_start, self.rolloff_end)?;
        ConfigError::check_range("dive_planes.speed", self.low_speed, self.full_speed)?;
        ConfigError::check_positive("dive_planes.low_speed", self.low_speed)
    }
}

// ----- Ballast -----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BallastConfig {
    /// N
    pub max_force: f32,
    pub kp: f32,
    pub ki: f32,
    pub kd: f32,
    /// Desired depth rate (m/s) per metre of depth error.
    pub depth_rate_gain: f32,
    pub max_rate: f32,
    /// N per m/s of depth rate.
    pub damping_coef: f32,
    pub dead_zone: f32,
    /// Weight of the previous tick's output in the exponential smoother.
    pub smoothing: f32,
    /// PID output that maps to full `max_force`.
    pub output_scale: f32,
}

impl Default for BallastConfig {
    fn default() -> Self {
        Self {
            max_force: 6.0e6,
            kp: 0.1,
            ki: 2.0e-4,
            kd: 1.0,
            depth_rate_gain: 0.1,
            max_rate: 2.0,
            damping_coef: 2.0e5,
            dead_zone: 0.5,
            smoothing: 0.1,
            output_scale: 30.0,
        }
    }
}

impl BallastConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("ballast.max_force", self.max_force)?;
        ConfigError::check_positive("ballast.max_rate", self.max_rate)?;
        ConfigError::check_positive("ballast.output_scale", self.output_scale)?;
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(ConfigError::InvertedRange {
                field: "ballast.smoothing",
                low: self.smoothing,
                high: 1.0,
            });
        }
        Ok(())
    }
}

// ----- Buoyancy -----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuoyancyConfig {
    /// kg/m³
    pub water_density: f32,
    /// m³
    pub displaced_volume: f32,
    pub gravity: f32,
    /// Hull height used for the submersion ratio (m).
    pub hull_height: f32,
    pub buoyancy_coef: f32,
    pub surfacing_boost: f32,
    pub surfacing_target_depth: f32,
    pub surfacing_hull_depth: f32,
    pub upward_damp_speed: f32,
    /// N per metre of hull depth.
    pub wave_spring_coef: f32,
    /// N per m/s of vertical velocity.
    pub wave_damping_coef: f32,
    /// N·m per m/s before the 0.01 torque factor.
    pub wave_torque_coef: f32,
    pub wave_torque_factor: f32,
    pub influence_full_depth: f32,
    pub influence_zero_depth: f32,
    pub deep_threshold: f32,
    pub deep_damping: f32,
}

impl Default for BuoyancyConfig {
    fn default() -> Self {
        Self {
            water_density: 1025.0,
            displaced_volume: 2.0e6 / 1025.0,
            gravity: 9.81,
            hull_height: 8.0,
            buoyancy_coef: 1.0,
            surfacing_boost: 1.3,
            surfacing_target_depth: 2.0,
            surfacing_hull_depth: 4.0,
            upward_damp_speed: 0.5,
            wave_spring_coef: 4.0e5,
            wave_damping_coef: 1.0e6,
            wave_torque_coef: 1.0e7,
            wave_torque_factor: 0.01,
            influence_full_depth: 2.0,
            influence_zero_depth: 10.0,
            deep_threshold: 10.0,
            deep_damping: 5000.0,
        }
    }
}

impl BuoyancyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("buoyancy.water_density", self.water_density)?;
        ConfigError::check_positive("buoyancy.displaced_volume", self.displaced_volume)?;
        ConfigError::check_positive("buoyancy.hull_height", self.hull_height)?;
        ConfigError::check_range(
            "buoyancy.influence",
            self.influence_full_depth,
            self.influence_zero_depth,
        )
    }
}

// ----- Hull lift -----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HullLiftConfig {
    pub min_speed: f32,
    pub water_density: f32,
    /// Planform area, m².
    pub area: f32,
    pub lift_coefficient: f32,
}

impl Default for HullLiftConfig {
    fn default() -> Self {
        Self { min_speed: 1.0, water_density: 1000.0, area: 800.0, lift_coefficient: 0.1 }
    }
}

impl HullLiftConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("hull_lift.min_speed", self.min_speed)?;
        ConfigError::check_positive("hull_lift.water_density", self.water_density)
    }
}

// ----- Orchestrator safety layers and post-processing -----

/// Thresholds and gains the orchestrator layers on top of the subsystems.
/// Angles in degrees, torque gains in N·m per degree, damping in N·m per rad/s.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Pitch limit handed to the dive planes.
    pub max_dive_pitch: f32,
    pub emergency_pitch: f32,
    pub emergency_torque: f32,
    pub emergency_damping: f32,
    /// Degrees past `emergency_pitch` that add one unit of severity.
    pub emergency_severity_span: f32,
    /// Distance bands (m, descending) selecting the proactive pitch envelope.
    pub envelope_distances: [f32; 3],
    /// Envelope (degrees) at or beyond each band, then inside the last one.
    pub envelope_limits: [f32; 4],
    pub proactive_gain: f32,
    pub proactive_damping: f32,
    pub level_distance: f32,
    pub level_depth: f32,
    pub level_gain: f32,
    pub level_damping: f32,
    pub approach_speed: f32,
    pub approach_distance: f32,
    pub approach_gain: f32,
    pub approach_damping: f32,
    pub roll_gain: f32,
    pub roll_damping: f32,
    pub roll_boost: f32,
    pub roll_boost_pitch: f32,
    pub roll_boost_vertical_speed: f32,
    pub surface_roll_depth: f32,
    pub surface_roll_gain: f32,
    pub trim_speed: f32,
    pub trim_gain: f32,
    pub trim_damping: f32,
    pub waterline_depth: f32,
    pub waterline_lerp: f32,
    pub waterline_vertical_damping: f32,
    pub surfacing_depth: f32,
    pub periscope_depth: f32,
    pub float_depth: f32,
    /// A stage hands over once the vessel is within this of its stage depth.
    pub stage_margin: f32,
    pub surfacing_ballast_scale: f32,
    pub sideways_threshold: f32,
    pub sideways_retain: f32,
    pub align_min_speed: f32,
    pub align_max_speed_factor: f32,
    pub align_skip_alignment: f32,
    pub align_rate: f32,
    /// Torques above this are reported through the diagnostic sink.
    pub torque_warning: f32,
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            max_dive_pitch: 12.0,
            emergency_pitch: 20.0,
            emergency_torque: 2.0e7,
            emergency_damping: 5.0e8,
            emergency_severity_span: 10.0,
            envelope_distances: [50.0, 20.0, 5.0],
            envelope_limits: [15.0, 12.0, 8.0, 4.0],
            proactive_gain: 1.0e6,
            proactive_damping: 2.0e8,
            level_distance: 5.0,
            level_depth: 3.0,
            level_gain: 5.0e5,
            level_damping: 3.0e8,
            approach_speed: 1.0,
            approach_distance: 20.0,
            approach_gain: 3.0e5,
            approach_damping: 2.0e8,
            roll_gain: 2.0e5,
            roll_damping: 5.0e7,
            roll_boost: 2.0,
            roll_boost_pitch: 10.0,
            roll_boost_vertical_speed: 2.0,
            surface_roll_depth: 10.0,
            surface_roll_gain: 4.0e5,
            trim_speed: 2.0,
            trim_gain: 3.0e5,
            trim_damping: 2.0e8,
            waterline_depth: 0.5,
            waterline_lerp: 0.1,
            waterline_vertical_damping: 0.8,
            surfacing_depth: 20.0,
            periscope_depth: 12.0,
            float_depth: 2.5,
            stage_margin: 1.0,
            surfacing_ballast_scale: 0.3,
            sideways_threshold: 0.5,
            sideways_retain: 0.2,
            align_min_speed: 1.0,
            align_max_speed_factor: 1.05,
            align_skip_alignment: 0.7,
            align_rate: 0.1,
            torque_warning: 1.5e7,
        }
    }
}

impl SafetyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigError::check_positive("safety.max_dive_pitch", self.max_dive_pitch)?;
        ConfigError::check_range("safety.pitch", self.max_dive_pitch, self.emergency_pitch)?;
        ConfigError::check_positive("safety.emergency_severity_span", self.emergency_severity_span)?;
        for pair in self.envelope_distances.windows(2) {
            ConfigError::check_range("safety.envelope_distances", pair[1], pair[0])?;
        }
        ConfigError::check_range("safety.surfacing", self.float_depth, self.periscope_depth)?;
        ConfigError::check_range("safety.periscope", self.periscope_depth, self.surfacing_depth)?;
        ConfigError::check_positive("safety.stage_margin", self.stage_margin)?;
        ConfigError::check_positive("safety.trim_speed", self.trim_speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        VesselConfig::default().validate().expect("default vessel must validate");
    }

    #[test]
    fn low_sideways_drag_is_rejected() {
        let cfg = DragConfig { sideways_drag: 399.0 * 1.0e4, ..DragConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::SidewaysDragTooLow { .. })));
    }

    #[test]
    fn plane_split_must_sum_to_one() {
        let cfg = DivePlaneConfig { bow_fraction: 0.5, ..DivePlaneConfig::default() };
        assert!(matches!(cfg.validate(), Err(ConfigError::PlaneSplit { .. })));
    }
}
