//! Per-tick orchestration: validates the body state, runs every subsystem in
//! order, layers the attitude guards on top and applies the direct velocity
//! corrections.

pub mod post;
pub mod safety;

use std::sync::Arc;

use crate::diagnostics::Throttle;
use crate::heading::heading_from_forward;
use crate::math::{lerp, pitch_roll_deg, quat_rotate_vec3, BODY_BACK};
use crate::subsystems::{
    AppendageRegistry, Ballast, Buoyancy, BuoyancyInputs, DivePlanes, HullLift, HydroDrag,
    PlaneCommand, PlaneInputs, Propulsion, Rudder, StateValidator,
};
use crate::{
    ConfigError, ControlTargets, DiagnosticLog, ForceTorque, Logger, Ocean, RigidBodyState,
    SafetyConfig, TracingLog, Vec3f, VesselConfig, VesselSnapshot,
};

const WARNING_COOLDOWN_S: f32 = 5.0;

/// Depth band the ascent is in. Re-derived every tick from the current depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SurfacingStage {
    #[default]
    Dive,
    ApproachPeriscope,
    NaturalFloat,
    SurfaceLevel,
}

impl SurfacingStage {
    pub fn is_surfacing(self) -> bool {
        self != SurfacingStage::Dive
    }
}

/// Stage and effective target depth for an ascent. Targets and depths at or
/// below `surfacing_depth` pass through unchanged.
pub fn surfacing_plan(cfg: &SafetyConfig, target_depth: f32, depth: f32) -> (SurfacingStage, f32) {
    if target_depth >= cfg.surfacing_depth || depth >= cfg.surfacing_depth {
        return (SurfacingStage::Dive, target_depth);
    }
    if depth > cfg.periscope_depth + cfg.stage_margin {
        (SurfacingStage::ApproachPeriscope, target_depth.max(cfg.periscope_depth))
    } else if depth > cfg.float_depth + cfg.stage_margin {
        (SurfacingStage::NaturalFloat, target_depth.max(cfg.float_depth))
    } else {
        (SurfacingStage::SurfaceLevel, target_depth)
    }
}

/// Result of one [`SubmarineController::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Full pass ran.
    Applied,
    /// Corrupt state was repaired; nothing else ran this tick.
    Repaired,
    /// Non-finite or non-positive `dt`; state untouched.
    Skipped,
}

/// Everything one tick computed, for telemetry and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickDebug {
    pub tick_id: u64,
    pub dt: f32,
    pub depth: f32,
    pub heading: f32,
    pub forward_speed: f32,
    /// degrees
    pub pitch: f32,
    pub roll: f32,
    pub stage: SurfacingStage,
    pub effective_target_depth: f32,
    pub waterline_snap: bool,
    pub buoyancy: ForceTorque,
    pub drag: ForceTorque,
    pub thrust: Vec3f,
    pub rudder_torque: f32,
    pub planes: PlaneCommand,
    pub emergency: bool,
    /// Sum of the pitch guards (N·m about the right axis), planes excluded.
    pub safety_pitch_torque: f32,
    pub roll_torque: f32,
    pub trim_torque: f32,
    pub hull_lift: Vec3f,
    /// Depth-frame ballast force after surfacing scaling.
    pub ballast_force: f32,
    /// Rate of change of the ballast controller's depth error, m/s.
    pub ballast_derivative: f32,
    pub sideways_speed: f32,
    pub velocity_clamped: bool,
    /// Terms dropped because they came out non-finite.
    pub rejected_terms: u32,
}

/// Owns one instance of every subsystem and all per-vessel controller state.
#[derive(Debug)]
pub struct SubmarineController {
    cfg: VesselConfig,
    logger: Logger,
    validator: StateValidator,
    appendages: AppendageRegistry,
    drag: HydroDrag,
    propulsion: Propulsion,
    rudder: Rudder,
    planes: DivePlanes,
    ballast: Ballast,
    buoyancy: Buoyancy,
    hull_lift: HullLift,
    forward_cache: Option<(u64, Vec3f)>,
    warnings: Throttle,
    clock: f32,
}

impl SubmarineController {
    /// Builds a controller logging through `tracing` while `cfg.debug` is set.
    pub fn new(cfg: VesselConfig) -> Result<Self, ConfigError> {
        let logger = Logger::new(Arc::new(TracingLog), cfg.debug);
        Self::with_logger(cfg, logger)
    }

    pub fn with_logger(cfg: VesselConfig, logger: Logger) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            validator: StateValidator::new(logger.clone()),
            appendages: AppendageRegistry::new(cfg.drag.max_appendage_total),
            drag: HydroDrag::new(cfg.drag.clone())?,
            propulsion: Propulsion::new(cfg.propulsion.clone()),
            rudder: Rudder::new(cfg.rudder.clone()),
            planes: DivePlanes::new(cfg.dive_planes.clone(), logger.clone()),
            ballast: Ballast::new(cfg.ballast.clone()),
            buoyancy: Buoyancy::new(cfg.buoyancy.clone()),
            hull_lift: HullLift::new(cfg.hull_lift.clone()),
            forward_cache: None,
            warnings: Throttle::new(WARNING_COOLDOWN_S),
            clock: 0.0,
            logger,
            cfg,
        })
    }

    pub fn config(&self) -> &VesselConfig {
        &self.cfg
    }

    /// Replaces the whole parameter set. Appendages survive; PID state does not.
    pub fn apply_preset(&mut self, cfg: VesselConfig) -> Result<(), ConfigError> {
        cfg.validate()?;
        self.drag = HydroDrag::new(cfg.drag.clone())?;
        self.propulsion = Propulsion::new(cfg.propulsion.clone());
        self.rudder = Rudder::new(cfg.rudder.clone());
        self.planes = DivePlanes::new(cfg.dive_planes.clone(), self.logger.clone());
        self.ballast = Ballast::new(cfg.ballast.clone());
        self.buoyancy = Buoyancy::new(cfg.buoyancy.clone());
        self.hull_lift = HullLift::new(cfg.hull_lift.clone());
        self.appendages.set_max_total(cfg.drag.max_appendage_total);
        self.forward_cache = None;
        self.logger.log_with(|| format!("applied vessel class `{}`", cfg.class_name));
        self.set_debug(cfg.debug);
        self.cfg = cfg;
        Ok(())
    }

    pub fn reset_pid_state(&mut self) {
        self.ballast.reset_pid_state();
    }

    pub fn appendages(&self) -> &AppendageRegistry {
        &self.appendages
    }

    pub fn appendages_mut(&mut self) -> &mut AppendageRegistry {
        &mut self.appendages
    }

    pub fn ballast(&self) -> &Ballast {
        &self.ballast
    }

    pub fn set_debug(&mut self, enabled: bool) {
        self.cfg.debug = enabled;
        self.logger.set_enabled(enabled);
        self.propagate_logger();
    }

    pub fn set_logger(&mut self, sink: Arc<dyn DiagnosticLog>) {
        self.logger = Logger::new(sink, self.cfg.debug);
        self.propagate_logger();
    }

    fn propagate_logger(&mut self) {
        self.validator.set_logger(self.logger.clone());
        self.planes.set_logger(self.logger.clone());
    }

    /// What views and sonar read back.
    pub fn snapshot(&self, state: &RigidBodyState, ocean: &Ocean) -> VesselSnapshot {
        VesselSnapshot {
            position: state.position,
            velocity: state.velocity,
            depth: (ocean.sea_level_meters() - state.position.y).max(0.0),
            heading: heading_from_forward(state.forward()),
            speed: state.velocity.length(),
        }
    }

    pub fn step(
        &mut self,
        state: &mut RigidBodyState,
        targets: &ControlTargets,
        ocean: &Ocean,
        dt: f32,
        tick_id: u64,
    ) -> TickOutcome {
        self.step_dbg(state, targets, ocean, dt, tick_id, None)
    }

    /// Same as [`step`](Self::step), optionally filling `dbg` with every
    /// intermediate term.
    pub fn step_dbg(
        &mut self,
        state: &mut RigidBodyState,
        targets: &ControlTargets,
        ocean: &Ocean,
        dt: f32,
        tick_id: u64,
        mut dbg: Option<&mut TickDebug>,
    ) -> TickOutcome {
        if !(dt.is_finite() && dt > 0.0) {
            return TickOutcome::Skipped;
        }
        self.clock += dt;
        self.validator.advance_clock(dt);

        // a. validate
        if self.validator.validate_and_repair(state) {
            self.forward_cache = None;
            return TickOutcome::Repaired;
        }

        let mut out = TickDebug { tick_id, dt, ..TickDebug::default() };
        let s = self.cfg.safety.clone();

        // b. body axes, forward cached per tick
        let forward = match self.forward_cache {
            Some((id, f)) if id == tick_id => f,
            _ => {
                let f = state.forward();
                self.forward_cache = Some((tick_id, f));
                f
            }
        };
        let right = state.right();
        let up = state.up();
        let roll_axis = quat_rotate_vec3(state.orientation, BODY_BACK);

        // c. depth from the mean sea level
        let sea_level = ocean.sea_level_meters();
        let mut depth = (sea_level - state.position.y).max(0.0);

        // d. hold the waterline once surfaced
        if depth <= s.waterline_depth && targets.depth < s.float_depth {
            state.position.y = lerp(state.position.y, sea_level, s.waterline_lerp);
            state.velocity.y *= s.waterline_vertical_damping;
            depth = (sea_level - state.position.y).max(0.0);
            out.waterline_snap = true;
        }

        // e. surfacing stage
        let (stage, effective_target) = surfacing_plan(&s, targets.depth, depth);

        let velocity = state.velocity;
        let depth_rate = -velocity.y;
        let forward_speed = velocity.dot(forward);
        let (pitch, roll) = pitch_roll_deg(state.orientation);
        let pitch_rate = state.angular_velocity.dot(right);
        let roll_rate = state.angular_velocity.dot(roll_axis);
        let heading = heading_from_forward(forward);

        // f. subsystems
        let buoyancy = self.buoyancy.compute(
            BuoyancyInputs {
                position: state.position,
                velocity,
                forward,
                right,
                target_depth: targets.depth,
            },
            ocean,
        );
        self.apply_checked(state, buoyancy, "buoyancy", &mut out);

        let drag = self.drag.compute(velocity, forward, depth, &self.appendages);
        self.apply_checked(state, drag, "drag", &mut out);

        let thrust = self.propulsion.compute(velocity, forward, targets.speed, self.cfg.max_speed);
        self.apply_checked(state, ForceTorque::force(thrust), "propulsion", &mut out);

        let rudder_torque =
            self.rudder.compute(heading, targets.heading, forward_speed, state.angular_velocity.y);
        self.apply_checked(state, ForceTorque::torque(Vec3f::Y * rudder_torque), "rudder", &mut out);

        let planes = self.planes.compute(PlaneInputs {
            current_depth: depth,
            target_depth: effective_target,
            depth_rate,
            pitch,
            pitch_rate: pitch_rate.to_degrees(),
            forward_speed,
            max_pitch_limit: s.max_dive_pitch,
        });
        self.apply_checked(state, ForceTorque::torque(right * planes.torque), "dive planes", &mut out);

        // g. pitch guards
        let distance = planes.distance_to_target;
        let closing_speed = depth_rate * (planes.effective_target - depth).signum();
        let emergency = safety::emergency_pitch_torque(&s, pitch, pitch_rate);
        let safety_pitch = match emergency {
            Some(t) => {
                self.logger.log_with(|| format!("emergency pitch correction at {pitch:.1}°"));
                t
            }
            None => {
                safety::proactive_pitch_torque(&s, pitch, pitch_rate, distance)
                    + safety::leveling_torque(&s, pitch, pitch_rate, distance, depth)
                    + safety::approach_damping_torque(&s, pitch, pitch_rate, closing_speed, distance)
            }
        };
        self.apply_checked(state, ForceTorque::torque(right * safety_pitch), "pitch safety", &mut out);
        self.warn_excess("pitch_torque", planes.torque + safety_pitch, s.torque_warning);

        // h. roll
        let roll_torque = safety::roll_stabilization_torque(&s, roll, roll_rate, pitch, velocity.y, depth);
        self.apply_checked(state, ForceTorque::torque(roll_axis * roll_torque), "roll", &mut out);
        self.warn_excess("roll_torque", roll_torque, s.torque_warning);

        // i. trim at low speed
        let trim_torque =
            safety::low_speed_trim_torque(&s, forward_speed, pitch, planes.desired_pitch, pitch_rate);
        self.apply_checked(state, ForceTorque::torque(right * trim_torque), "trim", &mut out);

        // j. hull lift
        let lift = self.hull_lift.compute(velocity, forward, up, pitch.to_radians());
        self.apply_checked(state, ForceTorque::force(lift), "hull lift", &mut out);

        // k. ballast, de-emphasised while surfacing
        let mut ballast_force = self.ballast.update(effective_target, depth, depth_rate, dt);
        if stage.is_surfacing() {
            ballast_force *= s.surfacing_ballast_scale;
        }
        self.apply_checked(state, ForceTorque::force(Vec3f::new(0.0, -ballast_force, 0.0)), "ballast", &mut out);

        // l-m. direct velocity corrections
        let (v, sideways) = post::eliminate_sideways_velocity(&s, state.velocity, forward);
        let v = post::align_velocity_to_heading(&s, v, forward, self.cfg.max_speed);
        if v.is_finite() {
            state.velocity = v;
        }

        // n. limits
        let clamped = self.validator.clamp_velocity(state, self.cfg.max_speed);
        if let Some(bound) = self.cfg.world_boundary {
            self.validator.enforce_boundaries(state, bound);
        }

        if let Some(d) = dbg.as_deref_mut() {
            out.depth = depth;
            out.heading = heading;
            out.forward_speed = forward_speed;
            out.pitch = pitch;
            out.roll = roll;
            out.stage = stage;
            out.effective_target_depth = effective_target;
            out.buoyancy = buoyancy;
            out.drag = drag;
            out.thrust = thrust;
            out.rudder_torque = rudder_torque;
            out.planes = planes;
            out.emergency = emergency.is_some();
            out.safety_pitch_torque = safety_pitch;
            out.roll_torque = roll_torque;
            out.trim_torque = trim_torque;
            out.hull_lift = lift;
            out.ballast_force = ballast_force;
            out.ballast_derivative = self.ballast.last_derivative();
            out.sideways_speed = sideways;
            out.velocity_clamped = clamped;
            *d = out;
        }
        TickOutcome::Applied
    }

    fn apply_checked(&self, state: &mut RigidBodyState, ft: ForceTorque, term: &str, out: &mut TickDebug) {
        if ft.is_finite() {
            state.apply(ft);
        } else {
            out.rejected_terms += 1;
            self.logger.log_with(|| format!("{term}: non-finite output {ft:?} dropped"));
        }
    }

    fn warn_excess(&mut self, key: &'static str, torque: f32, threshold: f32) {
        if torque.abs() > threshold && self.logger.is_enabled() && self.warnings.ready(key, self.clock) {
            tracing::warn!(target: "physics", key, torque, threshold, "torque above warning threshold");
            self.logger.log(&format!("{key} {torque:.3e} N·m above {threshold:.1e}"));
        }
    }
}
