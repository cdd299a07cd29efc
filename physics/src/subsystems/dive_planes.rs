use crate::{DivePlaneConfig, Logger};

/// Per-tick inputs for the pitch controller. Depths are positive down.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaneInputs {
    pub current_depth: f32,
    pub target_depth: f32,
    /// m/s, positive when getting deeper.
    pub depth_rate: f32,
    /// degrees, nose up positive.
    pub pitch: f32,
    /// deg/s, nose up positive.
    pub pitch_rate: f32,
    /// m/s along the hull axis.
    pub forward_speed: f32,
    /// Caller's cap on commanded pitch, degrees.
    pub max_pitch_limit: f32,
}

/// What the planes decided this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlaneCommand {
    /// Depth the planes steered for after surfacing staging.
    pub effective_target: f32,
    pub distance_to_target: f32,
    pub will_overshoot: bool,
    pub target_pitch: f32,
    pub desired_pitch: f32,
    pub pitch_error: f32,
    /// Final plane deflection, degrees.
    pub plane_angle: f32,
    pub bow_torque: f32,
    pub stern_torque: f32,
    /// Total pitch torque about the body right axis (N·m), nose up positive.
    pub torque: f32,
}

/// Bow and stern planes steering pitch toward a staged target depth.
///
/// Nothing here is persisted between ticks: every band and stage is
/// re-derived from the current inputs.
#[derive(Debug, Clone)]
pub struct DivePlanes {
    cfg: DivePlaneConfig,
    logger: Logger,
}

impl DivePlanes {
    pub fn new(cfg: DivePlaneConfig, logger: Logger) -> Self {
        Self { cfg, logger }
    }

    pub fn config(&self) -> &DivePlaneConfig {
        &self.cfg
    }

    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = logger;
    }

    /// Plane authority as a function of forward speed: 0.1·s below the low
    /// speed, linear 0.1→1.0 up to full speed, 1.0 above.
    pub fn speed_effectiveness(&self, speed: f32) -> f32 {
        let c = &self.cfg;
        let s = speed.abs();
        if s < c.low_speed {
            0.1 * s / c.low_speed
        } else if s < c.full_speed {
            0.1 + 0.9 * (s - c.low_speed) / (c.full_speed - c.low_speed)
        } else {
            1.0
        }
    }

    /// Depth actually steered for. Shallow targets are approached through
    /// the surfacing waypoints, deepest first.
    pub fn effective_target(&self, target_depth: f32, current_depth: f32) -> f32 {
        let c = &self.cfg;
        if target_depth >= c.surfacing_target_depth {
            return target_depth;
        }
        c.surfacing_waypoints
            .iter()
            .copied()
            .find(|&wp| wp > target_depth && current_depth > wp + c.waypoint_margin)
            .unwrap_or(target_depth)
    }

    /// Base pitch magnitude for a distance to target, before caps.
    pub fn band_pitch(&self, distance: f32) -> f32 {
        let c = &self.cfg;
        if distance < c.level_band {
            0.0
        } else if distance < c.ramp_band {
            c.cruise_pitch * (distance - c.level_band) / (c.ramp_band - c.level_band)
        } else if distance < c.cruise_band {
            c.cruise_pitch
        } else {
            c.deep_pitch
        }
    }

    fn surfacing_cap(&self, current_depth: f32) -> Option<f32> {
        self.cfg
            .surfacing_caps
            .iter()
            .filter(|cap| current_depth < cap.below_depth)
            .map(|cap| cap.max_pitch)
            .reduce(f32::min)
    }

    /// Fraction of plane authority left near the pitch limits.
    pub fn authority(&self, pitch: f32, pitch_error: f32) -> f32 {
        let c = &self.cfg;
        let mag = pitch.abs();
        if mag <= c.rolloff_start {
            return 1.0;
        }
        let mut a = (1.0 - (mag - c.rolloff_start) / (c.rolloff_end - c.rolloff_start)).max(0.0);
        // the command would steepen an already steep attitude
        if pitch_error * pitch > 0.0 {
            a *= c.saturation_authority;
        }
        a
    }

    pub fn compute(&self, inp: PlaneInputs) -> PlaneCommand {
        let c = &self.cfg;
        let surfacing = inp.target_depth < c.surfacing_target_depth;

        // 1. staged target and depth error
        let effective_target = self.effective_target(inp.target_depth, inp.current_depth);
        let depth_error = effective_target - inp.current_depth;
        let distance = depth_error.abs();

        // 2. depth overshoot prediction
        let predicted_depth = inp.current_depth + inp.depth_rate * c.depth_prediction_s;
        let predicted_error = effective_target - predicted_depth;
        let will_overshoot = predicted_error.signum() != depth_error.signum()
            && predicted_error != 0.0
            && distance > c.overshoot_min_distance;

        // 3. band-selected target pitch and caps
        let mut target_pitch = self.band_pitch(distance).min(inp.max_pitch_limit.max(0.0));
        if surfacing {
            if let Some(cap) = self.surfacing_cap(inp.current_depth) {
                target_pitch = target_pitch.min(cap);
            }
        }

        // 4. signed desired pitch; ascending (negative error) is nose up
        let ascending = depth_error < 0.0;
        let desired_pitch = if target_pitch <= 0.0 {
            0.0
        } else if will_overshoot {
            let counter = (predicted_error.abs() * c.overshoot_counter_gain).min(c.overshoot_counter_max);
            if ascending { -counter } else { counter }
        } else if ascending {
            target_pitch
        } else {
            -target_pitch
        };

        // 5. authority rolloff near the pitch limits
        let raw_error = desired_pitch - inp.pitch;
        let mut pitch_error = raw_error * self.authority(inp.pitch, raw_error);

        // 6. predictive pitch damping. The rate would carry pitch past the
        // desired value when the projected and current errors differ in sign
        // (the overshoot case), so only then is the error shrunk.
        let projected_pitch = inp.pitch + inp.pitch_rate * c.pitch_prediction_s;
        let projected_error = desired_pitch - projected_pitch;
        if pitch_error != 0.0 && projected_error * raw_error < 0.0 {
            let keep = (1.0 - projected_error.abs() / raw_error.abs()).max(c.min_error_retention);
            pitch_error *= keep.min(1.0);
        }

        // 7. rate damping and deflection limit
        let plane_angle = (pitch_error - c.rate_damping * inp.pitch_rate)
            .clamp(-c.max_plane_angle, c.max_plane_angle);

        // 8-9. torque from both plane sets
        let s = inp.forward_speed.abs();
        let raw = plane_angle * s * s * c.coef * self.speed_effectiveness(s);
        let mut bow_torque = raw * c.bow_fraction;
        let mut stern_torque = raw * c.stern_fraction;
        let total = bow_torque + stern_torque;
        let torque = total.clamp(-c.torque_limit, c.torque_limit);
        if torque != total {
            self.logger.log_with(|| {
                format!("dive plane torque {total:.3e} N·m clamped to ±{:.1e}", c.torque_limit)
            });
            let k = torque / total;
            bow_torque *= k;
            stern_torque *= k;
        }

        PlaneCommand {
            effective_target,
            distance_to_target: distance,
            will_overshoot,
            target_pitch,
            desired_pitch,
            pitch_error,
            plane_angle,
            bow_torque,
            stern_torque,
            torque,
        }
    }
}
