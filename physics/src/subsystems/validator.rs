use crate::diagnostics::Throttle;
use crate::{Logger, Quatf, RigidBodyState, Vec3f};

/// Seconds between repeats of the same diagnostic key.
const LOG_COOLDOWN_S: f32 = 5.0;
/// Soft clamp applied every tick, as a multiple of max speed.
const OVERSPEED_CLAMP: f32 = 1.1;
/// Overspeed is only reported above this multiple.
const OVERSPEED_REPORT: f32 = 1.2;

#[inline]
pub fn is_finite(v: Vec3f) -> bool {
    v.x.is_finite() && v.y.is_finite() && v.z.is_finite()
}

/// Detects and repairs numerical corruption, clamps overspeed and enforces
/// the legacy world bound. Never fails: every fault degrades to a safe value.
#[derive(Debug, Clone)]
pub struct StateValidator {
    logger: Logger,
    throttle: Throttle,
    clock: f32,
}

impl Default for StateValidator {
    fn default() -> Self {
        Self::new(Logger::disabled())
    }
}

impl StateValidator {
    pub fn new(logger: Logger) -> Self {
        Self { logger, throttle: Throttle::new(LOG_COOLDOWN_S), clock: 0.0 }
    }

    pub fn set_logger(&mut self, logger: Logger) {
        self.logger = logger;
    }

    /// Advances the throttling clock; only used to space out diagnostics.
    pub fn advance_clock(&mut self, dt: f32) {
        if dt.is_finite() && dt > 0.0 {
            self.clock += dt;
        }
    }

    fn emit(&mut self, key: &'static str, message: impl FnOnce() -> String) {
        if self.logger.is_enabled() && self.throttle.ready(key, self.clock) {
            self.logger.log(&message());
        }
    }

    /// Resets every non-finite field to its safe default, independently.
    /// Returns true when anything was repaired.
    pub fn validate_and_repair(&mut self, state: &mut RigidBodyState) -> bool {
        let mut repaired = false;
        if !is_finite(state.position) {
            let bad = state.position;
            state.position = Vec3f::ZERO;
            self.emit("nan_position", || format!("non-finite position {bad:?}; reset to origin"));
            repaired = true;
        }
        if !is_finite(state.velocity) {
            let bad = state.velocity;
            state.velocity = Vec3f::ZERO;
            self.emit("nan_velocity", || format!("non-finite velocity {bad:?}; zeroed"));
            repaired = true;
        }
        if !is_finite(state.angular_velocity) {
            let bad = state.angular_velocity;
            state.angular_velocity = Vec3f::ZERO;
            self.emit("nan_angular_velocity", || {
                format!("non-finite angular velocity {bad:?}; zeroed")
            });
            repaired = true;
        }
        let q = state.orientation;
        if !(q.is_finite() && q.length_squared() > 1e-6) {
            state.orientation = Quatf::IDENTITY;
            self.emit("bad_orientation", || format!("degenerate orientation {q:?}; reset"));
            repaired = true;
        }
        if repaired {
            state.clear_accumulators();
        }
        repaired
    }

    /// Rescales velocity to `1.1 × max_speed` when exceeded, keeping direction.
    pub fn clamp_velocity(&mut self, state: &mut RigidBodyState, max_speed: f32) -> bool {
        let speed = state.velocity.length();
        if speed < 1e-3 {
            return false;
        }
        let limit = OVERSPEED_CLAMP * max_speed;
        if speed <= limit {
            return false;
        }
        if speed > OVERSPEED_REPORT * max_speed {
            self.emit("overspeed", || {
                format!("speed {speed:.2} m/s exceeds {:.0}% of max {max_speed:.2}", OVERSPEED_REPORT * 100.0)
            });
        }
        state.velocity *= limit / speed;
        true
    }

    /// Clamps X and Z to `±boundary` and kills the outward velocity on the
    /// clamped axis.
    pub fn enforce_boundaries(&mut self, state: &mut RigidBodyState, boundary: f32) -> bool {
        let mut clamped = false;
        if state.position.x.abs() > boundary {
            let side = state.position.x.signum();
            state.position.x = side * boundary;
            if state.velocity.x * side > 0.0 {
                state.velocity.x = 0.0;
            }
            clamped = true;
            self.emit("boundary_x", || format!("x clamped to {:.1}", side * boundary));
        }
        if state.position.z.abs() > boundary {
            let side = state.position.z.signum();
            state.position.z = side * boundary;
            if state.velocity.z * side > 0.0 {
                state.velocity.z = 0.0;
            }
            clamped = true;
            self.emit("boundary_z", || format!("z clamped to {:.1}", side * boundary));
        }
        clamped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DiagnosticLog;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Capture(Mutex<Vec<String>>);

    impl DiagnosticLog for Capture {
        fn log(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    #[test]
    fn repairs_fields_independently() {
        let mut v = StateValidator::default();
        let mut s = RigidBodyState {
            position: Vec3f::new(1.0, 2.0, 3.0),
            velocity: Vec3f::new(f32::NAN, 0.0, 0.0),
            angular_velocity: Vec3f::new(0.0, 0.1, 0.0),
            ..RigidBodyState::default()
        };
        assert!(v.validate_and_repair(&mut s));
        assert_eq!(s.position, Vec3f::new(1.0, 2.0, 3.0));
        assert_eq!(s.velocity, Vec3f::ZERO);
        assert_eq!(s.angular_velocity, Vec3f::new(0.0, 0.1, 0.0));

        s.position.y = f32::INFINITY;
        assert!(v.validate_and_repair(&mut s));
        assert_eq!(s.position, Vec3f::ZERO);

        assert!(!v.validate_and_repair(&mut s), "clean state must not report a repair");
    }

    #[test]
    fn degenerate_orientation_is_reset_to_identity() {
        let mut v = StateValidator::default();
        for bad in [Quatf::from_xyzw(f32::NAN, 0.0, 0.0, 1.0), Quatf::from_xyzw(0.0, 0.0, 0.0, 0.0)] {
            let mut s = RigidBodyState {
                position: Vec3f::new(4.0, -30.0, 2.0),
                velocity: Vec3f::new(0.0, 0.0, -5.0),
                orientation: bad,
                force: Vec3f::new(1.0, 2.0, 3.0),
                ..RigidBodyState::default()
            };
            assert!(v.validate_and_repair(&mut s), "orientation {bad:?} not repaired");
            assert_eq!(s.orientation, Quatf::IDENTITY);
            assert_eq!(s.position, Vec3f::new(4.0, -30.0, 2.0));
            assert_eq!(s.velocity, Vec3f::new(0.0, 0.0, -5.0));
            assert_eq!(s.force, Vec3f::ZERO);
        }
    }

    #[test]
    fn overspeed_is_rescaled_preserving_direction() {
        let mut v = StateValidator::default();
        let mut s = RigidBodyState { velocity: Vec3f::new(0.0, 0.0, -20.0), ..Default::default() };
        assert!(v.clamp_velocity(&mut s, 10.0));
        assert!((s.velocity.length() - 11.0).abs() < 1e-4, "v={:?}", s.velocity);
        assert!(s.velocity.z < 0.0);

        let mut slow = RigidBodyState { velocity: Vec3f::new(0.0, 0.0, 10.5), ..Default::default() };
        assert!(!v.clamp_velocity(&mut slow, 10.0));
        assert_eq!(slow.velocity.z, 10.5);
    }

    #[test]
    fn boundary_zeroes_outward_velocity_only() {
        let mut v = StateValidator::default();
        let mut s = RigidBodyState {
            position: Vec3f::new(120.0, -5.0, -50.0),
            velocity: Vec3f::new(3.0, 0.0, -2.0),
            ..Default::default()
        };
        assert!(v.enforce_boundaries(&mut s, 100.0));
        assert_eq!(s.position.x, 100.0);
        assert_eq!(s.velocity.x, 0.0);
        assert_eq!(s.position.z, -50.0);
        assert_eq!(s.velocity.z, -2.0);
    }

    #[test]
    fn repeated_faults_are_throttled() {
        let sink = Arc::new(Capture::default());
        let mut v = StateValidator::new(Logger::new(sink.clone(), true));
        for _ in 0..10 {
            let mut s = RigidBodyState { velocity: Vec3f::splat(f32::NAN), ..Default::default() };
            v.validate_and_repair(&mut s);
            v.advance_clock(0.1);
        }
        assert_eq!(sink.0.lock().unwrap().len(), 1);
        v.advance_clock(5.0);
        let mut s = RigidBodyState { velocity: Vec3f::splat(f32::NAN), ..Default::default() };
        v.validate_and_repair(&mut s);
        assert_eq!(sink.0.lock().unwrap().len(), 2);
    }

    #[test]
    fn overspeed_logs_only_above_120_percent() {
        let sink = Arc::new(Capture::default());
        let mut v = StateValidator::new(Logger::new(sink.clone(), true));
        let mut s = RigidBodyState { velocity: Vec3f::new(11.5, 0.0, 0.0), ..Default::default() };
        v.clamp_velocity(&mut s, 10.0);
        assert!(sink.0.lock().unwrap().is_empty());
        let mut s = RigidBodyState { velocity: Vec3f::new(13.0, 0.0, 0.0), ..Default::default() };
        v.clamp_velocity(&mut s, 10.0);
        assert_eq!(sink.0.lock().unwrap().len(), 1);
    }
}
