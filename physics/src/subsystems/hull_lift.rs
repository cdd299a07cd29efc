use crate::{HullLiftConfig, Vec3f};

/// Lift generated by the hull body itself at an angle of attack.
#[derive(Debug, Clone)]
pub struct HullLift {
    cfg: HullLiftConfig,
}

impl HullLift {
    pub fn new(cfg: HullLiftConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &HullLiftConfig {
        &self.cfg
    }

    /// 0 at `min_speed`, 1 at twice that.
    pub fn speed_ramp(&self, forward_speed: f32) -> f32 {
        let min = self.cfg.min_speed;
        ((forward_speed.abs() - min) / min).clamp(0.0, 1.0)
    }

    /// World force along the body up axis. `pitch` in radians, nose up positive.
    pub fn compute(&self, velocity: Vec3f, forward: Vec3f, up: Vec3f, pitch: f32) -> Vec3f {
        let c = &self.cfg;
        let v_fwd = velocity.dot(forward);
        if v_fwd.abs() < c.min_speed || !pitch.is_finite() {
            return Vec3f::ZERO;
        }
        let lift = 0.5 * c.water_density * v_fwd * v_fwd * c.area * c.lift_coefficient * pitch.sin();
        up * (lift * self.speed_ramp(v_fwd))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FWD: Vec3f = Vec3f::new(0.0, 0.0, -1.0);

    #[test]
    fn no_lift_below_min_speed() {
        let h = HullLift::new(HullLiftConfig::default());
        assert_eq!(h.compute(FWD * 0.9, FWD, Vec3f::Y, 0.2), Vec3f::ZERO);
    }

    #[test]
    fn lift_follows_pitch_sign_and_ramps_in() {
        let h = HullLift::new(HullLiftConfig::default());
        let pitch = 10f32.to_radians();
        let up = h.compute(FWD * 6.0, FWD, Vec3f::Y, pitch);
        let down = h.compute(FWD * 6.0, FWD, Vec3f::Y, -pitch);
        assert!(up.y > 0.0 && down.y < 0.0, "up={up:?} down={down:?}");

        // 0.5 · 1000 · 36 · 800 · 0.1 · sin 10°
        let expected = 0.5 * 1000.0 * 36.0 * 800.0 * 0.1 * pitch.sin();
        assert!((up.y - expected).abs() / expected < 1e-4, "lift={}", up.y);

        let half = h.compute(FWD * 1.5, FWD, Vec3f::Y, pitch);
        let full_at_1_5 = 0.5 * 1000.0 * 2.25 * 800.0 * 0.1 * pitch.sin();
        assert!((half.y - 0.5 * full_at_1_5).abs() / full_at_1_5 < 1e-4, "lift={}", half.y);
    }
}
