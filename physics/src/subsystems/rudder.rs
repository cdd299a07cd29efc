use crate::heading::heading_error;
use crate::RudderConfig;

/// Yaw torque toward the target heading.
///
/// Sign convention: a positive world-Y torque turns the bow left (heading
/// decreases), so a positive heading error (turn right) produces a negative
/// torque.
#[derive(Debug, Clone)]
pub struct Rudder {
    cfg: RudderConfig,
}

impl Rudder {
    pub fn new(cfg: RudderConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &RudderConfig {
        &self.cfg
    }

    /// Reduced authority below the low-speed threshold.
    pub fn effectiveness(&self, forward_speed: f32) -> f32 {
        if forward_speed.abs() < self.cfg.low_speed_threshold {
            self.cfg.low_speed_effectiveness
        } else {
            1.0
        }
    }

    /// Rudder deflection in degrees for a heading error.
    pub fn rudder_angle(&self, error: f32) -> f32 {
        (error * 0.5).clamp(-self.cfg.max_angle, self.cfg.max_angle)
    }

    /// World-Y torque (N·m). `yaw_rate` is the world-Y angular velocity in rad/s.
    pub fn compute(&self, current_heading: f32, target_heading: f32, forward_speed: f32, yaw_rate: f32) -> f32 {
        let c = &self.cfg;
        let error = heading_error(current_heading, target_heading);
        let angle = self.rudder_angle(error);
        let speed_factor = forward_speed.abs().min(c.speed_cap);
        let effectiveness = self.effectiveness(forward_speed);

        let mut torque = -speed_factor * angle * c.coef * effectiveness;
        torque += -yaw_rate * c.damping_coef;

        let rate_deg = yaw_rate.to_degrees();
        if rate_deg.abs() > c.max_turn_rate {
            let excess = rate_deg.abs() - c.max_turn_rate;
            torque += -rate_deg.signum() * excess * c.damping_coef * 2.0;
        }

        if error.abs() < c.fine_band {
            torque *= error.abs() / c.fine_band;
        }
        torque
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rudder() -> Rudder {
        Rudder::new(RudderConfig::default())
    }

    #[test]
    fn turn_right_gives_negative_torque() {
        let t = rudder().compute(0.0, 40.0, 6.0, 0.0);
        assert!(t < 0.0, "t={t}");
        let t = rudder().compute(0.0, 320.0, 6.0, 0.0);
        assert!(t > 0.0, "t={t}");
    }

    #[test]
    fn stopped_hull_has_reduced_rudder_authority() {
        let r = rudder();
        assert_eq!(r.effectiveness(0.0), 0.2);
        assert_eq!(r.effectiveness(8.0), 1.0);

        // no flow over the rudder: no torque at all
        assert_eq!(r.compute(0.0, 40.0, 0.0, 0.0), 0.0);
        // 0.3 m/s · 20° · coef · 0.2
        let creeping = r.compute(0.0, 40.0, 0.3, 0.0);
        assert!((creeping + 48_000.0).abs() < 1.0, "creeping={creeping}");
        let cruising = r.compute(0.0, 40.0, 8.0, 0.0);
        assert!((cruising + 6.4e6).abs() < 1.0, "cruising={cruising}");
        assert!(creeping.abs() < cruising.abs());
    }

    #[test]
    fn rudder_angle_saturates() {
        let r = rudder();
        assert_eq!(r.rudder_angle(10.0), 5.0);
        assert_eq!(r.rudder_angle(170.0), 30.0);
        assert_eq!(r.rudder_angle(-170.0), -30.0);
    }

    #[test]
    fn yaw_rate_above_limit_is_braked_hard() {
        let r = rudder();
        let slow = r.compute(0.0, 90.0, 8.0, -2f32.to_radians());
        let fast = r.compute(0.0, 90.0, 8.0, -5f32.to_radians());
        // turning right (negative world-Y rate): braking torque is positive
        assert!(fast > slow, "slow={slow} fast={fast}");
        assert!(fast > 0.0, "excess turn rate should reverse the command, fast={fast}");
    }

    #[test]
    fn fine_band_suppresses_terminal_torque() {
        let r = rudder();
        let at_4 = r.compute(0.0, 4.0, 8.0, 0.0);
        let at_2 = r.compute(0.0, 2.0, 8.0, 0.0);
        let on_target = r.compute(10.0, 10.0, 8.0, 0.3);
        assert!(at_2.abs() < at_4.abs() * 0.5);
        assert_eq!(on_target, 0.0);
    }
}
