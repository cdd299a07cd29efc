use crate::BallastConfig;

/// PID depth keeper. Works in the depth frame (positive = deeper), so a
/// negative output pushes the hull up.
#[derive(Debug, Clone)]
pub struct Ballast {
    cfg: BallastConfig,
    integral: f32,
    last_error: f32,
    last_output: f32,
    last_derivative: f32,
}

impl Ballast {
    pub fn new(cfg: BallastConfig) -> Self {
        Self { cfg, integral: 0.0, last_error: 0.0, last_output: 0.0, last_derivative: 0.0 }
    }

    pub fn config(&self) -> &BallastConfig {
        &self.cfg
    }

    pub fn integral(&self) -> f32 {
        self.integral
    }

    pub fn last_output(&self) -> f32 {
        self.last_output
    }

    /// Rate of change of the effective error over the last update.
    pub fn last_derivative(&self) -> f32 {
        self.last_derivative
    }

    pub fn reset_pid_state(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
        self.last_output = 0.0;
        self.last_derivative = 0.0;
    }

    /// `|integral|` bound keeping `ki·∫e` within the output range.
    fn windup_limit(&self) -> Option<f32> {
        (self.cfg.ki > 0.0).then(|| self.cfg.max_force / (self.cfg.ki * self.cfg.output_scale))
    }

    /// Depth-frame force (N). `depth_rate` is positive when getting deeper.
    pub fn update(&mut self, target_depth: f32, current_depth: f32, depth_rate: f32, dt: f32) -> f32 {
        let c = &self.cfg;
        if !(dt.is_finite() && dt > 0.0) {
            return self.last_output;
        }
        let error = target_depth - current_depth;
        let effective_error = if error.abs() < c.dead_zone {
            self.integral = 0.0;
            0.0
        } else {
            self.integral += error * dt;
            error
        };
        if let Some(limit) = self.windup_limit() {
            self.integral = self.integral.clamp(-limit, limit);
        }

        let desired_rate = (effective_error * c.depth_rate_gain).clamp(-c.max_rate, c.max_rate);
        let rate_error = desired_rate - depth_rate;
        self.last_derivative = (effective_error - self.last_error) / dt;
        self.last_error = effective_error;

        let pid = c.kp * effective_error + c.ki * self.integral + c.kd * rate_error;
        let mut force = (pid / c.output_scale).clamp(-1.0, 1.0) * c.max_force;
        force += -depth_rate * c.damping_coef;

        // pull toward last tick's output
        let smoothed = force + (self.last_output - force) * c.smoothing;
        self.last_output = smoothed;
        smoothed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn deep_below_surface_target_pushes_up_hard() {
        let mut b = Ballast::new(BallastConfig::default());
        let f = b.update(0.0, 200.0, 0.0, DT);
        // (0.1·-200 + 1.0·-2) / 30 = -0.733 of max force, then smoothed toward 0
        assert!(f < -3.5e6, "f={f}");
    }

    #[test]
    fn dead_zone_resets_integral() {
        let mut b = Ballast::new(BallastConfig::default());
        for _ in 0..600 {
            b.update(100.0, 80.0, 0.0, DT);
        }
        assert!(b.integral() > 100.0, "integral={}", b.integral());
        b.update(100.0, 99.7, 0.0, DT);
        assert_eq!(b.integral(), 0.0);
    }

    #[test]
    fn integral_respects_windup_bound() {
        let cfg = BallastConfig { ki: 0.5, max_force: 30.0, output_scale: 30.0, ..BallastConfig::default() };
        let mut b = Ballast::new(cfg);
        for _ in 0..10_000 {
            b.update(500.0, 0.0, 0.0, 1.0);
        }
        // 30 / (0.5 · 30)
        assert!((b.integral() - 2.0).abs() < 1e-5, "integral={}", b.integral());
    }

    #[test]
    fn reset_clears_accumulators() {
        let mut b = Ballast::new(BallastConfig::default());
        b.update(50.0, 10.0, 0.0, DT);
        b.reset_pid_state();
        assert_eq!(b.integral(), 0.0);
        assert_eq!(b.last_output(), 0.0);
    }

    #[test]
    fn sinking_is_damped() {
        let mut a = Ballast::new(BallastConfig::default());
        let mut b = Ballast::new(BallastConfig::default());
        let still = a.update(100.0, 100.0, 0.0, DT);
        let sinking = b.update(100.0, 100.0, 1.0, DT);
        assert_eq!(still, 0.0);
        assert!(sinking < 0.0, "sinking={sinking}");
    }
}
