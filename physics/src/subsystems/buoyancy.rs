use crate::{BuoyancyConfig, ForceTorque, Ocean, Vec3f};

/// Fraction of the hull below the surface for a centre depth below the
/// (wave) surface. Linear across the hull height.
pub fn submersion_ratio(hull_depth: f32, hull_height: f32) -> f32 {
    let half = 0.5 * hull_height;
    if hull_depth < -half {
        0.0
    } else if hull_depth > half {
        1.0
    } else {
        (hull_depth + half) / hull_height
    }
}

/// Body axes and motion the buoyancy model needs.
#[derive(Debug, Clone, Copy)]
pub struct BuoyancyInputs {
    pub position: Vec3f,
    pub velocity: Vec3f,
    pub forward: Vec3f,
    pub right: Vec3f,
    pub target_depth: f32,
}

/// Archimedes lift plus wave-following near the surface and extra heave
/// damping at depth.
#[derive(Debug, Clone)]
pub struct Buoyancy {
    cfg: BuoyancyConfig,
}

impl Buoyancy {
    pub fn new(cfg: BuoyancyConfig) -> Self {
        Self { cfg }
    }

    pub fn config(&self) -> &BuoyancyConfig {
        &self.cfg
    }

    /// Weight of the wave-following terms: 0 above water, 1 just below the
    /// surface, fading to 0 at `influence_zero_depth`.
    pub fn wave_influence(&self, hull_depth: f32) -> f32 {
        let c = &self.cfg;
        if hull_depth < 0.0 {
            0.0
        } else if hull_depth < c.influence_full_depth {
            1.0
        } else if hull_depth < c.influence_zero_depth {
            1.0 - (hull_depth - c.influence_full_depth) / (c.influence_zero_depth - c.influence_full_depth)
        } else {
            0.0
        }
    }

    pub fn hull_depth(&self, position: Vec3f, ocean: &Ocean) -> f32 {
        ocean.wave_height_at(position) - position.y
    }

    pub fn compute(&self, inp: BuoyancyInputs, ocean: &Ocean) -> ForceTorque {
        let c = &self.cfg;
        let wave_height = ocean.wave_height_at(inp.position);
        let hull_depth = wave_height - inp.position.y;
        let vy = inp.velocity.y;

        let submersion = submersion_ratio(hull_depth, c.hull_height);
        let mut fy = c.water_density * c.displaced_volume * submersion * c.gravity * c.buoyancy_coef;

        if inp.target_depth < c.surfacing_target_depth && hull_depth < c.surfacing_hull_depth {
            fy *= c.surfacing_boost;
            if vy > c.upward_damp_speed {
                fy -= vy * c.wave_damping_coef * 0.5;
            }
        }

        let mut torque = Vec3f::ZERO;
        let influence = self.wave_influence(hull_depth);
        if influence > 0.01 {
            fy += (wave_height - inp.position.y) * c.wave_spring_coef * influence;
            fy -= vy * c.wave_damping_coef * influence;

            let k = influence * c.wave_torque_factor * c.wave_torque_coef;
            let v_fwd = inp.velocity.dot(inp.forward);
            let v_side = inp.velocity.dot(inp.right);
            // pitch about the right axis, roll about the hull axis
            torque += inp.right * (v_fwd * k);
            torque += inp.forward * (v_side * k);
        }

        if hull_depth > c.deep_threshold {
            fy -= vy * c.deep_damping;
        }

        ForceTorque { force: Vec3f::new(0.0, fy, 0.0), torque }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StillWater;

    fn inputs(y: f32, vy: f32, target_depth: f32) -> BuoyancyInputs {
        BuoyancyInputs {
            position: Vec3f::new(0.0, y, 0.0),
            velocity: Vec3f::new(0.0, vy, 0.0),
            forward: Vec3f::NEG_Z,
            right: Vec3f::X,
            target_depth,
        }
    }

    #[test]
    fn submersion_ratio_endpoints_and_monotonicity() {
        let h = 10.0;
        assert_eq!(submersion_ratio(-5.0, h), 0.0);
        assert_eq!(submersion_ratio(0.0, h), 0.5);
        assert_eq!(submersion_ratio(5.0, h), 1.0);
        assert_eq!(submersion_ratio(-50.0, h), 0.0);
        assert_eq!(submersion_ratio(50.0, h), 1.0);
        let mut prev = -1.0;
        for i in -80..=80 {
            let r = submersion_ratio(i as f32 * 0.1, h);
            assert!(r >= prev, "non-monotonic at {}", i as f32 * 0.1);
            prev = r;
        }
    }

    #[test]
    fn fully_submerged_is_neutral_at_depth() {
        let sea = StillWater::default();
        let ocean = Ocean::new(&sea);
        let b = Buoyancy::new(BuoyancyConfig::default());
        let ft = b.compute(inputs(-100.0, 0.0, 100.0), &ocean);
        let weight = 2.0e6 * 9.81;
        assert!((ft.force.y - weight).abs() / weight < 1e-4, "fy={}", ft.force.y);
        assert_eq!(ft.torque, Vec3f::ZERO);
    }

    #[test]
    fn out_of_water_has_no_lift() {
        let sea = StillWater::default();
        let ocean = Ocean::new(&sea);
        let b = Buoyancy::new(BuoyancyConfig::default());
        assert_eq!(b.compute(inputs(20.0, 0.0, 50.0), &ocean).force.y, 0.0);
    }

    #[test]
    fn wave_influence_profile() {
        let b = Buoyancy::new(BuoyancyConfig::default());
        assert_eq!(b.wave_influence(-1.0), 0.0);
        assert_eq!(b.wave_influence(1.0), 1.0);
        assert!((b.wave_influence(6.0) - 0.5).abs() < 1e-6);
        assert_eq!(b.wave_influence(12.0), 0.0);
    }

    #[test]
    fn surfacing_boost_applies_near_surface() {
        let sea = StillWater::default();
        let ocean = Ocean::new(&sea);
        let b = Buoyancy::new(BuoyancyConfig::default());
        let holding = b.compute(inputs(-3.0, 0.0, 50.0), &ocean).force.y;
        let surfacing = b.compute(inputs(-3.0, 0.0, 0.0), &ocean).force.y;
        assert!(surfacing > holding * 1.1, "holding={holding} surfacing={surfacing}");
    }

    #[test]
    fn hull_follows_waves_just_below_surface() {
        let sea = StillWater::default();
        let ocean = Ocean::new(&sea);
        let b = Buoyancy::new(BuoyancyConfig::default());
        let c = b.config();
        assert_eq!(b.wave_influence(1.0), 1.0);

        let still = b.compute(inputs(-1.0, 0.0, 50.0), &ocean);
        let archimedes =
            c.water_density * c.displaced_volume * submersion_ratio(1.0, c.hull_height) * c.gravity * c.buoyancy_coef;
        let spring = still.force.y - archimedes;
        assert!((spring - 1.0 * c.wave_spring_coef).abs() < 2.0, "spring={spring}");

        // sinking at 0.4 m/s, 3 m/s ahead, 1.5 m/s to starboard
        let moving = BuoyancyInputs {
            velocity: Vec3f::new(1.5, -0.4, -3.0),
            ..inputs(-1.0, 0.0, 50.0)
        };
        let ft = b.compute(moving, &ocean);
        let damping = ft.force.y - still.force.y;
        assert!(damping > 0.0, "damping must oppose the sink, got {damping}");
        assert!((damping - 0.4 * c.wave_damping_coef).abs() < 2.0, "damping={damping}");

        let k = c.wave_torque_factor * c.wave_torque_coef;
        let pitch = ft.torque.dot(moving.right);
        let roll = ft.torque.dot(moving.forward);
        assert!((pitch - 3.0 * k).abs() < 1e-2 * k, "pitch torque={pitch}");
        assert!((roll - 1.5 * k).abs() < 1e-2 * k, "roll torque={roll}");
        assert!(ft.torque.y.abs() < 1e-3, "torque={:?}", ft.torque);
    }

    #[test]
    fn deep_heave_is_damped() {
        let sea = StillWater::default();
        let ocean = Ocean::new(&sea);
        let b = Buoyancy::new(BuoyancyConfig::default());
        let still = b.compute(inputs(-50.0, 0.0, 50.0), &ocean).force.y;
        let rising = b.compute(inputs(-50.0, 2.0, 50.0), &ocean).force.y;
        assert!((still - rising - 10_000.0).abs() < 4.0, "still={still} rising={rising}");
    }
}
