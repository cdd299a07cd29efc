//! One-dimensional emergency ascent: ballast, buoyancy and hull drag only.

use physics::subsystems::{AppendageRegistry, Ballast, Buoyancy, BuoyancyInputs, HydroDrag};
use physics::{BallastConfig, BuoyancyConfig, DragConfig, Ocean, StillWater, Vec3f};

const DT: f32 = 1.0 / 60.0;
const MASS: f32 = 2.0e6;
const G: f32 = 9.81;

struct Trace {
    depth: Vec<f32>,
    vertical_velocity: Vec<f32>,
    first_force: f32,
}

fn ascend_from(depth: f32, seconds: f32) -> Trace {
    let sea = StillWater::default();
    let ocean = Ocean::new(&sea);
    let mut ballast = Ballast::new(BallastConfig::default());
    let buoyancy = Buoyancy::new(BuoyancyConfig::default());
    let drag = HydroDrag::new(DragConfig::default()).expect("default drag config");
    let appendages = AppendageRegistry::default();
    let forward = Vec3f::NEG_Z;

    let mut y = -depth;
    let mut vy = 0.0_f32;
    let mut trace = Trace { depth: Vec::new(), vertical_velocity: Vec::new(), first_force: 0.0 };
    let ticks = (seconds / DT) as usize;
    for tick in 0..ticks {
        let current_depth = (-y).max(0.0);
        let velocity = Vec3f::new(0.0, vy, 0.0);
        let lift = buoyancy.compute(
            BuoyancyInputs {
                position: Vec3f::new(0.0, y, 0.0),
                velocity,
                forward,
                right: Vec3f::X,
                target_depth: 0.0,
            },
            &ocean,
        );
        let hull = drag.compute(velocity, forward, current_depth, &appendages);
        let pump = ballast.update(0.0, current_depth, -vy, DT);
        if tick == 0 {
            trace.first_force = pump;
        }
        let fy = lift.force.y + hull.force.y - pump - MASS * G;
        vy += fy / MASS * DT;
        y += vy * DT;
        trace.depth.push((-y).max(0.0));
        trace.vertical_velocity.push(vy);
    }
    trace
}

#[test]
fn deep_boat_gets_a_strong_upward_push() {
    let t = ascend_from(200.0, 0.1);
    assert!(t.first_force < -3.5e6, "first ballast force {}", t.first_force);
}

#[test]
fn ascent_reaches_the_surface_without_hunting() {
    let t = ascend_from(200.0, 320.0);
    let at = |s: f32| ((s / DT) as usize).min(t.depth.len() - 1);

    assert!(t.depth[at(100.0)] < t.depth[at(30.0)], "no progress toward the surface");
    let final_depth = *t.depth.last().unwrap_or(&f32::NAN);
    assert!(final_depth < 3.0, "final depth {final_depth}");

    let mut changes = 0;
    let mut last_sign = 0.0_f32;
    for &vy in &t.vertical_velocity[at(30.0)..] {
        if vy.abs() < 0.05 {
            continue;
        }
        let sign = vy.signum();
        if last_sign != 0.0 && sign != last_sign {
            changes += 1;
        }
        last_sign = sign;
    }
    assert!(changes <= 3, "vertical velocity changed sign {changes} times after 30 s");
}
