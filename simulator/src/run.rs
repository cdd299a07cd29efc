use anyhow::Result;
use physics::host::integrate;
use physics::{
    Ocean, Quatf, RigidBodyState, StillWater, SubmarineController, SurfacingStage, TickDebug,
    TickOutcome, VesselSnapshot,
};
use tracing::{info, warn};

use crate::Scenario;

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub class_name: String,
    pub ticks: u64,
    pub repaired_ticks: u64,
    pub max_pitch: f32,
    pub max_roll: f32,
    pub final_stage: SurfacingStage,
    pub final_state: VesselSnapshot,
}

pub fn run_scenario(scenario: &Scenario) -> Result<RunSummary> {
    let vessel = scenario.resolve_vessel()?;
    info!(class = %vessel.class_name, mass = vessel.mass, max_speed = vessel.max_speed, "vessel ready");

    let mut controller = SubmarineController::new(vessel.clone())?;
    for (name, multiplier) in &scenario.appendages {
        controller.appendages_mut().add(name.clone(), *multiplier);
    }

    // heading h is a rotation of -h about +Y
    let orientation = Quatf::from_rotation_y(-scenario.start.heading.to_radians());
    let mut state = RigidBodyState::at(scenario.start.position, orientation);
    state.velocity = state.forward() * scenario.start.speed;

    let sea = StillWater { level: scenario.sea_level };
    let mut swell = scenario.swell.map(|s| crate::Swell { base_level: scenario.sea_level, ..s });

    let dt = scenario.dt;
    let ticks = scenario.ticks();
    let report_every = ((scenario.report_every_s / dt).round() as u64).max(1);
    let mut summary = RunSummary {
        class_name: vessel.class_name.clone(),
        ticks,
        repaired_ticks: 0,
        max_pitch: 0.0,
        max_roll: 0.0,
        final_stage: SurfacingStage::Dive,
        final_state: controller.snapshot(&state, &Ocean::new(&sea)),
    };

    for tick in 0..ticks {
        let ocean = match &swell {
            Some(s) => Ocean::new(&sea).with_waves(s),
            None => Ocean::new(&sea),
        };
        let mut dbg = TickDebug::default();
        match controller.step_dbg(&mut state, &scenario.targets, &ocean, dt, tick, Some(&mut dbg)) {
            TickOutcome::Applied => {
                summary.max_pitch = summary.max_pitch.max(dbg.pitch.abs());
                summary.max_roll = summary.max_roll.max(dbg.roll.abs());
                summary.final_stage = dbg.stage;
            }
            TickOutcome::Repaired => {
                summary.repaired_ticks += 1;
                warn!(tick, "vessel state repaired; tick skipped");
            }
            TickOutcome::Skipped => warn!(tick, dt, "tick skipped"),
        }
        integrate(&mut state, vessel.mass, vessel.inertia, vessel.buoyancy.gravity, dt);

        if tick % report_every == 0 {
            let snap = controller.snapshot(&state, &ocean);
            info!(
                t = tick as f32 * dt,
                depth = snap.depth,
                heading = snap.heading,
                speed = snap.speed,
                pitch = dbg.pitch,
                stage = ?dbg.stage,
                ballast = dbg.ballast_force,
                "tick"
            );
        }
        if let Some(s) = swell.as_mut() {
            s.advance(dt);
        }
    }

    summary.final_state = controller.snapshot(&state, &Ocean::new(&sea));
    Ok(summary)
}
