//! The nine force/torque producers and guards the controller sequences.

pub mod appendages;
pub mod ballast;
pub mod buoyancy;
pub mod dive_planes;
pub mod drag;
pub mod hull_lift;
pub mod propulsion;
pub mod rudder;
pub mod validator;

pub use appendages::AppendageRegistry;
pub use ballast::Ballast;
pub use buoyancy::{submersion_ratio, Buoyancy, BuoyancyInputs};
pub use dive_planes::{DivePlanes, PlaneCommand, PlaneInputs};
pub use drag::HydroDrag;
pub use hull_lift::HullLift;
pub use propulsion::Propulsion;
pub use rudder::Rudder;
pub use validator::{is_finite, StateValidator};
