//! Star and planet gravity simulation
//!
//! The physics core of a two-dimensional solar system: bodies carry mass,
//! radius, position, velocity and a bounded trail of visited positions.
//! Every tick sums Newtonian gravity over all pairs, then advances each
//! planet with a fixed-timestep Euler update.
//!
//! Rendering, input and frame pacing live in the `solar_system` binary and
//! only read the state exposed here.

pub mod body;
pub mod config;
pub mod error;
pub mod force;
pub mod integrator;
pub mod presets;
pub mod readout;
pub mod simulation;

pub use body::{Body, BodyKind, InitialOrbit};
pub use config::{PhysicsConfig, TrailPolicy, TrailRetention};
pub use error::{Result, SimulationError};
pub use force::{accumulate_force, compute_force, NetForce};
pub use integrator::integrate;
pub use simulation::{step, Simulation};
