//! Common utilities for the simulation front ends
//!
//! Window and GPU bootstrap, the 2D camera, and small buffer helpers shared
//! by every binary that draws a simulation.

pub mod graphics;
pub mod camera;

pub use graphics::*;
pub use camera::*;
