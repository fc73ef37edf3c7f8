//! Newtonian gravity between pairs of bodies

use glam::DVec2;

use crate::body::Body;
use crate::error::{Result, SimulationError};

/// Gravitational force exerted by `b` on `a`, in newtons
///
/// F = G·m_a·m_b / r², directed from `a` toward `b`. Coincident bodies have no
/// defined direction and are reported as [`SimulationError::DegenerateGeometry`].
pub fn compute_force(a: &Body, b: &Body, gravitational_constant: f64) -> Result<DVec2> {
    let d = b.position() - a.position();
    let r = d.length();

    let magnitude = gravitational_constant * a.mass() * b.mass() / (r * r);

    // r² underflows to zero for distinct but extremely close positions
    if r == 0.0 || !magnitude.is_finite() {
        return Err(SimulationError::DegenerateGeometry {
            first: a.name().to_string(),
            second: b.name().to_string(),
        });
    }

    let alpha = d.y.atan2(d.x);
    Ok(DVec2::new(magnitude * alpha.cos(), magnitude * alpha.sin()))
}

/// Total force on one body plus its separation from the primary
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetForce {
    pub force: DVec2,
    /// Set when the primary is a different body from the one the force acts on
    pub primary_distance: Option<f64>,
}

/// Sum the pull of every other body in `bodies` on `bodies[index]`
///
/// The distance to `bodies[primary]` comes back alongside the force so the
/// caller can record it; nothing here mutates a body.
pub fn accumulate_force(
    bodies: &[Body],
    index: usize,
    primary: usize,
    gravitational_constant: f64,
) -> Result<NetForce> {
    let len = bodies.len();
    let body = bodies
        .get(index)
        .ok_or(SimulationError::BodyIndexOutOfRange { index, len })?;
    let primary_body = bodies
        .get(primary)
        .ok_or(SimulationError::BodyIndexOutOfRange { index: primary, len })?;
    let mut force = DVec2::ZERO;

    for (j, other) in bodies.iter().enumerate() {
        if j == index {
            continue;
        }
        force += compute_force(body, other, gravitational_constant)?;
    }

    let primary_distance =
        (primary != index).then(|| primary_body.position().distance(body.position()));

    Ok(NetForce {
        force,
        primary_distance,
    })
}
