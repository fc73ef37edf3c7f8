//! Celestial bodies and their orbital trails

use std::collections::VecDeque;

use glam::DVec2;

use crate::config::PhysicsConfig;
use crate::error::{Result, SimulationError};

/// Whether a body is the star or one of its planets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
}

/// Construction inputs in the units a solar system is usually described in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InitialOrbit {
    /// Position in astronomical units
    pub position_au: DVec2,
    /// Orbital speed in km/s, applied along +y
    pub speed_km_s: f64,
}

impl InitialOrbit {
    pub fn on_x_axis(x_au: f64, speed_km_s: f64) -> Self {
        Self {
            position_au: DVec2::new(x_au, 0.0),
            speed_km_s,
        }
    }
}

/// A star or planet in the simulation
///
/// Mass and radius are fixed at construction. Position, velocity, the
/// distance to the primary and the trail change only through the
/// integrator.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String,
    kind: BodyKind,
    mass: f64,      // kg
    radius_km: f64, // km, only used for trail length and drawing
    pub(crate) position: DVec2,
    pub(crate) velocity: DVec2,
    pub(crate) distance_to_primary: f64,
    trail: VecDeque<DVec2>,
}

impl Body {
    /// Create a body at `position` (m) moving with `velocity` (m/s)
    pub fn new(
        name: &str,
        kind: BodyKind,
        mass: f64,
        radius_km: f64,
        position: DVec2,
        velocity: DVec2,
    ) -> Result<Self> {
        let invalid = |reason| SimulationError::InvalidBodyParameters {
            name: name.to_string(),
            reason,
        };

        if !mass.is_finite() || mass <= 0.0 {
            return Err(invalid("mass must be positive and finite"));
        }
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Err(invalid("radius must be positive and finite"));
        }
        if !position.is_finite() || !velocity.is_finite() {
            return Err(invalid("position and velocity must be finite"));
        }

        Ok(Self {
            name: name.to_string(),
            kind,
            mass,
            radius_km,
            position,
            velocity,
            distance_to_primary: 0.0,
            trail: VecDeque::new(),
        })
    }

    /// A stationary star at `position` (m)
    pub fn star(name: &str, mass: f64, radius_km: f64, position: DVec2) -> Result<Self> {
        Self::new(name, BodyKind::Star, mass, radius_km, position, DVec2::ZERO)
    }

    pub fn planet(
        name: &str,
        mass: f64,
        radius_km: f64,
        position: DVec2,
        velocity: DVec2,
    ) -> Result<Self> {
        Self::new(name, BodyKind::Planet, mass, radius_km, position, velocity)
    }

    /// Build a body from AU and km/s, scaled to SI units with `config`
    ///
    /// Stars ignore the orbital speed.
    pub fn from_orbit(
        name: &str,
        kind: BodyKind,
        mass: f64,
        radius_km: f64,
        orbit: InitialOrbit,
        config: &PhysicsConfig,
    ) -> Result<Self> {
        let position = orbit.position_au * config.astronomical_unit;
        let velocity = match kind {
            BodyKind::Star => DVec2::ZERO,
            BodyKind::Planet => DVec2::new(0.0, orbit.speed_km_s * 1000.0),
        };
        Self::new(name, kind, mass, radius_km, position, velocity)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    /// Planets are integrated every tick; the star stays put
    pub fn is_movable(&self) -> bool {
        self.kind == BodyKind::Planet
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }

    pub fn position(&self) -> DVec2 {
        self.position
    }

    pub fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Separation from the primary measured at the start of the last tick,
    /// 0 before the first one
    pub fn distance_to_primary(&self) -> f64 {
        self.distance_to_primary
    }

    /// Past positions, oldest first
    pub fn trail(&self) -> &VecDeque<DVec2> {
        &self.trail
    }

    /// Append `point` to the trail, then drop the oldest points while the
    /// trail is longer than `cap`
    pub fn record_trail_point(&mut self, point: DVec2, cap: Option<usize>) {
        self.trail.push_back(point);
        if let Some(cap) = cap {
            while self.trail.len() > cap {
                self.trail.pop_front();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_mass_and_radius() {
        let err = Body::planet("Ghost", 0.0, 1000.0, DVec2::X, DVec2::ZERO).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidBodyParameters { .. }));

        let err = Body::planet("Ghost", 1.0e20, -5.0, DVec2::X, DVec2::ZERO).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidBodyParameters { .. }));

        let err = Body::star("Ghost", f64::INFINITY, 1000.0, DVec2::ZERO).unwrap_err();
        assert!(matches!(err, SimulationError::InvalidBodyParameters { .. }));
    }

    #[test]
    fn from_orbit_scales_to_si_units() {
        let config = PhysicsConfig::default();
        let earth = Body::from_orbit(
            "Earth",
            BodyKind::Planet,
            5.972e24,
            6371.0,
            InitialOrbit::on_x_axis(-1.0, 29.78),
            &config,
        )
        .unwrap();

        assert_eq!(earth.position(), DVec2::new(-1.496e11, 0.0));
        assert_eq!(earth.velocity(), DVec2::new(0.0, 29_780.0));
        assert_eq!(earth.distance_to_primary(), 0.0);
        assert!(earth.trail().is_empty());
        assert!(earth.is_movable());
    }

    #[test]
    fn stars_start_at_rest() {
        let sun = Body::from_orbit(
            "Sun",
            BodyKind::Star,
            1.989e30,
            695_950.0,
            InitialOrbit::on_x_axis(0.0, 12.0),
            &PhysicsConfig::default(),
        )
        .unwrap();

        assert_eq!(sun.velocity(), DVec2::ZERO);
        assert!(!sun.is_movable());
    }

    #[test]
    fn trail_evicts_oldest_first() {
        let mut body = Body::planet("Moon", 7.3e22, 1737.0, DVec2::X, DVec2::ZERO).unwrap();
        for i in 0..5 {
            body.record_trail_point(DVec2::splat(i as f64), Some(3));
        }

        let trail: Vec<DVec2> = body.trail().iter().copied().collect();
        assert_eq!(
            trail,
            vec![DVec2::splat(2.0), DVec2::splat(3.0), DVec2::splat(4.0)]
        );
    }

    #[test]
    fn uncapped_trail_keeps_everything() {
        let mut body = Body::planet("Moon", 7.3e22, 1737.0, DVec2::X, DVec2::ZERO).unwrap();
        for i in 0..50 {
            body.record_trail_point(DVec2::splat(i as f64), None);
        }
        assert_eq!(body.trail().len(), 50);
    }
}
