//! Physical constants and trail retention, passed explicitly into each tick

use crate::error::{Result, SimulationError};

/// Gravitational constant in m³/(kg·s²)
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11;

/// One astronomical unit in meters
pub const ASTRONOMICAL_UNIT: f64 = 1.496e11;

/// One simulated day per tick, in seconds
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Mean radius of the Earth in km, the reference size for trail length
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// When the trail capacity applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailRetention {
    /// Cap every trail, wherever the body is
    #[default]
    Uniform,
    /// Cap only while the body is within the near-primary threshold; trails of
    /// distant bodies grow without bound
    NearPrimaryOnly,
}

/// How many past positions a body keeps for trail rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrailPolicy {
    /// Trail length for a body with the reference radius
    pub base_length: usize,
    pub reference_radius_km: f64,
    /// Distance from the primary (m) below which a body counts as near it
    pub near_primary_threshold: f64,
    pub retention: TrailRetention,
}

impl Default for TrailPolicy {
    fn default() -> Self {
        Self {
            base_length: 100,
            reference_radius_km: EARTH_RADIUS_KM,
            near_primary_threshold: 5.0e11,
            retention: TrailRetention::Uniform,
        }
    }
}

impl TrailPolicy {
    /// Trail capacity for a body of the given radius: base_length · r / r_ref,
    /// truncated toward zero
    pub fn capacity(&self, radius_km: f64) -> usize {
        (self.base_length as f64 * radius_km / self.reference_radius_km) as usize
    }

    /// The cap to enforce for a body at `distance_to_primary`, or `None` when
    /// the trail is left unbounded
    pub fn cap_for(&self, radius_km: f64, distance_to_primary: f64) -> Option<usize> {
        match self.retention {
            TrailRetention::Uniform => Some(self.capacity(radius_km)),
            TrailRetention::NearPrimaryOnly => {
                (distance_to_primary <= self.near_primary_threshold)
                    .then(|| self.capacity(radius_km))
            }
        }
    }
}

/// Immutable physical configuration of a simulation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    pub gravitational_constant: f64,
    /// Meters per distance unit used for initial positions
    pub astronomical_unit: f64,
    /// Simulated seconds per tick
    pub timestep: f64,
    pub trail: TrailPolicy,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            astronomical_unit: ASTRONOMICAL_UNIT,
            timestep: SECONDS_PER_DAY,
            trail: TrailPolicy::default(),
        }
    }
}

impl PhysicsConfig {
    pub fn with_gravitational_constant(mut self, g: f64) -> Self {
        self.gravitational_constant = g;
        self
    }

    pub fn with_astronomical_unit(mut self, meters: f64) -> Self {
        self.astronomical_unit = meters;
        self
    }

    pub fn with_timestep(mut self, seconds: f64) -> Self {
        self.timestep = seconds;
        self
    }

    pub fn with_trail_policy(mut self, trail: TrailPolicy) -> Self {
        self.trail = trail;
        self
    }

    pub fn with_trail_retention(mut self, retention: TrailRetention) -> Self {
        self.trail.retention = retention;
        self
    }

    /// Reject constants that would make the integration meaningless
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("gravitational_constant", self.gravitational_constant),
            ("astronomical_unit", self.astronomical_unit),
            ("timestep", self.timestep),
            ("trail.reference_radius_km", self.trail.reference_radius_km),
            ("trail.near_primary_threshold", self.trail.near_primary_threshold),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}
