//! Mapping from physical units to the window
//!
//! Owned by the front end; the physics core never sees these values.

use std::fmt;

use glam::{DVec2, Vec2};
use solar_system::{Body, BodyKind};

/// Meters per pixel at the default zoom: 1 AU spans 100 px
pub const DEFAULT_ORBIT_SCALE: f64 = 1.496e9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DisplayError {
    /// A scale factor was zero, negative or not finite
    InvalidScale { name: &'static str, value: f64 },
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScale { name, value } => {
                write!(f, "{name} must be positive and finite, got {value}")
            }
        }
    }
}

impl std::error::Error for DisplayError {}

fn check_scale(name: &'static str, value: f64) -> Result<f64, DisplayError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DisplayError::InvalidScale { name, value })
    }
}

/// Orbit and body-size scaling, adjusted at runtime by the zoom controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayConfig {
    orbit_scale: f64, // m per px
    size_scale: f64,
    /// Star radius (km) per pixel at size scale 1
    pub star_size_divisor: f64,
    /// Planet radius (km) per pixel at size scale 1
    pub planet_size_divisor: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            orbit_scale: DEFAULT_ORBIT_SCALE,
            size_scale: 1.0,
            star_size_divisor: 30_000.0,
            planet_size_divisor: 500.0,
        }
    }
}

impl DisplayConfig {
    pub fn orbit_scale(&self) -> f64 {
        self.orbit_scale
    }

    pub fn size_scale(&self) -> f64 {
        self.size_scale
    }

    pub fn set_orbit_scale(&mut self, meters_per_pixel: f64) -> Result<(), DisplayError> {
        self.orbit_scale = check_scale("orbit scale", meters_per_pixel)?;
        Ok(())
    }

    pub fn set_size_scale(&mut self, scale: f64) -> Result<(), DisplayError> {
        self.size_scale = check_scale("size scale", scale)?;
        Ok(())
    }

    /// Zoom the orbit view; factors above 1 zoom in
    pub fn zoom(&mut self, factor: f64) -> Result<(), DisplayError> {
        let factor = check_scale("zoom factor", factor)?;
        self.set_orbit_scale(self.orbit_scale / factor)
    }

    /// Pixel offset of `position` from the window centre, y pointing down
    pub fn project(&self, position: DVec2) -> Vec2 {
        (position / self.orbit_scale).as_vec2()
    }

    /// Absolute window coordinates of `position` in a `width`×`height` window
    pub fn to_screen(&self, position: DVec2, width: f32, height: f32) -> Vec2 {
        self.project(position) + Vec2::new(width / 2.0, height / 2.0)
    }

    /// Drawn radius of `body` in pixels
    pub fn body_radius_px(&self, body: &Body) -> f32 {
        let divisor = match body.kind() {
            BodyKind::Star => self.star_size_divisor,
            BodyKind::Planet => self.planet_size_divisor,
        };
        (body.radius_km() / divisor * self.size_scale) as f32
    }
}
