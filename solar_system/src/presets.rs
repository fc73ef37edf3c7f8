//! The Sun and its planets
//!
//! Positions are offsets along the x axis in AU and speeds are mean orbital
//! speeds in km/s. Planets start on alternating sides of the Sun.

use crate::body::{Body, BodyKind, InitialOrbit};
use crate::config::{PhysicsConfig, EARTH_RADIUS_KM};
use crate::error::Result;

/// A body together with the colour it is drawn in
#[derive(Debug, Clone)]
pub struct PresetBody {
    pub body: Body,
    pub color: [f32; 4],
}

struct BodyData {
    name: &'static str,
    kind: BodyKind,
    x_au: f64,
    mass: f64, // kg
    radius_km: f64,
    speed_km_s: f64,
    color: u32, // 0xRRGGBB
}

fn rgb(hex: u32) -> [f32; 4] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
        1.0,
    ]
}

const SOLAR_SYSTEM: &[BodyData] = &[
    BodyData {
        name: "Sun",
        kind: BodyKind::Star,
        x_au: 0.0,
        mass: 1.989e30,
        radius_km: 695_950.0,
        speed_km_s: 0.0,
        color: 0xFFCC33,
    },
    BodyData {
        name: "Mercury",
        kind: BodyKind::Planet,
        x_au: 0.39,
        mass: 0.33e24,
        radius_km: 2438.0,
        speed_km_s: 47.9,
        color: 0x8C8C94,
    },
    BodyData {
        name: "Venus",
        kind: BodyKind::Planet,
        x_au: 0.72,
        mass: 4.87e24,
        radius_km: 6052.0,
        speed_km_s: 35.0,
        color: 0xE39E1C,
    },
    BodyData {
        name: "Earth",
        kind: BodyKind::Planet,
        x_au: -1.0,
        mass: 5.972e24,
        radius_km: EARTH_RADIUS_KM,
        speed_km_s: 29.78,
        color: 0x009ACD,
    },
    BodyData {
        name: "Mars",
        kind: BodyKind::Planet,
        x_au: -1.52,
        mass: 0.64e24,
        radius_km: 3390.0,
        speed_km_s: 24.0,
        color: 0xC1440E,
    },
    BodyData {
        name: "Jupiter",
        kind: BodyKind::Planet,
        x_au: -5.2,
        mass: 1898.6e24,
        radius_km: 71_492.0,
        speed_km_s: 13.1,
        color: 0xD0A47A,
    },
    BodyData {
        name: "Saturn",
        kind: BodyKind::Planet,
        x_au: 9.54,
        mass: 586.0e24,
        radius_km: 60_268.0,
        speed_km_s: 9.7,
        color: 0xCEB8B8,
    },
    BodyData {
        name: "Uranus",
        kind: BodyKind::Planet,
        x_au: 19.2,
        mass: 86.62e24,
        radius_km: 24_973.0,
        speed_km_s: 6.8,
        color: 0x8DC9EE,
    },
    BodyData {
        name: "Neptune",
        kind: BodyKind::Planet,
        x_au: -30.06,
        mass: 102.42e24,
        radius_km: 24_764.0,
        speed_km_s: 5.4,
        color: 0x1F2255,
    },
];

const DWARF_PLANETS: &[BodyData] = &[BodyData {
    name: "Pluto",
    kind: BodyKind::Planet,
    x_au: 39.0,
    mass: 0.01e24,
    radius_km: 1152.0,
    speed_km_s: 4.64,
    color: 0xC1CDCD,
}];

fn build(data: &[BodyData], config: &PhysicsConfig) -> Result<Vec<PresetBody>> {
    data.iter()
        .map(|d| {
            let body = Body::from_orbit(
                d.name,
                d.kind,
                d.mass,
                d.radius_km,
                InitialOrbit::on_x_axis(d.x_au, d.speed_km_s),
                config,
            )?;
            Ok(PresetBody {
                body,
                color: rgb(d.color),
            })
        })
        .collect()
}

/// The Sun followed by Mercury through Neptune
pub fn solar_system(config: &PhysicsConfig) -> Result<Vec<PresetBody>> {
    build(SOLAR_SYSTEM, config)
}

/// Bodies left out of the default system
pub fn dwarf_planets(config: &PhysicsConfig) -> Result<Vec<PresetBody>> {
    build(DWARF_PLANETS, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::Simulation;

    #[test]
    fn solar_system_has_one_star_and_eight_planets() {
        let bodies = solar_system(&PhysicsConfig::default()).unwrap();
        assert_eq!(bodies.len(), 9);
        assert_eq!(bodies[0].body.kind(), BodyKind::Star);
        assert!(bodies[1..].iter().all(|p| p.body.kind() == BodyKind::Planet));
    }

    #[test]
    fn solar_system_builds_a_valid_simulation() {
        let config = PhysicsConfig::default();
        let bodies = solar_system(&config)
            .unwrap()
            .into_iter()
            .map(|p| p.body)
            .collect();

        let mut sim = Simulation::new(bodies, config).unwrap();
        sim.advance(30).unwrap();
        assert_eq!(sim.primary().name(), "Sun");
    }

    #[test]
    fn earth_keeps_the_reference_trail_length() {
        let config = PhysicsConfig::default();
        let bodies = solar_system(&config).unwrap();
        let earth = bodies.iter().find(|p| p.body.name() == "Earth").unwrap();
        let venus = bodies.iter().find(|p| p.body.name() == "Venus").unwrap();

        assert_eq!(earth.body.radius_km(), EARTH_RADIUS_KM);
        assert_ne!(earth.body.radius_km(), venus.body.radius_km());
        assert_eq!(config.trail.capacity(earth.body.radius_km()), 100);
    }

    #[test]
    fn pluto_is_kept_separate() {
        let config = PhysicsConfig::default();
        let dwarfs = dwarf_planets(&config).unwrap();
        assert_eq!(dwarfs.len(), 1);
        assert_eq!(dwarfs[0].body.name(), "Pluto");
        assert!(solar_system(&config)
            .unwrap()
            .iter()
            .all(|p| p.body.name() != "Pluto"));
    }
}
