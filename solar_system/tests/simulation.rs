use approx::assert_relative_eq;
use glam::DVec2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use solar_system::config::{ASTRONOMICAL_UNIT, GRAVITATIONAL_CONSTANT};
use solar_system::{
    accumulate_force, compute_force, presets, Body, PhysicsConfig, Simulation, TrailRetention,
};

const SUN_MASS: f64 = 1.989e30;
const EARTH_MASS: f64 = 5.972e24;

/// Sun at the origin, Earth at -1 AU moving along +y
fn sun_and_earth(config: PhysicsConfig, speed: f64) -> Simulation {
    let sun = Body::star("Sun", SUN_MASS, 695_950.0, DVec2::ZERO).unwrap();
    let earth = Body::planet(
        "Earth",
        EARTH_MASS,
        6371.0,
        DVec2::new(-ASTRONOMICAL_UNIT, 0.0),
        DVec2::new(0.0, speed),
    )
    .unwrap();
    Simulation::new(vec![sun, earth], config).unwrap()
}

fn full_system(config: PhysicsConfig) -> Simulation {
    let bodies = presets::solar_system(&config)
        .unwrap()
        .into_iter()
        .map(|p| p.body)
        .collect();
    Simulation::new(bodies, config).unwrap()
}

// ==================================================================================
// Single tick
// ==================================================================================

#[test]
fn one_day_of_earth_motion() {
    let mut sim = sun_and_earth(PhysicsConfig::default(), 29_780.0);
    sim.step().unwrap();

    // Independent evaluation of the same update
    let dt = 86_400.0;
    let r = ASTRONOMICAL_UNIT;
    let force = GRAVITATIONAL_CONSTANT * EARTH_MASS * SUN_MASS / (r * r);
    let vx = force / EARTH_MASS * dt;
    let vy = 29_780.0;
    let x = -ASTRONOMICAL_UNIT + vx * dt;
    let y = vy * dt;

    let earth = &sim.bodies()[1];
    assert_relative_eq!(earth.velocity().x, vx, max_relative = 1e-12);
    assert_relative_eq!(earth.velocity().y, vy, max_relative = 1e-12);
    assert_relative_eq!(earth.position().x, x, max_relative = 1e-12);
    assert_relative_eq!(earth.position().y, y, max_relative = 1e-12);

    // Pulled toward the star: x moves from -1 AU toward 0
    assert!(earth.position().x > -ASTRONOMICAL_UNIT);
    assert_relative_eq!(earth.position().x, -149_555_720_286.25, max_relative = 1e-9);
    assert_relative_eq!(earth.position().y, 2_572_992_000.0, max_relative = 1e-12);
    assert_eq!(earth.trail().len(), 1);
}

// ==================================================================================
// Long-running behaviour
// ==================================================================================

#[test]
fn circular_orbit_stays_near_one_au() {
    let circular = (GRAVITATIONAL_CONSTANT * SUN_MASS / ASTRONOMICAL_UNIT).sqrt();
    let mut sim = sun_and_earth(PhysicsConfig::default(), circular);

    // Ten years of daily ticks
    for _ in 0..3650 {
        sim.step().unwrap();
        let r = sim.bodies()[1].position().length();
        let ratio = r / ASTRONOMICAL_UNIT;
        assert!(
            (0.98..=1.02).contains(&ratio),
            "orbit drifted to {ratio} AU after {} ticks",
            sim.ticks()
        );
    }
}

#[test]
fn identical_runs_are_bit_identical() {
    let mut a = full_system(PhysicsConfig::default());
    let mut b = full_system(PhysicsConfig::default());

    a.advance(500).unwrap();
    b.advance(500).unwrap();

    for (x, y) in a.bodies().iter().zip(b.bodies()) {
        assert_eq!(x.position(), y.position());
        assert_eq!(x.velocity(), y.velocity());
        assert_eq!(x.trail(), y.trail());
        assert_eq!(x.distance_to_primary(), y.distance_to_primary());
    }
}

#[test]
fn scaled_down_constants() {
    // G = 1, unit masses: a test-sized system with round numbers
    let config = PhysicsConfig::default()
        .with_gravitational_constant(1.0)
        .with_timestep(0.01);
    let sun = Body::star("Sun", 100.0, 1.0, DVec2::ZERO).unwrap();
    let planet = Body::planet("P", 1.0, 1.0, DVec2::new(1.0, 0.0), DVec2::new(0.0, 10.0)).unwrap();
    let mut sim = Simulation::new(vec![sun, planet], config).unwrap();

    sim.step().unwrap();

    // a = -100 along x; v = (-1, 10); x = (0.99, 0.1)
    let p = &sim.bodies()[1];
    assert_relative_eq!(p.velocity().x, -1.0, epsilon = 1e-12);
    assert_relative_eq!(p.position().x, 0.99, epsilon = 1e-12);
    assert_relative_eq!(p.position().y, 0.1, epsilon = 1e-12);
}

// ==================================================================================
// Force accumulation
// ==================================================================================

#[test]
fn accumulation_order_does_not_matter() {
    let config = PhysicsConfig::default();
    let bodies: Vec<Body> = presets::solar_system(&config)
        .unwrap()
        .into_iter()
        .map(|p| p.body)
        .collect();
    let earth = bodies.iter().find(|b| b.name() == "Earth").unwrap().clone();

    let reference: DVec2 = bodies
        .iter()
        .filter(|b| b.name() != "Earth")
        .map(|b| compute_force(&earth, b, GRAVITATIONAL_CONSTANT).unwrap())
        .fold(DVec2::ZERO, |acc, f| acc + f);

    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let mut shuffled = bodies.clone();
        shuffled.shuffle(&mut rng);

        let index = shuffled.iter().position(|b| b.name() == "Earth").unwrap();
        let primary = shuffled.iter().position(|b| b.name() == "Sun").unwrap();
        let net = accumulate_force(&shuffled, index, primary, GRAVITATIONAL_CONSTANT).unwrap();

        assert_relative_eq!(net.force.x, reference.x, max_relative = 1e-12);
        assert_relative_eq!(net.force.y, reference.y, epsilon = 1e-3 * reference.length());
        assert_relative_eq!(net.primary_distance.unwrap(), ASTRONOMICAL_UNIT);
    }
}

#[test]
fn planets_pull_on_each_other() {
    let config = PhysicsConfig::default();
    let mut alone = sun_and_earth(config, 29_780.0);

    let sun = Body::star("Sun", SUN_MASS, 695_950.0, DVec2::ZERO).unwrap();
    let earth = alone.bodies()[1].clone();
    let jupiter = Body::planet(
        "Jupiter",
        1898.6e24,
        71_492.0,
        DVec2::new(-1.5 * ASTRONOMICAL_UNIT, 0.0),
        DVec2::new(0.0, 24_000.0),
    )
    .unwrap();
    let mut crowded = Simulation::new(vec![sun, earth, jupiter], config).unwrap();

    alone.step().unwrap();
    crowded.step().unwrap();

    // Jupiter sits further out along -x, so Earth accelerates less toward +x
    assert!(crowded.bodies()[1].velocity().x < alone.bodies()[1].velocity().x);
}

// ==================================================================================
// Trails
// ==================================================================================

#[test]
fn trail_is_bounded_and_fifo_near_the_star() {
    let mut sim = sun_and_earth(PhysicsConfig::default(), 29_780.0);
    let mut visited = Vec::new();

    for _ in 0..250 {
        sim.step().unwrap();
        let earth = &sim.bodies()[1];
        visited.push(earth.position());
        assert!(earth.trail().len() <= 100);
    }

    let trail: Vec<DVec2> = sim.bodies()[1].trail().iter().copied().collect();
    assert_eq!(trail.len(), 100);
    assert_eq!(trail, visited[150..]);
}

#[test]
fn uniform_retention_bounds_distant_trails() {
    let mut sim = full_system(PhysicsConfig::default());
    sim.advance(1500).unwrap();

    let neptune = sim.find_body("Neptune").unwrap();
    let cap = sim.config().trail.capacity(neptune.radius_km());
    assert!(neptune.distance_to_primary() > sim.config().trail.near_primary_threshold);
    assert_eq!(neptune.trail().len(), cap);
}

#[test]
fn near_primary_retention_lets_distant_trails_grow() {
    let config = PhysicsConfig::default().with_trail_retention(TrailRetention::NearPrimaryOnly);
    let mut sim = full_system(config);
    sim.advance(1500).unwrap();

    let neptune = sim.find_body("Neptune").unwrap();
    assert_eq!(neptune.trail().len(), 1500);

    // Inner planets are still capped
    let mercury = sim.find_body("Mercury").unwrap();
    assert_eq!(mercury.trail().len(), config.trail.capacity(mercury.radius_km()));
}
