//! One-tick orchestration over the whole body set

use crate::body::{Body, BodyKind};
use crate::config::PhysicsConfig;
use crate::error::{Result, SimulationError};
use crate::force::{accumulate_force, compute_force, NetForce};
use crate::integrator::integrate;

/// Advance every movable body in `bodies` by one timestep
///
/// Forces for all planets are computed first, from positions as they were at
/// the start of the tick, and only then applied. If any pair of bodies
/// coincides the tick is abandoned and no body is changed.
///
/// `primary` must index a [`BodyKind::Star`] and `config` must pass
/// [`PhysicsConfig::validate`]; otherwise nothing is changed either.
pub fn step(bodies: &mut [Body], primary: usize, config: &PhysicsConfig) -> Result<()> {
    config.validate()?;
    match bodies.get(primary) {
        None => {
            return Err(SimulationError::BodyIndexOutOfRange {
                index: primary,
                len: bodies.len(),
            })
        }
        Some(body) if body.kind() != BodyKind::Star => {
            return Err(SimulationError::PrimaryNotStar {
                name: body.name().to_string(),
            })
        }
        Some(_) => {}
    }

    let forces: Vec<(usize, NetForce)> = (0..bodies.len())
        .filter(|&i| bodies[i].is_movable())
        .map(|i| {
            accumulate_force(bodies, i, primary, config.gravitational_constant)
                .map(|net| (i, net))
        })
        .collect::<Result<_>>()?;

    for (i, net) in forces {
        let body = &mut bodies[i];
        if let Some(distance) = net.primary_distance {
            body.distance_to_primary = distance;
        }
        integrate(body, net.force, config.timestep, &config.trail);
    }

    Ok(())
}

/// A star with its planets, advanced one fixed timestep at a time
#[derive(Debug, Clone)]
pub struct Simulation {
    bodies: Vec<Body>,
    primary: usize,
    config: PhysicsConfig,
    ticks: u64,
}

impl Simulation {
    /// Build a simulation around the single star in `bodies`
    pub fn new(bodies: Vec<Body>, config: PhysicsConfig) -> Result<Self> {
        config.validate()?;

        let stars: Vec<usize> = bodies
            .iter()
            .enumerate()
            .filter(|(_, body)| body.kind() == BodyKind::Star)
            .map(|(i, _)| i)
            .collect();

        let primary = match stars.as_slice() {
            [] => return Err(SimulationError::MissingPrimary),
            [primary] => *primary,
            _ => return Err(SimulationError::MultiplePrimaries { count: stars.len() }),
        };

        // Every pair must be separated before the first force is computed
        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                compute_force(a, b, config.gravitational_constant)?;
            }
        }

        log::info!(
            "Simulation ready: {} bodies around '{}', dt = {} s",
            bodies.len(),
            bodies[primary].name(),
            config.timestep
        );

        Ok(Self {
            bodies,
            primary,
            config,
            ticks: 0,
        })
    }

    /// Advance by one tick
    pub fn step(&mut self) -> Result<()> {
        step(&mut self.bodies, self.primary, &self.config)?;
        self.ticks += 1;
        log::trace!("tick {} complete", self.ticks);
        Ok(())
    }

    /// Advance by `n` ticks, stopping at the first failure
    pub fn advance(&mut self, n: u64) -> Result<()> {
        for _ in 0..n {
            self.step()?;
        }
        Ok(())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn primary(&self) -> &Body {
        &self.bodies[self.primary]
    }

    pub fn primary_index(&self) -> usize {
        self.primary
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated seconds since the first tick
    pub fn elapsed(&self) -> f64 {
        self.ticks as f64 * self.config.timestep
    }

    /// Find body by name
    pub fn find_body(&self, name: &str) -> Option<&Body> {
        self.bodies.iter().find(|b| b.name() == name)
    }
}
