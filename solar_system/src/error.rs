//! Errors raised by the physics core

use std::fmt;

/// Everything that can stop a simulation from being built or advanced
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Two bodies share a position, so the force between them is undefined
    DegenerateGeometry { first: String, second: String },
    /// A body was constructed with an unusable mass or radius
    InvalidBodyParameters { name: String, reason: &'static str },
    /// No body is marked as the star
    MissingPrimary,
    /// More than one body is marked as the star
    MultiplePrimaries { count: usize },
    /// The body chosen as primary is a planet
    PrimaryNotStar { name: String },
    /// A body index past the end of the body set
    BodyIndexOutOfRange { index: usize, len: usize },
    /// A physical constant is zero, negative or not finite
    InvalidConfig { field: &'static str, value: f64 },
}

impl fmt::Display for SimulationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DegenerateGeometry { first, second } => {
                write!(f, "bodies '{first}' and '{second}' occupy the same position")
            }
            Self::InvalidBodyParameters { name, reason } => {
                write!(f, "invalid parameters for body '{name}': {reason}")
            }
            Self::MissingPrimary => write!(f, "simulation has no star to orbit"),
            Self::MultiplePrimaries { count } => {
                write!(f, "simulation needs exactly one star, found {count}")
            }
            Self::PrimaryNotStar { name } => write!(f, "primary body '{name}' is not a star"),
            Self::BodyIndexOutOfRange { index, len } => {
                write!(f, "body index {index} out of range for {len} bodies")
            }
            Self::InvalidConfig { field, value } => {
                write!(f, "invalid physics configuration: {field} = {value}")
            }
        }
    }
}

impl std::error::Error for SimulationError {}

pub type Result<T> = std::result::Result<T, SimulationError>;
