//! Error types for world construction and mutation
//!
//! Every variant is raised by input validation before any state is touched.
//! The physics itself (forces, integration, collisions) never fails once its
//! inputs are valid; near-coincident bodies are handled by softening terms.

use crate::body::BodyId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    /// Body mass was zero, negative, or not a finite number
    #[error("body mass must be positive and finite, got {0}")]
    InvalidMass(f64),

    /// A position or velocity had the wrong number of components
    #[error("expected a {expected}-component vector, got {actual} components")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A position or velocity component was NaN or infinite
    #[error("vector components must be finite, got {0}")]
    NonFiniteComponent(f64),

    #[error("unsupported dimension {0}, only 2 and 3 are available")]
    UnsupportedDimension(usize),

    #[error("unknown dimension `{0}`")]
    UnknownDimension(String),

    /// The referenced body does not exist (never added, or consumed by a merge)
    #[error("no body with id {0}")]
    UnknownBody(BodyId),

    #[error("parameter `{name}` must be positive and finite, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("unknown collision mode `{0}`")]
    UnknownCollisionMode(String),

    #[error("cannot reset to an empty body set")]
    EmptyReset,
}

pub type Result<T> = std::result::Result<T, SimulationError>;
