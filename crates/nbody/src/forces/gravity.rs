//! Softened Newtonian gravity (direct O(N²) evaluation)

use crate::body::Body;
use crate::forces::{ForceModel, DEFAULT_G, DEFAULT_SOFTENING};
use nalgebra::SVector;

/// Plummer-softened point-mass gravity
///
/// The separation used in the force law is `sqrt(|r|² + ε²)`, so the force
/// stays finite (and goes to zero) as two bodies approach each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftenedGravity {
    /// Gravitational constant in simulation units
    pub g: f64,
    /// Softening length ε in simulation units
    pub softening: f64,
}

impl SoftenedGravity {
    pub fn new(g: f64, softening: f64) -> Self {
        Self { g, softening }
    }
}

impl Default for SoftenedGravity {
    fn default() -> Self {
        Self::new(DEFAULT_G, DEFAULT_SOFTENING)
    }
}

impl<const D: usize> ForceModel<D> for SoftenedGravity {
    fn force(&self, a: &Body<D>, b: &Body<D>) -> SVector<f64, D> {
        let r_vec = b.position - a.position;
        let r = (r_vec.norm_squared() + self.softening * self.softening).sqrt();
        r_vec * (self.g * a.mass * b.mass / (r * r * r))
    }
}
