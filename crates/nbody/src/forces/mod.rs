//! Force models for N-body simulations
//!
//! This module provides the `ForceModel` trait and the softened point-mass
//! gravity used by the world, along with the bounds on the gravitational
//! constant that interactive callers may set.

use crate::body::Body;
use nalgebra::SVector;

pub mod gravity;


pub use gravity::SoftenedGravity;

pub const DEFAULT_G: f64 = 1.0;
pub const G_MIN: f64 = 0.1;
pub const G_MAX: f64 = 2.0;

/// Softening length added in quadrature to every pair separation
pub const DEFAULT_SOFTENING: f64 = 5.0;

/// Clamps a requested gravitational constant into `[G_MIN, G_MAX]`
///
/// NaN maps to `G_MIN` so the stored constant is always in range.
///
/// # Examples
///
/// ```
/// use nbody::forces::clamp_gravitational_constant;
///
/// assert_eq!(clamp_gravitational_constant(-5.0), 0.1);
/// assert_eq!(clamp_gravitational_constant(100.0), 2.0);
/// assert_eq!(clamp_gravitational_constant(1.3), 1.3);
/// ```
pub fn clamp_gravitational_constant(g: f64) -> f64 {
    if g.is_nan() {
        G_MIN
    } else {
        g.clamp(G_MIN, G_MAX)
    }
}

/// A pairwise force between bodies of a `D`-dimensional system
///
/// Implementors supply `force`; net forces are brute-force sums over every
/// other body, which is fine for the handful of bodies this crate targets.
///
/// # Examples
///
/// ```
/// use nbody::body::{Body, BodyId};
/// use nbody::color::Color;
/// use nbody::forces::{ForceModel, SoftenedGravity};
/// use nalgebra::Vector2;
///
/// let a = Body::new(BodyId(0), 10.0, Vector2::new(0.0, 0.0), Vector2::zeros(), Color::RED, 150).unwrap();
/// let b = Body::new(BodyId(1), 10.0, Vector2::new(100.0, 0.0), Vector2::zeros(), Color::BLUE, 150).unwrap();
///
/// let gravity = SoftenedGravity::default();
/// let forces = gravity.net_forces(&[a, b]);
///
/// // Attraction: a is pulled toward +x, b toward -x
/// assert!(forces[0].x > 0.0);
/// assert!(forces[1].x < 0.0);
/// ```
pub trait ForceModel<const D: usize>: Send + Sync {
    /// Force exerted by `b` on `a`
    fn force(&self, a: &Body<D>, b: &Body<D>) -> SVector<f64, D>;

    /// Net force on the body at `idx` from every other body
    fn net_force(&self, idx: usize, bodies: &[Body<D>]) -> SVector<f64, D> {
        let body = &bodies[idx];
        bodies
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != idx)
            .map(|(_, other)| self.force(body, other))
            .fold(SVector::zeros(), |acc, f| acc + f)
    }

    /// Net forces for all bodies, evaluated against the same snapshot
    fn net_forces(&self, bodies: &[Body<D>]) -> Vec<SVector<f64, D>> {
        (0..bodies.len())
            .map(|i| self.net_force(i, bodies))
            .collect()
    }
}
