//! Time integration for N-body systems
//!
//! The world advances with semi-implicit (symplectic) Euler: velocities are
//! kicked by the current forces first, then positions drift with the updated
//! velocities. That ordering keeps the energy error bounded over long runs.
//! Plain explicit Euler is kept as a reference for comparison.

use crate::body::Body;
use crate::forces::ForceModel;
use nalgebra::SVector;

/// A time integrator for N-body systems
///
/// `advance` consumes forces that were computed beforehand from a single
/// snapshot of positions, so no body sees another's updated position within
/// the same step.
pub trait Integrator: Send + Sync {
    /// Advance every body by `dt` given its net force
    ///
    /// # Arguments
    ///
    /// * `bodies` - Bodies to update in place
    /// * `forces` - Net force on each body, index-aligned with `bodies`
    /// * `dt` - Timestep in simulation units
    fn advance<const D: usize>(
        &self,
        bodies: &mut [Body<D>],
        forces: &[SVector<f64, D>],
        dt: f64,
    );

    /// Compute forces from `force` and advance by one timestep
    fn step<const D: usize, F: ForceModel<D>>(&self, bodies: &mut [Body<D>], force: &F, dt: f64) {
        let forces = force.net_forces(bodies);
        self.advance(bodies, &forces, dt);
    }

    /// Advance by `n_steps` timesteps
    fn integrate<const D: usize, F: ForceModel<D>>(
        &self,
        bodies: &mut [Body<D>],
        force: &F,
        dt: f64,
        n_steps: usize,
    ) {
        for _ in 0..n_steps {
            self.step(bodies, force, dt);
        }
    }
}

/// Semi-implicit (symplectic) Euler integrator
///
/// 1. Kick: v(t + dt) = v(t) + F(t) / m * dt
/// 2. Drift: x(t + dt) = x(t) + v(t + dt) * dt
///
/// # Examples
///
/// ```
/// use nbody::body::{Body, BodyId};
/// use nbody::color::Color;
/// use nbody::integrator::{Integrator, SemiImplicitEuler};
/// use nalgebra::Vector2;
///
/// let mut bodies = [Body::new(BodyId(0), 2.0, Vector2::zeros(), Vector2::zeros(), Color::RED, 150).unwrap()];
/// SemiImplicitEuler.advance(&mut bodies, &[Vector2::new(4.0, 0.0)], 0.5);
///
/// // The drift already uses the kicked velocity
/// assert_eq!(bodies[0].velocity.x, 1.0);
/// assert_eq!(bodies[0].position.x, 0.5);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SemiImplicitEuler;

impl Integrator for SemiImplicitEuler {
    fn advance<const D: usize>(
        &self,
        bodies: &mut [Body<D>],
        forces: &[SVector<f64, D>],
        dt: f64,
    ) {
        debug_assert_eq!(bodies.len(), forces.len());

        bodies
            .iter_mut()
            .zip(forces.iter())
            .for_each(|(body, force)| {
                let accel = *force / body.mass;
                body.velocity += accel * dt;
                body.position += body.velocity * dt;
            });
    }
}

/// Explicit Euler integrator (1st order, for comparison only)
///
/// Positions drift with the old velocity before the kick. Energy grows
/// steadily on bound orbits; use `SemiImplicitEuler` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitEuler;

impl Integrator for ExplicitEuler {
    fn advance<const D: usize>(
        &self,
        bodies: &mut [Body<D>],
        forces: &[SVector<f64, D>],
        dt: f64,
    ) {
        debug_assert_eq!(bodies.len(), forces.len());

        bodies
            .iter_mut()
            .zip(forces.iter())
            .for_each(|(body, force)| {
                body.position += body.velocity * dt;
                body.velocity += *force / body.mass * dt;
            });
    }
}
