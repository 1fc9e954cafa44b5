//! Energy accounting and drift diagnostics
//!
//! Potential energy here is the unsoftened pairwise sum with a tiny epsilon
//! guard, so it is a check on the integrator rather than the exact conserved
//! quantity of the softened force law. The history never feeds back into the
//! physics.

use crate::body::Body;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Guard added to pair separations in the potential energy sum
pub const POTENTIAL_EPSILON: f64 = 1e-10;

/// Number of total-energy samples kept by default
pub const DEFAULT_HISTORY_CAPACITY: usize = 200;

/// Total kinetic energy, Σ ½ m |v|²
pub fn kinetic_energy<const D: usize>(bodies: &[Body<D>]) -> f64 {
    bodies.iter().map(|b| b.kinetic_energy()).sum()
}

/// Total potential energy, Σ_{i<j} -G m_i m_j / (|r_ij| + ε)
pub fn potential_energy<const D: usize>(bodies: &[Body<D>], g: f64) -> f64 {
    bodies
        .iter()
        .enumerate()
        .flat_map(|(i, a)| {
            bodies[i + 1..]
                .iter()
                .map(move |b| -g * a.mass * b.mass / (a.distance_to(b) + POTENTIAL_EPSILON))
        })
        .sum()
}

/// Instantaneous energy breakdown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnergySample {
    pub kinetic: f64,
    pub potential: f64,
    pub total: f64,
}

impl EnergySample {
    /// Measures the energy of `bodies` under gravitational constant `g`
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::{Body, BodyId};
    /// use nbody::color::Color;
    /// use nbody::energy::EnergySample;
    /// use nalgebra::Vector2;
    ///
    /// let a = Body::new(BodyId(0), 10.0, Vector2::new(0.0, 0.0), Vector2::new(1.0, 0.0), Color::RED, 150).unwrap();
    /// let b = Body::new(BodyId(1), 10.0, Vector2::new(100.0, 0.0), Vector2::new(-1.0, 0.0), Color::BLUE, 150).unwrap();
    ///
    /// let sample = EnergySample::measure(&[a, b], 1.0);
    /// assert!((sample.kinetic - 10.0).abs() < 1e-12);
    /// assert!((sample.potential + 1.0).abs() < 1e-9);
    /// ```
    pub fn measure<const D: usize>(bodies: &[Body<D>], g: f64) -> Self {
        let kinetic = kinetic_energy(bodies);
        let potential = potential_energy(bodies, g);
        Self {
            kinetic,
            potential,
            total: kinetic + potential,
        }
    }
}

/// Rolling history of total energy, oldest sample first
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyAccountant {
    history: VecDeque<f64>,
    capacity: usize,
}

impl EnergyAccountant {
    pub fn new(capacity: usize) -> Self {
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends the sample's total energy, evicting the oldest beyond capacity
    pub fn record(&mut self, sample: &EnergySample) {
        self.history.push_back(sample.total);
        while self.history.len() > self.capacity {
            self.history.pop_front();
        }
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    pub fn samples(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.history.iter().copied()
    }

    pub fn latest(&self) -> Option<f64> {
        self.history.back().copied()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Relative change between the oldest and newest retained samples
    ///
    /// Returns `None` with fewer than two samples or when the oldest sample
    /// is exactly zero.
    pub fn relative_drift(&self) -> Option<f64> {
        if self.history.len() < 2 {
            return None;
        }
        let oldest = *self.history.front()?;
        let newest = *self.history.back()?;
        (oldest != 0.0).then(|| (newest - oldest) / oldest.abs())
    }
}

impl Default for EnergyAccountant {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_CAPACITY)
    }
}
