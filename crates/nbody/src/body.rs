use crate::color::Color;
use crate::error::{Result, SimulationError};
use crate::viewport::Viewport;
use nalgebra::{Point2, SVector};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

/// Maximum number of projected points a trail keeps
pub const DEFAULT_TRAIL_CAPACITY: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

impl fmt::Display for BodyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Bounded history of screen-space positions, oldest first
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<Point2<f64>>,
    capacity: usize,
}

impl Trail {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a point, evicting the oldest points beyond capacity
    pub fn push(&mut self, point: Point2<f64>) {
        self.points.push_back(point);
        while self.points.len() > self.capacity {
            self.points.pop_front();
        }
    }

    /// Appends another trail after this one, keeping the newest points
    pub fn extend_from(&mut self, other: &Trail) {
        other.points.iter().for_each(|&p| self.push(p));
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn latest(&self) -> Option<Point2<f64>> {
        self.points.back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point2<f64>> {
        self.points.iter()
    }
}

/// A point mass in a `D`-dimensional world
#[derive(Debug, Clone, PartialEq)]
pub struct Body<const D: usize> {
    pub id: BodyId,
    pub mass: f64,
    pub position: SVector<f64, D>,
    pub velocity: SVector<f64, D>,
    pub color: Color,
    pub trail: Trail,
}

impl<const D: usize> Body<D> {
    /// Creates a body with an empty trail
    ///
    /// # Errors
    ///
    /// Returns `SimulationError::InvalidMass` if `mass` is not strictly
    /// positive and finite, and `SimulationError::NonFiniteComponent` if
    /// `position` or `velocity` holds a NaN or infinite component.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::body::{Body, BodyId};
    /// use nbody::color::Color;
    /// use nalgebra::Vector2;
    ///
    /// let body = Body::new(BodyId(0), 10.0, Vector2::new(1.0, 2.0), Vector2::zeros(), Color::RED, 150)
    ///     .unwrap();
    /// assert!(body.trail.is_empty());
    ///
    /// assert!(Body::new(BodyId(1), 0.0, Vector2::zeros(), Vector2::zeros(), Color::RED, 150).is_err());
    /// ```
    pub fn new(
        id: BodyId,
        mass: f64,
        position: SVector<f64, D>,
        velocity: SVector<f64, D>,
        color: Color,
        trail_capacity: usize,
    ) -> Result<Self> {
        let mass = validate_mass(mass)?;
        validate_vector(&position)?;
        validate_vector(&velocity)?;
        Ok(Self {
            id,
            mass,
            position,
            velocity,
            color,
            trail: Trail::new(trail_capacity),
        })
    }

    pub fn momentum(&self) -> SVector<f64, D> {
        self.velocity * self.mass
    }

    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    pub fn distance_to(&self, other: &Body<D>) -> f64 {
        (other.position - self.position).norm()
    }

    /// Records the current screen projection at the end of the trail
    pub fn record_trail(&mut self, viewport: &Viewport) {
        self.trail.push(viewport.project(&self.position));
    }
}

pub fn validate_mass(mass: f64) -> Result<f64> {
    if mass.is_finite() && mass > 0.0 {
        Ok(mass)
    } else {
        Err(SimulationError::InvalidMass(mass))
    }
}

/// One NaN component would spread to every body through the force sums
pub fn validate_vector<const D: usize>(vector: &SVector<f64, D>) -> Result<()> {
    match vector.iter().find(|c| !c.is_finite()) {
        Some(&component) => Err(SimulationError::NonFiniteComponent(component)),
        None => Ok(()),
    }
}
