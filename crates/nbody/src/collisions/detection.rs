//! Brute-force O(N²) contact detection

use crate::body::Body;

/// Separation below which two bodies are in contact (simulation units)
pub const DEFAULT_COLLISION_THRESHOLD: f64 = 10.0;

/// A detected contact between two bodies, by index into the scanned slice
///
/// `first < second` always holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub first: usize,
    pub second: usize,
    /// Euclidean distance between the two positions
    pub separation: f64,
}

/// Finds pairs of bodies closer than `threshold`
///
/// Pairs are visited in scan order: `(0, 1), (0, 2), ..., (1, 2), ...`.
///
/// # Examples
///
/// ```
/// use nbody::body::{Body, BodyId};
/// use nbody::collisions::ContactDetector;
/// use nbody::color::Color;
/// use nalgebra::Vector2;
///
/// let at = |id, x| Body::new(BodyId(id), 10.0, Vector2::new(x, 0.0), Vector2::zeros(), Color::RED, 150).unwrap();
/// let bodies = [at(0, 0.0), at(1, 50.0), at(2, 55.0)];
///
/// let contact = ContactDetector::default().first_contact(&bodies).unwrap();
/// assert_eq!((contact.first, contact.second), (1, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactDetector {
    pub threshold: f64,
}

impl ContactDetector {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    fn check_pair<const D: usize>(
        &self,
        bodies: &[Body<D>],
        first: usize,
        second: usize,
    ) -> Option<Contact> {
        let separation = bodies[first].distance_to(&bodies[second]);
        (separation < self.threshold).then_some(Contact {
            first,
            second,
            separation,
        })
    }

    /// The first contact in scan order, if any
    pub fn first_contact<const D: usize>(&self, bodies: &[Body<D>]) -> Option<Contact> {
        pairs(bodies.len()).find_map(|(i, j)| self.check_pair(bodies, i, j))
    }

    /// Every contact, in scan order
    pub fn contacts<const D: usize>(&self, bodies: &[Body<D>]) -> Vec<Contact> {
        pairs(bodies.len())
            .filter_map(|(i, j)| self.check_pair(bodies, i, j))
            .collect()
    }
}

impl Default for ContactDetector {
    fn default() -> Self {
        Self::new(DEFAULT_COLLISION_THRESHOLD)
    }
}

/// Unordered index pairs `(i, j)` with `i < j`
fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}
