//! Collision resolution by merger or elastic impulse
//!
//! Merging is perfectly inelastic and conserves:
//! - Total mass: m_new = m_a + m_b
//! - Momentum: p_new = p_a + p_b
//! - Center of mass (the merged body sits at the barycenter)
//!
//! Elastic impulses conserve momentum and, for a head-on contact, kinetic
//! energy. Positions are never moved, only velocities.

use crate::body::{Body, BodyId};
use crate::collisions::ContactDetector;
use crate::error::SimulationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Guard added to the contact distance when normalizing the contact normal
pub const NORMAL_EPSILON: f64 = 1e-10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Colliding bodies fuse into one
    #[default]
    Merge,
    /// Colliding bodies exchange a normal impulse and keep flying
    Elastic,
}

impl CollisionMode {
    pub fn toggled(self) -> Self {
        match self {
            CollisionMode::Merge => CollisionMode::Elastic,
            CollisionMode::Elastic => CollisionMode::Merge,
        }
    }
}

impl fmt::Display for CollisionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionMode::Merge => f.write_str("merge"),
            CollisionMode::Elastic => f.write_str("elastic"),
        }
    }
}

impl FromStr for CollisionMode {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "merge" => Ok(CollisionMode::Merge),
            "elastic" => Ok(CollisionMode::Elastic),
            other => Err(SimulationError::UnknownCollisionMode(other.to_string())),
        }
    }
}

/// What one resolution pass did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionSummary {
    pub merges: usize,
    pub impulses: usize,
}

impl CollisionSummary {
    pub fn is_empty(&self) -> bool {
        self.merges == 0 && self.impulses == 0
    }
}

/// Merge two bodies, conserving mass and momentum
///
/// The merged body takes the barycenter position, the momentum-weighted
/// velocity, the average of both colors and the concatenation of both
/// trails (`a`'s points first, truncated to the trail capacity).
///
/// # Examples
///
/// ```
/// use nbody::body::{Body, BodyId};
/// use nbody::collisions::merge_bodies;
/// use nbody::color::Color;
/// use nalgebra::Vector2;
///
/// let a = Body::new(BodyId(0), 1.0, Vector2::new(1.0, 0.0), Vector2::new(0.0, 5.0), Color::RED, 150).unwrap();
/// let b = Body::new(BodyId(1), 1.0, Vector2::new(1.1, 0.0), Vector2::new(0.0, 3.0), Color::BLUE, 150).unwrap();
///
/// let merged = merge_bodies(&a, &b, BodyId(0));
///
/// // Mass is conserved
/// assert!((merged.mass - 2.0).abs() < 1e-10);
///
/// // Momentum is conserved
/// let p_initial = a.momentum() + b.momentum();
/// let p_final = merged.momentum();
/// assert!((p_final - p_initial).norm() < 1e-10);
/// ```
pub fn merge_bodies<const D: usize>(a: &Body<D>, b: &Body<D>, new_id: BodyId) -> Body<D> {
    let total_mass = a.mass + b.mass;

    let position = (a.position * a.mass + b.position * b.mass) / total_mass;
    let velocity = (a.momentum() + b.momentum()) / total_mass;

    let mut trail = a.trail.clone();
    trail.extend_from(&b.trail);

    Body {
        id: new_id,
        mass: total_mass,
        position,
        velocity,
        color: a.color.blend(b.color),
        trail,
    }
}

/// Apply a frictionless elastic impulse between `a` and `b`
///
/// The impulse acts along `n = (b - a) / (|b - a| + ε)` with magnitude
/// `2 (v_a - v_b)·n / (1/m_a + 1/m_b)`. Coincident bodies get a zero normal
/// and therefore no impulse.
///
/// # Returns
///
/// The signed impulse magnitude that was applied
pub fn apply_elastic_impulse<const D: usize>(a: &mut Body<D>, b: &mut Body<D>) -> f64 {
    let r_vec = b.position - a.position;
    let normal = r_vec / (r_vec.norm() + NORMAL_EPSILON);

    let v_dot_n = (a.velocity - b.velocity).dot(&normal);
    let impulse = 2.0 * v_dot_n / (1.0 / a.mass + 1.0 / b.mass);

    a.velocity -= normal * (impulse / a.mass);
    b.velocity += normal * (impulse / b.mass);

    impulse
}

/// Resolve every contact in `bodies` according to `mode`
///
/// Merge mode repeats detection after every merger until a full scan finds
/// no contact. Each merger removes one body, so this takes at most `n - 1`
/// rounds. The merged body reuses the lower of the two ids and is appended
/// at the end.
///
/// Elastic mode makes a single scan and applies an impulse to every contact
/// found, in scan order, each pair seeing the velocities left by earlier
/// pairs. Positions are unchanged, so scanning again would only reverse the
/// impulses.
///
/// # Examples
///
/// ```
/// use nbody::body::{Body, BodyId};
/// use nbody::collisions::{resolve_collisions, CollisionMode, ContactDetector};
/// use nbody::color::Color;
/// use nalgebra::Vector2;
///
/// let at = |id, x, y| Body::new(BodyId(id), 10.0, Vector2::new(x, y), Vector2::zeros(), Color::RED, 150).unwrap();
/// let bodies = vec![at(0, 0.0, 0.0), at(1, 3.0, 0.0), at(2, 0.0, 3.0)];
///
/// let (bodies, summary) = resolve_collisions(bodies, CollisionMode::Merge, &ContactDetector::default());
///
/// assert_eq!(bodies.len(), 1);
/// assert_eq!(summary.merges, 2);
/// assert!((bodies[0].mass - 30.0).abs() < 1e-10);
/// ```
pub fn resolve_collisions<const D: usize>(
    bodies: Vec<Body<D>>,
    mode: CollisionMode,
    detector: &ContactDetector,
) -> (Vec<Body<D>>, CollisionSummary) {
    match mode {
        CollisionMode::Merge => resolve_merges(bodies, detector),
        CollisionMode::Elastic => resolve_elastic(bodies, detector),
    }
}

fn resolve_merges<const D: usize>(
    mut bodies: Vec<Body<D>>,
    detector: &ContactDetector,
) -> (Vec<Body<D>>, CollisionSummary) {
    let mut summary = CollisionSummary::default();

    while let Some(contact) = detector.first_contact(&bodies) {
        // second > first, so removing it first leaves `first` in place
        let b = bodies.remove(contact.second);
        let a = bodies.remove(contact.first);
        bodies.push(merge_bodies(&a, &b, a.id.min(b.id)));
        summary.merges += 1;
    }

    (bodies, summary)
}

fn resolve_elastic<const D: usize>(
    mut bodies: Vec<Body<D>>,
    detector: &ContactDetector,
) -> (Vec<Body<D>>, CollisionSummary) {
    let contacts = detector.contacts(&bodies);

    for contact in &contacts {
        let (a, b) = pair_mut(&mut bodies, contact.first, contact.second);
        apply_elastic_impulse(a, b);
    }

    let summary = CollisionSummary {
        merges: 0,
        impulses: contacts.len(),
    };
    (bodies, summary)
}

/// Two distinct mutable elements, `first < second`
fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    debug_assert!(first < second);
    let (head, tail) = items.split_at_mut(second);
    (&mut head[first], &mut tail[0])
}
