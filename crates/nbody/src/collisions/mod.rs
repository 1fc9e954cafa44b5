//! Collision detection and resolution for N-body systems
//!
//! Bodies closer than a fixed threshold are in contact. Contacts are resolved
//! either by perfectly inelastic mergers or by elastic impulses along the
//! contact normal.

pub mod detection;
pub mod resolution;

#[cfg(test)]
mod detection_test;

pub use detection::{Contact, ContactDetector, DEFAULT_COLLISION_THRESHOLD};
pub use resolution::{
    apply_elastic_impulse, merge_bodies, resolve_collisions, CollisionMode, CollisionSummary,
};
