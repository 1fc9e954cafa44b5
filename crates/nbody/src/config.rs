//! Simulation parameters and their environment overrides

use crate::body::DEFAULT_TRAIL_CAPACITY;
use crate::collisions::{CollisionMode, DEFAULT_COLLISION_THRESHOLD};
use crate::energy::DEFAULT_HISTORY_CAPACITY;
use crate::error::{Result, SimulationError};
use crate::forces::{DEFAULT_G, DEFAULT_SOFTENING};
use crate::viewport::Viewport;
use crate::world::Dimension;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub const DEFAULT_DT: f64 = 0.1;
pub const DEFAULT_BODY_COUNT: usize = 3;

/// Everything needed to build a `World`
///
/// Missing fields take their defaults when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Initial G; clamped into `[G_MIN, G_MAX]` by the world
    pub gravitational_constant: f64,
    pub softening: f64,
    pub dt: f64,
    /// Contact distance for collision detection
    pub collision_threshold: f64,
    pub dimension: Dimension,
    pub collision_mode: CollisionMode,
    /// Bodies generated at construction and by `reset`
    pub initial_bodies: usize,
    pub trail_capacity: usize,
    pub energy_history_capacity: usize,
    /// Seed for body generation; OS entropy when absent
    pub seed: Option<u64>,
    pub viewport: Viewport,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            gravitational_constant: DEFAULT_G,
            softening: DEFAULT_SOFTENING,
            dt: DEFAULT_DT,
            collision_threshold: DEFAULT_COLLISION_THRESHOLD,
            dimension: Dimension::Planar,
            collision_mode: CollisionMode::Merge,
            initial_bodies: DEFAULT_BODY_COUNT,
            trail_capacity: DEFAULT_TRAIL_CAPACITY,
            energy_history_capacity: DEFAULT_HISTORY_CAPACITY,
            seed: None,
            viewport: Viewport::default(),
        }
    }
}

impl SimulationConfig {
    /// Defaults overridden by `NBODY_*` environment variables
    ///
    /// Recognized: `NBODY_G`, `NBODY_SOFTENING`, `NBODY_DT`,
    /// `NBODY_DIMENSION` (`2`/`3`), `NBODY_COLLISION_MODE`
    /// (`merge`/`elastic`), `NBODY_BODIES`, `NBODY_SEED`. Values that fail to
    /// parse are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like `from_env`, reading variables through `lookup`
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::config::SimulationConfig;
    /// use nbody::world::Dimension;
    ///
    /// let config = SimulationConfig::from_lookup(|key| match key {
    ///     "NBODY_DIMENSION" => Some("3".to_string()),
    ///     "NBODY_DT" => Some("not a number".to_string()),
    ///     _ => None,
    /// });
    ///
    /// assert_eq!(config.dimension, Dimension::Volumetric);
    /// assert_eq!(config.dt, 0.1);
    /// ```
    pub fn from_lookup<L>(lookup: L) -> Self
    where
        L: Fn(&str) -> Option<String>,
    {
        fn parsed<T: FromStr>(raw: Option<String>) -> Option<T> {
            raw.and_then(|value| value.trim().parse().ok())
        }

        let defaults = Self::default();
        Self {
            gravitational_constant: parsed(lookup("NBODY_G"))
                .unwrap_or(defaults.gravitational_constant),
            softening: parsed(lookup("NBODY_SOFTENING")).unwrap_or(defaults.softening),
            dt: parsed(lookup("NBODY_DT")).unwrap_or(defaults.dt),
            dimension: parsed(lookup("NBODY_DIMENSION")).unwrap_or(defaults.dimension),
            collision_mode: parsed(lookup("NBODY_COLLISION_MODE"))
                .unwrap_or(defaults.collision_mode),
            initial_bodies: parsed(lookup("NBODY_BODIES")).unwrap_or(defaults.initial_bodies),
            seed: parsed(lookup("NBODY_SEED")).or(defaults.seed),
            ..defaults
        }
    }

    /// Checks that every length, step and capacity is usable
    pub fn validate(&self) -> Result<()> {
        positive("softening", self.softening)?;
        positive("dt", self.dt)?;
        positive("collision_threshold", self.collision_threshold)?;
        positive("trail_capacity", self.trail_capacity as f64)?;
        positive("energy_history_capacity", self.energy_history_capacity as f64)?;
        positive("viewport.camera_distance", self.viewport.camera_distance)?;
        Ok(())
    }
}

fn positive(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimulationError::InvalidParameter { name, value })
    }
}
