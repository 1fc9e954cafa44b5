//! The interactive world: owns bodies and parameters, runs one tick at a time
//!
//! The dimension is chosen at run time, so the world stores either a planar
//! or a volumetric `SystemState` and dispatches every operation to the
//! const-generic core. Switching dimension regenerates the whole body set;
//! vectors are never converted between arities.
//!
//! A tick runs, in order: net forces from one snapshot, semi-implicit Euler,
//! trail recording, collision resolution, energy sampling.

use crate::body::{validate_mass, validate_vector, Body, BodyId};
use crate::collisions::{CollisionMode, CollisionSummary, ContactDetector};
use crate::color::{Color, GENERATED_PALETTE, SPAWN_PALETTE};
use crate::config::SimulationConfig;
use crate::energy::{EnergyAccountant, EnergySample};
use crate::error::{Result, SimulationError};
use crate::forces::{clamp_gravitational_constant, ForceModel, SoftenedGravity, DEFAULT_G};
use crate::integrator::SemiImplicitEuler;
use crate::state::SystemState;
use crate::viewport::Viewport;
use nalgebra::{Point2, SVector, Vector2};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, trace, warn};

/// Half-width of the cube generated positions are drawn from
const SPAWN_EXTENT: f64 = 50.0;
/// Largest magnitude of a generated velocity component
const SPAWN_SPEED: f64 = 1.0;
const SPAWN_MASSES: [f64; 2] = [10.0, 15.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum Dimension {
    #[default]
    Planar,
    Volumetric,
}

impl Dimension {
    /// Number of vector components
    pub const fn arity(self) -> usize {
        match self {
            Dimension::Planar => 2,
            Dimension::Volumetric => 3,
        }
    }
}

impl TryFrom<usize> for Dimension {
    type Error = SimulationError;

    fn try_from(value: usize) -> Result<Self> {
        match value {
            2 => Ok(Dimension::Planar),
            3 => Ok(Dimension::Volumetric),
            other => Err(SimulationError::UnsupportedDimension(other)),
        }
    }
}

impl From<Dimension> for usize {
    fn from(dimension: Dimension) -> usize {
        dimension.arity()
    }
}

impl FromStr for Dimension {
    type Err = SimulationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "2" | "2d" | "planar" => Ok(Dimension::Planar),
            "3" | "3d" | "volumetric" => Ok(Dimension::Volumetric),
            other => Err(SimulationError::UnknownDimension(other.to_string())),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}D", self.arity())
    }
}

/// Dimension-erased copy of a body, for renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodySnapshot {
    pub id: BodyId,
    pub mass: f64,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub color: Color,
    /// Current projection onto the viewport
    pub screen_position: [f64; 2],
    /// Projected trail points, oldest first
    pub trail: Vec<[f64; 2]>,
}

impl BodySnapshot {
    fn capture<const D: usize>(body: &Body<D>, viewport: &Viewport) -> Self {
        let screen = viewport.project(&body.position);
        Self {
            id: body.id,
            mass: body.mass,
            position: body.position.as_slice().to_vec(),
            velocity: body.velocity.as_slice().to_vec(),
            color: body.color,
            screen_position: [screen.x, screen.y],
            trail: body.trail.iter().map(|p| [p.x, p.y]).collect(),
        }
    }
}

#[derive(Debug, Clone)]
enum Space {
    Planar(SystemState<2>),
    Volumetric(SystemState<3>),
}

/// Runs `$body` against whichever `SystemState` `$space` holds
macro_rules! with_state {
    ($space:expr, $state:ident => $body:expr) => {
        match $space {
            Space::Planar($state) => $body,
            Space::Volumetric($state) => $body,
        }
    };
}

/// A self-contained simulation instance
///
/// All parameters that an interactive front end may change between ticks
/// live here; nothing is shared between worlds. Mutating methods must not be
/// called concurrently with `step`.
///
/// # Examples
///
/// ```
/// use nbody::config::SimulationConfig;
/// use nbody::world::World;
///
/// let config = SimulationConfig { seed: Some(7), ..SimulationConfig::default() };
/// let mut world = World::new(config).unwrap();
/// assert_eq!(world.body_count(), 3);
///
/// world.step();
/// assert_eq!(world.energy_samples().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct World {
    space: Space,
    config: SimulationConfig,
    g: f64,
    collision_mode: CollisionMode,
    running: bool,
    energy: EnergyAccountant,
    detector: ContactDetector,
    rng: ChaCha8Rng,
}

impl World {
    /// Builds a running world with `config.initial_bodies` random bodies
    ///
    /// Zero initial bodies is allowed and gives an empty world to populate
    /// with `add_body`. Only construction can produce one; `reset(0)` is
    /// rejected and a dimension switch keeps the current count.
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidParameter` if the configuration fails
    /// validation.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let g = clamp_gravitational_constant(config.gravitational_constant);
        if g != config.gravitational_constant {
            warn!(
                requested = config.gravitational_constant,
                stored = g,
                "gravitational constant clamped"
            );
        }

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        let space = generate_space(&mut rng, &config, config.initial_bodies)?;

        info!(
            dimension = %config.dimension,
            bodies = config.initial_bodies,
            mode = %config.collision_mode,
            g,
            "world created"
        );

        Ok(Self {
            space,
            g,
            collision_mode: config.collision_mode,
            running: true,
            energy: EnergyAccountant::new(config.energy_history_capacity),
            detector: ContactDetector::new(config.collision_threshold),
            rng,
            config,
        })
    }

    /// Appends a body; `position` and `velocity` must match the dimension
    ///
    /// # Errors
    ///
    /// `InvalidMass`, `DimensionMismatch` or `NonFiniteComponent`; nothing
    /// is added on error.
    pub fn add_body(
        &mut self,
        position: &[f64],
        velocity: &[f64],
        mass: f64,
        color: Color,
    ) -> Result<BodyId> {
        validate_mass(mass)?;
        with_state!(&mut self.space, state => {
            let position = vector_from(position)?;
            let velocity = vector_from(velocity)?;
            state.add_body(mass, position, velocity, color)
        })
    }

    /// Adds a random body under a screen point
    ///
    /// In 3D the depth is drawn at random, like the other components of a
    /// generated body.
    pub fn spawn_at_screen(&mut self, point: Point2<f64>) -> Result<BodyId> {
        let (x, y) = self.screen_to_world(point)?;
        let rng = &mut self.rng;
        let color = SPAWN_PALETTE[rng.random_range(0..SPAWN_PALETTE.len())];
        let mass = SPAWN_MASSES[rng.random_range(0..SPAWN_MASSES.len())];

        with_state!(&mut self.space, state => spawn_body(state, rng, (x, y), mass, color))
    }

    /// Replaces every body with `count` random ones and restores defaults
    ///
    /// G returns to its default and the energy history is cleared.
    ///
    /// # Errors
    ///
    /// `EmptyReset` if `count` is zero; the world is left untouched.
    pub fn reset(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Err(SimulationError::EmptyReset);
        }
        self.regenerate(count)
    }

    fn regenerate(&mut self, count: usize) -> Result<()> {
        self.space = generate_space(&mut self.rng, &self.config, count)?;
        self.g = DEFAULT_G;
        self.energy.clear();
        info!(dimension = %self.config.dimension, bodies = count, "world reset");
        Ok(())
    }

    /// Switches between planar and volumetric simulation
    ///
    /// A change regenerates the same number of bodies in the new dimension,
    /// exactly as `reset` would.
    pub fn set_dimension(&mut self, dimension: Dimension) -> Result<()> {
        if dimension == self.config.dimension {
            return Ok(());
        }
        let count = self.body_count();
        info!(from = %self.config.dimension, to = %dimension, "switching dimension");
        self.config.dimension = dimension;
        self.regenerate(count)
    }

    pub fn dimension(&self) -> Dimension {
        self.config.dimension
    }

    pub fn set_collision_mode(&mut self, mode: CollisionMode) {
        self.collision_mode = mode;
    }

    pub fn toggle_collision_mode(&mut self) -> CollisionMode {
        self.collision_mode = self.collision_mode.toggled();
        self.collision_mode
    }

    pub fn collision_mode(&self) -> CollisionMode {
        self.collision_mode
    }

    /// Stores `g` clamped into `[G_MIN, G_MAX]`
    pub fn set_gravitational_constant(&mut self, g: f64) {
        self.g = clamp_gravitational_constant(g);
        if self.g != g {
            debug!(requested = g, stored = self.g, "gravitational constant clamped");
        }
    }

    pub fn restore_default_gravity(&mut self) {
        self.g = DEFAULT_G;
    }

    pub fn gravitational_constant(&self) -> f64 {
        self.g
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.running = !paused;
    }

    pub fn toggle_paused(&mut self) -> bool {
        self.running = !self.running;
        !self.running
    }

    pub fn is_paused(&self) -> bool {
        !self.running
    }

    /// Moves a body without changing its velocity
    ///
    /// Collisions caused by the move are resolved on the next `step`.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch`, `NonFiniteComponent` or `UnknownBody`.
    pub fn teleport_body(&mut self, id: BodyId, position: &[f64]) -> Result<()> {
        with_state!(&mut self.space, state => {
            let position = vector_from(position)?;
            state.teleport(id, position)
        })
    }

    /// Moves a body's x/y under a screen point, keeping any depth component
    pub fn drag_to_screen(&mut self, id: BodyId, point: Point2<f64>) -> Result<()> {
        let (x, y) = self.screen_to_world(point)?;
        with_state!(&mut self.space, state => {
            let body = state.get_body_mut(id).ok_or(SimulationError::UnknownBody(id))?;
            body.position[0] = x;
            body.position[1] = y;
            Ok(())
        })
    }

    fn screen_to_world(&self, point: Point2<f64>) -> Result<(f64, f64)> {
        let (x, y) = self.config.viewport.unproject(point);
        validate_vector(&Vector2::new(x, y))?;
        Ok((x, y))
    }

    /// First body whose projection lies within `radius` of a screen point
    pub fn pick_body(&self, point: Point2<f64>, radius: f64) -> Option<BodyId> {
        let viewport = &self.config.viewport;
        with_state!(&self.space, state => {
            state
                .bodies
                .iter()
                .find(|b| (viewport.project(&b.position) - point).norm() < radius)
                .map(|b| b.id)
        })
    }

    /// Advances the simulation by one tick
    ///
    /// # Returns
    ///
    /// The energy sample recorded for this tick, or `None` while paused, in
    /// which case nothing changes.
    pub fn step(&mut self) -> Option<EnergySample> {
        if !self.running {
            return None;
        }

        let gravity = self.gravity();
        let mode = self.collision_mode;
        let dt = self.config.dt;
        let viewport = self.config.viewport;
        let detector = self.detector;

        let (summary, sample, remaining) = with_state!(&mut self.space, state => {
            let summary = state.tick(&gravity, &SemiImplicitEuler, &detector, mode, dt, &viewport);
            let sample = EnergySample::measure(&state.bodies, gravity.g);
            (summary, sample, state.body_count())
        });

        self.log_collisions(&summary, remaining);
        self.energy.record(&sample);
        trace!(
            kinetic = sample.kinetic,
            potential = sample.potential,
            total = sample.total,
            "tick"
        );

        Some(sample)
    }

    fn log_collisions(&self, summary: &CollisionSummary, remaining: usize) {
        if summary.merges > 0 {
            debug!(merges = summary.merges, remaining, "bodies merged");
        }
        if summary.impulses > 0 {
            debug!(impulses = summary.impulses, "elastic impulses applied");
        }
    }

    fn gravity(&self) -> SoftenedGravity {
        SoftenedGravity::new(self.g, self.config.softening)
    }

    /// Snapshots of every body, in iteration order
    pub fn bodies(&self) -> Vec<BodySnapshot> {
        let viewport = &self.config.viewport;
        with_state!(&self.space, state => {
            state
                .bodies
                .iter()
                .map(|b| BodySnapshot::capture(b, viewport))
                .collect()
        })
    }

    pub fn body(&self, id: BodyId) -> Option<BodySnapshot> {
        let viewport = &self.config.viewport;
        with_state!(&self.space, state => {
            state.get_body(id).map(|b| BodySnapshot::capture(b, viewport))
        })
    }

    pub fn body_count(&self) -> usize {
        with_state!(&self.space, state => state.body_count())
    }

    /// Net gravitational force on every body from the current positions
    pub fn net_forces(&self) -> Vec<(BodyId, Vec<f64>)> {
        let gravity = self.gravity();
        with_state!(&self.space, state => {
            gravity
                .net_forces(&state.bodies)
                .iter()
                .zip(&state.bodies)
                .map(|(force, body)| (body.id, force.as_slice().to_vec()))
                .collect()
        })
    }

    /// Current energy, without recording it
    pub fn energy(&self) -> EnergySample {
        with_state!(&self.space, state => EnergySample::measure(&state.bodies, self.g))
    }

    /// Recorded total energy per tick, oldest first
    pub fn energy_samples(&self) -> Vec<f64> {
        self.energy.samples().collect()
    }

    pub fn energy_history(&self) -> &EnergyAccountant {
        &self.energy
    }

    pub fn time(&self) -> f64 {
        with_state!(&self.space, state => state.time)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn planar(&self) -> Option<&SystemState<2>> {
        match &self.space {
            Space::Planar(state) => Some(state),
            Space::Volumetric(_) => None,
        }
    }

    pub fn volumetric(&self) -> Option<&SystemState<3>> {
        match &self.space {
            Space::Volumetric(state) => Some(state),
            Space::Planar(_) => None,
        }
    }
}

fn generate_space(rng: &mut ChaCha8Rng, config: &SimulationConfig, count: usize) -> Result<Space> {
    Ok(match config.dimension {
        Dimension::Planar => Space::Planar(generate_state(rng, config.trail_capacity, count)?),
        Dimension::Volumetric => {
            Space::Volumetric(generate_state(rng, config.trail_capacity, count)?)
        }
    })
}

fn generate_state<const D: usize>(
    rng: &mut ChaCha8Rng,
    trail_capacity: usize,
    count: usize,
) -> Result<SystemState<D>> {
    let mut state = SystemState::<D>::new(trail_capacity);
    for i in 0..count {
        let position = random_vector(rng, SPAWN_EXTENT);
        let velocity = random_vector(rng, SPAWN_SPEED);
        let mass = SPAWN_MASSES[rng.random_range(0..SPAWN_MASSES.len())];
        let color = GENERATED_PALETTE[i % GENERATED_PALETTE.len()];
        state.add_body(mass, position, velocity, color)?;
    }
    Ok(state)
}

fn spawn_body<const D: usize>(
    state: &mut SystemState<D>,
    rng: &mut ChaCha8Rng,
    (x, y): (f64, f64),
    mass: f64,
    color: Color,
) -> Result<BodyId> {
    let mut position: SVector<f64, D> = random_vector(rng, SPAWN_EXTENT);
    position[0] = x;
    position[1] = y;
    let velocity = random_vector(rng, SPAWN_SPEED);
    state.add_body(mass, position, velocity, color)
}

/// Each component uniform in `[-extent, extent)`
fn random_vector<const D: usize>(rng: &mut ChaCha8Rng, extent: f64) -> SVector<f64, D> {
    SVector::from_fn(|_, _| rng.random_range(-extent..extent))
}

fn vector_from<const D: usize>(components: &[f64]) -> Result<SVector<f64, D>> {
    if components.len() != D {
        return Err(SimulationError::DimensionMismatch {
            expected: D,
            actual: components.len(),
        });
    }
    let vector = SVector::from_column_slice(components);
    validate_vector(&vector)?;
    Ok(vector)
}
