use crate::body::{validate_vector, Body, BodyId, DEFAULT_TRAIL_CAPACITY};
use crate::collisions::{resolve_collisions, CollisionMode, CollisionSummary, ContactDetector};
use crate::color::Color;
use crate::error::{Result, SimulationError};
use crate::forces::ForceModel;
use crate::integrator::Integrator;
use crate::viewport::Viewport;
use nalgebra::SVector;

/// Complete state of a `D`-dimensional N-body system
#[derive(Debug, Clone)]
pub struct SystemState<const D: usize> {
    /// Elapsed simulation time
    pub time: f64,
    /// Bodies in insertion order; merged bodies are appended
    pub bodies: Vec<Body<D>>,
    /// Next available body ID
    next_id: u32,
    trail_capacity: usize,
}

impl<const D: usize> SystemState<D> {
    /// Creates an empty system whose bodies keep `trail_capacity` trail points
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::state::SystemState;
    ///
    /// let system = SystemState::<2>::new(150);
    /// assert_eq!(system.body_count(), 0);
    /// assert_eq!(system.time, 0.0);
    /// ```
    pub fn new(trail_capacity: usize) -> Self {
        Self {
            time: 0.0,
            bodies: Vec::new(),
            next_id: 0,
            trail_capacity,
        }
    }

    /// Adds a new body to the system and returns its ID
    ///
    /// # Errors
    ///
    /// `SimulationError::InvalidMass` if `mass` is not positive and finite;
    /// the system is left unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::state::SystemState;
    /// use nbody::color::Color;
    /// use nalgebra::Vector2;
    ///
    /// let mut system = SystemState::<2>::new(150);
    /// let id = system
    ///     .add_body(10.0, Vector2::new(20.0, 0.0), Vector2::new(0.0, 1.0), Color::RED)
    ///     .unwrap();
    ///
    /// assert_eq!(system.body_count(), 1);
    /// assert!(system.get_body(id).is_some());
    /// assert!(system.add_body(-1.0, Vector2::zeros(), Vector2::zeros(), Color::RED).is_err());
    /// assert_eq!(system.body_count(), 1);
    /// ```
    pub fn add_body(
        &mut self,
        mass: f64,
        position: SVector<f64, D>,
        velocity: SVector<f64, D>,
        color: Color,
    ) -> Result<BodyId> {
        let id = BodyId(self.next_id);
        let body = Body::new(id, mass, position, velocity, color, self.trail_capacity)?;
        self.next_id += 1;
        self.bodies.push(body);
        Ok(id)
    }

    /// Removes a body from the system
    ///
    /// # Returns
    ///
    /// The removed Body if found, None otherwise
    pub fn remove_body(&mut self, id: BodyId) -> Option<Body<D>> {
        self.bodies
            .iter()
            .position(|b| b.id == id)
            .map(|idx| self.bodies.remove(idx))
    }

    pub fn get_body(&self, id: BodyId) -> Option<&Body<D>> {
        self.bodies.iter().find(|b| b.id == id)
    }

    pub fn get_body_mut(&mut self, id: BodyId) -> Option<&mut Body<D>> {
        self.bodies.iter_mut().find(|b| b.id == id)
    }

    /// Overwrites a body's position without touching its velocity
    ///
    /// Contacts created this way are resolved on the next tick.
    pub fn teleport(&mut self, id: BodyId, position: SVector<f64, D>) -> Result<()> {
        validate_vector(&position)?;
        let body = self
            .get_body_mut(id)
            .ok_or(SimulationError::UnknownBody(id))?;
        body.position = position;
        Ok(())
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn trail_capacity(&self) -> usize {
        self.trail_capacity
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.mass).sum()
    }

    /// Returns the total momentum of all bodies
    ///
    /// Gravity and both collision modes conserve this; it is useful for
    /// checking numerical drift.
    pub fn total_momentum(&self) -> SVector<f64, D> {
        self.bodies
            .iter()
            .map(|b| b.momentum())
            .fold(SVector::zeros(), |acc, p| acc + p)
    }

    /// Runs one tick: forces, integration, trails, then collisions
    ///
    /// Forces for every body are evaluated before any body moves.
    pub fn tick<F, I>(
        &mut self,
        force: &F,
        integrator: &I,
        detector: &ContactDetector,
        mode: CollisionMode,
        dt: f64,
        viewport: &Viewport,
    ) -> CollisionSummary
    where
        F: ForceModel<D>,
        I: Integrator,
    {
        let forces = force.net_forces(&self.bodies);
        integrator.advance(&mut self.bodies, &forces, dt);
        self.bodies
            .iter_mut()
            .for_each(|body| body.record_trail(viewport));

        let (bodies, summary) = resolve_collisions(std::mem::take(&mut self.bodies), mode, detector);
        self.bodies = bodies;
        self.time += dt;

        summary
    }
}

impl<const D: usize> Default for SystemState<D> {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_CAPACITY)
    }
}
