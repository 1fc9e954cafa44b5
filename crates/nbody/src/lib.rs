//! Gravitational sandbox for a handful of point masses
//!
//! Bodies attract each other through softened Newtonian gravity, advance
//! with semi-implicit Euler, and either merge or bounce elastically when
//! they come within a fixed contact distance. `world::World` ties these
//! together behind the mutation and query surface a renderer or input layer
//! needs; the other modules are the dimension-generic physics core.

pub mod body;
pub mod collisions;
pub mod color;
pub mod config;
pub mod energy;
pub mod error;
pub mod forces;
pub mod integrator;
pub mod state;
pub mod viewport;
pub mod world;

pub use error::{Result, SimulationError};
pub use world::{Dimension, World};

#[cfg(test)]
mod test_support;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod energy_test;
#[cfg(test)]
mod integrator_test;
#[cfg(test)]
mod viewport_test;
