//! Energy drift of a circular binary under semi-implicit Euler
//!
//! Two equal masses orbit their barycenter 200 units apart. With no
//! collisions the total energy should oscillate within a tiny band instead
//! of drifting away.
//!
//! Run with: cargo run --package nbody --example energy_drift

use nbody::color::Color;
use nbody::config::SimulationConfig;
use nbody::world::World;
use tracing_subscriber::EnvFilter;

const MASS: f64 = 1000.0;
const SEPARATION: f64 = 200.0;

fn main() -> nbody::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = SimulationConfig {
        initial_bodies: 0,
        ..SimulationConfig::from_env()
    };
    let mut world = World::new(config)?;
    let g = world.gravitational_constant();

    // v² / (d/2) = G m / d²
    let v = (g * MASS / (2.0 * SEPARATION)).sqrt();
    let half = SEPARATION / 2.0;
    world.add_body(&[-half, 0.0], &[0.0, -v], MASS, Color::RED)?;
    world.add_body(&[half, 0.0], &[0.0, v], MASS, Color::BLUE)?;

    let initial = world.energy();
    println!("Circular binary: m = {MASS}, d = {SEPARATION}, v = {v:.4}, G = {g}");
    println!(
        "Initial energy: KE = {:.3}, PE = {:.3}, total = {:.3}\n",
        initial.kinetic, initial.potential, initial.total
    );

    let mut worst: f64 = 0.0;
    for tick in 1..=5000 {
        let Some(sample) = world.step() else {
            break;
        };
        let error = (sample.total - initial.total).abs() / initial.total.abs();
        worst = worst.max(error);

        if tick % 500 == 0 {
            println!(
                "tick {:>5}  t = {:>6.1}  total = {:>12.4}  error = {:.2e}",
                tick,
                world.time(),
                sample.total,
                error
            );
        }
    }

    println!("\nWorst relative energy error: {:.2e}", worst);
    Ok(())
}
