//! Collision demo: a crowd of bodies merging, then the same crowd bouncing
//!
//! Runs the same seeded starting set once in merge mode and once in elastic
//! mode and prints how body count and total energy evolve.
//!
//! Run with: RUST_LOG=nbody=debug cargo run --package nbody --example collision_demo

use nbody::collisions::CollisionMode;
use nbody::config::SimulationConfig;
use nbody::world::World;
use tracing_subscriber::EnvFilter;

fn run(mode: CollisionMode) -> nbody::Result<()> {
    let config = SimulationConfig {
        collision_mode: mode,
        initial_bodies: 12,
        seed: Some(2024),
        ..SimulationConfig::from_env()
    };
    let mut world = World::new(config)?;

    println!("\nMode: {mode}");
    println!("{}", "-".repeat(60));
    println!("{:>6} {:>8} {:>14} {:>14}", "tick", "bodies", "total mass", "energy");

    let initial_mass: f64 = world.bodies().iter().map(|b| b.mass).sum();

    for tick in 0..=600 {
        if tick % 60 == 0 {
            let mass: f64 = world.bodies().iter().map(|b| b.mass).sum();
            println!(
                "{:>6} {:>8} {:>14.3} {:>14.3}",
                tick,
                world.body_count(),
                mass,
                world.energy().total
            );
        }
        world.step();
    }

    let final_mass: f64 = world.bodies().iter().map(|b| b.mass).sum();
    println!(
        "Mass change: {:.2e} (should be ~0)",
        (final_mass - initial_mass).abs()
    );
    if let Some(drift) = world.energy_history().relative_drift() {
        println!("Energy drift over last {} ticks: {:.3}%", world.energy_samples().len(), drift * 100.0);
    }

    Ok(())
}

fn main() -> nbody::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("N-body Collision Demo");
    println!("{}", "=".repeat(60));

    run(CollisionMode::Merge)?;
    run(CollisionMode::Elastic)?;

    Ok(())
}
