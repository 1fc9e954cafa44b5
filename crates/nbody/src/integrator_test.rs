use approx::assert_relative_eq;
use nalgebra::Vector2;

use crate::body::Body;
use crate::energy::EnergySample;
use crate::forces::SoftenedGravity;
use crate::integrator::{ExplicitEuler, Integrator, SemiImplicitEuler};
use crate::test_support::body;

/// Two 1000-mass bodies on a circular mutual orbit, 200 units apart
fn make_binary() -> Vec<Body<2>> {
    // v² / (d/2) = G m / d²  =>  v = sqrt(G m / 2d)
    let v = (1.0_f64 * 1000.0 / 400.0).sqrt();
    vec![
        body(0, 1000.0, [-100.0, 0.0], [0.0, -v]),
        body(1, 1000.0, [100.0, 0.0], [0.0, v]),
    ]
}

/// Largest relative energy error seen over `n_steps`, and the final one
fn energy_error<I: Integrator>(integrator: &I, n_steps: usize) -> (f64, f64) {
    let mut bodies = make_binary();
    let gravity = SoftenedGravity::new(1.0, 5.0);
    let initial = EnergySample::measure(&bodies, 1.0).total;

    let mut worst: f64 = 0.0;
    for _ in 0..n_steps {
        integrator.step(&mut bodies, &gravity, 0.1);
        let error = (EnergySample::measure(&bodies, 1.0).total - initial).abs() / initial.abs();
        worst = worst.max(error);
    }
    let last = (EnergySample::measure(&bodies, 1.0).total - initial).abs() / initial.abs();
    (worst, last)
}

#[test]
fn test_semi_implicit_kicks_before_drift() {
    let mut bodies = vec![body(0, 2.0, [1.0, 1.0], [1.0, 0.0])];
    let forces = [Vector2::new(2.0, -4.0)];

    SemiImplicitEuler.advance(&mut bodies, &forces, 0.5);

    // a = (1, -2); v = (1.5, -1); x = x0 + v * dt
    assert_relative_eq!(bodies[0].velocity.x, 1.5);
    assert_relative_eq!(bodies[0].velocity.y, -1.0);
    assert_relative_eq!(bodies[0].position.x, 1.75);
    assert_relative_eq!(bodies[0].position.y, 0.5);
}

#[test]
fn test_explicit_drifts_before_kick() {
    let mut bodies = vec![body(0, 2.0, [1.0, 1.0], [1.0, 0.0])];
    let forces = [Vector2::new(2.0, -4.0)];

    ExplicitEuler.advance(&mut bodies, &forces, 0.5);

    assert_relative_eq!(bodies[0].position.x, 1.5);
    assert_relative_eq!(bodies[0].position.y, 1.0);
    assert_relative_eq!(bodies[0].velocity.x, 1.5);
}

#[test]
fn test_free_body_moves_in_straight_line() {
    let mut bodies = vec![body(0, 10.0, [0.0, 0.0, 0.0], [1.0, -2.0, 0.5])];
    let gravity = SoftenedGravity::default();

    SemiImplicitEuler.integrate(&mut bodies, &gravity, 0.1, 100);

    assert_relative_eq!(bodies[0].position.x, 10.0, epsilon = 1e-9);
    assert_relative_eq!(bodies[0].position.y, -20.0, epsilon = 1e-9);
    assert_relative_eq!(bodies[0].position.z, 5.0, epsilon = 1e-9);
}

#[test]
fn test_step_conserves_momentum() {
    let mut bodies = vec![
        body(0, 10.0, [0.0, 0.0], [0.3, 0.0]),
        body(1, 15.0, [40.0, 10.0], [0.0, -0.2]),
        body(2, 10.0, [-25.0, 30.0], [0.1, 0.1]),
    ];
    let gravity = SoftenedGravity::new(1.5, 5.0);
    let momentum = |bodies: &[Body<2>]| {
        bodies
            .iter()
            .fold(Vector2::zeros(), |acc, b| acc + b.momentum())
    };
    let initial = momentum(&bodies);

    SemiImplicitEuler.integrate(&mut bodies, &gravity, 0.1, 200);

    assert!((momentum(&bodies) - initial).norm() < 1e-9);
}

#[test]
fn test_semi_implicit_energy_stays_bounded() {
    let (worst, _) = energy_error(&SemiImplicitEuler, 20_000);
    assert!(worst < 1e-3, "Energy error: {:.2e}", worst);
}

#[test]
fn test_explicit_euler_worse_than_semi_implicit() {
    let (semi_worst, _) = energy_error(&SemiImplicitEuler, 20_000);
    let (_, explicit_last) = energy_error(&ExplicitEuler, 20_000);

    // Explicit Euler pumps energy into a bound orbit
    assert!(explicit_last > 0.01, "Explicit error: {:.2e}", explicit_last);
    assert!(explicit_last > 10.0 * semi_worst);
}
