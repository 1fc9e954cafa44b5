use approx::assert_relative_eq;

use crate::energy::*;
use crate::test_support::body;

fn sample(total: f64) -> EnergySample {
    EnergySample {
        kinetic: 0.0,
        potential: total,
        total,
    }
}

#[test]
fn test_kinetic_energy_sums_bodies() {
    let bodies = vec![
        body(0, 10.0, [0.0, 0.0], [1.0, 0.0]),
        body(1, 15.0, [50.0, 0.0], [0.0, 2.0]),
    ];
    // 0.5 * 10 * 1 + 0.5 * 15 * 4
    assert_relative_eq!(kinetic_energy(&bodies), 35.0);
}

#[test]
fn test_potential_energy_counts_each_pair_once() {
    let bodies = vec![
        body(0, 10.0, [0.0, 0.0, 0.0], [0.0; 3]),
        body(1, 10.0, [20.0, 0.0, 0.0], [0.0; 3]),
        body(2, 10.0, [0.0, 0.0, 40.0], [0.0; 3]),
    ];
    let g = 1.5;

    let d12 = (20.0_f64.powi(2) + 40.0_f64.powi(2)).sqrt();
    let expected = -g * 100.0 * (1.0 / 20.0 + 1.0 / 40.0 + 1.0 / d12);

    assert_relative_eq!(potential_energy(&bodies, g), expected, max_relative = 1e-9);
}

#[test]
fn test_potential_energy_of_coincident_bodies_is_finite() {
    let bodies = vec![
        body(0, 10.0, [3.0, 3.0], [0.0; 2]),
        body(1, 10.0, [3.0, 3.0], [0.0; 2]),
    ];
    let pe = potential_energy(&bodies, 1.0);
    assert!(pe.is_finite());
    assert!(pe < 0.0);
}

#[test]
fn test_single_body_has_no_potential() {
    let bodies = vec![body(0, 10.0, [3.0, 3.0], [1.0, 1.0])];
    assert_eq!(potential_energy(&bodies, 1.0), 0.0);
}

#[test]
fn test_sample_total_is_sum() {
    let bodies = vec![
        body(0, 10.0, [0.0, 0.0], [1.0, 0.0]),
        body(1, 10.0, [100.0, 0.0], [0.0, 1.0]),
    ];
    let s = EnergySample::measure(&bodies, 1.0);
    assert_relative_eq!(s.total, s.kinetic + s.potential);
}

#[test]
fn test_history_capped_oldest_evicted() {
    let mut accountant = EnergyAccountant::new(200);
    for i in 0..250 {
        accountant.record(&sample(i as f64));
    }

    assert_eq!(accountant.len(), 200);
    let samples: Vec<f64> = accountant.samples().collect();
    assert_eq!(samples.first(), Some(&50.0));
    assert_eq!(samples.last(), Some(&249.0));
    assert_eq!(accountant.latest(), Some(249.0));
}

#[test]
fn test_relative_drift() {
    let mut accountant = EnergyAccountant::default();
    assert_eq!(accountant.relative_drift(), None);

    accountant.record(&sample(-100.0));
    assert_eq!(accountant.relative_drift(), None);

    accountant.record(&sample(-99.0));
    assert_relative_eq!(accountant.relative_drift().unwrap(), 0.01);
}

#[test]
fn test_clear_empties_history() {
    let mut accountant = EnergyAccountant::default();
    accountant.record(&sample(1.0));
    accountant.clear();
    assert!(accountant.is_empty());
    assert_eq!(accountant.capacity(), DEFAULT_HISTORY_CAPACITY);
}
