use std::collections::HashMap;

use crate::collisions::CollisionMode;
use crate::config::SimulationConfig;
use crate::error::SimulationError;
use crate::world::Dimension;

#[test]
fn test_defaults() {
    let config = SimulationConfig::default();

    assert_eq!(config.gravitational_constant, 1.0);
    assert_eq!(config.softening, 5.0);
    assert_eq!(config.dt, 0.1);
    assert_eq!(config.collision_threshold, 10.0);
    assert_eq!(config.dimension, Dimension::Planar);
    assert_eq!(config.collision_mode, CollisionMode::Merge);
    assert_eq!(config.trail_capacity, 150);
    assert_eq!(config.energy_history_capacity, 200);
    assert!(config.validate().is_ok());
}

#[test]
fn test_lookup_overrides() {
    let vars: HashMap<&str, &str> = [
        ("NBODY_G", "1.7"),
        ("NBODY_COLLISION_MODE", "elastic"),
        ("NBODY_BODIES", "8"),
        ("NBODY_SEED", "42"),
        ("NBODY_SOFTENING", "oops"),
    ]
    .into_iter()
    .collect();

    let config = SimulationConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(config.gravitational_constant, 1.7);
    assert_eq!(config.collision_mode, CollisionMode::Elastic);
    assert_eq!(config.initial_bodies, 8);
    assert_eq!(config.seed, Some(42));
    assert_eq!(config.softening, 5.0);
}

#[test]
fn test_validate_rejects_non_positive_values() {
    let config = SimulationConfig {
        dt: 0.0,
        ..SimulationConfig::default()
    };
    assert_eq!(
        config.validate(),
        Err(SimulationError::InvalidParameter {
            name: "dt",
            value: 0.0
        })
    );

    let config = SimulationConfig {
        softening: f64::NAN,
        ..SimulationConfig::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_deserialize_partial_config() {
    let json = r#"{ "dimension": 3, "collision_mode": "elastic", "viewport": { "width": 640.0 } }"#;
    let config: SimulationConfig = serde_json::from_str(json).unwrap();

    assert_eq!(config.dimension, Dimension::Volumetric);
    assert_eq!(config.collision_mode, CollisionMode::Elastic);
    assert_eq!(config.viewport.width, 640.0);
    assert_eq!(config.viewport.height, 700.0);
    assert_eq!(config.dt, 0.1);
}

#[test]
fn test_deserialize_rejects_unsupported_dimension() {
    let result: Result<SimulationConfig, _> = serde_json::from_str(r#"{ "dimension": 4 }"#);
    assert!(result.is_err());
}
