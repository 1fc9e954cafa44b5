use approx::assert_relative_eq;
use nalgebra::{Point2, Vector2, Vector3};

use crate::viewport::Viewport;

#[test]
fn test_planar_projection_centers_origin() {
    let viewport = Viewport::default();
    let p = viewport.project(&Vector2::new(0.0, 0.0));
    assert_eq!(p, Point2::new(500.0, 350.0));
}

#[test]
fn test_volumetric_projection_at_zero_depth_matches_planar() {
    let viewport = Viewport::default();
    let flat = viewport.project(&Vector2::new(30.0, -12.0));
    let deep = viewport.project(&Vector3::new(30.0, -12.0, 0.0));
    assert_eq!(flat, deep);
}

#[test]
fn test_nearer_bodies_appear_further_out() {
    let viewport = Viewport::default();
    let near = viewport.project(&Vector3::new(100.0, 0.0, -250.0));
    // factor 500 / 250 = 2
    assert_relative_eq!(near.x, 700.0);
}

#[test]
fn test_projection_behind_camera_stays_finite() {
    let viewport = Viewport::default();
    let p = viewport.project(&Vector3::new(1.0, 1.0, -500.0));
    assert!(p.x.is_finite() && p.y.is_finite());
}

#[test]
fn test_unproject_inverts_planar_projection() {
    let viewport = Viewport {
        width: 800.0,
        height: 600.0,
        camera_distance: 400.0,
    };
    let p = viewport.project(&Vector2::new(-25.0, 60.0));
    assert_eq!(viewport.unproject(p), (-25.0, 60.0));
}
