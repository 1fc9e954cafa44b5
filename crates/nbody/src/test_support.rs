use crate::body::{Body, BodyId, DEFAULT_TRAIL_CAPACITY};
use crate::color::Color;
use nalgebra::SVector;

pub fn body<const D: usize>(
    id: u32,
    mass: f64,
    position: [f64; D],
    velocity: [f64; D],
) -> Body<D> {
    Body::new(
        BodyId(id),
        mass,
        SVector::from(position),
        SVector::from(velocity),
        Color::RED,
        DEFAULT_TRAIL_CAPACITY,
    )
    .expect("test bodies have positive mass")
}
