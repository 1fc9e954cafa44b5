//! Screen-space projection used for trails, picking and dragging
//!
//! Simulation coordinates are centered on the origin. The viewport maps them
//! onto a `width` x `height` screen whose origin is the top-left corner. For
//! volumetric worlds a simple perspective divide by `camera_distance + z` is
//! applied before centering.

use nalgebra::{Point2, SVector};
use serde::{Deserialize, Serialize};

/// Smallest perspective depth; keeps bodies behind the camera finite
const MIN_DEPTH: f64 = 1e-6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub camera_distance: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 700.0,
            camera_distance: 500.0,
        }
    }
}

impl Viewport {
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Projects a simulation position onto the screen
    ///
    /// Only the first two components are used for planar vectors; a third
    /// component, when present, is treated as depth.
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::viewport::Viewport;
    /// use nalgebra::{Vector2, Vector3};
    ///
    /// let viewport = Viewport::default();
    /// let flat = viewport.project(&Vector2::new(10.0, -20.0));
    /// assert_eq!((flat.x, flat.y), (510.0, 330.0));
    ///
    /// // Points further from the camera shrink toward the center
    /// let deep = viewport.project(&Vector3::new(100.0, 0.0, 500.0));
    /// assert_eq!(deep.x, 550.0);
    /// ```
    pub fn project<const D: usize>(&self, position: &SVector<f64, D>) -> Point2<f64> {
        let center = self.center();
        let factor = if D >= 3 {
            self.camera_distance / (self.camera_distance + position[2]).max(MIN_DEPTH)
        } else {
            1.0
        };
        Point2::new(
            position[0] * factor + center.x,
            position[1] * factor + center.y,
        )
    }

    /// Inverse of the planar projection: the simulation x/y under a screen point
    pub fn unproject(&self, point: Point2<f64>) -> (f64, f64) {
        let center = self.center();
        (point.x - center.x, point.y - center.y)
    }
}
