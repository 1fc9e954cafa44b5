//! RGB color tags carried by bodies

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const RED: Color = Color::new(255, 0, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const MAGENTA: Color = Color::new(255, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Componentwise average of two colors (integer division, clamped to 255)
    ///
    /// # Examples
    ///
    /// ```
    /// use nbody::color::Color;
    ///
    /// let purple = Color::RED.blend(Color::BLUE);
    /// assert_eq!(purple, Color::new(127, 0, 127));
    /// ```
    pub fn blend(self, other: Color) -> Color {
        let mix = |a: u8, b: u8| ((u16::from(a) + u16::from(b)) / 2).min(255) as u8;
        Color::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Color::new(r, g, b)
    }
}

/// Colors assigned in rotation when a world generates its bodies
pub const GENERATED_PALETTE: [Color; 3] = [Color::RED, Color::BLUE, Color::YELLOW];

/// Colors picked at random for bodies spawned interactively
pub const SPAWN_PALETTE: [Color; 5] = [
    Color::RED,
    Color::BLUE,
    Color::YELLOW,
    Color::GREEN,
    Color::MAGENTA,
];
