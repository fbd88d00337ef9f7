//! Template points
//!
//! Offsets used by template matching. A template is a list of offsets
//! relative to an anchor pixel, optionally carrying the edge orientation
//! observed at that point when the template was built.

/// Integer template offset (dx, dy) relative to an anchor pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    /// Column offset
    pub x: i32,
    /// Row offset
    pub y: i32,
}

impl Point {
    /// Create a new point
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset after applying an optional scale
    #[inline]
    pub fn scaled(&self, scale: Option<Scale>) -> (i32, i32) {
        match scale {
            Some(s) => s.apply(self.x, self.y),
            None => (self.x, self.y),
        }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Template offset with the edge orientation (radians) stored for it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrientedPoint {
    /// Column offset
    pub x: i32,
    /// Row offset
    pub y: i32,
    /// Edge orientation in radians
    pub orientation: f32,
}

impl OrientedPoint {
    /// Create a new oriented point
    pub const fn new(x: i32, y: i32, orientation: f32) -> Self {
        Self { x, y, orientation }
    }

    /// Offset after applying an optional scale
    #[inline]
    pub fn scaled(&self, scale: Option<Scale>) -> (i32, i32) {
        Point::new(self.x, self.y).scaled(scale)
    }
}

/// Independent horizontal and vertical template scale factors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    /// Horizontal factor
    pub sx: f32,
    /// Vertical factor
    pub sy: f32,
}

impl Scale {
    /// Create a new scale
    pub const fn new(sx: f32, sy: f32) -> Self {
        Self { sx, sy }
    }

    /// Uniform scale in both directions
    pub const fn uniform(s: f32) -> Self {
        Self { sx: s, sy: s }
    }

    /// Scale an offset, rounding to the nearest pixel
    #[inline]
    pub fn apply(&self, dx: i32, dy: i32) -> (i32, i32) {
        (
            (dx as f32 * self.sx).round() as i32,
            (dy as f32 * self.sy).round() as i32,
        )
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}
