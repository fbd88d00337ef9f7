//! Rect - Rectangle regions
//!
//! Axis-aligned bounding boxes, used to describe connected components.

use crate::error::{Error, Result};

/// A rectangle region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl Rect {
    /// Create a new rectangle
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "rect dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a rectangle without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Smallest rectangle covering both corner pixels (inclusive)
    pub fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            w: (x2 - x1).abs() + 1,
            h: (y2 - y1).abs() + 1,
        }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check whether a pixel lies inside
    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
