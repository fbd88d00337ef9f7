//! Template matching against a distance transform
//!
//! Read-only reductions over template point lists: the Chamfer score
//! (capped mean distance to the nearest edge) and the orientation score
//! (mean angular disagreement with the nearest edge's orientation).
//! Template points falling outside the image are skipped.

use super::{DistanceTransform, INFINITY};
use crate::error::{RegionError, RegionResult};
use distmap_core::{OrientationField, OrientedPoint, Point, Scale};
use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};

/// Angle between two orientations, folded into `[0, pi/2]`.
///
/// Orientations are undirected: `a` and `a + pi` are the same, and
/// angles further apart than `pi/2` are measured the other way round.
pub fn angular_difference(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % PI;
    if diff > FRAC_PI_2 { PI - diff } else { diff }
}

impl DistanceTransform {
    /// Pixel reached from the anchor by a scaled offset, if inside.
    fn offset_pixel(&self, anchor_x: i32, anchor_y: i32, offset: (i32, i32)) -> Option<(u32, u32)> {
        let x = anchor_x.checked_add(offset.0)?;
        let y = anchor_y.checked_add(offset.1)?;
        if x < 0 || y < 0 || x as u32 >= self.width() || y as u32 >= self.height() {
            return None;
        }
        Some((x as u32, y as u32))
    }

    /// Chamfer match score of a template placed at an anchor pixel.
    ///
    /// Sums `min(distance, max_distance)` over the template points that
    /// land inside the image and divides by `count * max_distance`, giving
    /// a score in `[0, 1]` where 0 means every point lies on an edge.
    /// Pixels with no nearest edge count as `max_distance`.
    ///
    /// # Arguments
    ///
    /// * `anchor_x`, `anchor_y` - Pixel the template offsets are relative to
    /// * `template` - Template offsets
    /// * `max_distance` - Distance cap (must be positive)
    /// * `scale` - Optional scale applied to each offset
    ///
    /// # Errors
    ///
    /// Returns `RegionError::InvalidParameters` if `max_distance <= 0` and
    /// `RegionError::EmptyTemplate` if no template point is inside the image.
    pub fn chamfer_match(
        &self,
        anchor_x: i32,
        anchor_y: i32,
        template: &[Point],
        max_distance: i32,
        scale: Option<Scale>,
    ) -> RegionResult<f64> {
        if max_distance <= 0 {
            return Err(RegionError::InvalidParameters(format!(
                "max_distance must be positive, got {max_distance}"
            )));
        }
        let cap = max_distance as f64;

        let mut sum = 0.0;
        let mut count = 0usize;
        for point in template {
            let Some((x, y)) = self.offset_pixel(anchor_x, anchor_y, point.scaled(scale)) else {
                continue;
            };
            sum += self.distance(x, y).map_or(cap, |d| d.min(cap));
            count += 1;
        }

        if count == 0 {
            return Err(RegionError::EmptyTemplate);
        }
        Ok(sum / (count as f64 * cap))
    }

    /// Orientation match score of a template placed at an anchor pixel.
    ///
    /// For each template point inside the image, the orientation field is
    /// read at the point's nearest edge pixel and compared with the
    /// point's stored orientation using [`angular_difference`]. The sum is
    /// divided by `count * pi/2`, giving a score in `[0, 1]` where 0 means
    /// perfect agreement. Points with no nearest edge count as `pi/2`.
    ///
    /// # Errors
    ///
    /// Returns `RegionError::DimensionMismatch` if the field size differs
    /// from the transform, `RegionError::UnsupportedChannels` if the field
    /// is not single-channel, and `RegionError::EmptyTemplate` if no
    /// template point is inside the image.
    pub fn orientation_match(
        &self,
        anchor_x: i32,
        anchor_y: i32,
        template: &[OrientedPoint],
        field: &OrientationField,
        scale: Option<Scale>,
    ) -> RegionResult<f64> {
        if !self.grid.same_dimensions(field) {
            return Err(RegionError::DimensionMismatch {
                expected: self.grid.dimensions(),
                actual: field.dimensions(),
            });
        }
        if field.channels() != 1 {
            return Err(RegionError::UnsupportedChannels {
                expected: 1,
                actual: field.channels(),
            });
        }

        let mut sum = 0.0;
        let mut count = 0usize;
        for point in template {
            let Some((x, y)) = self.offset_pixel(anchor_x, anchor_y, point.scaled(scale)) else {
                continue;
            };
            sum += match self.sample(x, y) {
                Some(s) => {
                    let edge_orientation = field.get_unchecked(s.nearest_x, s.nearest_y, 0);
                    angular_difference(edge_orientation as f64, point.orientation as f64)
                }
                None => FRAC_PI_2,
            };
            count += 1;
        }

        if count == 0 {
            return Err(RegionError::EmptyTemplate);
        }
        Ok(sum / (count as f64 * FRAC_PI_2))
    }

    /// Nearest edge pixel for each query point.
    ///
    /// Points outside the image, and points for which no edge exists, are
    /// left out of the returned map.
    pub fn find_nearest_edges(&self, points: &[Point]) -> HashMap<Point, Point> {
        let mut nearest = HashMap::with_capacity(points.len());
        for &point in points {
            let Some((x, y)) = self.offset_pixel(point.x, point.y, (0, 0)) else {
                continue;
            };
            let pixel = self.grid.pixel(x, y);
            if pixel[0] != INFINITY {
                nearest.insert(point, Point::new(pixel[2], pixel[1]));
            }
        }
        nearest
    }
}
