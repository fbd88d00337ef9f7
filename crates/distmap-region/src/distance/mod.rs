//! Exact Euclidean distance transform
//!
//! Computes, for every pixel of an edge mask, the squared Euclidean
//! distance to the nearest edge pixel and that edge pixel's coordinates,
//! in time linear in the number of pixels.
//!
//! The transform runs in two passes separated by a full barrier:
//!
//! 1. **Row pass** - each row is scanned independently, giving the squared
//!    distance to the nearest edge in the same row.
//! 2. **Column sweeps** - each column is swept top-down and then bottom-up,
//!    maintaining the lower envelope of the parabolas `(r - r')^2 + b_r'`
//!    contributed by the row-pass values. The bottom-up
//!    sweep only overwrites a pixel when it finds a strictly smaller
//!    distance.
//!
//! An optional final pass replaces every distance with `floor(sqrt(d))`.
//!
//! # Output layout
//!
//! The result is a 3-channel `Grid<i32>`:
//!
//! | channel | meaning |
//! |---|---|
//! | [`DISTANCE`] | squared distance (or its integer square root), [`INFINITY`] if no edge exists |
//! | [`NEAREST_ROW`] | row (y) of the nearest edge, [`UNSET_COORD`] if none |
//! | [`NEAREST_COL`] | column (x) of the nearest edge, [`UNSET_COORD`] if none |
//!
//! # Examples
//!
//! ```
//! use distmap_core::EdgeMask;
//! use distmap_region::compute_distance_transform;
//!
//! let mask = EdgeMask::edge_mask_from_points(5, 5, &[(2, 2)]).unwrap();
//! let dt = compute_distance_transform(&mask, false).unwrap();
//!
//! let sample = dt.sample(0, 0).unwrap();
//! assert_eq!(sample.distance, 8);
//! assert_eq!((sample.nearest_x, sample.nearest_y), (2, 2));
//! ```

mod envelope;
mod lookup;
mod matching;
mod row_pass;

pub use lookup::SquaredDistanceLookup;
pub use matching::angular_difference;

use crate::error::{RegionError, RegionResult};
use distmap_core::{EdgeMask, Grid};
use envelope::{CurveStack, SweepContext, SweepDirection};
use log::{debug, trace, warn};

/// Distance value of a pixel with no reachable edge pixel.
///
/// Never produced by an actual distance computation; the largest
/// representable squared distance is bounded well below it.
pub const INFINITY: i32 = i32::MAX;

/// Coordinate stored for pixels with no nearest edge.
pub const UNSET_COORD: i32 = -1;

/// Channel holding the (squared) distance
pub const DISTANCE: u32 = 0;
/// Channel holding the row of the nearest edge
pub const NEAREST_ROW: u32 = 1;
/// Channel holding the column of the nearest edge
pub const NEAREST_COL: u32 = 2;

pub(crate) const CHANNELS: usize = 3;

/// Options for [`DistanceTransform::compute`]
#[derive(Debug, Clone, Default)]
pub struct DistanceTransformOptions {
    /// Replace squared distances with `floor(sqrt(d))` after both sweeps
    pub compute_square_root: bool,
}

impl DistanceTransformOptions {
    /// Create options producing squared distances
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether distances are square-rooted
    pub fn with_square_root(mut self, compute_square_root: bool) -> Self {
        self.compute_square_root = compute_square_root;
        self
    }
}

/// One resolved pixel of a distance transform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceSample {
    /// Squared distance, or its integer square root in square-root mode
    pub distance: i32,
    /// Column of the nearest edge pixel
    pub nearest_x: u32,
    /// Row of the nearest edge pixel
    pub nearest_y: u32,
}

/// Result of the Euclidean distance transform
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceTransform {
    grid: Grid<i32>,
    square_root: bool,
}

/// Compute the exact Euclidean distance transform of an edge mask.
///
/// # Arguments
///
/// * `mask` - Single-channel edge mask (`true` = edge pixel)
/// * `compute_square_root` - Store `floor(sqrt(d))` instead of `d`
///
/// # Errors
///
/// Returns an error if the mask has more than one channel or is too large
/// for squared distances to fit in an `i32`.
pub fn compute_distance_transform(
    mask: &EdgeMask,
    compute_square_root: bool,
) -> RegionResult<DistanceTransform> {
    let options = DistanceTransformOptions::new().with_square_root(compute_square_root);
    DistanceTransform::compute(mask, &options)
}

impl DistanceTransform {
    /// Compute the distance transform with the given options.
    ///
    /// A mask without edge pixels is valid input; every pixel of the
    /// result is then unresolved.
    pub fn compute(mask: &EdgeMask, options: &DistanceTransformOptions) -> RegionResult<Self> {
        if mask.channels() != 1 {
            return Err(RegionError::UnsupportedChannels {
                expected: 1,
                actual: mask.channels(),
            });
        }

        let (width, height) = mask.dimensions();
        let max_squared = (width as i64 - 1).pow(2) + (height as i64 - 1).pow(2);
        if max_squared >= INFINITY as i64 {
            return Err(RegionError::InvalidParameters(format!(
                "{width}x{height} mask is too large for i32 squared distances"
            )));
        }

        let edges = mask.count_edges();
        debug!(
            "distance transform: {width}x{height}, {edges} edge pixels, sqrt = {}",
            options.compute_square_root
        );
        if edges == 0 {
            warn!("distance transform of a mask without edge pixels; all pixels unresolved");
        }

        let lookup = SquaredDistanceLookup::build(width.max(height) as usize);
        let rows = build_row_buffer(mask, &lookup)?;
        trace!("row pass complete");

        let mut grid = column_pass(mask, rows, &lookup);
        trace!("column sweeps complete");

        debug_check_invariant(mask, &grid);

        if options.compute_square_root {
            square_root_in_place(&mut grid);
        }

        let resolved = grid
            .data()
            .chunks_exact(CHANNELS)
            .filter(|p| p[0] != INFINITY)
            .count();
        debug!("distance transform done: {resolved} of {} pixels resolved", width * height);

        Ok(Self {
            grid,
            square_root: options.compute_square_root,
        })
    }

    /// Width of the transformed image
    #[inline]
    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    /// Height of the transformed image
    #[inline]
    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    /// Whether channel 0 holds square-rooted distances
    #[inline]
    pub fn is_square_root(&self) -> bool {
        self.square_root
    }

    /// The raw 3-channel result buffer
    #[inline]
    pub fn grid(&self) -> &Grid<i32> {
        &self.grid
    }

    /// Consume the result, returning the raw buffer
    pub fn into_grid(self) -> Grid<i32> {
        self.grid
    }

    /// Distance and nearest edge at (x, y).
    ///
    /// Returns `None` if (x, y) is outside the image or no edge pixel
    /// was found for it.
    pub fn sample(&self, x: u32, y: u32) -> Option<DistanceSample> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pixel = self.grid.pixel(x, y);
        if pixel[0] == INFINITY {
            return None;
        }
        Some(DistanceSample {
            distance: pixel[0],
            nearest_x: pixel[2] as u32,
            nearest_y: pixel[1] as u32,
        })
    }

    /// Euclidean distance at (x, y) regardless of the storage mode.
    ///
    /// In square-root mode this is the stored (truncated) value.
    pub fn distance(&self, x: u32, y: u32) -> Option<f64> {
        self.sample(x, y).map(|s| {
            if self.square_root {
                s.distance as f64
            } else {
                (s.distance as f64).sqrt()
            }
        })
    }
}

/// Build the intermediate buffer: squared distance to the nearest edge in
/// the same row, plus its coordinates.
fn build_row_buffer(mask: &EdgeMask, lookup: &SquaredDistanceLookup) -> RegionResult<Grid<i32>> {
    let (width, height) = mask.dimensions();
    let mut rows = Grid::new(width, height, CHANNELS as u32)?;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        let stride = rows.row_stride();
        rows.data_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .for_each(|(y, out)| row_pass::fill_row(y as u32, mask.row(y as u32), lookup, out));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for y in 0..height {
            row_pass::fill_row(y, mask.row(y), lookup, rows.row_mut(y));
        }
    }

    Ok(rows)
}

/// Sweep one column in both directions into a `height * 3` buffer.
fn sweep_column(ctx: &SweepContext<'_>, x: usize, stack: &mut CurveStack, column: &mut [i32]) {
    ctx.sweep(x, SweepDirection::TopDown, false, stack, column);
    ctx.sweep(x, SweepDirection::BottomUp, true, stack, column);
}

fn scatter_column(grid: &mut Grid<i32>, x: usize, column: &[i32]) {
    let stride = grid.row_stride();
    let data = grid.data_mut();
    for (y, values) in column.chunks_exact(CHANNELS).enumerate() {
        let start = y * stride + x * CHANNELS;
        data[start..start + CHANNELS].copy_from_slice(values);
    }
}

/// Run both sweeps over every column, writing results back into the
/// row-pass buffer.
///
/// The sweeps of column `x` read only column `x` of the row buffer, so a
/// finished column can replace it in place. The parallel build sweeps all
/// columns into one column-major scratch buffer first, keeping peak memory
/// at two full buffers.
fn column_pass(mask: &EdgeMask, mut grid: Grid<i32>, lookup: &SquaredDistanceLookup) -> Grid<i32> {
    let (width, height) = mask.dimensions();
    let (width, height) = (width as usize, height as usize);
    let column_len = height * CHANNELS;

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        let mut columns = vec![0; width * column_len];
        {
            let ctx = SweepContext {
                mask: mask.data(),
                rows: grid.data(),
                lookup,
                width,
                height,
            };
            columns
                .par_chunks_mut(column_len)
                .enumerate()
                .for_each_init(
                    || CurveStack::with_capacity(height),
                    |stack, (x, column)| sweep_column(&ctx, x, stack, column),
                );
        }
        for (x, column) in columns.chunks_exact(column_len).enumerate() {
            scatter_column(&mut grid, x, column);
        }
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut stack = CurveStack::with_capacity(height);
        let mut column = vec![0; column_len];
        for x in 0..width {
            let ctx = SweepContext {
                mask: mask.data(),
                rows: grid.data(),
                lookup,
                width,
                height,
            };
            sweep_column(&ctx, x, &mut stack, &mut column);
            scatter_column(&mut grid, x, &column);
        }
    }

    grid
}

/// Check `d == dy^2 + dx^2` and that the nearest pixel is an edge, for
/// every resolved pixel. Debug builds only.
fn debug_check_invariant(mask: &EdgeMask, grid: &Grid<i32>) {
    if !cfg!(debug_assertions) {
        return;
    }
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let p = grid.pixel(x, y);
            if p[0] == INFINITY {
                debug_assert_eq!((p[1], p[2]), (UNSET_COORD, UNSET_COORD));
                continue;
            }
            let dy = y as i64 - p[1] as i64;
            let dx = x as i64 - p[2] as i64;
            debug_assert_eq!(p[0] as i64, dy * dy + dx * dx, "distance at ({x}, {y})");
            debug_assert!(
                mask.is_edge(p[2] as u32, p[1] as u32),
                "nearest pixel of ({x}, {y}) is not an edge"
            );
        }
    }
}

/// Replace every resolved distance with its integer square root.
fn square_root_in_place(grid: &mut Grid<i32>) {
    for pixel in grid.data_mut().chunks_exact_mut(CHANNELS) {
        if pixel[0] != INFINITY {
            pixel[0] = pixel[0].isqrt();
        }
    }
}
