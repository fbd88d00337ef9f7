//! distmap-test - Regression test framework for distmap
//!
//! This crate provides a regression test framework supporting three modes:
//!
//! - **Generate**: Create golden files for comparison
//! - **Compare**: Compare results with golden files
//! - **Display**: Run tests without comparison
//!
//! It also provides test inputs: random edge masks and the brute-force
//! reference distance transform that exact results are checked against.
//!
//! # Usage
//!
//! ```ignore
//! use distmap_test::{RegParams, brute_force_distance_transform, random_edge_mask};
//!
//! let mut rp = RegParams::new("edt");
//! let mask = random_edge_mask(10, 10, 5).unwrap();
//! let expected = brute_force_distance_transform(&mask).unwrap();
//! rp.compare_values(8.0, distance as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "generate", "compare", or "display"
//! - `RUST_LOG`: Log filter for library output, e.g. `debug`

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use distmap_core::{EdgeMask, Grid};

/// Distance stored by the reference transform when the mask has no edges
pub const NO_EDGE: i32 = i32::MAX;

/// Build a mask with exactly `count` distinct edge pixels at random
/// positions.
///
/// # Errors
///
/// Returns an error if the dimensions are invalid or `count` exceeds the
/// number of pixels.
pub fn random_edge_mask(width: u32, height: u32, count: usize) -> TestResult<EdgeMask> {
    let mut mask = EdgeMask::edge_mask(width, height)
        .map_err(|e| TestError::InvalidInput(e.to_string()))?;
    let total = (width as usize) * (height as usize);
    if count > total {
        return Err(TestError::InvalidInput(format!(
            "cannot place {count} edges in a {width}x{height} mask"
        )));
    }

    if count == total {
        mask.set_all(true);
        return Ok(mask);
    }

    let mut placed = 0;
    while placed < count {
        let x = rand::random_range(0..width);
        let y = rand::random_range(0..height);
        if !mask.is_edge(x, y) {
            mask.set_unchecked(x, y, 0, true);
            placed += 1;
        }
    }
    Ok(mask)
}

/// All edge pixels of a mask as (x, y), in raster order
pub fn edge_pixels(mask: &EdgeMask) -> Vec<(u32, u32)> {
    let mut points = Vec::new();
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            if mask.is_edge(x, y) {
                points.push((x, y));
            }
        }
    }
    points
}

/// Reference transform by exhaustive search over all edge pixels.
///
/// Returns a 3-channel grid laid out like the fast transform: squared
/// distance, row and column of the first nearest edge in raster order.
/// Pixels of a mask without edges hold (`NO_EDGE`, -1, -1).
pub fn brute_force_distance_transform(mask: &EdgeMask) -> TestResult<Grid<i32>> {
    let edges = edge_pixels(mask);
    let (width, height) = mask.dimensions();
    let mut data = Vec::with_capacity((width * height * 3) as usize);

    for y in 0..height as i64 {
        for x in 0..width as i64 {
            let mut best = (NO_EDGE as i64, -1i64, -1i64);
            for &(ex, ey) in &edges {
                let dx = x - ex as i64;
                let dy = y - ey as i64;
                let d = dx * dx + dy * dy;
                if d < best.0 {
                    best = (d, ey as i64, ex as i64);
                }
            }
            data.extend_from_slice(&[best.0 as i32, best.1 as i32, best.2 as i32]);
        }
    }

    Grid::from_data(width, height, 3, data).map_err(|e| TestError::InvalidInput(e.to_string()))
}

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // distmap-test is at crates/distmap-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the golden files directory
pub fn golden_dir() -> String {
    format!("{}/tests/golden", workspace_root())
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
