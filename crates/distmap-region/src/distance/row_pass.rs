//! Row pass
//!
//! Builds the intermediate buffer: for every pixel, the squared distance
//! to the nearest edge pixel in the same row together with that edge's
//! coordinates. Rows are independent of each other.

use super::lookup::SquaredDistanceLookup;
use super::{CHANNELS, INFINITY, UNSET_COORD};

#[inline]
fn write(out: &mut [i32], x: usize, distance: i32, row: i32, col: i32) {
    let cell = &mut out[x * CHANNELS..(x + 1) * CHANNELS];
    cell[0] = distance;
    cell[1] = row;
    cell[2] = col;
}

/// Fill one row of the intermediate buffer.
///
/// `mask_row` holds the edge flags of row `y`; `out` receives
/// `mask_row.len() * 3` values (distance, row, column per pixel). A row
/// without edges is filled with `INFINITY` and unset coordinates.
///
/// Scanning left to right, each non-edge pixel first takes the previous
/// edge. When a new edge is found, the pixels before it that are strictly
/// closer to it are rewritten: all leading pixels for the first edge, and
/// the right half of the gap otherwise. A pixel equidistant from two edges
/// keeps the left one.
pub(crate) fn fill_row(y: u32, mask_row: &[bool], lookup: &SquaredDistanceLookup, out: &mut [i32]) {
    let row = y as i32;
    let mut last_edge: Option<usize> = None;

    for (x, &is_edge) in mask_row.iter().enumerate() {
        if is_edge {
            match last_edge {
                None => {
                    for k in 0..x {
                        write(out, k, lookup[x - k], row, x as i32);
                    }
                }
                Some(last) => {
                    let gap = x - last - 1;
                    for j in 1..=(gap >> 1) {
                        write(out, x - j, lookup[j], row, x as i32);
                    }
                }
            }
            write(out, x, 0, row, x as i32);
            last_edge = Some(x);
        } else {
            match last_edge {
                None => write(out, x, INFINITY, UNSET_COORD, UNSET_COORD),
                Some(last) => write(out, x, lookup[x - last], row, last as i32),
            }
        }
    }
}
