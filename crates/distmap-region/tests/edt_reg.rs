//! Euclidean distance transform regression test
//!
//! Checks the fast transform against exhaustive search on random masks,
//! the distance/nearest-pixel invariant, mirror symmetry, the square-root
//! mode and a golden output for a single centered edge.
//!
//! The rayon build of the transform is checked by the same comparisons
//! plus `edt_parallel_reg`:
//!
//! ```text
//! cargo test -p distmap-region --features parallel
//! ```

use distmap_core::{EdgeMask, Grid};
use distmap_region::{
    DISTANCE, DistanceTransform, DistanceTransformOptions, INFINITY, NEAREST_COL, NEAREST_ROW,
    UNSET_COORD, compute_distance_transform,
};
use distmap_test::{
    NO_EDGE, RegParams, brute_force_distance_transform, edge_pixels, random_edge_mask,
};

const ITERATIONS: usize = 200;

/// Verify one resolved pixel: the stored distance matches its coordinates
/// and the coordinates name an edge pixel.
fn check_pixel(mask: &EdgeMask, dt: &DistanceTransform, x: u32, y: u32) -> bool {
    let p = dt.grid().pixel(x, y);
    if p[0] == INFINITY {
        return p[1] == UNSET_COORD && p[2] == UNSET_COORD;
    }
    let dy = y as i64 - p[1] as i64;
    let dx = x as i64 - p[2] as i64;
    p[0] as i64 == dy * dy + dx * dx && mask.is_edge(p[2] as u32, p[1] as u32)
}

/// Compare squared distances with the reference and check every pixel's
/// coordinates. Equidistant edges may resolve differently, so the
/// coordinates are not compared directly.
fn check_against_reference(rp: &mut RegParams, mask: &EdgeMask, dt: &DistanceTransform) {
    let reference = brute_force_distance_transform(mask).unwrap();
    let mut mismatches = 0;
    for y in 0..mask.height() {
        for x in 0..mask.width() {
            let expected = reference.get(x, y, DISTANCE).unwrap();
            let actual = dt.grid().get(x, y, DISTANCE).unwrap();
            let expected = if expected == NO_EDGE { INFINITY } else { expected };
            if expected != actual || !check_pixel(mask, dt, x, y) {
                mismatches += 1;
            }
        }
    }
    rp.compare_values(0.0, mismatches as f64, 0.0);
}

#[test]
fn edt_reg() {
    let mut rp = RegParams::new("edt");

    // --- Single centered edge: golden output ---
    let mask = EdgeMask::edge_mask_from_points(5, 5, &[(2, 2)]).unwrap();
    let dt = compute_distance_transform(&mask, false).unwrap();
    rp.write_grid_and_check(dt.grid()).unwrap();
    rp.compare_values(8.0, dt.grid().get(0, 0, DISTANCE).unwrap() as f64, 0.0);
    rp.compare_values(5.0, dt.grid().get(1, 0, DISTANCE).unwrap() as f64, 0.0);
    rp.compare_values(0.0, dt.grid().get(2, 2, DISTANCE).unwrap() as f64, 0.0);

    // Both entry points agree, and the grid survives a serialization trip
    let via_options =
        DistanceTransform::compute(&mask, &DistanceTransformOptions::default()).unwrap();
    rp.compare_grids(dt.grid(), via_options.grid());
    let bytes = dt.grid().write_to_bytes().unwrap();
    rp.compare_grids(dt.grid(), &Grid::read_from_bytes(&bytes).unwrap());

    // --- Random masks against exhaustive search ---
    for _ in 0..ITERATIONS {
        let mask = random_edge_mask(10, 10, 5).unwrap();
        let dt = compute_distance_transform(&mask, false).unwrap();
        check_against_reference(&mut rp, &mask, &dt);
    }

    // --- Non-square and sparse masks ---
    for &(w, h, n) in &[(17, 4, 3), (3, 23, 2), (31, 29, 1), (12, 12, 60)] {
        let mask = random_edge_mask(w, h, n).unwrap();
        let dt = compute_distance_transform(&mask, false).unwrap();
        check_against_reference(&mut rp, &mask, &dt);
    }

    assert!(rp.cleanup(), "edt regression test failed");
}

#[test]
fn edt_edges_reg() {
    let mut rp = RegParams::new("edt_edges");

    // Every edge pixel is its own nearest edge
    for _ in 0..50 {
        let mask = random_edge_mask(16, 11, 20).unwrap();
        let dt = compute_distance_transform(&mask, false).unwrap();
        let mut wrong = 0;
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                if mask.is_edge(x, y) && dt.grid().pixel(x, y) != [0, y as i32, x as i32] {
                    wrong += 1;
                }
            }
        }
        rp.compare_values(0.0, wrong as f64, 0.0);
    }

    // All-edge mask: distance zero everywhere
    let full = Grid::new_with_value(6, 4, 1, true).unwrap();
    let dt = compute_distance_transform(&full, false).unwrap();
    let total: i64 = dt
        .grid()
        .data()
        .chunks_exact(3)
        .map(|p| p[0] as i64)
        .sum();
    rp.compare_values(0.0, total as f64, 0.0);

    // Empty mask: everything unresolved, nothing panics
    let empty = EdgeMask::edge_mask(7, 5).unwrap();
    let dt = compute_distance_transform(&empty, false).unwrap();
    let unresolved = dt
        .grid()
        .data()
        .chunks_exact(3)
        .filter(|p| p[0] == INFINITY && p[1] == UNSET_COORD && p[2] == UNSET_COORD)
        .count();
    rp.compare_values(35.0, unresolved as f64, 0.0);

    assert!(rp.cleanup(), "edt_edges regression test failed");
}

/// Nearest edge of (x, y) as (col, row), if no other edge is equally close.
fn unique_nearest(edges: &[(u32, u32)], x: u32, y: u32) -> Option<(i32, i32)> {
    let squared = |&(ex, ey): &(u32, u32)| {
        let dx = x as i64 - ex as i64;
        let dy = y as i64 - ey as i64;
        dx * dx + dy * dy
    };
    let best = edges.iter().map(squared).min()?;
    let mut nearest = edges.iter().filter(|e| squared(e) == best);
    let &(ex, ey) = nearest.next()?;
    match nearest.next() {
        Some(_) => None,
        None => Some((ex as i32, ey as i32)),
    }
}

/// Mirroring the mask mirrors the distance field.
///
/// Equidistant edges resolve with a left bias in the row pass, and left
/// becomes right under the mirror, so tied pixels may name different
/// edges. Coordinates are compared exactly wherever the nearest edge is
/// unique; tied pixels are only checked to name a valid edge.
#[test]
fn edt_symmetry_reg() {
    let mut rp = RegParams::new("edt_symmetry");

    for _ in 0..50 {
        let mask = random_edge_mask(13, 9, 6).unwrap();
        let edges = edge_pixels(&mask);
        let flipped = mask.flip_horizontal();
        let dt = compute_distance_transform(&mask, false).unwrap();
        let dt_flipped = compute_distance_transform(&flipped, false).unwrap();
        let last_col = mask.width() as i32 - 1;

        let mut mismatches = 0;
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                let mx = mask.width() - 1 - x;
                let a = dt.grid().pixel(x, y);
                let b = dt_flipped.grid().pixel(mx, y);
                if a[0] != b[0] || !check_pixel(&flipped, &dt_flipped, mx, y) {
                    mismatches += 1;
                    continue;
                }
                if let Some((col, row)) = unique_nearest(&edges, x, y) {
                    let unflipped = (last_col - b[NEAREST_COL as usize], b[NEAREST_ROW as usize]);
                    let direct = (a[NEAREST_COL as usize], a[NEAREST_ROW as usize]);
                    if unflipped != (col, row) || direct != (col, row) {
                        mismatches += 1;
                    }
                }
            }
        }
        rp.compare_values(0.0, mismatches as f64, 0.0);
    }

    assert!(rp.cleanup(), "edt_symmetry regression test failed");
}

/// The rayon build must reproduce the sequential results exactly: the
/// golden grid written by the sequential build, and exhaustive search on
/// masks wide and tall enough to split across threads.
#[cfg(feature = "parallel")]
#[test]
fn edt_parallel_reg() {
    let mut rp = RegParams::new("edt_parallel");

    let mask = EdgeMask::edge_mask_from_points(5, 5, &[(2, 2)]).unwrap();
    let dt = compute_distance_transform(&mask, false).unwrap();
    let golden_path = format!("{}/edt_golden.01.grid", distmap_test::golden_dir());
    let golden = Grid::read_from_file(&golden_path).unwrap();
    rp.compare_grids(&golden, dt.grid());

    for _ in 0..ITERATIONS {
        let mask = random_edge_mask(10, 10, 5).unwrap();
        let dt = compute_distance_transform(&mask, false).unwrap();
        check_against_reference(&mut rp, &mask, &dt);
    }

    for &(w, h, n) in &[(257, 3, 7), (4, 301, 5), (96, 80, 40)] {
        let mask = random_edge_mask(w, h, n).unwrap();
        let dt = compute_distance_transform(&mask, false).unwrap();
        check_against_reference(&mut rp, &mask, &dt);
    }

    assert!(rp.cleanup(), "edt_parallel regression test failed");
}

#[test]
fn edt_sqrt_reg() {
    let mut rp = RegParams::new("edt_sqrt");

    for _ in 0..50 {
        let mask = random_edge_mask(20, 15, 4).unwrap();
        let squared = compute_distance_transform(&mask, false).unwrap();
        let options = DistanceTransformOptions::new().with_square_root(true);
        let rooted = DistanceTransform::compute(&mask, &options).unwrap();
        assert!(rooted.is_square_root());

        let mut mismatches = 0;
        for y in 0..mask.height() {
            for x in 0..mask.width() {
                let s = squared.grid().pixel(x, y);
                let r = rooted.grid().pixel(x, y);
                let expected = (s[0] as f64).sqrt().floor() as i32;
                if r[0] != expected
                    || r[NEAREST_ROW as usize] != s[NEAREST_ROW as usize]
                    || r[NEAREST_COL as usize] != s[NEAREST_COL as usize]
                {
                    mismatches += 1;
                }
            }
        }
        rp.compare_values(0.0, mismatches as f64, 0.0);
    }

    // Unresolved pixels keep the sentinel in square-root mode
    let empty = EdgeMask::edge_mask(4, 4).unwrap();
    let rooted = compute_distance_transform(&empty, true).unwrap();
    rp.compare_values(
        INFINITY as f64,
        rooted.grid().get(2, 2, DISTANCE).unwrap() as f64,
        0.0,
    );

    assert!(rp.cleanup(), "edt_sqrt regression test failed");
}
