//! Template matching regression test
//!
//! Chamfer and orientation scores of templates sampled from the edge mask
//! itself, shifted off the edges, and placed on masks without edges.

use distmap_core::{EdgeMask, Grid, OrientationField, OrientedPoint, Point, Scale};
use distmap_region::{RegionError, compute_distance_transform};
use distmap_test::{RegParams, edge_pixels, random_edge_mask};
use std::f64::consts::FRAC_PI_2;

/// Outline of a 7x5 rectangle with its top-left corner at (3, 2)
fn rectangle_mask() -> EdgeMask {
    let mut points = Vec::new();
    for x in 3..10 {
        points.push((x, 2));
        points.push((x, 6));
    }
    for y in 3..6 {
        points.push((3, y));
        points.push((9, y));
    }
    EdgeMask::edge_mask_from_points(14, 10, &points).unwrap()
}

/// Template offsets of the same rectangle relative to its corner
fn rectangle_template() -> Vec<Point> {
    let mask = rectangle_mask();
    edge_pixels(&mask)
        .into_iter()
        .map(|(x, y)| Point::new(x as i32 - 3, y as i32 - 2))
        .collect()
}

#[test]
fn chamfer_reg() {
    let mut rp = RegParams::new("chamfer");

    let mask = rectangle_mask();
    let dt = compute_distance_transform(&mask, false).unwrap();
    let template = rectangle_template();

    // Exact placement matches perfectly
    let score = dt.chamfer_match(3, 2, &template, 10, None).unwrap();
    rp.compare_values(0.0, score, 0.0);

    // One pixel off: every point lies at distance 1 or on the other edge
    let shifted = dt.chamfer_match(4, 2, &template, 10, None).unwrap();
    assert!(shifted > 0.0 && shifted <= 0.1);

    // The true placement scores better than every other anchor
    let mut best = (f64::MAX, 0, 0);
    for y in 0..10 {
        for x in 0..14 {
            if let Ok(s) = dt.chamfer_match(x, y, &template, 10, None) {
                if s < best.0 {
                    best = (s, x, y);
                }
            }
        }
    }
    rp.compare_values(3.0, best.1 as f64, 0.0);
    rp.compare_values(2.0, best.2 as f64, 0.0);

    // Template from a random mask scores zero on that mask
    for _ in 0..20 {
        let mask = random_edge_mask(12, 12, 8).unwrap();
        let dt = compute_distance_transform(&mask, false).unwrap();
        let points: Vec<Point> = edge_pixels(&mask)
            .into_iter()
            .map(|(x, y)| Point::new(x as i32, y as i32))
            .collect();
        let score = dt.chamfer_match(0, 0, &points, 5, None).unwrap();
        rp.compare_values(0.0, score, 0.0);
    }

    // Square-root storage gives the same score where the distance is whole
    let rooted = compute_distance_transform(&mask, true).unwrap();
    let a = dt.chamfer_match(0, 2, &[Point::new(0, 0)], 20, None).unwrap();
    let b = rooted.chamfer_match(0, 2, &[Point::new(0, 0)], 20, None).unwrap();
    rp.compare_values(0.15, a, 1e-12);
    rp.compare_values(a, b, 1e-12);

    // Scaled template: half-size rectangle scaled by 2 still lands on edges
    let corners = [Point::new(0, 0), Point::new(3, 0), Point::new(0, 2), Point::new(3, 2)];
    let score = dt
        .chamfer_match(3, 2, &corners, 10, Some(Scale::uniform(2.0)))
        .unwrap();
    rp.compare_values(0.0, score, 0.0);

    // No edges at all: every point is penalised at the cap
    let empty = EdgeMask::edge_mask(10, 10).unwrap();
    let dt_empty = compute_distance_transform(&empty, false).unwrap();
    let score = dt_empty.chamfer_match(0, 0, &template, 10, None).unwrap();
    rp.compare_values(1.0, score, 0.0);

    // Template entirely outside the image
    let far = [Point::new(100, 100)];
    assert!(matches!(
        dt.chamfer_match(0, 0, &far, 10, None),
        Err(RegionError::EmptyTemplate)
    ));

    assert!(rp.cleanup(), "chamfer regression test failed");
}

#[test]
fn orientation_reg() {
    let mut rp = RegParams::new("orientation");

    let mask = rectangle_mask();
    let dt = compute_distance_transform(&mask, false).unwrap();

    // Horizontal edges at orientation 0, vertical edges at pi/2
    let mut field: OrientationField = Grid::new(14, 10, 1).unwrap();
    for y in 3..6 {
        field.set(3, y, 0, FRAC_PI_2 as f32).unwrap();
        field.set(9, y, 0, FRAC_PI_2 as f32).unwrap();
    }

    // Points just inside the top and left sides, oriented like the sides
    let aligned = [
        OrientedPoint::new(3, 1, 0.0),
        OrientedPoint::new(1, 2, FRAC_PI_2 as f32),
    ];
    let score = dt.orientation_match(3, 2, &aligned, &field, None).unwrap();
    rp.compare_values(0.0, score, 1e-6);

    // Same points with the orientations swapped
    let crossed = [
        OrientedPoint::new(3, 1, FRAC_PI_2 as f32),
        OrientedPoint::new(1, 2, 0.0),
    ];
    let score = dt.orientation_match(3, 2, &crossed, &field, None).unwrap();
    rp.compare_values(1.0, score, 1e-6);

    // Orientations differing by pi are the same orientation
    let flipped = [OrientedPoint::new(3, 1, std::f32::consts::PI)];
    let score = dt.orientation_match(3, 2, &flipped, &field, None).unwrap();
    rp.compare_values(0.0, score, 1e-6);

    // No edges: every point counts as perpendicular
    let empty = EdgeMask::edge_mask(14, 10).unwrap();
    let dt_empty = compute_distance_transform(&empty, false).unwrap();
    let score = dt_empty
        .orientation_match(3, 2, &aligned, &field, None)
        .unwrap();
    rp.compare_values(1.0, score, 1e-9);

    // Field of the wrong size is rejected
    let small: OrientationField = Grid::new(5, 5, 1).unwrap();
    assert!(matches!(
        dt.orientation_match(0, 0, &aligned, &small, None),
        Err(RegionError::DimensionMismatch { .. })
    ));

    assert!(rp.cleanup(), "orientation regression test failed");
}

#[test]
fn nearest_edges_reg() {
    let mut rp = RegParams::new("nearest_edges");

    let mask = rectangle_mask();
    let dt = compute_distance_transform(&mask, false).unwrap();

    let queries = [Point::new(0, 2), Point::new(12, 6), Point::new(6, 0), Point::new(-1, 4)];
    let nearest = dt.find_nearest_edges(&queries);
    rp.compare_values(3.0, nearest.len() as f64, 0.0);
    assert_eq!(nearest[&Point::new(0, 2)], Point::new(3, 2));
    assert_eq!(nearest[&Point::new(12, 6)], Point::new(9, 6));
    assert_eq!(nearest[&Point::new(6, 0)], Point::new(6, 2));

    assert!(rp.cleanup(), "nearest_edges regression test failed");
}
