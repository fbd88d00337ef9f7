//! distmap - Exact Euclidean distance transform for Rust
//!
//! # Overview
//!
//! distmap computes, for every pixel of a binary edge mask, the squared
//! Euclidean distance to the nearest edge pixel together with that edge
//! pixel's coordinates. On top of the transform it provides:
//!
//! - Chamfer matching of point templates
//! - Orientation matching against a per-pixel orientation field
//! - Nearest-edge lookup for arbitrary query points
//! - Connected component labeling of edge masks
//!
//! Enable the `parallel` feature to run the row and column passes on a
//! rayon thread pool.
//!
//! # Example
//!
//! ```
//! use distmap::{EdgeMask, Point, compute_distance_transform};
//!
//! let mask = EdgeMask::edge_mask_from_points(8, 8, &[(4, 4)]).unwrap();
//! let dt = compute_distance_transform(&mask, false).unwrap();
//! let sample = dt.sample(1, 0).unwrap();
//! assert_eq!(sample.distance, 25);
//! assert_eq!((sample.nearest_x, sample.nearest_y), (4, 4));
//!
//! let score = dt.chamfer_match(4, 4, &[Point::new(0, 0)], 5, None).unwrap();
//! assert_eq!(score, 0.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use distmap_core::*;

// Re-export the algorithms at the top level and as a module
pub use distmap_region as region;
pub use distmap_region::{
    ConnectedComponent, ConnectivityType, DistanceSample, DistanceTransform,
    DistanceTransformOptions, RegionError, RegionResult, angular_difference,
    compute_distance_transform, find_connected_components, label_connected_components,
};
