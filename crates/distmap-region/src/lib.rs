//! distmap-region - Distance transforms and region analysis
//!
//! This crate provides:
//!
//! - **Euclidean distance transform** - Exact, linear-time squared distance
//!   to the nearest edge pixel, with the coordinates of that edge pixel
//! - **Template matching** - Chamfer and orientation scores over a
//!   computed distance transform, nearest-edge queries
//! - **Connected component analysis** - Union-find labeling of edge masks
//!
//! # Examples
//!
//! ## Distance transform and Chamfer matching
//!
//! ```
//! use distmap_core::{EdgeMask, Point};
//! use distmap_region::compute_distance_transform;
//!
//! let mask = EdgeMask::edge_mask_from_points(8, 8, &[(3, 3), (3, 4)]).unwrap();
//! let dt = compute_distance_transform(&mask, false).unwrap();
//!
//! assert_eq!(dt.sample(0, 0).unwrap().distance, 18);
//!
//! let template = [Point::new(0, 0), Point::new(0, 1)];
//! let score = dt.chamfer_match(3, 3, &template, 10, None).unwrap();
//! assert_eq!(score, 0.0);
//! ```
//!
//! ## Finding connected components
//!
//! ```
//! use distmap_core::EdgeMask;
//! use distmap_region::{ConnectivityType, find_connected_components};
//!
//! let mask = EdgeMask::edge_mask_from_points(100, 100, &[(10, 10), (11, 10), (50, 50)]).unwrap();
//! let components = find_connected_components(&mask, ConnectivityType::FourWay).unwrap();
//! assert_eq!(components.len(), 2);
//! ```
//!
//! # Features
//!
//! - `parallel` - Run the row pass and the column sweeps on the rayon
//!   thread pool. Results are identical to the sequential build; run
//!   `cargo test -p distmap-region --features parallel` to check it.

pub mod conncomp;
pub mod distance;
pub mod error;

// Re-export core types
pub use distmap_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

// Re-export distance transform types and functions
pub use distance::{
    DISTANCE, DistanceSample, DistanceTransform, DistanceTransformOptions, INFINITY, NEAREST_COL,
    NEAREST_ROW, SquaredDistanceLookup, UNSET_COORD, angular_difference,
    compute_distance_transform,
};

// Re-export conncomp types and functions
pub use conncomp::{
    ConnectedComponent, ConnectivityType, component_sizes, filter_components_by_size,
    find_connected_components, label_connected_components,
};
