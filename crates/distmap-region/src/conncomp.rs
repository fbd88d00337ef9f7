//! Connected component analysis
//!
//! This module provides functions for finding and labeling connected
//! components of edge pixels. It uses a Union-Find (disjoint set) data
//! structure in a two-pass raster scan.

use crate::error::{RegionError, RegionResult};
use distmap_core::{EdgeMask, Grid, Rect};

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

/// A connected component in an edge mask
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label of this component (1-based)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: Rect,
}

/// Disjoint set over provisional labels
struct UnionFind {
    parent: Vec<u32>,
}

impl UnionFind {
    fn new() -> Self {
        // Index 0 is the background and never merged
        Self { parent: vec![0] }
    }

    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        label
    }

    fn find(&mut self, mut label: u32) -> u32 {
        while self.parent[label as usize] != label {
            // Path halving
            let grandparent = self.parent[self.parent[label as usize] as usize];
            self.parent[label as usize] = grandparent;
            label = grandparent;
        }
        label
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            // Keep the smaller root so labels stay in raster order
            let (keep, merge) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[merge as usize] = keep;
        }
    }
}

fn check_mask(mask: &EdgeMask) -> RegionResult<()> {
    if mask.channels() != 1 {
        return Err(RegionError::UnsupportedChannels {
            expected: 1,
            actual: mask.channels(),
        });
    }
    Ok(())
}

/// Label all connected components of an edge mask
///
/// Returns a single-channel `u32` grid where each edge pixel holds the
/// label of its component and background pixels hold 0. Labels run from 1
/// to the number of components, in raster order of each component's
/// first pixel.
///
/// # Errors
///
/// Returns an error if the mask is not single-channel.
pub fn label_connected_components(
    mask: &EdgeMask,
    connectivity: ConnectivityType,
) -> RegionResult<Grid<u32>> {
    check_mask(mask)?;
    let (width, height) = mask.dimensions();
    let w = width as usize;
    let edges = mask.data();
    let mut labels: Grid<u32> = Grid::new(width, height, 1)?;
    let mut sets = UnionFind::new();

    // First pass: provisional labels, recording equivalences
    {
        let out = labels.data_mut();
        for y in 0..height as usize {
            for x in 0..w {
                let idx = y * w + x;
                if !edges[idx] {
                    continue;
                }

                let mut neighbors = [0u32; 4];
                let mut n = 0;
                if x > 0 && out[idx - 1] != 0 {
                    neighbors[n] = out[idx - 1];
                    n += 1;
                }
                if y > 0 {
                    let above = idx - w;
                    if out[above] != 0 {
                        neighbors[n] = out[above];
                        n += 1;
                    }
                    if connectivity == ConnectivityType::EightWay {
                        if x > 0 && out[above - 1] != 0 {
                            neighbors[n] = out[above - 1];
                            n += 1;
                        }
                        if x + 1 < w && out[above + 1] != 0 {
                            neighbors[n] = out[above + 1];
                            n += 1;
                        }
                    }
                }

                out[idx] = if n == 0 {
                    sets.make_set()
                } else {
                    let first = neighbors[0];
                    for &other in &neighbors[1..n] {
                        sets.union(first, other);
                    }
                    first
                };
            }
        }
    }

    // Resolve roots to consecutive labels
    let mut final_label = vec![0u32; sets.parent.len()];
    let mut next = 0u32;
    for label in 1..sets.parent.len() as u32 {
        let root = sets.find(label);
        if root == label {
            next += 1;
            final_label[label as usize] = next;
        }
    }

    // Second pass: relabel
    for value in labels.data_mut() {
        if *value != 0 {
            let root = sets.find(*value);
            *value = final_label[root as usize];
        }
    }

    Ok(labels)
}

/// Find all connected components of an edge mask
///
/// Returns one entry per component, ordered by label, with its pixel
/// count and bounding box.
///
/// # Examples
///
/// ```
/// use distmap_core::EdgeMask;
/// use distmap_region::{ConnectivityType, find_connected_components};
///
/// let mask = EdgeMask::edge_mask_from_points(10, 10, &[(1, 1), (2, 2), (7, 7)]).unwrap();
/// assert_eq!(find_connected_components(&mask, ConnectivityType::FourWay).unwrap().len(), 3);
/// assert_eq!(find_connected_components(&mask, ConnectivityType::EightWay).unwrap().len(), 2);
/// ```
pub fn find_connected_components(
    mask: &EdgeMask,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    let labels = label_connected_components(mask, connectivity)?;
    let width = labels.width() as usize;

    let mut components: Vec<ConnectedComponent> = Vec::new();
    let mut extents: Vec<(i32, i32, i32, i32)> = Vec::new();
    for (idx, &label) in labels.data().iter().enumerate() {
        if label == 0 {
            continue;
        }
        let x = (idx % width) as i32;
        let y = (idx / width) as i32;
        let slot = (label - 1) as usize;
        if slot == components.len() {
            components.push(ConnectedComponent {
                label,
                pixel_count: 0,
                bounds: Rect::default(),
            });
            extents.push((x, y, x, y));
        }
        components[slot].pixel_count += 1;
        let e = &mut extents[slot];
        e.0 = e.0.min(x);
        e.1 = e.1.min(y);
        e.2 = e.2.max(x);
        e.3 = e.3.max(y);
    }

    for (component, &(x1, y1, x2, y2)) in components.iter_mut().zip(&extents) {
        component.bounds = Rect::from_corners(x1, y1, x2, y2);
    }

    Ok(components)
}

/// Get pixel count for each component of a labeled grid
///
/// The index in the returned vector corresponds to (label - 1).
///
/// # Errors
///
/// Returns an error if `labels` is not single-channel.
pub fn component_sizes(labels: &Grid<u32>) -> RegionResult<Vec<u32>> {
    if labels.channels() != 1 {
        return Err(RegionError::UnsupportedChannels {
            expected: 1,
            actual: labels.channels(),
        });
    }
    let max_label = labels.data().iter().copied().max().unwrap_or(0);
    let mut sizes = vec![0u32; max_label as usize];
    for &label in labels.data() {
        if label > 0 {
            sizes[(label - 1) as usize] += 1;
        }
    }
    Ok(sizes)
}

/// Keep only components whose pixel count lies in `[min_size, max_size]`
///
/// # Errors
///
/// Returns an error if `min_size > max_size` or the mask is not
/// single-channel.
pub fn filter_components_by_size(
    mask: &EdgeMask,
    min_size: u32,
    max_size: u32,
    connectivity: ConnectivityType,
) -> RegionResult<EdgeMask> {
    if min_size > max_size {
        return Err(RegionError::InvalidParameters(format!(
            "min_size {min_size} > max_size {max_size}"
        )));
    }
    let labels = label_connected_components(mask, connectivity)?;
    let sizes = component_sizes(&labels)?;

    let mut result = EdgeMask::edge_mask(mask.width(), mask.height())?;
    for (out, &label) in result.data_mut().iter_mut().zip(labels.data()) {
        if label > 0 {
            let size = sizes[(label - 1) as usize];
            *out = size >= min_size && size <= max_size;
        }
    }
    Ok(result)
}
