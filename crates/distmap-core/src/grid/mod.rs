//! Grid - Dense multichannel buffer
//!
//! `Grid<T>` is a 2D array of pixels with a fixed number of channels per
//! pixel. It is the buffer abstraction shared by every algorithm in the
//! toolkit: binary edge masks, orientation fields, label images and the
//! 3-channel distance transform output are all grids.
//!
//! See [`serial`] for serialization support.
//!
//! # Examples
//!
//! ```
//! use distmap_core::Grid;
//!
//! // A 4x3 grid with two channels per pixel
//! let mut grid: Grid<i32> = Grid::new(4, 3, 2).unwrap();
//!
//! grid.set(1, 2, 1, 7).unwrap();
//! assert_eq!(grid.get(1, 2, 1).unwrap(), 7);
//! assert_eq!(grid.pixel(1, 2), &[0, 7]);
//! ```

pub mod serial;

use crate::error::{Error, Result};

/// Dense row-major multichannel buffer
///
/// # Memory Layout
///
/// Data is stored in row-major order with channels interleaved and no
/// padding. Channel `c` of the pixel at (x, y) is at index
/// `(y * width + x) * channels + c`. Rows correspond to `y` (height),
/// columns to `x` (width).
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    /// Width in pixels (number of columns)
    width: u32,
    /// Height in pixels (number of rows)
    height: u32,
    /// Values per pixel
    channels: u32,
    /// Pixel data (row-major, channel-interleaved, no padding)
    data: Vec<T>,
}

/// Binary edge mask: one `bool` channel, `true` marks an edge pixel.
pub type EdgeMask = Grid<bool>;

/// Per-pixel orientation in radians, one `f32` channel.
pub type OrientationField = Grid<f32>;

fn check_dimensions(width: u32, height: u32, channels: u32) -> Result<usize> {
    if width == 0 || height == 0 || channels == 0 {
        return Err(Error::InvalidDimension {
            width,
            height,
            channels,
        });
    }
    Ok((width as usize) * (height as usize) * (channels as usize))
}

impl<T: Copy + Default> Grid<T> {
    /// Create a new grid with every value set to `T::default()`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any dimension is 0.
    pub fn new(width: u32, height: u32, channels: u32) -> Result<Self> {
        Self::new_with_value(width, height, channels, T::default())
    }
}

impl<T: Copy> Grid<T> {
    /// Create a new grid with every value set to `value`
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if any dimension is 0.
    ///
    /// # Examples
    ///
    /// ```
    /// use distmap_core::Grid;
    ///
    /// let grid = Grid::new_with_value(10, 10, 1, 0.5f32).unwrap();
    /// assert_eq!(grid.get(5, 5, 0).unwrap(), 0.5);
    /// ```
    pub fn new_with_value(width: u32, height: u32, channels: u32, value: T) -> Result<Self> {
        let size = check_dimensions(width, height, channels)?;
        Ok(Grid {
            width,
            height,
            channels,
            data: vec![value; size],
        })
    }

    /// Create a grid from raw data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, channels: u32, data: Vec<T>) -> Result<Self> {
        let expected_size = check_dimensions(width, height, channels)?;
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{}x{} = {}",
                data.len(),
                width,
                height,
                channels,
                expected_size
            )));
        }

        Ok(Grid {
            width,
            height,
            channels,
            data,
        })
    }

    /// Get the grid width (number of columns)
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the grid height (number of rows)
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of channels per pixel
    #[inline]
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Get the grid dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Check whether `other` has the same width and height
    #[inline]
    pub fn same_dimensions<U>(&self, other: &Grid<U>) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32, c: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * (self.channels as usize)
            + (c as usize)
    }

    /// Get channel `c` of the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get(&self, x: u32, y: u32, c: u32) -> Result<T> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x, y, c),
                len: self.data.len(),
            });
        }
        Ok(self.data[self.index(x, y, c)])
    }

    /// Set channel `c` of the pixel at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, c: u32, value: T) -> Result<()> {
        if x >= self.width || y >= self.height || c >= self.channels {
            return Err(Error::IndexOutOfBounds {
                index: self.index(x, y, c),
                len: self.data.len(),
            });
        }
        let idx = self.index(x, y, c);
        self.data[idx] = value;
        Ok(())
    }

    /// Get channel `c` of the pixel at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the computed index falls outside the buffer.
    #[inline]
    pub fn get_unchecked(&self, x: u32, y: u32, c: u32) -> T {
        self.data[self.index(x, y, c)]
    }

    /// Set channel `c` of the pixel at (x, y) without bounds checking
    ///
    /// # Panics
    ///
    /// Panics if the computed index falls outside the buffer.
    #[inline]
    pub fn set_unchecked(&mut self, x: u32, y: u32, c: u32, value: T) {
        let idx = self.index(x, y, c);
        self.data[idx] = value;
    }

    /// Get all channels of the pixel at (x, y)
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[T] {
        let start = self.index(x, y, 0);
        &self.data[start..start + self.channels as usize]
    }

    /// Get raw access to the data
    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    /// Get mutable access to the data
    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Number of values in one row (`width * channels`)
    #[inline]
    pub fn row_stride(&self) -> usize {
        (self.width as usize) * (self.channels as usize)
    }

    /// Get a row of data, all channels interleaved
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[T] {
        let start = (y as usize) * self.row_stride();
        &self.data[start..start + self.row_stride()]
    }

    /// Get a mutable row of data, all channels interleaved
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_mut(&mut self, y: u32) -> &mut [T] {
        let stride = self.row_stride();
        let start = (y as usize) * stride;
        &mut self.data[start..start + stride]
    }

    /// Set every value to `value`
    pub fn set_all(&mut self, value: T) {
        self.data.fill(value);
    }

    /// Mirror the grid left to right
    pub fn flip_horizontal(&self) -> Self {
        let channels = self.channels as usize;
        let mut data = Vec::with_capacity(self.data.len());
        for y in 0..self.height {
            let row = self.row(y);
            for pixel in row.chunks_exact(channels).rev() {
                data.extend_from_slice(pixel);
            }
        }
        Grid {
            width: self.width,
            height: self.height,
            channels: self.channels,
            data,
        }
    }
}

// ============================================================================
// Edge masks
// ============================================================================

impl Grid<bool> {
    /// Create an empty single-channel edge mask
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn edge_mask(width: u32, height: u32) -> Result<Self> {
        Self::new(width, height, 1)
    }

    /// Create an edge mask with the listed (x, y) pixels set
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if a point lies outside the mask.
    ///
    /// # Examples
    ///
    /// ```
    /// use distmap_core::EdgeMask;
    ///
    /// let mask = EdgeMask::edge_mask_from_points(5, 5, &[(2, 2)]).unwrap();
    /// assert!(mask.is_edge(2, 2));
    /// assert_eq!(mask.count_edges(), 1);
    /// ```
    pub fn edge_mask_from_points(width: u32, height: u32, points: &[(u32, u32)]) -> Result<Self> {
        let mut mask = Self::edge_mask(width, height)?;
        for &(x, y) in points {
            mask.set(x, y, 0, true)?;
        }
        Ok(mask)
    }

    /// Whether (x, y) holds an edge; out-of-range pixels are not edges
    #[inline]
    pub fn is_edge(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.get_unchecked(x, y, 0)
    }

    /// Count the edge pixels in channel 0
    pub fn count_edges(&self) -> usize {
        let channels = self.channels as usize;
        self.data.iter().step_by(channels).filter(|&&v| v).count()
    }
}
