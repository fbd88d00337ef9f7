//! distmap Core - Basic data structures for distance transforms
//!
//! This crate provides the fundamental data structures used throughout
//! the distmap toolkit:
//!
//! - [`Grid`] - Dense row-major multichannel buffer
//! - [`EdgeMask`] / [`OrientationField`] - Single-channel grid aliases
//! - [`Point`] / [`OrientedPoint`] / [`Scale`] - Template offsets
//! - [`Rect`] - Rectangle regions

pub mod error;
pub mod grid;
pub mod point;
pub mod rect;

pub use error::{Error, Result};
pub use grid::{EdgeMask, Grid, OrientationField};
pub use point::{OrientedPoint, Point, Scale};
pub use rect::Rect;
