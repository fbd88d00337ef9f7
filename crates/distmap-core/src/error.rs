//! Error types for distmap-core
//!
//! Provides a unified error type for the grid, point and serialization
//! operations in the core crate.

use thiserror::Error;

/// distmap core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid grid dimensions
    #[error("invalid grid dimensions: {width}x{height}x{channels}")]
    InvalidDimension {
        width: u32,
        height: u32,
        channels: u32,
    },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Grid dimension mismatch
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialized grid decode error
    #[error("decode error: {0}")]
    DecodeError(String),
}

/// Result type alias for distmap operations
pub type Result<T> = std::result::Result<T, Error>;
