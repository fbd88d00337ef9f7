//! Error types for distmap-region

use thiserror::Error;

/// Errors that can occur during region processing operations
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] distmap_core::Error),

    /// Input grid does not match the distance transform it is used with
    #[error("dimension mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Unsupported channel count for this operation
    #[error("unsupported channel count: expected {expected}, got {actual}")]
    UnsupportedChannels { expected: u32, actual: u32 },

    /// No template point fell inside the image
    #[error("empty template: no template points inside the image")]
    EmptyTemplate,

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
