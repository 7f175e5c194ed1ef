//! Error types for depthcloud-rs.

use thiserror::Error;

/// Errors produced by the core frame and configuration types.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A pixel buffer disagrees with its stated dimensions.
    #[error("pixel buffer size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// A plane was declared with a zero-sized dimension.
    #[error("zero-sized plane: {width}x{height}")]
    ZeroDimension { width: u32, height: u32 },

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
