//! Error types for color operations.

use thiserror::Error;

/// Color operation error.
///
/// Only construction of viewing conditions can fail; the per-pixel
/// transforms are total functions.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Input value is invalid (NaN, Inf, out of expected range).
    #[error("invalid input value: {0}")]
    InvalidValue(String),

    /// Viewing conditions outside the model's domain.
    #[error("invalid viewing conditions: {0}")]
    InvalidViewingConditions(String),

    /// Working profile name not registered.
    #[error("unknown working space: {0}")]
    UnknownWorkingSpace(String),
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
