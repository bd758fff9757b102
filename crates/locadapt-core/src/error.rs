//! Error types for locadapt-core operations.
//!
//! Buffer construction is the only fallible operation at this level.
//! Everything numeric lives in the crates above.
//!
//! # Usage
//!
//! ```rust
//! use locadapt_core::{Error, Result};
//!
//! fn check(width: u32, height: u32, len: usize) -> Result<()> {
//!     if len != width as usize * height as usize * 3 {
//!         return Err(Error::invalid_dimensions(width, height, "length mismatch"));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by image buffers.
#[derive(Debug, Error)]
pub enum Error {
    /// Buffer length does not match the requested dimensions.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// What was wrong
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::InvalidDimensions`].
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }
}
