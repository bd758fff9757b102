//! Error types for the adaptation engine.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for zone, parameter and engine operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid dimensions specified.
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Zone geometry rejected at construction.
    #[error("invalid zone geometry: {0}")]
    InvalidGeometry(String),

    /// Viewing-condition or working-space failure.
    #[error(transparent)]
    Color(#[from] locadapt_color::ColorError),

    /// Image buffer failure.
    #[error(transparent)]
    Core(#[from] locadapt_core::Error),

    /// I/O error reading a parameter file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Parameter file not found.
    #[error("parameter file not found: {path}")]
    ConfigNotFound {
        /// Path that was searched.
        path: PathBuf,
    },
}

/// Result type for adaptation operations.
pub type OpsResult<T> = Result<T, OpsError>;
