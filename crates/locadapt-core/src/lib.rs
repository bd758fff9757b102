//! # locadapt-core
//!
//! Core types for spatially localized chromatic adaptation.
//!
//! - [`ColorSpace`], [`RgbSpace`] - Marker traits for compile-time buffer safety
//! - [`Image`] - Three-channel float buffer tagged with its color space
//! - [`LabImage`] - Lab scratch buffer used by the adaptation engine
//! - [`Rect`] - Pixel rectangles for zone bounding boxes
//! - [`Error`], [`Result`] - Buffer errors
//!
//! ## Crate Structure
//!
//! ```text
//! locadapt-core (this crate)
//!    ^
//!    +-- locadapt-primaries (working-space matrices, temperature -> white)
//!    +-- locadapt-color (Lab/XYZ primitives, CIECAM02)
//!    +-- locadapt-ops (zones, estimator, blend engine)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod colorspace;
pub mod error;
pub mod image;
pub mod rect;

pub use colorspace::*;
pub use error::*;
pub use image::*;
pub use rect::*;

/// Prelude module for convenient imports.
///
/// ```
/// use locadapt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::colorspace::{
        CieLab, ColorModel, ColorSpace, LinearSrgb, ProPhoto, RgbSpace, WideGamut,
    };
    pub use crate::error::{Error, Result};
    pub use crate::image::{Image, LabImage, CHANNELS};
    pub use crate::rect::Rect;
}
