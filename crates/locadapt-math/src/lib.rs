//! # locadapt-math
//!
//! Math primitives for localized chromatic adaptation.
//!
//! - [`Mat3`] - 3x3 matrices for color space transformations
//! - [`Vec3`] - XYZ/RGB triplets
//! - CAT02 and Hunt-Pointer-Estevez cone spaces, Bradford adaptation
//! - [`lane::Lane`] - one arithmetic interface over `f32` and `wide::f32x4`
//!
//! # Design
//!
//! Matrices are **row-major** and multiply **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use locadapt_math::{Mat3, Vec3, CAT02};
//!
//! let cone = CAT02 * Vec3::new(96.42, 100.0, 82.52);
//! assert!(cone.x > 0.0);
//! ```
//!
//! # Dependencies
//!
//! - [`glam`] - Matrix inversion and products
//! - [`wide`] - Portable SIMD lanes
//!
//! # Used By
//!
//! - `locadapt-primaries` - RGB/XYZ matrix generation
//! - `locadapt-color` - CIECAM02 and Lab conversion

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod mat3;
mod vec3;
pub mod lane;

pub use adapt::*;
pub use lane::Lane;
pub use mat3::*;
pub use vec3::*;
