//! CIECAM02 chromatic adaptation.
//!
//! # Pipeline
//!
//! ```text
//! XYZ (scene) -> CAT02 -> von Kries -> HPE -> compression -> J, C, h
//!      J, C, h -> decompression -> HPE⁻¹ -> von Kries⁻¹ -> CAT02⁻¹ -> XYZ (destination)
//! ```
//!
//! - [`ViewingConditions`] / [`AdaptationConstants`]: solver, once per side
//! - [`xyz_to_jchqms`] / [`jch_to_xyz`]: per-pixel transform over any [`Lane`](locadapt_math::Lane)
//! - [`ChromaticAdapter`]: row batches in the scaled Lab domain

mod rows;
mod transform;
mod viewing;

pub use rows::*;
pub use transform::{
    jch_to_xyz, post_adaptation, post_adaptation_inverse, xyz_to_jchqms, AppearanceCorrelates,
};
pub use viewing::*;
