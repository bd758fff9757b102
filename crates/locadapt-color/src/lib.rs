//! # locadapt-color
//!
//! Color primitives and CIECAM02 chromatic adaptation for localized white
//! balance.
//!
//! - **Conversions** - scaled Lab, XYZ and working RGB ([`convert`])
//! - **Viewing conditions** - surround classes and the per-run constant solver
//! - **Appearance transform** - forward/inverse CIECAM02 over scalar and
//!   `f32x4` lanes, plus row batches
//!
//! # Architecture
//!
//! ```text
//!                 locadapt-color
//!                       |
//!          +------------+------------+
//!          |                         |
//!   locadapt-primaries         locadapt-math
//!          |                         |
//!          +------------+------------+
//!                       |
//!                 locadapt-core
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use locadapt_color::ciecam02::{
//!     AdaptationConstants, ChromaticAdapter, Surround, ViewingConditions,
//! };
//! use locadapt_color::primaries::temperature_to_white;
//!
//! let side = |kelvin: f64| {
//!     let w = temperature_to_white(kelvin).map(|v| v * 100.0);
//!     let vc = ViewingConditions::new(w, 18.0, 400.0, Surround::Average)?
//!         .with_degree_of_adaptation(0.8)?;
//!     Ok::<_, locadapt_color::ColorError>(AdaptationConstants::new(&vc))
//! };
//! let adapter = ChromaticAdapter::new(side(5000.0)?, side(6500.0)?);
//!
//! let row = [20000.0f32, 0.0, 0.0];
//! let mut out = [0.0f32; 3];
//! adapter.adapt_lab_row(&row, &mut out);
//! assert!(out[2] < 0.0); // cooler destination pushes grey toward blue
//! # Ok::<(), locadapt_color::ColorError>(())
//! ```
//!
//! # Dependencies
//!
//! - [`locadapt-core`] - Pixel layout constants
//! - [`locadapt-math`] - `Mat3`, CAT02/HPE matrices, `Lane`
//! - [`locadapt-primaries`] - Working spaces, temperature to white
//!
//! # Used By
//!
//! - `locadapt-ops` - Pixel blend engine

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod ciecam02;
pub mod convert;

pub use convert::{
    lab_to_xyz, rgb_to_xyz, xyz_to_lab, xyz_to_rgb, CAM_SCALE, D50_X, D50_Z, LAB_SCALE, MAX_VALUE,
};
pub use error::{ColorError, ColorResult};

// Re-export sub-crates for convenience
pub use locadapt_math as math;
pub use locadapt_primaries as primaries;

use locadapt_primaries::WorkingSpace;

/// Looks up a working space by profile name.
///
/// # Errors
///
/// [`ColorError::UnknownWorkingSpace`] when the name is not registered.
pub fn working_space(name: &str) -> ColorResult<WorkingSpace> {
    WorkingSpace::from_name(name).ok_or_else(|| ColorError::UnknownWorkingSpace(name.to_string()))
}

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::ciecam02::{
        AdaptationConstants, AppearanceCorrelates, ChromaticAdapter, Surround, ViewingConditions,
    };
    pub use crate::{lab_to_xyz, rgb_to_xyz, working_space, xyz_to_lab, xyz_to_rgb};
    pub use crate::{ColorError, ColorResult};
    pub use locadapt_math::{Lane, Mat3, Vec3};
    pub use locadapt_primaries::{temperature_to_white, WorkingSpace};
}
