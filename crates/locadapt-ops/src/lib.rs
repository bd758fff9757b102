//! # locadapt-ops
//!
//! Spatially localized white balance through CIECAM02 chromatic adaptation.
//!
//! A zone (ellipse or rectangle with four independent extents) is
//! re-rendered as if lit by a target white, and blended back into the
//! image with a feathered transition.
//!
//! # Modules
//!
//! - [`zone`] - Inside / transition / outside classification
//! - [`estimator`] - Amount and luminance scaling from exposure metadata
//! - [`params`] - User parameters and their YAML form
//! - [`engine`] - Scratch buffers, adaptation and row-parallel blend
//! - [`spot`] - Mean color around the zone center
//!
//! # Example
//!
//! ```rust
//! use locadapt_core::{Image, WideGamut};
//! use locadapt_ops::estimator::{resolve, ExposureContext, ExposureInfo};
//! use locadapt_ops::{LocalAdaptParams, LocalAdaptation};
//!
//! let params = LocalAdaptParams::from_yaml_str(
//!     "enabled: true\nauto_amount: true\ntemperature: 6500\n",
//! )?;
//! let exif = ExposureInfo {
//!     f_number: 4.0,
//!     iso: 100.0,
//!     shutter_speed: 1.0 / 125.0,
//!     ..Default::default()
//! };
//! let resolved = resolve(&params, &exif, &ExposureContext::default());
//! assert_eq!(resolved.amount, 80);
//!
//! let image = Image::<WideGamut>::filled(32, 32, [12000.0, 12000.0, 12000.0]);
//! let out = LocalAdaptation::new(resolved.apply(&params))?.apply(&image)?;
//! assert_eq!(out.dimensions(), (32, 32));
//! # Ok::<(), locadapt_ops::OpsError>(())
//! ```
//!
//! # Dependencies
//!
//! - [`locadapt-core`] - `Image`, `LabImage`, `Rect`
//! - [`locadapt-color`] - Lab/XYZ primitives and CIECAM02
//! - `rayon` - Row-parallel passes
//! - `serde_yaml` - Parameter files
//! - `tracing` - Diagnostics

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod engine;
pub mod estimator;
pub mod params;
pub mod spot;
pub mod zone;

pub use engine::{adapt_local, LocalAdaptation};
pub use error::{OpsError, OpsResult};
pub use estimator::{resolve, ExposureContext, ExposureInfo, FrameMetadata, ResolvedParams};
pub use params::LocalAdaptParams;
pub use spot::{spot_reference, SpotReference};
pub use zone::{Extents, Shape, Zone, ZoneGeometry, ZoneSpec};

/// Prelude with commonly used types
pub mod prelude {
    pub use crate::{
        adapt_local, resolve, ExposureContext, ExposureInfo, FrameMetadata, LocalAdaptParams,
        LocalAdaptation, OpsError, OpsResult, Shape, Zone, ZoneGeometry, ZoneSpec,
    };
    pub use locadapt_color::ciecam02::Surround;
}
