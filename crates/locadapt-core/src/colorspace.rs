//! Color space markers for compile-time buffer safety.
//!
//! Buffers carry a zero-sized marker type so that an RGB working image can
//! never be handed to code that expects Lab scratch data, and vice versa.
//!
//! # Markers
//!
//! ## RGB working spaces (linear, scene-referred)
//! - [`WideGamut`] - Adobe Wide Gamut RGB, D50. The default adaptation space.
//! - [`ProPhoto`] - ROMM / ProPhoto RGB, D50.
//! - [`LinearSrgb`] - Rec.709 primaries, D65 white, linear.
//!
//! ## Perceptual
//! - [`CieLab`] - CIE L*a*b* relative to D50, stored in the 16-bit scaled
//!   convention (L in `0..32768`, a/b scaled by `327.68`).
//!
//! # Usage
//!
//! ```
//! use locadapt_core::{ColorSpace, RgbSpace, WideGamut};
//!
//! fn describe<C: RgbSpace>() -> String {
//!     format!("{} white {:?}", C::NAME, C::WHITE_POINT)
//! }
//! assert!(describe::<WideGamut>().starts_with("WideGamut"));
//! ```

use std::fmt;

/// The kind of values a buffer holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ColorModel {
    /// Three linear RGB channels.
    Rgb,
    /// L, a, b channels.
    Lab,
}

/// Trait for color space marker types.
pub trait ColorSpace: Copy + Clone + Default + Send + Sync + fmt::Debug + 'static {
    /// Human-readable name, used in logs and in the working-space registry.
    const NAME: &'static str;

    /// Channel model of the buffer.
    const MODEL: ColorModel;
}

/// An RGB color space defined by primaries and a white point.
///
/// # Implementing Custom Spaces
///
/// ```
/// use locadapt_core::{ColorModel, ColorSpace, RgbSpace};
///
/// #[derive(Copy, Clone, Debug, Default)]
/// pub struct MySpace;
///
/// impl ColorSpace for MySpace {
///     const NAME: &'static str = "MySpace";
///     const MODEL: ColorModel = ColorModel::Rgb;
/// }
///
/// impl RgbSpace for MySpace {
///     const WHITE_POINT: (f32, f32) = (0.3127, 0.3290);
///     const PRIMARIES: [(f32, f32); 3] = [(0.64, 0.33), (0.30, 0.60), (0.15, 0.06)];
/// }
/// ```
pub trait RgbSpace: ColorSpace {
    /// CIE xy chromaticity of the white point.
    const WHITE_POINT: (f32, f32);

    /// CIE xy chromaticities of the red, green and blue primaries.
    const PRIMARIES: [(f32, f32); 3];
}

/// Adobe Wide Gamut RGB with a D50 white.
///
/// Gives the most even results for CAT02 re-rendering: its gamut covers
/// saturated blues that ProPhoto pushes out of the spectral locus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct WideGamut;

impl ColorSpace for WideGamut {
    const NAME: &'static str = "WideGamut";
    const MODEL: ColorModel = ColorModel::Rgb;
}

impl RgbSpace for WideGamut {
    const WHITE_POINT: (f32, f32) = (0.3457, 0.3585);
    const PRIMARIES: [(f32, f32); 3] = [
        (0.7347, 0.2653),
        (0.1152, 0.8264),
        (0.1566, 0.0177),
    ];
}

/// ProPhoto (ROMM) RGB with a D50 white.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ProPhoto;

impl ColorSpace for ProPhoto {
    const NAME: &'static str = "ProPhoto";
    const MODEL: ColorModel = ColorModel::Rgb;
}

impl RgbSpace for ProPhoto {
    const WHITE_POINT: (f32, f32) = (0.3457, 0.3585);
    const PRIMARIES: [(f32, f32); 3] = [
        (0.7347, 0.2653),
        (0.1596, 0.8404),
        (0.0366, 0.0001),
    ];
}

/// Linear sRGB: Rec.709 primaries with a D65 white.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct LinearSrgb;

impl ColorSpace for LinearSrgb {
    const NAME: &'static str = "sRGB";
    const MODEL: ColorModel = ColorModel::Rgb;
}

impl RgbSpace for LinearSrgb {
    const WHITE_POINT: (f32, f32) = (0.3127, 0.3290);
    const PRIMARIES: [(f32, f32); 3] = [(0.64, 0.33), (0.30, 0.60), (0.15, 0.06)];
}

/// CIE L*a*b* (D50) in the 16-bit scaled convention.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CieLab;

impl ColorSpace for CieLab {
    const NAME: &'static str = "CIELab";
    const MODEL: ColorModel = ColorModel::Lab;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markers() {
        assert_eq!(WideGamut::NAME, "WideGamut");
        assert_eq!(WideGamut::MODEL, ColorModel::Rgb);
        assert_eq!(CieLab::MODEL, ColorModel::Lab);
        assert_eq!(WideGamut::WHITE_POINT, ProPhoto::WHITE_POINT);
        assert_ne!(WideGamut::WHITE_POINT, LinearSrgb::WHITE_POINT);
    }
}
