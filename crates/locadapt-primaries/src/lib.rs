//! # locadapt-primaries
//!
//! Working-space primaries and the matrices derived from them.
//!
//! The adaptation engine converts RGB to XYZ with the matrix of the image's
//! working space, always relative to the D50 Lab reference white. Spaces
//! defined with another white (sRGB) are Bradford-adapted to D50, as ICC
//! working profiles are.
//!
//! - [`Primaries`] - xy chromaticities of a working space
//! - [`rgb_to_xyz_matrix`], [`xyz_to_rgb_matrix`] - Derived matrices
//! - [`WorkingSpace`] - Matrix pair keyed by profile name
//! - [`temperature_to_white`] - Correlated color temperature to XYZ white
//!
//! # Usage
//!
//! ```rust
//! use locadapt_primaries::WorkingSpace;
//! use locadapt_math::Vec3;
//!
//! let ws = WorkingSpace::from_name("WideGamut").unwrap();
//! let white = ws.to_xyz * Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-4);
//! ```
//!
//! # Dependencies
//!
//! - `locadapt-core` - Color space markers
//! - `locadapt-math` - Matrices and Bradford adaptation
//!
//! # Used By
//!
//! - `locadapt-color` - RGB/XYZ primitives
//! - `locadapt-ops` - Engine working space, destination white

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod temperature;

pub use temperature::*;

use locadapt_core::{LinearSrgb, ProPhoto, RgbSpace, WideGamut};
use locadapt_math::{adapt_matrix, Mat3, Vec3, BRADFORD, D50};

/// Chromaticities that define an RGB working space.
///
/// ```rust
/// use locadapt_primaries::Primaries;
///
/// let custom = Primaries {
///     r: (0.64, 0.33),
///     g: (0.30, 0.60),
///     b: (0.15, 0.06),
///     w: (0.3127, 0.3290),
///     name: "Custom",
/// };
/// assert_eq!(custom.name, "Custom");
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: (f32, f32),
    /// Green primary (x, y) chromaticity
    pub g: (f32, f32),
    /// Blue primary (x, y) chromaticity
    pub b: (f32, f32),
    /// White point (x, y) chromaticity
    pub w: (f32, f32),
    /// Profile name
    pub name: &'static str,
}

impl Primaries {
    /// Primaries of a compile-time color space marker.
    pub const fn of<C: RgbSpace>() -> Self {
        Self {
            r: C::PRIMARIES[0],
            g: C::PRIMARIES[1],
            b: C::PRIMARIES[2],
            w: C::WHITE_POINT,
            name: C::NAME,
        }
    }

    /// White point as XYZ (Y = 1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

// ============================================================================
// Standard Primaries
// ============================================================================

/// D50 white point chromaticity.
pub const D50_XY: (f32, f32) = (0.3457, 0.3585);

/// D65 white point chromaticity.
pub const D65_XY: (f32, f32) = (0.3127, 0.3290);

/// Adobe Wide Gamut RGB.
pub const WIDE_GAMUT: Primaries = Primaries::of::<WideGamut>();

/// ProPhoto (ROMM) RGB.
pub const PROPHOTO_RGB: Primaries = Primaries::of::<ProPhoto>();

/// sRGB / Rec.709.
pub const SRGB: Primaries = Primaries::of::<LinearSrgb>();

/// Every registered working space, looked up by [`WorkingSpace::from_name`].
pub const REGISTERED: [Primaries; 3] = [WIDE_GAMUT, PROPHOTO_RGB, SRGB];

/// Wide Gamut RGB to XYZ (D50) as shipped in the reference working profile.
pub const WIDE_GAMUT_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.7161046, 0.1009296, 0.1471858],
    [0.2581874, 0.7249378, 0.0168748],
    [0.0000000, 0.0517813, 0.7734287],
]);

// ============================================================================
// Matrix Derivation
// ============================================================================

/// Converts xy chromaticity to XYZ with `Y = 1`.
#[inline]
pub fn xy_to_xyz(x: f32, y: f32) -> Vec3 {
    if y.abs() < 1e-10 {
        return Vec3::ZERO;
    }
    Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
}

/// RGB to XYZ matrix relative to the primaries' own white.
///
/// Columns are the primaries' XYZ scaled so that `(1, 1, 1)` maps to the
/// white point.
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b = xy_to_xyz(primaries.b.0, primaries.b.1);
    let w = primaries.white_xyz();

    let m = Mat3::from_col_vecs(r, g, b);
    let s = m.inverse().unwrap_or(Mat3::IDENTITY) * w;
    Mat3::from_col_vecs(r * s.x, g * s.y, b * s.z)
}

/// XYZ to RGB matrix, the inverse of [`rgb_to_xyz_matrix`].
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries).inverse().unwrap_or(Mat3::IDENTITY)
}

// ============================================================================
// Working Space
// ============================================================================

/// RGB⇄XYZ(D50) matrix pair of a working profile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkingSpace {
    /// Profile name.
    pub name: &'static str,
    /// Working RGB to XYZ relative to D50.
    pub to_xyz: Mat3,
    /// XYZ relative to D50 to working RGB.
    pub from_xyz: Mat3,
}

impl WorkingSpace {
    /// Builds the D50-relative matrices for a set of primaries.
    pub fn from_primaries(primaries: &Primaries) -> Self {
        let mut to_xyz = rgb_to_xyz_matrix(primaries);
        if primaries.w != D50_XY {
            to_xyz = adapt_matrix(BRADFORD, primaries.white_xyz(), D50) * to_xyz;
        }
        let from_xyz = to_xyz.inverse().unwrap_or(Mat3::IDENTITY);
        Self {
            name: primaries.name,
            to_xyz,
            from_xyz,
        }
    }

    /// Working space of a compile-time color space marker.
    pub fn of<C: RgbSpace>() -> Self {
        Self::from_primaries(&Primaries::of::<C>())
    }

    /// Looks a working profile up by name (case-insensitive).
    ///
    /// ```rust
    /// use locadapt_primaries::WorkingSpace;
    ///
    /// assert!(WorkingSpace::from_name("prophoto").is_some());
    /// assert!(WorkingSpace::from_name("Rec2100").is_none());
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        REGISTERED
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .map(Self::from_primaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_white_maps_to_white() {
        for p in REGISTERED {
            let white = rgb_to_xyz_matrix(&p) * Vec3::ONE;
            assert!(white.max_abs_diff(p.white_xyz()) < 1e-4, "{}", p.name);
        }
    }

    #[test]
    fn test_wide_gamut_matches_reference_profile() {
        let ws = WorkingSpace::of::<WideGamut>();
        assert!(ws.to_xyz.max_abs_diff(&WIDE_GAMUT_TO_XYZ) < 1e-3);
    }

    #[test]
    fn test_srgb_is_adapted_to_d50() {
        let ws = WorkingSpace::from_name("sRGB").unwrap();
        let white = ws.to_xyz * Vec3::ONE;
        assert!(white.max_abs_diff(D50) < 1e-3);
    }

    #[test]
    fn test_roundtrip() {
        let ws = WorkingSpace::from_name("WideGamut").unwrap();
        let rgb = Vec3::new(0.2, 0.5, 0.9);
        let back = ws.from_xyz * (ws.to_xyz * rgb);
        assert!(back.max_abs_diff(rgb) < 1e-5);
    }
}
