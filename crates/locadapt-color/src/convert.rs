//! Lab, XYZ and RGB conversions in the 16-bit scaled domain.
//!
//! Pixel data in the engine follows one fixed convention:
//!
//! | quantity | range |
//! |---|---|
//! | RGB, XYZ | `0..65535` (white Y = 65535) |
//! | L | `0..32768` (`L* · 327.68`) |
//! | a, b | `a* · 327.68`, `b* · 327.68` |
//!
//! CIECAM02 expects white `Y = 100`, so XYZ is divided by [`CAM_SCALE`]
//! (`655.35`) before the appearance transform and multiplied back after.

use locadapt_math::{Mat3, Vec3};

/// Nominal maximum of RGB and XYZ values.
pub const MAX_VALUE: f32 = 65535.0;

/// Lab channels are stored multiplied by this factor.
pub const LAB_SCALE: f32 = 327.68;

/// Maps scaled XYZ to the CIECAM02 domain (white Y = 100).
pub const CAM_SCALE: f32 = 655.35;

/// D50 reference white X used by Lab.
pub const D50_X: f32 = 0.9642;

/// D50 reference white Z used by Lab.
pub const D50_Z: f32 = 0.8249;

/// CIE epsilon, `216 / 24389`.
pub const EPSILON: f32 = 216.0 / 24389.0;

/// CIE kappa, `24389 / 27`.
pub const KAPPA: f32 = 24389.0 / 27.0;

const EPSILON_KAPPA: f32 = 8.0;
const EPSILON_CBRT: f32 = 6.0 / 29.0;

#[inline]
fn lab_f(t: f32) -> f32 {
    if t > EPSILON {
        t.cbrt()
    } else {
        (KAPPA * t + 16.0) / 116.0
    }
}

#[inline]
fn lab_f_inv(f: f32) -> f32 {
    if f > EPSILON_CBRT {
        f * f * f
    } else {
        (116.0 * f - 16.0) / KAPPA
    }
}

/// Scaled XYZ to scaled Lab.
///
/// ```rust
/// use locadapt_color::{xyz_to_lab, LAB_SCALE, MAX_VALUE, D50_X, D50_Z};
///
/// let lab = xyz_to_lab([D50_X * MAX_VALUE, MAX_VALUE, D50_Z * MAX_VALUE]);
/// assert!((lab[0] - 100.0 * LAB_SCALE).abs() < 0.5);
/// assert!(lab[1].abs() < 0.5 && lab[2].abs() < 0.5);
/// ```
#[inline]
pub fn xyz_to_lab(xyz: [f32; 3]) -> [f32; 3] {
    let fx = lab_f(xyz[0] / D50_X / MAX_VALUE);
    let fy = lab_f(xyz[1] / MAX_VALUE);
    let fz = lab_f(xyz[2] / D50_Z / MAX_VALUE);
    [
        LAB_SCALE * (116.0 * fy - 16.0),
        LAB_SCALE * 500.0 * (fx - fy),
        LAB_SCALE * 200.0 * (fy - fz),
    ]
}

/// Scaled Lab to scaled XYZ.
#[inline]
pub fn lab_to_xyz(lab: [f32; 3]) -> [f32; 3] {
    let l = lab[0] / LAB_SCALE;
    let fy = (l + 16.0) / 116.0;
    let fx = 0.002 * lab[1] / LAB_SCALE + fy;
    let fz = fy - 0.005 * lab[2] / LAB_SCALE;
    let y = if l > EPSILON_KAPPA { fy * fy * fy } else { l / KAPPA };
    [
        MAX_VALUE * lab_f_inv(fx) * D50_X,
        MAX_VALUE * y,
        MAX_VALUE * lab_f_inv(fz) * D50_Z,
    ]
}

/// Working RGB to XYZ through a working-space matrix.
#[inline]
pub fn rgb_to_xyz(rgb: [f32; 3], to_xyz: &Mat3) -> [f32; 3] {
    (*to_xyz * Vec3::from_array(rgb)).to_array()
}

/// XYZ to working RGB through an inverse working-space matrix.
#[inline]
pub fn xyz_to_rgb(xyz: [f32; 3], from_xyz: &Mat3) -> [f32; 3] {
    (*from_xyz * Vec3::from_array(xyz)).to_array()
}
