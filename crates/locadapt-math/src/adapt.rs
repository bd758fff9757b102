//! Cone-response spaces and chromatic adaptation.
//!
//! CIECAM02 works in two sharpened cone spaces: CAT02, where the von Kries
//! degree-of-adaptation gains are applied, and Hunt-Pointer-Estevez (HPE),
//! where the post-adaptation compression happens. Working spaces whose white
//! is not D50 are brought to D50 with Bradford before Lab conversion.
//!
//! # Usage
//!
//! ```rust
//! use locadapt_math::{adapt_matrix, BRADFORD, D65, D50};
//!
//! let d65_to_d50 = adapt_matrix(BRADFORD, D65, D50);
//! let white = d65_to_d50 * D65;
//! assert!((white.z - D50.z).abs() < 1e-3);
//! ```

use crate::{Mat3, Vec3};

// ============================================================================
// Illuminants (XYZ, Y = 1)
// ============================================================================

/// CIE D65.
pub const D65: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);

/// CIE D50, the ICC profile connection white.
pub const D50: Vec3 = Vec3::new(0.96422, 1.0, 0.82521);

// ============================================================================
// Cone spaces
// ============================================================================

/// Bradford cone matrix.
pub const BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// XYZ to CAT02 sharpened cone response.
pub const CAT02: Mat3 = Mat3::from_rows([
    [0.7328, 0.4296, -0.1624],
    [-0.7036, 1.6975, 0.0061],
    [0.0030, 0.0136, 0.9834],
]);

/// CAT02 cone response to XYZ.
pub const CAT02_INV: Mat3 = Mat3::from_rows([
    [1.096124, -0.278869, 0.182745],
    [0.454369, 0.473533, 0.072098],
    [-0.009628, -0.005698, 1.015326],
]);

/// XYZ to Hunt-Pointer-Estevez cone response.
pub const HPE: Mat3 = Mat3::from_rows([
    [0.38971, 0.68898, -0.07868],
    [-0.22981, 1.18340, 0.04641],
    [0.0, 0.0, 1.0],
]);

/// Hunt-Pointer-Estevez cone response to XYZ.
pub const HPE_INV: Mat3 = Mat3::from_rows([
    [1.910197, -1.112124, 0.201908],
    [0.370950, 0.629054, -0.000008],
    [0.0, 0.0, 1.0],
]);

/// CAT02 cone response straight to HPE, `HPE * CAT02_INV`.
pub const CAT02_TO_HPE: Mat3 = Mat3::from_rows([
    [0.7409792, 0.2180250, 0.0410058],
    [0.2853532, 0.6242014, 0.0904454],
    [-0.0096280, -0.0056980, 1.0153260],
]);

// ============================================================================
// Adaptation
// ============================================================================

/// Von Kries style adaptation matrix between two whites.
///
/// `M^-1 * diag(dst / src) * M` with both whites taken into the cone space
/// of `method`.
pub fn adapt_matrix(method: Mat3, src_white: Vec3, dst_white: Vec3) -> Mat3 {
    let method_inv = method.inverse().unwrap_or(Mat3::IDENTITY);
    let src = method * src_white;
    let dst = method * dst_white;
    let scale = Mat3::diagonal(dst.x / src.x, dst.y / src.y, dst.z / src.z);
    method_inv * scale * method
}
