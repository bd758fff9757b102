//! 3x3 matrix type for color transformations.
//!
//! # Convention
//!
//! Matrices are stored in **row-major** order and use **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```
//!
//! Inversion and products go through [`glam`], which is column-major; the
//! conversion helpers take care of the transpose.

use crate::Vec3;
use std::ops::Mul;

/// A 3x3 matrix for color transformations.
///
/// ```rust
/// use locadapt_math::{Mat3, Vec3};
///
/// let m = Mat3::diagonal(2.0, 3.0, 4.0);
/// assert_eq!(m * Vec3::ONE, Vec3::new(2.0, 3.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Matrix elements in row-major order: [row0, row1, row2]
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::diagonal(1.0, 1.0, 1.0);

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Creates a matrix whose columns are the given vectors.
    #[inline]
    pub const fn from_col_vecs(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self::from_rows([
            [c0.x, c1.x, c2.x],
            [c0.y, c1.y, c2.y],
            [c0.z, c1.z, c2.z],
        ])
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::from_rows([[d0, 0.0, 0.0], [0.0, d1, 0.0], [0.0, 0.0, d2]])
    }

    /// Converts to a column-major glam matrix.
    pub fn to_glam(&self) -> glam::Mat3 {
        let m = &self.m;
        glam::Mat3::from_cols_array_2d(&[
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    /// Converts from a column-major glam matrix.
    pub fn from_glam(g: glam::Mat3) -> Self {
        let c = g.to_cols_array_2d();
        Self::from_rows([
            [c[0][0], c[1][0], c[2][0]],
            [c[0][1], c[1][1], c[2][1]],
            [c[0][2], c[1][2], c[2][2]],
        ])
    }

    /// Determinant.
    #[inline]
    pub fn determinant(&self) -> f32 {
        self.to_glam().determinant()
    }

    /// Inverse, or `None` for a singular matrix.
    ///
    /// ```rust
    /// use locadapt_math::{Mat3, CAT02, CAT02_INV};
    ///
    /// let inv = CAT02.inverse().unwrap();
    /// assert!(inv.max_abs_diff(&CAT02_INV) < 1e-5);
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let g = self.to_glam();
        if g.determinant().abs() < 1e-10 {
            return None;
        }
        Some(Self::from_glam(g.inverse()))
    }

    /// Applies the matrix to a vector.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
            m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
            m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
        )
    }

    /// Largest absolute element difference.
    pub fn max_abs_diff(&self, other: &Mat3) -> f32 {
        let mut d = 0.0f32;
        for i in 0..3 {
            for j in 0..3 {
                d = d.max((self.m[i][j] - other.m[i][j]).abs());
            }
        }
        d
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        self.transform(v)
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        Mat3::from_glam(self.to_glam() * rhs.to_glam())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}
