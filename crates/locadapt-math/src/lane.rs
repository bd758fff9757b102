//! One numeric abstraction over scalar and SIMD lanes.
//!
//! Per-pixel color math is written once, generic over [`Lane`], and
//! instantiated twice: with `f32` for single pixels and row remainders, and
//! with [`wide::f32x4`] for four pixels at a time. Both instances run the
//! same operations in the same order, so they differ only by rounding.
//!
//! Branches are expressed with [`Lane::select_lt`] so the vector instance
//! stays branch-free.
//!
//! # Example
//!
//! ```rust
//! use locadapt_math::lane::Lane;
//! use wide::f32x4;
//!
//! fn hypot<L: Lane>(a: L, b: L) -> L {
//!     (a * a + b * b).sqrt()
//! }
//!
//! assert_eq!(hypot(3.0f32, 4.0), 5.0);
//! let v = hypot(f32x4::splat(3.0), f32x4::splat(4.0));
//! assert_eq!(v.to_array(), [5.0; 4]);
//! ```

use crate::Mat3;
use std::ops::{Add, Div, Mul, Sub};
use wide::{f32x4, CmpGt, CmpLt};

/// Arithmetic needed by the per-pixel color math.
pub trait Lane:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
    /// Number of `f32` values processed at once.
    const WIDTH: usize;

    /// Broadcasts a constant.
    fn splat(v: f32) -> Self;

    /// Reads the first `WIDTH` values of `src`.
    fn load(src: &[f32]) -> Self;

    /// Writes `WIDTH` values to the start of `dst`.
    fn store(self, dst: &mut [f32]);

    /// Absolute value.
    fn abs(self) -> Self;

    /// Lane-wise minimum.
    fn min(self, rhs: Self) -> Self;

    /// Lane-wise maximum.
    fn max(self, rhs: Self) -> Self;

    /// Square root.
    fn sqrt(self) -> Self;

    /// `self^e` for positive `self`; zero where `self <= 0`.
    fn pow(self, e: Self) -> Self;

    /// Cosine (radians).
    fn cos(self) -> Self;

    /// Sine (radians).
    fn sin(self) -> Self;

    /// Four-quadrant arctangent of `self / x`.
    fn atan2(self, x: Self) -> Self;

    /// `if a < b { on_true } else { on_false }`, per lane.
    fn select_lt(a: Self, b: Self, on_true: Self, on_false: Self) -> Self;

    /// `|self|` carrying the sign of `sign`.
    #[inline]
    fn with_sign_of(self, sign: Self) -> Self {
        let m = self.abs();
        Self::select_lt(sign, Self::splat(0.0), Self::splat(0.0) - m, m)
    }
}

impl Lane for f32 {
    const WIDTH: usize = 1;

    #[inline]
    fn splat(v: f32) -> Self {
        v
    }

    #[inline]
    fn load(src: &[f32]) -> Self {
        src[0]
    }

    #[inline]
    fn store(self, dst: &mut [f32]) {
        dst[0] = self;
    }

    #[inline]
    fn abs(self) -> Self {
        f32::abs(self)
    }

    #[inline]
    fn min(self, rhs: Self) -> Self {
        f32::min(self, rhs)
    }

    #[inline]
    fn max(self, rhs: Self) -> Self {
        f32::max(self, rhs)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f32::sqrt(self)
    }

    #[inline]
    fn pow(self, e: Self) -> Self {
        if self > 0.0 { f32::powf(self, e) } else { 0.0 }
    }

    #[inline]
    fn cos(self) -> Self {
        f32::cos(self)
    }

    #[inline]
    fn sin(self) -> Self {
        f32::sin(self)
    }

    #[inline]
    fn atan2(self, x: Self) -> Self {
        f32::atan2(self, x)
    }

    #[inline]
    fn select_lt(a: Self, b: Self, on_true: Self, on_false: Self) -> Self {
        if a < b { on_true } else { on_false }
    }
}

impl Lane for f32x4 {
    const WIDTH: usize = 4;

    #[inline]
    fn splat(v: f32) -> Self {
        f32x4::splat(v)
    }

    #[inline]
    fn load(src: &[f32]) -> Self {
        f32x4::new([src[0], src[1], src[2], src[3]])
    }

    #[inline]
    fn store(self, dst: &mut [f32]) {
        dst[..4].copy_from_slice(&self.to_array());
    }

    #[inline]
    fn abs(self) -> Self {
        f32x4::abs(self)
    }

    #[inline]
    fn min(self, rhs: Self) -> Self {
        f32x4::min(self, rhs)
    }

    #[inline]
    fn max(self, rhs: Self) -> Self {
        f32x4::max(self, rhs)
    }

    #[inline]
    fn sqrt(self) -> Self {
        f32x4::sqrt(self)
    }

    #[inline]
    fn pow(self, e: Self) -> Self {
        let zero = f32x4::splat(0.0);
        let safe = f32x4::max(self, f32x4::splat(f32::MIN_POSITIVE));
        let p = (safe.ln() * e).exp();
        self.cmp_gt(zero).blend(p, zero)
    }

    #[inline]
    fn cos(self) -> Self {
        f32x4::cos(self)
    }

    #[inline]
    fn sin(self) -> Self {
        f32x4::sin(self)
    }

    #[inline]
    fn atan2(self, x: Self) -> Self {
        f32x4::atan2(self, x)
    }

    #[inline]
    fn select_lt(a: Self, b: Self, on_true: Self, on_false: Self) -> Self {
        a.cmp_lt(b).blend(on_true, on_false)
    }
}

impl Mat3 {
    /// Applies the matrix to a triplet of lanes.
    #[inline]
    pub fn apply<L: Lane>(&self, v: [L; 3]) -> [L; 3] {
        let m = &self.m;
        let row =
            |r: [f32; 3]| L::splat(r[0]) * v[0] + L::splat(r[1]) * v[1] + L::splat(r[2]) * v[2];
        [row(m[0]), row(m[1]), row(m[2])]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const INPUTS: [f32; 4] = [0.01, 0.5, 3.0, 87.5];

    fn lanes() -> f32x4 {
        f32x4::new(INPUTS)
    }

    #[test]
    fn test_pow_matches_scalar() {
        let v = Lane::pow(lanes(), f32x4::splat(0.42)).to_array();
        for (i, x) in INPUTS.iter().enumerate() {
            assert_relative_eq!(v[i], Lane::pow(*x, 0.42), max_relative = 1e-5);
        }
    }

    #[test]
    fn test_pow_non_positive_is_zero() {
        assert_eq!(Lane::pow(0.0f32, 0.42), 0.0);
        assert_eq!(Lane::pow(-2.0f32, 0.42), 0.0);
        let v = Lane::pow(f32x4::new([0.0, -1.0, 4.0, -0.0]), f32x4::splat(0.5)).to_array();
        assert_eq!(v[0], 0.0);
        assert_eq!(v[1], 0.0);
        assert_relative_eq!(v[2], 2.0, max_relative = 1e-5);
        assert_eq!(v[3], 0.0);
    }

    #[test]
    fn test_trig_matches_scalar() {
        let y = f32x4::new([0.3, -0.7, 0.0, -2.0]);
        let x = f32x4::new([1.0, -0.2, -1.0, 0.5]);
        let a = Lane::atan2(y, x).to_array();
        let c = Lane::cos(x + f32x4::splat(2.0)).to_array();
        let ys = y.to_array();
        let xs = x.to_array();
        for i in 0..4 {
            assert_relative_eq!(a[i], Lane::atan2(ys[i], xs[i]), epsilon = 1e-5);
            assert_relative_eq!(c[i], Lane::cos(xs[i] + 2.0), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_select_and_sign() {
        assert_eq!(f32::select_lt(1.0, 2.0, 10.0, 20.0), 10.0);
        assert_eq!(3.0f32.with_sign_of(-0.5), -3.0);
        assert_eq!((-3.0f32).with_sign_of(0.0), 3.0);
        let s = f32x4::new([1.0, -1.0, 2.0, -2.0]).with_sign_of(f32x4::new([-1.0, 1.0, 0.0, -5.0]));
        assert_eq!(s.to_array(), [-1.0, 1.0, 2.0, -2.0]);
    }

    #[test]
    fn test_load_store() {
        let src = [1.0, 2.0, 3.0, 4.0, 5.0];
        let v = <f32x4 as Lane>::load(&src[1..]);
        let mut dst = [0.0f32; 4];
        v.store(&mut dst);
        assert_eq!(dst, [2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_mat_apply() {
        let m = Mat3::diagonal(2.0, 3.0, 4.0);
        assert_eq!(m.apply([1.0f32, 1.0, 1.0]), [2.0, 3.0, 4.0]);
        let out = m.apply([f32x4::splat(1.0); 3]);
        assert_eq!(out[2].to_array(), [4.0; 4]);
    }
}
