//! 3D vector type for XYZ and RGB triplets.

use std::ops::Mul;

/// A triplet of `f32` values (XYZ, RGB or cone responses).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    /// First component
    pub x: f32,
    /// Second component
    pub y: f32,
    /// Third component
    pub z: f32,
}

impl Vec3 {
    /// All zeros.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All ones.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Creates a vector.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Creates a vector from an array.
    #[inline]
    pub const fn from_array(a: [f32; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }

    /// Returns the components as an array.
    #[inline]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Largest absolute component difference.
    pub fn max_abs_diff(self, other: Self) -> f32 {
        (self.x - other.x)
            .abs()
            .max((self.y - other.y).abs())
            .max((self.z - other.z).abs())
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    #[inline]
    fn mul(self, s: f32) -> Self {
        Self::new(self.x * s, self.y * s, self.z * s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_roundtrip() {
        let a = Vec3::from_array([0.25, -1.0, 8.0]);
        assert_eq!(a.to_array(), [0.25, -1.0, 8.0]);
        assert_eq!(a.max_abs_diff(Vec3::new(0.25, -0.5, 8.0)), 0.5);
        assert_eq!(a * 2.0, Vec3::new(0.5, -2.0, 16.0));
    }
}
