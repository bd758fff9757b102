//! Three-channel float image buffers.
//!
//! [`Image`] stores interleaved `f32` triplets, row-major, tagged with a
//! [`ColorSpace`] marker. RGB buffers use the 16-bit scaled convention
//! (`0..65535` nominal, values above are legal). [`LabImage`] is the same
//! buffer tagged as [`CieLab`] and is used for the adaptation scratch data.
//!
//! # Memory Management
//!
//! Pixel data lives in an [`Arc<Vec<f32>>`]: cloning shares the buffer, and
//! [`Image::data_mut`] copies on first write. An unchanged clone is therefore
//! bit-identical to its source at no cost.
//!
//! # Example
//!
//! ```rust
//! use locadapt_core::{Image, WideGamut};
//!
//! let mut img: Image<WideGamut> = Image::filled(4, 2, [1000.0, 2000.0, 3000.0]);
//! img.set_pixel(1, 1, [0.0, 0.0, 0.0]);
//! assert_eq!(img.pixel(0, 0), [1000.0, 2000.0, 3000.0]);
//! assert_eq!(img.row(1).len(), 4 * 3);
//! ```

use crate::colorspace::{CieLab, ColorSpace};
use crate::error::{Error, Result};
use std::marker::PhantomData;
use std::sync::Arc;

/// Channels per pixel.
pub const CHANNELS: usize = 3;

/// Owned three-channel image with a compile-time color space.
#[derive(Clone)]
pub struct Image<C: ColorSpace> {
    data: Arc<Vec<f32>>,
    width: u32,
    height: u32,
    _colorspace: PhantomData<C>,
}

/// Lab scratch buffer.
pub type LabImage = Image<CieLab>;

impl<C: ColorSpace> Image<C> {
    /// Creates a zero-filled image.
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            data: Arc::new(vec![0.0; len]),
            width,
            height,
            _colorspace: PhantomData,
        }
    }

    /// Wraps existing interleaved data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len()` is not
    /// `width * height * 3`.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} elements, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data: Arc::new(data),
            width,
            height,
            _colorspace: PhantomData,
        })
    }

    /// Creates an image where every pixel has the same value.
    pub fn filled(width: u32, height: u32, pixel: [f32; CHANNELS]) -> Self {
        let count = width as usize * height as usize;
        let data = pixel.iter().copied().cycle().take(count * CHANNELS).collect();
        Self {
            data: Arc::new(data),
            width,
            height,
            _colorspace: PhantomData,
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Floats per row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// True if the image has no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Interleaved pixel data.
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Mutable pixel data; detaches from shared clones first.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        Arc::make_mut(&mut self.data).as_mut_slice()
    }

    /// True if both images share the same allocation.
    pub fn shares_buffer(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * CHANNELS
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [f32; CHANNELS] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Writes the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: [f32; CHANNELS]) {
        let i = self.offset(x, y);
        self.data_mut()[i..i + CHANNELS].copy_from_slice(&pixel);
    }

    /// One row of interleaved data.
    #[inline]
    pub fn row(&self, y: u32) -> &[f32] {
        let start = y as usize * self.row_len();
        &self.data[start..start + self.row_len()]
    }
}

impl<C: ColorSpace> std::fmt::Debug for Image<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("colorspace", &C::NAME)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WideGamut;

    #[test]
    fn test_from_data_checks_length() {
        assert!(Image::<WideGamut>::from_data(2, 2, vec![0.0; 12]).is_ok());
        let err = Image::<WideGamut>::from_data(2, 2, vec![0.0; 11]).unwrap_err();
        assert!(err.to_string().contains("expected 12"));
    }

    #[test]
    fn test_copy_on_write() {
        let a: Image<WideGamut> = Image::filled(3, 3, [1.0, 2.0, 3.0]);
        let mut b = a.clone();
        assert!(a.shares_buffer(&b));
        b.set_pixel(2, 2, [0.0, 0.0, 0.0]);
        assert!(!a.shares_buffer(&b));
        assert_eq!(a.pixel(2, 2), [1.0, 2.0, 3.0]);
        assert_eq!(b.pixel(2, 2), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rows() {
        let mut img: LabImage = Image::new(5, 2);
        img.set_pixel(0, 1, [42.0, 0.0, 0.0]);
        assert_eq!(img.row(1)[0], 42.0);
        assert_eq!(img.row(1).len(), img.row_len());
        assert_eq!(img.dimensions(), (5, 2));
    }
}
