//! FPix - Floating-point image
//!
//! `FPix` is a 2D array of `f32` values. The pipeline uses it for the
//! distance-to-background field, which is normalized to `[0, 1]` before
//! peak extraction.
//!
//! # Examples
//!
//! ```
//! use paintbynum_core::FPix;
//!
//! let mut fpix = FPix::new(100, 100).unwrap();
//! fpix.set_pixel(10, 20, 4.0).unwrap();
//! fpix.set_pixel(11, 20, 2.0).unwrap();
//!
//! let norm = fpix.normalize_min_max();
//! assert_eq!(norm.get_pixel(10, 20).unwrap(), 1.0);
//! assert_eq!(norm.get_pixel(11, 20).unwrap(), 0.5);
//! ```

use crate::error::{Error, Result};
use crate::pix::{Pix, PixMut, PixelDepth};

/// Floating-point image
///
/// # Memory Layout
///
/// Data is stored in row-major order with no padding. The pixel at (x, y)
/// is at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FPix {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel data (row-major, no padding)
    data: Vec<f32>,
}

impl FPix {
    /// Create a new FPix with all pixels set to zero
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::new_with_value(width, height, 0.0)
    }

    /// Create a new FPix with all pixels set to the specified value
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDimension` if width or height is 0.
    pub fn new_with_value(width: u32, height: u32, value: f32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let size = (width as usize) * (height as usize);
        Ok(FPix {
            width,
            height,
            data: vec![value; size],
        })
    }

    /// Create a FPix from raw data
    ///
    /// # Errors
    ///
    /// Returns an error if dimensions are invalid or data length doesn't match.
    pub fn from_data(width: u32, height: u32, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let expected_size = (width as usize) * (height as usize);
        if data.len() != expected_size {
            return Err(Error::InvalidParameter(format!(
                "data length {} doesn't match {}x{} = {}",
                data.len(),
                width,
                height,
                expected_size
            )));
        }

        Ok(FPix {
            width,
            height,
            data,
        })
    }

    /// Get the image width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the image dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Get the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Result<f32> {
        self.check_bounds(x, y)?;
        Ok(self.get_pixel_unchecked(x, y))
    }

    /// Get the pixel value at (x, y) without a bounds check.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> f32 {
        self.data[(y as usize) * (self.width as usize) + (x as usize)]
    }

    /// Set the pixel value at (x, y)
    ///
    /// # Errors
    ///
    /// Returns `Error::IndexOutOfBounds` if coordinates are out of range.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, value: f32) -> Result<()> {
        self.check_bounds(x, y)?;
        let idx = (y as usize) * (self.width as usize) + (x as usize);
        self.data[idx] = value;
        Ok(())
    }

    /// Get the raw pixel data
    #[inline]
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get the raw pixel data mutably
    #[inline]
    pub fn data_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }

    /// Get the minimum and maximum values as (min, max)
    pub fn min_max(&self) -> (f32, f32) {
        self.data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Linearly rescale all values into `[0, 1]`.
    ///
    /// The minimum maps to 0 and the maximum to 1. A constant field has no
    /// range to stretch and maps to all zeros.
    pub fn normalize_min_max(&self) -> FPix {
        let (lo, hi) = self.min_max();
        let range = hi - lo;
        let data = if range > 0.0 {
            self.data
                .iter()
                .map(|&v| ((v - lo) / range).clamp(0.0, 1.0))
                .collect()
        } else {
            vec![0.0; self.data.len()]
        };
        FPix {
            width: self.width,
            height: self.height,
            data,
        }
    }

    /// Render a `[0, 1]` field as an 8-bit grayscale image (`round(255 * v)`).
    pub fn to_pix_8(&self) -> Result<Pix> {
        let mut out = PixMut::new(self.width, self.height, PixelDepth::Bit8)?;
        for (dst, &v) in out.data_mut().iter_mut().zip(self.data.iter()) {
            *dst = (v * 255.0).round().clamp(0.0, 255.0) as u32;
        }
        Ok(out.into())
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}
