//! PIX - The main image container
//!
//! The `Pix` structure is the raster type every pipeline stage produces.
//! It holds RGB images, 8-bit grayscale images and 1-bit binary masks.
//!
//! # Pixel layout
//!
//! - Image data is stored one pixel per 32-bit word, row-major, no padding
//! - For 32-bit images, color order is RGBA (red in MSB), see [`crate::color`]
//! - 8-bit and 1-bit pixels occupy the low bits of their word
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership), so a stage can
//! hand its output to the next stage and keep a handle for previews.
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 1-bit binary mask
    Bit1 = 1,
    /// 8-bit grayscale
    Bit8 = 8,
    /// 32-bit RGB
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if `bits` is not 1, 8, or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            1 => Ok(PixelDepth::Bit1),
            8 => Ok(PixelDepth::Bit8),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::UnsupportedDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }

    /// Get the maximum pixel value representable at this depth.
    pub fn max_value(self) -> u32 {
        match self {
            PixelDepth::Bit32 => u32::MAX,
            _ => (1u32 << self.bits()) - 1,
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// The image data (one word per pixel)
    data: Vec<u32>,
}

impl PixData {
    fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let data = vec![0u32; (width as usize) * (height as usize)];
        Ok(Self {
            width,
            height,
            depth,
            data,
        })
    }
}

/// PIX - Immutable raster image
///
/// # Examples
///
/// ```
/// use paintbynum_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit32).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and depth.
    ///
    /// The image data is initialized to zero (black / background).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(Pix {
            inner: Arc::new(PixData::new(width, height, depth)?),
        })
    }

    /// Create a PIX whose pixel values are produced by `f(x, y)`.
    ///
    /// Values are masked to the depth's range.
    pub fn from_fn<F>(width: u32, height: u32, depth: PixelDepth, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> u32,
    {
        let mut pix = PixMut::new(width, height, depth)?;
        for y in 0..height {
            for x in 0..width {
                pix.set_pixel_unchecked(x, y, f(x, y));
            }
        }
        Ok(pix.into())
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.inner.width, self.inner.height)
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the raw pixel words (row-major).
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Check whether two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Count pixels with a nonzero value.
    pub fn count_nonzero(&self) -> usize {
        self.inner.data.iter().filter(|&&v| v != 0).count()
    }

    /// Try to take exclusive ownership of the pixel data.
    ///
    /// Fails (returning `self`) when other handles share the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Pix> {
        Arc::try_unwrap(self.inner)
            .map(|inner| PixMut { inner })
            .map_err(|inner| Pix { inner })
    }

    /// Create a mutable copy of this image.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }

    /// Create an independent copy that shares no data with `self`.
    pub fn deep_clone(&self) -> Pix {
        self.to_mut().into()
    }
}

/// Mutable raster image
///
/// Produced by [`PixMut::new`], [`Pix::try_into_mut`] or [`Pix::to_mut`];
/// converted back with `Into<Pix>` once the stage is done writing.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Create a new zero-filled mutable image.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        Ok(PixMut {
            inner: PixData::new(width, height, depth)?,
        })
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.inner.depth
    }

    /// Get the raw pixel words (row-major).
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the raw pixel words mutably (row-major).
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Set every pixel to `val` (masked to the depth's range).
    pub fn fill(&mut self, val: u32) {
        let val = val & self.inner.depth.max_value();
        self.inner.data.fill(val);
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_area() {
        assert!(matches!(
            Pix::new(0, 10, PixelDepth::Bit8),
            Err(Error::InvalidDimension {
                width: 0,
                height: 10
            })
        ));
        assert!(PixMut::new(10, 0, PixelDepth::Bit1).is_err());
    }

    #[test]
    fn test_try_into_mut_shared() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let other = pix.clone();
        let pix = pix.try_into_mut().unwrap_err();
        drop(other);
        assert!(pix.try_into_mut().is_ok());
    }

    #[test]
    fn test_from_fn_masks_values() {
        let pix = Pix::from_fn(3, 2, PixelDepth::Bit1, |x, _| x).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(0));
        assert_eq!(pix.get_pixel(1, 1), Some(1));
        assert_eq!(pix.get_pixel(2, 0), Some(0));
        assert_eq!(pix.count_nonzero(), 2);
    }

    #[test]
    fn test_deep_clone_independent() {
        let pix = Pix::new(2, 2, PixelDepth::Bit8).unwrap();
        let mut copy = pix.deep_clone().try_into_mut().unwrap();
        copy.set_pixel(0, 0, 200).unwrap();
        let copy: Pix = copy.into();
        assert_eq!(pix.get_pixel(0, 0), Some(0));
        assert_eq!(copy.get_pixel(0, 0), Some(200));
    }
}
