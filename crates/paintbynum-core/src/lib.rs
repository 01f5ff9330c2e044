//! paintbynum core - Basic data structures for the segmentation pipeline
//!
//! This crate provides the buffers every pipeline stage produces and
//! consumes:
//!
//! - [`Pix`] / [`PixMut`] - Raster image container (immutable / mutable),
//!   used for RGB images, grayscale images and binary masks
//! - [`FPix`] - Floating-point image, used for the distance field
//! - [`LabelMap`] - Signed label grid shared by seed labeling, region
//!   growth, colorization and compositing

pub mod error;
pub mod fpix;
pub mod label;
pub mod pix;

pub use error::{Error, Result};
pub use fpix::FPix;
pub use label::{BACKGROUND_LABEL, BOUNDARY_LABEL, LabelMap, UNASSIGNED_LABEL};
pub use pix::{Pix, PixMut, PixelDepth};

/// Color channel helpers for 32-bit RGB pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Red channel (MSB, byte 0)
    pub const RED: usize = 0;
    /// Green channel (byte 1)
    pub const GREEN: usize = 1;
    /// Blue channel (byte 2)
    pub const BLUE: usize = 2;

    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub const fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGB values as an indexable array (see [`RED`], [`GREEN`], [`BLUE`]).
    #[inline]
    pub fn channels(pixel: u32) -> [u8; 3] {
        [red(pixel), green(pixel), blue(pixel)]
    }

    /// Largest absolute per-channel difference between two pixels.
    #[inline]
    pub fn max_channel_diff(p1: u32, p2: u32) -> u8 {
        let a = channels(p1);
        let b = channels(p2);
        a.iter()
            .zip(b.iter())
            .map(|(&c1, &c2)| c1.abs_diff(c2))
            .max()
            .unwrap_or(0)
    }

}
