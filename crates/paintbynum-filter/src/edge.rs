//! Laplacian sharpening
//!
//! The sharpened image is `image - L(image)`, where `L` is the 3x3
//! Laplacian with neighbor weight `coeff` and center weight `-8 * coeff`.
//! The subtraction is done in floating point per channel, then rounded
//! and clamped to `[0, 255]`.
//!
//! `coeff = 0` leaves the image unchanged. A negative `coeff` flips the
//! sign of the correction and smooths instead of sharpening.

use crate::convolve::{merge_channels, split_channels};
use crate::{FilterResult, Kernel, convolve_fpix};
use paintbynum_core::{FPix, Pix};

/// Per-channel Laplacian response of an 8-bit or 32-bit image.
pub fn laplacian_response(pix: &Pix, coeff: f32) -> FilterResult<Vec<FPix>> {
    let kernel = Kernel::laplacian(coeff);
    split_channels(pix)?
        .iter()
        .map(|plane| convolve_fpix(plane, &kernel))
        .collect()
}

/// Sharpen an 8-bit or 32-bit image by subtracting its Laplacian.
pub fn sharpen(pix: &Pix, coeff: f32) -> FilterResult<Pix> {
    log::info!(
        "sharpen: laplacian neighbors {}, center {}",
        coeff,
        -8.0 * coeff
    );

    let mut planes = split_channels(pix)?;
    let responses = laplacian_response(pix, coeff)?;
    for (plane, lap) in planes.iter_mut().zip(responses.iter()) {
        for (v, &l) in plane.data_mut().iter_mut().zip(lap.data()) {
            *v -= l;
        }
    }
    merge_channels(&planes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintbynum_core::{PixelDepth, color};

    #[test]
    fn test_sharpen_zero_coeff_is_identity() {
        let pix = Pix::from_fn(6, 6, PixelDepth::Bit32, |x, y| {
            color::compose_rgb((x * 40) as u8, (y * 40) as u8, 99)
        })
        .unwrap();
        let out = sharpen(&pix, 0.0).unwrap();
        assert_eq!(out.data(), pix.data());
    }

    #[test]
    fn test_sharpen_flat_image_unchanged() {
        let pix = Pix::from_fn(5, 5, PixelDepth::Bit8, |_, _| 77).unwrap();
        let out = sharpen(&pix, 1.25).unwrap();
        assert!(out.data().iter().all(|&v| v == 77));
    }

    #[test]
    fn test_sharpen_isolated_bright_pixel() {
        // center 100 in a field of 50, coeff 1:
        // L(center) = 8*50 - 8*100 = -400, sharp = 100 + 400 -> 255
        // L(neighbor) = 100 + 7*50 - 8*50 = 50, sharp = 50 - 50 = 0
        let pix = Pix::from_fn(5, 5, PixelDepth::Bit8, |x, y| {
            if (x, y) == (2, 2) { 100 } else { 50 }
        })
        .unwrap();
        let out = sharpen(&pix, 1.0).unwrap();
        assert_eq!(out.get_pixel(2, 2), Some(255));
        assert_eq!(out.get_pixel(1, 2), Some(0));
        assert_eq!(out.get_pixel(0, 0), Some(50));
    }

    #[test]
    fn test_negative_coeff_softens() {
        let pix = Pix::from_fn(5, 5, PixelDepth::Bit8, |x, y| {
            if (x, y) == (2, 2) { 100 } else { 50 }
        })
        .unwrap();
        let out = sharpen(&pix, -0.05).unwrap();
        // L(center) = -0.05 * (8*50 - 8*100) = 20, sharp = 80
        assert_eq!(out.get_pixel(2, 2), Some(80));
    }
}
