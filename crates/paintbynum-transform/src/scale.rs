//! Image scaling
//!
//! Bilinear resampling with pixel-center alignment: destination pixel
//! `(xd, yd)` samples the source at `((xd + 0.5) / sx - 0.5, (yd + 0.5) / sy - 0.5)`,
//! where `sx` and `sy` are the effective per-axis factors after rounding
//! the output size. Samples outside the image are clamped to the border.

use crate::{TransformError, TransformResult};
use paintbynum_core::{Pix, PixMut, PixelDepth, color};

/// Compute the output size for a scale factor: `round(dim * factor)`.
pub fn scaled_dimensions(width: u32, height: u32, factor: f32) -> (u32, u32) {
    let w = (width as f64 * factor as f64).round();
    let h = (height as f64 * factor as f64).round();
    (w.max(0.0) as u32, h.max(0.0) as u32)
}

/// Scale an image by `factor` using bilinear interpolation.
///
/// # Arguments
/// * `pix` - 8-bit gray or 32-bit RGB image
/// * `factor` - Scale factor; must be finite and positive
///
/// # Errors
/// * `InvalidScaleFactor` for a non-finite or non-positive factor
/// * `EmptyResult` when either output dimension rounds to zero
pub fn scale(pix: &Pix, factor: f32) -> TransformResult<Pix> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TransformError::InvalidScaleFactor(format!(
            "factor must be positive, got {}",
            factor
        )));
    }
    if pix.depth() == PixelDepth::Bit1 {
        return Err(paintbynum_core::Error::UnsupportedDepth(1).into());
    }

    let (ws, hs) = pix.dimensions();
    let (wd, hd) = scaled_dimensions(ws, hs, factor);
    if wd == 0 || hd == 0 {
        return Err(TransformError::EmptyResult {
            width: wd,
            height: hd,
        });
    }
    log::info!("scaling {}x{} -> {}x{}", ws, hs, wd, hd);

    if (wd, hd) == (ws, hs) {
        return Ok(pix.deep_clone());
    }

    let sx = wd as f32 / ws as f32;
    let sy = hd as f32 / hs as f32;
    let xs = axis_samples(wd, ws, sx);
    let ys = axis_samples(hd, hs, sy);

    let mut out = PixMut::new(wd, hd, pix.depth())?;
    let src = pix.data();
    let ws = ws as usize;
    for (yd, &(y0, y1, fy)) in ys.iter().enumerate() {
        let row0 = &src[y0 * ws..(y0 + 1) * ws];
        let row1 = &src[y1 * ws..(y1 + 1) * ws];
        for (xd, &(x0, x1, fx)) in xs.iter().enumerate() {
            let quad = [row0[x0], row0[x1], row1[x0], row1[x1]];
            let val = match pix.depth() {
                PixelDepth::Bit32 => {
                    let c = quad.map(color::channels);
                    let ch = |i: usize| lerp2([c[0][i], c[1][i], c[2][i], c[3][i]], fx, fy);
                    color::compose_rgb(ch(0), ch(1), ch(2))
                }
                _ => lerp2(quad.map(|v| v as u8), fx, fy) as u32,
            };
            out.set_pixel_unchecked(xd as u32, yd as u32, val);
        }
    }

    Ok(out.into())
}

/// For each destination index, the two source neighbors and the weight
/// of the second one.
fn axis_samples(dst_len: u32, src_len: u32, factor: f32) -> Vec<(usize, usize, f32)> {
    let max = (src_len - 1) as f32;
    (0..dst_len)
        .map(|d| {
            let s = ((d as f32 + 0.5) / factor - 0.5).clamp(0.0, max);
            let i0 = s.floor() as usize;
            let i1 = (i0 + 1).min(src_len as usize - 1);
            (i0, i1, s - i0 as f32)
        })
        .collect()
}

fn lerp2(q: [u8; 4], fx: f32, fy: f32) -> u8 {
    let top = q[0] as f32 * (1.0 - fx) + q[1] as f32 * fx;
    let bot = q[2] as f32 * (1.0 - fx) + q[3] as f32 * fx;
    (top * (1.0 - fy) + bot * fy).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_dimensions_rounding() {
        assert_eq!(scaled_dimensions(100, 50, 0.1), (10, 5));
        assert_eq!(scaled_dimensions(15, 15, 0.1), (2, 2));
        assert_eq!(scaled_dimensions(4, 4, 0.1), (0, 0));
    }

    #[test]
    fn test_scale_identity() {
        let pix = Pix::from_fn(7, 5, PixelDepth::Bit8, |x, y| x * 10 + y).unwrap();
        let out = scale(&pix, 1.0).unwrap();
        assert_eq!(out.data(), pix.data());
    }

    #[test]
    fn test_scale_half_averages_blocks() {
        // each 2x2 block of a 4x4 image collapses to its mean
        let pix = Pix::from_fn(4, 4, PixelDepth::Bit8, |x, _| if x < 2 { 0 } else { 200 }).unwrap();
        let out = scale(&pix, 0.5).unwrap();
        assert_eq!(out.dimensions(), (2, 2));
        assert_eq!(out.get_pixel(0, 0), Some(0));
        assert_eq!(out.get_pixel(1, 1), Some(200));
    }

    #[test]
    fn test_scale_rgb_flat_color_preserved() {
        let c = color::compose_rgb(12, 34, 56);
        let pix = Pix::from_fn(9, 9, PixelDepth::Bit32, |_, _| c).unwrap();
        let out = scale(&pix, 0.37).unwrap();
        assert_eq!(out.dimensions(), (3, 3));
        assert!(out.data().iter().all(|&p| p == c));
    }

    #[test]
    fn test_scale_errors() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        assert!(matches!(
            scale(&pix, 0.0),
            Err(TransformError::InvalidScaleFactor(_))
        ));
        assert!(matches!(
            scale(&pix, f32::NAN),
            Err(TransformError::InvalidScaleFactor(_))
        ));
        assert!(matches!(
            scale(&pix, 0.1),
            Err(TransformError::EmptyResult { .. })
        ));
    }
}
