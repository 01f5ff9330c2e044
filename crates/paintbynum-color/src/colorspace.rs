//! Grayscale conversion

use crate::{ColorError, ColorResult};
use paintbynum_core::{Pix, PixMut, PixelDepth, color};

/// Luminance of an RGB triple: `0.299 R + 0.587 G + 0.114 B`, rounded.
///
/// Computed with 14-bit fixed-point weights that sum to exactly `1 << 14`,
/// so gray inputs map to themselves.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    const WR: u32 = 4899;
    const WG: u32 = 9617;
    const WB: u32 = 1868;
    ((r as u32 * WR + g as u32 * WG + b as u32 * WB + (1 << 13)) >> 14) as u8
}

/// Convert an image to 8-bit grayscale.
///
/// 32-bit images are converted by luminance; 8-bit images are copied.
pub fn convert_to_gray(pix: &Pix) -> ColorResult<Pix> {
    match pix.depth() {
        PixelDepth::Bit8 => Ok(pix.deep_clone()),
        PixelDepth::Bit32 => {
            let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit8)?;
            for (dst, &p) in out.data_mut().iter_mut().zip(pix.data()) {
                let (r, g, b) = color::extract_rgb(p);
                *dst = rgb_to_gray(r, g, b) as u32;
            }
            Ok(out.into())
        }
        d => Err(ColorError::UnsupportedDepth {
            expected: "8 or 32 bpp",
            actual: d.bits(),
        }),
    }
}
