//! Binary morphological operations
//!
//! Dilation of 1-bpp images. Pixels outside the image are background.

use crate::{MorphError, MorphResult, Sel};
use paintbynum_core::{Pix, PixMut, PixelDepth};

fn check_binary(pix: &Pix) -> MorphResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(MorphError::UnsupportedDepth {
            expected: "1 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// Dilate a binary image with a structuring element.
///
/// For each hit `(dx, dy)` relative to the SEL origin, the source shifted
/// by that offset is OR-accumulated into the output:
/// `dst(x, y) |= src(x - dx, y - dy)`.
pub fn dilate(pix: &Pix, sel: &Sel) -> MorphResult<Pix> {
    check_binary(pix)?;
    let (w, h) = pix.dimensions();
    let (wi, hi) = (w as i32, h as i32);
    let src = pix.data();

    let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;
    let dst = out.data_mut();
    for (dx, dy) in sel.hit_offsets() {
        for y in 0..hi {
            let sy = y - dy;
            if sy < 0 || sy >= hi {
                continue;
            }
            let drow = (y * wi) as usize;
            let srow = (sy * wi) as usize;
            let x0 = dx.max(0);
            let x1 = (wi + dx).min(wi);
            for x in x0..x1 {
                dst[drow + x as usize] |= src[srow + (x - dx) as usize];
            }
        }
    }

    Ok(out.into())
}

/// Dilate with a `width x height` brick, origin at `(width / 2, height / 2)`.
///
/// The brick is applied separably as a horizontal then a vertical line.
pub fn dilate_brick(pix: &Pix, width: u32, height: u32) -> MorphResult<Pix> {
    check_binary(pix)?;
    if width == 0 || height == 0 {
        return Err(MorphError::InvalidSel(format!(
            "brick dimensions must be nonzero: {}x{}",
            width, height
        )));
    }
    if width == 1 && height == 1 {
        return Ok(pix.deep_clone());
    }

    let horiz = if width > 1 {
        dilate(pix, &Sel::create_brick(width, 1)?)?
    } else {
        pix.clone()
    };
    if height > 1 {
        dilate(&horiz, &Sel::create_brick(1, height)?)
    } else {
        Ok(horiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(w: u32, h: u32, px: u32, py: u32) -> Pix {
        Pix::from_fn(w, h, PixelDepth::Bit1, |x, y| u32::from((x, y) == (px, py))).unwrap()
    }

    #[test]
    fn test_dilate_point_to_square() {
        let pix = point(7, 7, 3, 3);
        let out = dilate_brick(&pix, 3, 3).unwrap();
        assert_eq!(out.count_nonzero(), 9);
        assert_eq!(out.get_pixel(2, 2), Some(1));
        assert_eq!(out.get_pixel(4, 4), Some(1));
        assert_eq!(out.get_pixel(5, 3), Some(0));
    }

    #[test]
    fn test_dilate_clips_at_border() {
        let pix = point(5, 5, 0, 0);
        let out = dilate_brick(&pix, 3, 3).unwrap();
        assert_eq!(out.count_nonzero(), 4);
    }

    #[test]
    fn test_dilate_width_one_is_copy() {
        let pix = point(4, 4, 1, 2);
        let out = dilate_brick(&pix, 1, 1).unwrap();
        assert_eq!(out.data(), pix.data());
    }

    #[test]
    fn test_separable_matches_full_brick() {
        let pix = Pix::from_fn(12, 9, PixelDepth::Bit1, |x, y| u32::from((x * 7 + y * 3) % 11 == 0))
            .unwrap();
        let sep = dilate_brick(&pix, 4, 3).unwrap();
        let full = dilate(&pix, &Sel::create_brick(4, 3).unwrap()).unwrap();
        assert_eq!(sep.data(), full.data());
    }

    #[test]
    fn test_rejects_gray() {
        let pix = Pix::new(3, 3, PixelDepth::Bit8).unwrap();
        assert!(dilate_brick(&pix, 3, 3).is_err());
        let mask = point(3, 3, 1, 1);
        assert!(dilate_brick(&mask, 0, 3).is_err());
    }
}
