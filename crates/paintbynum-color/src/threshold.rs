//! Binarization
//!
//! Converts an 8-bit grayscale image to a 1-bit mask. A pixel is
//! foreground (1) when its value is strictly greater than the threshold.
//! The threshold is either supplied by the caller or chosen by Otsu's
//! method over the 256-bin histogram.

use crate::{ColorError, ColorResult};
use paintbynum_core::{Pix, PixMut, PixelDepth};

/// How the binarization threshold is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThresholdMode {
    /// Otsu's method; any configured fixed value is ignored
    #[default]
    Auto,
    /// Use this threshold
    Fixed(u8),
}

fn check_gray(pix: &Pix) -> ColorResult<()> {
    if pix.depth() != PixelDepth::Bit8 {
        return Err(ColorError::UnsupportedDepth {
            expected: "8 bpp",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}

/// 256-bin histogram of an 8-bit image.
pub fn gray_histogram(pix: &Pix) -> ColorResult<[u64; 256]> {
    check_gray(pix)?;
    let mut hist = [0u64; 256];
    for &v in pix.data() {
        hist[(v & 0xff) as usize] += 1;
    }
    Ok(hist)
}

/// Compute Otsu's threshold for an 8-bit image.
///
/// Returns the `t` maximizing the between-class variance of the classes
/// `v <= t` and `v > t`, which is equivalent to minimizing the combined
/// within-class variance. Ties keep the smallest `t`. An image with a
/// single gray level has no split and yields 0.
pub fn compute_otsu_threshold(pix: &Pix) -> ColorResult<u8> {
    let hist = gray_histogram(pix)?;
    let total: u64 = hist.iter().sum();
    let sum: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut sum_b = 0.0f64;
    let mut weight_b = 0u64;
    let mut max_variance = 0.0f64;
    let mut threshold = 0u8;

    for (i, &count) in hist.iter().enumerate() {
        weight_b += count;
        sum_b += i as f64 * count as f64;
        if weight_b == 0 {
            continue;
        }
        let weight_f = total - weight_b;
        if weight_f == 0 {
            break;
        }

        let mean_b = sum_b / weight_b as f64;
        let mean_f = (sum - sum_b) / weight_f as f64;
        let variance = weight_b as f64 * weight_f as f64 * (mean_b - mean_f).powi(2);
        if variance > max_variance {
            max_variance = variance;
            threshold = i as u8;
        }
    }

    Ok(threshold)
}

/// Convert an 8-bit image to a 1-bit mask: `v > threshold` is foreground.
pub fn threshold_to_binary(pix: &Pix, threshold: u8) -> ColorResult<Pix> {
    check_gray(pix)?;
    let mut out = PixMut::new(pix.width(), pix.height(), PixelDepth::Bit1)?;
    let t = threshold as u32;
    for (dst, &v) in out.data_mut().iter_mut().zip(pix.data()) {
        *dst = u32::from(v > t);
    }
    Ok(out.into())
}

/// Binarize an 8-bit image, returning the mask and the threshold used.
pub fn binarize(pix: &Pix, mode: ThresholdMode) -> ColorResult<(Pix, u8)> {
    let threshold = match mode {
        ThresholdMode::Auto => compute_otsu_threshold(pix)?,
        ThresholdMode::Fixed(t) => t,
    };
    let mask = threshold_to_binary(pix, threshold)?;
    log::info!(
        "binarize: {:?} threshold {}, {} foreground pixels",
        mode,
        threshold,
        mask.count_nonzero()
    );
    Ok((mask, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(values: &[u32]) -> Pix {
        Pix::from_fn(values.len() as u32, 1, PixelDepth::Bit8, |x, _| {
            values[x as usize]
        })
        .unwrap()
    }

    #[test]
    fn test_otsu_bimodal() {
        let pix = gray(&[10, 12, 11, 10, 200, 210, 205, 201]);
        let t = compute_otsu_threshold(&pix).unwrap();
        assert!((12..200).contains(&t));
        let mask = threshold_to_binary(&pix, t).unwrap();
        assert_eq!(mask.data(), &[0, 0, 0, 0, 1, 1, 1, 1]);
    }

    #[test]
    fn test_otsu_two_levels_picks_lowest_split() {
        let pix = gray(&[0, 0, 255, 255]);
        assert_eq!(compute_otsu_threshold(&pix).unwrap(), 0);
    }

    #[test]
    fn test_otsu_uniform_is_zero() {
        assert_eq!(compute_otsu_threshold(&gray(&[255; 6])).unwrap(), 0);
        assert_eq!(compute_otsu_threshold(&gray(&[0; 6])).unwrap(), 0);
    }

    #[test]
    fn test_binarize_modes() {
        let pix = gray(&[0, 50, 100, 150, 200, 250]);
        let (mask, t) = binarize(&pix, ThresholdMode::Fixed(100)).unwrap();
        assert_eq!(t, 100);
        assert_eq!(mask.data(), &[0, 0, 0, 1, 1, 1]);
        let (auto_mask, auto_t) = binarize(&pix, ThresholdMode::Auto).unwrap();
        assert_eq!(auto_t, compute_otsu_threshold(&pix).unwrap());
        assert_eq!(auto_mask.depth(), PixelDepth::Bit1);
    }

    #[test]
    fn test_rejects_rgb() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        assert!(binarize(&pix, ThresholdMode::Auto).is_err());
    }
}
