//! Peak extraction on a normalized distance field
//!
//! Pixels far from the background sit near the medial axis of each
//! foreground region. Thresholding the normalized field keeps those
//! cores; a square dilation then merges fragments that belong together.
//! Larger dilation widths merge more cores and give fewer regions.

use crate::{RegionError, RegionResult};
use paintbynum_core::{FPix, Pix, PixMut, PixelDepth};
use paintbynum_morph::dilate_brick;

/// Mask of the pixels with `field >= threshold`.
///
/// # Errors
/// `InvalidParameters` unless `threshold` is in `[0, 1)`.
pub fn threshold_peaks(field: &FPix, threshold: f32) -> RegionResult<Pix> {
    if !(0.0..1.0).contains(&threshold) {
        return Err(RegionError::InvalidParameters(format!(
            "peak threshold must be in [0, 1), got {}",
            threshold
        )));
    }
    let (w, h) = field.dimensions();
    let mut out = PixMut::new(w, h, PixelDepth::Bit1)?;
    for (dst, &d) in out.data_mut().iter_mut().zip(field.data()) {
        *dst = u32::from(d >= threshold);
    }
    Ok(out.into())
}

/// Threshold the field, then dilate with a `dilate_width` square.
///
/// # Errors
/// `InvalidParameters` for a threshold outside `[0, 1)` or a zero width.
pub fn extract_peaks(field: &FPix, threshold: f32, dilate_width: u32) -> RegionResult<Pix> {
    if dilate_width == 0 {
        return Err(RegionError::InvalidParameters(
            "dilate width must be >= 1".to_string(),
        ));
    }
    log::info!(
        "peaks: threshold {}, dilate width {}",
        threshold,
        dilate_width
    );
    let peaks = threshold_peaks(field, threshold)?;
    let grown = dilate_brick(&peaks, dilate_width, dilate_width)?;
    log::debug!(
        "peaks: {} pixels above threshold, {} after dilation",
        peaks.count_nonzero(),
        grown.count_nonzero()
    );
    Ok(grown)
}
