//! Convolution operations
//!
//! All convolutions use replicate (clamp) border handling: pixels outside
//! the image are treated as having the value of the nearest edge pixel.
//! Color images are filtered per channel in floating point and rounded
//! once at the end.

use crate::{FilterError, FilterResult, Kernel};
use paintbynum_core::{FPix, Pix, PixMut, PixelDepth, color};

/// Split an 8-bit or 32-bit image into float channel planes.
///
/// Returns one plane for gray and three (R, G, B) for color.
pub fn split_channels(pix: &Pix) -> FilterResult<Vec<FPix>> {
    let (w, h) = pix.dimensions();
    match pix.depth() {
        PixelDepth::Bit8 => {
            let data = pix.data().iter().map(|&v| v as f32).collect();
            Ok(vec![FPix::from_data(w, h, data)?])
        }
        PixelDepth::Bit32 => (0..3)
            .map(|c| {
                let data = pix
                    .data()
                    .iter()
                    .map(|&v| color::channels(v)[c] as f32)
                    .collect();
                Ok(FPix::from_data(w, h, data)?)
            })
            .collect(),
        d => Err(FilterError::UnsupportedDepth {
            expected: "8 or 32 bpp",
            actual: d.bits(),
        }),
    }
}

/// Merge float planes back into an image, rounding and clamping to `[0, 255]`.
pub(crate) fn merge_channels(planes: &[FPix]) -> FilterResult<Pix> {
    let (w, h) = planes[0].dimensions();
    let to_u8 = |v: f32| v.round().clamp(0.0, 255.0) as u8;
    if planes.len() == 1 {
        let mut out = PixMut::new(w, h, PixelDepth::Bit8)?;
        for (dst, &v) in out.data_mut().iter_mut().zip(planes[0].data()) {
            *dst = to_u8(v) as u32;
        }
        return Ok(out.into());
    }

    let mut out = PixMut::new(w, h, PixelDepth::Bit32)?;
    let (r, g, b) = (planes[0].data(), planes[1].data(), planes[2].data());
    for (i, dst) in out.data_mut().iter_mut().enumerate() {
        *dst = color::compose_rgb(to_u8(r[i]), to_u8(g[i]), to_u8(b[i]));
    }
    Ok(out.into())
}

/// Convolve a float image with a kernel, replicating the border.
pub fn convolve_fpix(fpix: &FPix, kernel: &Kernel) -> FilterResult<FPix> {
    let (w, h) = fpix.dimensions();
    let kw = kernel.width();
    let kh = kernel.height();
    let kcx = kernel.center_x() as i32;
    let kcy = kernel.center_y() as i32;

    let mut out = FPix::new(w, h)?;
    let dst = out.data_mut();
    for y in 0..h {
        for x in 0..w {
            let mut sum = 0.0f32;
            for ky in 0..kh {
                let sy = (y as i32 + ky as i32 - kcy).clamp(0, h as i32 - 1) as u32;
                for kx in 0..kw {
                    let sx = (x as i32 + kx as i32 - kcx).clamp(0, w as i32 - 1) as u32;
                    let k = kernel.get(kx, ky).unwrap_or(0.0);
                    sum += fpix.get_pixel_unchecked(sx, sy) * k;
                }
            }
            dst[(y * w + x) as usize] = sum;
        }
    }
    Ok(out)
}

/// Convolve an 8-bit or 32-bit image with a kernel.
pub fn convolve(pix: &Pix, kernel: &Kernel) -> FilterResult<Pix> {
    let planes = split_channels(pix)?
        .iter()
        .map(|p| convolve_fpix(p, kernel))
        .collect::<FilterResult<Vec<_>>>()?;
    merge_channels(&planes)
}

/// Separable convolution: `kernel_x` along rows, then `kernel_y` along
/// columns. Intermediate results stay in floating point.
pub fn convolve_sep(pix: &Pix, kernel_x: &Kernel, kernel_y: &Kernel) -> FilterResult<Pix> {
    let planes = split_channels(pix)?
        .iter()
        .map(|p| convolve_fpix(&convolve_fpix(p, kernel_x)?, kernel_y))
        .collect::<FilterResult<Vec<_>>>()?;
    merge_channels(&planes)
}

/// Gaussian blur with a square kernel of odd width `kernel_width`.
///
/// The standard deviation is derived from the width (see
/// [`crate::gaussian_sigma`]). A width of 1 returns a copy.
///
/// # Errors
/// `InvalidParameters` if `kernel_width` is even or zero.
pub fn gaussian_blur(pix: &Pix, kernel_width: u32) -> FilterResult<Pix> {
    if kernel_width == 0 || kernel_width % 2 == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "blur kernel width must be odd and >= 1, got {}",
            kernel_width
        )));
    }
    log::info!(
        "gaussian blur: {}x{} kernel, sigma {:.3}",
        kernel_width,
        kernel_width,
        crate::gaussian_sigma(kernel_width)
    );
    if kernel_width == 1 {
        return Ok(pix.deep_clone());
    }

    let kx = Kernel::gaussian_1d(kernel_width)?;
    let ky = kx.transposed();
    convolve_sep(pix, &kx, &ky)
}
