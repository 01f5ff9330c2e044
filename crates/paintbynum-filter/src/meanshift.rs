//! Mean-shift filtering
//!
//! Edge-preserving smoothing by mode seeking in the joint
//! (position, color) space. For each pixel, a window of half-width
//! `spatial_radius` is centered on the current estimate; the pixels inside
//! it whose color lies within `color_radius` (Euclidean, RGB) of the current
//! color are averaged to give the next position and color. Iteration stops
//! when the position stops moving, when the combined L1 shift is at most
//! `epsilon`, or after `max_iterations`. The pixel takes the converged color.
//!
//! Textured areas collapse toward their local color mode while strong
//! edges, whose two sides fall outside each other's color window, survive.

use crate::{FilterError, FilterResult};
use paintbynum_core::{Pix, PixMut, PixelDepth, color};

/// Mean-shift window sizes and termination criteria
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanShiftParams {
    /// Spatial window half-width in pixels
    pub spatial_radius: u32,
    /// Color window radius
    pub color_radius: u32,
    /// Maximum number of shifts per pixel
    pub max_iterations: u32,
    /// Stop once the spatial + color L1 shift is at most this
    pub epsilon: u32,
}

impl MeanShiftParams {
    /// Windows with the default termination (5 iterations, epsilon 1).
    pub fn new(spatial_radius: u32, color_radius: u32) -> Self {
        Self {
            spatial_radius,
            color_radius,
            max_iterations: 5,
            epsilon: 1,
        }
    }

    /// Set the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence epsilon.
    pub fn with_epsilon(mut self, epsilon: u32) -> Self {
        self.epsilon = epsilon;
        self
    }
}

/// Mean-shift filter a 32-bit RGB image with the default termination.
pub fn mean_shift_filter(pix: &Pix, spatial_radius: u32, color_radius: u32) -> FilterResult<Pix> {
    mean_shift_filter_with(pix, &MeanShiftParams::new(spatial_radius, color_radius))
}

/// Mean-shift filter a 32-bit RGB image.
///
/// # Errors
/// * `UnsupportedDepth` unless the image is 32 bpp
/// * `InvalidParameters` if either window is zero
pub fn mean_shift_filter_with(pix: &Pix, params: &MeanShiftParams) -> FilterResult<Pix> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(FilterError::UnsupportedDepth {
            expected: "32 bpp",
            actual: pix.depth().bits(),
        });
    }
    if params.spatial_radius == 0 || params.color_radius == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "mean-shift windows must be positive: spatial {}, color {}",
            params.spatial_radius, params.color_radius
        )));
    }
    log::info!(
        "mean-shift filter: spatial window {}, color window {}",
        params.spatial_radius,
        params.color_radius
    );

    let (w, h) = pix.dimensions();
    let src: Vec<[i32; 3]> = pix
        .data()
        .iter()
        .map(|&p| color::channels(p).map(i32::from))
        .collect();

    let mut out = PixMut::new(w, h, PixelDepth::Bit32)?;
    let mut total_iterations = 0u64;
    for y in 0..h {
        for x in 0..w {
            let (c, iters) = seek_mode(&src, w, h, x as i32, y as i32, params);
            total_iterations += iters as u64;
            out.set_pixel_unchecked(x, y, color::compose_rgb(c[0] as u8, c[1] as u8, c[2] as u8));
        }
    }
    log::debug!(
        "mean-shift: {:.2} iterations per pixel",
        total_iterations as f64 / (w as f64 * h as f64)
    );

    Ok(out.into())
}

fn seek_mode(
    src: &[[i32; 3]],
    w: u32,
    h: u32,
    x: i32,
    y: i32,
    params: &MeanShiftParams,
) -> ([i32; 3], u32) {
    let sp = params.spatial_radius as i32;
    let sr2 = (params.color_radius as i64).pow(2);
    let (mut x0, mut y0) = (x, y);
    let mut c0 = src[(y as usize) * (w as usize) + x as usize];

    let mut iterations = 0;
    while iterations < params.max_iterations {
        iterations += 1;
        let xmin = (x0 - sp).max(0);
        let xmax = (x0 + sp).min(w as i32 - 1);
        let ymin = (y0 - sp).max(0);
        let ymax = (y0 + sp).min(h as i32 - 1);

        let (mut sx, mut sy) = (0i64, 0i64);
        let mut sc = [0i64; 3];
        let mut count = 0i64;
        for yy in ymin..=ymax {
            let row = (yy as usize) * (w as usize);
            for xx in xmin..=xmax {
                let c = src[row + xx as usize];
                let d2: i64 = (0..3).map(|i| ((c[i] - c0[i]) as i64).pow(2)).sum();
                if d2 <= sr2 {
                    sx += xx as i64;
                    sy += yy as i64;
                    for i in 0..3 {
                        sc[i] += c[i] as i64;
                    }
                    count += 1;
                }
            }
        }
        if count == 0 {
            break;
        }

        let mean = |s: i64| (s as f64 / count as f64).round() as i32;
        let (x1, y1) = (mean(sx), mean(sy));
        let c1 = sc.map(mean);

        let shift = (x1 - x0).abs()
            + (y1 - y0).abs()
            + (0..3).map(|i| (c1[i] - c0[i]).abs()).sum::<i32>();
        let stopped = (x1 == x0 && y1 == y0) || shift <= params.epsilon as i32;

        x0 = x1;
        y0 = y1;
        c0 = c1;
        if stopped {
            break;
        }
    }

    (c0, iterations)
}
