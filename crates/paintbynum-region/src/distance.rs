//! Euclidean distance field
//!
//! Exact Euclidean distance transform of a binary mask, computed with the
//! separable lower-envelope-of-parabolas method of Felzenszwalb and
//! Huttenlocher: a 1D squared-distance pass down every column followed by
//! one along every row.
//!
//! Every foreground pixel gets its distance to the nearest background
//! pixel; background pixels get 0. Pixels outside the image are not
//! background. A mask without any background pixel has no distances to
//! measure and yields an all-zero field.

use crate::{RegionResult, check_binary};
use paintbynum_core::{FPix, Pix};

/// Stand-in for an infinite squared distance. Exceeds any squared
/// distance inside a 65535x65535 image while keeping parabola
/// intersections exact enough in f64.
const FAR: f64 = 1e12;

/// Squared distance transform of one line.
///
/// `f` holds the sampled function (0 at sites, `FAR` elsewhere); the
/// result is written to `d`. `v` and `z` are scratch buffers of length
/// `n` and `n + 1`.
fn squared_edt_1d(f: &[f64], d: &mut [f64], v: &mut [usize], z: &mut [f64]) {
    let n = f.len();
    let mut k = 0usize;
    v[0] = 0;
    z[0] = f64::NEG_INFINITY;
    z[1] = f64::INFINITY;

    let intersect = |q: usize, p: usize| {
        let (qf, pf) = (q as f64, p as f64);
        ((f[q] + qf * qf) - (f[p] + pf * pf)) / (2.0 * (qf - pf))
    };

    for q in 1..n {
        let mut s = intersect(q, v[k]);
        while s <= z[k] {
            // k > 0 here: z[0] is -inf
            k -= 1;
            s = intersect(q, v[k]);
        }
        k += 1;
        v[k] = q;
        z[k] = s;
        z[k + 1] = f64::INFINITY;
    }

    k = 0;
    for (q, dq) in d.iter_mut().enumerate().take(n) {
        while z[k + 1] < q as f64 {
            k += 1;
        }
        let diff = q as f64 - v[k] as f64;
        *dq = diff * diff + f[v[k]];
    }
}

/// Euclidean distance from each foreground pixel to the nearest
/// background pixel of a 1-bit mask.
pub fn distance_transform(mask: &Pix) -> RegionResult<FPix> {
    check_binary(mask)?;
    let (w, h) = mask.dimensions();
    let (wu, hu) = (w as usize, h as usize);
    let src = mask.data();

    if src.iter().all(|&v| v != 0) {
        log::warn!("distance transform: mask has no background pixel, field is zero");
        return Ok(FPix::new(w, h)?);
    }

    let mut grid: Vec<f64> = src
        .iter()
        .map(|&v| if v == 0 { 0.0 } else { FAR })
        .collect();

    let n = wu.max(hu);
    let mut f = vec![0.0f64; n];
    let mut d = vec![0.0f64; n];
    let mut v = vec![0usize; n];
    let mut z = vec![0.0f64; n + 1];

    // columns
    for x in 0..wu {
        for y in 0..hu {
            f[y] = grid[y * wu + x];
        }
        squared_edt_1d(&f[..hu], &mut d[..hu], &mut v, &mut z);
        for y in 0..hu {
            grid[y * wu + x] = d[y];
        }
    }

    // rows
    for y in 0..hu {
        let row = &mut grid[y * wu..(y + 1) * wu];
        f[..wu].copy_from_slice(row);
        squared_edt_1d(&f[..wu], &mut d[..wu], &mut v, &mut z);
        row.copy_from_slice(&d[..wu]);
    }

    let data = grid.iter().map(|&s| s.sqrt() as f32).collect();
    Ok(FPix::from_data(w, h, data)?)
}

/// Distance transform min-max normalized to `[0, 1]`.
pub fn distance_field(mask: &Pix) -> RegionResult<FPix> {
    let raw = distance_transform(mask)?;
    let (_, max) = raw.min_max();
    log::info!("distance field: max distance {:.2}", max);
    Ok(raw.normalize_min_max())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintbynum_core::PixelDepth;

    #[test]
    fn test_edt_1d() {
        let f = [FAR, 0.0, FAR, FAR, FAR, 0.0];
        let mut d = [0.0; 6];
        let mut v = [0usize; 6];
        let mut z = [0.0; 7];
        squared_edt_1d(&f, &mut d, &mut v, &mut z);
        assert_eq!(d, [1.0, 0.0, 1.0, 4.0, 1.0, 0.0]);
    }

    #[test]
    fn test_single_background_pixel() {
        let mask = Pix::from_fn(5, 5, PixelDepth::Bit1, |x, y| u32::from((x, y) != (0, 0))).unwrap();
        let dt = distance_transform(&mask).unwrap();
        assert_eq!(dt.get_pixel(0, 0).unwrap(), 0.0);
        assert!((dt.get_pixel(3, 4).unwrap() - 5.0).abs() < 1e-6);
        assert!((dt.get_pixel(1, 1).unwrap() - 2f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_border_is_not_background() {
        // a foreground column at the left edge measures distance to x = 3 only
        let mask = Pix::from_fn(4, 1, PixelDepth::Bit1, |x, _| u32::from(x < 3)).unwrap();
        let dt = distance_transform(&mask).unwrap();
        assert_eq!(dt.data(), &[3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_all_foreground_is_zero() {
        let mask = Pix::from_fn(4, 4, PixelDepth::Bit1, |_, _| 1).unwrap();
        let field = distance_field(&mask).unwrap();
        assert!(field.data().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_field_normalized() {
        let mask = Pix::from_fn(9, 9, PixelDepth::Bit1, |x, y| {
            u32::from((1..8).contains(&x) && (1..8).contains(&y))
        })
        .unwrap();
        let field = distance_field(&mask).unwrap();
        assert_eq!(field.get_pixel(4, 4).unwrap(), 1.0);
        assert_eq!(field.get_pixel(0, 0).unwrap(), 0.0);
        let (lo, hi) = field.min_max();
        assert_eq!((lo, hi), (0.0, 1.0));
    }
}
