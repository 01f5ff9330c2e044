//! paintbynum-test - Regression test support for paintbynum
//!
//! Provides `RegParams`, a small bookkeeping harness that numbers each
//! check in a regression test, records failures instead of panicking
//! on the first one, and reports them all in `cleanup()`.
//!
//! Two modes are selected through the `REGTEST_MODE` environment variable:
//!
//! - **Compare** (default): run the checks
//! - **Display**: also keep every image passed to `write_pix` under
//!   `tests/regout/` for visual inspection
//!
//! # Usage
//!
//! ```ignore
//! use paintbynum_test::RegParams;
//!
//! let mut rp = RegParams::new("watershed");
//! rp.compare_values(2.0, regions as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! The crate also builds the synthetic images the regression tests run on.

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use paintbynum_core::{Pix, PixelDepth, color};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // paintbynum-test is at crates/paintbynum-test
    format!("{}/../..", manifest_dir)
}

/// Get the path to a test data file
pub fn test_data_path(name: &str) -> String {
    format!("{}/tests/data/images/{}", workspace_root(), name)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}

/// An RGB image filled with a single color.
pub fn make_uniform_image(width: u32, height: u32, rgb: (u8, u8, u8)) -> TestResult<Pix> {
    let val = color::compose_rgb(rgb.0, rgb.1, rgb.2);
    Ok(Pix::from_fn(width, height, PixelDepth::Bit32, |_, _| val)?)
}

/// An RGB image of a filled disk on a flat background.
///
/// A pixel belongs to the disk when its center lies within `radius`
/// of `(cx, cy)`.
pub fn make_disk_image(
    width: u32,
    height: u32,
    center: (f32, f32),
    radius: f32,
    fg: (u8, u8, u8),
    bg: (u8, u8, u8),
) -> TestResult<Pix> {
    let fg = color::compose_rgb(fg.0, fg.1, fg.2);
    let bg = color::compose_rgb(bg.0, bg.1, bg.2);
    let r2 = radius * radius;
    Ok(Pix::from_fn(width, height, PixelDepth::Bit32, |x, y| {
        let dx = x as f32 - center.0;
        let dy = y as f32 - center.1;
        if dx * dx + dy * dy <= r2 { fg } else { bg }
    })?)
}

/// A black RGB image with two white, axis-aligned squares.
///
/// Each square is given as `(x0, y0, side)`.
pub fn make_two_blob_image(
    width: u32,
    height: u32,
    first: (u32, u32, u32),
    second: (u32, u32, u32),
) -> TestResult<Pix> {
    let white = color::compose_rgb(255, 255, 255);
    let black = color::compose_rgb(0, 0, 0);
    let inside = |(x0, y0, s): (u32, u32, u32), x: u32, y: u32| {
        x >= x0 && x < x0 + s && y >= y0 && y < y0 + s
    };
    Ok(Pix::from_fn(width, height, PixelDepth::Bit32, |x, y| {
        if inside(first, x, y) || inside(second, x, y) {
            white
        } else {
            black
        }
    })?)
}

/// A 1-bit mask set where `f` returns true.
pub fn make_mask<F>(width: u32, height: u32, mut f: F) -> TestResult<Pix>
where
    F: FnMut(u32, u32) -> bool,
{
    Ok(Pix::from_fn(width, height, PixelDepth::Bit1, |x, y| {
        u32::from(f(x, y))
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disk_fixture() {
        let pix = make_disk_image(20, 20, (10.0, 10.0), 5.0, (255, 255, 255), (0, 0, 0)).unwrap();
        assert_eq!(pix.get_rgb(10, 10), Some((255, 255, 255)));
        assert_eq!(pix.get_rgb(15, 10), Some((255, 255, 255)));
        assert_eq!(pix.get_rgb(16, 10), Some((0, 0, 0)));
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_two_blob_fixture() {
        let pix = make_two_blob_image(30, 10, (2, 2, 5), (20, 2, 5)).unwrap();
        assert_eq!(pix.get_rgb(2, 2), Some((255, 255, 255)));
        assert_eq!(pix.get_rgb(7, 2), Some((0, 0, 0)));
        assert_eq!(pix.get_rgb(24, 6), Some((255, 255, 255)));
    }

    #[test]
    fn test_mask_fixture() {
        let mask = make_mask(4, 4, |x, y| x == y).unwrap();
        assert_eq!(mask.depth(), PixelDepth::Bit1);
        assert_eq!(mask.count_nonzero(), 4);
    }
}
