//! LabelMap - Signed integer label grid
//!
//! A `LabelMap` carries region membership through the back half of the
//! pipeline. Seed labeling writes the initial markers, region growth
//! rewrites it in place, and colorization/compositing read it.
//!
//! # Label values
//!
//! | Value | Meaning |
//! |---|---|
//! | [`UNASSIGNED_LABEL`] (`0`) | not yet claimed (only before growth) |
//! | `1..=num_regions` | region id, dense, in seed discovery order |
//! | [`BOUNDARY_LABEL`] (`-1`) | claimed by two or more fronts at once |
//! | [`BACKGROUND_LABEL`] | the reserved "definite background" seed |

use crate::error::{Error, Result};
use crate::pix::{Pix, PixMut, PixelDepth};

/// Pixel not yet claimed by any seed
pub const UNASSIGNED_LABEL: i32 = 0;

/// Pixel where two or more growth fronts collided
pub const BOUNDARY_LABEL: i32 = -1;

/// Reserved id of the background seed; never collides with a region id
pub const BACKGROUND_LABEL: i32 = i32::MAX;

/// Signed label grid with the same dimensions as the working raster
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    /// Number of region ids in use (`1..=num_regions`)
    num_regions: u32,
    data: Vec<i32>,
}

impl LabelMap {
    /// Create a label map with every pixel [`UNASSIGNED_LABEL`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        Ok(LabelMap {
            width,
            height,
            num_regions: 0,
            data: vec![UNASSIGNED_LABEL; (width as usize) * (height as usize)],
        })
    }

    /// Create a label map from raw row-major data.
    pub fn from_data(width: u32, height: u32, num_regions: u32, data: Vec<i32>) -> Result<Self> {
        let mut map = Self::new(width, height)?;
        if data.len() != map.data.len() {
            return Err(Error::InvalidParameter(format!(
                "label data length {} doesn't match {}x{}",
                data.len(),
                width,
                height
            )));
        }
        map.data = data;
        map.num_regions = num_regions;
        Ok(map)
    }

    /// Get the width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of region ids in use.
    #[inline]
    pub fn num_regions(&self) -> u32 {
        self.num_regions
    }

    /// Record the number of region ids in use.
    pub fn set_num_regions(&mut self, n: u32) {
        self.num_regions = n;
    }

    /// Whether `label` is a region id (`1..=num_regions`).
    #[inline]
    pub fn is_region(&self, label: i32) -> bool {
        label >= 1 && (label as i64) <= self.num_regions as i64
    }

    /// Get the label at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<i32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.data[self.index(x, y)])
    }

    /// Set the label at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if (x, y) is outside the map.
    pub fn set(&mut self, x: u32, y: u32, label: i32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        let idx = self.index(x, y);
        self.data[idx] = label;
        Ok(())
    }

    /// Raw row-major labels
    #[inline]
    pub fn data(&self) -> &[i32] {
        &self.data
    }

    /// Raw row-major labels, mutable
    #[inline]
    pub fn data_mut(&mut self) -> &mut [i32] {
        &mut self.data
    }

    /// Count pixels carrying `label`.
    pub fn count(&self, label: i32) -> usize {
        self.data.iter().filter(|&&l| l == label).count()
    }

    /// Region ids that occur in the map, ascending.
    pub fn present_regions(&self) -> Vec<i32> {
        let mut seen = vec![false; self.num_regions as usize + 1];
        for &l in &self.data {
            if self.is_region(l) {
                seen[l as usize] = true;
            }
        }
        seen.iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(id, _)| id as i32)
            .collect()
    }

    /// Whether any pixel is still [`UNASSIGNED_LABEL`].
    pub fn has_unassigned(&self) -> bool {
        self.data.contains(&UNASSIGNED_LABEL)
    }

    /// Check that a raster has the same dimensions as this map.
    pub fn check_size(&self, pix: &Pix) -> Result<()> {
        if pix.dimensions() != self.dimensions() {
            return Err(Error::DimensionMismatch {
                expected: self.dimensions(),
                actual: pix.dimensions(),
            });
        }
        Ok(())
    }

    /// Render markers as 8-bit gray `scale * label`, saturated to `[0, 255]`.
    ///
    /// Boundary pixels render as 0 and the background seed as 255.
    pub fn to_marker_pix(&self, scale: u32) -> Result<Pix> {
        self.render_8(|l| (l as i64 * scale as i64).clamp(0, 255) as u32)
    }

    /// Render the grown map as an inverted 8-bit image: boundaries white,
    /// background seed black, regions dark-to-light by decreasing id.
    pub fn to_boundary_pix(&self) -> Result<Pix> {
        self.render_8(|l| 255 - (l as i64).clamp(0, 255) as u32)
    }

    fn render_8<F: Fn(i32) -> u32>(&self, f: F) -> Result<Pix> {
        let mut out = PixMut::new(self.width, self.height, PixelDepth::Bit8)?;
        for (dst, &l) in out.data_mut().iter_mut().zip(self.data.iter()) {
            *dst = f(l);
        }
        Ok(out.into())
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_unassigned() {
        let map = LabelMap::new(4, 3).unwrap();
        assert!(map.has_unassigned());
        assert_eq!(map.count(UNASSIGNED_LABEL), 12);
        assert!(LabelMap::new(0, 3).is_err());
    }

    #[test]
    fn test_is_region() {
        let mut map = LabelMap::new(2, 2).unwrap();
        map.set_num_regions(3);
        assert!(map.is_region(1));
        assert!(map.is_region(3));
        assert!(!map.is_region(4));
        assert!(!map.is_region(BOUNDARY_LABEL));
        assert!(!map.is_region(UNASSIGNED_LABEL));
        assert!(!map.is_region(BACKGROUND_LABEL));
    }

    #[test]
    fn test_present_regions() {
        let map = LabelMap::from_data(3, 2, 4, vec![1, 1, -1, 4, BACKGROUND_LABEL, 1]).unwrap();
        assert_eq!(map.present_regions(), vec![1, 4]);
    }

    #[test]
    fn test_marker_rendering() {
        let map = LabelMap::from_data(3, 1, 30, vec![2, 30, BACKGROUND_LABEL]).unwrap();
        let pix = map.to_marker_pix(10).unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(20));
        assert_eq!(pix.get_pixel(1, 0), Some(255));
        assert_eq!(pix.get_pixel(2, 0), Some(255));

        let map = LabelMap::from_data(3, 1, 1, vec![BOUNDARY_LABEL, 1, BACKGROUND_LABEL]).unwrap();
        let pix = map.to_boundary_pix().unwrap();
        assert_eq!(pix.get_pixel(0, 0), Some(255));
        assert_eq!(pix.get_pixel(1, 0), Some(254));
        assert_eq!(pix.get_pixel(2, 0), Some(0));
    }
}
