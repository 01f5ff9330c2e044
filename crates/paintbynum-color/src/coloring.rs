//! Per-region color tables
//!
//! A [`ColorTable`] maps region ids to packed RGB colors. Only ids that
//! actually occur in a label map get an entry; the boundary, unassigned and
//! background sentinels never do.
//!
//! Two policies build a table:
//!
//! - [`mean_colors`]: the integer-truncated per-channel mean of the pixels
//!   carrying each id in a reference image
//! - [`random_colors`]: one uniformly random color per id, drawn from a
//!   caller-supplied generator in ascending id order

use crate::{ColorError, ColorResult};
use paintbynum_core::{LabelMap, Pix, PixelDepth, color};
use rand::Rng;
use std::collections::BTreeMap;

/// Mapping from region id to a 32-bit RGB color
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: BTreeMap<i32, u32>,
}

impl ColorTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the color of a region.
    pub fn insert(&mut self, id: i32, rgb: u32) {
        self.entries.insert(id, rgb);
    }

    /// Color of a region, if it has one.
    pub fn get(&self, id: i32) -> Option<u32> {
        self.entries.get(&id).copied()
    }

    /// Color of a region as an `(r, g, b)` triple.
    pub fn get_rgb(&self, id: i32) -> Option<(u8, u8, u8)> {
        self.get(id).map(color::extract_rgb)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(id, color)` in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, u32)> + '_ {
        self.entries.iter().map(|(&id, &c)| (id, c))
    }
}

/// Mean color of every region present in `labels`, sampled from `pix`.
///
/// # Errors
/// * `UnsupportedDepth` unless `pix` is 32 bpp
/// * `Core(DimensionMismatch)` if the sizes differ
pub fn mean_colors(pix: &Pix, labels: &LabelMap) -> ColorResult<ColorTable> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(ColorError::UnsupportedDepth {
            expected: "32 bpp",
            actual: pix.depth().bits(),
        });
    }
    labels.check_size(pix)?;

    let mut sums: BTreeMap<i32, ([u64; 3], u64)> = BTreeMap::new();
    for (&l, &p) in labels.data().iter().zip(pix.data()) {
        if !labels.is_region(l) {
            continue;
        }
        let (acc, n) = sums.entry(l).or_insert(([0; 3], 0));
        for (a, c) in acc.iter_mut().zip(color::channels(p)) {
            *a += c as u64;
        }
        *n += 1;
    }

    let mut table = ColorTable::new();
    for (id, (acc, n)) in sums {
        let [r, g, b] = acc.map(|s| (s / n) as u8);
        log::debug!("region {}: {} pixels, mean ({}, {}, {})", id, n, r, g, b);
        table.insert(id, color::compose_rgb(r, g, b));
    }
    log::info!("mean colors for {} regions", table.len());
    Ok(table)
}

/// A random color for every region present in `labels`.
///
/// Ids are visited in ascending order, so a seeded generator gives the
/// same table for the same label map.
pub fn random_colors<R: Rng>(labels: &LabelMap, rng: &mut R) -> ColorTable {
    let mut table = ColorTable::new();
    for id in labels.present_regions() {
        let rgb: [u8; 3] = rng.random();
        table.insert(id, color::compose_rgb(rgb[0], rgb[1], rgb[2]));
    }
    log::info!("random colors for {} regions", table.len());
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintbynum_core::{BACKGROUND_LABEL, BOUNDARY_LABEL};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample() -> (Pix, LabelMap) {
        // 4x1: two pixels of region 1, one boundary, one background
        let pix = Pix::from_fn(4, 1, PixelDepth::Bit32, |x, _| match x {
            0 => color::compose_rgb(10, 20, 30),
            1 => color::compose_rgb(11, 21, 32),
            2 => color::compose_rgb(255, 255, 255),
            _ => color::compose_rgb(100, 100, 100),
        })
        .unwrap();
        let labels =
            LabelMap::from_data(4, 1, 1, vec![1, 1, BOUNDARY_LABEL, BACKGROUND_LABEL]).unwrap();
        (pix, labels)
    }

    #[test]
    fn test_mean_colors_truncates() {
        let (pix, labels) = sample();
        let table = mean_colors(&pix, &labels).unwrap();
        assert_eq!(table.len(), 1);
        // (10+11)/2 = 10, (20+21)/2 = 20, (30+32)/2 = 31
        assert_eq!(table.get_rgb(1), Some((10, 20, 31)));
        assert_eq!(table.get(BOUNDARY_LABEL), None);
        assert_eq!(table.get(BACKGROUND_LABEL), None);
    }

    #[test]
    fn test_mean_colors_size_mismatch() {
        let (_, labels) = sample();
        let pix = Pix::new(3, 1, PixelDepth::Bit32).unwrap();
        assert!(matches!(
            mean_colors(&pix, &labels),
            Err(ColorError::Core(_))
        ));
    }

    #[test]
    fn test_mean_colors_skips_absent_ids() {
        let pix = Pix::new(2, 1, PixelDepth::Bit32).unwrap();
        let labels = LabelMap::from_data(2, 1, 3, vec![3, 3]).unwrap();
        let table = mean_colors(&pix, &labels).unwrap();
        assert_eq!(table.iter().map(|(id, _)| id).collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    fn test_random_colors_deterministic() {
        let labels = LabelMap::from_data(3, 1, 2, vec![2, 1, BOUNDARY_LABEL]).unwrap();
        let a = random_colors(&labels, &mut StdRng::seed_from_u64(7));
        let b = random_colors(&labels, &mut StdRng::seed_from_u64(7));
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert!(a.get(BOUNDARY_LABEL).is_none());
    }
}
