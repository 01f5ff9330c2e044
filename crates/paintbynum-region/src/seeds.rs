//! Seed labeling
//!
//! Turns the dilated peak mask into the marker map the watershed grows
//! from. Each external 8-connected component of the mask (with its holes
//! filled) becomes one seed, numbered `1..=N` in raster discovery order and
//! painted into a fresh [`LabelMap`]. A small disk of
//! [`BACKGROUND_LABEL`] is then stamped near the origin so that the flood
//! has a known outside region to grow from.

use crate::conncomp::{ConnectivityType, find_connected_components};
use crate::seedfill::fill_holes;
use crate::{RegionResult, check_binary};
use paintbynum_core::{BACKGROUND_LABEL, LabelMap, Pix};
use paintbynum_morph::Sel;

/// Preferred center of the background marker
pub const BACKGROUND_ANCHOR: (u32, u32) = (5, 5);

/// Radius of the background marker disk
pub const BACKGROUND_RADIUS: u32 = 3;

/// One seed region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// Region id, starting at 1
    pub id: i32,
    /// Pixels of the filled component
    pub pixels: Vec<(u32, u32)>,
}

/// Seeds in id order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSet {
    seeds: Vec<Seed>,
}

impl SeedSet {
    /// Number of seeds
    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    /// Whether there are no seeds
    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }

    /// Seed with the given id
    pub fn get(&self, id: i32) -> Option<&Seed> {
        usize::try_from(id - 1).ok().and_then(|i| self.seeds.get(i))
    }

    /// Iterate over seeds in id order
    pub fn iter(&self) -> std::slice::Iter<'_, Seed> {
        self.seeds.iter()
    }
}

impl<'a> IntoIterator for &'a SeedSet {
    type Item = &'a Seed;
    type IntoIter = std::slice::Iter<'a, Seed>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Label the components of a 1-bit peak mask as seeds.
///
/// Returns the marker map (seed ids, background disk, 0 elsewhere) and
/// the seed descriptors. A mask without components gives a map holding
/// only the background marker.
pub fn label_seeds(peaks: &Pix) -> RegionResult<(LabelMap, SeedSet)> {
    check_binary(peaks)?;
    let (w, h) = peaks.dimensions();

    // background flooding uses the dual of 8-connectivity
    let filled = fill_holes(peaks, ConnectivityType::FourWay)?;
    let components = find_connected_components(&filled, ConnectivityType::EightWay)?;

    let mut markers = LabelMap::new(w, h)?;
    let mut seeds = Vec::with_capacity(components.len());
    for cc in components {
        let id = cc.label as i32;
        for &(x, y) in &cc.pixels {
            markers.set(x, y, id)?;
        }
        seeds.push(Seed {
            id,
            pixels: cc.pixels,
        });
    }
    markers.set_num_regions(seeds.len() as u32);

    if seeds.is_empty() {
        log::warn!("seed labeling: no peak components, only the background marker is set");
    } else {
        log::info!("seed labeling: {} seeds", seeds.len());
    }

    stamp_background(&mut markers)?;
    Ok((markers, SeedSet { seeds }))
}

/// Stamp the background marker disk into `markers`.
///
/// The disk is centered at [`BACKGROUND_ANCHOR`], moved inside the image
/// when the image is smaller, and clipped at the border. It overwrites
/// whatever it covers.
pub fn stamp_background(markers: &mut LabelMap) -> RegionResult<()> {
    let (w, h) = markers.dimensions();
    let cx = BACKGROUND_ANCHOR.0.min(w - 1) as i64;
    let cy = BACKGROUND_ANCHOR.1.min(h - 1) as i64;
    let disk = Sel::create_disk(BACKGROUND_RADIUS)?;
    for (dx, dy) in disk.hit_offsets() {
        let x = cx + dx as i64;
        let y = cy + dy as i64;
        if x >= 0 && y >= 0 && x < w as i64 && y < h as i64 {
            markers.set(x as u32, y as u32, BACKGROUND_LABEL)?;
        }
    }
    Ok(())
}
