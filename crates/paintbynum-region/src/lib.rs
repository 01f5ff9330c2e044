//! paintbynum-region - Region analysis and segmentation
//!
//! This crate turns a binary foreground mask into a partition of the
//! image:
//!
//! - Euclidean distance field of the mask, normalized to `[0, 1]`
//! - Peak extraction (threshold + dilation) on the field
//! - Hole filling and connected-component labeling
//! - Seed labeling with a reserved background marker
//! - Marker-controlled watershed over a color or gray relief image

pub mod conncomp;
pub mod distance;
mod error;
pub mod peaks;
pub mod seedfill;
pub mod seeds;
pub mod watershed;

pub use conncomp::{ConnectedComponent, ConnectivityType, find_connected_components};
pub use distance::{distance_field, distance_transform};
pub use error::{RegionError, RegionResult};
pub use peaks::{extract_peaks, threshold_peaks};
pub use seedfill::fill_holes;
pub use seeds::{
    BACKGROUND_ANCHOR, BACKGROUND_RADIUS, Seed, SeedSet, label_seeds, stamp_background,
};
pub use watershed::{WatershedStats, watershed};

use paintbynum_core::{Pix, PixelDepth};

pub(crate) fn check_binary(pix: &Pix) -> RegionResult<()> {
    if pix.depth() != PixelDepth::Bit1 {
        return Err(RegionError::UnsupportedDepth {
            expected: "1-bit",
            actual: pix.depth().bits(),
        });
    }
    Ok(())
}
