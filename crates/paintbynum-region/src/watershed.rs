//! Marker-controlled watershed
//!
//! Markers (every positive label, including the background marker) grow
//! over the relief image in order of increasing color difference, using
//! 4-connectivity and 256 FIFO priority levels:
//!
//! 1. Every unlabeled pixel touching a marker is queued with priority equal
//!    to its smallest difference to a touching marker pixel.
//! 2. The lowest-priority pixel is taken. If its labeled neighbors all
//!    carry the same label it joins that region and queues its unlabeled
//!    neighbors with priority equal to their difference to it. If they
//!    disagree it becomes a boundary pixel (`BOUNDARY_LABEL`) and stops
//!    there.
//!
//! The difference between two pixels is the largest absolute per-channel
//! difference for RGB reliefs and the absolute difference for gray ones.
//! Pixels the flood never reaches, because every path to them is closed
//! by boundary pixels, are marked as boundary too, so no unassigned pixel
//! survives.

use crate::{RegionError, RegionResult};
use paintbynum_core::{BOUNDARY_LABEL, LabelMap, Pix, PixelDepth, UNASSIGNED_LABEL, color};
use std::collections::VecDeque;

/// Queued, not yet labeled
const IN_QUEUE: i32 = -2;

const NUM_LEVELS: usize = 256;

/// Counters from one watershed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WatershedStats {
    /// Pixels taken from the queue
    pub processed: usize,
    /// Pixels where fronts met
    pub boundary_pixels: usize,
    /// Pixels no front reached
    pub unreached_pixels: usize,
}

struct PriorityQueue {
    levels: Vec<VecDeque<usize>>,
    active: usize,
}

impl PriorityQueue {
    fn new() -> Self {
        Self {
            levels: vec![VecDeque::new(); NUM_LEVELS],
            active: NUM_LEVELS,
        }
    }

    fn push(&mut self, priority: u8, idx: usize) {
        let p = priority as usize;
        self.levels[p].push_back(idx);
        self.active = self.active.min(p);
    }

    fn pop(&mut self) -> Option<usize> {
        while self.active < NUM_LEVELS {
            if let Some(idx) = self.levels[self.active].pop_front() {
                return Some(idx);
            }
            self.active += 1;
        }
        None
    }
}

/// Grow the markers in `labels` over `relief`, in place.
///
/// `relief` is an 8-bit or 32-bit image of the same size as `labels`.
/// On return every pixel holds a region id, the background marker, or
/// `BOUNDARY_LABEL`.
pub fn watershed(relief: &Pix, labels: &mut LabelMap) -> RegionResult<WatershedStats> {
    labels.check_size(relief)?;
    let diff: fn(u32, u32) -> u8 = match relief.depth() {
        PixelDepth::Bit32 => color::max_channel_diff,
        PixelDepth::Bit8 => |a, b| (a as u8).abs_diff(b as u8),
        d => {
            return Err(RegionError::UnsupportedDepth {
                expected: "8 or 32 bpp",
                actual: d.bits(),
            });
        }
    };

    let (w, h) = labels.dimensions();
    let (w, h) = (w as usize, h as usize);
    let px = relief.data();
    let lab = labels.data_mut();

    let neighbors = |i: usize| {
        let (x, y) = (i % w, i / w);
        [
            (x > 0).then(|| i - 1),
            (x + 1 < w).then(|| i + 1),
            (y > 0).then(|| i - w),
            (y + 1 < h).then(|| i + w),
        ]
        .into_iter()
        .flatten()
    };

    let mut queue = PriorityQueue::new();
    for i in 0..lab.len() {
        if lab[i] != UNASSIGNED_LABEL {
            continue;
        }
        let best = neighbors(i)
            .filter(|&n| lab[n] > 0)
            .map(|n| diff(px[i], px[n]))
            .min();
        if let Some(p) = best {
            queue.push(p, i);
            lab[i] = IN_QUEUE;
        }
    }

    let mut stats = WatershedStats::default();
    while let Some(i) = queue.pop() {
        stats.processed += 1;

        let mut label = UNASSIGNED_LABEL;
        for n in neighbors(i) {
            let t = lab[n];
            if t > 0 {
                if label == UNASSIGNED_LABEL {
                    label = t;
                } else if t != label {
                    label = BOUNDARY_LABEL;
                }
            }
        }
        if label == UNASSIGNED_LABEL {
            label = BOUNDARY_LABEL;
        }
        lab[i] = label;
        if label == BOUNDARY_LABEL {
            stats.boundary_pixels += 1;
            continue;
        }

        for n in neighbors(i) {
            if lab[n] == UNASSIGNED_LABEL {
                queue.push(diff(px[n], px[i]), n);
                lab[n] = IN_QUEUE;
            }
        }
    }

    for l in lab.iter_mut() {
        if *l == UNASSIGNED_LABEL {
            *l = BOUNDARY_LABEL;
            stats.unreached_pixels += 1;
        }
    }

    log::debug!(
        "watershed: {} pixels processed, {} boundary, {} unreached",
        stats.processed,
        stats.boundary_pixels,
        stats.unreached_pixels
    );
    Ok(stats)
}
