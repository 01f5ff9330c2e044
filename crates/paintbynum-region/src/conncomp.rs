//! Connected component analysis
//!
//! Components are discovered in raster order: scanning rows top to
//! bottom and columns left to right, the first unvisited foreground pixel
//! starts a new component, which is then grown breadth-first. Component
//! labels are therefore assigned in order of each component's topmost,
//! then leftmost, pixel.

use crate::{RegionResult, check_binary};
use paintbynum_core::Pix;
use std::collections::VecDeque;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// 4-way connectivity (up, down, left, right)
    #[default]
    FourWay,
    /// 8-way connectivity (includes diagonals)
    EightWay,
}

impl ConnectivityType {
    const FOUR: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
    const EIGHT: [(i32, i32); 8] = [
        (-1, 0),
        (1, 0),
        (0, -1),
        (0, 1),
        (-1, -1),
        (1, -1),
        (-1, 1),
        (1, 1),
    ];

    /// Neighbor offsets for this connectivity.
    pub fn offsets(self) -> &'static [(i32, i32)] {
        match self {
            Self::FourWay => &Self::FOUR,
            Self::EightWay => &Self::EIGHT,
        }
    }

    /// In-bounds neighbors of `(x, y)` in a `width x height` grid.
    pub fn neighbors(
        self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> impl Iterator<Item = (u32, u32)> {
        self.offsets().iter().filter_map(move |&(dx, dy)| {
            let nx = x as i64 + dx as i64;
            let ny = y as i64 + dy as i64;
            (nx >= 0 && ny >= 0 && nx < width as i64 && ny < height as i64)
                .then_some((nx as u32, ny as u32))
        })
    }
}

/// A connected component in a binary image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Label, starting at 1 in discovery order
    pub label: u32,
    /// Member pixels in visit order; the first is the discovery pixel
    pub pixels: Vec<(u32, u32)>,
}

impl ConnectedComponent {
    /// Number of pixels in this component
    pub fn pixel_count(&self) -> usize {
        self.pixels.len()
    }

    /// Inclusive bounding box `(xmin, ymin, xmax, ymax)`
    pub fn bounds(&self) -> (u32, u32, u32, u32) {
        self.pixels.iter().fold(
            (u32::MAX, u32::MAX, 0, 0),
            |(x0, y0, x1, y1), &(x, y)| (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        )
    }
}

/// Find all connected components of the foreground of a 1-bit image.
pub fn find_connected_components(
    pix: &Pix,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    check_binary(pix)?;
    let (w, h) = pix.dimensions();
    let data = pix.data();
    let idx = |x: u32, y: u32| (y as usize) * (w as usize) + x as usize;

    let mut visited = vec![false; data.len()];
    let mut components = Vec::new();
    let mut queue = VecDeque::new();

    for y in 0..h {
        for x in 0..w {
            let i = idx(x, y);
            if data[i] == 0 || visited[i] {
                continue;
            }
            visited[i] = true;
            queue.push_back((x, y));
            let mut pixels = Vec::new();
            while let Some((cx, cy)) = queue.pop_front() {
                pixels.push((cx, cy));
                for (nx, ny) in connectivity.neighbors(cx, cy, w, h) {
                    let j = idx(nx, ny);
                    if data[j] != 0 && !visited[j] {
                        visited[j] = true;
                        queue.push_back((nx, ny));
                    }
                }
            }
            components.push(ConnectedComponent {
                label: components.len() as u32 + 1,
                pixels,
            });
        }
    }

    Ok(components)
}
