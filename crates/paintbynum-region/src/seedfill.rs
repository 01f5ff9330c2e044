//! Hole filling
//!
//! A hole is a background region that cannot reach the image border.
//! Background is flooded from every border background pixel through the
//! mask's background; whatever stays unreached is set to foreground.

use crate::conncomp::ConnectivityType;
use crate::{RegionResult, check_binary};
use paintbynum_core::{Pix, PixMut, PixelDepth};
use std::collections::VecDeque;

/// Fill holes in a binary image
///
/// `connectivity` is the adjacency used when flooding the background.
/// For 8-connected foreground components, use `FourWay`.
pub fn fill_holes(pix: &Pix, connectivity: ConnectivityType) -> RegionResult<Pix> {
    check_binary(pix)?;

    let (width, height) = pix.dimensions();
    let src = pix.data();
    let idx = |x: u32, y: u32| (y as usize) * (width as usize) + x as usize;

    // background pixels connected to the border
    let mut outside = vec![false; src.len()];
    let mut queue = VecDeque::new();
    let border = (0..width)
        .flat_map(|x| [(x, 0), (x, height - 1)])
        .chain((0..height).flat_map(|y| [(0, y), (width - 1, y)]));
    for (x, y) in border {
        let i = idx(x, y);
        if src[i] == 0 && !outside[i] {
            outside[i] = true;
            queue.push_back((x, y));
        }
    }

    while let Some((x, y)) = queue.pop_front() {
        for (nx, ny) in connectivity.neighbors(x, y, width, height) {
            let j = idx(nx, ny);
            if src[j] == 0 && !outside[j] {
                outside[j] = true;
                queue.push_back((nx, ny));
            }
        }
    }

    let mut result = PixMut::new(width, height, PixelDepth::Bit1)?;
    for (dst, &bg) in result.data_mut().iter_mut().zip(outside.iter()) {
        *dst = u32::from(!bg);
    }
    let filled = result.data().iter().zip(src).filter(|&(&r, &s)| r != s).count();
    if filled > 0 {
        log::debug!("fill_holes: filled {} hole pixels", filled);
    }

    Ok(result.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(size: u32) -> Pix {
        Pix::from_fn(size, size, PixelDepth::Bit1, |x, y| {
            let edge = x == 1 || y == 1 || x == size - 2 || y == size - 2;
            let inside = x >= 1 && y >= 1 && x <= size - 2 && y <= size - 2;
            u32::from(edge && inside)
        })
        .unwrap()
    }

    #[test]
    fn test_fill_ring() {
        let pix = ring(7);
        let filled = fill_holes(&pix, ConnectivityType::FourWay).unwrap();
        // 5x5 block from (1,1) to (5,5)
        assert_eq!(filled.count_nonzero(), 25);
        assert_eq!(filled.get_pixel(3, 3), Some(1));
        assert_eq!(filled.get_pixel(0, 0), Some(0));
    }

    #[test]
    fn test_diagonal_gap_leaks_only_with_eight_way() {
        // ring with its corner removed: background touches the interior
        // only diagonally
        let mut pix = ring(7).to_mut();
        pix.set_pixel(1, 1, 0).unwrap();
        let pix: Pix = pix.into();
        let four = fill_holes(&pix, ConnectivityType::FourWay).unwrap();
        assert_eq!(four.get_pixel(3, 3), Some(1));
        let eight = fill_holes(&pix, ConnectivityType::EightWay).unwrap();
        assert_eq!(eight.get_pixel(3, 3), Some(0));
    }

    #[test]
    fn test_no_holes_unchanged() {
        let pix = Pix::from_fn(5, 5, PixelDepth::Bit1, |x, _| u32::from(x < 2)).unwrap();
        let filled = fill_holes(&pix, ConnectivityType::FourWay).unwrap();
        assert_eq!(filled.data(), pix.data());
    }

    #[test]
    fn test_all_foreground() {
        let pix = Pix::from_fn(3, 3, PixelDepth::Bit1, |_, _| 1).unwrap();
        let filled = fill_holes(&pix, ConnectivityType::FourWay).unwrap();
        assert_eq!(filled.count_nonzero(), 9);
    }
}
