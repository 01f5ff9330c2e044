//! Structuring Element (SEL) for morphological operations
//!
//! A structuring element defines the neighborhood used in morphological
//! operations. Only hit positions are represented; the origin `(cx, cy)`
//! is the reference point placed on each pixel.

use crate::{MorphError, MorphResult};

/// Structuring Element (SEL)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sel {
    width: u32,
    height: u32,
    cx: u32,
    cy: u32,
    hits: Vec<bool>,
}

impl Sel {
    /// Create a structuring element with no hits, origin at the center.
    pub fn new(width: u32, height: u32) -> MorphResult<Self> {
        if width == 0 || height == 0 {
            return Err(MorphError::InvalidSel(format!(
                "dimensions must be nonzero: {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            hits: vec![false; (width * height) as usize],
        })
    }

    /// Create a rectangular "brick" structuring element with all hits
    pub fn create_brick(width: u32, height: u32) -> MorphResult<Self> {
        let mut sel = Self::new(width, height)?;
        sel.hits.fill(true);
        Ok(sel)
    }

    /// Create a square structuring element with all hits
    pub fn create_square(size: u32) -> MorphResult<Self> {
        Self::create_brick(size, size)
    }

    /// Create a filled disk of the given radius (side `2 * radius + 1`)
    pub fn create_disk(radius: u32) -> MorphResult<Self> {
        let side = 2 * radius + 1;
        let mut sel = Self::new(side, side)?;
        let r = radius as i32;
        for y in 0..side {
            for x in 0..side {
                let dx = x as i32 - r;
                let dy = y as i32 - r;
                sel.hits[(y * side + x) as usize] = dx * dx + dy * dy <= r * r;
            }
        }
        Ok(sel)
    }

    /// Get the width
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the origin x coordinate
    #[inline]
    pub fn origin_x(&self) -> u32 {
        self.cx
    }

    /// Get the origin y coordinate
    #[inline]
    pub fn origin_y(&self) -> u32 {
        self.cy
    }

    /// Set the origin
    pub fn set_origin(&mut self, cx: u32, cy: u32) -> MorphResult<()> {
        if cx >= self.width || cy >= self.height {
            return Err(MorphError::InvalidSel(format!(
                "origin ({}, {}) outside {}x{}",
                cx, cy, self.width, self.height
            )));
        }
        self.cx = cx;
        self.cy = cy;
        Ok(())
    }

    /// Whether (x, y) is a hit
    pub fn is_hit(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.hits[(y * self.width + x) as usize]
    }

    /// Number of hits
    pub fn hit_count(&self) -> usize {
        self.hits.iter().filter(|&&h| h).count()
    }

    /// Offsets of every hit relative to the origin, as `(dx, dy)`.
    pub fn hit_offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        let (w, cx, cy) = (self.width, self.cx as i32, self.cy as i32);
        self.hits
            .iter()
            .enumerate()
            .filter(|&(_, &h)| h)
            .map(move |(i, _)| {
                let x = (i as u32 % w) as i32;
                let y = (i as u32 / w) as i32;
                (x - cx, y - cy)
            })
    }
}
