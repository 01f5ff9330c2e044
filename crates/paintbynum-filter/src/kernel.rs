//! Convolution kernels
//!
//! Defines the kernel structure used by the convolution and sharpening
//! operations.

use crate::{FilterError, FilterResult};

/// A 2D convolution kernel
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    /// Width of the kernel
    width: u32,
    /// Height of the kernel
    height: u32,
    /// X coordinate of the center
    cx: u32,
    /// Y coordinate of the center
    cy: u32,
    /// Kernel data (row-major order)
    data: Vec<f32>,
}

/// Gaussian standard deviation used for a blur kernel of width `size`.
///
/// `0.3 * ((size - 1) * 0.5 - 1) + 0.8`
pub fn gaussian_sigma(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

impl Kernel {
    /// Create a zero kernel with the given dimensions, centered.
    pub fn new(width: u32, height: u32) -> FilterResult<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "kernel dimensions must be nonzero: {}x{}",
                width, height
            )));
        }
        Ok(Self {
            width,
            height,
            cx: width / 2,
            cy: height / 2,
            data: vec![0.0; (width * height) as usize],
        })
    }

    /// Create a centered kernel from row-major values.
    pub fn from_slice(width: u32, height: u32, data: &[f32]) -> FilterResult<Self> {
        let mut kernel = Self::new(width, height)?;
        if data.len() != kernel.data.len() {
            return Err(FilterError::InvalidKernel(format!(
                "expected {} values, got {}",
                kernel.data.len(),
                data.len()
            )));
        }
        kernel.data.copy_from_slice(data);
        Ok(kernel)
    }

    /// Create a normalized horizontal Gaussian kernel of odd width `size`.
    ///
    /// The sigma comes from [`gaussian_sigma`]. Use [`Kernel::transposed`]
    /// for the vertical pass.
    pub fn gaussian_1d(size: u32) -> FilterResult<Self> {
        if size % 2 == 0 {
            return Err(FilterError::InvalidKernel(format!(
                "gaussian kernel width must be odd, got {}",
                size
            )));
        }
        let sigma = gaussian_sigma(size);
        let half = (size / 2) as i32;
        let values: Vec<f32> = (-half..=half)
            .map(|i| (-((i * i) as f32) / (2.0 * sigma * sigma)).exp())
            .collect();
        let mut kernel = Self::from_slice(size, 1, &values)?;
        kernel.normalize();
        Ok(kernel)
    }

    /// Create the 3x3 Laplacian kernel with neighbor weight `coeff` and
    /// center weight `-8 * coeff`.
    pub fn laplacian(coeff: f32) -> Self {
        let mut data = [coeff; 9];
        data[4] = -8.0 * coeff;
        Self {
            width: 3,
            height: 3,
            cx: 1,
            cy: 1,
            data: data.to_vec(),
        }
    }

    /// Get the kernel width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the kernel height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the center X coordinate.
    #[inline]
    pub fn center_x(&self) -> u32 {
        self.cx
    }

    /// Get the center Y coordinate.
    #[inline]
    pub fn center_y(&self) -> u32 {
        self.cy
    }

    /// Get the kernel data.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Get a value at (x, y).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x < self.width && y < self.height {
            Some(self.data[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Swap rows and columns.
    pub fn transposed(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for x in 0..self.width {
            for y in 0..self.height {
                data.push(self.data[(y * self.width + x) as usize]);
            }
        }
        Self {
            width: self.height,
            height: self.width,
            cx: self.cy,
            cy: self.cx,
            data,
        }
    }

    /// Normalize the kernel so that values sum to 1.
    ///
    /// A kernel summing to zero is left unchanged.
    pub fn normalize(&mut self) {
        let sum = self.sum();
        if sum.abs() > f32::EPSILON {
            self.data.iter_mut().for_each(|v| *v /= sum);
        }
    }

    /// Get the sum of all kernel values.
    pub fn sum(&self) -> f32 {
        self.data.iter().sum()
    }
}
