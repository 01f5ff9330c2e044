//! paintbynum-filter - Image filters
//!
//! This crate provides the smoothing and sharpening stages:
//!
//! - Convolution kernels (`Kernel`) and replicate-border convolution
//! - Gaussian blur with a kernel-width-derived sigma
//! - Laplacian sharpening with an adjustable coefficient
//! - Mean-shift filtering (edge-preserving smoothing)

pub mod convolve;
pub mod edge;
mod error;
pub mod kernel;
pub mod meanshift;

pub use convolve::{convolve, convolve_fpix, convolve_sep, gaussian_blur, split_channels};
pub use edge::{laplacian_response, sharpen};
pub use error::{FilterError, FilterResult};
pub use kernel::{Kernel, gaussian_sigma};
pub use meanshift::{MeanShiftParams, mean_shift_filter, mean_shift_filter_with};
