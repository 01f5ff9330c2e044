//! Errors from smoothing, blurring and sharpening

use thiserror::Error;

/// Error type for paintbynum-filter
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("core error: {0}")]
    Core(#[from] paintbynum_core::Error),

    /// Kernel shape or data is unusable (even width, wrong length)
    #[error("bad kernel: {0}")]
    InvalidKernel(String),

    /// The filter cannot run on this depth
    #[error("filter needs a {expected} image, got {actual} bpp")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// A window size or coefficient is out of range
    #[error("invalid filter parameters: {0}")]
    InvalidParameters(String),
}

pub type FilterResult<T> = Result<T, FilterError>;
