//! Errors from grayscale conversion, binarization and colorization

use thiserror::Error;

/// Error type for paintbynum-color
#[derive(Debug, Error)]
pub enum ColorError {
    #[error("core error: {0}")]
    Core(#[from] paintbynum_core::Error),

    /// The input raster has the wrong depth for this step
    #[error("expected a {expected} image, got {actual} bpp")]
    UnsupportedDepth { expected: &'static str, actual: u32 },
}

pub type ColorResult<T> = Result<T, ColorError>;
