//! Errors from distance fields, seed labeling and the watershed

use thiserror::Error;

/// Error type for paintbynum-region
#[derive(Debug, Error)]
pub enum RegionError {
    #[error("core error: {0}")]
    Core(#[from] paintbynum_core::Error),

    /// Peak dilation failed
    #[error("dilation failed: {0}")]
    Morph(#[from] paintbynum_morph::MorphError),

    /// Masks must be 1 bpp, reliefs 8 or 32 bpp
    #[error("expected a {expected} image, got {actual} bpp")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    #[error("invalid region parameters: {0}")]
    InvalidParameters(String),
}

pub type RegionResult<T> = Result<T, RegionError>;
