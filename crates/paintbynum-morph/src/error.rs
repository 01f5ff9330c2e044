//! Errors from binary morphology

use thiserror::Error;

/// Error type for paintbynum-morph
#[derive(Debug, Error)]
pub enum MorphError {
    #[error("core error: {0}")]
    Core(#[from] paintbynum_core::Error),

    /// Structuring element with no extent or no hits
    #[error("bad structuring element: {0}")]
    InvalidSel(String),

    #[error("morphology needs a {expected} image, got {actual} bpp")]
    UnsupportedDepth { expected: &'static str, actual: u32 },
}

pub type MorphResult<T> = Result<T, MorphError>;
