//! Errors from resampling

use thiserror::Error;

/// Error type for paintbynum-transform
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("core error: {0}")]
    Core(#[from] paintbynum_core::Error),

    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    /// The scaled image would have zero area
    #[error("scaled image would be {width}x{height}")]
    EmptyResult { width: u32, height: u32 },
}

pub type TransformResult<T> = Result<T, TransformError>;
