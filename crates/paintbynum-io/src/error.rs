//! Errors from reading and writing PNG and JPEG files
//!
//! Codec errors are flattened into strings so callers handle a single
//! type regardless of which formats are enabled.

use thiserror::Error;

/// Error type for paintbynum-io
#[derive(Error, Debug)]
pub enum IoError {
    /// File missing, unreadable or unwritable
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Neither PNG nor JPEG, or the format's feature is disabled
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Header or pixel data that cannot form an image
    #[error("invalid image data: {0}")]
    InvalidData(String),

    #[error("decode error: {0}")]
    DecodeError(String),

    #[error("encode error: {0}")]
    EncodeError(String),

    #[error("core error: {0}")]
    Core(#[from] paintbynum_core::Error),
}

pub type IoResult<T> = Result<T, IoError>;
