//! paintbynum-morph - Binary morphology
//!
//! Structuring elements and dilation of 1-bpp masks.

pub mod binary;
mod error;
pub mod sel;

pub use binary::{dilate, dilate_brick};
pub use error::{MorphError, MorphResult};
pub use sel::Sel;
