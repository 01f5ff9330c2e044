//! paintbynum-transform - Geometric transformations
//!
//! Currently provides bilinear scaling of 8-bit and 32-bit images.

mod error;
pub mod scale;

pub use error::{TransformError, TransformResult};
pub use scale::{scale, scaled_dimensions};
