//! paintbynum-color - Color processing
//!
//! This crate provides:
//!
//! - Luminance grayscale conversion
//! - Binarization with an automatic (Otsu) or fixed threshold
//! - Per-region color tables: mean color or seeded random color
//! - Rendering a label map through a color table

pub mod coloring;
pub mod colorspace;
pub mod composite;
mod error;
pub mod threshold;

pub use coloring::{ColorTable, mean_colors, random_colors};
pub use colorspace::{convert_to_gray, rgb_to_gray};
pub use composite::{DEFAULT_FILL, render_labels};
pub use error::{ColorError, ColorResult};
pub use threshold::{
    ThresholdMode, binarize, compute_otsu_threshold, gray_histogram, threshold_to_binary,
};
