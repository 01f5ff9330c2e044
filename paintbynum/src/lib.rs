//! paintbynum - Paint-by-numbers rendering of photographs
//!
//! A photograph is scaled, smoothed and sharpened, split into foreground
//! and background, seeded from the peaks of its distance field and
//! partitioned by a marker-controlled watershed. Every region is then
//! filled with one color.
//!
//! The processing stages live in the member crates, re-exported here as
//! modules. This crate adds the canonical [`Pipeline`], its
//! [`PipelineConfig`], the [`Preview`] collaborator and the error
//! taxonomy.
//!
//! # Example
//!
//! ```
//! use paintbynum::{Pipeline, PipelineConfig, Pix, PixelDepth};
//!
//! let mut canvas = paintbynum::PixMut::new(32, 32, PixelDepth::Bit32).unwrap();
//! canvas.fill(0xffffffff);
//! let canvas: Pix = canvas.into();
//!
//! let pipeline = Pipeline::new(PipelineConfig::default().with_scale(1.0)).unwrap();
//! let painting = pipeline.run(&canvas).unwrap();
//! assert_eq!(painting.output.dimensions(), (32, 32));
//! ```

pub mod config;
pub mod error;
pub mod pipeline;
pub mod preview;

// Re-export core types (primary data structures used everywhere)
pub use paintbynum_core::*;

// Re-export stage crates as modules to avoid name conflicts
pub use paintbynum_color as color;
pub use paintbynum_filter as filter;
pub use paintbynum_io as io;
pub use paintbynum_morph as morph;
pub use paintbynum_region as region;
pub use paintbynum_transform as transform;

pub use config::{ColorPolicy, PipelineConfig, ThresholdModeConfig};
pub use error::{PaintError, PaintResult, Stage};
pub use pipeline::{Painting, Pipeline, load_image, save_image};
pub use preview::{DirectoryPreview, NoPreview, Preview};
