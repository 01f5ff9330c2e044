//! Pipeline configuration
//!
//! [`PipelineConfig`] holds every tunable of a run. It deserializes from
//! JSON with missing fields taking their defaults, and
//! [`PipelineConfig::validate`] checks all ranges before any stage runs.
//!
//! # Examples
//!
//! ```
//! use paintbynum::{ColorPolicy, PipelineConfig};
//!
//! let config = PipelineConfig::default()
//!     .with_scale(0.5)
//!     .with_colors(ColorPolicy::Random)
//!     .with_seed(7);
//! assert!(config.validate().is_ok());
//! assert!(config.clone().with_blur_width(4).validate().is_err());
//! ```

use crate::error::{PaintError, PaintResult};
use paintbynum_color::ThresholdMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How the binarization threshold is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdModeConfig {
    /// Otsu's method; `binarize_threshold` is ignored
    #[default]
    Auto,
    /// Use `binarize_threshold`
    Fixed,
}

/// How regions are colored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPolicy {
    /// Mean color of the region in the smoothed image
    #[default]
    Mean,
    /// Random color per region from a seeded generator
    Random,
}

/// Parameters of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Resize factor, in (0, 1]
    pub scale: f32,
    /// Mean-shift spatial window radius
    pub spatial_window: u32,
    /// Mean-shift color window radius
    pub color_window: u32,
    /// Gaussian kernel width, odd
    pub blur_width: u32,
    /// Laplacian sharpening coefficient; 0 disables sharpening
    pub sharpen: f32,
    /// Gray threshold for [`ThresholdModeConfig::Fixed`]
    pub binarize_threshold: u32,
    pub threshold_mode: ThresholdModeConfig,
    /// Minimum normalized distance kept as a peak, in [0, 1)
    pub peak_threshold: f32,
    /// Side of the square used to merge peaks
    pub dilate_width: u32,
    pub colors: ColorPolicy,
    /// Seed for [`ColorPolicy::Random`]
    pub seed: u64,
    /// Offer every intermediate image to the preview collaborator
    pub display_intermediate: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            scale: 0.1,
            spatial_window: 21,
            color_window: 21,
            blur_width: 3,
            sharpen: 1.25,
            binarize_threshold: 0,
            threshold_mode: ThresholdModeConfig::Auto,
            peak_threshold: 0.005,
            dilate_width: 1,
            colors: ColorPolicy::Mean,
            seed: 0,
            display_intermediate: false,
        }
    }
}

fn invalid(name: &'static str, value: impl ToString, constraint: &'static str) -> PaintError {
    PaintError::Parameter {
        name,
        value: value.to_string(),
        constraint,
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing fields keep their defaults.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> PaintResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|e| PaintError::Config {
            path: path.to_path_buf(),
            detail: e.to_string(),
        })?;
        Self::from_json_str(&data).map_err(|e| match e {
            PaintError::Config { detail, .. } => PaintError::Config {
                path: path.to_path_buf(),
                detail,
            },
            other => other,
        })
    }

    /// Parse a configuration from a JSON string.
    pub fn from_json_str(data: &str) -> PaintResult<Self> {
        serde_json::from_str(data).map_err(|e| PaintError::Config {
            path: "<string>".into(),
            detail: e.to_string(),
        })
    }

    /// Check every parameter against its valid range.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::Parameter`] naming the first offending field.
    pub fn validate(&self) -> PaintResult<()> {
        if !(self.scale > 0.0 && self.scale <= 1.0) {
            return Err(invalid("scale", self.scale, "must be in (0, 1]"));
        }
        if self.spatial_window == 0 {
            return Err(invalid("spatial_window", 0, "must be > 0"));
        }
        if self.color_window == 0 {
            return Err(invalid("color_window", 0, "must be > 0"));
        }
        if self.blur_width % 2 == 0 {
            return Err(invalid(
                "blur_width",
                self.blur_width,
                "must be odd and >= 1",
            ));
        }
        if !self.sharpen.is_finite() {
            return Err(invalid("sharpen", self.sharpen, "must be finite"));
        }
        if self.threshold_mode == ThresholdModeConfig::Fixed && self.binarize_threshold > 255 {
            return Err(invalid(
                "binarize_threshold",
                self.binarize_threshold,
                "must be in [0, 255]",
            ));
        }
        if !(0.0..1.0).contains(&self.peak_threshold) {
            return Err(invalid(
                "peak_threshold",
                self.peak_threshold,
                "must be in [0, 1)",
            ));
        }
        if self.dilate_width == 0 {
            return Err(invalid("dilate_width", 0, "must be >= 1"));
        }
        Ok(())
    }

    /// The binarization mode this configuration selects.
    pub fn threshold(&self) -> ThresholdMode {
        match self.threshold_mode {
            ThresholdModeConfig::Auto => ThresholdMode::Auto,
            ThresholdModeConfig::Fixed => {
                ThresholdMode::Fixed(self.binarize_threshold.min(255) as u8)
            }
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_spatial_window(mut self, window: u32) -> Self {
        self.spatial_window = window;
        self
    }

    pub fn with_color_window(mut self, window: u32) -> Self {
        self.color_window = window;
        self
    }

    pub fn with_blur_width(mut self, width: u32) -> Self {
        self.blur_width = width;
        self
    }

    pub fn with_sharpen(mut self, coeff: f32) -> Self {
        self.sharpen = coeff;
        self
    }

    /// Use a fixed binarization threshold instead of Otsu.
    pub fn with_fixed_threshold(mut self, threshold: u32) -> Self {
        self.binarize_threshold = threshold;
        self.threshold_mode = ThresholdModeConfig::Fixed;
        self
    }

    pub fn with_threshold_mode(mut self, mode: ThresholdModeConfig) -> Self {
        self.threshold_mode = mode;
        self
    }

    pub fn with_peak_threshold(mut self, threshold: f32) -> Self {
        self.peak_threshold = threshold;
        self
    }

    pub fn with_dilate_width(mut self, width: u32) -> Self {
        self.dilate_width = width;
        self
    }

    pub fn with_colors(mut self, policy: ColorPolicy) -> Self {
        self.colors = policy;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_display_intermediate(mut self, display: bool) -> Self {
        self.display_intermediate = display;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param_name(config: &PipelineConfig) -> Option<&'static str> {
        match config.validate() {
            Err(PaintError::Parameter { name, .. }) => Some(name),
            _ => None,
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = PipelineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.threshold(), ThresholdMode::Auto);
    }

    #[test]
    fn test_out_of_range_parameters() {
        let base = PipelineConfig::default();
        assert_eq!(param_name(&base.clone().with_scale(0.0)), Some("scale"));
        assert_eq!(param_name(&base.clone().with_scale(1.5)), Some("scale"));
        assert_eq!(param_name(&base.clone().with_scale(f32::NAN)), Some("scale"));
        assert_eq!(
            param_name(&base.clone().with_spatial_window(0)),
            Some("spatial_window")
        );
        assert_eq!(
            param_name(&base.clone().with_color_window(0)),
            Some("color_window")
        );
        assert_eq!(param_name(&base.clone().with_blur_width(0)), Some("blur_width"));
        assert_eq!(param_name(&base.clone().with_blur_width(4)), Some("blur_width"));
        assert_eq!(
            param_name(&base.clone().with_peak_threshold(1.0)),
            Some("peak_threshold")
        );
        assert_eq!(
            param_name(&base.clone().with_peak_threshold(-0.1)),
            Some("peak_threshold")
        );
        assert_eq!(
            param_name(&base.clone().with_dilate_width(0)),
            Some("dilate_width")
        );
        assert_eq!(
            param_name(&base.clone().with_fixed_threshold(300)),
            Some("binarize_threshold")
        );
        assert_eq!(param_name(&base.with_sharpen(-2.0)), None);
    }

    #[test]
    fn test_fixed_threshold_mode() {
        let config = PipelineConfig::default().with_fixed_threshold(90);
        assert_eq!(config.threshold(), ThresholdMode::Fixed(90));

        // the value is inert in auto mode
        let config = PipelineConfig {
            binarize_threshold: 90,
            ..PipelineConfig::default()
        };
        assert_eq!(config.threshold(), ThresholdMode::Auto);
    }

    #[test]
    fn test_json_partial() {
        let config = PipelineConfig::from_json_str(
            r#"{ "scale": 0.5, "threshold_mode": "fixed", "binarize_threshold": 40, "colors": "random" }"#,
        )
        .unwrap();
        assert_eq!(config.scale, 0.5);
        assert_eq!(config.threshold(), ThresholdMode::Fixed(40));
        assert_eq!(config.colors, ColorPolicy::Random);
        assert_eq!(config.spatial_window, 21);
        assert_eq!(config.peak_threshold, 0.005);

        assert!(matches!(
            PipelineConfig::from_json_str("{ \"scale\": \"big\" }"),
            Err(PaintError::Config { .. })
        ));
    }

    #[test]
    fn test_json_file_missing() {
        let err = PipelineConfig::from_json_file("/nonexistent/paintbynum.json").unwrap_err();
        match err {
            PaintError::Config { path, .. } => {
                assert_eq!(path, Path::new("/nonexistent/paintbynum.json"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
