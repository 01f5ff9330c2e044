//! Pipeline error types
//!
//! Every failure names either the offending parameter or the [`Stage`]
//! that produced it. Input, parameter and degenerate-geometry failures
//! have their own variants so callers can tell them apart.

use paintbynum_io::IoError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Pipeline stage, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Load,
    Scale,
    Smooth,
    Blur,
    Sharpen,
    Binarize,
    DistanceField,
    Peaks,
    Seeds,
    Watershed,
    Colorize,
    Composite,
    Write,
}

impl Stage {
    /// Short lowercase name used in messages
    pub fn name(self) -> &'static str {
        match self {
            Stage::Load => "load",
            Stage::Scale => "scale",
            Stage::Smooth => "mean-shift",
            Stage::Blur => "blur",
            Stage::Sharpen => "sharpen",
            Stage::Binarize => "binarize",
            Stage::DistanceField => "distance-field",
            Stage::Peaks => "peaks",
            Stage::Seeds => "seeds",
            Stage::Watershed => "watershed",
            Stage::Colorize => "colorize",
            Stage::Composite => "composite",
            Stage::Write => "write",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error type for pipeline runs
#[derive(Error, Debug)]
pub enum PaintError {
    /// The source image is missing or cannot be decoded
    #[error("cannot read input image {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    /// A configuration value is outside its valid range
    #[error("invalid parameter {name} = {value}: {constraint}")]
    Parameter {
        name: &'static str,
        value: String,
        constraint: &'static str,
    },

    /// A stage produced a zero-area or empty buffer
    #[error("{stage} produced a degenerate result: {detail}")]
    DegenerateGeometry { stage: Stage, detail: String },

    /// Any other failure inside a stage
    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The configuration file cannot be read or parsed
    #[error("cannot load config {}: {detail}", path.display())]
    Config { path: PathBuf, detail: String },

    /// An output or preview image cannot be written
    #[error("cannot write image {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: IoError,
    },
}

impl PaintError {
    /// Wrap a library error as a failure of `stage`.
    pub fn at<E>(stage: Stage) -> impl FnOnce(E) -> PaintError
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        move |e| PaintError::Stage {
            stage,
            source: Box::new(e),
        }
    }

    /// The stage this error belongs to, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PaintError::Input { .. } => Some(Stage::Load),
            PaintError::DegenerateGeometry { stage, .. } | PaintError::Stage { stage, .. } => {
                Some(*stage)
            }
            PaintError::Output { .. } => Some(Stage::Write),
            PaintError::Parameter { .. } | PaintError::Config { .. } => None,
        }
    }
}

/// Result type for pipeline operations
pub type PaintResult<T> = Result<T, PaintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_stage() {
        let e = PaintError::DegenerateGeometry {
            stage: Stage::Binarize,
            detail: "empty foreground mask".to_string(),
        };
        assert_eq!(
            e.to_string(),
            "binarize produced a degenerate result: empty foreground mask"
        );
        assert_eq!(e.stage(), Some(Stage::Binarize));

        let e = PaintError::Parameter {
            name: "blur_width",
            value: "4".to_string(),
            constraint: "must be odd and >= 1",
        };
        assert_eq!(
            e.to_string(),
            "invalid parameter blur_width = 4: must be odd and >= 1"
        );
        assert_eq!(e.stage(), None);
    }

    #[test]
    fn test_at_wraps_source() {
        let io = std::io::Error::other("boom");
        let e = PaintError::at(Stage::Watershed)(io);
        assert!(matches!(
            e,
            PaintError::Stage {
                stage: Stage::Watershed,
                ..
            }
        ));
        assert_eq!(e.to_string(), "watershed failed: boom");
    }
}
