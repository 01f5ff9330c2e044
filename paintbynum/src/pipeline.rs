//! The paint-by-numbers pipeline
//!
//! One run is a strictly linear sequence of stages, each a pure function
//! of the previous stage's output and the configuration:
//!
//! | Stage | Output |
//! |---|---|
//! | scale | bilinear-resized RGB image |
//! | mean-shift | edge-preserving smoothed image (the color source) |
//! | blur | Gaussian-blurred image |
//! | sharpen | Laplacian-sharpened image (the watershed relief) |
//! | binarize | gray image and foreground mask |
//! | distance-field | normalized distance to the background |
//! | peaks | thresholded and dilated peak mask |
//! | seeds | marker label map with the background seed |
//! | watershed | final label map |
//! | colorize | one color per region |
//! | composite | the flat-colored output image |
//!
//! A zero-area scaled image or an empty foreground mask stops the run
//! with [`PaintError::DegenerateGeometry`].

use crate::config::{ColorPolicy, PipelineConfig};
use crate::error::{PaintError, PaintResult, Stage};
use crate::preview::{NoPreview, Preview};
use paintbynum_color::{
    ColorTable, binarize, convert_to_gray, mean_colors, random_colors, render_labels,
};
use paintbynum_core::{FPix, LabelMap, Pix};
use paintbynum_filter::{gaussian_blur, mean_shift_filter, sharpen};
use paintbynum_io::{read_image, write_image_auto};
use paintbynum_region::{
    SeedSet, WatershedStats, distance_field, extract_peaks, label_seeds, watershed,
};
use paintbynum_transform::{TransformError, scale};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;

/// Gray level step between consecutive seed ids in the marker preview
const MARKER_PREVIEW_STEP: u32 = 10;

/// Everything one run produced, in stage order
#[derive(Debug, Clone)]
pub struct Painting {
    pub scaled: Pix,
    pub smoothed: Pix,
    pub blurred: Pix,
    pub sharpened: Pix,
    pub gray: Pix,
    /// Threshold the mask was cut at
    pub threshold: u8,
    pub mask: Pix,
    pub field: FPix,
    pub peaks: Pix,
    pub seeds: SeedSet,
    /// Seed map before growth
    pub markers: LabelMap,
    /// Grown label map
    pub labels: LabelMap,
    pub watershed: WatershedStats,
    pub colors: ColorTable,
    pub output: Pix,
}

impl Painting {
    /// Number of seed regions
    pub fn num_regions(&self) -> usize {
        self.seeds.len()
    }
}

struct Previews<'p> {
    preview: &'p mut dyn Preview,
    enabled: bool,
}

impl Previews<'_> {
    fn show(&mut self, pix: &Pix, label: &str) -> PaintResult<()> {
        if self.enabled {
            self.preview.show(pix, label)?;
        }
        Ok(())
    }
}

/// A validated pipeline configuration ready to run
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    /// Validate `config` and build a pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`PaintError::Parameter`] for any out-of-range value.
    pub fn new(config: PipelineConfig) -> PaintResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage on `pix` without previews.
    pub fn run(&self, pix: &Pix) -> PaintResult<Painting> {
        self.run_with_preview(pix, &mut NoPreview)
    }

    /// Run every stage on `pix`, offering intermediates to `preview` when
    /// `display_intermediate` is set.
    pub fn run_with_preview(&self, pix: &Pix, preview: &mut dyn Preview) -> PaintResult<Painting> {
        let cfg = &self.config;
        let mut previews = Previews {
            preview,
            enabled: cfg.display_intermediate,
        };
        previews.show(pix, "initial")?;

        let scaled = scale(pix, cfg.scale).map_err(|e| match e {
            TransformError::EmptyResult { width, height } => PaintError::DegenerateGeometry {
                stage: Stage::Scale,
                detail: format!(
                    "{}x{} scaled by {} gives {}x{}",
                    pix.width(),
                    pix.height(),
                    cfg.scale,
                    width,
                    height
                ),
            },
            other => PaintError::at(Stage::Scale)(other),
        })?;
        previews.show(&scaled, "scaled")?;

        let smoothed = mean_shift_filter(&scaled, cfg.spatial_window, cfg.color_window)
            .map_err(PaintError::at(Stage::Smooth))?;
        previews.show(&smoothed, "mean-shift")?;

        let blurred =
            gaussian_blur(&smoothed, cfg.blur_width).map_err(PaintError::at(Stage::Blur))?;
        previews.show(&blurred, "blurred")?;

        let sharpened = sharpen(&blurred, cfg.sharpen).map_err(PaintError::at(Stage::Sharpen))?;
        previews.show(&sharpened, "sharpened")?;

        let gray = convert_to_gray(&sharpened).map_err(PaintError::at(Stage::Binarize))?;
        let (mask, threshold) =
            binarize(&gray, cfg.threshold()).map_err(PaintError::at(Stage::Binarize))?;
        if mask.count_nonzero() == 0 {
            return Err(PaintError::DegenerateGeometry {
                stage: Stage::Binarize,
                detail: format!("no pixel above threshold {}", threshold),
            });
        }
        previews.show(&mask, "binary")?;

        let field = distance_field(&mask).map_err(PaintError::at(Stage::DistanceField))?;
        let rendered = field
            .to_pix_8()
            .map_err(PaintError::at(Stage::DistanceField))?;
        previews.show(&rendered, "distance")?;

        let peaks = extract_peaks(&field, cfg.peak_threshold, cfg.dilate_width)
            .map_err(PaintError::at(Stage::Peaks))?;
        previews.show(&peaks, "peaks")?;

        let (markers, seeds) = label_seeds(&peaks).map_err(PaintError::at(Stage::Seeds))?;
        let rendered = markers
            .to_marker_pix(MARKER_PREVIEW_STEP)
            .map_err(PaintError::at(Stage::Seeds))?;
        previews.show(&rendered, "markers")?;

        let mut labels = markers.clone();
        let stats =
            watershed(&sharpened, &mut labels).map_err(PaintError::at(Stage::Watershed))?;
        let rendered = labels
            .to_boundary_pix()
            .map_err(PaintError::at(Stage::Watershed))?;
        previews.show(&rendered, "watershed-markers")?;

        let colors = match cfg.colors {
            ColorPolicy::Mean => {
                mean_colors(&smoothed, &labels).map_err(PaintError::at(Stage::Colorize))?
            }
            ColorPolicy::Random => {
                let mut rng = StdRng::seed_from_u64(cfg.seed);
                random_colors(&labels, &mut rng)
            }
        };

        let output = render_labels(&labels, &colors).map_err(PaintError::at(Stage::Composite))?;
        previews.show(&output, "final")?;

        Ok(Painting {
            scaled,
            smoothed,
            blurred,
            sharpened,
            gray,
            threshold,
            mask,
            field,
            peaks,
            seeds,
            markers,
            labels,
            watershed: stats,
            colors,
            output,
        })
    }

    /// Read `input`, run the pipeline, and write the output image to `output`.
    ///
    /// The output format follows the extension of `output`.
    pub fn run_file<P, Q>(
        &self,
        input: P,
        output: Q,
        preview: &mut dyn Preview,
    ) -> PaintResult<Painting>
    where
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let pix = load_image(input)?;
        let painting = self.run_with_preview(&pix, preview)?;
        save_image(&painting.output, output)?;
        Ok(painting)
    }
}

/// Read a source image; failure aborts with [`PaintError::Input`].
pub fn load_image<P: AsRef<Path>>(path: P) -> PaintResult<Pix> {
    let path = path.as_ref();
    let pix = read_image(path).map_err(|source| PaintError::Input {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "loaded {} ({}x{})",
        path.display(),
        pix.width(),
        pix.height()
    );
    Ok(pix)
}

/// Write an image, choosing the format from the extension.
pub fn save_image<P: AsRef<Path>>(pix: &Pix, path: P) -> PaintResult<()> {
    let path = path.as_ref();
    write_image_auto(pix, path).map_err(|source| PaintError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paintbynum_core::{BACKGROUND_LABEL, PixMut, PixelDepth, color};

    fn uniform(w: u32, h: u32, rgb: (u8, u8, u8)) -> Pix {
        let mut pix = PixMut::new(w, h, PixelDepth::Bit32).unwrap();
        pix.fill(color::compose_rgb(rgb.0, rgb.1, rgb.2));
        pix.into()
    }

    fn small_config() -> PipelineConfig {
        PipelineConfig::default()
            .with_scale(1.0)
            .with_spatial_window(2)
            .with_color_window(8)
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = Pipeline::new(PipelineConfig::default().with_blur_width(2)).unwrap_err();
        assert!(matches!(err, PaintError::Parameter { name: "blur_width", .. }));
    }

    #[test]
    fn test_scale_to_nothing_is_degenerate() {
        let pipeline = Pipeline::new(PipelineConfig::default().with_scale(0.01)).unwrap();
        let err = pipeline.run(&uniform(20, 20, (200, 200, 200))).unwrap_err();
        assert!(matches!(
            err,
            PaintError::DegenerateGeometry {
                stage: Stage::Scale,
                ..
            }
        ));
    }

    #[test]
    fn test_black_canvas_is_degenerate() {
        let pipeline = Pipeline::new(small_config()).unwrap();
        let err = pipeline.run(&uniform(16, 16, (0, 0, 0))).unwrap_err();
        assert!(matches!(
            err,
            PaintError::DegenerateGeometry {
                stage: Stage::Binarize,
                ..
            }
        ));
    }

    #[test]
    fn test_white_canvas_is_background_only() {
        let pipeline = Pipeline::new(small_config()).unwrap();
        let painting = pipeline.run(&uniform(16, 12, (255, 255, 255))).unwrap();
        assert_eq!(painting.num_regions(), 0);
        assert!(painting.labels.data().iter().all(|&l| l == BACKGROUND_LABEL));
        assert!(painting.colors.is_empty());
        assert_eq!(painting.output.dimensions(), (16, 12));
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Preview for Recorder {
        fn show(&mut self, _pix: &Pix, label: &str) -> PaintResult<()> {
            self.0.push(label.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_previews_follow_the_flag() {
        let canvas = uniform(12, 12, (255, 255, 255));

        let mut quiet = Recorder::default();
        Pipeline::new(small_config())
            .unwrap()
            .run_with_preview(&canvas, &mut quiet)
            .unwrap();
        assert!(quiet.0.is_empty());

        let mut loud = Recorder::default();
        Pipeline::new(small_config().with_display_intermediate(true))
            .unwrap()
            .run_with_preview(&canvas, &mut loud)
            .unwrap();
        assert_eq!(
            loud.0,
            [
                "initial",
                "scaled",
                "mean-shift",
                "blurred",
                "sharpened",
                "binary",
                "distance",
                "peaks",
                "markers",
                "watershed-markers",
                "final",
            ]
        );
    }
}
