//! paintbynum CLI - turn a photograph into a paint-by-numbers image.

use clap::{Parser, ValueEnum};
use paintbynum::{
    ColorPolicy, DirectoryPreview, NoPreview, Pipeline, PipelineConfig, Preview,
    ThresholdModeConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "paintbynum")]
#[command(about = "Segment a photograph with a marker-controlled watershed and fill each region with one color")]
#[command(version)]
struct Cli {
    /// Input image (PNG or JPEG).
    #[arg(default_value = "data/dog.jpg")]
    input: PathBuf,

    /// Output image; the format follows the extension.
    #[arg(short, long, default_value = "results/out.jpg")]
    output: PathBuf,

    /// JSON configuration file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Input rescaling factor in (0, 1].
    #[arg(long)]
    scale: Option<f32>,

    /// Mean-shift spatial window.
    #[arg(long)]
    spatial_window: Option<u32>,

    /// Mean-shift color window.
    #[arg(long)]
    color_window: Option<u32>,

    /// Gaussian blur kernel width (odd).
    #[arg(long)]
    blur_width: Option<u32>,

    /// Laplacian sharpening coefficient.
    #[arg(long, allow_negative_numbers = true)]
    sharpen: Option<f32>,

    /// Gray threshold used with --threshold-mode fixed.
    #[arg(long)]
    bin_thresh: Option<u32>,

    /// How the binarization threshold is chosen.
    #[arg(long, value_enum)]
    threshold_mode: Option<ThresholdModeArg>,

    /// Peak threshold on the normalized distance field, in [0, 1).
    #[arg(long)]
    peak_thresh: Option<f32>,

    /// Width of the square used to merge peaks.
    #[arg(long)]
    dilate_width: Option<u32>,

    /// Region coloring policy.
    #[arg(long, value_enum)]
    colors: Option<ColorsArg>,

    /// Seed for --colors random.
    #[arg(long)]
    seed: Option<u64>,

    /// Write every intermediate image to --preview-dir.
    #[arg(long, overrides_with = "no_display_intermediate")]
    display_intermediate: bool,

    /// Skip intermediate images even if the config file asks for them.
    #[arg(long, overrides_with = "display_intermediate")]
    no_display_intermediate: bool,

    /// Directory for intermediate images.
    #[arg(long, default_value = "results/preview")]
    preview_dir: PathBuf,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ThresholdModeArg {
    Auto,
    Fixed,
}

impl ThresholdModeArg {
    fn to_config(self) -> ThresholdModeConfig {
        match self {
            ThresholdModeArg::Auto => ThresholdModeConfig::Auto,
            ThresholdModeArg::Fixed => ThresholdModeConfig::Fixed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ColorsArg {
    Mean,
    Random,
}

impl ColorsArg {
    fn to_config(self) -> ColorPolicy {
        match self {
            ColorsArg::Mean => ColorPolicy::Mean,
            ColorsArg::Random => ColorPolicy::Random,
        }
    }
}

impl Cli {
    fn to_config(&self) -> paintbynum::PaintResult<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_json_file(path)?,
            None => PipelineConfig::default(),
        };
        if let Some(v) = self.scale {
            config.scale = v;
        }
        if let Some(v) = self.spatial_window {
            config.spatial_window = v;
        }
        if let Some(v) = self.color_window {
            config.color_window = v;
        }
        if let Some(v) = self.blur_width {
            config.blur_width = v;
        }
        if let Some(v) = self.sharpen {
            config.sharpen = v;
        }
        if let Some(v) = self.bin_thresh {
            config.binarize_threshold = v;
        }
        if let Some(v) = self.threshold_mode {
            config.threshold_mode = v.to_config();
        }
        if let Some(v) = self.peak_thresh {
            config.peak_threshold = v;
        }
        if let Some(v) = self.dilate_width {
            config.dilate_width = v;
        }
        if let Some(v) = self.colors {
            config.colors = v.to_config();
        }
        if let Some(v) = self.seed {
            config.seed = v;
        }
        if self.display_intermediate {
            config.display_intermediate = true;
        } else if self.no_display_intermediate {
            config.display_intermediate = false;
        }
        Ok(config)
    }
}

fn run(cli: &Cli) -> paintbynum::PaintResult<()> {
    let config = cli.to_config()?;
    let pipeline = Pipeline::new(config)?;
    log::info!("input image rescaling factor: {}", pipeline.config().scale);

    let mut preview: Box<dyn Preview> = if pipeline.config().display_intermediate {
        log::info!(
            "writing intermediate images to {}",
            cli.preview_dir.display()
        );
        Box::new(DirectoryPreview::new(&cli.preview_dir))
    } else {
        Box::new(NoPreview)
    };

    let painting = pipeline.run_file(&cli.input, &cli.output, preview.as_mut())?;
    log::info!(
        "{} regions, {} boundary pixels",
        painting.num_regions(),
        painting.watershed.boundary_pixels
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                log::error!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}
