//! CLI interface module
//!
//! Provides the command-line interface using clap derive macros and turns the parsed
//! flags into a validated `PipelineConfig`.

use crate::config::PipelineConfig;
use crate::core_modules::aggregator::Reduction;
use crate::error::Result;
use crate::output::OutputFormat;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Determine the dominant color of a set of related image files.
#[derive(Parser, Debug)]
#[command(name = "dominant_hue")]
#[command(version)]
#[command(about = "Determine the dominant color of image files.", long_about = None)]
pub struct Cli {
    /// Path to the directory containing image files.
    pub path_to_images: PathBuf,

    /// Name to match image files (`<name>-<word>.jpg|png`).
    pub rom_name: String,

    /// Use the brightest color.
    #[arg(long)]
    pub brightest: bool,

    /// Use the mean color.
    #[arg(long)]
    pub mean: bool,

    /// Adjust the color to ensure S and V are at least 80%.
    #[arg(long)]
    pub brighten: bool,

    /// Display color in RGB format.
    #[arg(long)]
    pub rgb: bool,

    /// Display color in Hex format.
    #[arg(long)]
    pub hex: bool,

    /// Display color in HSV format.
    #[arg(long)]
    pub hsv: bool,

    /// Display debug information.
    #[arg(short, long)]
    pub debug: bool,

    /// Display verbose information.
    #[arg(short, long)]
    pub verbose: bool,

    /// Number of dominant colors to extract per image.
    #[arg(long = "top", value_name = "N")]
    pub top_n: Option<usize>,

    /// Pixels with every channel below this are ignored.
    #[arg(long, value_name = "N")]
    pub black_threshold: Option<u8>,

    /// Pixels with every channel above this are ignored.
    #[arg(long, value_name = "N")]
    pub white_threshold: Option<u8>,

    /// Number of images decoded concurrently (1 processes them one by one).
    #[arg(short, long, value_name = "N")]
    pub jobs: Option<usize>,

    /// TOML file with pipeline settings; flags override it.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Builds the run configuration: file (or defaults), then flags on top.
    pub fn pipeline_config(&self) -> Result<PipelineConfig> {
        // Conflicting modes fail before anything is read.
        let reduction = Reduction::from_flags(self.mean, self.brightest)?;

        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_toml_file(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(reduction) = reduction {
            config.reduction = reduction;
        }
        if self.brighten {
            config.brighten = true;
        }
        if let Some(top_n) = self.top_n {
            config.top_n = top_n;
        }
        if let Some(threshold) = self.black_threshold {
            config.black_threshold = threshold;
        }
        if let Some(threshold) = self.white_threshold {
            config.white_threshold = threshold;
        }
        if let Some(jobs) = self.jobs {
            config.workers = jobs;
        }

        let source = self.config.as_deref().unwrap_or(Path::new("<command line>"));
        config.validate(source)?;
        Ok(config)
    }

    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_flags(self.rgb, self.hex, self.hsv, self.verbose)
    }
}
