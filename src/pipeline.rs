// THEORY:
// The `pipeline` module is the top-level API of the color engine. It strings the
// core modules together for a whole run: every candidate image is decoded and
// reduced to its dominant colors, the first color of each image becomes one data
// point, the data points are combined by the configured reducer, and the result is
// optionally brightened.
//
// Brightening runs twice when enabled: once on every data point before reduction,
// and once more on the reduced color. The report keeps the reduced color from
// between the two passes as `aggregate`.
//
// Failure policy:
// - A single image that cannot be decoded is logged at debug level and skipped.
// - An image that is nothing but background contributes no data point.
// - If no data point survives, the run fails with `NoInput`. There is no partial
//   result: a run either yields one color or an error.
//
// The sequential `ColorPipeline` processes images strictly in the order given. The
// `parallel_pipeline` module offers the same contract with concurrent decoding.

use crate::core_modules::brightness::BrightnessAdjuster;
use crate::core_modules::dominant_color::DominantColorExtractor;
use crate::core_modules::image_source;
use crate::error::{HueError, Result};
use crate::selection::{self, EntityMatcher};
use std::path::{Path, PathBuf};

// Re-export key data structures for the public API.
pub use crate::config::PipelineConfig;
pub use crate::core_modules::aggregator::Reduction;
pub use crate::core_modules::color_histogram::color_histogram::PixelSample;
pub use crate::core_modules::dominant_color::DominantColors;
pub use crate::core_modules::pixel::pixel::{HsvPixel, Pixel};

/// The dominant colors found in one successfully decoded image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSample {
    pub path: PathBuf,
    pub colors: DominantColors,
}

/// The final output of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorReport {
    pub reduction: Reduction,
    /// The reduced color, before the final brightening pass.
    pub aggregate: Pixel,
    /// The color to present: `aggregate`, brightened if requested.
    pub color: Pixel,
    pub brightened: bool,
    /// Every image that contributed a data point, in processing order.
    pub samples: Vec<ImageSample>,
}

impl ColorReport {
    pub fn hsv(&self) -> HsvPixel {
        self.color.to_hsv()
    }

    pub fn aggregate_hsv(&self) -> HsvPixel {
        self.aggregate.to_hsv()
    }
}

/// The main, top-level struct for the color engine.
pub struct ColorPipeline {
    config: PipelineConfig,
    extractor: DominantColorExtractor,
    adjuster: BrightnessAdjuster,
}

impl ColorPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            extractor: config.extractor(),
            adjuster: config.adjuster(),
            config,
        }
    }

    /// Decodes one image and extracts its dominant colors.
    pub fn sample(&self, path: &Path) -> Result<ImageSample> {
        sample_image(&self.extractor, self.config.top_n, path)
    }

    /// Processes `paths` in order and reduces them to one color.
    pub fn run(&self, entity: &str, paths: &[PathBuf]) -> Result<ColorReport> {
        let outcomes: Vec<Result<ImageSample>> =
            paths.iter().map(|path| self.sample(path)).collect();
        build_report(&self.config, &self.adjuster, entity, outcomes)
    }

    /// Selects `<entity>-<word>.(jpg|png)` files in `dir` and runs over them.
    pub fn run_dir(&self, dir: &Path, entity: &str) -> Result<ColorReport> {
        let matcher = EntityMatcher::new(entity)?;
        let paths = selection::candidate_files(dir, &matcher)?;
        self.run(entity, &paths)
    }
}

pub(crate) fn sample_image(
    extractor: &DominantColorExtractor,
    top_n: usize,
    path: &Path,
) -> Result<ImageSample> {
    log::debug!("Processing file: {}", path.display());
    let image = image_source::open(path)?;
    let colors = extractor.extract(&image, top_n);
    Ok(ImageSample {
        path: path.to_path_buf(),
        colors,
    })
}

/// Folds per-image outcomes, in order, into the final report.
pub(crate) fn build_report(
    config: &PipelineConfig,
    adjuster: &BrightnessAdjuster,
    entity: &str,
    outcomes: Vec<Result<ImageSample>>,
) -> Result<ColorReport> {
    let mut samples = Vec::with_capacity(outcomes.len());
    let mut data_points = Vec::with_capacity(outcomes.len());

    for outcome in outcomes {
        match outcome {
            Ok(sample) => match sample.colors.dominant() {
                Some(color) => {
                    log::debug!("{}: dominant color {}", sample.path.display(), color);
                    data_points.push(color);
                    samples.push(sample);
                }
                None => {
                    log::debug!("{}: only background pixels, skipped", sample.path.display());
                }
            },
            Err(err) if err.is_recoverable() => {
                log::debug!("Skipping image. {err}");
            }
            Err(err) => return Err(err),
        }
    }

    if config.brighten {
        for point in data_points.iter_mut() {
            *point = adjuster.adjust(*point);
        }
    }

    let aggregate = config
        .reduction
        .reduce(&data_points)
        .ok_or_else(|| HueError::NoInput {
            entity: entity.to_string(),
        })?;

    let color = if config.brighten {
        adjuster.adjust(aggregate)
    } else {
        aggregate
    };

    log::info!(
        "{} color of {} image(s) for '{}': {}",
        config.reduction,
        data_points.len(),
        entity,
        color
    );

    Ok(ColorReport {
        reduction: config.reduction,
        aggregate,
        color,
        brightened: config.brighten,
        samples,
    })
}
