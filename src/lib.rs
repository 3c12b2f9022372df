// THEORY:
// This file is the main entry point for the `dominant_hue` library crate. It exposes
// the color engine as a clean, high-level API: `ColorPipeline` (sequential) and
// `ParallelPipeline` (tokio worker pool) take a `PipelineConfig` and a list of image
// files and produce a single `ColorReport`.
//
// The single-pixel and single-image building blocks live in `core_modules`:
// color space conversions, the background filter, the exact-color histogram, the
// dominant color extractor, the brightness adjuster and the cross-image reducers.
// The remaining modules are the glue a command-line run needs: file selection,
// configuration, errors, output formatting and argument parsing.

pub mod cli;
pub mod config;
pub mod core_modules;
pub mod error;
pub mod output;
pub mod parallel_pipeline;
pub mod pipeline;
pub mod selection;

pub use config::PipelineConfig;
pub use error::{HueError, Result};
pub use parallel_pipeline::ParallelPipeline;
pub use pipeline::{ColorPipeline, ColorReport, HsvPixel, ImageSample, Pixel, Reduction};
