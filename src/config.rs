// THEORY:
// `PipelineConfig` is the single bag of tunables for a run, in the spirit of a
// vision pipeline config: plain public fields, `Clone` so every worker can own a
// copy, and defaults that encode the constants the engine was tuned with. A TOML
// file can override any subset of fields; command-line flags are applied on top of
// that by the binary.

use crate::core_modules::aggregator::Reduction;
use crate::core_modules::brightness::{
    BrightnessAdjuster, DEFAULT_MIN_SATURATION, DEFAULT_MIN_VALUE,
};
use crate::core_modules::color_filter::color_filter::{
    ColorFilter, DEFAULT_BLACK_THRESHOLD, DEFAULT_WHITE_THRESHOLD,
};
use crate::core_modules::dominant_color::{
    DEFAULT_SAMPLE_SIZE, DEFAULT_TOP_N, DominantColorExtractor, Resample,
};
use crate::error::{HueError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the color pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// How per-image colors are combined into one.
    pub reduction: Reduction,
    /// Raise the final color's saturation and value to the floors below.
    pub brighten: bool,
    /// How many colors to keep per image. Only the first feeds the aggregate.
    pub top_n: usize,
    /// Pixels with every channel below this are treated as background.
    pub black_threshold: u8,
    /// Pixels with every channel above this are treated as background.
    pub white_threshold: u8,
    /// Images are resampled to `sample_size` x `sample_size` before counting.
    pub sample_size: u32,
    pub resample: Resample,
    pub min_saturation: u8,
    pub min_value: u8,
    /// Maximum number of images decoded at once by the parallel pipeline.
    pub workers: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            reduction: Reduction::default(),
            brighten: false,
            top_n: DEFAULT_TOP_N,
            black_threshold: DEFAULT_BLACK_THRESHOLD,
            white_threshold: DEFAULT_WHITE_THRESHOLD,
            sample_size: DEFAULT_SAMPLE_SIZE,
            resample: Resample::default(),
            min_saturation: DEFAULT_MIN_SATURATION,
            min_value: DEFAULT_MIN_VALUE,
            workers: num_cpus::get(),
        }
    }
}

impl PipelineConfig {
    /// Loads a config from a TOML file. Missing fields take their defaults.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| HueError::config(path, e.to_string()))?;
        let config: PipelineConfig =
            toml::from_str(&text).map_err(|e| HueError::config(path, e.to_string()))?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        config.validate(path)?;
        Ok(config)
    }

    /// Rejects values that would make a run meaningless.
    pub fn validate(&self, source: &Path) -> Result<()> {
        if self.top_n == 0 {
            return Err(HueError::config(source, "top_n must be at least 1"));
        }
        if self.sample_size == 0 {
            return Err(HueError::config(source, "sample_size must be at least 1"));
        }
        if self.workers == 0 {
            return Err(HueError::config(source, "workers must be at least 1"));
        }
        if self.min_saturation > 100 || self.min_value > 100 {
            return Err(HueError::config(
                source,
                "min_saturation and min_value are percentages (0-100)",
            ));
        }
        Ok(())
    }

    pub fn filter(&self) -> ColorFilter {
        ColorFilter::new(self.black_threshold, self.white_threshold)
    }

    pub fn extractor(&self) -> DominantColorExtractor {
        DominantColorExtractor::new(self.filter(), self.sample_size, self.resample)
    }

    pub fn adjuster(&self) -> BrightnessAdjuster {
        BrightnessAdjuster::new(self.min_saturation, self.min_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_tuned_constants() {
        let config = PipelineConfig::default();
        assert_eq!(config.reduction, Reduction::Brightest);
        assert!(!config.brighten);
        assert_eq!(config.top_n, 1);
        assert_eq!(config.black_threshold, 30);
        assert_eq!(config.white_threshold, 225);
        assert_eq!(config.sample_size, 100);
        assert_eq!((config.min_saturation, config.min_value), (80, 80));
        assert!(config.workers >= 1);
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hue.toml");
        std::fs::write(
            &path,
            "reduction = \"mean\"\nbrighten = true\nblack_threshold = 10\nresample = \"nearest\"\n",
        )
        .unwrap();

        let config = PipelineConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.reduction, Reduction::Mean);
        assert!(config.brighten);
        assert_eq!(config.black_threshold, 10);
        assert_eq!(config.white_threshold, 225);
        assert_eq!(config.resample, Resample::Nearest);
    }

    #[test]
    fn zero_top_n_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hue.toml");
        std::fs::write(&path, "top_n = 0\n").unwrap();

        let err = PipelineConfig::from_toml_file(&path).unwrap_err();
        assert!(matches!(err, HueError::Config { .. }));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hue.toml");
        std::fs::write(&path, "reduction = \"median\"\n").unwrap();

        assert!(matches!(
            PipelineConfig::from_toml_file(&path),
            Err(HueError::Config { .. })
        ));
    }

    #[test]
    fn filter_uses_configured_thresholds() {
        let config = PipelineConfig {
            black_threshold: 50,
            ..PipelineConfig::default()
        };
        assert_eq!(config.filter().black_threshold, 50);
        assert_eq!(config.extractor().sample_size(), 100);
    }
}
