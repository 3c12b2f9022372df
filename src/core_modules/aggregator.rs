// THEORY:
// The `Aggregator` is the cross-image layer. Each processed image hands it one color
// (its dominant color) and it reduces the whole sequence to a single answer. Two
// reducers exist and a run uses exactly one of them:
// - `mean`: per-channel arithmetic mean, truncated toward zero.
// - `brightest`: the color with the highest Rec. 601 brightness score. On a tie the
//   earliest color wins, so the input order (file enumeration order) matters.
// Both return `None` for an empty sequence; turning that into a user-facing failure
// is the caller's job.

use crate::core_modules::pixel::pixel::{Channel, Pixel};
use crate::error::{HueError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How per-image colors are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Reduction {
    Mean,
    #[default]
    Brightest,
}

impl Reduction {
    /// Resolves the two command-line switches. Neither means the default.
    pub fn from_flags(mean: bool, brightest: bool) -> Result<Option<Reduction>> {
        match (mean, brightest) {
            (true, true) => Err(HueError::Usage(
                "Choose either --brightest or --mean, not both.".to_string(),
            )),
            (true, false) => Ok(Some(Reduction::Mean)),
            (false, true) => Ok(Some(Reduction::Brightest)),
            (false, false) => Ok(None),
        }
    }

    pub fn reduce(&self, colors: &[Pixel]) -> Option<Pixel> {
        match self {
            Reduction::Mean => mean(colors),
            Reduction::Brightest => brightest(colors),
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reduction::Mean => write!(f, "mean"),
            Reduction::Brightest => write!(f, "brightest"),
        }
    }
}

pub fn mean(colors: &[Pixel]) -> Option<Pixel> {
    if colors.is_empty() {
        return None;
    }

    let count = colors.len() as u64;
    let (sum_r, sum_g, sum_b) = colors.iter().fold((0u64, 0u64, 0u64), |(r, g, b), pixel| {
        (r + pixel.red as u64, g + pixel.green as u64, b + pixel.blue as u64)
    });

    Some(Pixel {
        red: (sum_r / count) as Channel,
        green: (sum_g / count) as Channel,
        blue: (sum_b / count) as Channel,
    })
}

pub fn brightest(colors: &[Pixel]) -> Option<Pixel> {
    let mut best: Option<(Pixel, f64)> = None;
    for &pixel in colors {
        let score = pixel.brightness_score();
        // Strictly greater: the first of several equally bright colors is kept.
        if best.is_none_or(|(_, best_score)| score > best_score) {
            best = Some((pixel, score));
        }
    }
    best.map(|(pixel, _)| pixel)
}
