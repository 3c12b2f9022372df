// THEORY:
// Dominant colors pulled from box art are often muddy: dark blues, greyish reds. The
// `BrightnessAdjuster` lifts such a color into something usable as an accent by
// forcing its HSV saturation and value up to a floor while leaving the hue alone.
// Colors already above the floor in a component keep that component as is.
//
// The adjustment goes RGB -> HSV -> RGB, so the returned color's recomputed HSV can
// land one unit under the floor through integer flooring. The hue handed to the
// final conversion is exactly the input hue.

use crate::core_modules::pixel::pixel::{HsvPixel, Pixel, Saturation, Value, rgb_to_hsv};

pub const DEFAULT_MIN_SATURATION: Saturation = 80;
pub const DEFAULT_MIN_VALUE: Value = 80;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrightnessAdjuster {
    pub min_saturation: Saturation,
    pub min_value: Value,
}

impl Default for BrightnessAdjuster {
    fn default() -> Self {
        Self {
            min_saturation: DEFAULT_MIN_SATURATION,
            min_value: DEFAULT_MIN_VALUE,
        }
    }
}

impl BrightnessAdjuster {
    pub fn new(min_saturation: Saturation, min_value: Value) -> Self {
        Self {
            min_saturation,
            min_value,
        }
    }

    /// Raises saturation and value to their floors in HSV space.
    pub fn adjust_hsv(&self, hsv: HsvPixel) -> HsvPixel {
        HsvPixel {
            hue: hsv.hue,
            saturation: hsv.saturation.max(self.min_saturation),
            value: hsv.value.max(self.min_value),
        }
    }

    pub fn adjust(&self, pixel: Pixel) -> Pixel {
        self.adjust_hsv(rgb_to_hsv(pixel)).to_rgb()
    }
}
