// THEORY:
// The `DominantColorExtractor` reduces one decoded image to its most frequent exact
// colors. It owns the only per-image work in the engine, so its cost is fixed up
// front: every image is first resampled to a small square (100x100 by default).
// That blurs fine detail but bounds the work to a constant number of pixels no
// matter how large the source is.
//
// Stages, in order:
// 1.  Resample to `sample_size` x `sample_size` (aspect ratio is not preserved).
// 2.  Normalize to 8-bit RGB, dropping alpha, palette and greyscale modes.
// 3.  Flatten in row-major scan order.
// 4.  Drop pixels the `ColorFilter` ignores.
// 5.  Count exact colors in a `ColorHistogram`.
// 6.  Keep the `top_n` most frequent.
//
// An image made entirely of background yields an empty result. That is not an
// error: the image simply contributes no data point to the aggregate.

use crate::core_modules::color_filter::color_filter::ColorFilter;
use crate::core_modules::color_histogram::color_histogram::{ColorHistogram, PixelSample};
use crate::core_modules::pixel::pixel::Pixel;
use image::DynamicImage;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

pub const DEFAULT_SAMPLE_SIZE: u32 = 100;
pub const DEFAULT_TOP_N: usize = 1;

/// Resampling kernel used when shrinking an image before counting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Resample {
    Nearest,
    Triangle,
    /// Bicubic.
    #[default]
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl From<Resample> for FilterType {
    fn from(resample: Resample) -> Self {
        match resample {
            Resample::Nearest => FilterType::Nearest,
            Resample::Triangle => FilterType::Triangle,
            Resample::CatmullRom => FilterType::CatmullRom,
            Resample::Gaussian => FilterType::Gaussian,
            Resample::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// The most frequent colors of one image, highest count first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DominantColors {
    pub samples: Vec<PixelSample>,
}

impl DominantColors {
    /// The single most frequent color, if any pixel survived filtering.
    pub fn dominant(&self) -> Option<Pixel> {
        self.samples.first().map(|sample| sample.color)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PixelSample> {
        self.samples.iter()
    }
}

#[derive(Debug, Clone)]
pub struct DominantColorExtractor {
    filter: ColorFilter,
    sample_size: u32,
    resample: Resample,
}

impl Default for DominantColorExtractor {
    fn default() -> Self {
        Self::new(ColorFilter::default(), DEFAULT_SAMPLE_SIZE, Resample::default())
    }
}

impl DominantColorExtractor {
    pub fn new(filter: ColorFilter, sample_size: u32, resample: Resample) -> Self {
        Self {
            filter,
            sample_size,
            resample,
        }
    }

    pub fn filter(&self) -> &ColorFilter {
        &self.filter
    }

    pub fn sample_size(&self) -> u32 {
        self.sample_size
    }

    /// Runs all six stages over a decoded image. Never fails.
    pub fn extract(&self, image: &DynamicImage, top_n: usize) -> DominantColors {
        let resized = image.resize_exact(self.sample_size, self.sample_size, self.resample.into());
        let rgb = resized.to_rgb8();
        self.extract_pixels(rgb.pixels().map(|p| Pixel::from(*p)), top_n)
    }

    /// Stages 4 to 6 over pixels that are already flattened in scan order.
    pub fn extract_pixels<I>(&self, pixels: I, top_n: usize) -> DominantColors
    where
        I: IntoIterator<Item = Pixel>,
    {
        let side = self.sample_size as usize;
        let capacity = side.saturating_mul(side);
        let mut histogram = ColorHistogram::with_capacity(capacity.min(1 << 14));
        for pixel in pixels {
            if !self.filter.is_ignored(&pixel) {
                histogram.add(pixel);
            }
        }

        DominantColors {
            samples: histogram.most_common(top_n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    fn solid(width: u32, height: u32, color: [u8; 3]) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color)))
    }

    #[test]
    fn solid_image_yields_one_color_with_every_sampled_pixel() {
        let extractor = DominantColorExtractor::default();
        for (width, height) in [(100, 100), (640, 480), (7, 13)] {
            let result = extractor.extract(&solid(width, height, [200, 0, 0]), 1);
            assert_eq!(
                result.samples,
                vec![PixelSample {
                    color: Pixel::new(200, 0, 0),
                    count: 10_000,
                }],
                "{width}x{height}"
            );
        }
    }

    #[test]
    fn background_only_images_yield_nothing() {
        let extractor = DominantColorExtractor::default();
        assert!(extractor.extract(&solid(64, 64, [0, 0, 0]), 1).is_empty());
        assert!(extractor.extract(&solid(64, 64, [255, 255, 255]), 3).is_empty());
    }

    #[test]
    fn background_does_not_outvote_artwork() {
        // Three quarters black bars, one quarter blue artwork.
        let mut image = RgbImage::from_pixel(100, 100, Rgb([0, 0, 0]));
        for y in 0..25 {
            for x in 0..100 {
                image.put_pixel(x, y, Rgb([20, 60, 180]));
            }
        }
        let extractor = DominantColorExtractor::default();
        let result = extractor.extract(&DynamicImage::ImageRgb8(image), 1);
        assert_eq!(result.dominant(), Some(Pixel::new(20, 60, 180)));
        assert_eq!(result.samples[0].count, 2_500);
    }

    #[test]
    fn rgba_images_are_counted_as_rgb() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(100, 100, Rgba([10, 120, 90, 255])));
        let result = DominantColorExtractor::default().extract(&image, 1);
        assert_eq!(result.dominant(), Some(Pixel::new(10, 120, 90)));
    }

    #[test]
    fn top_n_returns_colors_by_frequency() {
        let teal = Pixel::new(0, 128, 128);
        let plum = Pixel::new(128, 0, 128);
        let pixels = [plum, teal, teal, Pixel::new(0, 0, 0), plum, teal];
        let result = DominantColorExtractor::default().extract_pixels(pixels, 5);
        assert_eq!(
            result.samples,
            vec![
                PixelSample { color: teal, count: 3 },
                PixelSample { color: plum, count: 2 },
            ]
        );
    }

    #[test]
    fn equal_counts_favour_first_scanned_color() {
        let first = Pixel::new(90, 40, 40);
        let second = Pixel::new(40, 90, 40);
        let result = DominantColorExtractor::default().extract_pixels([first, second, second, first], 1);
        assert_eq!(result.dominant(), Some(first));
    }

    #[test]
    fn nearest_resample_keeps_exact_colors_on_downscale() {
        let mut image = RgbImage::from_pixel(200, 200, Rgb([50, 100, 150]));
        for x in 0..200 {
            image.put_pixel(x, 0, Rgb([150, 100, 50]));
        }
        let extractor = DominantColorExtractor::new(ColorFilter::default(), 10, Resample::Nearest);
        let result = extractor.extract(&DynamicImage::ImageRgb8(image), 2);
        assert_eq!(result.dominant(), Some(Pixel::new(50, 100, 150)));
        assert!(result.iter().map(|s| s.count).sum::<usize>() <= 100);
    }

    #[test]
    fn huge_sample_size_does_not_overflow_capacity() {
        let extractor =
            DominantColorExtractor::new(ColorFilter::default(), 70_000, Resample::Nearest);
        let pixels = vec![Pixel::new(90, 10, 10); 3];
        let colors = extractor.extract_pixels(pixels, 1);
        assert_eq!(colors.dominant(), Some(Pixel::new(90, 10, 10)));
    }
}
