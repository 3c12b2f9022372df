// THEORY:
// The `ColorHistogram` turns a stream of pixels into "how often did each exact color
// occur". It is the summarizing step between raw pixels and a dominant color, the
// same role an average plays for a block of pixels, except that it keeps every
// distinct color instead of blending them.
//
// Key architectural principles:
// 1.  **Exact keys**: Colors are counted by their packed 24-bit value. Two pixels
//     share a bucket only if all three channels match; there is no binning.
// 2.  **Insertion order**: Buckets remember the order in which colors were first
//     seen. A stable sort by descending count then resolves ties in favour of the
//     color that appeared first in scan order, which makes "most common" fully
//     deterministic.
// 3.  **Data Container**: The histogram only counts. It does not know about
//     filtering or images; the extractor feeds it already-filtered pixels.

pub mod color_histogram {
    use crate::core_modules::pixel::pixel::{PackedRgb, Pixel};
    use indexmap::IndexMap;

    pub type Frequency = usize;

    /// A color together with how many times it was observed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PixelSample {
        pub color: Pixel,
        pub count: Frequency,
    }

    #[derive(Debug, Clone, Default)]
    pub struct ColorHistogram {
        counts: IndexMap<PackedRgb, Frequency>,
        total: Frequency,
    }

    impl ColorHistogram {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_capacity(capacity: usize) -> Self {
            Self {
                counts: IndexMap::with_capacity(capacity),
                total: 0,
            }
        }

        pub fn add(&mut self, pixel: Pixel) {
            *self.counts.entry(pixel.packed()).or_insert(0) += 1;
            self.total += 1;
        }

        /// Number of pixels counted so far.
        pub fn total(&self) -> Frequency {
            self.total
        }

        /// Number of distinct colors.
        pub fn len(&self) -> usize {
            self.counts.len()
        }

        pub fn is_empty(&self) -> bool {
            self.counts.is_empty()
        }

        pub fn count(&self, pixel: &Pixel) -> Frequency {
            self.counts.get(&pixel.packed()).copied().unwrap_or(0)
        }

        /// The `n` most frequent colors, highest count first. Ties keep first-seen order.
        pub fn most_common(&self, n: usize) -> Vec<PixelSample> {
            let mut samples: Vec<PixelSample> = self
                .counts
                .iter()
                .map(|(&packed, &count)| PixelSample {
                    color: Pixel::from_packed(packed),
                    count,
                })
                .collect();
            // `sort_by` is stable, so equal counts stay in insertion order.
            samples.sort_by(|a, b| b.count.cmp(&a.count));
            samples.truncate(n);
            samples
        }
    }

    impl FromIterator<Pixel> for ColorHistogram {
        fn from_iter<I: IntoIterator<Item = Pixel>>(iter: I) -> Self {
            let mut histogram = ColorHistogram::new();
            for pixel in iter {
                histogram.add(pixel);
            }
            histogram
        }
    }
}
