// THEORY:
// Box art is framed by letterbox bars, scan borders and plain white backgrounds. Those
// pixels dominate any raw frequency count while saying nothing about the artwork, so
// they are discarded before counting. A pixel is "ignored" when it is uniformly dark
// (every channel below the black threshold) or uniformly light (every channel above
// the white threshold). A saturated color with one dark channel, like pure red, is
// never ignored. Both comparisons are strict.

pub mod color_filter {
    use crate::core_modules::pixel::pixel::{Channel, Pixel};

    pub const DEFAULT_BLACK_THRESHOLD: Channel = 30;
    pub const DEFAULT_WHITE_THRESHOLD: Channel = 225;

    /// Classifies near-black and near-white pixels.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ColorFilter {
        pub black_threshold: Channel,
        pub white_threshold: Channel,
    }

    impl Default for ColorFilter {
        fn default() -> Self {
            Self {
                black_threshold: DEFAULT_BLACK_THRESHOLD,
                white_threshold: DEFAULT_WHITE_THRESHOLD,
            }
        }
    }

    impl ColorFilter {
        pub fn new(black_threshold: Channel, white_threshold: Channel) -> Self {
            Self {
                black_threshold,
                white_threshold,
            }
        }

        pub fn is_ignored(&self, pixel: &Pixel) -> bool {
            let channels = pixel.channels();
            channels.iter().all(|&c| c < self.black_threshold)
                || channels.iter().all(|&c| c > self.white_threshold)
        }
    }
}
