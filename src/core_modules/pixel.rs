// THEORY (Color Space):
// The `Pixel` module is the most fundamental unit of the color engine. It is a "dumb"
// RGB data container plus the handful of single-pixel transforms every other layer
// relies on: HSV in both directions, a perceptual brightness score and a hex string.
// Nothing here looks at neighbours, frequencies or other images.
//
// Quantization:
// - HSV is integer-quantized: hue in whole degrees [0, 360), saturation and value in
//   whole percent [0, 100]. Every step floors, it never rounds.
// - RGB -> HSV -> RGB is therefore only an approximate inverse. Callers that need a
//   color in both spaces recompute it rather than assuming the round trip is exact.
//
// Key principles:
// 1) Pure and total: every function accepts any in-range input and cannot fail.
// 2) f64 throughout the intermediate math so results are reproducible bit for bit.
// 3) `Pixel` packs into a 24-bit integer, the natural key for frequency counting.

pub mod pixel {
    use std::fmt;

    pub type Byte = u8;
    pub type Channel = Byte;
    pub type Hue = u16;
    pub type Saturation = u8;
    pub type Value = u8;
    pub type Brightness = f64;
    pub type PackedRgb = u32;

    /// A "dumb" data container representing a single RGB pixel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
    }

    /// An integer-quantized HSV color.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct HsvPixel {
        /// Hue angle in whole degrees [0, 360).
        pub hue: Hue,
        /// Saturation in whole percent [0, 100].
        pub saturation: Saturation,
        /// Value in whole percent [0, 100].
        pub value: Value,
    }

    impl HsvPixel {
        pub fn new(hue: Hue, saturation: Saturation, value: Value) -> Self {
            HsvPixel {
                hue,
                saturation,
                value,
            }
        }

        /// Converts back to RGB. See [`hsv_to_rgb`].
        pub fn to_rgb(&self) -> Pixel {
            hsv_to_rgb(*self)
        }
    }

    impl Pixel {
        pub const fn new(red: Channel, green: Channel, blue: Channel) -> Self {
            Pixel { red, green, blue }
        }

        /// Packs the channels as `0x00RRGGBB`.
        #[inline]
        pub fn packed(&self) -> PackedRgb {
            ((self.red as PackedRgb) << 16) | ((self.green as PackedRgb) << 8) | self.blue as PackedRgb
        }

        #[inline]
        pub fn from_packed(packed: PackedRgb) -> Self {
            Pixel {
                red: ((packed >> 16) & 0xFF) as Channel,
                green: ((packed >> 8) & 0xFF) as Channel,
                blue: (packed & 0xFF) as Channel,
            }
        }

        pub fn channels(&self) -> [Channel; 3] {
            [self.red, self.green, self.blue]
        }

        pub fn to_hsv(&self) -> HsvPixel {
            rgb_to_hsv(*self)
        }

        /// Luminance estimate (Rec. 601 luma).
        pub fn brightness_score(&self) -> Brightness {
            brightness_score(*self)
        }

        pub fn to_hex(&self) -> String {
            to_hex(*self)
        }
    }

    impl From<[Byte; 3]> for Pixel {
        fn from(bytes: [Byte; 3]) -> Self {
            Pixel::new(bytes[0], bytes[1], bytes[2])
        }
    }

    impl From<image::Rgb<Byte>> for Pixel {
        fn from(rgb: image::Rgb<Byte>) -> Self {
            Pixel::from(rgb.0)
        }
    }

    impl From<Pixel> for image::Rgb<Byte> {
        fn from(pixel: Pixel) -> Self {
            image::Rgb(pixel.channels())
        }
    }

    /// Renders as the tuple form used in verbose reports: `(R, G, B)`.
    impl fmt::Display for Pixel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "({}, {}, {})", self.red, self.green, self.blue)
        }
    }

    impl fmt::Display for HsvPixel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "({}, {}, {})", self.hue, self.saturation, self.value)
        }
    }

    /// Converts RGB to integer HSV.
    ///
    /// - Pure black has saturation 0 (no division by a zero maximum).
    /// - Greys (zero chroma) have hue 0.
    /// - Hue comes from whichever channel holds the maximum, checked red, green, blue.
    pub fn rgb_to_hsv(pixel: Pixel) -> HsvPixel {
        let red = pixel.red as f64 / 255.0;
        let green = pixel.green as f64 / 255.0;
        let blue = pixel.blue as f64 / 255.0;

        let maximum_channel = red.max(green.max(blue));
        let minimum_channel = red.min(green.min(blue));
        let delta = maximum_channel - minimum_channel;

        let value = maximum_channel;
        let saturation = if maximum_channel != 0.0 {
            delta / maximum_channel
        } else {
            0.0
        };

        let hue = if delta == 0.0 {
            0.0
        } else {
            let sector = if red == maximum_channel {
                (green - blue) / delta
            } else if green == maximum_channel {
                (blue - red) / delta + 2.0
            } else {
                (red - green) / delta + 4.0
            };
            let mut turns = sector / 6.0;
            if turns < 0.0 {
                turns += 1.0;
            }
            turns
        };

        HsvPixel {
            hue: (hue * 360.0) as Hue,
            saturation: (saturation * 100.0) as Saturation,
            value: (value * 100.0) as Value,
        }
    }

    /// Converts integer HSV back to RGB using six 60-degree sectors.
    /// Each channel is floored into 0..=255.
    pub fn hsv_to_rgb(hsv: HsvPixel) -> Pixel {
        let hue = hsv.hue as f64;
        let saturation = hsv.saturation as f64 / 100.0;
        let value = hsv.value as f64 / 100.0;

        let chroma = value * saturation;
        let secondary = chroma * (1.0 - ((hue / 60.0) % 2.0 - 1.0).abs());
        let offset = value - chroma;

        let (red, green, blue) = if (0.0..60.0).contains(&hue) {
            (chroma, secondary, 0.0)
        } else if (60.0..120.0).contains(&hue) {
            (secondary, chroma, 0.0)
        } else if (120.0..180.0).contains(&hue) {
            (0.0, chroma, secondary)
        } else if (180.0..240.0).contains(&hue) {
            (0.0, secondary, chroma)
        } else if (240.0..300.0).contains(&hue) {
            (secondary, 0.0, chroma)
        } else {
            (chroma, 0.0, secondary)
        };

        Pixel {
            red: ((red + offset) * 255.0) as Channel,
            green: ((green + offset) * 255.0) as Channel,
            blue: ((blue + offset) * 255.0) as Channel,
        }
    }

    /// Six uppercase hex digits, no leading `#`.
    pub fn to_hex(pixel: Pixel) -> String {
        format!("{:02X}{:02X}{:02X}", pixel.red, pixel.green, pixel.blue)
    }

    pub fn to_hex_prefixed(pixel: Pixel) -> String {
        format!("#{}", to_hex(pixel))
    }

    /// Perceived brightness: `0.299 R + 0.587 G + 0.114 B` on the 0..255 scale.
    pub fn brightness_score(pixel: Pixel) -> Brightness {
        0.299_f64 * pixel.red as f64 + 0.587_f64 * pixel.green as f64 + 0.114_f64 * pixel.blue as f64
    }
}


// -----------------------------------------------------------------------------
// Glossary: Single-Pixel Color Terms
//
// - Hue: Angle on the color wheel (0-360 degrees) describing the color family.
//   Computed from the relative differences between the channels.
//
// - Saturation (HSV): Chroma divided by Value. Zero for greys and for pure black.
//
// - Value (HSV): Brightness defined as the maximum of the RGB channels.
//
// - Brightness score: Rec. 601 luma, the weighted channel sum used to pick the
//   "brightest" of several colors. Not the same thing as HSV Value.
//
// - Packed RGB: the three channels in the low 24 bits of a u32, used as an exact
//   hash key when counting colors.
