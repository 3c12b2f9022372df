pub mod aggregator;
pub mod brightness;
pub mod color_filter;
pub mod color_histogram;
pub mod dominant_color;
pub mod image_source;
pub mod pixel;
