// THEORY:
// `ImageSource` is the boundary with the `image` crate. Reading turns a file into a
// `DynamicImage`, detecting the format from the content rather than trusting the
// extension. Any failure on the way (missing file, unreadable bytes, unsupported
// or corrupt format) comes back as one distinguishable `HueError::Decode`, which the
// pipeline treats as "skip this image" rather than as a fatal error.
//
// Writing is the mirror image: an RGB8 buffer is encoded as PNG, and failures come
// back as `HueError::Encode`, which is never skipped. The engine itself never writes
// images; fixtures and tests do.

use crate::error::{HueError, Result};
use image::{DynamicImage, ImageEncoder, ImageReader};
use std::path::Path;

/// Decodes the image at `path`.
pub fn open(path: &Path) -> Result<DynamicImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| HueError::decode(path, e))?
        .with_guessed_format()
        .map_err(|e| HueError::decode(path, e))?;

    reader.decode().map_err(|e| HueError::decode(path, e))
}

/// Encodes a packed RGB8 buffer (`width * height * 3` bytes) as a PNG file.
pub fn save_rgb(path: &Path, width: u32, height: u32, buffer: &[u8]) -> Result<()> {
    let expected = width as usize * height as usize * 3;
    if buffer.len() != expected {
        return Err(HueError::encode(
            path,
            format!("expected {expected} bytes of RGB8 data, got {}", buffer.len()),
        ));
    }

    let output = std::fs::File::create(path)?;
    let encoder = image::codecs::png::PngEncoder::new(output);

    encoder
        .write_image(buffer, width, height, image::ExtendedColorType::Rgb8)
        .map_err(|e| HueError::Encode {
            path: path.to_path_buf(),
            message: e.to_string(),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::pixel::pixel::Pixel;
    use tempfile::TempDir;

    #[test]
    fn saved_image_decodes_to_the_same_pixels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mario-box.png");
        let width = 4u32;
        let height = 2u32;
        let mut buffer = Vec::with_capacity((width * height * 3) as usize);
        for i in 0..(width * height) {
            buffer.extend_from_slice(&[i as u8 * 10, 100, 200]);
        }

        save_rgb(&path, width, height, &buffer).expect("Error Saving File.");
        let decoded = open(&path).unwrap().to_rgb8();

        assert_eq!(decoded.dimensions(), (width, height));
        assert_eq!(Pixel::from(*decoded.get_pixel(3, 1)), Pixel::new(70, 100, 200));
    }

    #[test]
    fn format_is_detected_from_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zelda-cover.jpg");
        save_rgb(&path, 2, 2, &[90u8; 12]).unwrap();

        let decoded = open(&path).unwrap().to_rgb8();
        assert_eq!(decoded.get_pixel(0, 0).0, [90, 90, 90]);
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken-box.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = open(&path).unwrap_err();
        assert!(matches!(err, HueError::Decode { .. }));
        assert!(err.is_recoverable());
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let err = open(&dir.path().join("absent-box.png")).unwrap_err();
        assert!(matches!(err, HueError::Decode { .. }));
    }

    #[test]
    fn short_buffer_is_an_encode_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("metroid-box.png");

        let err = save_rgb(&path, 4, 4, &[0u8; 12]).unwrap_err();
        assert!(matches!(err, HueError::Encode { .. }));
        assert!(!err.is_recoverable());
        assert!(!path.exists());
    }
}
