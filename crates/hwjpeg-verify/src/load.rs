//! Image loading and decoding.
//!
//! Thin wrappers over the `image` crate that deliver pixel data in the two
//! shapes the harness needs: a driver [`Frame`] for streaming into the
//! device, and a [`DynamicImage`] for comparison against the re-decoded
//! encoder output.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use hwjpeg_driver::Frame;
use image::{DynamicImage, ImageReader, RgbImage};
use thiserror::Error;

/// Errors that can occur while loading or decoding an image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// I/O error while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes are not a decodable image.
    #[error("invalid or unsupported image data: {0}")]
    InvalidImage(String),
}

/// Decode image bytes (JPEG or PNG, format guessed from content) into a
/// [`DynamicImage`].
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage, LoadError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| LoadError::InvalidImage(e.to_string()))?;

    reader
        .decode()
        .map_err(|e| LoadError::InvalidImage(e.to_string()))
}

/// Decode image bytes into an RGB [`Frame`] ready for streaming.
pub fn decode_frame(bytes: &[u8]) -> Result<Frame, LoadError> {
    Ok(frame_from_image(decode_image(bytes)?.into_rgb8()))
}

/// Read and decode an image file into a [`DynamicImage`].
pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, LoadError> {
    decode_image(&fs::read(path)?)
}

/// Read and decode an image file into an RGB [`Frame`].
pub fn load_frame(path: impl AsRef<Path>) -> Result<Frame, LoadError> {
    decode_frame(&fs::read(path)?)
}

/// Convert an owned RGB image buffer into a driver [`Frame`].
pub fn frame_from_image(img: RgbImage) -> Frame {
    let (width, height) = img.dimensions();
    Frame::new(width, height, img.into_raw())
}

/// Convert a [`Frame`] back into an RGB image buffer for inspection or
/// comparison. Returns `None` if the frame's buffer does not match its
/// declared dimensions.
pub fn frame_to_image(frame: &Frame) -> Option<RgbImage> {
    RgbImage::from_raw(frame.width, frame.height, frame.pixels.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb};

    fn png_bytes(img: &RgbImage) -> Vec<u8> {
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_frame_round_trip() {
        let img = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let frame = decode_frame(&png_bytes(&img)).unwrap();

        assert_eq!(frame.width, 3);
        assert_eq!(frame.height, 2);
        assert_eq!(frame.rgb_at(2, 1), (10, 20, 30));
    }

    #[test]
    fn test_decode_image_rejects_garbage() {
        let result = decode_image(&[0xDE, 0xAD, 0xBE, 0xEF]);
        assert!(matches!(result, Err(LoadError::InvalidImage(_))));
    }

    #[test]
    fn test_frame_image_conversions_invert() {
        let mut img = RgbImage::new(2, 2);
        img.put_pixel(0, 0, Rgb([1, 2, 3]));
        img.put_pixel(1, 1, Rgb([4, 5, 6]));

        let frame = frame_from_image(img.clone());
        let back = frame_to_image(&frame).unwrap();
        assert_eq!(back, img);
    }

    #[test]
    fn test_frame_to_image_rejects_short_buffer() {
        let frame = Frame {
            width: 4,
            height: 4,
            pixels: vec![0; 3],
        };
        assert!(frame_to_image(&frame).is_none());
    }

    #[test]
    fn test_load_frame_from_disk() {
        let img = RgbImage::from_pixel(1, 1, Rgb([7, 8, 9]));
        let path = std::env::temp_dir().join("hwjpeg_load_frame_test.png");
        fs::write(&path, png_bytes(&img)).unwrap();

        let frame = load_frame(&path).unwrap();
        assert_eq!(frame.rgb_at(0, 0), (7, 8, 9));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_frame_missing_file() {
        let result = load_frame("/nonexistent/hwjpeg.png");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
