// SPDX-License-Identifier: MPL-2.0
//! Image fetching, decoding, and conversion into displayable handles.
//!
//! Decoding always goes through the `image` crate at the source's natural
//! resolution. Animated formats (GIF, animated WebP) decode to their first
//! frame; edits never preserve animation.

use crate::error::{Error, Result};
use iced::widget::image as iced_image;
use image_rs::{DynamicImage, GenericImageView};
use std::path::Path;
use std::sync::Arc;

/// Decoded pixels ready for display in an Iced `image` widget.
#[derive(Debug, Clone)]
pub struct ImageData {
    pub handle: iced_image::Handle,
    pub width: u32,
    pub height: u32,
    /// Original RGBA bytes, shared to keep clones cheap.
    rgba_bytes: Arc<Vec<u8>>,
}

impl ImageData {
    /// Creates a new `ImageData` from RGBA pixels.
    #[must_use]
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        let rgba_bytes = Arc::new(pixels);
        let handle = iced_image::Handle::from_rgba(width, height, rgba_bytes.to_vec());
        Self {
            handle,
            width,
            height,
            rgba_bytes,
        }
    }

    /// Returns a reference to the RGBA bytes backing the handle.
    pub fn rgba_bytes(&self) -> &[u8] {
        &self.rgba_bytes
    }
}

/// Convert a decoded image into display data.
#[must_use]
pub fn dynamic_to_image_data(dynamic: &DynamicImage) -> ImageData {
    let (width, height) = dynamic.dimensions();
    let pixels = dynamic.to_rgba8().into_vec();
    ImageData::from_rgba(width, height, pixels)
}

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP, BMP) into a raster
/// surface at the source's natural resolution.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the bytes are not a supported image.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    image_rs::load_from_memory(bytes).map_err(|e| Error::Decode(e.to_string()))
}

/// Load and decode an image from a local file (the upload path).
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read, [`Error::Decode`] if
/// its contents are not a supported image.
pub fn load_image_from_path<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let bytes = std::fs::read(path.as_ref()).map_err(|e| Error::Io(e.to_string()))?;
    decode_image(&bytes)
}

/// Fetch raw image bytes from a provider URL.
///
/// # Errors
///
/// Returns [`Error::Network`] on transport failure or a non-success status.
pub async fn fetch_image_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Network(format!(
            "image fetch HTTP status: {}",
            response.status()
        )));
    }
    Ok(response.bytes().await?.to_vec())
}

/// Fetch and decode an image from a provider URL in one step.
pub async fn fetch_and_decode(client: &reqwest::Client, url: &str) -> Result<DynamicImage> {
    let bytes = fetch_image_bytes(client, url).await?;
    decode_image(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};
    use std::io::Cursor;
    use tempfile::tempdir;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255]));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(image)
            .write_to(&mut Cursor::new(&mut bytes), image_rs::ImageFormat::Png)
            .expect("encode test png");
        bytes
    }

    #[test]
    fn decode_png_returns_natural_dimensions() {
        let decoded = decode_image(&png_bytes(4, 2)).expect("png should decode");
        assert_eq!(decoded.dimensions(), (4, 2));
    }

    #[test]
    fn decode_garbage_is_a_decode_error() {
        match decode_image(b"not an image") {
            Err(Error::Decode(message)) => assert!(!message.is_empty()),
            other => panic!("expected Decode error, got {other:?}"),
        }
    }

    #[test]
    fn load_missing_file_is_an_io_error() {
        let temp_dir = tempdir().expect("create temp dir");
        let missing = temp_dir.path().join("does_not_exist.png");
        assert!(matches!(load_image_from_path(&missing), Err(Error::Io(_))));
    }

    #[test]
    fn load_image_from_path_round_trips() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join("sample.png");
        std::fs::write(&path, png_bytes(6, 3)).expect("write sample");

        let decoded = load_image_from_path(&path).expect("should load");
        assert_eq!(decoded.dimensions(), (6, 3));
    }

    #[test]
    fn image_data_keeps_dimensions_and_bytes() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(3, 2, Rgba([0, 255, 0, 255])));
        let data = dynamic_to_image_data(&image);
        assert_eq!((data.width, data.height), (3, 2));
        assert_eq!(data.rgba_bytes().len(), 3 * 2 * 4);
    }
}
