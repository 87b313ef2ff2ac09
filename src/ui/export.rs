// SPDX-License-Identifier: MPL-2.0
//! Export layer: PNG download through a save dialog, and clipboard copy.
//!
//! Whatever the source format was, exports are always static PNG.

use crate::error::{Error, Result};
use image_rs::DynamicImage;
use std::borrow::Cow;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

/// Default download filename for the given moment: `meme-<epoch millis>.png`.
#[must_use]
pub fn default_filename(timestamp_ms: i64) -> String {
    format!("meme-{timestamp_ms}.png")
}

/// Encodes the image as PNG bytes.
///
/// # Errors
///
/// Returns [`Error::Decode`] if encoding fails (which only happens for
/// degenerate buffers).
pub fn encode_png(image: &DynamicImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), image_rs::ImageFormat::Png)
        .map_err(|e| Error::Decode(format!("PNG encode failed: {e}")))?;
    Ok(bytes)
}

/// Opens a save dialog pre-filled with the default filename and writes the
/// image as PNG to the chosen location.
///
/// Returns `Ok(None)` when the user cancels the dialog.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be written.
pub async fn save_with_dialog(image: Arc<DynamicImage>) -> Result<Option<PathBuf>> {
    let filename = default_filename(chrono::Utc::now().timestamp_millis());

    let Some(handle) = rfd::AsyncFileDialog::new()
        .set_file_name(filename)
        .add_filter("PNG image", &["png"])
        .save_file()
        .await
    else {
        return Ok(None);
    };

    let path = handle.path().to_path_buf();
    let bytes = encode_png(&image)?;
    std::fs::write(&path, bytes).map_err(|e| Error::Io(e.to_string()))?;
    Ok(Some(path))
}

/// Places the image on the system clipboard as raw RGBA.
///
/// # Errors
///
/// Returns [`Error::Clipboard`] if the clipboard is unavailable or the copy
/// is denied; the caller surfaces a "try download instead" suggestion.
pub fn copy_to_clipboard(image: &DynamicImage) -> Result<()> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    clipboard
        .set_image(arboard::ImageData {
            width: width as usize,
            height: height as usize,
            bytes: Cow::Owned(rgba.into_vec()),
        })
        .map_err(|e| Error::Clipboard(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::{Rgba, RgbaImage};

    #[test]
    fn default_filename_embeds_the_timestamp() {
        assert_eq!(default_filename(1700000000123), "meme-1700000000123.png");
    }

    #[test]
    fn encode_png_round_trips() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            5,
            3,
            Rgba([10, 200, 30, 255]),
        ));
        let bytes = encode_png(&image).expect("encode");

        let decoded = image_rs::load_from_memory(&bytes).expect("decode");
        assert_eq!((decoded.width(), decoded.height()), (5, 3));
        assert_eq!(decoded.to_rgba8().get_pixel(0, 0).0, [10, 200, 30, 255]);
    }

    #[test]
    fn encoded_bytes_are_png() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255])));
        let bytes = encode_png(&image).expect("encode");
        assert_eq!(&bytes[1..4], b"PNG");
    }
}
