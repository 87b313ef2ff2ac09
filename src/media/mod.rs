// SPDX-License-Identifier: MPL-2.0
//! Raster pipeline: fetching and decoding images, the color filter chain,
//! and the caption rasterizer that burns overlays in at natural resolution.

pub mod annotate;
pub mod cache;
pub mod filter;
pub mod image;

pub use self::image::{decode_image, dynamic_to_image_data, ImageData};
pub use annotate::{apply_text, FontFamily, Rgb, TextOverlaySpec};
pub use cache::ImageCache;
pub use filter::FilterChain;
