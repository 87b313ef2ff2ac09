// SPDX-License-Identifier: MPL-2.0
//! Color filter chain with CSS-equivalent semantics.
//!
//! Brightness, contrast, and saturation are percentage multipliers (100 is
//! neutral); blur is a Gaussian radius in pixels. Applying the chain bakes
//! the result into pixel data; no live display-layer effect is left behind
//! afterwards.

use image_rs::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};

/// Bounds for the percentage filters.
pub const PERCENT_MIN: u32 = 0;
pub const PERCENT_MAX: u32 = 200;
pub const PERCENT_NEUTRAL: u32 = 100;

/// Bounds for the blur radius, in pixels.
pub const BLUR_MIN: u32 = 0;
pub const BLUR_MAX: u32 = 20;

/// Percentage filter value, clamped to `0..=200` (100 is neutral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterPercent(u32);

impl FilterPercent {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(PERCENT_MIN, PERCENT_MAX))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.0 == PERCENT_NEUTRAL
    }

    /// Multiplier form (100% → 1.0).
    #[must_use]
    pub fn as_factor(self) -> f32 {
        self.0 as f32 / 100.0
    }
}

impl Default for FilterPercent {
    fn default() -> Self {
        Self(PERCENT_NEUTRAL)
    }
}

/// Blur radius in pixels, clamped to `0..=20` (0 is neutral).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BlurRadius(u32);

impl BlurRadius {
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value.clamp(BLUR_MIN, BLUR_MAX))
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    #[must_use]
    pub fn is_neutral(self) -> bool {
        self.0 == 0
    }
}

/// The live per-session filter state, mutated by slider input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterChain {
    pub brightness: FilterPercent,
    pub contrast: FilterPercent,
    pub saturation: FilterPercent,
    pub blur: BlurRadius,
}

impl FilterChain {
    /// True when every component sits at its neutral value.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.brightness.is_neutral()
            && self.contrast.is_neutral()
            && self.saturation.is_neutral()
            && self.blur.is_neutral()
    }

    /// Reset every component to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Applies the chain to an image, producing a new flattened surface.
    ///
    /// Components are applied in declaration order (brightness, contrast,
    /// saturation, then blur), matching how a CSS filter list evaluates.
    /// An identity chain returns a plain clone.
    #[must_use]
    pub fn apply(&self, image: &DynamicImage) -> DynamicImage {
        if self.is_identity() {
            return image.clone();
        }

        let mut rgba = image.to_rgba8();

        if !(self.brightness.is_neutral()
            && self.contrast.is_neutral()
            && self.saturation.is_neutral())
        {
            let brightness = self.brightness.as_factor();
            let contrast = self.contrast.as_factor();
            let saturation = self.saturation.as_factor();

            for pixel in rgba.pixels_mut() {
                let [r, g, b, a] = pixel.0;
                let (r, g, b) = adjust_channels(
                    (f32::from(r), f32::from(g), f32::from(b)),
                    brightness,
                    contrast,
                    saturation,
                );
                pixel.0 = [r, g, b, a];
            }
        }

        if !self.blur.is_neutral() {
            rgba = blur(&rgba, self.blur.value());
        }

        DynamicImage::ImageRgba8(rgba)
    }
}

/// Applies the three color components to one pixel's channels.
fn adjust_channels(
    (mut r, mut g, mut b): (f32, f32, f32),
    brightness: f32,
    contrast: f32,
    saturation: f32,
) -> (u8, u8, u8) {
    // brightness(p%): linear multiplier on each channel
    r *= brightness;
    g *= brightness;
    b *= brightness;

    // contrast(p%): scale the distance from the midpoint
    r = (r - 127.5) * contrast + 127.5;
    g = (g - 127.5) * contrast + 127.5;
    b = (b - 127.5) * contrast + 127.5;

    // saturate(p%): lerp between the Rec. 709 luma and the channel value
    let luma = 0.2126 * r + 0.7152 * g + 0.0722 * b;
    r = luma + (r - luma) * saturation;
    g = luma + (g - luma) * saturation;
    b = luma + (b - luma) * saturation;

    (clamp_u8(r), clamp_u8(g), clamp_u8(b))
}

fn clamp_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// Gaussian blur with the radius interpreted as the standard deviation,
/// as CSS `blur(<length>)` defines it.
fn blur(rgba: &RgbaImage, radius: u32) -> RgbaImage {
    image_rs::imageops::blur(rgba, radius as f32)
}
