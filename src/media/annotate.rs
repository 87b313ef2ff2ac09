// SPDX-License-Identifier: MPL-2.0
//! Caption rasterization: burns an outlined text overlay into an image at
//! its natural resolution.
//!
//! The overlay is positioned and sized in preview-space pixels while the
//! user edits; at apply time everything is scaled by the ratio between the
//! source's natural dimensions and the preview's displayed dimensions, so
//! the committed output is always full resolution. The text itself is
//! rendered by building a small SVG document and rasterizing it with
//! usvg/resvg onto the (already filtered) base pixels.

use crate::error::{Error, Result};
use crate::media::filter::FilterChain;
use image_rs::{DynamicImage, RgbaImage};
use std::fmt;

/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// Horizontal inset applied to every line, in preview-space pixels.
pub const TEXT_X_INSET_PX: f32 = 10.0;

/// An opaque sRGB color for text fill and stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    /// Parses a `#rrggbb` hex string (leading `#` optional).
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Rgb> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Rgb { r, g, b })
    }

    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Caption typefaces offered by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontFamily {
    #[default]
    Impact,
    Arial,
    ComicSans,
    TimesNewRoman,
    Courier,
}

impl FontFamily {
    #[must_use]
    pub fn all() -> &'static [FontFamily] {
        &[
            FontFamily::Impact,
            FontFamily::Arial,
            FontFamily::ComicSans,
            FontFamily::TimesNewRoman,
            FontFamily::Courier,
        ]
    }

    /// Family name handed to the SVG rasterizer's font database.
    #[must_use]
    pub fn css_name(&self) -> &'static str {
        match self {
            FontFamily::Impact => "Impact",
            FontFamily::Arial => "Arial",
            FontFamily::ComicSans => "Comic Sans MS",
            FontFamily::TimesNewRoman => "Times New Roman",
            FontFamily::Courier => "Courier New",
        }
    }
}

impl fmt::Display for FontFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.css_name())
    }
}

/// The caption being edited: content, styling, and a position expressed in
/// preview-space pixels (the top-left of the overlay box).
///
/// Created when the text panel opens, mutated while the user types and
/// drags, consumed once by [`apply_text`], then discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlaySpec {
    pub content: String,
    pub font_family: FontFamily,
    pub font_size_px: u32,
    pub text_color: Rgb,
    pub stroke_color: Rgb,
    pub stroke_width_px: u32,
    pub position: (f32, f32),
}

impl Default for TextOverlaySpec {
    fn default() -> Self {
        Self {
            content: String::new(),
            font_family: FontFamily::default(),
            font_size_px: 32,
            text_color: Rgb::WHITE,
            stroke_color: Rgb::BLACK,
            stroke_width_px: 2,
            position: (0.0, 0.0),
        }
    }
}

/// Ratio between natural and displayed dimensions, per axis.
#[must_use]
pub fn scale_factors(natural: (u32, u32), display: (f32, f32)) -> (f32, f32) {
    let display_w = display.0.max(1.0);
    let display_h = display.1.max(1.0);
    (natural.0 as f32 / display_w, natural.1 as f32 / display_h)
}

/// Maps a preview-space position into source-space.
#[must_use]
pub fn scale_position(position: (f32, f32), scale: (f32, f32)) -> (f32, f32) {
    (position.0 * scale.0, position.1 * scale.1)
}

/// Burns the overlay text into `base` at natural resolution.
///
/// The current filter chain is flattened into the base first so a single
/// commit yields one flattened surface; the text itself is drawn after
/// filtering and is therefore never blurred by the same commit.
///
/// # Errors
///
/// - [`Error::Validation`] if the content is empty after trimming; the base
///   is not touched.
/// - [`Error::Decode`] if the overlay markup fails to rasterize.
pub fn apply_text(
    base: &DynamicImage,
    overlay: &TextOverlaySpec,
    filters: &FilterChain,
    display: (f32, f32),
) -> Result<DynamicImage> {
    if overlay.content.trim().is_empty() {
        return Err(Error::Validation("Please enter some text".to_string()));
    }

    let natural = (base.width(), base.height());
    let scale = scale_factors(natural, display);

    let flattened = filters.apply(base);
    let svg = svg_markup(natural, overlay, scale);
    rasterize_over(&flattened, &svg)
}

/// Builds the SVG overlay document: one `<text>` element per line, stroked
/// then filled (`paint-order`), everything scaled into source-space.
fn svg_markup(natural: (u32, u32), overlay: &TextOverlaySpec, scale: (f32, f32)) -> String {
    let (scale_x, scale_y) = scale;
    let (scaled_x, scaled_y) = scale_position(overlay.position, scale);

    // Typography scales uniformly by the horizontal factor, even when the
    // preview was letterboxed with scale_x != scale_y.
    let font_size = overlay.font_size_px as f32 * scale_x;
    let stroke_width = overlay.stroke_width_px as f32 * scale_x;
    let line_height = font_size * LINE_HEIGHT_FACTOR;
    let x = scaled_x + TEXT_X_INSET_PX * scale_x;

    let stroke_attrs = if overlay.stroke_width_px > 0 {
        format!(
            r#" stroke="{}" stroke-width="{:.2}" stroke-linejoin="round" paint-order="stroke""#,
            overlay.stroke_color.to_hex(),
            stroke_width,
        )
    } else {
        String::new()
    };

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
        w = natural.0,
        h = natural.1,
    );

    // Explicit line breaks only; wrap_text exists but is not part of the
    // commit path.
    for (index, line) in overlay.content.split('\n').enumerate() {
        let baseline_y = scaled_y + font_size + index as f32 * line_height;
        let escaped = quick_xml::escape::escape(line);
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" font-family="{family}" font-size="{size:.2}" font-weight="bold" fill="{fill}"{stroke}>{text}</text>"#,
            x = x,
            y = baseline_y,
            family = overlay.font_family.css_name(),
            size = font_size,
            fill = overlay.text_color.to_hex(),
            stroke = stroke_attrs,
            text = escaped,
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Rasterizes `svg` over a copy of `base` and returns the composited image.
fn rasterize_over(base: &DynamicImage, svg: &str) -> Result<DynamicImage> {
    let width = base.width();
    let height = base.height();

    let mut options = resvg::usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = resvg::usvg::Tree::from_str(svg, &options)
        .map_err(|e| Error::Decode(format!("overlay markup: {e}")))?;

    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| Error::Decode("failed to allocate raster surface".to_string()))?;

    // Seed the surface with the base pixels (premultiplied as tiny-skia
    // expects), then let resvg blend the text on top.
    let base_rgba = base.to_rgba8();
    for (src, dst) in base_rgba.pixels().zip(pixmap.pixels_mut()) {
        let [r, g, b, a] = src.0;
        *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    let mut out = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        out.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let buffer = RgbaImage::from_raw(width, height, out)
        .ok_or_else(|| Error::Decode("raster surface size mismatch".to_string()))?;
    Ok(DynamicImage::ImageRgba8(buffer))
}

/// Greedy word wrap against an estimated average glyph advance.
///
/// Kept as a utility: committed captions split on explicit line breaks only.
#[must_use]
pub fn wrap_text(text: &str, font_size_px: f32, max_width: f32) -> Vec<String> {
    // Rough average advance for bold display faces.
    let advance = font_size_px * 0.6;
    let measure = |s: &str| s.chars().count() as f32 * advance;

    let mut words = text.split_whitespace();
    let mut lines = Vec::new();
    let mut current = words.next().unwrap_or("").to_string();

    for word in words {
        let candidate = format!("{current} {word}");
        if measure(&candidate) > max_width {
            lines.push(current);
            current = word.to_string();
        } else {
            current = candidate;
        }
    }
    lines.push(current);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_rs::Rgba;

    fn base_image(width: u32, height: u32) -> DynamicImage {
        let buffer = RgbaImage::from_pixel(width, height, Rgba([40, 80, 120, 255]));
        DynamicImage::ImageRgba8(buffer)
    }

    fn overlay_with(content: &str) -> TextOverlaySpec {
        TextOverlaySpec {
            content: content.to_string(),
            ..TextOverlaySpec::default()
        }
    }

    #[test]
    fn whitespace_only_text_is_a_validation_error() {
        let base = base_image(100, 100);
        let overlay = overlay_with("   \n\t  ");
        let result = apply_text(&base, &overlay, &FilterChain::default(), (100.0, 100.0));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn output_has_natural_dimensions_not_display_dimensions() {
        let base = base_image(200, 160);
        let overlay = overlay_with("hello");
        // Preview shown at half size.
        let result = apply_text(&base, &overlay, &FilterChain::default(), (100.0, 80.0))
            .expect("apply should succeed");
        assert_eq!((result.width(), result.height()), (200, 160));
    }

    #[test]
    fn half_size_display_doubles_source_position() {
        // Displayed at exactly half the natural width: preview (10, 10)
        // must land at source (20, 20).
        let (sx, sy) = scale_factors((200, 200), (100.0, 100.0));
        let scaled = scale_position((10.0, 10.0), (sx, sy));
        assert!((scaled.0 - 20.0).abs() < f32::EPSILON);
        assert!((scaled.1 - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn markup_scales_font_and_position() {
        let mut overlay = overlay_with("hi");
        overlay.position = (10.0, 10.0);
        overlay.font_size_px = 30;

        let svg = svg_markup((200, 200), &overlay, (2.0, 2.0));
        // x = 10*2 + 10*2 inset, baseline y = 10*2 + 30*2.
        assert!(svg.contains(r#"x="40.00""#), "svg was: {svg}");
        assert!(svg.contains(r#"y="80.00""#), "svg was: {svg}");
        assert!(svg.contains(r#"font-size="60.00""#), "svg was: {svg}");
    }

    #[test]
    fn markup_emits_one_text_element_per_line() {
        let overlay = overlay_with("top\nbottom");
        let svg = svg_markup((100, 100), &overlay, (1.0, 1.0));
        assert_eq!(svg.matches("<text").count(), 2);
    }

    #[test]
    fn markup_escapes_user_text() {
        let overlay = overlay_with("<cats> & \"dogs\"");
        let svg = svg_markup((100, 100), &overlay, (1.0, 1.0));
        assert!(svg.contains("&lt;cats&gt; &amp;"));
        assert!(!svg.contains("<cats>"));
    }

    #[test]
    fn markup_omits_stroke_when_width_is_zero() {
        let mut overlay = overlay_with("plain");
        overlay.stroke_width_px = 0;
        let svg = svg_markup((100, 100), &overlay, (1.0, 1.0));
        assert!(!svg.contains("stroke-width"));
    }

    #[test]
    fn filters_are_flattened_into_the_same_commit() {
        let base = base_image(50, 50);
        let mut filters = FilterChain::default();
        filters.brightness = crate::media::filter::FilterPercent::new(0);

        let result = apply_text(&base, &overlay_with("x"), &filters, (50.0, 50.0))
            .expect("apply should succeed");
        // Brightness 0% blacks out the base pixels in the committed output.
        let corner = result.to_rgba8().get_pixel(0, 0).0;
        assert_eq!(&corner[0..3], &[0, 0, 0]);
    }

    #[test]
    fn rgb_hex_round_trip() {
        let color = Rgb::from_hex("#1a2b3c").expect("parse");
        assert_eq!(color.to_hex(), "#1a2b3c");
        assert_eq!(Rgb::from_hex("ff0000"), Some(Rgb { r: 255, g: 0, b: 0 }));
        assert_eq!(Rgb::from_hex("#nope00"), None);
        assert_eq!(Rgb::from_hex("#fff"), None);
    }

    #[test]
    fn wrap_text_splits_long_lines() {
        let lines = wrap_text("one two three four", 10.0, 60.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.join(" "), "one two three four");
    }

    #[test]
    fn wrap_text_keeps_short_text_on_one_line() {
        let lines = wrap_text("hi there", 10.0, 500.0);
        assert_eq!(lines, vec!["hi there".to_string()]);
    }
}
