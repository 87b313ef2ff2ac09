// SPDX-License-Identifier: MPL-2.0
//! Annotation editor: one session per opened image.
//!
//! The module follows a "state down, messages up" pattern: the app owns a
//! `State`, feeds it [`Message`]s, and reacts to the [`Event`]s it returns.
//! A session holds the natural-resolution baseline image plus the live
//! caption overlay and filter chain; commits flatten onto the baseline and
//! are not undoable within the session.

pub mod drag;
mod messages;
mod view;

pub use drag::{clamp_position, OverlayDragState, PresetPosition};
pub use messages::{Event, Message};

use crate::media::{self, annotate, FilterChain, ImageData, TextOverlaySpec};
use crate::ui::notifications::Notification;
use image_rs::DynamicImage;
use std::path::PathBuf;
use std::sync::Arc;

/// Maximum preview box, in logical pixels. The natural image is fitted into
/// this box (never upscaled), which makes the preview-space geometry
/// deterministic.
pub const PREVIEW_MAX_WIDTH: f32 = 480.0;
pub const PREVIEW_MAX_HEIGHT: f32 = 360.0;

/// Side panels; opening one hides the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Text,
    Filters,
}

/// Where the session's image came from.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A provider record selected in the gallery.
    Remote { url: String, title: String },
    /// A local file picked through the upload flow.
    Local { path: PathBuf },
}

impl ImageSource {
    /// Display title for the toolbar.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            ImageSource::Remote { title, .. } => title.clone(),
            ImageSource::Local { path } => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "Untitled".to_string()),
        }
    }
}

/// Local UI state for one editor session.
pub struct State {
    source: ImageSource,
    /// Session counter stamped by the app; async completions carrying an
    /// older generation are dropped.
    generation: u64,
    /// Natural-resolution baseline; every commit replaces it.
    base: Option<Arc<DynamicImage>>,
    /// Display handle for the baseline.
    display_image: Option<ImageData>,
    /// Non-destructive preview of the live filter chain, preview-sized.
    filter_preview: Option<ImageData>,
    panel: Option<Panel>,
    overlay: Option<TextOverlaySpec>,
    drag: OverlayDragState,
    filters: FilterChain,
    /// Last pointer position over the preview, preview-space.
    cursor: (f32, f32),
    /// Widget state for the multiline caption input.
    caption: iced::widget::text_editor::Content,
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("State")
            .field("source", &self.source)
            .field("generation", &self.generation)
            .field("panel", &self.panel)
            .field("loaded", &self.base.is_some())
            .finish_non_exhaustive()
    }
}

impl State {
    /// Opens a fresh session. Filters reset to defaults and no overlay
    /// exists until the text panel opens.
    #[must_use]
    pub fn new(source: ImageSource, generation: u64) -> Self {
        Self {
            source,
            generation,
            base: None,
            display_image: None,
            filter_preview: None,
            panel: None,
            overlay: None,
            drag: OverlayDragState::default(),
            filters: FilterChain::default(),
            cursor: (0.0, 0.0),
            caption: iced::widget::text_editor::Content::new(),
        }
    }

    /// Update the state and emit an [`Event`] for the parent when needed.
    pub fn update(&mut self, message: Message) -> Event {
        match message {
            Message::PanelToggled(panel) => {
                self.toggle_panel(panel);
                Event::None
            }
            Message::TextChanged(content) => {
                self.caption = iced::widget::text_editor::Content::with_text(&content);
                if let Some(overlay) = &mut self.overlay {
                    overlay.content = content;
                }
                Event::None
            }
            Message::CaptionEdited(action) => {
                self.caption.perform(action);
                if let Some(overlay) = &mut self.overlay {
                    overlay.content = self.caption.text().trim_end_matches('\n').to_string();
                }
                Event::None
            }
            Message::FontSizeChanged(size) => {
                if let Some(overlay) = &mut self.overlay {
                    overlay.font_size_px = size.clamp(8, 120);
                }
                Event::None
            }
            Message::FontFamilySelected(family) => {
                if let Some(overlay) = &mut self.overlay {
                    overlay.font_family = family;
                }
                Event::None
            }
            Message::TextColorSelected(color) => {
                if let Some(overlay) = &mut self.overlay {
                    overlay.text_color = color;
                }
                Event::None
            }
            Message::StrokeColorSelected(color) => {
                if let Some(overlay) = &mut self.overlay {
                    overlay.stroke_color = color;
                }
                Event::None
            }
            Message::StrokeWidthChanged(width) => {
                if let Some(overlay) = &mut self.overlay {
                    overlay.stroke_width_px = width.min(10);
                }
                Event::None
            }
            Message::PresetSelected(preset) => {
                self.apply_preset(preset);
                Event::None
            }
            Message::ApplyText => self.apply_text(),
            Message::CancelText => {
                self.clear_text_editing();
                self.panel = None;
                Event::None
            }
            Message::OverlayGrabbed => {
                self.begin_drag();
                Event::None
            }
            Message::PointerMoved { x, y } => {
                self.cursor = (x, y);
                self.continue_drag();
                Event::None
            }
            Message::PointerReleased => {
                self.drag.end();
                Event::None
            }
            Message::BrightnessChanged(value) => {
                self.filters.brightness = media::filter::FilterPercent::new(value);
                self.refresh_filter_preview();
                Event::None
            }
            Message::ContrastChanged(value) => {
                self.filters.contrast = media::filter::FilterPercent::new(value);
                self.refresh_filter_preview();
                Event::None
            }
            Message::SaturationChanged(value) => {
                self.filters.saturation = media::filter::FilterPercent::new(value);
                self.refresh_filter_preview();
                Event::None
            }
            Message::BlurChanged(value) => {
                self.filters.blur = media::filter::BlurRadius::new(value);
                self.refresh_filter_preview();
                Event::None
            }
            Message::ApplyFilters => self.apply_filters(),
            Message::ResetFilters => {
                self.filters.reset();
                self.filter_preview = None;
                Event::None
            }
            Message::ImageLoaded { generation, result } => {
                self.on_image_loaded(generation, result)
            }
            Message::Download => Event::DownloadRequested,
            Message::CopyToClipboard => Event::CopyRequested,
            Message::Close => Event::Closed,
        }
    }

    // ------------------------------------------------------------------
    // Session accessors
    // ------------------------------------------------------------------

    #[must_use]
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The current baseline, if loaded.
    #[must_use]
    pub fn base_image(&self) -> Option<&Arc<DynamicImage>> {
        self.base.as_ref()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.base.is_none()
    }

    #[must_use]
    pub fn active_panel(&self) -> Option<Panel> {
        self.panel
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&TextOverlaySpec> {
        self.overlay.as_ref()
    }

    #[must_use]
    pub fn filters(&self) -> &FilterChain {
        &self.filters
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// The image shown in the preview: the live filter preview when the
    /// chain is non-neutral, otherwise the baseline.
    #[must_use]
    pub fn preview_image(&self) -> Option<&ImageData> {
        self.filter_preview.as_ref().or(self.display_image.as_ref())
    }

    /// Dimensions of the preview, fitting the natural size into the preview
    /// box without upscaling.
    #[must_use]
    pub fn display_size(&self) -> (f32, f32) {
        let Some(base) = &self.base else {
            return (PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT);
        };
        fit_into_box(
            (base.width(), base.height()),
            (PREVIEW_MAX_WIDTH, PREVIEW_MAX_HEIGHT),
        )
    }

    /// Estimated size of the overlay box in preview space, derived from the
    /// caption's line count, longest line, and font size.
    #[must_use]
    pub fn overlay_size(&self) -> (f32, f32) {
        let Some(overlay) = &self.overlay else {
            return (0.0, 0.0);
        };
        overlay_box_size(overlay)
    }

    // ------------------------------------------------------------------
    // Panel + overlay handling
    // ------------------------------------------------------------------

    fn toggle_panel(&mut self, panel: Panel) {
        if self.panel == Some(panel) {
            // Toggling the text panel off discards the overlay draft.
            if panel == Panel::Text {
                self.clear_text_editing();
            }
            self.panel = None;
            return;
        }

        self.panel = Some(panel);
        if panel == Panel::Text && self.overlay.is_none() {
            let mut overlay = TextOverlaySpec::default();
            overlay.position = PresetPosition::Bottom
                .resolve(self.display_size(), overlay_box_size(&overlay));
            self.overlay = Some(overlay);
        }
    }

    fn apply_preset(&mut self, preset: PresetPosition) {
        // Presets only make sense while the drag machine is idle.
        if self.drag.is_dragging() {
            return;
        }
        let display = self.display_size();
        let size = self.overlay_size();
        if let Some(overlay) = &mut self.overlay {
            overlay.position = preset.resolve(display, size);
        }
    }

    /// Discards the overlay draft and resets the caption widget state.
    fn clear_text_editing(&mut self) {
        self.overlay = None;
        self.drag.end();
        self.caption = iced::widget::text_editor::Content::new();
    }

    fn begin_drag(&mut self) {
        if self.panel != Some(Panel::Text) {
            return;
        }
        let Some(overlay) = &self.overlay else {
            return;
        };
        if overlay.content.is_empty() {
            return;
        }
        self.drag.begin(self.cursor, overlay.position);
    }

    fn continue_drag(&mut self) {
        let display = self.display_size();
        let size = self.overlay_size();
        if let Some(position) = self.drag.drag_to(self.cursor, display, size) {
            if let Some(overlay) = &mut self.overlay {
                overlay.position = position;
            }
        }
    }

    // ------------------------------------------------------------------
    // Commits
    // ------------------------------------------------------------------

    /// Burns the caption (and the live filter chain) into the baseline at
    /// natural resolution.
    fn apply_text(&mut self) -> Event {
        let Some(base) = self.base.clone() else {
            return Event::None;
        };
        let Some(overlay) = self.overlay.clone() else {
            return Event::None;
        };

        match annotate::apply_text(&base, &overlay, &self.filters, self.display_size()) {
            Ok(flattened) => {
                self.replace_base(flattened);
                self.clear_text_editing();
                self.panel = None;
                Event::Notify(Notification::success("Text applied"))
            }
            Err(error) => Event::Notify(Notification::warning(error.user_message())),
        }
    }

    /// Rasterizes the live filter chain into the baseline and resets the
    /// sliders; the displayed image carries no live effect afterwards.
    fn apply_filters(&mut self) -> Event {
        if self.filters.is_identity() {
            return Event::None;
        }
        let Some(base) = self.base.clone() else {
            return Event::None;
        };

        let flattened = self.filters.apply(&base);
        self.replace_base(flattened);
        self.filters.reset();
        self.filter_preview = None;
        Event::Notify(Notification::success("Filters applied"))
    }

    fn on_image_loaded(
        &mut self,
        generation: u64,
        result: Result<Arc<DynamicImage>, crate::error::Error>,
    ) -> Event {
        // A completion from a previous session: this session never asked
        // for it, so it must not mutate anything.
        if generation != self.generation {
            return Event::None;
        }

        match result {
            Ok(image) => {
                self.base = Some(Arc::clone(&image));
                self.display_image = Some(media::dynamic_to_image_data(&image));
                self.filter_preview = None;
                Event::None
            }
            Err(error) => Event::Notify(Notification::error(error.user_message())),
        }
    }

    fn replace_base(&mut self, image: DynamicImage) {
        self.display_image = Some(media::dynamic_to_image_data(&image));
        self.base = Some(Arc::new(image));
        self.refresh_filter_preview();
    }

    /// Recomputes the non-destructive preview for the live chain by
    /// filtering a preview-sized copy of the baseline.
    fn refresh_filter_preview(&mut self) {
        if self.filters.is_identity() {
            self.filter_preview = None;
            return;
        }
        let Some(base) = &self.base else {
            self.filter_preview = None;
            return;
        };

        let (width, height) = self.display_size();
        let thumb = base.resize_exact(
            width.round().max(1.0) as u32,
            height.round().max(1.0) as u32,
            image_rs::imageops::FilterType::Triangle,
        );
        let filtered = self.filters.apply(&thumb);
        self.filter_preview = Some(media::dynamic_to_image_data(&filtered));
    }
}

/// Fits `natural` into `bounds`, preserving aspect ratio, never upscaling.
#[must_use]
pub fn fit_into_box(natural: (u32, u32), bounds: (f32, f32)) -> (f32, f32) {
    let (width, height) = (natural.0.max(1) as f32, natural.1.max(1) as f32);
    let scale = (bounds.0 / width).min(bounds.1 / height).min(1.0);
    (width * scale, height * scale)
}

/// Estimates the overlay box from the caption's text metrics.
fn overlay_box_size(overlay: &TextOverlaySpec) -> (f32, f32) {
    let font = overlay.font_size_px as f32;
    let lines: Vec<&str> = overlay.content.split('\n').collect();
    let longest = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);

    let width = (longest as f32 * font * 0.6 + 20.0).max(60.0);
    let height = (lines.len() as f32 * font * annotate::LINE_HEIGHT_FACTOR).max(font * 1.2);
    (width, height)
}

#[cfg(test)]
mod tests;
