// SPDX-License-Identifier: MPL-2.0
//! Editor message/event types re-exported by the facade.

use super::drag::PresetPosition;
use super::Panel;
use crate::error::Error;
use crate::media::{FontFamily, Rgb};
use crate::ui::notifications::Notification;
use image_rs::DynamicImage;
use std::sync::Arc;

/// Messages emitted by the editor widgets.
#[derive(Debug, Clone)]
pub enum Message {
    /// Toggle the text or filter panel (opening one hides the other).
    PanelToggled(Panel),

    // Text panel
    TextChanged(String),
    /// Edit action from the multiline caption editor widget.
    CaptionEdited(iced::widget::text_editor::Action),
    FontSizeChanged(u32),
    FontFamilySelected(FontFamily),
    TextColorSelected(Rgb),
    StrokeColorSelected(Rgb),
    StrokeWidthChanged(u32),
    PresetSelected(PresetPosition),
    ApplyText,
    CancelText,

    // Overlay drag
    /// Pointer pressed on the overlay handle.
    OverlayGrabbed,
    /// Pointer moved over the preview area (preview-space coordinates).
    PointerMoved { x: f32, y: f32 },
    /// Pointer released anywhere.
    PointerReleased,

    // Filter panel
    BrightnessChanged(u32),
    ContrastChanged(u32),
    SaturationChanged(u32),
    BlurChanged(u32),
    ApplyFilters,
    ResetFilters,

    // Session
    /// Async image load finished; `generation` identifies the session that
    /// requested it so stale completions can be dropped.
    ImageLoaded {
        generation: u64,
        result: Result<Arc<DynamicImage>, Error>,
    },
    Download,
    CopyToClipboard,
    Close,
}

/// Events propagated to the parent application for side effects.
#[derive(Debug, Clone)]
pub enum Event {
    None,
    /// The session ended; the app should return to the gallery.
    Closed,
    /// Export the current baseline through the save dialog.
    DownloadRequested,
    /// Copy the current baseline to the system clipboard.
    CopyRequested,
    /// Show a toast.
    Notify(Notification),
}
