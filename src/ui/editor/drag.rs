// SPDX-License-Identifier: MPL-2.0
//! Drag state for the caption overlay box.
//!
//! A drag begins on pointer-down over the overlay, capturing the offset
//! between the pointer and the overlay's top-left corner. Every move
//! repositions the overlay at `pointer - offset`, clamped so it can never
//! leave the displayed image. Pointer-up ends the drag unconditionally.

/// Margin used by the preset positions, in preview-space pixels.
pub const PRESET_MARGIN_PX: f32 = 20.0;

/// Quick-placement anchors for the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetPosition {
    Top,
    Center,
    Bottom,
}

impl PresetPosition {
    #[must_use]
    pub fn all() -> &'static [PresetPosition] {
        &[
            PresetPosition::Top,
            PresetPosition::Center,
            PresetPosition::Bottom,
        ]
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PresetPosition::Top => "Top",
            PresetPosition::Center => "Center",
            PresetPosition::Bottom => "Bottom",
        }
    }

    /// Resolves the anchor into a concrete overlay position: horizontally
    /// centered, vertically per the anchor, clamped into the image.
    #[must_use]
    pub fn resolve(&self, display: (f32, f32), overlay_size: (f32, f32)) -> (f32, f32) {
        let x = display.0 / 2.0 - overlay_size.0 / 2.0;
        let y = match self {
            PresetPosition::Top => PRESET_MARGIN_PX,
            PresetPosition::Center => display.1 / 2.0 - overlay_size.1 / 2.0,
            PresetPosition::Bottom => display.1 - overlay_size.1 - PRESET_MARGIN_PX,
        };
        clamp_position((x, y), display, overlay_size)
    }
}

/// Clamps an overlay position so the whole box stays inside the image.
#[must_use]
pub fn clamp_position(
    position: (f32, f32),
    display: (f32, f32),
    overlay_size: (f32, f32),
) -> (f32, f32) {
    let max_x = (display.0 - overlay_size.0).max(0.0);
    let max_y = (display.1 - overlay_size.1).max(0.0);
    (
        position.0.clamp(0.0, max_x),
        position.1.clamp(0.0, max_y),
    )
}

/// `Idle -> Dragging -> Idle` sub-machine for the overlay handle.
#[derive(Debug, Clone, Default)]
pub struct OverlayDragState {
    dragging: bool,
    /// Pointer position minus overlay top-left, captured at drag start.
    offset: (f32, f32),
}

impl OverlayDragState {
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// `Idle -> Dragging` on pointer-down over the overlay.
    pub fn begin(&mut self, pointer: (f32, f32), overlay_position: (f32, f32)) {
        self.dragging = true;
        self.offset = (pointer.0 - overlay_position.0, pointer.1 - overlay_position.1);
    }

    /// Computes the clamped overlay position for a pointer move.
    ///
    /// Returns `None` while idle (moves outside a drag reposition nothing).
    #[must_use]
    pub fn drag_to(
        &self,
        pointer: (f32, f32),
        display: (f32, f32),
        overlay_size: (f32, f32),
    ) -> Option<(f32, f32)> {
        if !self.dragging {
            return None;
        }
        let raw = (pointer.0 - self.offset.0, pointer.1 - self.offset.1);
        Some(clamp_position(raw, display, overlay_size))
    }

    /// `Dragging -> Idle`, unconditionally, wherever the pointer is.
    pub fn end(&mut self) {
        self.dragging = false;
        self.offset = (0.0, 0.0);
    }
}
