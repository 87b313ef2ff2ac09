// SPDX-License-Identifier: MPL-2.0
//! Editor session state machine tests.

use super::*;
use crate::error::Error;
use crate::ui::notifications::Severity;
use image_rs::{DynamicImage, Rgba, RgbaImage};
use std::sync::Arc;

fn test_image(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        Rgba([90, 120, 150, 255]),
    ))
}

fn new_session(generation: u64) -> State {
    State::new(
        ImageSource::Remote {
            url: "https://example.com/meme.png".to_string(),
            title: "meme".to_string(),
        },
        generation,
    )
}

/// Session with a 960x720 baseline, displayed at 480x360 (scale 2).
fn loaded_session() -> State {
    let mut state = new_session(1);
    let event = state.update(Message::ImageLoaded {
        generation: 1,
        result: Ok(Arc::new(test_image(960, 720))),
    });
    assert!(matches!(event, Event::None));
    state
}

#[test]
fn new_session_starts_clean() {
    let state = new_session(1);
    assert!(state.is_loading());
    assert!(state.filters().is_identity());
    assert!(state.overlay().is_none());
    assert!(state.active_panel().is_none());
}

#[test]
fn stale_image_load_is_silently_dropped() {
    let mut state = new_session(2);
    let event = state.update(Message::ImageLoaded {
        generation: 1,
        result: Ok(Arc::new(test_image(10, 10))),
    });

    assert!(matches!(event, Event::None));
    assert!(state.is_loading(), "stale completion must not mutate state");
}

#[test]
fn failed_image_load_notifies_and_keeps_prior_state() {
    let mut state = new_session(1);
    let event = state.update(Message::ImageLoaded {
        generation: 1,
        result: Err(Error::Decode("bad bytes".to_string())),
    });

    match event {
        Event::Notify(notification) => assert_eq!(notification.severity(), Severity::Error),
        other => panic!("expected Notify, got {other:?}"),
    }
    assert!(state.is_loading());
}

#[test]
fn display_size_fits_without_upscaling() {
    let state = loaded_session();
    assert_eq!(state.display_size(), (480.0, 360.0));

    let mut small = new_session(1);
    small.update(Message::ImageLoaded {
        generation: 1,
        result: Ok(Arc::new(test_image(100, 50))),
    });
    assert_eq!(small.display_size(), (100.0, 50.0));
}

#[test]
fn opening_text_panel_creates_overlay_at_the_bottom() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));

    assert_eq!(state.active_panel(), Some(Panel::Text));
    let overlay = state.overlay().expect("overlay should exist");
    let (display_w, display_h) = state.display_size();
    let (_, overlay_h) = state.overlay_size();
    assert!(overlay.position.0 > 0.0 && overlay.position.0 < display_w);
    assert!((overlay.position.1 - (display_h - overlay_h - drag::PRESET_MARGIN_PX)).abs() < 0.01);
}

#[test]
fn panels_are_mutually_exclusive() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::PanelToggled(Panel::Filters));
    assert_eq!(state.active_panel(), Some(Panel::Filters));

    state.update(Message::PanelToggled(Panel::Text));
    assert_eq!(state.active_panel(), Some(Panel::Text));
}

#[test]
fn toggling_text_panel_off_discards_the_draft() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::TextChanged("draft".to_string()));

    state.update(Message::PanelToggled(Panel::Text));
    assert!(state.active_panel().is_none());
    assert!(state.overlay().is_none());
}

#[test]
fn cancel_discards_overlay_and_closes_panel() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::TextChanged("draft".to_string()));

    state.update(Message::CancelText);
    assert!(state.overlay().is_none());
    assert!(state.active_panel().is_none());
}

#[test]
fn drag_clamps_to_the_right_edge() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::TextChanged("hi".to_string()));

    let start = state.overlay().unwrap().position;
    // Pointer down inside the overlay box, then a wild move to the right.
    state.update(Message::PointerMoved {
        x: start.0 + 5.0,
        y: start.1 + 5.0,
    });
    state.update(Message::OverlayGrabbed);
    assert!(state.is_dragging());

    state.update(Message::PointerMoved {
        x: 10_000.0,
        y: start.1 + 5.0,
    });

    let (display_w, _) = state.display_size();
    let (overlay_w, _) = state.overlay_size();
    let position = state.overlay().unwrap().position;
    assert_eq!(position.0, display_w - overlay_w);

    state.update(Message::PointerReleased);
    assert!(!state.is_dragging());
}

#[test]
fn drag_requires_the_text_panel() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::TextChanged("hi".to_string()));
    state.update(Message::PanelToggled(Panel::Filters));

    state.update(Message::PointerMoved { x: 5.0, y: 5.0 });
    state.update(Message::OverlayGrabbed);
    assert!(!state.is_dragging());
}

#[test]
fn presets_are_ignored_while_dragging() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::TextChanged("hi".to_string()));

    let start = state.overlay().unwrap().position;
    state.update(Message::PointerMoved {
        x: start.0 + 1.0,
        y: start.1 + 1.0,
    });
    state.update(Message::OverlayGrabbed);

    let before = state.overlay().unwrap().position;
    state.update(Message::PresetSelected(PresetPosition::Top));
    assert_eq!(state.overlay().unwrap().position, before);
}

#[test]
fn preset_repositions_while_idle() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::TextChanged("hi".to_string()));

    state.update(Message::PresetSelected(PresetPosition::Top));
    let position = state.overlay().unwrap().position;
    assert_eq!(position.1, drag::PRESET_MARGIN_PX);
}

#[test]
fn whitespace_caption_is_rejected_without_mutation() {
    let mut state = loaded_session();
    let before = Arc::clone(state.base_image().unwrap());

    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::TextChanged("   \n ".to_string()));
    let event = state.update(Message::ApplyText);

    match event {
        Event::Notify(notification) => {
            assert_eq!(notification.severity(), Severity::Warning);
        }
        other => panic!("expected Notify, got {other:?}"),
    }
    assert!(Arc::ptr_eq(&before, state.base_image().unwrap()));
    assert!(state.overlay().is_some(), "draft survives the rejection");
}

#[test]
fn apply_text_flattens_at_natural_resolution() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::TextChanged("TOP TEXT".to_string()));
    // Filters stay live across a text commit.
    state.update(Message::BrightnessChanged(150));

    let event = state.update(Message::ApplyText);
    match event {
        Event::Notify(notification) => assert_eq!(notification.severity(), Severity::Success),
        other => panic!("expected Notify, got {other:?}"),
    }

    let base = state.base_image().unwrap();
    assert_eq!((base.width(), base.height()), (960, 720));
    assert!(state.overlay().is_none());
    assert!(state.active_panel().is_none());
    assert_eq!(state.filters().brightness.value(), 150);
}

#[test]
fn filter_sliders_build_a_nondestructive_preview() {
    let mut state = loaded_session();
    let baseline = Arc::clone(state.base_image().unwrap());

    state.update(Message::BrightnessChanged(180));
    assert!(!state.filters().is_identity());
    assert!(Arc::ptr_eq(&baseline, state.base_image().unwrap()));

    state.update(Message::ResetFilters);
    assert!(state.filters().is_identity());
}

#[test]
fn apply_filters_bakes_pixels_and_resets_the_chain() {
    let mut state = loaded_session();
    state.update(Message::BrightnessChanged(0));

    let event = state.update(Message::ApplyFilters);
    assert!(matches!(event, Event::Notify(_)));

    // Fully baked: the chain is neutral again and the committed pixels are
    // black, so no live effect remains on the displayed image.
    assert!(state.filters().is_identity());
    let base = state.base_image().unwrap();
    assert_eq!(&base.to_rgba8().get_pixel(0, 0).0[0..3], &[0, 0, 0]);
}

#[test]
fn applying_identity_filters_is_a_no_op() {
    let mut state = loaded_session();
    let before = Arc::clone(state.base_image().unwrap());

    let event = state.update(Message::ApplyFilters);
    assert!(matches!(event, Event::None));
    assert!(Arc::ptr_eq(&before, state.base_image().unwrap()));
}

#[test]
fn close_emits_closed_event() {
    let mut state = loaded_session();
    assert!(matches!(state.update(Message::Close), Event::Closed));
}

#[test]
fn export_messages_forward_as_events() {
    let mut state = loaded_session();
    assert!(matches!(
        state.update(Message::Download),
        Event::DownloadRequested
    ));
    assert!(matches!(
        state.update(Message::CopyToClipboard),
        Event::CopyRequested
    ));
}

#[test]
fn font_size_is_clamped() {
    let mut state = loaded_session();
    state.update(Message::PanelToggled(Panel::Text));
    state.update(Message::FontSizeChanged(500));
    assert_eq!(state.overlay().unwrap().font_size_px, 120);
}
