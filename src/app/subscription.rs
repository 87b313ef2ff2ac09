// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions: keyboard shortcuts and the notification tick.
//!
//! Keyboard shortcuts only fire when no focused widget captured the event,
//! so Ctrl+C inside the caption editor still copies text. The global
//! pointer-release route guarantees an overlay drag ends even when the
//! button is released outside the preview area.

use super::{App, Message, Screen};
use crate::ui::editor;
use iced::{event, keyboard, mouse, time, Subscription};
use std::time::Duration;

impl App {
    pub(crate) fn subscription(&self) -> Subscription<Message> {
        let events = create_event_subscription(self.screen);

        let ticks = if self.notifications.has_notifications() {
            time::every(Duration::from_millis(200)).map(Message::Tick)
        } else {
            Subscription::none()
        };

        Subscription::batch([events, ticks])
    }
}

/// Creates the native event subscription for the current screen.
fn create_event_subscription(screen: Screen) -> Subscription<Message> {
    match screen {
        Screen::Editor => event::listen_with(|event, status, _window| {
            // End an overlay drag wherever the button is released.
            if matches!(
                event,
                event::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left))
            ) {
                return Some(Message::Editor(editor::Message::PointerReleased));
            }
            keyboard_shortcut(&event, status)
        }),
        Screen::Gallery => {
            event::listen_with(|event, status, _window| keyboard_shortcut(&event, status))
        }
    }
}

/// Maps an unclaimed keyboard event to a shortcut message.
fn keyboard_shortcut(event: &event::Event, status: event::Status) -> Option<Message> {
    if status == event::Status::Captured {
        return None;
    }

    let event::Event::Keyboard(keyboard::Event::KeyPressed { key, modifiers, .. }) = event else {
        return None;
    };

    match key.as_ref() {
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::EscapePressed),
        keyboard::Key::Character("s") if modifiers.command() => Some(Message::DownloadShortcut),
        keyboard::Key::Character("c") if modifiers.command() => Some(Message::CopyShortcut),
        _ => None,
    }
}
