// SPDX-License-Identifier: MPL-2.0
//! Toast rendering: severity-accented cards stacked in the bottom-right
//! corner, each with a dismiss button.

use super::manager::{Manager, Message};
use super::notification::Notification;
use iced::widget::{button, container, text, Column, Container, Row};
use iced::{alignment, Color, Element, Length, Theme};

const TOAST_WIDTH: f32 = 320.0;

/// Renders a single toast notification.
fn view_toast(notification: &Notification) -> Element<'_, Message> {
    let accent_color = notification.severity().color();

    let message_widget = text(notification.message())
        .size(14)
        .style(|theme: &Theme| text::Style {
            color: Some(theme.palette().text),
        });

    let dismiss_button = button(text("\u{2715}").size(12))
        .on_press(Message::Dismiss(notification.id()))
        .padding(4)
        .style(dismiss_button_style);

    let content = Row::new()
        .spacing(8)
        .align_y(alignment::Vertical::Center)
        .push(
            Container::new(message_widget)
                .width(Length::Fill)
                .align_x(alignment::Horizontal::Left),
        )
        .push(dismiss_button);

    Container::new(content)
        .width(Length::Fixed(TOAST_WIDTH))
        .padding(10)
        .style(move |theme: &Theme| toast_container_style(theme, accent_color))
        .into()
}

/// Renders the toast overlay with all visible notifications, stacked
/// bottom-right. Collapses to nothing when there is nothing to show.
pub fn view_overlay(manager: &Manager) -> Element<'_, Message> {
    let toasts: Vec<Element<'_, Message>> = manager.visible().map(view_toast).collect();

    if toasts.is_empty() {
        return Container::new(text(""))
            .width(Length::Shrink)
            .height(Length::Shrink)
            .into();
    }

    let toast_column = Column::with_children(toasts)
        .spacing(6)
        .align_x(alignment::Horizontal::Right);

    Container::new(toast_column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Right)
        .align_y(alignment::Vertical::Bottom)
        .padding(16)
        .into()
}

fn toast_container_style(theme: &Theme, accent_color: Color) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(
            theme.extended_palette().background.base.color,
        )),
        border: iced::Border {
            color: accent_color,
            width: 2.0,
            radius: 6.0.into(),
        },
        text_color: Some(theme.palette().text),
        ..Default::default()
    }
}

fn dismiss_button_style(theme: &Theme, status: button::Status) -> button::Style {
    let base = theme.extended_palette().background.base;
    let background = match status {
        button::Status::Hovered | button::Status::Pressed => Some(iced::Background::Color(Color {
            a: 0.15,
            ..base.text
        })),
        button::Status::Active | button::Status::Disabled => None,
    };

    button::Style {
        background,
        text_color: base.text,
        border: iced::Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..button::Style::default()
    }
}
