// SPDX-License-Identifier: MPL-2.0
//! Root view: tab navigation, the active screen, and the toast overlay.

use super::{App, Message, Screen, Tab};
use crate::ui::gallery::{tile_grid, Tile};
use crate::ui::notifications;
use iced::widget::{button, column, container, row, scrollable, text, Row, Stack};
use iced::{alignment, Element, Length, Theme};

impl App {
    pub(crate) fn view(&self) -> Element<'_, Message> {
        let screen: Element<'_, Message> = match self.screen {
            Screen::Gallery => self.view_gallery_screen(),
            Screen::Editor => match &self.editor {
                Some(editor) => editor.view().map(Message::Editor),
                None => self.view_gallery_screen(),
            },
        };

        let toasts = notifications::view_overlay(&self.notifications).map(Message::Notification);

        Stack::new().push(screen).push(toasts).into()
    }

    fn view_gallery_screen(&self) -> Element<'_, Message> {
        let tabs = Row::with_children(
            Tab::all()
                .iter()
                .map(|tab| {
                    let active = self.tab == *tab;
                    button(text(tab.label()).size(14))
                        .on_press(Message::TabSelected(*tab))
                        .padding([6, 12])
                        .style(move |theme: &Theme, status| tab_button_style(theme, status, active))
                        .into()
                })
                .collect::<Vec<_>>(),
        )
        .spacing(4);

        let actions = row![
            button(text("Upload").size(13))
                .on_press(Message::UploadRequested)
                .padding(6),
            button(text(if self.theme_mode.is_dark() { "\u{2600}" } else { "\u{263D}" }).size(13))
                .on_press(Message::ThemeToggled)
                .padding(6),
            button(text("Clear data").size(13))
                .on_press(Message::ClearStoredData)
                .padding(6),
        ]
        .spacing(4);

        let header = row![tabs, iced::widget::Space::new().width(Length::Fill), actions]
            .align_y(alignment::Vertical::Center);

        let content: Element<'_, Message> = match self.tab {
            Tab::Search => self.gallery.view(&self.thumbnails).map(Message::Gallery),
            Tab::Uploads => self.view_uploads_tab(),
            Tab::History => self.view_history_tab(),
        };

        container(column![header, content].spacing(12))
            .padding(16)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn view_uploads_tab(&self) -> Element<'_, Message> {
        if self.uploads.is_empty() {
            return empty_state("No uploads yet. Use the Upload button to open local images.");
        }

        let tiles: Vec<(Tile, Message)> = self
            .uploads
            .iter()
            .map(|path| {
                let key = path.display().to_string();
                let title = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| key.clone());
                (
                    Tile {
                        url: key,
                        title,
                        gif_badge: false,
                    },
                    Message::UploadOpened(path.clone()),
                )
            })
            .collect();

        scrollable(tile_grid(tiles, &self.thumbnails))
            .height(Length::Fill)
            .into()
    }

    fn view_history_tab(&self) -> Element<'_, Message> {
        if self.history.is_empty() {
            return empty_state("No history yet. Your recently viewed memes will appear here.");
        }

        let tiles: Vec<(Tile, Message)> = self
            .history
            .entries()
            .iter()
            .take(50)
            .map(|entry| {
                (
                    Tile {
                        url: entry.url.clone(),
                        title: entry.name.clone(),
                        gif_badge: false,
                    },
                    Message::HistoryOpened {
                        url: entry.url.clone(),
                        name: entry.name.clone(),
                    },
                )
            })
            .collect();

        scrollable(tile_grid(tiles, &self.thumbnails))
            .height(Length::Fill)
            .into()
    }
}

fn empty_state<'a>(note: &'a str) -> Element<'a, Message> {
    container(text(note).size(14))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn tab_button_style(theme: &Theme, status: button::Status, active: bool) -> button::Style {
    let palette = theme.extended_palette();
    let background = if active {
        palette.primary.base.color
    } else {
        match status {
            button::Status::Hovered => palette.background.strong.color,
            _ => palette.background.weak.color,
        }
    };
    let text_color = if active {
        palette.primary.base.text
    } else {
        palette.background.base.text
    };

    button::Style {
        background: Some(iced::Background::Color(background)),
        text_color,
        border: iced::Border {
            radius: 6.0.into(),
            ..Default::default()
        },
        ..button::Style::default()
    }
}
