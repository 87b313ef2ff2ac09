// SPDX-License-Identifier: MPL-2.0
//! Gallery rendering: toolbar, tile grid, and load-more affordance.

use super::{Message, ProviderFilter, State};
use crate::media::ImageData;
use crate::providers::MemeRecord;
use iced::widget::{
    button, column, container, mouse_area, pick_list, row, scrollable, text, text_input, Column,
    Row,
};
use iced::{alignment, Element, Length, Theme};
use std::collections::HashMap;

/// Tiles per grid row.
const GRID_COLUMNS: usize = 3;

/// Tile edge length, in logical pixels.
const TILE_SIZE: f32 = 148.0;

/// One grid cell: an image URL, its caption, and whether to badge it as a
/// GIF source.
#[derive(Debug, Clone)]
pub struct Tile {
    pub url: String,
    pub title: String,
    pub gif_badge: bool,
}

impl From<&MemeRecord> for Tile {
    fn from(record: &MemeRecord) -> Self {
        Self {
            url: record.url.clone(),
            title: record.title.clone(),
            gif_badge: record.provider.serves_gifs(),
        }
    }
}

/// Renders a grid of clickable tiles with precomputed click messages.
///
/// Shared between the search gallery and the history tab.
pub fn tile_grid<'a, M: Clone + 'a>(
    tiles: Vec<(Tile, M)>,
    thumbnails: &HashMap<String, ImageData>,
) -> Element<'a, M> {
    let mut grid = Column::new().spacing(8);

    for chunk in tiles.chunks(GRID_COLUMNS) {
        let mut grid_row = Row::new().spacing(8);
        for (tile, message) in chunk {
            grid_row = grid_row.push(view_tile(tile, message.clone(), thumbnails.get(&tile.url)));
        }
        grid = grid.push(grid_row);
    }

    grid.into()
}

fn view_tile<'a, M: Clone + 'a>(
    tile: &Tile,
    message: M,
    thumbnail: Option<&ImageData>,
) -> Element<'a, M> {
    let preview: Element<'a, M> = match thumbnail {
        Some(data) => iced::widget::image(data.handle.clone())
            .width(Length::Fixed(TILE_SIZE))
            .height(Length::Fixed(TILE_SIZE - 24.0))
            .into(),
        None => container(text("\u{2026}").size(20))
            .width(Length::Fixed(TILE_SIZE))
            .height(Length::Fixed(TILE_SIZE - 24.0))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    let mut caption_row = Row::new().spacing(4).align_y(alignment::Vertical::Center);
    caption_row = caption_row.push(
        text(truncate_title(&tile.title))
            .size(11)
            .width(Length::Fill),
    );
    if tile.gif_badge {
        caption_row = caption_row.push(text("GIF").size(10));
    }

    let card = container(column![preview, caption_row].spacing(2))
        .padding(4)
        .style(|theme: &Theme| container::Style {
            background: Some(iced::Background::Color(
                theme.extended_palette().background.weak.color,
            )),
            border: iced::Border {
                radius: 6.0.into(),
                ..Default::default()
            },
            ..Default::default()
        });

    mouse_area(card).on_press(message).into()
}

fn truncate_title(title: &str) -> String {
    const MAX: usize = 22;
    if title.chars().count() <= MAX {
        title.to_string()
    } else {
        let truncated: String = title.chars().take(MAX).collect();
        format!("{truncated}\u{2026}")
    }
}

impl State {
    pub fn view<'a>(&'a self, thumbnails: &HashMap<String, ImageData>) -> Element<'a, Message> {
        let search_box = text_input("Search memes across all sources\u{2026}", self.query())
            .on_input(Message::QueryChanged)
            .on_submit(Message::SearchSubmitted)
            .padding(8)
            .width(Length::Fill);

        let filter_picker = pick_list(
            ProviderFilter::all(),
            Some(self.filter()),
            Message::FilterSelected,
        );

        let toolbar = row![search_box, filter_picker]
            .spacing(8)
            .align_y(alignment::Vertical::Center);

        let content: Element<'_, Message> = if self.is_loading() {
            centered_note("Loading memes\u{2026}")
        } else if self.is_empty_result() {
            centered_note("No memes found. Try a different search term.")
        } else {
            let tiles: Vec<(Tile, Message)> = self
                .visible_records()
                .into_iter()
                .map(|record| (Tile::from(record), Message::TileClicked(record.clone())))
                .collect();

            let mut body = column![tile_grid(tiles, thumbnails)].spacing(12);
            if self.has_more() {
                body = body.push(
                    container(
                        button(text("Load More").size(14))
                            .on_press(Message::LoadMore)
                            .padding(8),
                    )
                    .width(Length::Fill)
                    .align_x(alignment::Horizontal::Center),
                );
            }

            scrollable(body)
                .on_scroll(Message::Scrolled)
                .height(Length::Fill)
                .into()
        };

        column![toolbar, content].spacing(12).into()
    }
}

fn centered_note<'a, M: 'a>(note: &'a str) -> Element<'a, M> {
    container(text(note).size(14))
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}
