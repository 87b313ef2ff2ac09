// SPDX-License-Identifier: MPL-2.0
//! Editor layout: toolbar, live preview with the draggable caption overlay,
//! and the text/filter side panels.

use super::drag::PresetPosition;
use super::{Message, Panel, State};
use crate::media::{FontFamily, Rgb};
use iced::widget::{
    button, column, container, mouse_area, pick_list, row, slider, text, text_editor, Column, Row,
    Space, Stack,
};
use iced::{alignment, Color, Element, Length, Padding, Theme};

/// Swatches offered for fill and stroke colors.
const COLOR_SWATCHES: [Rgb; 6] = [
    Rgb::WHITE,
    Rgb::BLACK,
    Rgb { r: 230, g: 57, b: 70 },
    Rgb {
        r: 255,
        g: 209,
        b: 102,
    },
    Rgb {
        r: 17,
        g: 138,
        b: 178,
    },
    Rgb { r: 6, g: 214, b: 160 },
];

impl State {
    pub fn view(&self) -> Element<'_, Message> {
        let toolbar = self.view_toolbar();
        let preview = self.view_preview();
        let panel: Element<'_, Message> = match self.active_panel() {
            Some(Panel::Text) => self.view_text_panel(),
            Some(Panel::Filters) => self.view_filter_panel(),
            None => Space::new().into(),
        };

        container(
            column![toolbar, preview, panel]
                .spacing(12)
                .align_x(alignment::Horizontal::Center),
        )
        .width(Length::Fill)
        .padding(16)
        .into()
    }

    fn view_toolbar(&self) -> Element<'_, Message> {
        let title = text(self.source().title()).size(16).width(Length::Fill);

        let panel_button = |label: &'static str, panel: Panel| {
            let active = self.active_panel() == Some(panel);
            button(text(label).size(14))
                .on_press(Message::PanelToggled(panel))
                .padding(8)
                .style(move |theme: &Theme, status| toggle_button_style(theme, status, active))
        };

        row![
            title,
            panel_button("Add Text", Panel::Text),
            panel_button("Filters", Panel::Filters),
            button(text("Download").size(14))
                .on_press(Message::Download)
                .padding(8),
            button(text("Copy").size(14))
                .on_press(Message::CopyToClipboard)
                .padding(8),
            button(text("\u{2715}").size(14))
                .on_press(Message::Close)
                .padding(8),
        ]
        .spacing(8)
        .align_y(alignment::Vertical::Center)
        .into()
    }

    fn view_preview(&self) -> Element<'_, Message> {
        let (display_w, display_h) = self.display_size();

        let Some(image_data) = self.preview_image() else {
            return container(text("Loading image\u{2026}").size(14))
                .width(Length::Fixed(display_w))
                .height(Length::Fixed(display_h))
                .align_x(alignment::Horizontal::Center)
                .align_y(alignment::Vertical::Center)
                .into();
        };

        let image_widget = iced::widget::image(image_data.handle.clone())
            .width(Length::Fixed(display_w))
            .height(Length::Fixed(display_h));

        let mut layers = Stack::new().push(image_widget);

        if let Some(overlay) = self.overlay() {
            if !overlay.content.is_empty() {
                let (x, y) = overlay.position;
                let dragging = self.is_dragging();
                let fill = overlay.text_color;

                let caption = text(overlay.content.clone())
                    .size(overlay.font_size_px as f32)
                    .font(iced::Font::with_name(overlay.font_family.css_name()))
                    .style(move |_theme: &Theme| text::Style {
                        color: Some(rgb_to_color(fill)),
                    });

                let overlay_box = mouse_area(
                    container(caption)
                        .padding(4)
                        .style(move |_theme: &Theme| overlay_box_style(dragging)),
                )
                .on_press(Message::OverlayGrabbed);

                layers = layers.push(
                    container(overlay_box)
                        .padding(Padding {
                            top: y,
                            left: x,
                            ..Padding::ZERO
                        })
                        .align_x(alignment::Horizontal::Left)
                        .align_y(alignment::Vertical::Top),
                );
            }
        }

        mouse_area(layers)
            .on_move(|point| Message::PointerMoved {
                x: point.x,
                y: point.y,
            })
            .on_release(Message::PointerReleased)
            .into()
    }

    fn view_text_panel(&self) -> Element<'_, Message> {
        let Some(overlay) = self.overlay() else {
            return Space::new().into();
        };

        let caption_input = text_editor(&self.caption)
            .placeholder("Type your caption\u{2026}")
            .on_action(Message::CaptionEdited)
            .height(Length::Fixed(72.0));

        let font_size_section = column![
            text(format!("Font size: {}px", overlay.font_size_px)).size(13),
            slider(8..=120u32, overlay.font_size_px, Message::FontSizeChanged).step(1u32),
        ]
        .spacing(4);

        let stroke_width_section = column![
            text(format!("Outline width: {}px", overlay.stroke_width_px)).size(13),
            slider(0..=10u32, overlay.stroke_width_px, Message::StrokeWidthChanged).step(1u32),
        ]
        .spacing(4);

        let font_picker = pick_list(
            FontFamily::all(),
            Some(overlay.font_family),
            Message::FontFamilySelected,
        )
        .width(Length::Fill);

        let text_swatches = swatch_row(overlay.text_color, Message::TextColorSelected);
        let stroke_swatches = swatch_row(overlay.stroke_color, Message::StrokeColorSelected);

        let presets = Row::with_children(
            PresetPosition::all()
                .iter()
                .map(|preset| {
                    button(text(preset.label()).size(13))
                        .on_press(Message::PresetSelected(*preset))
                        .padding(6)
                        .into()
                })
                .collect::<Vec<_>>(),
        )
        .spacing(6);

        let actions = row![
            button(text("Cancel").size(14))
                .on_press(Message::CancelText)
                .padding(8)
                .width(Length::Fill),
            button(text("Apply Text").size(14))
                .on_press(Message::ApplyText)
                .padding(8)
                .width(Length::Fill),
        ]
        .spacing(8);

        panel_container(
            column![
                caption_input,
                font_picker,
                font_size_section,
                row![text("Text").size(13), text_swatches].spacing(8),
                row![text("Outline").size(13), stroke_swatches].spacing(8),
                stroke_width_section,
                row![text("Position").size(13), presets].spacing(8),
                actions,
            ]
            .spacing(10),
        )
    }

    fn view_filter_panel(&self) -> Element<'_, Message> {
        let filters = self.filters();

        let percent_slider = |label: &'static str, value: u32, message: fn(u32) -> Message| {
            column![
                text(format!("{label}: {value}%")).size(13),
                slider(0..=200u32, value, message).step(1u32),
            ]
            .spacing(4)
        };

        let blur_section = column![
            text(format!("Blur: {}px", filters.blur.value())).size(13),
            slider(0..=20u32, filters.blur.value(), Message::BlurChanged).step(1u32),
        ]
        .spacing(4);

        let actions = row![
            button(text("Reset").size(14))
                .on_press(Message::ResetFilters)
                .padding(8)
                .width(Length::Fill),
            button(text("Apply Filters").size(14))
                .on_press(Message::ApplyFilters)
                .padding(8)
                .width(Length::Fill),
        ]
        .spacing(8);

        panel_container(
            column![
                percent_slider("Brightness", filters.brightness.value(), Message::BrightnessChanged),
                percent_slider("Contrast", filters.contrast.value(), Message::ContrastChanged),
                percent_slider(
                    "Saturation",
                    filters.saturation.value(),
                    Message::SaturationChanged
                ),
                blur_section,
                actions,
            ]
            .spacing(10),
        )
    }
}

fn panel_container(content: Column<'_, Message>) -> Element<'_, Message> {
    container(content)
        .padding(12)
        .width(Length::Fixed(super::PREVIEW_MAX_WIDTH))
        .style(|theme: &Theme| container::Style {
            background: Some(iced::Background::Color(
                theme.extended_palette().background.weak.color,
            )),
            border: iced::Border {
                radius: 8.0.into(),
                ..Default::default()
            },
            ..Default::default()
        })
        .into()
}

fn swatch_row(selected: Rgb, on_select: fn(Rgb) -> Message) -> Element<'static, Message> {
    Row::with_children(
        COLOR_SWATCHES
            .iter()
            .map(|&color| {
                let is_selected = color == selected;
                button(Space::new().width(16.0).height(16.0))
                    .on_press(on_select(color))
                    .padding(2)
                    .style(move |theme: &Theme, _status| swatch_style(theme, color, is_selected))
                    .into()
            })
            .collect::<Vec<_>>(),
    )
    .spacing(4)
    .into()
}

fn swatch_style(theme: &Theme, color: Rgb, selected: bool) -> button::Style {
    let border_color = if selected {
        theme.palette().primary
    } else {
        theme.extended_palette().background.strong.color
    };
    button::Style {
        background: Some(iced::Background::Color(rgb_to_color(color))),
        border: iced::Border {
            color: border_color,
            width: if selected { 2.0 } else { 1.0 },
            radius: 3.0.into(),
        },
        ..button::Style::default()
    }
}

fn toggle_button_style(theme: &Theme, status: button::Status, active: bool) -> button::Style {
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

fn overlay_box_style(dragging: bool) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(Color {
            a: if dragging { 0.25 } else { 0.1 },
            ..Color::BLACK
        })),
        border: iced::Border {
            color: Color::WHITE,
            width: 1.0,
            radius: 3.0.into(),
        },
        ..Default::default()
    }
}

fn rgb_to_color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.r, rgb.g, rgb.b)
}
