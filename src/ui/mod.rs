pub mod add_one;
pub mod new_collection;
pub mod placeholder;
pub mod settings;
pub mod status;
pub mod tabs;
pub mod welcome;

use iced::widget::{Button, Text, container};
use iced::{Font, Theme, border, font};

use crate::Message;
use crate::settings::ThemePalette;

pub(crate) const HEADING_SIZE: f32 = 24.0;
pub(crate) const BODY_SIZE: f32 = 16.0;
pub(crate) const BUTTON_RADIUS: f32 = 6.0;

pub(crate) fn heading<'a>(label: impl Into<String>) -> Text<'a> {
    Text::new(label.into())
        .size(HEADING_SIZE)
        .font(Font { weight: font::Weight::Bold, ..Font::DEFAULT })
}

pub(crate) fn body<'a>(label: impl Into<String>) -> Text<'a> {
    Text::new(label.into()).size(BODY_SIZE)
}

pub(crate) fn primary_button<'a>(label: &'a str, palette: ThemePalette) -> Button<'a, Message> {
    Button::new(Text::new(label).size(14))
        .padding([6, 16])
        .style(move |_, status| palette.primary_button_style(BUTTON_RADIUS, status))
}

pub(crate) fn subtle_button<'a>(label: &'a str, palette: ThemePalette) -> Button<'a, Message> {
    Button::new(Text::new(label).size(14))
        .padding([6, 16])
        .style(move |_, status| palette.subtle_button_style(BUTTON_RADIUS, status))
}

pub(crate) fn pane_style(theme: &Theme) -> container::Style {
    let palette = theme.extended_palette();

    container::Style {
        background: Some(palette.background.weak.color.into()),
        border: border::rounded(6).width(1).color(palette.primary.weak.color),
        ..Default::default()
    }
}
