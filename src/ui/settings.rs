use iced::alignment::Vertical;
use iced::widget::{Column, Container, Row, Text, toggler};
use iced::{Element, Length};

use crate::Message;
use crate::settings::{AppSettings, Appearance, ThemePalette};
use crate::ui::heading;

fn info_row<'a>(label: &'a str, value: &'a str, palette: ThemePalette) -> Row<'a, Message> {
    Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new(label).size(14).width(Length::Fixed(120.0)))
        .push(Text::new(value).size(14).color(palette.text_muted.to_color()))
}

pub fn view<'a>(
    settings: &'a AppSettings,
    server: &'a str,
    appearance: Appearance,
    palette: ThemePalette,
) -> Element<'a, Message> {
    let dark_mode = toggler(appearance.is_dark())
        .label("Dark Mode")
        .on_toggle(Message::DarkModeToggled)
        .width(Length::Shrink);

    let content = Column::new()
        .spacing(16)
        .push(heading("Settings"))
        .push(dark_mode)
        .push(info_row("Database", &settings.mongo_database, palette))
        .push(info_row("Server", server, palette))
        .push(
            Text::new("Changes made here last until the application is closed.")
                .size(13)
                .color(palette.text_muted.to_color()),
        );

    Container::new(content).padding(16).width(Length::Fill).height(Length::Fill).into()
}
