//! Status area: the one place errors and notices are reported to the user.

use std::collections::VecDeque;

use iced::alignment::Vertical;
use iced::widget::{Button, Column, Container, Row, Space, Text, container};
use iced::{Color, Element, Length, border};

use crate::Message;
use crate::settings::ThemePalette;

const MAX_NOTIFICATIONS: usize = 5;

pub type NotificationId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct StatusArea {
    entries: VecDeque<Notification>,
    next_id: NotificationId,
}

impl StatusArea {
    pub fn info(&mut self, message: impl Into<String>) -> NotificationId {
        self.push(Severity::Info, message.into())
    }

    pub fn error(&mut self, message: impl Into<String>) -> NotificationId {
        self.push(Severity::Error, message.into())
    }

    fn push(&mut self, severity: Severity, message: String) -> NotificationId {
        match severity {
            Severity::Info => log::info!("{message}"),
            Severity::Error => log::error!("{message}"),
        }

        let id = self.next_id;
        self.next_id += 1;
        self.entries.push_back(Notification { id, severity, message });
        while self.entries.len() > MAX_NOTIFICATIONS {
            self.entries.pop_front();
        }
        id
    }

    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    pub fn entries(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn color_luminance(color: Color) -> f32 {
    0.2126 * color.r + 0.7152 * color.g + 0.0722 * color.b
}

fn error_accent_color(palette: &ThemePalette) -> Color {
    if color_luminance(palette.widget_background_color()) > 0.5 {
        Color::from_rgba(0.85, 0.32, 0.33, 1.0)
    } else {
        Color::from_rgba(1.0, 0.54, 0.55, 1.0)
    }
}

fn info_accent_color(palette: &ThemePalette) -> Color {
    palette.primary_buttons.active.to_color()
}

pub fn view(status: &StatusArea, palette: ThemePalette) -> Element<'_, Message> {
    let mut column = Column::new().spacing(6).width(Length::Fill);

    for entry in status.entries() {
        let accent = match entry.severity {
            Severity::Info => info_accent_color(&palette),
            Severity::Error => error_accent_color(&palette),
        };
        let background = palette.widget_background_color();
        let border_color = palette.widget_border_color();

        let stripe = Container::new(Space::new().width(Length::Fixed(4.0)).height(Length::Fixed(18.0)))
            .style(move |_| container::Style {
                background: Some(accent.into()),
                border: border::rounded(2),
                ..Default::default()
            });

        let dismiss = Button::new(Text::new("×").size(14))
            .padding([2, 8])
            .on_press(Message::NotificationDismissed(entry.id))
            .style(move |_, status| palette.subtle_button_style(4.0, status));

        let row = Row::new()
            .spacing(10)
            .align_y(Vertical::Center)
            .push(stripe)
            .push(Text::new(entry.message.as_str()).size(14).width(Length::Fill))
            .push(dismiss);

        column = column.push(Container::new(row).padding([6, 10]).width(Length::Fill).style(
            move |_| container::Style {
                background: Some(background.into()),
                border: border::rounded(6).width(1).color(border_color),
                text_color: Some(palette.text_primary.to_color()),
                ..Default::default()
            },
        ));
    }

    column.into()
}
