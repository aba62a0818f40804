use iced::widget::{Column, Container, Text};
use iced::{Element, Length};

use crate::Message;
use crate::settings::ThemePalette;
use crate::ui::heading;
use crate::ui::tabs::MainTab;

/// Pane for tabs that are listed in the window but have no behavior yet.
pub fn view(tab: MainTab, palette: ThemePalette) -> Element<'static, Message> {
    let content = Column::new()
        .spacing(12)
        .push(heading(tab.label()))
        .push(Text::new(tab.summary()).size(16))
        .push(
            Text::new("This tab is not available yet.")
                .size(14)
                .color(palette.text_muted.to_color()),
        );

    Container::new(content).padding(16).width(Length::Fill).height(Length::Fill).into()
}
