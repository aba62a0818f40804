use iced::alignment::Vertical;
use iced::widget::{Column, Container, Row, Text, text_input};
use iced::{Element, Length};

use crate::Message;
use crate::settings::ThemePalette;
use crate::ui::{heading, primary_button, subtle_button};

#[derive(Debug, Default)]
pub struct NewCollectionState {
    name_input: String,
    pending: bool,
}

impl NewCollectionState {
    pub fn name_input(&self) -> &str {
        &self.name_input
    }

    pub fn set_name_input(&mut self, value: String) {
        self.name_input = value;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Takes the typed name for a create request and clears the input.
    ///
    /// Blank input, or a request already in flight, yields `None` and leaves
    /// the input untouched.
    pub fn submit(&mut self) -> Option<String> {
        let name = self.name_input.trim();
        if name.is_empty() || self.pending {
            return None;
        }

        let name = name.to_string();
        self.name_input.clear();
        self.pending = true;
        Some(name)
    }

    pub fn finish(&mut self) {
        self.pending = false;
    }
}

pub fn view<'a>(
    state: &'a NewCollectionState,
    collections: &'a [String],
    palette: ThemePalette,
) -> Element<'a, Message> {
    let mut name_input = text_input("collection name", state.name_input())
        .padding([6, 10])
        .width(Length::Fixed(280.0));
    if !state.is_pending() {
        name_input = name_input
            .on_input(Message::NewCollectionNameChanged)
            .on_submit(Message::NewCollectionSubmitted);
    }

    let name_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new("Collection Name:").size(14).width(Length::Fixed(160.0)))
        .push(name_input);

    let create_label = if state.is_pending() { "Creating..." } else { "Create Collection" };
    let create = primary_button(create_label, palette)
        .on_press_maybe((!state.is_pending()).then_some(Message::NewCollectionSubmitted));

    let listing = if collections.is_empty() {
        String::from("(none)")
    } else {
        collections.join(", ")
    };

    let list_row = Row::new()
        .spacing(12)
        .push(Text::new("Current Collections:").size(14).width(Length::Fixed(160.0)))
        .push(Text::new(listing).size(14).width(Length::Fill));

    let refresh = subtle_button("Refresh List", palette).on_press(Message::CollectionsRefreshRequested);

    let content = Column::new()
        .spacing(16)
        .push(heading("Create a new collection"))
        .push(name_row)
        .push(create)
        .push(list_row)
        .push(refresh);

    Container::new(content).padding(16).width(Length::Fill).height(Length::Fill).into()
}
