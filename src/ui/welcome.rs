use std::collections::BTreeMap;

use iced::widget::{Column, Container, Scrollable, Text};
use iced::{Element, Length};

use crate::Message;
use crate::mongo::store::StoreError;
use crate::settings::ThemePalette;
use crate::ui::tabs::ALL_TABS;
use crate::ui::{body, heading};

pub const APP_TITLE: &str = "Collection Manager";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountsState {
    Loading,
    Loaded(BTreeMap<String, u64>),
    Unavailable,
}

#[derive(Debug)]
pub struct WelcomeState {
    database: String,
    counts: CountsState,
}

impl WelcomeState {
    pub fn new(database: impl Into<String>) -> Self {
        Self { database: database.into(), counts: CountsState::Loading }
    }

    pub fn mark_loading(&mut self) {
        self.counts = CountsState::Loading;
    }

    pub fn apply_counts(
        &mut self,
        result: Result<BTreeMap<String, u64>, StoreError>,
    ) -> Result<(), StoreError> {
        match result {
            Ok(counts) => {
                self.counts = CountsState::Loaded(counts);
                Ok(())
            }
            Err(error) => {
                self.counts = CountsState::Unavailable;
                Err(error)
            }
        }
    }

    pub fn counts(&self) -> &CountsState {
        &self.counts
    }

    /// "Database: name" followed by one indented line per collection.
    pub fn at_a_glance_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Database: {}", self.database)];
        match self.counts() {
            CountsState::Loading => lines.push(String::from("    Loading collection counts...")),
            CountsState::Unavailable => {
                lines.push(String::from("    Collection counts are unavailable"))
            }
            CountsState::Loaded(counts) => {
                lines.extend(counts.iter().map(|(name, count)| format!("    {name}: {count}")));
            }
        }
        lines
    }
}

fn tab_overview() -> String {
    ALL_TABS
        .iter()
        .map(|tab| format!("- {}: {}", tab.label(), tab.summary()))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn view(state: &WelcomeState, palette: ThemePalette) -> Element<'_, Message> {
    let intro = "This app will help you manage what items are stored in your MongoDB collection.";

    let content = Column::new()
        .spacing(16)
        .push(heading(format!("Welcome to the {APP_TITLE} application")))
        .push(body(intro))
        .push(body("Tabs:"))
        .push(body(tab_overview()))
        .push(
            Text::new(state.at_a_glance_lines().join("\n"))
                .size(16)
                .color(palette.text_muted.to_color()),
        );

    Container::new(Scrollable::new(content).width(Length::Fill))
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
