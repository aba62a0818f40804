//! "Add One" tab: a form whose rows mirror the fields of the selected collection.
//!
//! The ordered `rows` vector is the only source of truth. `view` projects it
//! into label and input widgets and every edit flows back into it by row
//! index, so the preview never has to inspect widgets.

use iced::alignment::Vertical;
use iced::widget::{Column, Container, Row, Scrollable, Text, pick_list, text_input};
use iced::{Element, Length, border};
use serde_json::{Map, Value};

use crate::Message;
use crate::mongo::store::StoreError;
use crate::settings::ThemePalette;
use crate::ui::primary_button;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldsStatus {
    Idle,
    Loading,
    Ready,
    NoSchema,
    Failed,
}

#[derive(Debug)]
pub struct AddOneState {
    selected: Option<String>,
    rows: Vec<FieldEntry>,
    status: FieldsStatus,
    preview: Option<String>,
}

impl Default for AddOneState {
    fn default() -> Self {
        Self { selected: None, rows: Vec::new(), status: FieldsStatus::Idle, preview: None }
    }
}

impl AddOneState {
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn rows(&self) -> &[FieldEntry] {
        &self.rows
    }

    pub fn status(&self) -> FieldsStatus {
        self.status
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Switches the form to `collection` and drops every row of the previous one.
    ///
    /// Returns the collection whose fields must be fetched, or `None` for an
    /// empty name.
    pub fn select_collection(&mut self, collection: String) -> Option<String> {
        if collection.is_empty() {
            return None;
        }

        self.rows.clear();
        self.status = FieldsStatus::Loading;
        self.selected = Some(collection.clone());
        Some(collection)
    }

    /// Rebuilds the rows from a field listing.
    ///
    /// Listings for anything but the current selection are ignored. A failed
    /// listing leaves no rows and hands the error back for reporting.
    pub fn apply_fields(
        &mut self,
        collection: &str,
        result: Result<Vec<String>, StoreError>,
    ) -> Result<(), StoreError> {
        if self.selected.as_deref() != Some(collection) {
            log::debug!("ignoring stale field listing for \"{collection}\"");
            return Ok(());
        }

        self.rows.clear();
        match result {
            Ok(fields) => {
                self.rows = fields
                    .into_iter()
                    .map(|name| FieldEntry { name, value: String::new() })
                    .collect();
                self.status = FieldsStatus::Ready;
                Ok(())
            }
            Err(error) => {
                self.status = match error {
                    StoreError::NoSchema { .. } => FieldsStatus::NoSchema,
                    _ => FieldsStatus::Failed,
                };
                Err(error)
            }
        }
    }

    pub fn set_value(&mut self, index: usize, value: String) {
        if let Some(row) = self.rows.get_mut(index) {
            row.value = value;
        }
    }

    /// Current (label, value) pairs, one per row, in row order.
    pub fn preview_entries(&self) -> Vec<(String, String)> {
        self.rows.iter().map(|row| (row.name.clone(), row.value.clone())).collect()
    }

    pub fn preview_text(&self) -> String {
        let item: Map<String, Value> = self
            .preview_entries()
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();

        serde_json::to_string_pretty(&Value::Object(item)).unwrap_or_else(|_| String::from("{}"))
    }

    pub fn show_preview(&mut self) {
        self.preview = Some(self.preview_text());
    }
}

fn fields_placeholder(status: FieldsStatus) -> Option<&'static str> {
    match status {
        FieldsStatus::Idle => Some("Select a collection to see its fields."),
        FieldsStatus::Loading => Some("Loading fields..."),
        FieldsStatus::NoSchema => Some("This collection has no documents to infer fields from."),
        FieldsStatus::Failed => Some("Fields could not be loaded."),
        FieldsStatus::Ready => None,
    }
}

pub fn view<'a>(
    state: &'a AddOneState,
    collections: &'a [String],
    palette: ThemePalette,
) -> Element<'a, Message> {
    let picker = pick_list(
        collections,
        state.selected().map(str::to_string),
        Message::AddOneCollectionSelected,
    )
    .placeholder("Select a collection")
    .width(Length::Fixed(280.0));

    let collection_row = Row::new()
        .spacing(12)
        .align_y(Vertical::Center)
        .push(Text::new("Collection:").size(14).width(Length::Fixed(120.0)))
        .push(picker);

    let mut fields = Column::new().spacing(8);
    if let Some(message) = fields_placeholder(state.status()) {
        fields = fields.push(Text::new(message).size(14).color(palette.text_muted.to_color()));
    } else if state.rows().is_empty() {
        fields = fields.push(
            Text::new("Documents in this collection only carry an _id.")
                .size(14)
                .color(palette.text_muted.to_color()),
        );
    }

    for (index, row) in state.rows().iter().enumerate() {
        fields = fields.push(
            Row::new()
                .spacing(12)
                .align_y(Vertical::Center)
                .push(Text::new(row.name.as_str()).size(14).width(Length::Fixed(160.0)))
                .push(
                    text_input("", &row.value)
                        .on_input(move |value| Message::FieldValueChanged { index, value })
                        .padding([6, 10])
                        .width(Length::Fixed(280.0)),
                ),
        );
    }

    let border_color = palette.widget_border_color();
    let fields_frame = Container::new(fields).padding(12).width(Length::Fill).style(move |_| {
        iced::widget::container::Style {
            border: border::rounded(6).width(1).color(border_color),
            ..Default::default()
        }
    });

    let add_item = primary_button("Add Item", palette).on_press(Message::PreviewRequested);

    let preview_body = state.preview().unwrap_or("");
    let preview_row = Row::new()
        .spacing(12)
        .push(Text::new("Preview:").size(14).width(Length::Fixed(120.0)))
        .push(
            Container::new(Text::new(preview_body).size(14))
                .padding(8)
                .width(Length::Fill)
                .style(move |_| iced::widget::container::Style {
                    background: Some(palette.widget_background_color().into()),
                    border: border::rounded(6).width(1).color(border_color),
                    text_color: Some(palette.text_primary.to_color()),
                    ..Default::default()
                }),
        );

    let content = Column::new()
        .spacing(16)
        .push(collection_row)
        .push(fields_frame)
        .push(add_item)
        .push(preview_row);

    Container::new(Scrollable::new(content).width(Length::Fill))
        .padding(16)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(state: &AddOneState) -> Vec<&str> {
        state.rows().iter().map(|row| row.name.as_str()).collect()
    }

    fn fields(items: &[&str]) -> Result<Vec<String>, StoreError> {
        Ok(items.iter().map(|item| item.to_string()).collect())
    }

    #[test]
    fn one_row_per_field_in_listing_order() {
        let mut state = AddOneState::default();
        let request = state.select_collection("parts".to_string());
        assert_eq!(request.as_deref(), Some("parts"));
        assert_eq!(state.status(), FieldsStatus::Loading);

        assert!(state.apply_fields("parts", fields(&["sku", "name", "price"])).is_ok());
        assert_eq!(names(&state), vec!["sku", "name", "price"]);
        assert!(state.rows().iter().all(|row| row.value.is_empty()));
        assert_eq!(state.status(), FieldsStatus::Ready);
    }

    #[test]
    fn empty_selection_is_ignored() {
        let mut state = AddOneState::default();
        state.select_collection("parts".to_string());
        state.apply_fields("parts", fields(&["sku"])).unwrap();

        assert_eq!(state.select_collection(String::new()), None);
        assert_eq!(state.selected(), Some("parts"));
        assert_eq!(names(&state), vec!["sku"]);
    }

    #[test]
    fn switching_collection_drops_previous_rows() {
        let mut state = AddOneState::default();
        state.select_collection("parts".to_string());
        state.apply_fields("parts", fields(&["sku", "name"])).unwrap();
        state.set_value(0, "A-1".to_string());

        state.select_collection("orders".to_string());
        assert!(state.rows().is_empty());

        state.apply_fields("orders", fields(&["customer"])).unwrap();
        assert_eq!(names(&state), vec!["customer"]);
        assert_eq!(state.rows()[0].value, "");
    }

    #[test]
    fn late_listing_for_previous_collection_is_ignored() {
        let mut state = AddOneState::default();
        state.select_collection("parts".to_string());
        state.select_collection("orders".to_string());
        state.apply_fields("orders", fields(&["customer"])).unwrap();

        assert!(state.apply_fields("parts", fields(&["sku", "name"])).is_ok());
        assert_eq!(names(&state), vec!["customer"]);
    }

    #[test]
    fn no_schema_is_reported_and_leaves_no_rows() {
        let mut state = AddOneState::default();
        state.select_collection("empty".to_string());
        let error = StoreError::NoSchema { collection: "empty".to_string() };

        assert_eq!(state.apply_fields("empty", Err(error.clone())), Err(error));
        assert!(state.rows().is_empty());
        assert_eq!(state.status(), FieldsStatus::NoSchema);
    }

    #[test]
    fn driver_failure_is_distinct_from_no_schema() {
        let mut state = AddOneState::default();
        state.select_collection("parts".to_string());
        let error = StoreError::Driver("connection reset".to_string());

        assert!(state.apply_fields("parts", Err(error)).is_err());
        assert_eq!(state.status(), FieldsStatus::Failed);
    }

    #[test]
    fn preview_has_one_entry_per_row_including_empty_values() {
        let mut state = AddOneState::default();
        state.select_collection("parts".to_string());
        state.apply_fields("parts", fields(&["sku", "name", "price"])).unwrap();
        state.set_value(0, "A-1".to_string());
        state.set_value(2, "0.25".to_string());
        state.set_value(7, "ignored".to_string());

        assert_eq!(
            state.preview_entries(),
            vec![
                ("sku".to_string(), "A-1".to_string()),
                ("name".to_string(), String::new()),
                ("price".to_string(), "0.25".to_string()),
            ]
        );

        state.show_preview();
        let parsed: Value =
            serde_json::from_str(state.preview().expect("preview rendered")).unwrap();
        let keys: Vec<_> = parsed.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["sku", "name", "price"]);
        assert_eq!(parsed["name"], Value::String(String::new()));
    }

    #[test]
    fn preview_without_rows_is_empty_object() {
        let state = AddOneState::default();
        assert_eq!(state.preview_text(), "{}");
    }
}
