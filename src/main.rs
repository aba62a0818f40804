mod logging;
mod mongo;
mod settings;
mod ui;

use std::collections::BTreeMap;

use iced::widget::{Column, Container};
use iced::{Element, Length, Size, Task, Theme, window};

use crate::mongo::connection::{self, CreateCollectionOutcome, SharedStore};
use crate::mongo::store::StoreError;
use crate::settings::{AppSettings, Appearance};
use crate::ui::add_one::AddOneState;
use crate::ui::new_collection::NewCollectionState;
use crate::ui::status::{NotificationId, StatusArea};
use crate::ui::tabs::MainTab;
use crate::ui::welcome::{APP_TITLE, WelcomeState};

const WINDOW_WIDTH: f32 = 900.0;
const WINDOW_HEIGHT: f32 = 800.0;

fn main() -> iced::Result {
    let window_settings =
        window::Settings { size: Size::new(WINDOW_WIDTH, WINDOW_HEIGHT), ..Default::default() };

    iced::application(App::boot, App::update, App::view)
        .title(APP_TITLE)
        .theme(App::theme)
        .window(window_settings)
        .run()
}

pub(crate) struct App {
    settings: AppSettings,
    server_label: String,
    appearance: Appearance,
    store: Option<SharedStore>,
    active_tab: MainTab,
    collections: Vec<String>,
    welcome: WelcomeState,
    new_collection: NewCollectionState,
    add_one: AddOneState,
    status: StatusArea,
}

#[derive(Debug, Clone)]
pub(crate) enum Message {
    TabSelected(MainTab),
    DarkModeToggled(bool),
    CollectionsRefreshRequested,
    CollectionsLoaded(Result<Vec<String>, StoreError>),
    CountsLoaded(Result<BTreeMap<String, u64>, StoreError>),
    NewCollectionNameChanged(String),
    NewCollectionSubmitted,
    CollectionCreated(CreateCollectionOutcome),
    AddOneCollectionSelected(String),
    FieldsLoaded { collection: String, result: Result<Vec<String>, StoreError> },
    FieldValueChanged { index: usize, value: String },
    PreviewRequested,
    NotificationDismissed(NotificationId),
}

impl App {
    fn boot() -> (Self, Task<Message>) {
        let (settings, load_error) = match settings::load_from_disk() {
            Ok(settings) => (settings, None),
            Err(error) => (AppSettings::default(), Some(error)),
        };
        logging::apply_settings(&settings);

        let store = connection::open_store(&settings);
        let (mut app, task) = Self::new(settings, store);
        if let Some(error) = load_error {
            app.status.error(format!("Could not read settings, using defaults: {error}"));
        }
        (app, task)
    }

    pub(crate) fn new(
        settings: AppSettings,
        store: Result<SharedStore, StoreError>,
    ) -> (Self, Task<Message>) {
        let mut status = StatusArea::default();
        let store = match store {
            Ok(store) => Some(store),
            Err(error) => {
                status.error(format!("Could not connect to MongoDB: {error}"));
                None
            }
        };

        let app = Self {
            server_label: settings.display_uri(),
            appearance: settings.initial_appearance(),
            welcome: WelcomeState::new(settings.mongo_database.clone()),
            settings,
            store,
            active_tab: MainTab::default(),
            collections: Vec::new(),
            new_collection: NewCollectionState::default(),
            add_one: AddOneState::default(),
            status,
        };

        let task = Task::batch([app.load_collections(), app.load_counts()]);
        (app, task)
    }

    pub(crate) fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TabSelected(tab) => {
                self.active_tab = tab;
                Task::none()
            }
            Message::DarkModeToggled(dark) => {
                self.appearance = Appearance::from_dark_mode(dark);
                log::debug!("appearance switched to {:?}", self.appearance);
                Task::none()
            }
            Message::CollectionsRefreshRequested => self.load_collections(),
            Message::CollectionsLoaded(result) => {
                match result {
                    Ok(names) => self.collections = names,
                    Err(error) => {
                        self.status.error(format!("Could not list collections: {error}"));
                    }
                }
                Task::none()
            }
            Message::CountsLoaded(result) => {
                if let Err(error) = self.welcome.apply_counts(result) {
                    self.status.error(format!("Could not count documents: {error}"));
                }
                Task::none()
            }
            Message::NewCollectionNameChanged(value) => {
                self.new_collection.set_name_input(value);
                Task::none()
            }
            Message::NewCollectionSubmitted => self.create_collection(),
            Message::CollectionCreated(outcome) => {
                self.new_collection.finish();
                match outcome.created {
                    Ok(()) => {
                        self.status.info(format!("Collection \"{}\" created.", outcome.name));
                    }
                    Err(error) => {
                        self.status.error(format!(
                            "Error creating collection \"{}\": {error}. It may already exist.",
                            outcome.name
                        ));
                    }
                }
                let refreshed = self.update(Message::CollectionsLoaded(outcome.collections));
                Task::batch([refreshed, self.load_counts()])
            }
            Message::AddOneCollectionSelected(collection) => {
                match self.add_one.select_collection(collection) {
                    Some(collection) => self.load_fields(collection),
                    None => Task::none(),
                }
            }
            Message::FieldsLoaded { collection, result } => {
                match self.add_one.apply_fields(&collection, result) {
                    Ok(()) => {}
                    Err(StoreError::NoSchema { collection }) => {
                        self.status.info(format!(
                            "Collection \"{collection}\" has no documents yet, so there are no fields to fill in."
                        ));
                    }
                    Err(error) => {
                        self.status.error(format!(
                            "Could not list fields of \"{collection}\": {error}"
                        ));
                    }
                }
                Task::none()
            }
            Message::FieldValueChanged { index, value } => {
                self.add_one.set_value(index, value);
                Task::none()
            }
            Message::PreviewRequested => {
                self.add_one.show_preview();
                Task::none()
            }
            Message::NotificationDismissed(id) => {
                self.status.dismiss(id);
                Task::none()
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let palette = self.appearance.palette();

        let tab = self.active_tab;
        let content: Element<'_, Message> = match tab {
            tab if !tab.is_implemented() => ui::placeholder::view(tab, palette),
            MainTab::Welcome => ui::welcome::view(&self.welcome, palette),
            MainTab::Settings => {
                ui::settings::view(&self.settings, &self.server_label, self.appearance, palette)
            }
            MainTab::NewCollection => {
                ui::new_collection::view(&self.new_collection, &self.collections, palette)
            }
            MainTab::AddOne => ui::add_one::view(&self.add_one, &self.collections, palette),
            MainTab::AddBulk | MainTab::Download | MainTab::Search | MainTab::Delete => {
                ui::placeholder::view(tab, palette)
            }
        };

        let body = Container::new(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .style(ui::pane_style);

        let mut layout = Column::new()
            .spacing(8)
            .padding(8)
            .push(ui::tabs::tab_bar(self.active_tab))
            .push(body);

        if !self.status.is_empty() {
            layout = layout.push(ui::status::view(&self.status, palette));
        }

        layout.width(Length::Fill).height(Length::Fill).into()
    }

    fn theme(&self) -> Theme {
        self.appearance.theme()
    }

    fn load_collections(&self) -> Task<Message> {
        let Some(store) = self.store.clone() else {
            return Task::none();
        };
        Task::perform(async move { connection::fetch_collections(store) }, Message::CollectionsLoaded)
    }

    fn load_counts(&self) -> Task<Message> {
        let Some(store) = self.store.clone() else {
            return Task::none();
        };
        Task::perform(
            async move { connection::fetch_collection_counts(store) },
            Message::CountsLoaded,
        )
    }

    fn load_fields(&mut self, collection: String) -> Task<Message> {
        let Some(store) = self.store.clone() else {
            return self.update(Message::FieldsLoaded {
                collection,
                result: Err(StoreError::NotConnected),
            });
        };

        let requested = collection.clone();
        Task::perform(async move { connection::fetch_field_names(store, requested) }, move |result| {
            Message::FieldsLoaded { collection: collection.clone(), result }
        })
    }

    fn create_collection(&mut self) -> Task<Message> {
        let Some(name) = self.new_collection.submit() else {
            return Task::none();
        };
        let Some(store) = self.store.clone() else {
            self.new_collection.finish();
            self.status.error(format!(
                "Cannot create collection \"{name}\": {}",
                StoreError::NotConnected
            ));
            return Task::none();
        };

        self.welcome.mark_loading();
        log::info!("creating collection \"{name}\"");
        Task::perform(
            async move { connection::create_collection(store, name) },
            Message::CollectionCreated,
        )
    }
}
