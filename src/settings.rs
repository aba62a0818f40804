use iced::widget::button;
use iced::{Color, Shadow, Theme, border};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

pub const SETTINGS_FILE_NAME: &str = "settings.toml";
pub const DEFAULT_LOG_FILE_NAME: &str = "collection_manager.log";
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
pub const DEFAULT_MONGO_DATABASE: &str = "collection_manager";

pub const ENV_MONGO_URI: &str = "COLLECTION_MANAGER_MONGO_URI";
pub const ENV_MONGO_DATABASE: &str = "COLLECTION_MANAGER_MONGO_DATABASE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub const fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Connection and startup options read from `settings.toml`.
///
/// The UI never writes these back; the dark mode switch only changes the
/// running [`Appearance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub mongo_uri: String,
    pub mongo_database: String,
    pub dark_mode: bool,
    pub logging_enabled: bool,
    pub logging_level: LogLevel,
    pub logging_path: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            mongo_uri: DEFAULT_MONGO_URI.to_string(),
            mongo_database: DEFAULT_MONGO_DATABASE.to_string(),
            dark_mode: true,
            logging_enabled: false,
            logging_level: LogLevel::Info,
            logging_path: DEFAULT_LOG_FILE_NAME.to_string(),
        }
    }
}

impl AppSettings {
    pub fn normalize(&mut self) {
        if self.mongo_uri.trim().is_empty() {
            self.mongo_uri = DEFAULT_MONGO_URI.to_string();
        } else {
            self.mongo_uri = self.mongo_uri.trim().to_string();
        }

        if self.mongo_database.trim().is_empty() {
            self.mongo_database = DEFAULT_MONGO_DATABASE.to_string();
        } else {
            self.mongo_database = self.mongo_database.trim().to_string();
        }

        if self.logging_path.trim().is_empty() {
            self.logging_path = DEFAULT_LOG_FILE_NAME.to_string();
        }
    }

    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(uri) = lookup(ENV_MONGO_URI).filter(|value| !value.trim().is_empty()) {
            self.mongo_uri = uri.trim().to_string();
        }
        if let Some(database) =
            lookup(ENV_MONGO_DATABASE).filter(|value| !value.trim().is_empty())
        {
            self.mongo_database = database.trim().to_string();
        }
    }

    /// Connection URI with any `user:password@` part masked.
    pub fn display_uri(&self) -> String {
        let (scheme, rest) = match self.mongo_uri.split_once("://") {
            Some((scheme, rest)) => (format!("{scheme}://"), rest),
            None => (String::new(), self.mongo_uri.as_str()),
        };
        let authority_end = rest.find('/').unwrap_or(rest.len());
        match rest[..authority_end].rfind('@') {
            Some(at) => format!("{scheme}***{}", &rest[at..]),
            None => self.mongo_uri.clone(),
        }
    }

    pub fn initial_appearance(&self) -> Appearance {
        Appearance::from_dark_mode(self.dark_mode)
    }
}

#[derive(Debug)]
pub enum SettingsLoadError {
    Io(io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for SettingsLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsLoadError::Io(error) => write!(f, "I/O error: {}", error),
            SettingsLoadError::Parse(error) => write!(f, "Parse error: {}", error),
        }
    }
}

impl std::error::Error for SettingsLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsLoadError::Io(error) => Some(error),
            SettingsLoadError::Parse(error) => Some(error),
        }
    }
}

pub fn settings_path() -> PathBuf {
    PathBuf::from(SETTINGS_FILE_NAME)
}

pub fn parse_settings(contents: &str) -> Result<AppSettings, SettingsLoadError> {
    let mut settings =
        toml::from_str::<AppSettings>(contents).map_err(SettingsLoadError::Parse)?;
    settings.normalize();
    Ok(settings)
}

pub fn load_from_disk() -> Result<AppSettings, SettingsLoadError> {
    let mut settings = match fs::read_to_string(settings_path()) {
        Ok(contents) => parse_settings(&contents)?,
        Err(error) if error.kind() == io::ErrorKind::NotFound => {
            let mut settings = AppSettings::default();
            settings.normalize();
            settings
        }
        Err(error) => return Err(SettingsLoadError::Io(error)),
    };

    settings.apply_env_overrides(|key| env::var(key).ok());
    Ok(settings)
}

/// Light/dark rendering mode of the whole window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    pub const fn from_dark_mode(dark: bool) -> Self {
        if dark { Appearance::Dark } else { Appearance::Light }
    }

    pub const fn is_dark(self) -> bool {
        matches!(self, Appearance::Dark)
    }

    pub fn theme(self) -> Theme {
        match self {
            Appearance::Light => Theme::Light,
            Appearance::Dark => Theme::Dark,
        }
    }

    pub fn palette(self) -> ThemePalette {
        match self {
            Appearance::Light => ThemePalette::light(),
            Appearance::Dark => ThemePalette::dark(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbaColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl RgbaColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn to_color(self) -> Color {
        Color::from_rgba8(self.r, self.g, self.b, self.a as f32 / 255.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonColors {
    pub active: RgbaColor,
    pub hover: RgbaColor,
    pub pressed: RgbaColor,
    pub disabled: RgbaColor,
    pub text: RgbaColor,
    pub border: RgbaColor,
}

impl ButtonColors {
    pub fn style(&self, radius: f32, status: button::Status) -> button::Style {
        let background = match status {
            button::Status::Active => self.active,
            button::Status::Hovered => self.hover,
            button::Status::Pressed => self.pressed,
            button::Status::Disabled => self.disabled,
        };

        button::Style {
            background: Some(background.to_color().into()),
            text_color: self.text.to_color(),
            border: border::rounded(radius).width(1).color(self.border.to_color()),
            shadow: Shadow::default(),
            ..Default::default()
        }
    }
}

/// Colors used by the custom-styled widgets. Everything else follows the
/// built-in iced theme returned by [`Appearance::theme`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub widget_background: RgbaColor,
    pub widget_border: RgbaColor,
    pub subtle_buttons: ButtonColors,
    pub primary_buttons: ButtonColors,
    pub text_primary: RgbaColor,
    pub text_muted: RgbaColor,
}

impl ThemePalette {
    pub fn light() -> Self {
        Self {
            widget_background: RgbaColor::opaque(0xef, 0xf1, 0xf5),
            widget_border: RgbaColor::opaque(0xd0, 0xd4, 0xda),
            subtle_buttons: ButtonColors {
                active: RgbaColor::opaque(0xf3, 0xf5, 0xfa),
                hover: RgbaColor::opaque(0xe8, 0xec, 0xf5),
                pressed: RgbaColor::opaque(0xdc, 0xe2, 0xef),
                disabled: RgbaColor::opaque(0xf3, 0xf5, 0xfa),
                text: RgbaColor::opaque(0x22, 0x28, 0x38),
                border: RgbaColor::opaque(0xc6, 0xcc, 0xd9),
            },
            primary_buttons: ButtonColors {
                active: RgbaColor::opaque(0x36, 0x71, 0xc9),
                hover: RgbaColor::opaque(0x2f, 0x63, 0xb0),
                pressed: RgbaColor::opaque(0x26, 0x54, 0x98),
                disabled: RgbaColor::opaque(0x9d, 0xb4, 0xd9),
                text: RgbaColor::opaque(0xff, 0xff, 0xff),
                border: RgbaColor::opaque(0x1f, 0x41, 0x73),
            },
            text_primary: RgbaColor::opaque(0x17, 0x1a, 0x20),
            text_muted: RgbaColor::opaque(0x55, 0x5f, 0x73),
        }
    }

    pub fn dark() -> Self {
        Self {
            widget_background: RgbaColor::opaque(0x22, 0x27, 0x31),
            widget_border: RgbaColor::opaque(0x39, 0x40, 0x4d),
            subtle_buttons: ButtonColors {
                active: RgbaColor::opaque(0x2c, 0x33, 0x40),
                hover: RgbaColor::opaque(0x35, 0x3c, 0x4a),
                pressed: RgbaColor::opaque(0x3f, 0x47, 0x57),
                disabled: RgbaColor::opaque(0x2c, 0x33, 0x40),
                text: RgbaColor::opaque(0xdf, 0xe4, 0xee),
                border: RgbaColor::opaque(0x47, 0x50, 0x5f),
            },
            primary_buttons: ButtonColors {
                active: RgbaColor::opaque(0x4a, 0x8d, 0xff),
                hover: RgbaColor::opaque(0x5c, 0x99, 0xff),
                pressed: RgbaColor::opaque(0x3f, 0x7c, 0xe6),
                disabled: RgbaColor::opaque(0x33, 0x4d, 0x7a),
                text: RgbaColor::opaque(0xff, 0xff, 0xff),
                border: RgbaColor::opaque(0x29, 0x62, 0xd9),
            },
            text_primary: RgbaColor::opaque(0xe5, 0xea, 0xf3),
            text_muted: RgbaColor::opaque(0xa9, 0xb1, 0xc1),
        }
    }

    pub fn widget_background_color(&self) -> Color {
        self.widget_background.to_color()
    }

    pub fn widget_border_color(&self) -> Color {
        self.widget_border.to_color()
    }

    pub fn subtle_button_style(&self, radius: f32, status: button::Status) -> button::Style {
        self.subtle_buttons.style(radius, status)
    }

    pub fn primary_button_style(&self, radius: f32, status: button::Status) -> button::Style {
        self.primary_buttons.style(radius, status)
    }
}
