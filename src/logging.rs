use crate::settings::{AppSettings, DEFAULT_LOG_FILE_NAME};
use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, OnceLock, PoisonError, RwLock};

const LOG_ROTATE_BYTES: u64 = 100 * 1024;
const APP_TARGET: &str = "collection_manager";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub level: LevelFilter,
    pub file_path: PathBuf,
}

impl LoggingConfig {
    pub fn from_settings(settings: &AppSettings) -> Self {
        let trimmed = settings.logging_path.trim();
        let file_path = if trimmed.is_empty() {
            PathBuf::from(DEFAULT_LOG_FILE_NAME)
        } else {
            PathBuf::from(trimmed)
        };

        Self {
            enabled: settings.logging_enabled,
            level: settings.logging_level.to_level_filter(),
            file_path,
        }
    }

    fn max_level(&self) -> LevelFilter {
        if self.enabled { self.level } else { LevelFilter::Off }
    }
}

/// Open log file plus the number of bytes already in it.
struct LogFile {
    path: PathBuf,
    file: File,
    size: u64,
}

impl LogFile {
    fn open(path: PathBuf) -> io::Result<Self> {
        let (file, size) = open_log_file(&path, true)?;
        Ok(Self { path, file, size })
    }

    fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.size + bytes.len() as u64 > LOG_ROTATE_BYTES {
            rotate_log_file(&self.path)?;
            let (file, _) = open_log_file(&self.path, false)?;
            self.file = file;
            self.size = 0;
        }

        self.file.write_all(bytes)?;
        self.size = self.size.saturating_add(bytes.len() as u64);
        Ok(())
    }
}

struct Logger {
    config: RwLock<LoggingConfig>,
    file: Mutex<Option<LogFile>>,
}

impl Logger {
    fn new(config: LoggingConfig) -> Self {
        Self { config: RwLock::new(config), file: Mutex::new(None) }
    }

    fn config(&self) -> LoggingConfig {
        self.config.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn set_config(&self, config: LoggingConfig) {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        if *guard != config {
            *self.file.lock().unwrap_or_else(PoisonError::into_inner) = None;
        }
        *guard = config;
    }

    fn write_line(&self, line: &str, config: &LoggingConfig) {
        let _ = io::stderr().write_all(line.as_bytes());

        let mut guard = self.file.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.as_ref().is_none_or(|open| open.path != config.file_path) {
            *guard = LogFile::open(config.file_path.clone()).ok();
        }

        if let Some(file) = guard.as_mut() {
            if file.write(line.as_bytes()).is_err() {
                *guard = None;
            }
        }
    }
}

fn is_app_target(target: &str) -> bool {
    target == APP_TARGET
        || target.strip_prefix(APP_TARGET).is_some_and(|rest| rest.starts_with("::"))
}

fn passes(config: &LoggingConfig, metadata: &Metadata) -> bool {
    config.enabled && metadata.level() <= config.level && is_app_target(metadata.target())
}

impl Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        passes(&self.config(), metadata)
    }

    fn log(&self, record: &Record) {
        let config = self.config();
        if !passes(&config, record.metadata()) {
            return;
        }

        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let line = format!(
            "{timestamp} [{level}] {target}: {message}\n",
            level = record.level(),
            target = record.target(),
            message = record.args()
        );
        self.write_line(&line, &config);
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Installs the process logger on first call and reconfigures it afterwards.
pub fn apply_settings(settings: &AppSettings) {
    let config = LoggingConfig::from_settings(settings);
    let max_level = config.max_level();
    let logger = LOGGER.get_or_init(|| Logger::new(config.clone()));
    logger.set_config(config);
    let _ = log::set_logger(logger);
    log::set_max_level(max_level);
}

fn open_log_file(path: &Path, append: bool) -> io::Result<(File, u64)> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file =
        OpenOptions::new().create(true).write(true).append(append).truncate(!append).open(path)?;
    let size = file.metadata().map(|meta| meta.len()).unwrap_or(0);
    Ok((file, size))
}

fn rotate_log_file(path: &Path) -> io::Result<()> {
    let rotated = rotated_log_path(path);
    if rotated.exists() {
        let _ = fs::remove_file(&rotated);
    }
    if path.exists() {
        fs::rename(path, rotated)?;
    }
    Ok(())
}

fn rotated_log_path(path: &Path) -> PathBuf {
    let file_name =
        path.file_name().and_then(|name| name.to_str()).unwrap_or(DEFAULT_LOG_FILE_NAME);
    path.with_file_name(format!("{file_name}.1"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::LogLevel;

    #[test]
    fn only_crate_targets_are_accepted() {
        assert!(is_app_target("collection_manager"));
        assert!(is_app_target("collection_manager::mongo::store"));
        assert!(!is_app_target("collection_manager_extra"));
        assert!(!is_app_target("mongodb::cmap"));
    }

    #[test]
    fn disabled_logging_turns_level_off() {
        let mut settings = AppSettings::default();
        settings.logging_level = LogLevel::Debug;
        settings.logging_enabled = false;
        assert_eq!(LoggingConfig::from_settings(&settings).max_level(), LevelFilter::Off);

        settings.logging_enabled = true;
        assert_eq!(LoggingConfig::from_settings(&settings).max_level(), LevelFilter::Debug);
    }

    #[test]
    fn rotated_path_appends_suffix() {
        let rotated = rotated_log_path(Path::new("logs/collection_manager.log"));
        assert_eq!(rotated, PathBuf::from("logs/collection_manager.log.1"));
    }
}
