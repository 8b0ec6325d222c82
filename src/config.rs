use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::LevelFilter;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::grid::GridSize;
use crate::theme::{self, Theme};

const APP_DIR_NAME: &str = "toroid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Default side length of the play field.
pub const DEFAULT_GRID_SIZE: u16 = 20;

/// Default tick interval for a fresh run in milliseconds.
pub const DEFAULT_BASE_SPEED_MS: u64 = 150;

/// Default visual frame rate.
pub const DEFAULT_RENDER_HZ: u32 = 144;

/// Validated simulation settings.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub base_speed_ms: u64,
}

impl GameConfig {
    /// Validates raw settings; zero sizes and speeds are rejected here so the
    /// simulation never sees them.
    pub fn new(grid_size: u16, base_speed_ms: u64) -> Result<Self, ConfigError> {
        let grid = GridSize::new(grid_size)?;
        if base_speed_ms == 0 {
            return Err(ConfigError::InvalidBaseSpeed);
        }

        Ok(Self {
            grid,
            base_speed_ms,
        })
    }
}

/// Raw settings as read from the optional config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileSettings {
    pub grid_size: Option<u16>,
    pub base_speed_ms: Option<u64>,
    pub render_hz: Option<u32>,
    pub theme: Option<String>,
    pub seed: Option<u64>,
    pub log_level: Option<String>,
}

/// Values supplied on the command line; `None` leaves the file value alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub grid_size: Option<u16>,
    pub base_speed_ms: Option<u64>,
    pub render_hz: Option<u32>,
    pub theme: Option<String>,
    pub seed: Option<u64>,
    pub log_level: Option<LevelFilter>,
}

/// Fully resolved application settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub game: GameConfig,
    pub frame_interval: Duration,
    pub theme: &'static Theme,
    pub seed: Option<u64>,
    pub log_level: LevelFilter,
}

impl AppConfig {
    /// Layers `overrides` over `file` over built-in defaults and validates.
    pub fn resolve(file: FileSettings, overrides: Overrides) -> Result<Self, ConfigError> {
        let grid_size = overrides
            .grid_size
            .or(file.grid_size)
            .unwrap_or(DEFAULT_GRID_SIZE);
        let base_speed_ms = overrides
            .base_speed_ms
            .or(file.base_speed_ms)
            .unwrap_or(DEFAULT_BASE_SPEED_MS);
        let render_hz = overrides
            .render_hz
            .or(file.render_hz)
            .unwrap_or(DEFAULT_RENDER_HZ);

        let theme = match overrides.theme.or(file.theme) {
            Some(name) => theme::by_name(&name).ok_or(ConfigError::UnknownTheme(name))?,
            None => theme::default_theme(),
        };

        let log_level = match overrides.log_level {
            Some(level) => level,
            None => match file.log_level {
                Some(raw) => raw
                    .parse::<LevelFilter>()
                    .map_err(|_| ConfigError::InvalidLogLevel(raw))?,
                None => LevelFilter::Info,
            },
        };

        Ok(Self {
            game: GameConfig::new(grid_size, base_speed_ms)?,
            frame_interval: frame_interval(render_hz)?,
            theme,
            seed: overrides.seed.or(file.seed),
            log_level,
        })
    }
}

/// Time budget of one visual frame at `render_hz`.
pub fn frame_interval(render_hz: u32) -> Result<Duration, ConfigError> {
    if render_hz == 0 {
        return Err(ConfigError::InvalidRenderRate);
    }

    Ok(Duration::from_secs(1) / render_hz)
}

/// Returns the platform-correct default config file path.
#[must_use]
pub fn default_config_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    base
}

/// Returns the platform-correct default log file path.
#[must_use]
pub fn default_log_path() -> PathBuf {
    let mut base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(format!("{APP_DIR_NAME}.log"));
    base
}

/// Loads settings from `explicit`, or from the default location.
///
/// A missing default file yields empty settings (first run); a missing
/// explicitly named file is an error.
pub fn load_file_settings(explicit: Option<&Path>) -> Result<FileSettings, ConfigError> {
    match explicit {
        Some(path) => read_settings(path),
        None => match read_settings(&default_config_path()) {
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                Ok(FileSettings::default())
            }
            other => other,
        },
    }
}

fn read_settings(path: &Path) -> Result<FileSettings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
