use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejected or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration: grid size must be greater than zero")]
    InvalidGridSize,
    #[error("invalid configuration: base speed must be greater than zero milliseconds")]
    InvalidBaseSpeed,
    #[error("invalid configuration: render rate must be greater than zero hertz")]
    InvalidRenderRate,
    #[error("invalid configuration: unknown theme `{0}`")]
    UnknownTheme(String),
    #[error("invalid configuration: unknown log level `{0}`")]
    InvalidLogLevel(String),
    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Top-level failure of the terminal application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal I/O failed")]
    Terminal(#[from] io::Error),
    #[error("failed to set up logging at {path}: {reason}")]
    Logging { path: PathBuf, reason: String },
}
