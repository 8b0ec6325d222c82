use std::fs::{self, File};
use std::path::Path;

use log::LevelFilter;
use simplelog::{ConfigBuilder, WriteLogger};

use crate::error::AppError;

/// Routes `log` output to `path`; stdout belongs to the terminal UI.
///
/// `LevelFilter::Off` skips logger setup entirely and creates no file.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    if level == LevelFilter::Off {
        return Ok(());
    }

    let failure = |reason: String| AppError::Logging {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|error| failure(error.to_string()))?;
    }
    let file = File::create(path).map_err(|error| failure(error.to_string()))?;

    let config = ConfigBuilder::new()
        .set_target_level(LevelFilter::Error)
        .set_thread_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file).map_err(|error| failure(error.to_string()))
}
