mod config;
pub mod timeline_cache;

pub use config::{CalendarConfig, Config, TimelineConfig};
pub use timeline_cache::TimelineCache;

use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Returns the data directory, creating it if needed.
///
/// `TASKTRAIL_HOME` wins when set. Otherwise `~/.config/tasktrail[-dev]/`
/// based on TASKTRAIL_ENV; set TASKTRAIL_ENV=dev for the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("TASKTRAIL_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("TASKTRAIL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("tasktrail-dev")
            } else {
                base_dir.join("tasktrail")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
