mod config;
pub mod database;

pub use config::{Config, NotificationsConfig, ScheduleConfig};
pub use database::{Database, Note};

use std::path::{Path, PathBuf};

use crate::error::Result;

/// Resolves the data directory and creates it if needed.
///
/// `POMOCYCLE_HOME` overrides the location. Otherwise this is
/// `~/.config/pomocycle[-dev]/`, the `-dev` suffix selected by `POMOCYCLE_ENV=dev`.
///
/// # Errors
/// Returns an error if the directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let dir = match std::env::var_os("POMOCYCLE_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("POMOCYCLE_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("pomocycle-dev")
            } else {
                base_dir.join("pomocycle")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Wipe all user data: settings go back to defaults and every note is deleted.
///
/// Returns the number of notes removed.
///
/// # Errors
/// Returns an error if the config cannot be written or the notes cannot be cleared.
pub fn clear_all(config_path: &Path, db: &Database) -> Result<usize> {
    Config::default().save_to(config_path)?;
    let removed = db.clear_notes()?;
    tracing::info!(removed, "cleared all data");
    Ok(removed)
}
