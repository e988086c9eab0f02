pub mod kv;
pub mod state;

pub use kv::{KvStore, MemoryStore, SqliteStore};
pub use state::{
    Achievements, AppState, HistoryEntry, ReminderPrefs, ReminderPrefsUpdate, SelectionSource,
    Settings, SettingsUpdate, Stats, DEFAULT_FOODS, HISTORY_CAP,
};

use std::path::PathBuf;

/// Returns `~/.config/mealdeck[-dev]/` based on MEALDECK_ENV.
///
/// Set MEALDECK_ENV=dev to use a development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("MEALDECK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("mealdeck-dev")
    } else {
        base_dir.join("mealdeck")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
