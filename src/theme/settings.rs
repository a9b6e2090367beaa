use std::fs;
use std::path::PathBuf;
use std::sync::{OnceLock, RwLock};

use super::paths::config_dir;
use super::types::Settings;

/// Global settings store, loaded once at startup.
static SETTINGS_STORE: OnceLock<RwLock<Settings>> = OnceLock::new();

/// Location of the user settings file.
fn settings_path() -> PathBuf {
    config_dir().join("settings.toml")
}

/// What: Load settings from `settings.toml`, falling back to defaults.
///
/// Inputs: none (reads the config directory).
///
/// Output: A fully-populated [`Settings`]; missing keys take their defaults.
///
/// Details:
/// - A malformed file is logged and ignored rather than aborting startup;
///   the defaults keep the application usable.
fn load_settings() -> Settings {
    let path = settings_path();
    match fs::read_to_string(&path) {
        Ok(raw) => match toml::from_str::<Settings>(&raw) {
            Ok(s) => {
                tracing::info!(path = %path.display(), "loaded settings");
                s
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid settings file; using defaults");
                Settings::default()
            }
        },
        Err(_) => Settings::default(),
    }
}

/// Return the application settings, loading from config on first access.
pub fn settings() -> Settings {
    let lock = SETTINGS_STORE.get_or_init(|| RwLock::new(load_settings()));
    lock.read().map(|g| g.clone()).unwrap_or_default()
}
