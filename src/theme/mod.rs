//! Theme palette, user settings and filesystem locations.
//!
//! Split into submodules in the same shape as the rest of the crate; public
//! re-exports keep the `crate::theme::*` API stable.

/// Path resolution for config/state/cache directories.
mod paths;
/// Settings access and management.
mod settings;
/// Theme and settings type definitions.
mod types;

pub use paths::{cache_dir, config_dir, data_dir, logs_dir, state_dir};
pub use settings::settings;
pub use types::{Settings, Theme};

use std::sync::OnceLock;

/// Global theme store; the palette is fixed for the process lifetime.
static THEME_STORE: OnceLock<Theme> = OnceLock::new();

/// Return the application's theme palette.
pub fn theme() -> Theme {
    *THEME_STORE.get_or_init(Theme::default)
}

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// Process-wide mutex serializing tests that mutate `HOME` or on-disk state.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
