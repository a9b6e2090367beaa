use std::env;
use std::path::{Path, PathBuf};

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Append the app segment to `base`, ensure the directory exists, return it.
fn ensured(base: PathBuf) -> PathBuf {
    let dir = base.join("listino");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// XDG config directory for Listino (ensured to exist): `~/.config/listino`.
pub fn config_dir() -> PathBuf {
    // Prefer HOME ~/.config/listino first
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join("listino");
        if std::fs::create_dir_all(&dir).is_ok() {
            return dir;
        }
    }
    ensured(xdg_base_dir("XDG_CONFIG_HOME", &[".config"]))
}

/// XDG state directory: persistent session scope and other durable app state.
pub fn state_dir() -> PathBuf {
    ensured(xdg_base_dir("XDG_STATE_HOME", &[".local", "state"]))
}

/// XDG cache directory: the ephemeral session scope lives here.
pub fn cache_dir() -> PathBuf {
    ensured(xdg_base_dir("XDG_CACHE_HOME", &[".cache"]))
}

/// XDG data directory: last resort location for a user-installed dataset.
pub fn data_dir() -> PathBuf {
    ensured(xdg_base_dir("XDG_DATA_HOME", &[".local", "share"]))
}

/// Logs directory under config: `~/.config/listino/logs` (ensured to exist).
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

#[cfg(test)]
mod tests {
    #[test]
    fn paths_resolve_under_temp_home() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let orig_home = std::env::var_os("HOME");
        let base = std::env::temp_dir().join(format!(
            "listino_test_paths_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap()
                .as_nanos()
        ));
        let _ = std::fs::create_dir_all(&base);
        unsafe {
            std::env::set_var("HOME", base.display().to_string());
            std::env::remove_var("XDG_STATE_HOME");
            std::env::remove_var("XDG_CACHE_HOME");
        }
        assert!(super::config_dir().ends_with("listino"));
        assert!(super::logs_dir().ends_with("logs"));
        assert!(super::state_dir().starts_with(&base));
        assert!(super::cache_dir().starts_with(&base));
        unsafe {
            if let Some(v) = orig_home {
                std::env::set_var("HOME", v);
            } else {
                std::env::remove_var("HOME");
            }
        }
    }
}
