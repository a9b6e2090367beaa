//! Session handling for the reserved area.
//!
//! A login produces a small session record persisted to disk. "Remember me"
//! decides the scope: remembered sessions live in the state directory and
//! survive restarts, unremembered ones live in the cache directory and are
//! wiped on clean exit. Logout clears both scopes.

pub mod users;

use std::fmt;
use std::path::PathBuf;

use crate::theme::{cache_dir, state_dir};
use users::UserTable;

/// The persisted session: identity only, never the password.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SessionRecord {
    pub username: String,
    pub name: String,
    pub company: String,
    pub role: String,
    /// RFC 3339 login timestamp.
    pub login_time: String,
}

/// Why a login attempt was rejected.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginError {
    /// Username or password left empty.
    EmptyFields,
    /// No account matches the credentials.
    InvalidCredentials,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::EmptyFields => write!(f, "Inserisci username e password"),
            LoginError::InvalidCredentials => write!(f, "Username o password non validi"),
        }
    }
}

impl std::error::Error for LoginError {}

/// Remembered sessions survive restarts.
fn persistent_path() -> PathBuf {
    state_dir().join("session.json")
}

/// Unremembered sessions are wiped on clean exit.
fn ephemeral_path() -> PathBuf {
    cache_dir().join("session_ephemeral.json")
}

fn read_record(path: &PathBuf) -> Option<SessionRecord> {
    let raw = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&raw) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "discarding corrupt session file");
            let _ = std::fs::remove_file(path);
            None
        }
    }
}

fn write_record(path: &PathBuf, record: &SessionRecord) {
    match serde_json::to_string_pretty(record) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                tracing::warn!(path = %path.display(), error = %e, "failed to persist session");
            }
        }
        Err(e) => tracing::warn!(error = %e, "failed to serialize session"),
    }
}

/// What: Attempt a login and persist the resulting session.
///
/// Inputs:
/// - `table`: Account table to check against.
/// - `username`, `password`: Credentials; username is trimmed first.
/// - `remember`: Chooses the persistent or the ephemeral scope.
///
/// Output: The stored [`SessionRecord`], or a [`LoginError`].
///
/// Details:
/// - A new login replaces any session in either scope, so switching the
///   remember flag never leaves a stale record behind.
pub fn login(
    table: &UserTable,
    username: &str,
    password: &str,
    remember: bool,
) -> Result<SessionRecord, LoginError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(LoginError::EmptyFields);
    }
    let user = table
        .authenticate(username, password)
        .ok_or(LoginError::InvalidCredentials)?;
    let record = SessionRecord {
        username: user.username.clone(),
        name: user.name.clone(),
        company: user.company.clone(),
        role: user.role.clone(),
        login_time: chrono::Utc::now().to_rfc3339(),
    };
    logout();
    let path = if remember {
        persistent_path()
    } else {
        ephemeral_path()
    };
    write_record(&path, &record);
    tracing::info!(username = %record.username, remember, "login");
    Ok(record)
}

/// Remove the session from both scopes.
pub fn logout() {
    let _ = std::fs::remove_file(persistent_path());
    let _ = std::fs::remove_file(ephemeral_path());
}

/// The current session, if any; the persistent scope wins when both exist.
#[must_use]
pub fn current() -> Option<SessionRecord> {
    read_record(&persistent_path()).or_else(|| read_record(&ephemeral_path()))
}

#[must_use]
pub fn is_authenticated() -> bool {
    current().is_some()
}

/// Drop the ephemeral scope only; called on clean shutdown so unremembered
/// sessions do not outlive the run.
pub fn clear_ephemeral() {
    let _ = std::fs::remove_file(ephemeral_path());
}

/// Whether the first-run privacy notice has been acknowledged.
#[must_use]
pub fn consent_given() -> bool {
    state_dir().join("consent.json").exists()
}

/// Record acknowledgement of the privacy notice.
pub fn record_consent() {
    let path = state_dir().join("consent.json");
    let stamp = serde_json::json!({ "accepted_at": chrono::Utc::now().to_rfc3339() });
    if let Err(e) = std::fs::write(&path, stamp.to_string()) {
        tracing::warn!(path = %path.display(), error = %e, "failed to record consent");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_temp_home<F: FnOnce()>(f: F) {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let orig_home = std::env::var_os("HOME");
        let base = std::env::temp_dir().join(format!(
            "listino_test_session_{}_{}",
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
        f();
        unsafe {
            if let Some(v) = orig_home {
                std::env::set_var("HOME", v);
            } else {
                std::env::remove_var("HOME");
            }
        }
    }

    #[test]
    fn login_logout_roundtrip() {
        with_temp_home(|| {
            let table = UserTable::builtin();
            assert!(!is_authenticated());
            let record = login(&table, "cliente", "maestri2024", true).unwrap();
            assert_eq!(record.role, "cliente");
            assert_eq!(current().unwrap().username, "cliente");
            logout();
            assert!(!is_authenticated());
        });
    }

    #[test]
    fn rejected_logins_store_nothing() {
        with_temp_home(|| {
            let table = UserTable::builtin();
            assert_eq!(
                login(&table, "cliente", "wrong", false),
                Err(LoginError::InvalidCredentials)
            );
            assert_eq!(
                login(&table, "  ", "x", false),
                Err(LoginError::EmptyFields)
            );
            assert!(!is_authenticated());
        });
    }

    #[test]
    fn ephemeral_sessions_vanish_on_clear() {
        with_temp_home(|| {
            let table = UserTable::builtin();
            login(&table, "admin", "admin2024", false).unwrap();
            assert!(is_authenticated());
            clear_ephemeral();
            assert!(!is_authenticated());
        });
    }

    #[test]
    fn remembered_sessions_survive_ephemeral_clear() {
        with_temp_home(|| {
            let table = UserTable::builtin();
            login(&table, "rivenditore", "rivendita2024", true).unwrap();
            clear_ephemeral();
            assert_eq!(current().unwrap().username, "rivenditore");
            logout();
        });
    }

    #[test]
    fn consent_is_recorded_once() {
        with_temp_home(|| {
            assert!(!consent_given());
            record_consent();
            assert!(consent_given());
        });
    }
}
