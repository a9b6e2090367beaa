//! Keys on the login form.

use crossterm::event::{KeyCode, KeyEvent};

use crate::session;
use crate::state::{AppState, LoginField, Route};

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            state.login_form = Default::default();
            state.go_back();
        }
        KeyCode::Tab | KeyCode::Down => {
            state.login_form.field = match state.login_form.field {
                LoginField::Username => LoginField::Password,
                LoginField::Password => LoginField::Remember,
                LoginField::Remember => LoginField::Username,
            };
        }
        KeyCode::Up => {
            state.login_form.field = match state.login_form.field {
                LoginField::Username => LoginField::Remember,
                LoginField::Password => LoginField::Username,
                LoginField::Remember => LoginField::Password,
            };
        }
        KeyCode::Enter => submit(state),
        KeyCode::Backspace => {
            match state.login_form.field {
                LoginField::Username => {
                    state.login_form.username.pop();
                }
                LoginField::Password => {
                    state.login_form.password.pop();
                }
                LoginField::Remember => {}
            };
        }
        KeyCode::Char(' ') if state.login_form.field == LoginField::Remember => {
            state.login_form.remember = !state.login_form.remember;
        }
        KeyCode::Char(c) => match state.login_form.field {
            LoginField::Username => state.login_form.username.push(c),
            LoginField::Password => state.login_form.password.push(c),
            LoginField::Remember => {}
        },
        _ => {}
    }
}

fn submit(state: &mut AppState) {
    let result = session::login(
        &state.users,
        &state.login_form.username,
        &state.login_form.password,
        state.login_form.remember,
    );
    match result {
        Ok(record) => {
            state.session = Some(record);
            state.login_form = Default::default();
            let target = match &state.route {
                Route::Login {
                    redirect: Some(route),
                } => (**route).clone(),
                _ => Route::Dashboard,
            };
            // the login screen itself is not a back target
            state.route = target;
            state.back_stack.retain(|r| !matches!(r, Route::Login { .. }));
        }
        Err(e) => {
            state.login_form.error = Some(e.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::{press, test_state};
    use super::super::handle_event;
    use crate::state::{LoginField, Route};
    use crossterm::event::KeyCode;

    fn type_word(state: &mut crate::state::AppState, word: &str) {
        for c in word.chars() {
            handle_event(state, press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn successful_login_follows_redirect() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let base = std::env::temp_dir().join(format!(
            "listino_test_login_{}",
            std::process::id()
        ));
        let _ = std::fs::create_dir_all(&base);
        let orig_home = std::env::var_os("HOME");
        unsafe {
            std::env::set_var("HOME", base.display().to_string());
            std::env::remove_var("XDG_STATE_HOME");
            std::env::remove_var("XDG_CACHE_HOME");
        }
        let mut state = test_state();
        state.navigate(Route::Login {
            redirect: Some(Box::new(Route::Dashboard)),
        });
        type_word(&mut state, "cliente");
        handle_event(&mut state, press(KeyCode::Tab));
        assert_eq!(state.login_form.field, LoginField::Password);
        type_word(&mut state, "maestri2024");
        handle_event(&mut state, press(KeyCode::Enter));
        assert_eq!(state.route, Route::Dashboard);
        assert_eq!(state.session.as_ref().map(|s| s.role.as_str()), Some("cliente"));
        crate::session::logout();
        unsafe {
            if let Some(v) = orig_home {
                std::env::set_var("HOME", v);
            } else {
                std::env::remove_var("HOME");
            }
        }
    }

    #[test]
    fn failed_login_shows_error_and_stays() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        state.navigate(Route::Login { redirect: None });
        type_word(&mut state, "cliente");
        handle_event(&mut state, press(KeyCode::Tab));
        type_word(&mut state, "sbagliata");
        handle_event(&mut state, press(KeyCode::Enter));
        assert!(matches!(state.route, Route::Login { .. }));
        assert_eq!(
            state.login_form.error.as_deref(),
            Some("Username o password non validi")
        );
    }
}
