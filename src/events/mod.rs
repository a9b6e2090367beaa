//! Keyboard event dispatch.
//!
//! Events arrive from the input thread and are routed by overlay first, then
//! by route. Handlers mutate [`AppState`] only; rendering happens on the
//! next frame.

mod catalog;
mod dashboard;
mod detail;
mod login;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::state::{AppState, Modal, Route};

/// Entry point for one terminal event.
pub fn handle_event(state: &mut AppState, event: Event) {
    if let Event::Key(key) = event
        && key.kind == KeyEventKind::Press
    {
        handle_key(state, key);
    }
}

fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    if state.modal != Modal::None {
        handle_modal(state, key);
        return;
    }
    match state.route {
        Route::Catalog => catalog::handle_key(state, key),
        Route::Detail { .. } => detail::handle_key(state, key),
        Route::Dashboard => dashboard::handle_key(state, key),
        Route::Login { .. } => login::handle_key(state, key),
    }
}

/// Keys while an overlay is open; the overlay swallows everything.
fn handle_modal(state: &mut AppState, key: KeyEvent) {
    match &state.modal {
        Modal::Lightbox => match key.code {
            KeyCode::Left => state.gallery.prev(),
            KeyCode::Right => state.gallery.next(),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => {
                state.gallery.close_lightbox();
                state.modal = Modal::None;
            }
            KeyCode::Char(c) if c.is_ascii_digit() => {
                // thumbnail selection; out-of-range digits are ignored
                if let Some(n) = c.to_digit(10)
                    && n >= 1
                    && n as usize <= state.gallery.len()
                {
                    state.gallery.jump(n as usize - 1);
                }
            }
            _ => {}
        },
        Modal::Notice => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                crate::session::record_consent();
                state.modal = Modal::None;
            }
        }
        Modal::Alert { .. } | Modal::OrderDetail { .. } | Modal::ShareLink { .. } => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                state.modal = Modal::None;
            }
        }
        Modal::None => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogStore, Dataset};
    use crate::logic::detail::DrawingTable;
    use crate::logic::tags::TagSet;
    use crate::session::users::UserTable;
    use crate::state::{AppState, Focus};
    use crate::theme::Settings;
    use crossterm::event::{KeyEvent, KeyEventKind, KeyEventState};

    pub(super) fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    pub(super) fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent {
            code: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    pub(super) fn test_state() -> AppState {
        let dataset: Dataset = serde_json::from_str(
            r#"{
                "categorie": [
                    {"id": "grasso", "nome": "Grasso"},
                    {"id": "urea", "nome": "Urea"}
                ],
                "prodotti": [
                    {"id": "GR-1", "nome": "Pompa grasso manuale", "categoria": "grasso",
                     "sottocategoria": "Manuale", "immagine": "a.jpg",
                     "sottoprodotti": [
                        {"codice": "V1", "dettaglio": "Capacità: 500 g", "immagine": "b.jpg"},
                        {"codice": "V2", "dettaglio": "Capacità: 900 g"}
                     ]},
                    {"id": "UR-1", "nome": "Tubo erogazione urea", "categoria": "urea"}
                ]
            }"#,
        )
        .expect("fixture parses");
        let mut settings = Settings::default();
        settings.debounce_ms = 0;
        AppState::new(
            CatalogStore::from_dataset(dataset, "test"),
            TagSet::builtin(),
            DrawingTable::builtin(),
            UserTable::builtin(),
            settings,
            None,
        )
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        handle_event(&mut state, ctrl('c'));
        assert!(state.should_quit);
    }

    #[test]
    fn lightbox_swallows_navigation_keys() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        state.open_detail("GR-1", None);
        state.gallery.open_lightbox();
        state.modal = Modal::Lightbox;
        handle_event(&mut state, press(KeyCode::Right));
        assert_eq!(state.gallery.index(), 1);
        handle_event(&mut state, press(KeyCode::Esc));
        assert_eq!(state.modal, Modal::None);
        // still on the detail route, Esc went to the overlay
        assert!(matches!(state.route, Route::Detail { .. }));
    }

    #[test]
    fn non_press_events_are_ignored() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        state.focus = Focus::Search;
        handle_event(
            &mut state,
            Event::Key(KeyEvent {
                code: KeyCode::Char('x'),
                modifiers: KeyModifiers::NONE,
                kind: KeyEventKind::Release,
                state: KeyEventState::NONE,
            }),
        );
        assert!(state.filter.query.is_empty());
    }
}
