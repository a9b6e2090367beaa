//! Keys on the catalog screen.
//!
//! Typing edits the search box (debounced); arrows move the selection;
//! Left/Right cycle the category and Ctrl-S/Ctrl-T cycle the sub-category
//! and component chips. Filter changes other than typing apply immediately.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::logic::filter;
use crate::state::{AppState, Focus, Route};

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('r') => {
                state.filter.reset();
                state.refresh_results();
            }
            KeyCode::Char('s') => cycle_subcategory(state),
            KeyCode::Char('t') => cycle_component(state),
            KeyCode::Char('d') => open_dashboard(state),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Tab => {
            state.focus = match state.focus {
                Focus::Search => Focus::Results,
                Focus::Results => Focus::Search,
            };
        }
        KeyCode::Up => state.move_selection(-1),
        KeyCode::Down => state.move_selection(1),
        KeyCode::PageUp => state.move_selection(-10),
        KeyCode::PageDown => state.move_selection(10),
        KeyCode::Left => cycle_category(state, -1),
        KeyCode::Right => cycle_category(state, 1),
        KeyCode::Enter => {
            if let Some(id) = state.selected_product().map(|p| p.id.clone()) {
                state.open_detail(&id, None);
            }
        }
        KeyCode::Esc => {
            if state.filter.is_active() {
                state.filter.reset();
                state.refresh_results();
            }
        }
        KeyCode::Backspace => {
            if state.focus == Focus::Search && state.filter.query.pop().is_some() {
                state.touch_input();
            }
        }
        KeyCode::Char(c) => {
            if state.focus == Focus::Search {
                state.filter.query.push(c);
                state.touch_input();
            }
        }
        _ => {}
    }
}

fn open_dashboard(state: &mut AppState) {
    if state.session.is_some() {
        state.navigate(Route::Dashboard);
    } else {
        state.navigate(Route::Login {
            redirect: Some(Box::new(Route::Dashboard)),
        });
    }
}

/// Cycle None -> first -> ... -> last -> None through the category list.
fn cycle_category(state: &mut AppState, delta: isize) {
    let ids: Vec<String> = state.store.categories().iter().map(|c| c.id.clone()).collect();
    if ids.is_empty() {
        return;
    }
    let slots = ids.len() as isize + 1;
    let current = match &state.filter.category {
        None => 0,
        Some(id) => ids.iter().position(|c| c == id).map_or(0, |i| i as isize + 1),
    };
    let next = (current + delta).rem_euclid(slots);
    state.filter.category = if next == 0 {
        None
    } else {
        Some(ids[(next - 1) as usize].clone())
    };
    // sub-category options and chip availability depend on the category
    state.filter.subcategory = None;
    state.filter.component = None;
    state.refresh_results();
}

fn cycle_subcategory(state: &mut AppState) {
    let options = filter::subcategory_options(state.store.products(), state.filter.category.as_deref());
    if options.is_empty() {
        state.filter.subcategory = None;
        return;
    }
    state.filter.subcategory = match &state.filter.subcategory {
        None => Some(options[0].clone()),
        Some(current) => match options.iter().position(|o| o == current) {
            Some(i) if i + 1 < options.len() => Some(options[i + 1].clone()),
            _ => None,
        },
    };
    state.refresh_results();
}

fn cycle_component(state: &mut AppState) {
    let available = filter::available_tags(
        state.store.products(),
        &state.tags,
        state.filter.category.as_deref(),
        state.filter.subcategory.as_deref(),
    );
    if available.is_empty() {
        state.filter.component = None;
        return;
    }
    state.filter.component = match &state.filter.component {
        None => Some(available[0].clone()),
        Some(current) => match available.iter().position(|t| t == current) {
            Some(i) if i + 1 < available.len() => Some(available[i + 1].clone()),
            _ => None,
        },
    };
    state.refresh_results();
}

#[cfg(test)]
mod tests {
    use super::super::tests::{ctrl, press, test_state};
    use super::super::handle_event;
    use crate::state::{Focus, Route};
    use crossterm::event::KeyCode;

    #[test]
    fn typing_updates_query_and_marks_dirty() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        handle_event(&mut state, press(KeyCode::Char('u')));
        handle_event(&mut state, press(KeyCode::Char('r')));
        assert_eq!(state.filter.query, "ur");
        assert!(state.filter_dirty);
        handle_event(&mut state, press(KeyCode::Backspace));
        assert_eq!(state.filter.query, "u");
    }

    #[test]
    fn category_cycling_wraps_through_none() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        handle_event(&mut state, press(KeyCode::Right));
        assert_eq!(state.filter.category.as_deref(), Some("grasso"));
        handle_event(&mut state, press(KeyCode::Right));
        assert_eq!(state.filter.category.as_deref(), Some("urea"));
        handle_event(&mut state, press(KeyCode::Right));
        assert_eq!(state.filter.category, None);
        handle_event(&mut state, press(KeyCode::Left));
        assert_eq!(state.filter.category.as_deref(), Some("urea"));
    }

    #[test]
    fn category_change_drops_scoped_filters() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        handle_event(&mut state, press(KeyCode::Right));
        assert_eq!(state.filter.category.as_deref(), Some("grasso"));
        handle_event(&mut state, ctrl('s'));
        handle_event(&mut state, ctrl('t'));
        assert!(state.filter.subcategory.is_some());
        assert!(state.filter.component.is_some());
        // the chips picked above may not exist in the next category
        handle_event(&mut state, press(KeyCode::Right));
        assert_eq!(state.filter.category.as_deref(), Some("urea"));
        assert_eq!(state.filter.subcategory, None);
        assert_eq!(state.filter.component, None);
    }

    #[test]
    fn enter_opens_detail_for_selection() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        state.focus = Focus::Results;
        handle_event(&mut state, press(KeyCode::Enter));
        assert!(matches!(state.route, Route::Detail { ref product_id, .. } if product_id == "GR-1"));
    }

    #[test]
    fn esc_resets_active_filters() {
        let _guard = crate::theme::test_mutex().lock().unwrap();
        let mut state = test_state();
        handle_event(&mut state, press(KeyCode::Right));
        assert!(state.filter.is_active());
        handle_event(&mut state, press(KeyCode::Esc));
        assert!(!state.filter.is_active());
        assert_eq!(state.results.len(), 2);
    }
}
