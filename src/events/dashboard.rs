//! Keys on the reserved-area dashboard.

use crossterm::event::{KeyCode, KeyEvent};

use crate::session;
use crate::state::{AppState, Modal};

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    let order_count = state
        .session
        .as_ref()
        .and_then(|s| state.users.find(&s.username))
        .map_or(0, |u| u.orders.len());
    match key.code {
        KeyCode::Esc => state.go_back(),
        KeyCode::Up => {
            state.order_index = state.order_index.saturating_sub(1);
        }
        KeyCode::Down => {
            if order_count > 0 && state.order_index + 1 < order_count {
                state.order_index += 1;
            }
        }
        KeyCode::Enter => {
            let order_id = state
                .session
                .as_ref()
                .and_then(|s| state.users.find(&s.username))
                .and_then(|u| u.orders.get(state.order_index))
                .map(|o| o.id.clone());
            if let Some(order_id) = order_id {
                state.modal = Modal::OrderDetail { order_id };
            }
        }
        KeyCode::Char('l') => {
            session::logout();
            state.session = None;
            state.order_index = 0;
            state.go_back();
        }
        _ => {}
    }
}
