//! Frame rendering.
//!
//! One full-frame pass per draw: background, the active route's screen,
//! then any modal overlay on top.

mod catalog;
mod dashboard;
mod detail;
mod helpers;
mod login;
mod modals;

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::state::{AppState, Route};
use crate::theme::theme;

/// Render the whole UI for the current state.
pub fn render(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    let th = theme();
    frame.render_widget(Block::default().style(Style::default().bg(th.base)), area);
    match state.route {
        Route::Catalog => catalog::render(frame, state, area),
        Route::Detail { .. } => detail::render(frame, state, area),
        Route::Dashboard => dashboard::render(frame, state, area),
        Route::Login { .. } => login::render(frame, state, area),
    }
    modals::render(frame, state, area);
}
