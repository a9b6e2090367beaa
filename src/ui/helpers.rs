//! Shared widgets and layout helpers for the render modules.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};

use crate::theme::theme;

/// Standard bordered panel with a themed title.
pub fn panel(title: &str) -> Block<'static> {
    let th = theme();
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(th.surface2))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(th.overlay1),
        ))
}

/// Panel variant with the focused accent color.
pub fn focused_panel(title: &str) -> Block<'static> {
    let th = theme();
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(th.mauve))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(th.mauve),
        ))
}

/// Centered sub-rectangle sized as a percentage of `area`.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);
    let horizontal = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(vertical[1]);
    horizontal[1]
}

/// Key hint rendered as `key` + description pairs in the footer.
pub fn hint_line(pairs: &[(&str, &str)]) -> Line<'static> {
    let th = theme();
    let mut spans = Vec::with_capacity(pairs.len() * 3);
    for (i, (key, what)) in pairs.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default()));
        }
        spans.push(Span::styled(
            (*key).to_string(),
            Style::default().fg(th.sapphire),
        ));
        spans.push(Span::styled(
            format!(" {what}"),
            Style::default().fg(th.subtext0),
        ));
    }
    Line::from(spans)
}

/// Label/value pair for summary rows.
pub fn field_line(label: &str, value: &str) -> Line<'static> {
    let th = theme();
    Line::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(th.overlay2)),
        Span::styled(value.to_string(), Style::default().fg(th.text)),
    ])
}
