//! Login form for the reserved area.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::{AppState, LoginField};
use crate::theme::theme;
use crate::ui::helpers::{centered_rect, hint_line, panel};

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let th = theme();
    let form_area = centered_rect(50, 60, area);
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(2),
        Constraint::Length(2),
        Constraint::Length(1),
    ])
    .split(form_area.inner(ratatui::layout::Margin {
        horizontal: 1,
        vertical: 1,
    }));

    frame.render_widget(panel("Accesso Area Riservata"), form_area);

    render_field(
        frame,
        "Username",
        &state.login_form.username,
        state.login_form.field == LoginField::Username,
        false,
        rows[0],
    );
    render_field(
        frame,
        "Password",
        &state.login_form.password,
        state.login_form.field == LoginField::Password,
        true,
        rows[1],
    );

    let remember_mark = if state.login_form.remember { "[x]" } else { "[ ]" };
    let remember_style = if state.login_form.field == LoginField::Remember {
        Style::default().fg(th.mauve).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(th.subtext0)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            format!("{remember_mark} Ricordami"),
            remember_style,
        ))),
        rows[2],
    );

    if let Some(error) = &state.login_form.error {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(th.red),
            ))),
            rows[3],
        );
    }

    frame.render_widget(
        hint_line(&[
            ("Tab", "campo successivo"),
            ("Spazio", "ricordami"),
            ("Invio", "accedi"),
            ("Esc", "annulla"),
        ]),
        rows[4],
    );
}

fn render_field(
    frame: &mut Frame,
    label: &str,
    value: &str,
    focused: bool,
    masked: bool,
    area: Rect,
) {
    let th = theme();
    let shown = if masked {
        "•".repeat(value.chars().count())
    } else {
        value.to_string()
    };
    let mut text = shown;
    if focused {
        text.push('▎');
    }
    let block = if focused {
        crate::ui::helpers::focused_panel(label)
    } else {
        panel(label)
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(th.text)))).block(block),
        area,
    );
}
