//! Reserved-area dashboard: user card, statistics, documents and orders.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph, Row, Table};
use ratatui::Frame;

use crate::session::users::{self, UserRecord};
use crate::state::AppState;
use crate::theme::theme;
use crate::ui::helpers::{field_line, hint_line, panel};
use crate::util;

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let th = theme();
    let Some(session) = state.session.clone() else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Sessione scaduta. Premi Esc e accedi di nuovo.",
                Style::default().fg(th.red),
            )))
            .block(panel("Area Riservata")),
            area,
        );
        return;
    };
    let Some(user) = state.users.find(&session.username).cloned() else {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Account non più disponibile.",
                Style::default().fg(th.red),
            )))
            .block(panel("Area Riservata")),
            area,
        );
        return;
    };

    let rows = Layout::vertical([
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Min(6),
        Constraint::Length(1),
    ])
    .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("{} · {}", session.name, session.company),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )),
        field_line("Ruolo", &session.role),
    ])
    .block(panel("Area Riservata"));
    frame.render_widget(header, rows[0]);

    render_stats(frame, &user, rows[1]);

    let columns =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(rows[2]);
    render_documents(frame, &user, columns[0]);
    render_orders(frame, state, &user, columns[1]);

    frame.render_widget(
        hint_line(&[
            ("↑↓", "ordini"),
            ("Invio", "dettaglio ordine"),
            ("l", "logout"),
            ("Esc", "indietro"),
        ]),
        rows[3],
    );
}

fn render_stats(frame: &mut Frame, user: &UserRecord, area: Rect) {
    let th = theme();
    let total: f64 = user.orders.iter().map(|o| o.total).sum();
    let line = Line::from(vec![
        Span::styled("Documenti: ", Style::default().fg(th.overlay2)),
        Span::styled(
            user.documents.len().to_string(),
            Style::default().fg(th.green).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Ordini: ", Style::default().fg(th.overlay2)),
        Span::styled(
            user.orders.len().to_string(),
            Style::default().fg(th.green).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Totale ordinato: ", Style::default().fg(th.overlay2)),
        Span::styled(
            util::format_currency(total),
            Style::default().fg(th.green).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).block(panel("Riepilogo")), area);
}

fn render_documents(frame: &mut Frame, user: &UserRecord, area: Rect) {
    let th = theme();
    let title = format!("Documenti ({})", user.documents.len());
    if user.documents.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Nessun documento disponibile",
                Style::default().fg(th.overlay1),
            )))
            .block(panel(&title)),
            area,
        );
        return;
    }
    let items: Vec<ListItem> = user
        .documents
        .iter()
        .map(|id| {
            let meta = users::document_meta(id);
            ListItem::new(vec![
                Line::from(Span::styled(
                    meta.name,
                    Style::default().fg(th.text),
                )),
                Line::from(Span::styled(
                    format!("  {} · {}", meta.size, util::format_date(&meta.date)),
                    Style::default().fg(th.overlay1),
                )),
            ])
        })
        .collect();
    frame.render_widget(List::new(items).block(panel(&title)), area);
}

fn render_orders(frame: &mut Frame, state: &AppState, user: &UserRecord, area: Rect) {
    let th = theme();
    let title = format!("Ordini ({})", user.orders.len());
    if user.orders.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Nessun ordine registrato",
                Style::default().fg(th.overlay1),
            )))
            .block(panel(&title)),
            area,
        );
        return;
    }
    let rows: Vec<Row> = user
        .orders
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let style = if i == state.order_index {
                Style::default()
                    .bg(th.surface1)
                    .fg(th.lavender)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(th.text)
            };
            let status_style = if o.status == "completato" {
                Style::default().fg(th.green)
            } else {
                Style::default().fg(th.yellow)
            };
            Row::new(vec![
                Span::styled(o.id.clone(), style),
                Span::styled(util::format_date(&o.date), Style::default().fg(th.subtext0)),
                Span::styled(util::format_currency(o.total), Style::default().fg(th.text)),
                Span::styled(o.status.clone(), status_style),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Min(10),
        ],
    )
    .header(
        Row::new(vec!["Ordine", "Data", "Totale", "Stato"])
            .style(Style::default().fg(th.overlay2)),
    )
    .block(panel(&title));
    frame.render_widget(table, area);
}
