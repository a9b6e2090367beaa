//! Overlay rendering: lightbox, alerts, share links, order details and the
//! first-run notice.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::state::{AppState, Modal};
use crate::theme::theme;
use crate::ui::helpers::{centered_rect, field_line, panel};
use crate::util;

pub fn render(frame: &mut Frame, state: &AppState, area: Rect) {
    match &state.modal {
        Modal::None => {}
        Modal::Lightbox => render_lightbox(frame, state, area),
        Modal::Alert { title, message } => render_text_modal(frame, title, message, area),
        Modal::ShareLink { url } => render_text_modal(frame, "Condividi", url, area),
        Modal::OrderDetail { order_id } => render_order(frame, state, order_id, area),
        Modal::Notice => render_notice(frame, area),
    }
}

fn render_lightbox(frame: &mut Frame, state: &AppState, area: Rect) {
    let th = theme();
    let rect = centered_rect(80, 70, area);
    frame.render_widget(Clear, rect);
    let g = &state.gallery;
    let mut body = Vec::new();
    if let Some(current) = g.current() {
        body.push(Line::from(Span::styled(
            current.to_string(),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )));
        body.push(Line::default());
        for (i, img) in g.images().iter().enumerate() {
            let marker = if i == g.index() { "▶" } else { " " };
            let style = if i == g.index() {
                Style::default().fg(th.lavender)
            } else {
                Style::default().fg(th.overlay1)
            };
            body.push(Line::from(Span::styled(
                format!("{marker} {img}"),
                style,
            )));
        }
        body.push(Line::default());
        body.push(Line::from(Span::styled(
            "←→ naviga · 1-9 salta · Esc chiudi",
            Style::default().fg(th.overlay2),
        )));
    }
    let title = format!("Immagine {}", g.caption());
    frame.render_widget(Paragraph::new(body).block(panel(&title)), rect);
}

fn render_text_modal(frame: &mut Frame, title: &str, message: &str, area: Rect) {
    let th = theme();
    let rect = centered_rect(60, 30, area);
    frame.render_widget(Clear, rect);
    let body = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(th.text),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Invio/Esc per chiudere",
            Style::default().fg(th.overlay2),
        )),
    ];
    frame.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: true }).block(panel(title)),
        rect,
    );
}

fn render_order(frame: &mut Frame, state: &AppState, order_id: &str, area: Rect) {
    let th = theme();
    let rect = centered_rect(50, 40, area);
    frame.render_widget(Clear, rect);
    let order = state
        .session
        .as_ref()
        .and_then(|s| state.users.find(&s.username))
        .and_then(|u| u.orders.iter().find(|o| o.id == order_id))
        .cloned();
    let body = match order {
        Some(o) => vec![
            field_line("Ordine", &o.id),
            field_line("Data", &util::format_date(&o.date)),
            field_line("Totale", &util::format_currency(o.total)),
            field_line("Stato", &o.status),
            Line::default(),
            Line::from(Span::styled(
                "Invio/Esc per chiudere",
                Style::default().fg(th.overlay2),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "Ordine non trovato",
            Style::default().fg(th.red),
        ))],
    };
    frame.render_widget(Paragraph::new(body).block(panel("Dettaglio Ordine")), rect);
}

fn render_notice(frame: &mut Frame, area: Rect) {
    let th = theme();
    let rect = centered_rect(60, 40, area);
    frame.render_widget(Clear, rect);
    let body = vec![
        Line::from(Span::styled(
            "Informativa",
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Questa applicazione salva sessione e preferenze solo sul tuo \
             dispositivo. Nessun dato viene inviato a server esterni.",
            Style::default().fg(th.subtext0),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Invio per continuare",
            Style::default().fg(th.overlay2),
        )),
    ];
    frame.render_widget(
        Paragraph::new(body).wrap(Wrap { trim: true }).block(panel("Benvenuto")),
        rect,
    );
}
