//! Catalog screen: filter bar, chips, result list and preview column.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph, Wrap};
use ratatui::Frame;

use crate::logic::filter;
use crate::state::{AppState, Focus};
use crate::theme::theme;
use crate::ui::helpers::{field_line, focused_panel, hint_line, panel};
use crate::util;

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(5),
        Constraint::Length(1),
    ])
    .split(area);

    render_search(frame, state, rows[0]);
    render_chips(frame, state, rows[1]);
    render_results(frame, state, rows[2]);
    frame.render_widget(
        hint_line(&[
            ("↑↓", "seleziona"),
            ("←→", "categoria"),
            ("^S", "famiglia"),
            ("^T", "componenti"),
            ("^R", "azzera"),
            ("^D", "area riservata"),
            ("Invio", "apri"),
            ("^C", "esci"),
        ]),
        rows[3],
    );
}

fn render_search(frame: &mut Frame, state: &AppState, area: Rect) {
    let th = theme();
    let block = if state.focus == Focus::Search {
        focused_panel("Cerca")
    } else {
        panel("Cerca")
    };
    let mut text = state.filter.query.clone();
    if state.focus == Focus::Search {
        text.push('▎');
    }
    let search = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(th.text),
    )))
    .block(block);
    frame.render_widget(search, area);
}

fn render_chips(frame: &mut Frame, state: &AppState, area: Rect) {
    let th = theme();
    let category = state
        .filter
        .category
        .as_deref()
        .map_or_else(|| "Tutte".to_string(), |c| state.store.category_label(c));
    let subcategory = state
        .filter
        .subcategory
        .clone()
        .unwrap_or_else(|| "Tutte".to_string());
    let component = state
        .filter
        .component
        .as_deref()
        .and_then(|id| state.tags.get(id))
        .map_or_else(
            || "Nessuno".to_string(),
            |t| format!("{} {}", t.icon, t.label),
        );
    let available = filter::available_tags(
        state.store.products(),
        &state.tags,
        state.filter.category.as_deref(),
        state.filter.subcategory.as_deref(),
    );
    let chips_line = Line::from(
        available
            .iter()
            .filter_map(|id| state.tags.get(id))
            .map(|t| {
                let active = state.filter.component.as_deref() == Some(t.id.as_str());
                let style = if active {
                    Style::default().fg(th.crust).bg(th.sapphire)
                } else {
                    Style::default().fg(th.subtext0)
                };
                Span::styled(format!(" {} {} ", t.icon, t.label), style)
            })
            .collect::<Vec<_>>(),
    );
    let body = vec![
        Line::from(vec![
            Span::styled("Categoria: ", Style::default().fg(th.overlay2)),
            Span::styled(category, Style::default().fg(th.lavender)),
            Span::styled("   Famiglia: ", Style::default().fg(th.overlay2)),
            Span::styled(subcategory, Style::default().fg(th.lavender)),
            Span::styled("   Componenti: ", Style::default().fg(th.overlay2)),
            Span::styled(component, Style::default().fg(th.lavender)),
        ]),
        chips_line,
    ];
    frame.render_widget(Paragraph::new(body).block(panel("Filtri")), area);
}

fn render_results(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let th = theme();
    if let Some(error) = &state.load_error {
        let body = vec![
            Line::from(Span::styled(
                "Impossibile caricare i dati prodotto",
                Style::default().fg(th.red).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(error.clone(), Style::default().fg(th.subtext0))),
        ];
        frame.render_widget(
            Paragraph::new(body)
                .wrap(Wrap { trim: true })
                .block(panel("Prodotti")),
            area,
        );
        return;
    }
    if state.results.is_empty() {
        let body = vec![
            Line::from(Span::styled(
                "Nessun prodotto trovato",
                Style::default().fg(th.yellow).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                "Prova a modificare i filtri, oppure premi ^R per azzerarli.",
                Style::default().fg(th.subtext0),
            )),
        ];
        frame.render_widget(Paragraph::new(body).block(panel("Prodotti")), area);
        return;
    }

    let columns =
        Layout::horizontal([Constraint::Percentage(55), Constraint::Percentage(45)]).split(area);

    let items: Vec<ListItem> = state
        .results
        .iter()
        .filter_map(|&idx| state.store.products().get(idx))
        .map(|p| {
            let mut spans = vec![
                Span::styled(
                    util::pad_columns(&p.code, 14),
                    Style::default().fg(th.sapphire),
                ),
                Span::styled(p.name.clone(), Style::default().fg(th.text)),
            ];
            if p.featured {
                spans.push(Span::styled(" ★", Style::default().fg(th.yellow)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let title = format!("Prodotti ({})", state.results.len());
    let block = if state.focus == Focus::Results {
        focused_panel(&title)
    } else {
        panel(&title)
    };
    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(th.surface1)
            .fg(th.lavender)
            .add_modifier(Modifier::BOLD),
    );
    frame.render_stateful_widget(list, columns[0], &mut state.list_state);

    render_preview(frame, state, columns[1]);
}

fn render_preview(frame: &mut Frame, state: &AppState, area: Rect) {
    let th = theme();
    let Some(p) = state.selected_product() else {
        frame.render_widget(panel("Anteprima"), area);
        return;
    };
    let variants = p.valid_variants().count();
    let mut body = vec![
        Line::from(Span::styled(
            p.name.clone(),
            Style::default().fg(th.text).add_modifier(Modifier::BOLD),
        )),
        field_line("Codice", &p.code),
        field_line("Categoria", &state.store.category_label(&p.category)),
    ];
    if let Some(sub) = &p.subcategory {
        body.push(field_line("Famiglia", sub));
    }
    if variants > 0 {
        body.push(field_line("Varianti", &variants.to_string()));
    }
    body.push(Line::default());
    body.push(Line::from(Span::styled(
        util::excerpt(&p.description, state.settings.excerpt_len),
        Style::default().fg(th.subtext0),
    )));
    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(panel("Anteprima")),
        area,
    );
}
