//! Product detail and variant sub-page rendering.
//!
//! Images cannot be drawn in a terminal, so the gallery panel shows the
//! current image path with its position and lets the lightbox overlay zoom
//! into the list.

use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{List, ListItem, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

use crate::logic::detail::{self, ProductView, VariantView};
use crate::logic::gallery::GalleryPhase;
use crate::state::{AppState, Route};
use crate::theme::theme;
use crate::ui::helpers::{field_line, hint_line, panel};

pub fn render(frame: &mut Frame, state: &mut AppState, area: Rect) {
    let th = theme();
    let Route::Detail { product_id, sub } = state.route.clone() else {
        return;
    };
    let Some(product) = state.store.product_by_id(&product_id).cloned() else {
        let body = vec![
            Line::from(Span::styled(
                "Prodotto non trovato",
                Style::default().fg(th.red).add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(Span::styled(
                format!("Nessun prodotto con id \"{product_id}\". Premi Esc per tornare al catalogo."),
                Style::default().fg(th.subtext0),
            )),
        ];
        frame.render_widget(Paragraph::new(body).block(panel("Dettaglio")), area);
        return;
    };

    if let Some(code) = sub {
        match product.variant(&code) {
            Some(variant) => {
                let view = detail::variant_view(
                    &state.store,
                    &product,
                    variant,
                    &state.settings.contact_email,
                );
                render_variant(frame, state, &view, area);
            }
            None => {
                let body = vec![
                    Line::from(Span::styled(
                        "Variante non trovata",
                        Style::default().fg(th.red).add_modifier(Modifier::BOLD),
                    )),
                    Line::default(),
                    Line::from(Span::styled(
                        format!(
                            "{} non ha una variante \"{code}\". Premi Esc per tornare alla scheda.",
                            product.name
                        ),
                        Style::default().fg(th.subtext0),
                    )),
                ];
                frame.render_widget(Paragraph::new(body).block(panel("Dettaglio")), area);
            }
        }
        return;
    }

    let view = detail::product_view(
        &state.store,
        &state.drawings,
        &product,
        &state.settings.contact_email,
        state.settings.related_limit,
    );
    render_product(frame, state, &view, area);
}

fn render_product(frame: &mut Frame, state: &AppState, view: &ProductView, area: Rect) {
    let th = theme();
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(5),
        Constraint::Length(1),
    ])
    .split(area);

    let mut badges = vec![
        Span::styled(
            format!(" {} ", view.category_label),
            Style::default().fg(th.crust).bg(th.sapphire),
        ),
        Span::raw(" "),
        Span::styled(
            format!(" {} ", view.subcategory.as_deref().unwrap_or("Catalogo")),
            Style::default().fg(th.text).bg(th.surface1),
        ),
    ];
    if view.featured {
        badges.push(Span::raw(" "));
        badges.push(Span::styled(
            " ★ In Evidenza ",
            Style::default().fg(th.crust).bg(th.yellow),
        ));
    }
    let header = Paragraph::new(Line::from(badges)).block(panel(&view.name));
    frame.render_widget(header, rows[0]);

    let columns =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(rows[1]);
    render_gallery(frame, state, columns[0]);
    render_info(frame, state, view, columns[1]);
    render_related(frame, view, rows[2]);
    frame.render_widget(
        hint_line(&[
            ("↑↓", "varianti"),
            ("v", "scheda variante"),
            ("←→", "immagini"),
            ("a", "slideshow"),
            ("Invio", "lightbox"),
            ("s", "condividi"),
            ("i", "richiedi info"),
            ("Esc", "indietro"),
        ]),
        rows[3],
    );
}

fn render_gallery(frame: &mut Frame, state: &AppState, area: Rect) {
    let th = theme();
    let g = &state.gallery;
    let title = if g.is_empty() {
        "Immagini".to_string()
    } else {
        format!("Immagini {}", g.caption())
    };
    let mut body = Vec::new();
    match g.current() {
        Some(current) => {
            body.push(Line::from(Span::styled(
                format!("▣ {current}"),
                Style::default().fg(th.text).add_modifier(Modifier::BOLD),
            )));
            body.push(Line::default());
            for (i, img) in g.images().iter().enumerate() {
                let style = if i == g.index() {
                    Style::default().fg(th.lavender)
                } else {
                    Style::default().fg(th.overlay1)
                };
                body.push(Line::from(Span::styled(format!("  {} {img}", i + 1), style)));
            }
            if g.phase() == GalleryPhase::Cycling {
                body.push(Line::default());
                body.push(Line::from(Span::styled(
                    "slideshow attivo",
                    Style::default().fg(th.green),
                )));
            }
        }
        None => {
            body.push(Line::from(Span::styled(
                "Nessuna immagine disponibile",
                Style::default().fg(th.overlay1),
            )));
        }
    }
    frame.render_widget(Paragraph::new(body).block(panel(&title)), area);
}

fn render_info(frame: &mut Frame, state: &AppState, view: &ProductView, area: Rect) {
    let th = theme();
    let rows = Layout::vertical([Constraint::Min(4), Constraint::Percentage(55)]).split(area);

    let mut body = vec![
        field_line("Codice", &view.code),
        Line::default(),
        Line::from(Span::styled(
            if view.description.is_empty() {
                "Nessuna descrizione disponibile.".to_string()
            } else {
                view.description.clone()
            },
            Style::default().fg(th.subtext0),
        )),
    ];
    if let Some(sheet) = &view.tech_sheet {
        body.push(Line::default());
        body.push(field_line("Scheda tecnica", sheet));
    }
    if !view.drawings.is_empty() {
        body.push(Line::default());
        body.push(Line::from(Span::styled(
            "Disegni tecnici:",
            Style::default().fg(th.overlay2),
        )));
        for d in &view.drawings {
            body.push(Line::from(Span::styled(
                format!("  ◫ {d}"),
                Style::default().fg(th.subtext1),
            )));
        }
    }
    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(panel("Descrizione")),
        rows[0],
    );

    let lower =
        Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).split(rows[1]);
    render_specs(frame, &view.specs, "Specifiche Tecniche", lower[0]);
    render_variants(frame, state, view, lower[1]);
}

fn render_specs(frame: &mut Frame, specs: &[crate::logic::specs::SpecRow], title: &str, area: Rect) {
    let th = theme();
    if specs.is_empty() {
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                "Nessuna specifica disponibile",
                Style::default().fg(th.overlay1),
            )))
            .block(panel(title)),
            area,
        );
        return;
    }
    let rows: Vec<Row> = specs
        .iter()
        .map(|r| {
            Row::new(vec![
                Span::styled(r.label.clone(), Style::default().fg(th.overlay2)),
                Span::styled(
                    r.value.clone(),
                    Style::default().fg(th.text).add_modifier(Modifier::BOLD),
                ),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [Constraint::Percentage(45), Constraint::Percentage(55)],
    )
    .block(panel(title));
    frame.render_widget(table, area);
}

fn render_variants(frame: &mut Frame, state: &AppState, view: &ProductView, area: Rect) {
    let th = theme();
    let title = format!("Varianti ({})", view.variants.len());
    if view.variants.is_empty() {
        frame.render_widget(panel(&title), area);
        return;
    }
    let items: Vec<ListItem> = view
        .variants
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let style = if i == state.variant_index {
                Style::default()
                    .bg(th.surface1)
                    .fg(th.lavender)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(th.text)
            };
            let detail = if v.detail.is_empty() {
                "Dettagli non specificati".to_string()
            } else {
                v.detail.clone()
            };
            ListItem::new(Line::from(vec![
                Span::styled(crate::util::pad_columns(&v.code, 14), style),
                Span::styled(detail, Style::default().fg(th.subtext0)),
            ]))
        })
        .collect();
    frame.render_widget(List::new(items).block(panel(&title)), area);
}

fn render_related(frame: &mut Frame, view: &ProductView, area: Rect) {
    let th = theme();
    let title = format!("Prodotti Correlati ({})", view.related.len());
    if view.related.is_empty() {
        frame.render_widget(panel(&title), area);
        return;
    }
    let body: Vec<Line> = view
        .related
        .iter()
        .map(|r| {
            let mut spans = vec![
                Span::styled(
                    crate::util::pad_columns(&r.code, 14),
                    Style::default().fg(th.sapphire),
                ),
                Span::styled(r.name.clone(), Style::default().fg(th.text)),
            ];
            if r.variant_count > 0 {
                spans.push(Span::styled(
                    format!("  ({} varianti)", r.variant_count),
                    Style::default().fg(th.overlay1),
                ));
            }
            Line::from(spans)
        })
        .collect();
    frame.render_widget(Paragraph::new(body).block(panel(&title)), area);
}

fn render_variant(frame: &mut Frame, state: &AppState, view: &VariantView, area: Rect) {
    let th = theme();
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Length(1),
    ])
    .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            format!(" {} ", view.category_label),
            Style::default().fg(th.crust).bg(th.sapphire),
        ),
        Span::raw(" "),
        Span::styled(
            format!(" Variante {} di {} ", view.position, view.sibling_total),
            Style::default().fg(th.text).bg(th.surface1),
        ),
        Span::raw("  "),
        Span::styled(
            format!("Parte di: {} ({})", view.parent_name, view.parent_code),
            Style::default().fg(th.subtext0),
        ),
    ]))
    .block(panel(&view.code));
    frame.render_widget(header, rows[0]);

    let columns =
        Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)]).split(rows[1]);
    render_gallery(frame, state, columns[0]);

    let right = Layout::vertical([Constraint::Min(4), Constraint::Percentage(55)]).split(columns[1]);
    let mut body = vec![Line::from(Span::styled(
        if view.detail.is_empty() {
            "Dettagli non specificati".to_string()
        } else {
            view.detail.clone()
        },
        Style::default().fg(th.subtext0),
    ))];
    if let Some(sheet) = &view.tech_sheet {
        body.push(Line::default());
        body.push(field_line("Scheda tecnica", sheet));
    }
    if !view.siblings.is_empty() {
        body.push(Line::default());
        body.push(Line::from(Span::styled(
            format!("Altre varianti di {}:", view.parent_name),
            Style::default().fg(th.overlay2),
        )));
        for s in &view.siblings {
            body.push(Line::from(Span::styled(
                format!("  {} ", s.code),
                Style::default().fg(th.subtext1),
            )));
        }
    }
    frame.render_widget(
        Paragraph::new(body)
            .wrap(Wrap { trim: true })
            .block(panel("Dettaglio")),
        right[0],
    );
    render_specs(frame, &view.specs, "Specifiche", right[1]);

    frame.render_widget(
        hint_line(&[
            ("[ ]", "altre varianti"),
            ("←→", "immagini"),
            ("Invio", "lightbox"),
            ("s", "condividi"),
            ("i", "richiedi info"),
            ("Esc", "scheda prodotto"),
        ]),
        rows[2],
    );
}
