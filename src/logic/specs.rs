//! Specification labels and informal spec mining.
//!
//! Products carry a structured `specifiche` map; variants instead pack their
//! specs into a free-text `dettaglio` line ("Capacità: 500 g, Peso: 1,2 kg").
//! This module turns both into uniform label/value rows.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::catalog::model::Product;

/// A single label/value row ready for the specs table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpecRow {
    pub label: String,
    pub value: String,
}

/// Known spec keys and their display labels.
const SPEC_LABELS: &[(&str, &str)] = &[
    ("portata", "Portata"),
    ("pressione", "Pressione"),
    ("pressione_max", "Pressione Max"),
    ("alimentazione", "Alimentazione"),
    ("capacita", "Capacità"),
    ("peso", "Peso"),
    ("dimensioni", "Dimensioni"),
    ("materiale", "Materiale"),
    ("potenza", "Potenza"),
    ("voltaggio", "Voltaggio"),
    ("tensione", "Tensione"),
    ("temperatura", "Temperatura"),
    ("lunghezza", "Lunghezza"),
    ("diametro", "Diametro"),
    ("attacco", "Attacco"),
];

/// Spec keys that are dataset bookkeeping, never shown to users.
const HIDDEN_KEYS: &[&str] = &["fonte"];

/// Display label for a spec key. Unknown keys fall back to the key itself
/// with underscores spaced out and the first letter capitalized.
#[must_use]
pub fn spec_label(key: &str) -> String {
    if let Some((_, label)) = SPEC_LABELS.iter().find(|(k, _)| *k == key) {
        return (*label).to_string();
    }
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => spaced,
    }
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(true) => "Sì".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Structured spec rows for a product, in map order, bookkeeping keys
/// excluded.
#[must_use]
pub fn spec_rows(product: &Product) -> Vec<SpecRow> {
    product
        .specs
        .iter()
        .filter(|(k, _)| !HIDDEN_KEYS.contains(&k.as_str()))
        .map(|(k, v)| SpecRow {
            label: spec_label(k),
            value: value_text(v),
        })
        .collect()
}

/// Ordered miners applied to a variant detail line. Order is fixed so the
/// resulting rows always appear in the same sequence.
fn miners() -> &'static [(&'static str, Regex)] {
    static MINERS: OnceLock<Vec<(&'static str, Regex)>> = OnceLock::new();
    MINERS.get_or_init(|| {
        // Patterns are static and known-valid.
        #[allow(clippy::unwrap_used)]
        let rx = |p: &str| Regex::new(p).unwrap();
        vec![
            (
                "Capacità",
                rx(r"(?i)capacit[àa]\s*:?\s*(\d+(?:[.,]\d+)?\s*(?:kg|g|lt|l|ml|litri)?)"),
            ),
            ("Peso", rx(r"(?i)peso\s*:?\s*(\d+(?:[.,]\d+)?\s*(?:kg|g)?)")),
            (
                "Dimensioni",
                rx(r"(?i)(?:dimensioni|misure)\s*:?\s*(\d[\dx×.,\s]*(?:mm|cm|m)?)"),
            ),
            (
                "Pressione Max",
                rx(r"(?i)pressione(?:\s+max\.?)?\s*:?\s*(\d+(?:[.,]\d+)?\s*(?:bar|psi|atm)?)"),
            ),
            (
                "Temperatura",
                rx(r"(?i)temperatura\s*:?\s*(-?\d+(?:[.,]\d+)?\s*°?\s*C?)"),
            ),
            (
                "Lunghezza",
                rx(r"(?i)lunghezza\s*:?\s*(\d+(?:[.,]\d+)?\s*(?:mm|cm|mt|m)?)"),
            ),
            (
                "Portata",
                rx(r"(?i)portata\s*:?\s*(\d+(?:[.,]\d+)?\s*(?:l/min|lt/min|l/h)?)"),
            ),
            (
                "Alimentazione",
                rx(r"(?i)alimentazione\s*:?\s*([^,;]+)"),
            ),
            (
                "Potenza",
                rx(r"(?i)potenza\s*:?\s*(\d+(?:[.,]\d+)?\s*(?:kw|w|hp|cv)?)"),
            ),
            (
                "Voltaggio",
                rx(r"(?i)(?:volt(?:aggio)?|tensione)\s*:?\s*(\d+(?:[.,]\d+)?\s*V?(?:\s*(?:AC|DC))?)"),
            ),
        ]
    })
}

/// What: Mine label/value rows out of a variant's free-text detail line.
///
/// Inputs:
/// - `detail`: The raw `dettaglio` string.
///
/// Output: Rows in miner order; an empty vector when nothing is recognized,
/// in which case callers show the raw line instead.
#[must_use]
pub fn mine_variant_specs(detail: &str) -> Vec<SpecRow> {
    let mut rows = Vec::new();
    for (label, rx) in miners() {
        if let Some(cap) = rx.captures(detail)
            && let Some(m) = cap.get(1)
        {
            let value = m.as_str().trim();
            if !value.is_empty() {
                rows.push(SpecRow {
                    label: (*label).to_string(),
                    value: value.to_string(),
                });
            }
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::Product;
    use std::collections::BTreeMap;

    #[test]
    fn known_labels_and_fallback() {
        assert_eq!(spec_label("portata"), "Portata");
        assert_eq!(spec_label("capacita"), "Capacità");
        assert_eq!(spec_label("corpo_pompa"), "Corpo pompa");
    }

    #[test]
    fn spec_rows_hide_bookkeeping_keys() {
        let mut specs = BTreeMap::new();
        specs.insert("portata".to_string(), serde_json::json!("30 l/min"));
        specs.insert("fonte".to_string(), serde_json::json!("catalogo 2023"));
        specs.insert("omologato".to_string(), serde_json::json!(true));
        let p = Product {
            specs,
            ..Product::default()
        };
        let rows = spec_rows(&p);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.label != "Fonte"));
        assert!(rows.iter().any(|r| r.label == "Omologato" && r.value == "Sì"));
    }

    #[test]
    fn mining_extracts_rows_in_fixed_order() {
        let rows = mine_variant_specs("Peso: 1,2 kg, Capacità: 500 g, Pressione Max: 400 bar");
        let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Capacità", "Peso", "Pressione Max"]);
        assert_eq!(rows[0].value, "500 g");
        assert_eq!(rows[1].value, "1,2 kg");
        assert_eq!(rows[2].value, "400 bar");
    }

    #[test]
    fn mining_handles_voltage_synonyms() {
        let rows = mine_variant_specs("Tensione: 230 V AC, Potenza: 370 W");
        assert!(rows.iter().any(|r| r.label == "Voltaggio" && r.value == "230 V AC"));
        assert!(rows.iter().any(|r| r.label == "Potenza" && r.value == "370 W"));
    }

    #[test]
    fn unrecognized_detail_yields_no_rows() {
        assert!(mine_variant_specs("Modello con impugnatura ergonomica").is_empty());
    }
}
