//! The catalog filter engine.
//!
//! Filtering is a pure function from the full product list plus a
//! [`FilterState`] to an ordered result set. Predicates always run in the
//! same sequence (category, sub-category, component tag, free text) and each
//! one only narrows, so adding criteria can never grow the result.

use crate::catalog::model::Product;
use crate::logic::tags::TagSet;
use crate::util::normalize_text;

/// The active filter criteria. `None`/empty means "no restriction".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected category id, including cross-listed membership.
    pub category: Option<String>,
    /// Selected sub-category (exact label match within the category).
    pub subcategory: Option<String>,
    /// Selected component tag id.
    pub component: Option<String>,
    /// Raw free-text query; normalized at match time.
    pub query: String,
}

impl FilterState {
    /// Whether any criterion is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.category.is_some()
            || self.subcategory.is_some()
            || self.component.is_some()
            || !self.query.trim().is_empty()
    }

    /// Clear every criterion at once.
    pub fn reset(&mut self) {
        *self = FilterState::default();
    }
}

/// Distinguishes "the dataset is empty" from "your filters matched nothing";
/// the two get different empty-state panels.
#[derive(Debug, PartialEq)]
pub enum FilterOutcome<'a> {
    /// No products exist at all.
    NoProducts,
    /// Products exist but none matched the active criteria.
    NoMatch,
    /// At least one product matched, in dataset order.
    Matches(Vec<&'a Product>),
}

/// A product belongs to a category either directly or through `anche_in`
/// cross-listing.
#[must_use]
pub fn in_category(product: &Product, category: &str) -> bool {
    product.category == category || product.also_in.iter().any(|c| c == category)
}

fn matches_query(product: &Product, needle: &str) -> bool {
    normalize_text(&product.name).contains(needle)
        || normalize_text(&product.code).contains(needle)
        || normalize_text(&product.description).contains(needle)
}

/// What: Apply the full filter pipeline to `products`.
///
/// Inputs:
/// - `products`: Full catalog, in dataset order.
/// - `state`: Active criteria.
/// - `tags`: Component-tag table used to resolve `state.component`.
///
/// Output: A [`FilterOutcome`]; matches keep their original relative order.
///
/// Details:
/// - The free-text query is trimmed and case-folded; an all-whitespace query
///   is a no-op.
/// - An unknown component-tag id matches nothing.
#[must_use]
pub fn apply<'a>(
    products: &'a [Product],
    state: &FilterState,
    tags: &TagSet,
) -> FilterOutcome<'a> {
    if products.is_empty() {
        return FilterOutcome::NoProducts;
    }
    let needle = normalize_text(state.query.trim());
    let matches: Vec<&Product> = products
        .iter()
        .filter(|p| {
            state
                .category
                .as_deref()
                .is_none_or(|c| in_category(p, c))
        })
        .filter(|p| {
            state
                .subcategory
                .as_deref()
                .is_none_or(|s| p.subcategory.as_deref() == Some(s))
        })
        .filter(|p| {
            state
                .component
                .as_deref()
                .is_none_or(|t| tags.matches(t, p))
        })
        .filter(|p| needle.is_empty() || matches_query(p, &needle))
        .collect();
    if matches.is_empty() {
        FilterOutcome::NoMatch
    } else {
        FilterOutcome::Matches(matches)
    }
}

/// Distinct sub-category labels within the selected category, sorted
/// case-insensitively for display. With no category selected the whole
/// catalog contributes.
#[must_use]
pub fn subcategory_options(products: &[Product], category: Option<&str>) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for p in products {
        if category.is_some_and(|c| !in_category(p, c)) {
            continue;
        }
        if let Some(s) = p.subcategory.as_deref()
            && !s.trim().is_empty()
            && !labels.iter().any(|l| l == s)
        {
            labels.push(s.to_string());
        }
    }
    labels.sort_by(|a, b| normalize_text(a).cmp(&normalize_text(b)));
    labels
}

/// Ids of the tags that match at least one product in the current
/// category/sub-category scope; chips with no possible hits are hidden.
#[must_use]
pub fn available_tags(
    products: &[Product],
    tags: &TagSet,
    category: Option<&str>,
    subcategory: Option<&str>,
) -> Vec<String> {
    tags.all()
        .iter()
        .filter(|t| {
            products.iter().any(|p| {
                category.is_none_or(|c| in_category(p, c))
                    && subcategory.is_none_or(|s| p.subcategory.as_deref() == Some(s))
                    && t.pattern.is_match(&crate::logic::tags::haystack(p))
            })
        })
        .map(|t| t.id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::Product;
    use std::collections::BTreeMap;

    fn product(id: &str, name: &str, category: &str, also_in: &[&str], sub: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            code: format!("{}-C", id.to_uppercase()),
            category: category.to_string(),
            subcategory: sub.map(str::to_string),
            also_in: also_in.iter().map(|s| (*s).to_string()).collect(),
            description: String::new(),
            image: None,
            variants: Vec::new(),
            tech_sheet: None,
            specs: BTreeMap::new(),
            featured: false,
        }
    }

    fn fixture() -> Vec<Product> {
        vec![
            product("gr-1", "Pompa a mano per grasso", "grasso", &[], Some("Manuale")),
            product("gr-2", "Serbatoio grasso 50 kg", "grasso", &[], Some("Stoccaggio")),
            product("ol-1", "Pompa pneumatica olio", "olio", &["grasso"], Some("Pneumatica")),
            product("ur-1", "Tubo di erogazione urea", "urea", &[], None),
        ]
    }

    #[test]
    fn no_criteria_returns_all_in_order() {
        let products = fixture();
        let out = apply(&products, &FilterState::default(), &TagSet::builtin());
        let FilterOutcome::Matches(m) = out else {
            panic!("expected matches");
        };
        let ids: Vec<&str> = m.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["gr-1", "gr-2", "ol-1", "ur-1"]);
    }

    #[test]
    fn category_includes_cross_listed_products() {
        let products = fixture();
        let state = FilterState {
            category: Some("grasso".to_string()),
            ..FilterState::default()
        };
        let FilterOutcome::Matches(m) = apply(&products, &state, &TagSet::builtin()) else {
            panic!("expected matches");
        };
        let ids: Vec<&str> = m.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["gr-1", "gr-2", "ol-1"]);
    }

    #[test]
    fn adding_criteria_only_narrows() {
        let products = fixture();
        let tags = TagSet::builtin();
        let mut state = FilterState {
            category: Some("grasso".to_string()),
            ..FilterState::default()
        };
        let FilterOutcome::Matches(wide) = apply(&products, &state, &tags) else {
            panic!("expected matches");
        };
        state.component = Some("pompe".to_string());
        let FilterOutcome::Matches(narrow) = apply(&products, &state, &tags) else {
            panic!("expected matches");
        };
        assert!(narrow.len() <= wide.len());
        for p in &narrow {
            assert!(wide.iter().any(|w| w.id == p.id));
        }
        let ids: Vec<&str> = narrow.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["gr-1", "ol-1"]);
    }

    #[test]
    fn whitespace_query_is_a_no_op() {
        let products = fixture();
        let state = FilterState {
            query: "   ".to_string(),
            ..FilterState::default()
        };
        let FilterOutcome::Matches(m) = apply(&products, &state, &TagSet::builtin()) else {
            panic!("expected matches");
        };
        assert_eq!(m.len(), products.len());
    }

    #[test]
    fn query_matches_name_code_and_description_case_insensitively() {
        let products = fixture();
        let tags = TagSet::builtin();
        let state = FilterState {
            query: "SERBATOIO".to_string(),
            ..FilterState::default()
        };
        let FilterOutcome::Matches(m) = apply(&products, &state, &tags) else {
            panic!("expected matches");
        };
        assert_eq!(m.len(), 1);
        assert_eq!(m[0].id, "gr-2");
        let by_code = FilterState {
            query: "ur-1-c".to_string(),
            ..FilterState::default()
        };
        let FilterOutcome::Matches(m) = apply(&products, &by_code, &tags) else {
            panic!("expected matches");
        };
        assert_eq!(m[0].id, "ur-1");
    }

    #[test]
    fn impossible_combination_reports_no_match() {
        let products = fixture();
        let state = FilterState {
            category: Some("urea".to_string()),
            component: Some("pompe".to_string()),
            ..FilterState::default()
        };
        assert_eq!(
            apply(&products, &state, &TagSet::builtin()),
            FilterOutcome::NoMatch
        );
    }

    #[test]
    fn empty_dataset_is_distinguished_from_no_match() {
        assert_eq!(
            apply(&[], &FilterState::default(), &TagSet::builtin()),
            FilterOutcome::NoProducts
        );
    }

    #[test]
    fn subcategory_options_are_scoped_and_sorted() {
        let products = fixture();
        assert_eq!(
            subcategory_options(&products, Some("grasso")),
            ["Manuale", "Pneumatica", "Stoccaggio"]
        );
        assert_eq!(subcategory_options(&products, Some("urea")), Vec::<String>::new());
    }

    #[test]
    fn available_tags_hide_chips_without_hits() {
        let products = fixture();
        let tags = TagSet::builtin();
        let avail = available_tags(&products, &tags, Some("urea"), None);
        assert!(avail.contains(&"tubi".to_string()));
        assert!(!avail.contains(&"pompe".to_string()));
    }
}
