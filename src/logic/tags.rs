//! Component-tag table and matching.
//!
//! Tags are quick chips ("Pompe", "Tubi", ...) that match products by regex
//! over a normalized haystack of the product's descriptive fields. The
//! built-in table can be replaced wholesale with a TOML file referenced from
//! settings.

use regex::Regex;

use crate::catalog::model::Product;
use crate::util::normalize_text;

/// A single selectable component chip.
#[derive(Clone, Debug)]
pub struct ComponentTag {
    /// Stable identifier used in state and deep links.
    pub id: String,
    /// Human-readable chip label.
    pub label: String,
    /// Short glyph rendered before the label.
    pub icon: String,
    /// Pattern applied to the normalized product haystack.
    pub pattern: Regex,
}

/// The ordered set of component tags active for this run.
#[derive(Clone, Debug)]
pub struct TagSet {
    tags: Vec<ComponentTag>,
}

/// On-disk shape for a user-provided tag table.
#[derive(Debug, serde::Deserialize)]
struct TagFile {
    #[serde(default)]
    tag: Vec<TagEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct TagEntry {
    id: String,
    label: String,
    #[serde(default)]
    icon: String,
    pattern: String,
}

fn tag(id: &str, label: &str, icon: &str, pattern: &str) -> ComponentTag {
    ComponentTag {
        id: id.to_string(),
        label: label.to_string(),
        icon: icon.to_string(),
        // Built-in patterns are static and known-valid.
        #[allow(clippy::unwrap_used)]
        pattern: Regex::new(pattern).unwrap(),
    }
}

impl TagSet {
    /// The built-in table mirroring the distributor's component families.
    #[must_use]
    pub fn builtin() -> Self {
        TagSet {
            tags: vec![
                tag("pompe", "Pompe", "⚙", r"\bpomp"),
                tag("elettropompe", "Elettropompe", "⚡", r"elettropomp"),
                tag("pistole", "Pistole", "🔫", r"pistol|spout"),
                tag(
                    "siringhe",
                    "Siringhe/Ingrassatori",
                    "💉",
                    r"siringh|ingrassat|aeropulsometr",
                ),
                tag("contalitri", "Contalitri", "🔢", r"contalitri|misurator"),
                tag("tubi", "Tubi", "➰", r"\btub[io]\b|manichett|spiralat"),
                tag("serbatoi", "Serbatoi/Tank", "🛢", r"serbato|tank|cisterna|fust"),
                tag("filtri", "Filtri/Valvole", "🧰", r"filtr|valvol|by[- ]?pass"),
                tag("accessori", "Accessori", "🔩", r"accessori|raccord|adattator|ricambi"),
            ],
        }
    }

    /// What: Load a tag table from a TOML file, falling back to the built-in set.
    ///
    /// Inputs:
    /// - `path`: File with `[[tag]]` entries (`id`, `label`, `icon`, `pattern`).
    ///
    /// Output: The parsed set, or [`TagSet::builtin`] when the file cannot be
    /// read or parsed.
    ///
    /// Details:
    /// - Entries with an invalid regex are skipped with a warning rather than
    ///   failing the whole table.
    #[must_use]
    pub fn from_file(path: &std::path::Path) -> Self {
        let raw = match std::fs::read_to_string(path) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "tag file unreadable; using built-in tags");
                return Self::builtin();
            }
        };
        match toml::from_str::<TagFile>(&raw) {
            Ok(file) => {
                let tags = file
                    .tag
                    .into_iter()
                    .filter_map(|e| match Regex::new(&e.pattern) {
                        Ok(pattern) => Some(ComponentTag {
                            id: e.id,
                            label: e.label,
                            icon: e.icon,
                            pattern,
                        }),
                        Err(err) => {
                            tracing::warn!(id = %e.id, error = %err, "invalid tag pattern; skipping");
                            None
                        }
                    })
                    .collect();
                TagSet { tags }
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid tag file; using built-in tags");
                Self::builtin()
            }
        }
    }

    /// All tags, in display order.
    #[must_use]
    pub fn all(&self) -> &[ComponentTag] {
        &self.tags
    }

    /// Look up a tag by id. An unknown id yields `None`; callers must treat
    /// that as matching no products rather than all of them.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ComponentTag> {
        self.tags.iter().find(|t| t.id == id)
    }

    /// Whether `product` matches the tag identified by `id`.
    ///
    /// Unknown ids match nothing.
    #[must_use]
    pub fn matches(&self, id: &str, product: &Product) -> bool {
        self.get(id)
            .is_some_and(|t| t.pattern.is_match(&haystack(product)))
    }
}

/// Normalized text a tag pattern is applied to. Joins every descriptive
/// field so patterns can match wherever the family name appears.
#[must_use]
pub fn haystack(product: &Product) -> String {
    let parts = [
        product.name.as_str(),
        product.description.as_str(),
        product.subcategory.as_deref().unwrap_or(""),
        product.category.as_str(),
        product.code.as_str(),
    ];
    normalize_text(&parts.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::model::Product;

    fn product(name: &str, description: &str) -> Product {
        Product {
            id: "p1".to_string(),
            name: name.to_string(),
            code: "X-001".to_string(),
            category: "grasso".to_string(),
            subcategory: None,
            also_in: Vec::new(),
            description: description.to_string(),
            image: None,
            variants: Vec::new(),
            tech_sheet: None,
            specs: std::collections::BTreeMap::new(),
            featured: false,
        }
    }

    #[test]
    fn builtin_tags_match_expected_families() {
        let tags = TagSet::builtin();
        let pump = product("Pompa a mano", "Pompa manuale per grasso");
        let hose = product("Tubo flessibile", "Tubo in gomma 10 m");
        assert!(tags.matches("pompe", &pump));
        assert!(!tags.matches("pompe", &hose));
        assert!(tags.matches("tubi", &hose));
    }

    #[test]
    fn family_synonyms_match_their_chips() {
        let tags = TagSet::builtin();
        assert!(tags.matches("serbatoi", &product("Cisterna AdBlue 5000 l", "")));
        assert!(tags.matches("serbatoi", &product("Fusto olio 200 l", "")));
        assert!(tags.matches("siringhe", &product("Ingrassatore a leva", "")));
        assert!(tags.matches("filtri", &product("Valvola by-pass", "")));
        assert!(tags.matches("contalitri", &product("Misuratore digitale", "")));
        assert!(tags.matches("accessori", &product("Raccordo girevole", "")));
        assert!(tags.matches("tubi", &product("Manichetta di mandata", "")));
        assert!(tags.matches("pistole", &product("Erogatore", "con spout automatico")));
        // "tub" only counts as a whole word
        assert!(!tags.matches("tubi", &product("Avvolgitubo a parete", "")));
    }

    #[test]
    fn matching_is_case_insensitive_via_normalization() {
        let tags = TagSet::builtin();
        let p = product("ELETTROPOMPA 12V", "");
        assert!(tags.matches("elettropompe", &p));
        // no word boundary before "pomp", so the plain pump family stays out
        assert!(!tags.matches("pompe", &p));
    }

    #[test]
    fn unknown_tag_matches_nothing() {
        let tags = TagSet::builtin();
        let p = product("Pompa", "");
        assert!(!tags.matches("inesistente", &p));
    }

    #[test]
    fn tag_file_skips_invalid_patterns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tags.toml");
        std::fs::write(
            &path,
            r#"
[[tag]]
id = "valvole"
label = "Valvole"
pattern = "valvol"

[[tag]]
id = "rotto"
label = "Rotto"
pattern = "("
"#,
        )
        .unwrap();
        let tags = TagSet::from_file(&path);
        assert_eq!(tags.all().len(), 1);
        assert!(tags.get("valvole").is_some());
        assert!(tags.get("rotto").is_none());
    }
}
