//! Serde data model for the product dataset.
//!
//! The wire format keeps the Italian field names of the upstream JSON
//! (`prodotti`, `categorie`, `nome`, `codice`, ...) so existing datasets load
//! unchanged; the Rust field names are English.

use std::collections::BTreeMap;

/// A catalog category (e.g. "grasso" → "Grasso").
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Category {
    /// Stable category identifier referenced by products.
    pub id: String,
    /// Human-readable display name.
    #[serde(rename = "nome")]
    pub name: String,
}

/// A concrete SKU nested under a parent product.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Variant {
    /// Variant code, unique within the parent product.
    #[serde(rename = "codice", default)]
    pub code: String,
    /// Free-text detail line; informal specs are mined out of this.
    #[serde(rename = "dettaglio", default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Variant-specific image path.
    #[serde(rename = "immagine", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A catalog product as stored in the dataset.
///
/// Every field except `id` and `nome` is optional in the wire format; render
/// paths treat absence as "omit this section".
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g. "GR-001").
    pub id: String,
    /// Display name.
    #[serde(rename = "nome")]
    pub name: String,
    /// Commercial code shown in lists.
    #[serde(rename = "codice", default)]
    pub code: String,
    /// Primary category id.
    #[serde(rename = "categoria", default)]
    pub category: String,
    /// Optional sub-category ("product family") label.
    #[serde(rename = "sottocategoria", default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    /// Additional category ids the product is also listed under.
    #[serde(rename = "anche_in", default, skip_serializing_if = "Vec::is_empty")]
    pub also_in: Vec<String>,
    /// Free-text description (may contain markup; stripped for excerpts).
    #[serde(rename = "descrizione", default)]
    pub description: String,
    /// Primary image path.
    #[serde(rename = "immagine", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Variants (sub-products) of this product.
    #[serde(rename = "sottoprodotti", default, skip_serializing_if = "Vec::is_empty")]
    pub variants: Vec<Variant>,
    /// Path to a downloadable technical sheet.
    #[serde(rename = "scheda_tecnica", default, skip_serializing_if = "Option::is_none")]
    pub tech_sheet: Option<String>,
    /// Key → value specification map; values are arbitrary JSON scalars.
    #[serde(rename = "specifiche", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub specs: BTreeMap<String, serde_json::Value>,
    /// Whether the product is highlighted on the home view.
    #[serde(rename = "in_evidenza", default)]
    pub featured: bool,
}

impl Product {
    /// Variants that carry a non-empty code; entries without one are noise
    /// from hand-edited datasets and are skipped everywhere.
    pub fn valid_variants(&self) -> impl Iterator<Item = &Variant> {
        self.variants.iter().filter(|v| !v.code.is_empty())
    }

    /// Look up a variant by its exact code.
    #[must_use]
    pub fn variant(&self, code: &str) -> Option<&Variant> {
        self.valid_variants().find(|v| v.code == code)
    }
}

/// Top-level dataset document: two collections, nothing else is read.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dataset {
    /// Known categories in display order.
    #[serde(rename = "categorie", default)]
    pub categories: Vec<Category>,
    /// Products in dataset order; filtering is stable over this order.
    #[serde(rename = "prodotti", default)]
    pub products: Vec<Product>,
}
