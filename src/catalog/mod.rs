//! Dataset loading and catalog lookups.
//!
//! The dataset is loaded once at startup from the first source that works:
//! an explicit `--data` path, the candidate paths from settings, the user's
//! data directory, and finally the embedded demo catalog when `--demo` was
//! given. Every lookup afterwards is served from memory.

pub mod model;

use std::path::{Path, PathBuf};

pub use model::{Category, Dataset, Product, Variant};

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Demo catalog compiled into the binary; only used behind `--demo`.
const DEMO_DATASET: &str = include_str!("../../data/products.json");

/// In-memory catalog with the provenance of its dataset.
#[derive(Clone, Debug)]
pub struct CatalogStore {
    dataset: Dataset,
    /// Human-readable description of where the dataset came from.
    source: String,
}

fn read_dataset(path: &Path) -> Result<Dataset> {
    let raw = std::fs::read_to_string(path)?;
    let dataset: Dataset = serde_json::from_str(&raw)?;
    Ok(dataset)
}

impl CatalogStore {
    /// What: Load the catalog from the first available source.
    ///
    /// Inputs:
    /// - `explicit`: `--data` path; when given it is the only source tried.
    /// - `candidates`: Relative fallback paths from settings, tried in order.
    /// - `demo`: Whether the embedded demo catalog may serve as last resort.
    ///
    /// Output: The loaded store, or an error naming every location tried.
    ///
    /// Details:
    /// - After the candidates, `<data dir>/products.json` is tried so users
    ///   can install a dataset once instead of carrying it per directory.
    pub fn load(explicit: Option<&Path>, candidates: &[String], demo: bool) -> Result<Self> {
        if let Some(path) = explicit {
            let dataset = read_dataset(path)
                .map_err(|e| format!("cannot load dataset from {}: {e}", path.display()))?;
            tracing::info!(path = %path.display(), products = dataset.products.len(), "dataset loaded");
            return Ok(CatalogStore {
                dataset,
                source: path.display().to_string(),
            });
        }
        let mut tried: Vec<PathBuf> = candidates.iter().map(PathBuf::from).collect();
        tried.push(crate::theme::data_dir().join("products.json"));
        for path in &tried {
            match read_dataset(path) {
                Ok(dataset) => {
                    tracing::info!(path = %path.display(), products = dataset.products.len(), "dataset loaded");
                    return Ok(CatalogStore {
                        dataset,
                        source: path.display().to_string(),
                    });
                }
                Err(e) => {
                    tracing::debug!(path = %path.display(), error = %e, "dataset candidate skipped");
                }
            }
        }
        if demo {
            let dataset: Dataset = serde_json::from_str(DEMO_DATASET)?;
            tracing::info!(products = dataset.products.len(), "using embedded demo dataset");
            return Ok(CatalogStore {
                dataset,
                source: "demo".to_string(),
            });
        }
        let list = tried
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(format!("no dataset found (tried: {list}); pass --data or --demo").into())
    }

    /// Build a store from an already-parsed dataset.
    #[must_use]
    pub fn from_dataset(dataset: Dataset, source: &str) -> Self {
        CatalogStore {
            dataset,
            source: source.to_string(),
        }
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.dataset.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.dataset.categories
    }

    #[must_use]
    pub fn product_by_id(&self, id: &str) -> Option<&Product> {
        self.dataset.products.iter().find(|p| p.id == id)
    }

    /// Display name for a category id; unknown ids fall back to the raw id
    /// so stale references never render as blanks.
    #[must_use]
    pub fn category_label(&self, id: &str) -> String {
        self.dataset
            .categories
            .iter()
            .find(|c| c.id == id)
            .map_or_else(|| id.to_string(), |c| c.name.clone())
    }

    /// Products flagged for the home view, in dataset order.
    #[must_use]
    pub fn featured(&self) -> Vec<&Product> {
        self.dataset.products.iter().filter(|p| p.featured).collect()
    }

    /// What: Products related to `product`, capped at `limit`.
    ///
    /// Inputs:
    /// - `product`: The anchor product.
    /// - `limit`: Maximum number of results.
    ///
    /// Output: Other products sharing the category, the sub-category, or a
    /// cross-listing in either direction, in dataset order.
    #[must_use]
    pub fn related(&self, product: &Product, limit: usize) -> Vec<&Product> {
        self.dataset
            .products
            .iter()
            .filter(|p| {
                p.id != product.id
                    && (p.category == product.category
                        || (p.subcategory.is_some() && p.subcategory == product.subcategory)
                        || product.also_in.iter().any(|c| *c == p.category)
                        || p.also_in.iter().any(|c| *c == product.category))
            })
            .take(limit)
            .collect()
    }
}
