//! Detail view-model assembly.
//!
//! Everything the detail screens show is computed here into plain structs;
//! rendering code only formats what it is handed. The same view-models back
//! the product page and the per-variant sub-page.

use std::collections::HashSet;
use std::path::Path;

use crate::catalog::{CatalogStore, Product, Variant};
use crate::logic::specs::{self, SpecRow};
use crate::util;

/// Per-product technical drawing table, keyed by product id.
///
/// Hand-maintained; the built-in entries mirror the distributor's archive
/// and can be replaced via the `drawings_file` setting.
#[derive(Clone, Debug)]
pub struct DrawingTable {
    entries: Vec<(String, Vec<String>)>,
}

/// On-disk shape for a user-provided drawing table.
#[derive(Debug, serde::Deserialize)]
struct DrawingFile {
    #[serde(default)]
    drawing: Vec<DrawingEntry>,
}

#[derive(Debug, serde::Deserialize)]
struct DrawingEntry {
    product: String,
    paths: Vec<String>,
}

impl DrawingTable {
    #[must_use]
    pub fn builtin() -> Self {
        let entry = |id: &str, paths: &[&str]| {
            (
                id.to_string(),
                paths.iter().map(|p| (*p).to_string()).collect(),
            )
        };
        DrawingTable {
            entries: vec![
                entry("LV-001", &["assets/uploads/2019/05/misure-AIR110-ADB.jpg"]),
                entry("LV-002", &["assets/uploads/2019/05/misure-AIR170-ADB.jpg"]),
                entry("LV-003", &["assets/uploads/2019/05/misure-AIR20.jpg"]),
                entry("LV-004", &["assets/uploads/2019/05/misureair55.jpg"]),
                entry("UR-005", &["assets/uploads/2017/02/dimensioni-930.jpg"]),
                entry(
                    "UR-006",
                    &[
                        "assets/uploads/2017/04/utman.jpg",
                        "assets/uploads/2017/04/utaut.jpg",
                        "assets/uploads/2017/04/utpro.jpg",
                    ],
                ),
                entry("UR-007", &["assets/uploads/2017/04/BLUETMIS.jpg"]),
                entry("UR-008", &["assets/uploads/2017/04/BLUETMIS220.jpg"]),
                entry("UR-009", &["assets/uploads/2017/04/BLUETMIS220.jpg"]),
                entry("UR-010", &["assets/uploads/2017/04/BLUETMIs430.jpg"]),
                entry("UR-011", &["assets/uploads/2017/04/BLUETMIs430.jpg"]),
                entry("UR-014", &["assets/uploads/2022/05/misure.png"]),
                entry("UR-022", &["assets/uploads/2023/03/UREA-FILTER-A.png"]),
                entry("UR-026", &["assets/uploads/2024/11/SommersaUrea.jpg"]),
            ],
        }
    }

    /// Load a replacement table from TOML (`[[drawing]]` entries with
    /// `product` and `paths`); the built-in table is kept on any error.
    #[must_use]
    pub fn from_file(path: &Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|raw| toml::from_str::<DrawingFile>(&raw).map_err(|e| e.to_string()));
        match parsed {
            Ok(file) => DrawingTable {
                entries: file.drawing.into_iter().map(|d| (d.product, d.paths)).collect(),
            },
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid drawing table; using built-in");
                Self::builtin()
            }
        }
    }

    /// Drawings for a product, with any path that doubles as a variant image
    /// filtered out so it is not shown twice.
    #[must_use]
    pub fn for_product(&self, product: &Product) -> Vec<String> {
        let Some((_, paths)) = self.entries.iter().find(|(id, _)| *id == product.id) else {
            return Vec::new();
        };
        let variant_images: HashSet<&str> = product
            .variants
            .iter()
            .filter_map(|v| v.image.as_deref())
            .collect();
        paths
            .iter()
            .filter(|p| !variant_images.contains(p.as_str()))
            .cloned()
            .collect()
    }
}

/// Every unique image for a product: the product image first, then variant
/// images in variant order, duplicates skipped.
#[must_use]
pub fn product_images(product: &Product) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut images = Vec::new();
    let mut add = |path: Option<&str>| {
        if let Some(p) = path
            && !p.is_empty()
            && seen.insert(p.to_string())
        {
            images.push(p.to_string());
        }
    };
    add(product.image.as_deref());
    for v in &product.variants {
        add(v.image.as_deref());
    }
    images
}

/// Image sequence for a variant sub-page: the variant's own image (or the
/// parent's as fallback) first, then the rest of the product gallery.
#[must_use]
pub fn variant_images(product: &Product, variant: &Variant) -> Vec<String> {
    let own = variant.image.as_deref().or(product.image.as_deref());
    let mut images = Vec::new();
    if let Some(o) = own {
        images.push(o.to_string());
    }
    for img in product_images(product) {
        if Some(img.as_str()) != own {
            images.push(img);
        }
    }
    images
}

/// Small card for a related product.
#[derive(Clone, Debug)]
pub struct RelatedCard {
    pub id: String,
    pub name: String,
    pub code: String,
    pub image: Option<String>,
    pub variant_count: usize,
}

/// Card for one variant inside the product view.
#[derive(Clone, Debug)]
pub struct VariantCard {
    pub code: String,
    pub detail: String,
    pub image: Option<String>,
}

/// Everything the product detail screen renders.
#[derive(Clone, Debug)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub code: String,
    pub category_label: String,
    pub subcategory: Option<String>,
    pub featured: bool,
    pub description: String,
    pub images: Vec<String>,
    pub specs: Vec<SpecRow>,
    pub variants: Vec<VariantCard>,
    pub drawings: Vec<String>,
    pub related: Vec<RelatedCard>,
    pub tech_sheet: Option<String>,
    pub contact_url: String,
    pub share_url: String,
}

/// Everything the variant sub-page renders.
#[derive(Clone, Debug)]
pub struct VariantView {
    pub code: String,
    pub parent_id: String,
    pub parent_name: String,
    pub parent_code: String,
    pub category_label: String,
    pub subcategory: Option<String>,
    /// 1-based position among the parent's valid variants.
    pub position: usize,
    pub sibling_total: usize,
    pub detail: String,
    pub images: Vec<String>,
    /// Mined rows first, then the parent's structured specs.
    pub specs: Vec<SpecRow>,
    /// Whether mining recognized anything; when false the raw detail line is
    /// the only description available.
    pub mined: bool,
    pub siblings: Vec<VariantCard>,
    pub tech_sheet: Option<String>,
    pub contact_url: String,
    pub share_url: String,
}

/// Assemble the detail view-model for a product.
#[must_use]
pub fn product_view(
    store: &CatalogStore,
    drawings: &DrawingTable,
    product: &Product,
    contact_email: &str,
    related_limit: usize,
) -> ProductView {
    let related = store
        .related(product, related_limit)
        .into_iter()
        .map(|p| RelatedCard {
            id: p.id.clone(),
            name: p.name.clone(),
            code: p.code.clone(),
            image: p.image.clone(),
            variant_count: p.valid_variants().count(),
        })
        .collect();
    ProductView {
        id: product.id.clone(),
        name: product.name.clone(),
        code: product.code.clone(),
        category_label: store.category_label(&product.category),
        subcategory: product.subcategory.clone(),
        featured: product.featured,
        description: util::strip_markup(&product.description),
        images: product_images(product),
        specs: specs::spec_rows(product),
        variants: product
            .valid_variants()
            .map(|v| VariantCard {
                code: v.code.clone(),
                detail: v.detail.clone().unwrap_or_default(),
                image: v.image.clone(),
            })
            .collect(),
        drawings: drawings.for_product(product),
        related,
        tech_sheet: product.tech_sheet.clone(),
        contact_url: util::contact_url(
            contact_email,
            &product.id,
            &product.name,
            &product.code,
            &product.category,
            None,
        ),
        share_url: util::share_url(&product.id, None),
    }
}

/// What: Assemble the sub-page view-model for one variant.
///
/// Inputs:
/// - `store`, `product`, `variant`: The variant and its context.
/// - `contact_email`: Address for the info-request link.
///
/// Output: The [`VariantView`], with mined specs ahead of the parent's
/// structured ones and siblings in dataset order.
#[must_use]
pub fn variant_view(
    store: &CatalogStore,
    product: &Product,
    variant: &Variant,
    contact_email: &str,
) -> VariantView {
    let valid: Vec<&Variant> = product.valid_variants().collect();
    let position = valid
        .iter()
        .position(|v| v.code == variant.code)
        .map_or(1, |i| i + 1);
    let detail_raw = variant.detail.clone().unwrap_or_default();
    let mut rows = specs::mine_variant_specs(&detail_raw);
    let mined = !rows.is_empty();
    rows.extend(specs::spec_rows(product));
    VariantView {
        code: variant.code.clone(),
        parent_id: product.id.clone(),
        parent_name: product.name.clone(),
        parent_code: product.code.clone(),
        category_label: store.category_label(&product.category),
        subcategory: product.subcategory.clone(),
        position,
        sibling_total: valid.len(),
        detail: detail_raw,
        images: variant_images(product, variant),
        specs: rows,
        mined,
        siblings: valid
            .iter()
            .filter(|v| v.code != variant.code)
            .map(|v| VariantCard {
                code: v.code.clone(),
                detail: v.detail.clone().unwrap_or_default(),
                image: v.image.clone(),
            })
            .collect(),
        tech_sheet: product.tech_sheet.clone(),
        contact_url: util::contact_url(
            contact_email,
            &product.id,
            &product.name,
            &variant.code,
            &product.category,
            Some(&variant.code),
        ),
        share_url: util::share_url(&product.id, Some(&variant.code)),
    }
}
