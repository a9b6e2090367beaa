//! End-to-end tests over the public crate API, driven by the demo dataset.

use std::path::Path;

use listino::catalog::{CatalogStore, Dataset, Product};
use listino::logic::detail::{self, DrawingTable};
use listino::logic::filter::{self, FilterOutcome, FilterState};
use listino::logic::gallery::{Gallery, GalleryPhase};
use listino::logic::specs;
use listino::logic::tags::TagSet;
use listino::session;
use listino::session::users::UserTable;

fn demo_store() -> CatalogStore {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/products.json");
    let raw = std::fs::read_to_string(path).expect("demo dataset readable");
    let dataset: Dataset = serde_json::from_str(&raw).expect("demo dataset parses");
    CatalogStore::from_dataset(dataset, "demo")
}

#[test]
fn demo_dataset_loads_with_categories_and_products() {
    let store = demo_store();
    assert_eq!(store.categories().len(), 7);
    assert!(store.products().len() >= 10);
    assert!(store.product_by_id("GR-001").is_some());
    assert_eq!(store.category_label("urea"), "Urea / AdBlue");
}

#[test]
fn filters_narrow_and_keep_dataset_order() {
    let store = demo_store();
    let tags = TagSet::builtin();
    let all = match filter::apply(store.products(), &FilterState::default(), &tags) {
        FilterOutcome::Matches(m) => m,
        other => panic!("expected matches, got {other:?}"),
    };
    assert_eq!(all.len(), store.products().len());

    let state = FilterState {
        category: Some("grasso".to_string()),
        component: Some("pompe".to_string()),
        ..FilterState::default()
    };
    let narrowed = match filter::apply(store.products(), &state, &tags) {
        FilterOutcome::Matches(m) => m,
        other => panic!("expected matches, got {other:?}"),
    };
    // cross-listed oil pump counts as grasso too
    let ids: Vec<&str> = narrowed.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["GR-001", "GR-002", "OL-020"]);
}

#[test]
fn category_and_subcategory_filters_commute() {
    let store = demo_store();
    let tags = TagSet::builtin();
    let category = FilterState {
        category: Some("urea".to_string()),
        ..FilterState::default()
    };
    let subcategory = FilterState {
        subcategory: Some("Contalitri".to_string()),
        ..FilterState::default()
    };
    let combined = FilterState {
        category: Some("urea".to_string()),
        subcategory: Some("Contalitri".to_string()),
        ..FilterState::default()
    };
    let pass = |products: &[Product], state: &FilterState| -> Vec<Product> {
        match filter::apply(products, state, &tags) {
            FilterOutcome::Matches(m) => m.into_iter().cloned().collect(),
            other => panic!("expected matches, got {other:?}"),
        }
    };
    let ids = |ps: &[Product]| ps.iter().map(|p| p.id.clone()).collect::<Vec<_>>();

    let both = pass(store.products(), &combined);
    assert!(!both.is_empty());
    // one predicate over the other's output, in either order, equals the
    // combined filter
    let by_category = pass(store.products(), &category);
    let by_subcategory = pass(store.products(), &subcategory);
    let cat_then_sub = pass(&by_category, &subcategory);
    let sub_then_cat = pass(&by_subcategory, &category);
    assert_eq!(ids(&cat_then_sub), ids(&both));
    assert_eq!(ids(&sub_then_cat), ids(&both));
}

#[test]
fn unmatchable_filters_report_no_match_not_empty_dataset() {
    let store = demo_store();
    let tags = TagSet::builtin();
    let state = FilterState {
        category: Some("urea".to_string()),
        query: "inesistente".to_string(),
        ..FilterState::default()
    };
    assert_eq!(
        filter::apply(store.products(), &state, &tags),
        FilterOutcome::NoMatch
    );
}

#[test]
fn subcategories_scope_to_the_selected_category() {
    let store = demo_store();
    let options = filter::subcategory_options(store.products(), Some("urea"));
    assert_eq!(options, ["Contalitri", "Filtri"]);
}

#[test]
fn product_view_assembles_images_specs_and_related() {
    let store = demo_store();
    let drawings = DrawingTable::builtin();
    let product = store.product_by_id("UR-006").expect("demo product");
    let view = detail::product_view(&store, &drawings, product, "info@example.com", 6);

    // product image first, variant images deduplicated behind it
    assert_eq!(view.images[0], "assets/images/products/ut-serie.jpg");
    assert_eq!(view.images.len(), 3);

    // the bookkeeping key never reaches the table
    assert!(view.specs.iter().all(|r| r.label != "Fonte"));
    assert!(view.specs.iter().any(|r| r.label == "Portata"));

    // drawings exclude paths already used as variant images
    assert_eq!(view.drawings, ["assets/uploads/2017/04/utpro.jpg"]);

    // related products stay within the same category
    assert!(view.related.iter().any(|r| r.id == "UR-022"));
    assert!(view.share_url.ends_with("id=UR-006"));
}

#[test]
fn variant_view_mines_detail_text() {
    let store = demo_store();
    let product = store.product_by_id("GS-011").expect("demo product");
    let variant = product.variant("BP-3000/230").expect("demo variant");
    let view = detail::variant_view(&store, product, variant, "info@example.com");
    assert!(view.mined);
    let find = |label: &str| {
        view.specs
            .iter()
            .find(|r| r.label == label)
            .map(|r| r.value.as_str())
    };
    assert_eq!(find("Voltaggio"), Some("230 V AC"));
    assert_eq!(find("Portata"), Some("60 l/min"));
    assert_eq!(find("Potenza"), Some("370 W"));
    assert_eq!(view.position, 3);
    assert_eq!(view.sibling_total, 3);
    assert_eq!(view.siblings.len(), 2);
}

#[test]
fn spec_label_fallback_capitalizes_unknown_keys() {
    assert_eq!(specs::spec_label("attacco"), "Attacco");
    assert_eq!(specs::spec_label("corpo_pompa"), "Corpo pompa");
}

#[test]
fn gallery_wraps_and_lightbox_freezes_cycling() {
    let mut g = Gallery::new(vec![
        "a.jpg".to_string(),
        "b.jpg".to_string(),
        "c.jpg".to_string(),
    ]);
    g.prev();
    assert_eq!(g.index(), 2);
    g.next();
    assert_eq!(g.index(), 0);

    g.start_cycle();
    g.tick();
    assert_eq!(g.index(), 1);
    g.open_lightbox();
    g.tick();
    assert_eq!(g.index(), 1);
    assert_eq!(g.phase(), GalleryPhase::Lightbox);
    g.close_lightbox();
    assert_eq!(g.phase(), GalleryPhase::Idle);
}

#[test]
fn session_flow_round_trips_against_demo_accounts() {
    // isolate all session files under a scratch HOME
    let base = std::env::temp_dir().join(format!(
        "listino_it_session_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    let _ = std::fs::create_dir_all(&base);
    let orig_home = std::env::var_os("HOME");
    unsafe {
        std::env::set_var("HOME", base.display().to_string());
        std::env::remove_var("XDG_STATE_HOME");
        std::env::remove_var("XDG_CACHE_HOME");
    }

    let table = UserTable::builtin();
    assert!(!session::is_authenticated());

    let record = session::login(&table, "cliente", "maestri2024", false).expect("demo login");
    assert_eq!(record.role, "cliente");
    assert!(session::is_authenticated());

    // unremembered sessions disappear with the ephemeral scope
    session::clear_ephemeral();
    assert!(!session::is_authenticated());

    // remembered sessions survive it
    session::login(&table, "rivenditore", "rivendita2024", true).expect("demo login");
    session::clear_ephemeral();
    assert_eq!(
        session::current().map(|s| s.username),
        Some("rivenditore".to_string())
    );
    session::logout();
    assert!(!session::is_authenticated());

    unsafe {
        if let Some(v) = orig_home {
            std::env::set_var("HOME", v);
        } else {
            std::env::remove_var("HOME");
        }
    }
}

#[test]
fn demo_variant_details_round_trip_through_mining() {
    let store = demo_store();
    let product = store.product_by_id("GR-001").expect("demo product");
    let variant = product.variant("668/LITIO").expect("demo variant");
    let rows = specs::mine_variant_specs(variant.detail.as_deref().unwrap_or(""));
    let labels: Vec<&str> = rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["Capacità", "Peso"]);
    assert_eq!(rows[0].value, "500 g");
    assert_eq!(rows[1].value, "1,2 kg");
}
