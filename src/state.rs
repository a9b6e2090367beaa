//! Central application state shared between event handlers and rendering.

use std::time::Instant;

use ratatui::widgets::ListState;

use crate::catalog::{CatalogStore, Product};
use crate::logic::detail::DrawingTable;
use crate::logic::filter::{self, FilterOutcome, FilterState};
use crate::logic::gallery::Gallery;
use crate::logic::tags::TagSet;
use crate::session::users::UserTable;
use crate::session::SessionRecord;
use crate::theme::Settings;

/// Which screen is showing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// Filterable product list.
    Catalog,
    /// Product detail, optionally narrowed to one variant sub-page.
    Detail {
        product_id: String,
        /// Variant code opened as its own sub-page.
        sub: Option<String>,
    },
    /// Reserved-area dashboard (requires a session).
    Dashboard,
    /// Login form; `redirect` is restored after a successful login.
    Login { redirect: Option<Box<Route>> },
}

/// Overlay on top of the current route.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Modal {
    #[default]
    None,
    /// Transient message with a title.
    Alert { title: String, message: String },
    /// Full-screen image viewer over the detail gallery.
    Lightbox,
    /// Expanded order row on the dashboard.
    OrderDetail { order_id: String },
    /// Copyable deep link for the current product or variant.
    ShareLink { url: String },
    /// First-run privacy notice.
    Notice,
}

/// Input focus on the catalog screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Results,
}

/// Login form fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
    Remember,
}

/// Buffers for the login form.
#[derive(Clone, Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub remember: bool,
    pub field: LoginField,
    pub error: Option<String>,
}

/// Everything the application tracks between events.
pub struct AppState {
    pub store: CatalogStore,
    pub tags: TagSet,
    pub drawings: DrawingTable,
    pub users: UserTable,
    pub settings: Settings,
    /// Set when no dataset could be loaded; the catalog shows a failure
    /// panel instead of an empty list.
    pub load_error: Option<String>,

    pub route: Route,
    /// Routes to return to on Esc, innermost last.
    pub back_stack: Vec<Route>,
    pub modal: Modal,
    pub focus: Focus,

    pub filter: FilterState,
    /// Indices into `store.products()` for the current results.
    pub results: Vec<usize>,
    pub list_state: ListState,
    /// Last keystroke in the search box; drives the debounce.
    pub last_input_change: Option<Instant>,
    /// Set while a keystroke has not yet been applied to `results`.
    pub filter_dirty: bool,

    /// Gallery for the currently open detail page.
    pub gallery: Gallery,
    /// Selected row in the detail variants list.
    pub variant_index: usize,

    pub session: Option<SessionRecord>,
    pub login_form: LoginForm,
    /// Selected row in the dashboard orders table.
    pub order_index: usize,

    pub should_quit: bool,
}

impl AppState {
    #[must_use]
    pub fn new(
        store: CatalogStore,
        tags: TagSet,
        drawings: DrawingTable,
        users: UserTable,
        settings: Settings,
        load_error: Option<String>,
    ) -> Self {
        let mut state = AppState {
            store,
            tags,
            drawings,
            users,
            settings,
            load_error,
            route: Route::Catalog,
            back_stack: Vec::new(),
            modal: Modal::None,
            focus: Focus::Search,
            filter: FilterState::default(),
            results: Vec::new(),
            list_state: ListState::default(),
            last_input_change: None,
            filter_dirty: false,
            gallery: Gallery::default(),
            variant_index: 0,
            session: crate::session::current(),
            login_form: LoginForm::default(),
            order_index: 0,
            should_quit: false,
        };
        state.refresh_results();
        state
    }

    /// Recompute `results` from the current filter, keeping the selection on
    /// the first row.
    pub fn refresh_results(&mut self) {
        let products = self.store.products();
        self.results = match filter::apply(products, &self.filter, &self.tags) {
            FilterOutcome::Matches(matches) => matches
                .iter()
                .filter_map(|m| products.iter().position(|p| p.id == m.id))
                .collect(),
            _ => Vec::new(),
        };
        self.list_state = ListState::default();
        if !self.results.is_empty() {
            self.list_state.select(Some(0));
        }
        self.filter_dirty = false;
    }

    /// Product under the catalog cursor.
    #[must_use]
    pub fn selected_product(&self) -> Option<&Product> {
        let row = self.list_state.selected()?;
        let idx = *self.results.get(row)?;
        self.store.products().get(idx)
    }

    /// Product shown by the current detail route.
    #[must_use]
    pub fn detail_product(&self) -> Option<&Product> {
        match &self.route {
            Route::Detail { product_id, .. } => self.store.product_by_id(product_id),
            _ => None,
        }
    }

    /// Switch route, remembering the previous one for Esc.
    pub fn navigate(&mut self, route: Route) {
        let previous = std::mem::replace(&mut self.route, route);
        self.back_stack.push(previous);
        self.modal = Modal::None;
    }

    /// Pop back to the previous route; lands on the catalog when the stack
    /// is exhausted.
    pub fn go_back(&mut self) {
        self.route = self.back_stack.pop().unwrap_or(Route::Catalog);
        self.modal = Modal::None;
    }

    /// Open the detail page for a product, wiring up its gallery.
    pub fn open_detail(&mut self, product_id: &str, sub: Option<String>) {
        let images = match (self.store.product_by_id(product_id), &sub) {
            (Some(p), Some(code)) => p
                .variant(code)
                .map(|v| crate::logic::detail::variant_images(p, v))
                .unwrap_or_default(),
            (Some(p), None) => crate::logic::detail::product_images(p),
            (None, _) => Vec::new(),
        };
        self.gallery = Gallery::new(images);
        self.variant_index = 0;
        self.navigate(Route::Detail {
            product_id: product_id.to_string(),
            sub,
        });
    }

    /// Record a search keystroke; filtering itself waits for the debounce.
    pub fn touch_input(&mut self) {
        self.last_input_change = Some(Instant::now());
        self.filter_dirty = true;
    }

    /// Apply the debounced query if the quiet period has elapsed.
    pub fn maybe_apply_debounce(&mut self) {
        if !self.filter_dirty {
            return;
        }
        let elapsed_ms = self
            .last_input_change
            .map(|t| t.elapsed().as_millis() as u64);
        if elapsed_ms.is_some_and(|ms| ms >= self.settings.debounce_ms) {
            self.refresh_results();
        }
    }

    /// Move the catalog selection by `delta`, clamped to the result range.
    pub fn move_selection(&mut self, delta: isize) {
        if self.results.is_empty() {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let last = self.results.len() as isize - 1;
        let next = (current + delta).clamp(0, last) as usize;
        self.list_state.select(Some(next));
    }
}
