//! The application runtime: startup wiring, the input thread and the main
//! event loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::Event;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::args::{Args, StartPage};
use crate::catalog::{CatalogStore, Dataset};
use crate::logic::detail::DrawingTable;
use crate::logic::tags::TagSet;
use crate::session::users::UserTable;
use crate::state::{AppState, Modal, Route};
use crate::theme::settings;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Poll interval of the blocking input thread.
const INPUT_POLL: Duration = Duration::from_millis(50);
/// Tick interval driving the search debounce.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Channel bundle between the input thread and the event loop.
struct Channels {
    events: UnboundedReceiver<Event>,
}

/// Read terminal events on a dedicated blocking thread until `running` goes
/// false; tokio tasks never block on crossterm directly.
fn spawn_event_thread(tx: UnboundedSender<Event>, running: Arc<AtomicBool>) {
    std::thread::spawn(move || {
        while running.load(Ordering::Relaxed) {
            match crossterm::event::poll(INPUT_POLL) {
                Ok(true) => match crossterm::event::read() {
                    Ok(event) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read terminal event");
                        break;
                    }
                },
                Ok(false) => {}
                Err(e) => {
                    tracing::warn!(error = %e, "event poll failed");
                    break;
                }
            }
        }
    });
}

/// Build the initial [`AppState`] from settings, CLI flags and the dataset.
fn build_state(args: &Args) -> AppState {
    let settings = settings();
    let tags = settings
        .tags_file
        .as_deref()
        .map_or_else(TagSet::builtin, TagSet::from_file);
    let drawings = settings
        .drawings_file
        .as_deref()
        .map_or_else(DrawingTable::builtin, DrawingTable::from_file);
    let users = settings
        .users_file
        .as_deref()
        .map_or_else(UserTable::builtin, UserTable::from_file);

    let (store, load_error) =
        match CatalogStore::load(args.data.as_deref(), &settings.data_paths, args.demo) {
            Ok(store) => {
                tracing::info!(
                    products = store.products().len(),
                    featured = store.featured().len(),
                    source = store.source(),
                    "dataset loaded"
                );
                (store, None)
            }
            Err(e) => {
                tracing::error!(error = %e, "dataset load failed");
                (
                    CatalogStore::from_dataset(Dataset::default(), "none"),
                    Some(e.to_string()),
                )
            }
        };

    let mut state = AppState::new(store, tags, drawings, users, settings, load_error);
    apply_deep_links(&mut state, args);
    if !crate::session::consent_given() {
        state.modal = Modal::Notice;
    }
    state
}

/// Apply `--category`, `--product`/`--variant`/`--sub` and `--page`.
fn apply_deep_links(state: &mut AppState, args: &Args) {
    if let Some(category) = &args.category {
        state.filter.category = Some(category.clone());
        state.refresh_results();
    }
    if let Some(product_id) = &args.product {
        state.open_detail(product_id, args.sub.clone());
        if let (None, Some(code)) = (&args.sub, &args.variant)
            && let Some(p) = state.store.product_by_id(product_id)
            && let Some(i) = p.valid_variants().position(|v| v.code == *code)
        {
            state.variant_index = i;
        }
    }
    match args.page {
        StartPage::Catalog => {}
        StartPage::Dashboard => {
            if state.session.is_some() {
                state.navigate(Route::Dashboard);
            } else {
                state.navigate(Route::Login {
                    redirect: Some(Box::new(Route::Dashboard)),
                });
            }
        }
        StartPage::Login => {
            if state.session.is_none() {
                state.navigate(Route::Login { redirect: None });
            }
        }
    }
}

/// Whether to skip the terminal entirely (set by integration tests).
fn headless() -> bool {
    std::env::var("LISTINO_HEADLESS").is_ok()
}

/// What: Run the application until quit.
///
/// Inputs:
/// - `args`: Parsed command line.
///
/// Output: `Ok(())` on clean shutdown.
///
/// Details:
/// - The event loop multiplexes the input channel, the debounce tick and
///   the gallery cycle timer; the gallery only advances while cycling.
/// - On exit the ephemeral session scope is cleared and the terminal
///   restored, also when the loop errors out.
pub async fn run(args: Args) -> Result<()> {
    let mut state = build_state(&args);
    if headless() {
        tracing::info!("headless mode, skipping event loop");
        return Ok(());
    }

    let running = Arc::new(AtomicBool::new(true));
    let (tx, rx) = unbounded_channel();
    spawn_event_thread(tx, Arc::clone(&running));
    let mut channels = Channels { events: rx };

    let mut terminal = crate::app::terminal::setup_terminal()?;
    let result = event_loop(&mut state, &mut channels, &mut terminal).await;

    running.store(false, Ordering::Relaxed);
    crate::session::clear_ephemeral();
    crate::app::terminal::restore_terminal(&mut terminal);
    result
}

async fn event_loop(
    state: &mut AppState,
    channels: &mut Channels,
    terminal: &mut ratatui::Terminal<ratatui::backend::CrosstermBackend<std::io::Stdout>>,
) -> Result<()> {
    let mut tick = tokio::time::interval(TICK_INTERVAL);
    let mut cycle =
        tokio::time::interval(Duration::from_millis(state.settings.gallery_cycle_ms.max(100)));

    loop {
        terminal.draw(|frame| crate::ui::render(frame, state))?;
        tokio::select! {
            event = channels.events.recv() => {
                match event {
                    Some(event) => crate::events::handle_event(state, event),
                    None => break,
                }
            }
            _ = tick.tick() => {
                state.maybe_apply_debounce();
            }
            _ = cycle.tick() => {
                state.gallery.tick();
            }
        }
        if state.should_quit {
            break;
        }
    }
    tracing::info!("shutting down");
    Ok(())
}
