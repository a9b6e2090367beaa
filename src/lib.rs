//! Listino: a terminal catalog browser for a B2B distributor.
//!
//! The crate is split into pure logic (`catalog`, `logic`, `session`) and
//! the interactive shell (`state`, `events`, `ui`, `app`). Logic modules
//! never touch the terminal, so everything user-visible is testable without
//! one.

/// Runtime and terminal lifecycle.
pub mod app;
/// Command line arguments.
pub mod args;
/// Dataset model, loading and lookups.
pub mod catalog;
/// Keyboard event handling.
pub mod events;
/// Filtering, tags, specs, detail view-models and gallery state.
pub mod logic;
/// Reserved-area sessions and demo accounts.
pub mod session;
/// Central application state.
pub mod state;
/// Theme palette, settings and filesystem locations.
pub mod theme;
/// Frame rendering.
pub mod ui;
/// Text, encoding and formatting helpers.
pub mod util;
