//! Application runtime: terminal lifecycle and the main event loop.

mod runtime;
mod terminal;

pub use runtime::run;
