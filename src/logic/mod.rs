//! Pure application logic: filtering, tagging, spec handling, detail
//! view-models and gallery state. Nothing here touches the terminal.

/// Detail view-model assembly.
pub mod detail;
/// The catalog filter engine.
pub mod filter;
/// Gallery and lightbox state machine.
pub mod gallery;
/// Specification labels and variant spec mining.
pub mod specs;
/// Component-tag table and matching.
pub mod tags;
