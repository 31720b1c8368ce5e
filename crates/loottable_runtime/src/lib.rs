//! REPL, CLI, and reloadable session for Loottable.
//!
//! This crate provides:
//! - [`Session`] - Source files and an atomically swapped [`Snapshot`](loottable_engine::Snapshot)
//! - [`Repl`] - Interactive monster, item, and table lookup
//! - [`StrsimScorer`] - Fuzzy name similarity
//! - [`init_logging`] - Tracing subscriber setup for the binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod editor;
pub mod logging;
pub mod repl;
pub mod scorer;
pub mod session;

pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use logging::init_logging;
pub use repl::{Command, CommandError, Repl, format_drop, print_error};
pub use scorer::StrsimScorer;
pub use session::{ReloadSummary, Session, entity_name};
