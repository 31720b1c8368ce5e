//! Loottable - drop script compiler and loot query engine
//!
//! This crate re-exports all layers of the Loottable system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: loottable_runtime    - Session, REPL, CLI, logging
//! Layer 2: loottable_engine     - Model, reverse index, nested tables, queries
//! Layer 1: loottable_script     - Lexer, quantity parser, branch extraction
//! Layer 0: loottable_foundation - Core types (Fraction, DropEntry, Error)
//! ```

pub use loottable_engine as engine;
pub use loottable_foundation as foundation;
pub use loottable_runtime as runtime;
pub use loottable_script as script;
