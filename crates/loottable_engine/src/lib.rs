//! Drop model, reverse index, nested-table resolution, and fuzzy queries for
//! Loottable.
//!
//! This crate provides:
//! - [`ModelBuilder`] - Merges extracted sources into a [`Model`]
//! - [`ReverseIndex`] - Item to entity lookup
//! - [`Model::expand_table`] - Cycle-safe nested-table resolution
//! - [`QueryEngine`] - Fuzzy ranking and the selection policy
//! - [`Snapshot`] - A model and its index, queryable as one unit

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod model;
pub mod query;
pub mod resolve;
pub mod reverse;
pub mod snapshot;

pub use model::{LoadReport, Model, ModelBuilder};
pub use query::{DEFAULT_LIMIT, Hit, QueryConfig, QueryEngine, QueryOutcome, Scorer};
pub use resolve::{ResolvedDrop, ResolvedKind};
pub use reverse::ReverseIndex;
pub use snapshot::{ItemSource, Match, Payload, QueryKind, Snapshot};
