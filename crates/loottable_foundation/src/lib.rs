//! Core types and persistent collections for Loottable.
//!
//! This crate provides:
//! - [`Fraction`] - Exact rational chances with lossless composition
//! - [`Quantity`] - Fixed or ranged item quantities
//! - [`DropEntry`], [`DropItem`], [`Rarity`] - One record of a drop list
//! - [`Diagnostic`] - Recoverable data-quality findings from a load pass
//! - [`Error`] - Rich error types with context
//! - Persistent collections ([`InsertionSet`])

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod diagnostic;
pub mod entry;
pub mod error;
pub mod fraction;
pub mod quantity;

pub use collections::InsertionSet;
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use entry::{DEFAULT_DROP_ITEM, DropEntry, DropItem, Rarity};
pub use error::{Error, ErrorContext, ErrorKind};
pub use fraction::Fraction;
pub use quantity::Quantity;

/// Result type alias using Loottable's Error type.
pub type Result<T> = std::result::Result<T, Error>;
