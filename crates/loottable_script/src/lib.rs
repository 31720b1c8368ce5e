//! Lexer, quantity parser, branch extractor, and shared-table resolver for
//! drop scripts.
//!
//! This crate provides:
//! - [`Lexer`] - Tokenization of script source
//! - [`parse_quantity`] - Quantity literals and `calc(random(N) + M)`
//! - [`extract_entity`] - Drop lists from branch ladders in entity scripts
//! - [`resolve_shared`] - Named shared tables from `[proc,...]` blocks

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod branch;
pub mod config;
pub mod lexer;
pub mod procedure;
pub mod quantity;
pub mod shared;
pub mod span;
pub mod token;


pub use branch::{Emission, RandomTotal, UnitDrops, extract_entity};
pub use config::{DEFAULT_TOTAL, ExtractConfig, RARE_DROP_TABLE};
pub use lexer::Lexer;
pub use procedure::{Procedure, split_procedures};
pub use quantity::{parse_quantity, try_parse_quantity};
pub use shared::{SharedTables, apply_rare_table_rule, extract_procedure, resolve_shared};
pub use span::Span;
pub use token::{Token, TokenKind};
