//! Error types for the Loottable system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Conditions the load pass recovers from are not errors; see
//! [`crate::diagnostic`].

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::fraction::Fraction;

/// The main error type for Loottable operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid fraction error.
    #[must_use]
    pub fn invalid_fraction(numerator: u64, denominator: u64) -> Self {
        Self::new(ErrorKind::InvalidFraction {
            numerator,
            denominator,
        })
    }

    /// Creates a chance overflow error.
    #[must_use]
    pub fn chance_overflow(parent: Fraction, child: Fraction) -> Self {
        Self::new(ErrorKind::ChanceOverflow { parent, child })
    }

    /// Creates an I/O error for a path.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            source,
        })
    }

    /// Creates a usage error.
    #[must_use]
    pub fn usage(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Usage(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A fraction with a zero denominator was requested.
    #[error("invalid fraction {numerator}/{denominator}: denominator must be positive")]
    InvalidFraction {
        /// The numerator.
        numerator: u64,
        /// The zero denominator.
        denominator: u64,
    },

    /// Composing two chances overflowed.
    #[error("chance overflow composing {parent} with {child}")]
    ChanceOverflow {
        /// Chance of the referencing entry.
        parent: Fraction,
        /// Chance inside the nested table.
        child: Fraction,
    },

    /// A source file could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The line editor failed.
    #[error("editor error: {0}")]
    Editor(String),

    /// Invalid command-line or REPL usage.
    #[error("{0}")]
    Usage(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source unit or table name.
    pub unit: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
    /// Chain of tables being expanded.
    pub path: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source unit.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    /// Adds a table to the expansion path.
    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.path.push(table.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(unit) = &self.unit {
            write!(f, "in {unit}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        if !self.path.is_empty() {
            write!(f, " via {}", self.path.join(" -> "))?;
        }
        Ok(())
    }
}
