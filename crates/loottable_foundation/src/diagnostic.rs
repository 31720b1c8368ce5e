//! Recoverable data-quality findings.
//!
//! A load pass never fails because one unit is malformed. Instead each
//! problem is recorded as a [`Diagnostic`] next to the best-effort model.

use std::fmt;

use thiserror::Error;

/// What went wrong in a unit.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// Quantity text was not a literal or `calc(random(N) + M)`; 1 was used.
    #[error("unrecognized quantity `{text}`, defaulting to 1")]
    MalformedQuantity {
        /// The raw quantity text.
        text: String,
    },

    /// The unit produced no drop entries.
    #[error("no drop entries could be extracted")]
    UnparsableUnit,

    /// A branch bound is lower than the one before it; the branch was skipped.
    #[error("branch bound {bound} is below previous bound {previous}; branch skipped")]
    NonMonotonicBounds {
        /// The bound of the preceding branch.
        previous: u64,
        /// The offending bound.
        bound: u64,
    },

    /// Nested-table expansion revisited a table already on its path.
    #[error("table `{table}` references itself through {path}")]
    CycleDetected {
        /// The table that was revisited.
        table: String,
        /// The path that led back to it, joined with ` -> `.
        path: String,
    },
}

/// A data-quality finding tied to a source unit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    /// Entity or procedure name the finding belongs to.
    pub unit: String,
    /// 1-based source line, when known.
    pub line: Option<u32>,
    /// The finding.
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Creates a diagnostic without a line.
    #[must_use]
    pub fn new(unit: impl Into<String>, kind: DiagnosticKind) -> Self {
        Self {
            unit: unit.into(),
            line: None,
            kind,
        }
    }

    /// Sets the source line.
    #[must_use]
    pub fn at_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.unit)?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        write!(f, ": {}", self.kind)
    }
}
