//! Fuzzy name queries.
//!
//! This module provides:
//! - [`Scorer`] - A similarity function from 0 to 100
//! - [`QueryConfig`] - Result limit and confidence thresholds
//! - [`QueryEngine`] - Ranking and the selection policy
//! - [`QueryOutcome`] - Confident matches, a best guess, or nothing
//!
//! The selection policy is independent of how similarity is measured: any
//! scorer, including a closure, can drive it.

use std::cmp::Reverse;

/// Scores how well a candidate matches a query.
pub trait Scorer {
    /// Returns a similarity from 0 (unrelated) to 100 (identical).
    fn score(&self, query: &str, candidate: &str) -> u8;
}

impl<F> Scorer for F
where
    F: Fn(&str, &str) -> u8,
{
    fn score(&self, query: &str, candidate: &str) -> u8 {
        self(query, candidate)
    }
}

// =============================================================================
// Configuration
// =============================================================================

/// Default number of ranked candidates kept.
pub const DEFAULT_LIMIT: usize = 5;

/// Limits and thresholds for query selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueryConfig {
    /// Ranked candidates kept after sorting.
    pub limit: usize,
    /// Minimum top score for a confident answer.
    pub confident: u8,
    /// A top score at or above this counts as an exact hit.
    pub exact: u8,
    /// When the top score is exact, only candidates at or above this are kept.
    pub exact_floor: u8,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            confident: 80,
            exact: 100,
            exact_floor: 95,
        }
    }
}

impl QueryConfig {
    /// Builder method to set the result limit. Zero is ignored.
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        if limit > 0 {
            self.limit = limit;
        }
        self
    }

    /// Builder method to set the confidence threshold.
    #[must_use]
    pub fn with_confident(mut self, confident: u8) -> Self {
        self.confident = confident.min(100);
        self
    }

    /// Builder method to set the exact-match narrowing floor.
    #[must_use]
    pub fn with_exact_floor(mut self, exact_floor: u8) -> Self {
        self.exact_floor = exact_floor.min(100);
        self
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// A scored candidate name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Candidate name.
    pub name: String,
    /// Similarity from 0 to 100.
    pub score: u8,
}

/// The answer to a query.
///
/// Neither an empty candidate set nor a low score is an error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryOutcome<T = Hit> {
    /// Every candidate that cleared the confidence threshold, best first.
    Confident(Vec<T>),
    /// Nothing was confident; the best guess plus the rest as suggestions.
    BestEffort {
        /// The highest-ranked candidate.
        best: T,
        /// Remaining ranked candidates.
        alternatives: Vec<Hit>,
    },
    /// There were no candidates.
    NoMatch,
}

impl<T> QueryOutcome<T> {
    /// Applies `f` to each matched value, keeping alternatives as they are.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> QueryOutcome<U> {
        match self {
            Self::Confident(hits) => QueryOutcome::Confident(hits.into_iter().map(f).collect()),
            Self::BestEffort { best, alternatives } => QueryOutcome::BestEffort {
                best: f(best),
                alternatives,
            },
            Self::NoMatch => QueryOutcome::NoMatch,
        }
    }

    /// Returns the matched values: all confident ones, or the best guess.
    #[must_use]
    pub fn matches(&self) -> Vec<&T> {
        match self {
            Self::Confident(hits) => hits.iter().collect(),
            Self::BestEffort { best, .. } => vec![best],
            Self::NoMatch => Vec::new(),
        }
    }

    /// Returns true if the outcome is confident.
    #[must_use]
    pub const fn is_confident(&self) -> bool {
        matches!(self, Self::Confident(_))
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Ranks candidate names against queries.
#[derive(Clone, Debug, Default)]
pub struct QueryEngine<S> {
    scorer: S,
    config: QueryConfig,
}

impl<S: Scorer> QueryEngine<S> {
    /// Creates an engine with the default config.
    pub fn new(scorer: S) -> Self {
        Self {
            scorer,
            config: QueryConfig::default(),
        }
    }

    /// Builder method to set the config.
    #[must_use]
    pub fn with_config(mut self, config: QueryConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the config.
    #[must_use]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    /// Scores every candidate and keeps the best `limit`, highest first.
    ///
    /// The query is lowercased. Equal scores keep candidate order.
    pub fn rank<'a>(&self, query: &str, candidates: impl IntoIterator<Item = &'a str>) -> Vec<Hit> {
        let query = query.trim().to_lowercase();
        let mut hits: Vec<Hit> = candidates
            .into_iter()
            .map(|name| Hit {
                name: name.to_string(),
                score: self.scorer.score(&query, name).min(100),
            })
            .collect();
        hits.sort_by_key(|hit| Reverse(hit.score));
        hits.truncate(self.config.limit);
        hits
    }

    /// Applies the selection policy to a ranked list.
    #[must_use]
    pub fn select(&self, ranked: Vec<Hit>) -> QueryOutcome {
        let Some(top) = ranked.first().map(|hit| hit.score) else {
            return QueryOutcome::NoMatch;
        };

        if top >= self.config.confident {
            let floor = if top >= self.config.exact {
                self.config.exact_floor
            } else {
                self.config.confident
            };
            return QueryOutcome::Confident(
                ranked.into_iter().filter(|hit| hit.score >= floor).collect(),
            );
        }

        let mut ranked = ranked.into_iter();
        match ranked.next() {
            Some(best) => QueryOutcome::BestEffort {
                best,
                alternatives: ranked.collect(),
            },
            None => QueryOutcome::NoMatch,
        }
    }

    /// Ranks and selects in one step.
    pub fn search<'a>(
        &self,
        query: &str,
        candidates: impl IntoIterator<Item = &'a str>,
    ) -> QueryOutcome {
        self.select(self.rank(query, candidates))
    }
}
