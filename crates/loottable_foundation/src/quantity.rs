//! Item quantities attached to a drop.

use std::fmt;

/// How many of an item a drop yields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Exactly this many.
    Fixed(u32),
    /// Anywhere in the inclusive range `min..=max`.
    Range {
        /// Smallest quantity.
        min: u32,
        /// Largest quantity.
        max: u32,
    },
}

impl Quantity {
    /// The lenient default used when quantity text is missing or unrecognized.
    pub const ONE: Self = Self::Fixed(1);

    /// Builds the range produced by `calc(random(spread) + offset)`.
    #[must_use]
    pub const fn from_random(spread: u32, offset: u32) -> Self {
        Self::Range {
            min: offset,
            max: offset.saturating_add(spread),
        }
    }

    /// Returns the smallest quantity.
    #[must_use]
    pub const fn min(&self) -> u32 {
        match *self {
            Self::Fixed(n) => n,
            Self::Range { min, .. } => min,
        }
    }

    /// Returns the largest quantity.
    #[must_use]
    pub const fn max(&self) -> u32 {
        match *self {
            Self::Fixed(n) => n,
            Self::Range { max, .. } => max,
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(n) => write!(f, "{n}"),
            Self::Range { min, max } => write!(f, "{min}-{max}"),
        }
    }
}
