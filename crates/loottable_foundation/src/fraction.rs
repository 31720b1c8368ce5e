//! Exact rational chances.
//!
//! Branch probabilities are kept as raw `successes / total` pairs. Nested
//! tables compose by multiplying numerators and denominators directly; the
//! lossy "1 in N" form is produced only for display.

use std::cmp::Ordering;
use std::fmt;

use crate::Result;
use crate::error::Error;

/// A non-negative rational number with a positive denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: u64,
    denominator: u64,
}

impl Fraction {
    /// The certain chance `1/1`.
    pub const ONE: Self = Self {
        numerator: 1,
        denominator: 1,
    };

    /// The zero chance `0/1`.
    pub const ZERO: Self = Self {
        numerator: 0,
        denominator: 1,
    };

    /// Creates a fraction.
    ///
    /// # Errors
    ///
    /// Returns an error if `denominator` is zero.
    pub fn new(numerator: u64, denominator: u64) -> Result<Self> {
        if denominator == 0 {
            return Err(Error::invalid_fraction(numerator, denominator));
        }
        Ok(Self {
            numerator,
            denominator,
        })
    }

    /// Creates the chance `1/denominator`, treating zero as one.
    #[must_use]
    pub const fn one_in(denominator: u64) -> Self {
        Self {
            numerator: 1,
            denominator: if denominator == 0 { 1 } else { denominator },
        }
    }

    /// Returns the numerator.
    #[must_use]
    pub const fn numerator(&self) -> u64 {
        self.numerator
    }

    /// Returns the denominator.
    #[must_use]
    pub const fn denominator(&self) -> u64 {
        self.denominator
    }

    /// Returns true if this fraction is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Approximates this fraction as `1/N` for display.
    ///
    /// `0/x` becomes `0/1`; otherwise the result is `1/round(b/a)` with
    /// halves rounding up. Never use the result as a composition input.
    #[must_use]
    pub fn reduce_to_unit_numerator(self) -> Self {
        if self.numerator == 0 {
            return Self::ZERO;
        }
        let a = u128::from(self.numerator);
        let b = u128::from(self.denominator);
        let rounded = (2 * b + a) / (2 * a);
        let denominator = u64::try_from(rounded).unwrap_or(u64::MAX).max(1);
        Self::one_in(denominator)
    }

    /// Multiplies two chances: `(a1*a2) / (b1*b2)`, exactly.
    ///
    /// # Errors
    ///
    /// Returns an error if either product overflows `u64`.
    pub fn compose(self, child: Self) -> Result<Self> {
        match (
            self.numerator.checked_mul(child.numerator),
            self.denominator.checked_mul(child.denominator),
        ) {
            (Some(numerator), Some(denominator)) => Ok(Self {
                numerator,
                denominator,
            }),
            _ => Err(Error::chance_overflow(self, child)),
        }
    }

    /// Returns this fraction in lowest terms.
    #[must_use]
    pub fn reduced(self) -> Self {
        if self.numerator == 0 {
            return Self::ZERO;
        }
        let divisor = gcd(self.numerator, self.denominator);
        Self {
            numerator: self.numerator / divisor,
            denominator: self.denominator / divisor,
        }
    }

    /// Compares the values of two fractions exactly.
    #[must_use]
    pub fn cmp_value(&self, other: &Self) -> Ordering {
        let lhs = u128::from(self.numerator) * u128::from(other.denominator);
        let rhs = u128::from(other.numerator) * u128::from(self.denominator);
        lhs.cmp(&rhs)
    }

    /// Returns true if both fractions denote the same value.
    #[must_use]
    pub fn same_value(&self, other: &Self) -> bool {
        self.cmp_value(other) == Ordering::Equal
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
