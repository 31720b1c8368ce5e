//! Integration tests for exact chance arithmetic

use loottable_foundation::{ErrorKind, Fraction};
use proptest::prelude::*;

fn frac(n: u64, d: u64) -> Fraction {
    Fraction::new(n, d).unwrap()
}

// =============================================================================
// Construction
// =============================================================================

#[test]
fn zero_denominator_is_rejected() {
    let err = Fraction::new(1, 0).unwrap_err();
    assert!(matches!(
        err.kind,
        ErrorKind::InvalidFraction {
            numerator: 1,
            denominator: 0
        }
    ));
}

#[test]
fn fractions_are_not_reduced_on_construction() {
    let f = frac(32, 128);
    assert_eq!(f.numerator(), 32);
    assert_eq!(f.denominator(), 128);
    assert_eq!(f.to_string(), "32/128");
    assert_eq!(f.reduced(), frac(1, 4));
}

// =============================================================================
// Unit-numerator approximation
// =============================================================================

#[test]
fn unit_numerator_of_zero() {
    assert_eq!(Fraction::ZERO.reduce_to_unit_numerator(), frac(0, 1));
    assert_eq!(frac(0, 128).reduce_to_unit_numerator(), frac(0, 1));
}

#[test]
fn unit_numerator_rounds() {
    assert_eq!(frac(32, 128).reduce_to_unit_numerator(), frac(1, 4));
    assert_eq!(frac(3, 128).reduce_to_unit_numerator(), frac(1, 43));
    assert_eq!(frac(96, 128).reduce_to_unit_numerator(), frac(1, 1));
    assert_eq!(frac(2, 5).reduce_to_unit_numerator(), frac(1, 3));
}

// =============================================================================
// Composition
// =============================================================================

#[test]
fn compose_multiplies_exactly() {
    assert_eq!(frac(1, 128).compose(frac(3, 64)).unwrap(), frac(3, 8192));
    assert_eq!(Fraction::ONE.compose(frac(5, 7)).unwrap(), frac(5, 7));
}

#[test]
fn compose_overflow_is_an_error() {
    let err = frac(1, u64::MAX).compose(frac(1, 2)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::ChanceOverflow { .. }));
}

#[test]
fn value_comparison_ignores_representation() {
    assert!(frac(1, 4).same_value(&frac(32, 128)));
    assert!(frac(1, 3).cmp_value(&frac(1, 4)).is_gt());
}

proptest! {
    #[test]
    fn compose_is_exact(a in 0u64..100_000, b in 1u64..100_000, c in 0u64..100_000, d in 1u64..100_000) {
        let composed = frac(a, b).compose(frac(c, d)).unwrap();
        prop_assert_eq!(composed.numerator(), a * c);
        prop_assert_eq!(composed.denominator(), b * d);
    }

    #[test]
    fn unit_numerator_is_nearest(a in 1u64..10_000, b in 1u64..10_000) {
        let unit = frac(a, b).reduce_to_unit_numerator();
        prop_assert_eq!(unit.numerator(), 1);
        // Within half a step of b/a.
        let n = unit.denominator();
        prop_assert!(2 * n * a + a >= 2 * b || n == 1);
        prop_assert!(2 * n * a <= 2 * b + a);
    }
}
