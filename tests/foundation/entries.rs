//! Integration tests for drop entries and rarity buckets

use loottable_foundation::{
    DEFAULT_DROP_ITEM, Diagnostic, DiagnosticKind, DropEntry, DropItem, Fraction, Quantity,
    Rarity,
};

fn frac(n: u64, d: u64) -> Fraction {
    Fraction::new(n, d).unwrap()
}

// =============================================================================
// Rarity
// =============================================================================

#[test]
fn rarity_buckets() {
    assert_eq!(Rarity::from_chance(&Fraction::ONE), Rarity::Always);
    assert_eq!(Rarity::from_chance(&frac(128, 128)), Rarity::Always);
    assert_eq!(Rarity::from_chance(&frac(1, 25)), Rarity::Common);
    assert_eq!(Rarity::from_chance(&frac(1, 26)), Rarity::Uncommon);
    assert_eq!(Rarity::from_chance(&frac(1, 99)), Rarity::Uncommon);
    assert_eq!(Rarity::from_chance(&frac(1, 100)), Rarity::Rare);
    assert_eq!(Rarity::from_chance(&frac(1, 999)), Rarity::Rare);
    assert_eq!(Rarity::from_chance(&frac(1, 1000)), Rarity::VeryRare);
}

#[test]
fn rarity_boundaries_are_exact() {
    // 10/250 equals 1/25 exactly; floating point is never consulted.
    assert_eq!(Rarity::from_chance(&frac(10, 250)), Rarity::Common);
    assert_eq!(Rarity::from_chance(&frac(9_999_999, 250_000_000)), Rarity::Uncommon);
}

// =============================================================================
// Entries
// =============================================================================

#[test]
fn entry_derives_rarity() {
    let entry = DropEntry::new(
        DropItem::Item("bones".to_string()),
        Quantity::ONE,
        frac(32, 128),
        false,
    );
    assert_eq!(entry.rarity, Rarity::Common);
    assert!(!entry.is_table_ref());
}

#[test]
fn table_refs_carry_quantity_one() {
    let entry = DropEntry::new(
        DropItem::TableRef("randomherb".to_string()),
        Quantity::from_random(5, 2),
        frac(1, 128),
        false,
    );
    assert_eq!(entry.quantity, Quantity::Fixed(1));
    assert!(entry.is_table_ref());
    assert_eq!(entry.item.to_string(), "~randomherb");
    assert_eq!(entry.item.as_table_ref(), Some("randomherb"));
    assert_eq!(entry.item.as_item(), None);
}

#[test]
fn default_drop_is_guaranteed() {
    let entry = DropEntry::default_drop();
    assert_eq!(entry.item.name(), DEFAULT_DROP_ITEM);
    assert_eq!(entry.chance, Fraction::ONE);
    assert_eq!(entry.rarity, Rarity::Always);
    assert!(!entry.members_only);
}

#[test]
fn quantity_display() {
    assert_eq!(Quantity::Fixed(5).to_string(), "5");
    assert_eq!(Quantity::from_random(50, 1).to_string(), "1-51");
    assert_eq!(Quantity::from_random(2, 1).min(), 1);
    assert_eq!(Quantity::from_random(2, 1).max(), 3);
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn diagnostic_display() {
    let d = Diagnostic::new(
        "goblin",
        DiagnosticKind::MalformedQuantity {
            text: "lots".to_string(),
        },
    )
    .at_line(7);
    let text = d.to_string();
    assert!(text.starts_with("goblin:7: "));
    assert!(text.contains("lots"));

    let d = Diagnostic::new("ghost", DiagnosticKind::UnparsableUnit);
    assert!(d.to_string().starts_with("ghost: "));
}
