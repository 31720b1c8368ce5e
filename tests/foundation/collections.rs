//! Integration tests for persistent collections
//!
//! Tests `InsertionSet` ordering, idempotence, and structural sharing.

use loottable_foundation::InsertionSet;

#[test]
fn set_empty() {
    let s: InsertionSet<String> = InsertionSet::new();
    assert!(s.is_empty());
    assert_eq!(s.len(), 0);
    assert_eq!(s.first(), None);
}

#[test]
fn set_preserves_first_insertion_order() {
    let s = InsertionSet::new().insert("hobgoblin").insert("goblin").insert("cow");
    let order: Vec<_> = s.iter().copied().collect();
    assert_eq!(order, vec!["hobgoblin", "goblin", "cow"]);
}

#[test]
fn set_insert_is_idempotent() {
    let s = InsertionSet::new().insert("goblin").insert("cow");
    let again = s.insert("goblin").insert("goblin");
    assert_eq!(s, again);
    assert_eq!(again.len(), 2);
}

#[test]
fn set_immutability() {
    let s1 = InsertionSet::new().insert(1);
    let s2 = s1.insert(2);

    assert_eq!(s1.len(), 1);
    assert_eq!(s2.len(), 2);
    assert!(!s1.contains(&2));
}

#[test]
fn set_from_iterator_dedups() {
    let s: InsertionSet<u32> = [3, 1, 3, 2, 1].into_iter().collect();
    let order: Vec<_> = (&s).into_iter().copied().collect();
    assert_eq!(order, vec![3, 1, 2]);
}

#[test]
fn set_structural_sharing() {
    let mut s = InsertionSet::new();
    for i in 0..1000 {
        s = s.insert(i);
    }
    let clone = s.clone();
    assert_eq!(s, clone);
    assert_eq!(clone.first(), Some(&0));
}
