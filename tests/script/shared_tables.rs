//! Integration tests for shared-table resolution

use loottable_foundation::{DropItem, Fraction, Quantity};
use loottable_script::{ExtractConfig, resolve_shared};

const SHARED: &str = r"
[proc,randomherb]()(namedobj, int)
if (map_members = false) {
    return(coins, 20);
}
def_int $random = random(128);
if ($random < 32) {
    return(unidentified_guam, 1);
} else if ($random < 64) {
    return(unidentified_marrentill, 1);
} else if ($random < 65) {
    return(~randomjewel);
}

[proc,randomjewel]()(namedobj, int)
switch_int(random(3)) {
    case 0 : return(uncut_sapphire, 1);
    case 1, 2 : return(uncut_emerald, 1);
    case default : return(uncut_ruby, 1);
}

[label,not_a_table]
return(bones, 1);

[proc,empty_table]()(namedobj, int)
mes(nothing);
";

fn frac(n: u64, d: u64) -> Fraction {
    Fraction::new(n, d).unwrap()
}

#[test]
fn procedures_become_tables() {
    let shared = resolve_shared(SHARED, &ExtractConfig::default());
    let names: Vec<_> = shared.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["randomherb", "randomjewel"]);
}

#[test]
fn empty_procedures_are_dropped_but_reported() {
    let shared = resolve_shared(SHARED, &ExtractConfig::default());
    assert!(shared.get("empty_table").is_none());
    assert!(shared.diagnostics.iter().any(|d| d.unit == "empty_table"));
}

#[test]
fn rare_table_rule() {
    let shared = resolve_shared(SHARED, &ExtractConfig::default());
    let herb = shared.get("randomherb").unwrap();

    assert_eq!(herb.entries[0].item.as_item(), Some("coins"));
    assert_eq!(herb.entries[0].quantity, Quantity::Fixed(20));
    assert_eq!(herb.entries[0].chance, Fraction::ONE);
    assert!(!herb.entries[0].members_only);
    assert!(herb.entries[1..].iter().all(|e| e.members_only));

    assert_eq!(herb.entries[1].chance, frac(32, 128));
    assert_eq!(
        herb.entries[3].item,
        DropItem::TableRef("randomjewel".to_string())
    );
    assert_eq!(herb.entries[3].chance, frac(1, 128));
}

#[test]
fn rule_applies_only_to_rare_table() {
    let shared = resolve_shared(SHARED, &ExtractConfig::default());
    let jewel = shared.get("randomjewel").unwrap();
    assert!(jewel.entries.iter().all(|e| !e.members_only));
}

#[test]
fn switch_arms_split_evenly() {
    let shared = resolve_shared(SHARED, &ExtractConfig::default());
    let jewel = shared.get("randomjewel").unwrap();
    let chances: Vec<_> = jewel.entries.iter().map(|e| e.chance).collect();
    assert_eq!(chances, vec![frac(1, 4), frac(2, 4), frac(1, 4)]);
}

#[test]
fn aliases_address_tables() {
    let shared = resolve_shared(SHARED, &ExtractConfig::default());
    assert_eq!(
        shared.get("rare_drop_table").map(|t| t.name.as_str()),
        Some("randomherb")
    );
    assert_eq!(
        shared.get("gem_drop_table").map(|t| t.name.as_str()),
        Some("randomjewel")
    );

    assert_eq!(
        shared.aliases,
        vec![
            ("rare_drop_table".to_string(), "randomherb".to_string()),
            ("gem_drop_table".to_string(), "randomjewel".to_string()),
        ]
    );
}

#[test]
fn custom_rare_table() {
    let config = ExtractConfig::default()
        .without_aliases()
        .with_rare_table("randomjewel");
    let shared = resolve_shared(SHARED, &config);

    assert!(shared.get("rare_drop_table").is_none());
    let herb = shared.get("randomherb").unwrap();
    assert!(!herb.entries[1].members_only);
    let jewel = shared.get("randomjewel").unwrap();
    assert!(!jewel.entries[0].members_only);
    assert!(jewel.entries[1].members_only);
}
