//! Integration tests for branch extraction from entity scripts

use loottable_foundation::{DiagnosticKind, DropEntry, DropItem, Fraction, Quantity, Rarity};
use loottable_script::{ExtractConfig, extract_entity};

const GOBLIN: &str = r"
[ai_queue3,goblin]
gosub(npc_death);
if (npc_findhero = false) {
    return;
}
npc_param(death_drop);
def_int $random = random(128);
if ($random < 32) {
    obj_add(npc_coord, bones, 1, ^lootdrop_duration);
} else if ($random < 128) {
    obj_add(npc_coord, coins, calc(random(50) + 1), ^lootdrop_duration);
}
";

fn frac(n: u64, d: u64) -> Fraction {
    Fraction::new(n, d).unwrap()
}

// =============================================================================
// Ladders
// =============================================================================

#[test]
fn goblin_ladder() {
    let drops = extract_entity("goblin", GOBLIN, &ExtractConfig::default());

    assert_eq!(drops.name, "goblin");
    assert_eq!(drops.entries.len(), 3);
    assert_eq!(drops.entries[0], DropEntry::default_drop());

    let bones = &drops.entries[1];
    assert_eq!(bones.item.as_item(), Some("bones"));
    assert_eq!(bones.chance.to_string(), "32/128");
    assert_eq!(bones.quantity.to_string(), "1");
    assert_eq!(bones.rarity, Rarity::Common);

    let coins = &drops.entries[2];
    assert_eq!(coins.item.as_item(), Some("coins"));
    assert_eq!(coins.chance.to_string(), "96/128");
    assert_eq!(coins.quantity.to_string(), "1-51");
    assert!(drops.diagnostics.is_empty());
}

#[test]
fn branch_chances_never_exceed_total() {
    let drops = extract_entity(
        "cow",
        "def_int $random = random(100);
         if ($random < 10) { obj_add(npc_coord, cowhide, 1, ^lootdrop_duration); }
         else if ($random < 40) { obj_add(npc_coord, raw_beef, 1, ^lootdrop_duration); }
         else if ($random < 100) { obj_add(npc_coord, bones, 1, ^lootdrop_duration); }",
        &ExtractConfig::default(),
    );
    let total: u64 = drops.entries.iter().map(|e| e.chance.numerator()).sum();
    assert_eq!(total, 100);
    assert!(drops.entries.iter().all(|e| e.chance.denominator() == 100));
}

#[test]
fn configured_default_total() {
    let config = ExtractConfig::default().with_default_total(256);
    let drops = extract_entity(
        "rat",
        "if ($random < 1) { obj_add(npc_coord, rat_tail, 1, ^lootdrop_duration); }",
        &config,
    );
    assert_eq!(drops.entries[0].chance, frac(1, 256));
}

#[test]
fn other_random_locals_do_not_hide_the_ladder() {
    let drops = extract_entity(
        "dark_wizard",
        "def_int $amount = random(3);
         def_int $random = random(128);
         if ($random < 32) {
             obj_add(npc_coord, bones, 1, ^lootdrop_duration);
         } else if ($random < 128) {
             obj_add(npc_coord, coins, calc(random(50) + 1), ^lootdrop_duration);
         }",
        &ExtractConfig::default(),
    );

    assert_eq!(drops.entries.len(), 2);
    assert_eq!(drops.entries[0].item.as_item(), Some("bones"));
    assert_eq!(drops.entries[0].chance, frac(32, 128));
    assert_eq!(drops.entries[1].chance, frac(96, 128));
    assert_eq!(drops.entries[1].quantity, Quantity::Range { min: 1, max: 51 });
    assert!(drops.diagnostics.is_empty());
}

#[test]
fn table_reference_from_entity() {
    let drops = extract_entity(
        "imp",
        "def_int $random = random(128);
         if ($random < 1) { obj_add(npc_coord, ~rare_drop_table, 1, ^lootdrop_duration); }",
        &ExtractConfig::default(),
    );
    assert_eq!(
        drops.entries[0].item,
        DropItem::TableRef("rare_drop_table".to_string())
    );
    assert_eq!(drops.entries[0].rarity, Rarity::Rare);
}

#[test]
fn null_items_are_skipped() {
    let drops = extract_entity(
        "chicken",
        "if ($random < 64) { obj_add(npc_coord, null, 1, ^lootdrop_duration); }
         else if ($random < 128) { obj_add(npc_coord, feather, 5, ^lootdrop_duration); }",
        &ExtractConfig::default(),
    );
    assert_eq!(drops.entries.len(), 1);
    assert_eq!(drops.entries[0].quantity, Quantity::Fixed(5));
    assert_eq!(drops.entries[0].chance, frac(64, 128));
}

// =============================================================================
// Diagnostics
// =============================================================================

#[test]
fn diagnostics_carry_unit_and_line() {
    let drops = extract_entity(
        "dwarf",
        "def_int $random = random(128);
         if ($random < 64) { obj_add(npc_coord, hammer, 1, ^lootdrop_duration); }
         else if ($random < 10) { obj_add(npc_coord, coins, some_amount, ^lootdrop_duration); }",
        &ExtractConfig::default(),
    );
    assert_eq!(drops.entries.len(), 1);
    assert_eq!(drops.diagnostics.len(), 1);
    assert_eq!(drops.diagnostics[0].unit, "dwarf");
    assert_eq!(drops.diagnostics[0].line, Some(3));
    assert!(matches!(
        drops.diagnostics[0].kind,
        DiagnosticKind::NonMonotonicBounds { previous: 64, bound: 10 }
    ));
}

#[test]
fn empty_source_is_unparsable() {
    let drops = extract_entity("ghost", "", &ExtractConfig::default());
    assert!(drops.is_empty());
    assert_eq!(drops.diagnostics.len(), 1);
    assert_eq!(drops.diagnostics[0].kind, DiagnosticKind::UnparsableUnit);
}
