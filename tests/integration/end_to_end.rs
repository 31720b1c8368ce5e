//! End-to-end tests: script files to formatted answers

use std::fs;
use std::path::{Path, PathBuf};

use loottable_engine::{Payload, QueryEngine, QueryKind, QueryOutcome, ResolvedKind};
use loottable_foundation::{Fraction, Quantity};
use loottable_runtime::{Session, StrsimScorer, format_drop};

const SHARED: &str = r"
[proc,randomherb]()(namedobj, int)
if (map_members = false) return(coins, 20);
def_int $random = random(128);
if ($random < 32) {
    return(unidentified_guam, 1);
} else if ($random < 64) {
    return(~randomjewel);
}

[proc,randomjewel]()(namedobj, int)
switch_int(random(1)) {
    case 0 : return(uncut_sapphire, 1);
    case default : return(uncut_emerald, 1);
}
";

const GOBLIN: &str = r"
[ai_queue3,goblin]
npc_param(death_drop);
def_int $random = random(128);
if ($random < 32) {
    obj_add(npc_coord, bones, 1, ^lootdrop_duration);
} else if ($random < 127) {
    obj_add(npc_coord, coins, calc(random(50) + 1), ^lootdrop_duration);
} else if ($random < 128) {
    obj_add(npc_coord, ~rare_drop_table, 1, ^lootdrop_duration);
}
";

const HOBGOBLIN: &str = r"
def_int $random = random(64);
if ($random < 16) {
    obj_add(npc_coord, limpwurt_root, 1, ^lootdrop_duration);
} else if ($random < 64) {
    obj_add(npc_coord, bones, 1, ^lootdrop_duration);
}
";

const GOBLIN_CHIEF: &str = r"
def_int $random = random(4);
if ($random < 4) {
    obj_add(npc_coord, goblin_mail, 1, ^lootdrop_duration);
}
";

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

fn session(dir_name: &str) -> Session {
    let dir = std::env::temp_dir().join(dir_name);
    fs::create_dir_all(&dir).unwrap();

    let mut session = Session::new();
    session.add_table_file(write(&dir, "shared.rs2", SHARED));
    session.add_entity_file(write(&dir, "goblin.rs2", GOBLIN));
    session.add_entity_file(write(&dir, "hobgoblin.rs2", HOBGOBLIN));
    session.add_entity_file(write(&dir, "goblin_chief.drops.rs2", GOBLIN_CHIEF));
    let summary = session.reload();
    assert_eq!(summary.entities, 3);
    assert_eq!(summary.tables, 2);
    assert!(summary.skipped.is_empty());
    session
}

fn frac(n: u64, d: u64) -> Fraction {
    Fraction::new(n, d).unwrap()
}

// =============================================================================
// Monster queries
// =============================================================================

#[test]
fn exact_monster_name_wins() {
    let session = session("loottable_e2e_exact");
    let engine = QueryEngine::new(StrsimScorer);
    let outcome = session.query(&engine, "goblin", QueryKind::Entity);

    let QueryOutcome::Confident(matches) = &outcome else {
        panic!("expected a confident answer, got {outcome:?}");
    };
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].hit.name, "goblin");
    assert_eq!(matches[0].hit.score, 100);
}

#[test]
fn goblin_drop_table() {
    let session = session("loottable_e2e_drops");
    let engine = QueryEngine::new(StrsimScorer);
    let outcome = session.query(&engine, "goblin", QueryKind::Entity);
    let Payload::Drops(drops) = &outcome.matches()[0].payload else {
        panic!("expected drops");
    };

    let items: Vec<_> = drops.iter().filter_map(|d| d.item()).collect();
    assert_eq!(
        items,
        vec![
            "default_drop",
            "bones",
            "coins",
            "coins",
            "unidentified_guam",
            "uncut_sapphire",
            "uncut_emerald",
        ]
    );

    assert_eq!(drops[1].chance, frac(32, 128));
    assert_eq!(
        drops[2].kind,
        ResolvedKind::Item {
            item: "coins".to_string(),
            quantity: Quantity::Range { min: 1, max: 51 }
        }
    );
    assert_eq!(drops[2].chance, frac(95, 128));

    // Rare-table guard slot, open to everyone.
    assert_eq!(drops[3].chance, frac(1, 128));
    assert!(!drops[3].members_only);
    assert_eq!(drops[3].path, vec!["randomherb"]);

    // Everything after it is members-only and composes through the path.
    assert!(drops[4..].iter().all(|d| d.members_only));
    assert_eq!(drops[5].chance, frac(32, 32_768));
    assert_eq!(drops[5].path, vec!["randomherb", "randomjewel"]);
}

#[test]
fn formatted_drop_line() {
    let session = session("loottable_e2e_format");
    let engine = QueryEngine::new(StrsimScorer);
    let outcome = session.query(&engine, "goblin", QueryKind::Entity);
    let Payload::Drops(drops) = &outcome.matches()[0].payload else {
        panic!("expected drops");
    };

    let bones = format_drop(&drops[1]);
    assert!(bones.starts_with("bones"));
    assert!(bones.contains("1/4"));
    assert!(bones.contains("common"));

    let sapphire = format_drop(&drops[5]);
    assert!(sapphire.contains("1/1024"));
    assert!(sapphire.contains("very rare"));
    assert!(sapphire.contains("members"));
    assert!(sapphire.ends_with("via randomherb > randomjewel"));
}

#[test]
fn partial_name_lists_every_close_monster() {
    let session = session("loottable_e2e_partial");
    let engine = QueryEngine::new(StrsimScorer);
    let outcome = session.query(&engine, "gob", QueryKind::Entity);

    let names: Vec<_> = outcome.matches().iter().map(|m| m.hit.name.clone()).collect();
    assert!(outcome.is_confident());
    assert!(names.contains(&"goblin".to_string()));
}

#[test]
fn nonsense_gets_best_effort() {
    let session = session("loottable_e2e_nonsense");
    let engine = QueryEngine::new(StrsimScorer);
    let outcome = session.query(&engine, "zzzzzzzzzzzz", QueryKind::Entity);
    assert!(matches!(outcome, QueryOutcome::BestEffort { .. }));
}

// =============================================================================
// Item and table queries
// =============================================================================

#[test]
fn item_query_lists_sources() {
    let session = session("loottable_e2e_item");
    let engine = QueryEngine::new(StrsimScorer);
    let outcome = session.query(&engine, "BONES", QueryKind::Item);
    let matches = outcome.matches();

    assert_eq!(matches[0].hit.name, "bones");
    let Payload::Sources(sources) = &matches[0].payload else {
        panic!("expected sources");
    };
    let entities: Vec<_> = sources.iter().map(|s| s.entity.as_str()).collect();
    assert_eq!(entities, vec!["goblin", "hobgoblin"]);
    assert_eq!(sources[1].entries[0].chance, frac(48, 64));
}

#[test]
fn nested_items_are_not_indexed() {
    let session = session("loottable_e2e_nested");
    let snapshot = session.snapshot();
    assert!(snapshot.index().entities_for("uncut_sapphire").is_none());
    assert!(snapshot.index().entities_for("default_drop").is_some());
}

#[test]
fn table_query_by_alias() {
    let session = session("loottable_e2e_table");
    let engine = QueryEngine::new(StrsimScorer);
    let outcome = session.query(&engine, "rare_drop_table", QueryKind::Table);
    let matches = outcome.matches();

    assert_eq!(matches[0].hit.name, "rare_drop_table");
    let Payload::Drops(drops) = &matches[0].payload else {
        panic!("expected drops");
    };
    assert_eq!(drops[0].item(), Some("coins"));
    assert_eq!(drops[0].chance, Fraction::ONE);
}
