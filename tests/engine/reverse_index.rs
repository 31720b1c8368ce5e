//! Integration tests for the item-to-entity index

use loottable_engine::{ModelBuilder, ReverseIndex, Snapshot};

fn snapshot() -> Snapshot {
    let mut builder = ModelBuilder::new();
    builder.add_entity(
        "goblin",
        "npc_param(death_drop);
         if ($random < 32) { obj_add(npc_coord, bones, 1, ^lootdrop_duration); }
         else if ($random < 64) { obj_add(npc_coord, bones, 2, ^lootdrop_duration); }
         else if ($random < 128) { obj_add(npc_coord, ~rare_drop_table, 1, ^lootdrop_duration); }",
    );
    builder.add_entity(
        "cow",
        "if ($random < 128) {
             obj_add(npc_coord, cowhide, 1, ^lootdrop_duration);
             obj_add(npc_coord, bones, 1, ^lootdrop_duration);
         }",
    );
    Snapshot::from_report(builder.build())
}

#[test]
fn index_lists_concrete_items_only() {
    let snapshot = snapshot();
    let items: Vec<_> = snapshot.index().items().collect();
    assert_eq!(items, vec!["bones", "cowhide", "default_drop"]);
    assert!(snapshot.index().entities_for("rare_drop_table").is_none());
}

#[test]
fn entities_listed_once_in_load_order() {
    let snapshot = snapshot();
    let bones: Vec<_> = snapshot
        .index()
        .entities_for("bones")
        .unwrap()
        .iter()
        .cloned()
        .collect();
    assert_eq!(bones, vec!["goblin", "cow"]);
}

#[test]
fn sources_keep_every_entry() {
    let snapshot = snapshot();
    let sources = snapshot.sources("bones");
    let goblin = sources.iter().find(|s| s.entity == "goblin").unwrap();
    assert_eq!(goblin.entries.len(), 2);
    assert!(snapshot.sources("dragon_bones").is_empty());
}

#[test]
fn rebuilding_is_idempotent() {
    let snapshot = snapshot();
    let again = ReverseIndex::build(snapshot.model());
    assert_eq!(&again, snapshot.index());

    let mut index = again.clone();
    index.insert("bones", "goblin");
    assert_eq!(index, again);
}
