//! Integration tests for fuzzy query selection

use loottable_engine::{
    DEFAULT_LIMIT, Hit, ModelBuilder, Payload, QueryConfig, QueryEngine, QueryKind, QueryOutcome,
    Snapshot,
};

/// Scores names the way a similarity metric would for the query "goblin".
fn goblin_scores(_query: &str, candidate: &str) -> u8 {
    match candidate {
        "goblin" => 100,
        "goblin_chief" | "hobgoblin" => 90,
        "cow" => 20,
        _ => 0,
    }
}

fn flat(score: u8) -> impl Fn(&str, &str) -> u8 {
    move |_, _| score
}

fn hit(name: &str, score: u8) -> Hit {
    Hit {
        name: name.to_string(),
        score,
    }
}

// =============================================================================
// Selection policy
// =============================================================================

#[test]
fn exact_match_narrows_to_near_exact() {
    let engine = QueryEngine::new(goblin_scores);
    let outcome = engine.search("goblin", ["hobgoblin", "goblin_chief", "goblin", "cow"]);
    assert_eq!(outcome, QueryOutcome::Confident(vec![hit("goblin", 100)]));
}

#[test]
fn confident_without_exact_keeps_all_above_threshold() {
    let engine = QueryEngine::new(goblin_scores);
    let outcome = engine.search("gob", ["hobgoblin", "goblin_chief", "cow"]);
    assert_eq!(
        outcome,
        QueryOutcome::Confident(vec![hit("hobgoblin", 90), hit("goblin_chief", 90)])
    );
}

#[test]
fn weak_matches_fall_back_to_best_effort() {
    let engine = QueryEngine::new(goblin_scores);
    let outcome = engine.search("x", ["cow", "imp"]);
    assert_eq!(
        outcome,
        QueryOutcome::BestEffort {
            best: hit("cow", 20),
            alternatives: vec![hit("imp", 0)],
        }
    );
    assert!(!outcome.is_confident());
    assert_eq!(outcome.matches().len(), 1);
}

#[test]
fn no_candidates_is_no_match() {
    let engine = QueryEngine::new(goblin_scores);
    assert_eq!(engine.search("goblin", std::iter::empty()), QueryOutcome::NoMatch);
}

#[test]
fn limit_caps_candidates() {
    let names: Vec<String> = (0..20).map(|i| format!("npc{i}")).collect();
    let engine = QueryEngine::new(flat(90));
    let outcome = engine.search("npc", names.iter().map(String::as_str));
    assert_eq!(outcome.matches().len(), DEFAULT_LIMIT);

    let engine = engine.with_config(QueryConfig::default().with_limit(2));
    let outcome = engine.search("npc", names.iter().map(String::as_str));
    assert_eq!(outcome.matches().len(), 2);
}

#[test]
fn thresholds_are_configurable() {
    let engine =
        QueryEngine::new(goblin_scores).with_config(QueryConfig::default().with_confident(15));
    assert!(engine.search("x", ["cow"]).is_confident());
}

// =============================================================================
// Snapshot queries
// =============================================================================

fn snapshot() -> Snapshot {
    let mut builder = ModelBuilder::new();
    for name in ["goblin", "goblin_chief", "hobgoblin"] {
        builder.add_entity(
            name,
            "if ($random < 128) { obj_add(npc_coord, bones, 1, ^lootdrop_duration); }",
        );
    }
    Snapshot::from_report(builder.build())
}

#[test]
fn entity_query_attaches_drops() {
    let engine = QueryEngine::new(goblin_scores);
    let outcome = snapshot().query(&engine, "Goblin", QueryKind::Entity);
    let matches = outcome.matches();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].hit.name, "goblin");
    let Payload::Drops(drops) = &matches[0].payload else {
        panic!("expected drops");
    };
    assert_eq!(drops[0].item(), Some("bones"));
}

#[test]
fn item_query_attaches_sources() {
    let engine = QueryEngine::new(|q: &str, c: &str| u8::from(q == c) * 100);
    let outcome = snapshot().query(&engine, "  BONES ", QueryKind::Item);
    let matches = outcome.matches();

    let Payload::Sources(sources) = &matches[0].payload else {
        panic!("expected sources");
    };
    let entities: Vec<_> = sources.iter().map(|s| s.entity.as_str()).collect();
    assert_eq!(entities, vec!["goblin", "goblin_chief", "hobgoblin"]);
}
