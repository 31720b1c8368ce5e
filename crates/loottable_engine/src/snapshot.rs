//! A queryable view of one load pass.

use loottable_foundation::{Diagnostic, DropEntry, Fraction};

use crate::model::{LoadReport, Model};
use crate::query::{Hit, QueryEngine, QueryOutcome, Scorer};
use crate::resolve::ResolvedDrop;
use crate::reverse::ReverseIndex;

/// Which names a query searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QueryKind {
    /// Entity names; answers carry resolved drop lists.
    Entity,
    /// Item ids; answers carry the entities that drop the item.
    Item,
    /// Shared table names and aliases; answers carry the expanded table.
    Table,
}

/// One entity's entries for a queried item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemSource {
    /// The entity that drops the item.
    pub entity: String,
    /// Every entry of that entity naming the item.
    pub entries: Vec<DropEntry>,
}

/// What a matched name resolved to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Payload {
    /// Resolved drops of an entity or table.
    Drops(Vec<ResolvedDrop>),
    /// Entities dropping an item.
    Sources(Vec<ItemSource>),
}

/// A matched name together with its payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// The matched candidate.
    pub hit: Hit,
    /// What the candidate resolved to.
    pub payload: Payload,
}

/// A model, its reverse index, and the diagnostics of the pass that built it.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    model: Model,
    index: ReverseIndex,
    diagnostics: Vec<Diagnostic>,
}

impl Snapshot {
    /// Builds the reverse index for a model.
    #[must_use]
    pub fn new(model: Model) -> Self {
        let index = ReverseIndex::build(&model);
        Self {
            model,
            index,
            diagnostics: Vec::new(),
        }
    }

    /// Builds a snapshot that keeps a load report's diagnostics.
    #[must_use]
    pub fn from_report(report: LoadReport) -> Self {
        Self {
            diagnostics: report.diagnostics,
            ..Self::new(report.model)
        }
    }

    /// Returns the model.
    #[must_use]
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Returns the reverse index.
    #[must_use]
    pub fn index(&self) -> &ReverseIndex {
        &self.index
    }

    /// Returns the diagnostics of the load pass.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Searches entity, item, or table names and attaches payloads.
    pub fn query<S: Scorer>(
        &self,
        engine: &QueryEngine<S>,
        text: &str,
        kind: QueryKind,
    ) -> QueryOutcome<Match> {
        let outcome = match kind {
            QueryKind::Entity => engine.search(text, self.model.entity_names()),
            QueryKind::Item => engine.search(text, self.index.items()),
            QueryKind::Table => engine.search(text, self.model.table_names()),
        };
        outcome.map(|hit| {
            let payload = self.payload(&hit.name, kind);
            Match { hit, payload }
        })
    }

    fn payload(&self, name: &str, kind: QueryKind) -> Payload {
        match kind {
            QueryKind::Entity => {
                Payload::Drops(self.model.resolve_entity(name).unwrap_or_default())
            }
            QueryKind::Table => Payload::Drops(self.model.expand_table(name, Fraction::ONE, false)),
            QueryKind::Item => Payload::Sources(self.sources(name)),
        }
    }

    /// Lists every entity that drops `item` with the entries naming it.
    #[must_use]
    pub fn sources(&self, item: &str) -> Vec<ItemSource> {
        let Some(entities) = self.index.entities_for(item) else {
            return Vec::new();
        };
        entities
            .iter()
            .filter_map(|entity| {
                let entries = self.model.entity(entity)?;
                Some(ItemSource {
                    entity: entity.clone(),
                    entries: entries
                        .iter()
                        .filter(|e| e.item.as_item() == Some(item))
                        .cloned()
                        .collect(),
                })
            })
            .collect()
    }
}
