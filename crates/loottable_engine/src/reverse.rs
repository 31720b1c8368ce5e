//! Item to entity lookup.

use im::OrdMap;
use loottable_foundation::InsertionSet;

use crate::model::Model;

/// Which entities drop each concrete item.
///
/// Entities are listed once per item, in the order the model loaded them.
/// Table references are not items and are not indexed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReverseIndex {
    items: OrdMap<String, InsertionSet<String>>,
}

impl ReverseIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes every entity entry in a model.
    #[must_use]
    pub fn build(model: &Model) -> Self {
        let mut index = Self::new();
        for (entity, entries) in model.entities() {
            for item in entries.iter().filter_map(|e| e.item.as_item()) {
                index.insert(item, entity);
            }
        }
        index
    }

    /// Records that `entity` drops `item`. Repeats are ignored.
    pub fn insert(&mut self, item: &str, entity: &str) {
        let entity = entity.to_string();
        match self.items.get_mut(item) {
            Some(set) => *set = set.insert(entity),
            None => {
                self.items
                    .insert(item.to_string(), InsertionSet::new().insert(entity));
            }
        }
    }

    /// Returns the entities that drop an item.
    #[must_use]
    pub fn entities_for(&self, item: &str) -> Option<&InsertionSet<String>> {
        self.items.get(item)
    }

    /// Iterates indexed item ids in order.
    pub fn items(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }

    /// Number of distinct items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if nothing is indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
