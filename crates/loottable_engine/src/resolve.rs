//! Nested-table resolution.
//!
//! An entry whose item is a table reference stands for every entry of that
//! table, each scaled by the reference's chance. Expansion follows references
//! depth-first and carries the path of tables it went through. A table that is
//! already on the path is not entered again; a [`ResolvedKind::Cycle`] record
//! marks where expansion stopped.

use loottable_foundation::{DropEntry, DropItem, ErrorContext, Fraction, Quantity, Rarity};
use tracing::warn;

use crate::model::Model;

/// What a resolved drop turned out to be.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolvedKind {
    /// A concrete item.
    Item {
        /// Item id.
        item: String,
        /// How many.
        quantity: Quantity,
    },
    /// Expansion reached a table already on the current path.
    Cycle {
        /// The revisited table.
        table: String,
    },
    /// A referenced table does not exist.
    MissingTable {
        /// The name as referenced.
        table: String,
    },
    /// The composed chance does not fit in 64 bits.
    Overflow {
        /// The table whose entry could not be composed.
        table: String,
    },
}

/// One fully resolved drop with its effective chance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDrop {
    /// The item, or why expansion stopped.
    pub kind: ResolvedKind,
    /// Product of every chance along the path.
    pub chance: Fraction,
    /// True if any entry along the path was members-only.
    pub members_only: bool,
    /// Procedure names of the tables this drop was reached through.
    pub path: Vec<String>,
}

impl ResolvedDrop {
    /// Returns the item id, if this is a concrete item.
    #[must_use]
    pub fn item(&self) -> Option<&str> {
        match &self.kind {
            ResolvedKind::Item { item, .. } => Some(item),
            _ => None,
        }
    }

    /// Rarity of the effective chance.
    #[must_use]
    pub fn rarity(&self) -> Rarity {
        Rarity::from_chance(&self.chance)
    }

    /// Returns true if this record is a concrete item.
    #[must_use]
    pub const fn is_item(&self) -> bool {
        matches!(self.kind, ResolvedKind::Item { .. })
    }
}

impl Model {
    /// Expands a table at a starting chance and members flag.
    ///
    /// The name may be a public alias.
    #[must_use]
    pub fn expand_table(&self, name: &str, chance: Fraction, members: bool) -> Vec<ResolvedDrop> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        self.expand_into(name, chance, members, &mut path, &mut out);
        out
    }

    /// Resolves an entity's drop list, expanding every table reference.
    ///
    /// Returns `None` if the entity does not exist.
    #[must_use]
    pub fn resolve_entity(&self, name: &str) -> Option<Vec<ResolvedDrop>> {
        let entries = self.entity(name)?;
        let mut out = Vec::new();
        let mut path = Vec::new();
        for entry in entries {
            self.resolve_entry(entry, entry.chance, entry.members_only, &mut path, &mut out);
        }
        Some(out)
    }

    fn resolve_entry(
        &self,
        entry: &DropEntry,
        chance: Fraction,
        members: bool,
        path: &mut Vec<String>,
        out: &mut Vec<ResolvedDrop>,
    ) {
        match &entry.item {
            DropItem::Item(item) => out.push(ResolvedDrop {
                kind: ResolvedKind::Item {
                    item: item.clone(),
                    quantity: entry.quantity,
                },
                chance,
                members_only: members,
                path: path.clone(),
            }),
            DropItem::TableRef(table) => self.expand_into(table, chance, members, path, out),
        }
    }

    fn expand_into(
        &self,
        name: &str,
        chance: Fraction,
        members: bool,
        path: &mut Vec<String>,
        out: &mut Vec<ResolvedDrop>,
    ) {
        let canonical = self.canonical(name);

        if path.iter().any(|p| p == canonical) {
            let mut cycle = path.clone();
            cycle.push(canonical.to_string());
            out.push(ResolvedDrop {
                kind: ResolvedKind::Cycle {
                    table: canonical.to_string(),
                },
                chance,
                members_only: members,
                path: cycle,
            });
            return;
        }

        let Some(entries) = self.tables.get(canonical) else {
            out.push(ResolvedDrop {
                kind: ResolvedKind::MissingTable {
                    table: name.to_string(),
                },
                chance,
                members_only: members,
                path: path.clone(),
            });
            return;
        };

        path.push(canonical.to_string());
        for entry in entries {
            match chance.compose(entry.chance) {
                Ok(effective) => {
                    self.resolve_entry(
                        entry,
                        effective,
                        members || entry.members_only,
                        path,
                        out,
                    );
                }
                Err(error) => {
                    let context = path
                        .iter()
                        .fold(ErrorContext::new().with_unit(entry.item.name()), |c, t| {
                            c.with_table(t.as_str())
                        });
                    warn!(%error, %context, "chance overflow");
                    out.push(ResolvedDrop {
                        kind: ResolvedKind::Overflow {
                            table: canonical.to_string(),
                        },
                        chance,
                        members_only: members,
                        path: path.clone(),
                    });
                }
            }
        }
        path.pop();
    }
}
