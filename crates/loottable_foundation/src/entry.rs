//! Drop entries: one item (or nested table), its chance, quantity and flags.

use std::cmp::Ordering;
use std::fmt;

use crate::fraction::Fraction;
use crate::quantity::Quantity;

/// Item id of the synthetic entry added for units that declare a death drop.
pub const DEFAULT_DROP_ITEM: &str = "default_drop";

/// What a drop entry yields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum DropItem {
    /// A concrete item id.
    Item(String),
    /// A reference to another shared drop table, by name.
    TableRef(String),
}

impl DropItem {
    /// Returns the item id or table name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Item(id) | Self::TableRef(id) => id,
        }
    }

    /// Returns the item id if this is a concrete item.
    #[must_use]
    pub fn as_item(&self) -> Option<&str> {
        match self {
            Self::Item(id) => Some(id),
            Self::TableRef(_) => None,
        }
    }

    /// Returns the table name if this is a table reference.
    #[must_use]
    pub fn as_table_ref(&self) -> Option<&str> {
        match self {
            Self::TableRef(name) => Some(name),
            Self::Item(_) => None,
        }
    }
}

impl fmt::Display for DropItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item(id) => write!(f, "{id}"),
            Self::TableRef(name) => write!(f, "~{name}"),
        }
    }
}

/// Rarity bucket derived from a drop's exact chance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rarity {
    /// Guaranteed.
    Always,
    /// At least 1/25.
    Common,
    /// At least 1/99.
    Uncommon,
    /// At least 1/999.
    Rare,
    /// Below 1/999.
    VeryRare,
}

impl Rarity {
    /// Classifies a chance.
    #[must_use]
    pub fn from_chance(chance: &Fraction) -> Self {
        let at_least =
            |denominator| chance.cmp_value(&Fraction::one_in(denominator)) != Ordering::Less;
        if at_least(1) {
            Self::Always
        } else if at_least(25) {
            Self::Common
        } else if at_least(99) {
            Self::Uncommon
        } else if at_least(999) {
            Self::Rare
        } else {
            Self::VeryRare
        }
    }

    /// Returns a human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::VeryRare => "very rare",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One record of an entity's or shared table's drop list.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DropEntry {
    /// What is dropped.
    pub item: DropItem,
    /// How many.
    pub quantity: Quantity,
    /// Exact chance of this branch.
    pub chance: Fraction,
    /// Whether the drop is restricted to members.
    pub members_only: bool,
    /// Bucket derived from `chance`.
    pub rarity: Rarity,
}

impl DropEntry {
    /// Creates an entry, deriving its rarity.
    ///
    /// Table references always carry a quantity of one.
    #[must_use]
    pub fn new(item: DropItem, quantity: Quantity, chance: Fraction, members_only: bool) -> Self {
        let quantity = match item {
            DropItem::TableRef(_) => Quantity::ONE,
            DropItem::Item(_) => quantity,
        };
        Self {
            item,
            quantity,
            rarity: Rarity::from_chance(&chance),
            chance,
            members_only,
        }
    }

    /// The guaranteed entry prepended to units with a death drop.
    #[must_use]
    pub fn default_drop() -> Self {
        Self::new(
            DropItem::Item(DEFAULT_DROP_ITEM.to_string()),
            Quantity::ONE,
            Fraction::ONE,
            false,
        )
    }

    /// Returns a copy with the members flag replaced.
    #[must_use]
    pub fn with_members_only(mut self, members_only: bool) -> Self {
        self.members_only = members_only;
        self
    }

    /// Returns true if this entry points at another table.
    #[must_use]
    pub const fn is_table_ref(&self) -> bool {
        matches!(self.item, DropItem::TableRef(_))
    }
}
