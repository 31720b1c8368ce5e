//! The drop model and its builder.
//!
//! This module provides:
//! - [`Model`] - Entity drop lists and shared tables in persistent maps
//! - [`ModelBuilder`] - Extracts sources and merges them into a model
//! - [`LoadReport`] - A built model plus every diagnostic from the load pass

use std::collections::HashMap;

use im::{OrdMap, Vector};
use loottable_foundation::{Diagnostic, DiagnosticKind, DropEntry};
use loottable_script::{ExtractConfig, extract_entity, resolve_shared};
use tracing::{debug, info, warn};

// =============================================================================
// Model
// =============================================================================

/// Every entity drop list and shared table from one load pass.
///
/// A model is immutable once built. Reloading builds a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    pub(crate) entities: OrdMap<String, Vector<DropEntry>>,
    /// Entity names in the order they were first added.
    pub(crate) load_order: Vector<String>,
    pub(crate) tables: OrdMap<String, Vector<DropEntry>>,
    pub(crate) aliases: OrdMap<String, String>,
}

impl Model {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the drop list of an entity.
    #[must_use]
    pub fn entity(&self, name: &str) -> Option<&Vector<DropEntry>> {
        self.entities.get(name)
    }

    /// Returns a shared table by procedure name or public alias.
    #[must_use]
    pub fn table(&self, name: &str) -> Option<&Vector<DropEntry>> {
        self.tables.get(self.canonical(name))
    }

    /// Translates a public table name to its procedure name.
    #[must_use]
    pub fn canonical<'a>(&'a self, name: &'a str) -> &'a str {
        self.aliases.get(name).map_or(name, String::as_str)
    }

    /// Iterates entities and their drop lists in load order.
    pub fn entities(&self) -> impl Iterator<Item = (&str, &Vector<DropEntry>)> {
        self.load_order
            .iter()
            .filter_map(|name| self.entities.get(name).map(|v| (name.as_str(), v)))
    }

    /// Iterates entity names in load order.
    pub fn entity_names(&self) -> impl Iterator<Item = &str> {
        self.load_order.iter().map(String::as_str)
    }

    /// Iterates every name a table answers to: procedure names, then aliases.
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
    }

    /// Returns the public alias map.
    #[must_use]
    pub fn aliases(&self) -> &OrdMap<String, String> {
        &self.aliases
    }

    /// Number of entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Number of tables, not counting aliases.
    #[must_use]
    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if the model has no entities and no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty() && self.tables.is_empty()
    }
}

// =============================================================================
// Load Report
// =============================================================================

/// The output of a load pass.
///
/// The model is always usable; `diagnostics` lists what was recovered from.
#[derive(Clone, Debug, Default)]
pub struct LoadReport {
    /// The best-effort model.
    pub model: Model,
    /// Findings in the order they were produced.
    pub diagnostics: Vec<Diagnostic>,
}

// =============================================================================
// Model Builder
// =============================================================================

/// Accumulates extracted sources into a [`Model`].
///
/// Extraction is a pure function of each source. The builder only merges:
/// entries for the same name are concatenated in the order they were added.
#[derive(Clone, Debug, Default)]
pub struct ModelBuilder {
    config: ExtractConfig,
    model: Model,
    diagnostics: Vec<Diagnostic>,
}

impl ModelBuilder {
    /// Creates a builder with the default extraction config.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the extraction config.
    #[must_use]
    pub fn with_config(mut self, config: ExtractConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the extraction config.
    #[must_use]
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extracts an entity script and merges its entries under `name`.
    ///
    /// Returns the number of entries contributed.
    pub fn add_entity(&mut self, name: &str, source: &str) -> usize {
        let mut drops = extract_entity(name, source, &self.config);
        self.diagnostics.append(&mut drops.diagnostics);
        let count = drops.entries.len();
        self.add_entity_entries(name, drops.entries);
        count
    }

    /// Merges already-extracted entries under an entity name.
    ///
    /// Empty lists leave the model unchanged.
    pub fn add_entity_entries(&mut self, name: &str, entries: impl IntoIterator<Item = DropEntry>) {
        if merge(&mut self.model.entities, name, entries) {
            self.model.load_order.push_back(name.to_string());
        }
    }

    /// Resolves a shared-tables source and merges every table it defines.
    ///
    /// Returns the number of tables contributed.
    pub fn add_tables(&mut self, source: &str) -> usize {
        let mut shared = resolve_shared(source, &self.config);
        self.diagnostics.append(&mut shared.diagnostics);
        let count = shared.tables.len();
        for table in shared.tables {
            merge(&mut self.model.tables, &table.name, table.entries);
        }
        for (public, internal) in shared.aliases {
            self.model.aliases.insert(public, internal);
        }
        count
    }

    /// Merges already-extracted entries under a table's procedure name.
    pub fn add_table_entries(&mut self, name: &str, entries: impl IntoIterator<Item = DropEntry>) {
        merge(&mut self.model.tables, name, entries);
    }

    /// Adds a public alias for a table.
    pub fn add_alias(&mut self, public: impl Into<String>, internal: impl Into<String>) {
        self.model.aliases.insert(public.into(), internal.into());
    }

    /// Finishes the load pass.
    ///
    /// Reference cycles among tables are reported as diagnostics, one per
    /// back edge of a depth-first walk. References to unknown tables are
    /// logged.
    #[must_use]
    pub fn build(self) -> LoadReport {
        let Self {
            model,
            mut diagnostics,
            ..
        } = self;

        diagnostics.extend(CycleFinder::new(&model).run());

        for (entity, entries) in model.entities() {
            for missing in entries
                .iter()
                .filter_map(|e| e.item.as_table_ref())
                .filter(|t| model.table(t).is_none())
            {
                debug!(%entity, table = %missing, "reference to unknown table");
            }
        }

        info!(
            entities = model.entity_count(),
            tables = model.table_count(),
            diagnostics = diagnostics.len(),
            "model built"
        );
        LoadReport { model, diagnostics }
    }
}

// =============================================================================
// Cycle Detection
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mark {
    /// On the current walk.
    Active,
    /// Fully explored.
    Done,
}

/// Three-colour depth-first walk over table references.
///
/// Each table and each distinct reference is visited once, so the walk is
/// linear in the size of the reference graph.
struct CycleFinder<'m> {
    model: &'m Model,
    marks: HashMap<&'m str, Mark>,
    stack: Vec<&'m str>,
    found: Vec<Diagnostic>,
}

impl<'m> CycleFinder<'m> {
    fn new(model: &'m Model) -> Self {
        Self {
            model,
            marks: HashMap::new(),
            stack: Vec::new(),
            found: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Diagnostic> {
        let model = self.model;
        for name in model.tables.keys() {
            if !self.marks.contains_key(name.as_str()) {
                self.visit(name);
            }
        }
        self.found
    }

    fn visit(&mut self, table: &'m str) {
        let model = self.model;
        self.marks.insert(table, Mark::Active);
        self.stack.push(table);

        let mut targets: Vec<&'m str> = Vec::new();
        for reference in model
            .tables
            .get(table)
            .into_iter()
            .flatten()
            .filter_map(|e| e.item.as_table_ref())
        {
            let target = model.canonical(reference);
            if targets.contains(&target) {
                continue;
            }
            targets.push(target);

            let mark = self.marks.get(target).copied();
            match mark {
                Some(Mark::Active) => self.report(target),
                Some(Mark::Done) => {}
                None if model.tables.contains_key(target) => self.visit(target),
                None => debug!(from = %table, table = %reference, "reference to unknown table"),
            }
        }

        self.stack.pop();
        self.marks.insert(table, Mark::Done);
    }

    fn report(&mut self, table: &str) {
        let start = self.stack.iter().rposition(|t| *t == table).unwrap_or(0);
        let mut path: Vec<&str> = self.stack[start..].to_vec();
        path.push(table);
        let path = path.join(" -> ");

        warn!(%table, %path, "reference cycle");
        self.found.push(Diagnostic::new(
            table,
            DiagnosticKind::CycleDetected {
                table: table.to_string(),
                path,
            },
        ));
    }
}

/// Appends entries under `name`. Returns true if `name` was new.
fn merge(
    map: &mut OrdMap<String, Vector<DropEntry>>,
    name: &str,
    entries: impl IntoIterator<Item = DropEntry>,
) -> bool {
    let entries: Vector<DropEntry> = entries.into_iter().collect();
    if entries.is_empty() {
        return false;
    }
    match map.get_mut(name) {
        Some(existing) => {
            existing.append(entries);
            false
        }
        None => {
            map.insert(name.to_string(), entries);
            true
        }
    }
}
