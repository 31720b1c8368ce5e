//! Session state for the REPL.
//!
//! The session owns the list of source files and the current [`Snapshot`].
//! Reloading reads every file again, builds a fresh snapshot, and swaps it
//! in whole. Readers holding the previous `Arc` keep a consistent view.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use loottable_engine::{
    Match, ModelBuilder, QueryEngine, QueryKind, QueryOutcome, Scorer, Snapshot,
};
use loottable_foundation::{Error, Result};
use loottable_script::ExtractConfig;
use tracing::{info, warn};

/// Counts from one reload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReloadSummary {
    /// Entities in the new model.
    pub entities: usize,
    /// Tables in the new model, not counting aliases.
    pub tables: usize,
    /// Diagnostics from the load pass.
    pub diagnostics: usize,
    /// Files that could not be read.
    pub skipped: Vec<PathBuf>,
}

/// Source files and the snapshot built from them.
#[derive(Debug, Default)]
pub struct Session {
    config: ExtractConfig,
    table_files: Vec<PathBuf>,
    entity_files: Vec<PathBuf>,
    snapshot: Arc<Snapshot>,
}

impl Session {
    /// Creates a session with no sources and an empty snapshot.
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

    /// Adds a shared-tables file. Takes effect on the next reload.
    pub fn add_table_file(&mut self, path: impl Into<PathBuf>) {
        self.table_files.push(path.into());
    }

    /// Adds an entity script. Takes effect on the next reload.
    pub fn add_entity_file(&mut self, path: impl Into<PathBuf>) {
        self.entity_files.push(path.into());
    }

    /// Returns the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        Arc::clone(&self.snapshot)
    }

    /// Searches the current snapshot.
    pub fn query<S: Scorer>(
        &self,
        engine: &QueryEngine<S>,
        text: &str,
        kind: QueryKind,
    ) -> QueryOutcome<Match> {
        self.snapshot.query(engine, text, kind)
    }

    /// Re-reads every source file and replaces the snapshot.
    ///
    /// Unreadable files are logged and skipped; the reload still completes.
    pub fn reload(&mut self) -> ReloadSummary {
        let mut builder = ModelBuilder::new().with_config(self.config.clone());
        let mut skipped = Vec::new();

        for path in &self.table_files {
            match read_source(path) {
                Ok(source) => {
                    builder.add_tables(&source);
                }
                Err(error) => {
                    warn!(%error, "skipping table file");
                    skipped.push(path.clone());
                }
            }
        }

        for path in &self.entity_files {
            let Some(name) = entity_name(path) else {
                warn!(path = %path.display(), "skipping file without a name");
                skipped.push(path.clone());
                continue;
            };
            match read_source(path) {
                Ok(source) => {
                    builder.add_entity(&name, &source);
                }
                Err(error) => {
                    warn!(%error, "skipping entity file");
                    skipped.push(path.clone());
                }
            }
        }

        let snapshot = Snapshot::from_report(builder.build());
        let summary = ReloadSummary {
            entities: snapshot.model().entity_count(),
            tables: snapshot.model().table_count(),
            diagnostics: snapshot.diagnostics().len(),
            skipped,
        };
        self.snapshot = Arc::new(snapshot);

        info!(
            entities = summary.entities,
            tables = summary.tables,
            skipped = summary.skipped.len(),
            "reloaded"
        );
        summary
    }
}

/// Names an entity after its file: the stem up to the first `.`.
///
/// `goblin.rs2` and `goblin.drops.rs2` both name `goblin`.
#[must_use]
pub fn entity_name(path: &Path) -> Option<String> {
    let file = path.file_name()?.to_str()?;
    let stem = file.split('.').next()?;
    (!stem.is_empty()).then(|| stem.to_string())
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}
