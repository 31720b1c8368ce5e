//! The interactive REPL.
//!
//! Each line is one command:
//!
//! ```text
//! monster goblin      drops of the best-matching monster
//! item bones          monsters that drop the best-matching item
//! table gem_drop_table
//! reload              re-read every source file
//! warnings            diagnostics from the last load
//! ```
//!
//! The menu numbers `1`, `2`, and `3` still work as `monster`, `item`, and
//! `quit`; without a name, `monster` and `item` ask for one.

use std::fmt::Write as _;
use std::io::{self, Write};

use loottable_engine::{
    Hit, ItemSource, Match, Payload, QueryConfig, QueryEngine, QueryKind, QueryOutcome,
    ResolvedDrop, ResolvedKind,
};
use loottable_foundation::{Fraction, Result};
use thiserror::Error;

use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::scorer::StrsimScorer;
use crate::session::{ReloadSummary, Session};

const COMMANDS: &[&str] = &[
    "monster", "item", "table", "reload", "warnings", "help", "quit",
];

// =============================================================================
// Commands
// =============================================================================

/// A parsed REPL line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Look up a monster; `None` asks for a name.
    Monster(Option<String>),
    /// Look up an item; `None` asks for a name.
    Item(Option<String>),
    /// Expand a shared table by name or alias.
    Table(String),
    /// Re-read every source file.
    Reload,
    /// List diagnostics from the last load.
    Warnings,
    /// Show the command list.
    Help,
    /// Leave the REPL.
    Quit,
}

/// Why a line is not a command.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    /// The command needs an argument.
    #[error("`{0}` needs a name")]
    MissingArgument(&'static str),
    /// The command takes no argument.
    #[error("`{0}` takes no arguments")]
    UnexpectedArgument(&'static str),
}

impl Command {
    /// Parses one non-empty line.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown commands and wrong argument counts.
    pub fn parse(line: &str) -> std::result::Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(w, r)| (w, r.trim()));
        let arg = (!rest.is_empty()).then(|| rest.to_string());
        let has_arg = arg.is_some();

        let bare = |command: Self, name: &'static str| {
            if has_arg {
                Err(CommandError::UnexpectedArgument(name))
            } else {
                Ok(command)
            }
        };

        match word.to_lowercase().as_str() {
            "monster" | "m" | "1" => Ok(Self::Monster(arg)),
            "item" | "i" | "2" => Ok(Self::Item(arg)),
            "table" | "t" => arg.map(Self::Table).ok_or(CommandError::MissingArgument("table")),
            "reload" => bare(Self::Reload, "reload"),
            "warnings" => bare(Self::Warnings, "warnings"),
            "help" | "?" => bare(Self::Help, "help"),
            "quit" | "exit" | "q" | "3" => bare(Self::Quit, "quit"),
            _ => Err(CommandError::Unknown(word.to_string())),
        }
    }
}

// =============================================================================
// REPL
// =============================================================================

/// The interactive REPL.
pub struct Repl<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Sources and the current snapshot.
    session: Session,

    /// Fuzzy name matching.
    engine: QueryEngine<StrsimScorer>,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl Repl<RustylineEditor> {
    /// Creates a new REPL with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(session: Session) -> Result<Self> {
        let editor = RustylineEditor::new()?;
        Ok(Self::with_editor(editor, session))
    }
}

impl<E: LineEditor> Repl<E> {
    /// Creates a new REPL with the given editor.
    pub fn with_editor(editor: E, session: Session) -> Self {
        let mut repl = Self {
            editor,
            session,
            engine: QueryEngine::new(StrsimScorer),
            show_banner: true,
            prompt: "loot> ".to_string(),
        };
        repl.refresh_keywords();
        repl
    }

    /// Builder method to set the query config.
    #[must_use]
    pub fn with_query_config(mut self, config: QueryConfig) -> Self {
        self.engine = self.engine.with_config(config);
        self
    }

    /// Disables the welcome banner.
    #[must_use]
    pub const fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Runs the REPL loop until `quit` or EOF.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        loop {
            let line = match self.editor.read_line(&self.prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.eval(&line)? {
                Some(output) => {
                    print!("{output}");
                    let _ = io::stdout().flush();
                }
                None => break,
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Evaluates one line and returns what to print, or `None` to quit.
    ///
    /// Unknown commands are reported in the output, not as errors.
    ///
    /// # Errors
    ///
    /// Returns an error if prompting for a missing name fails.
    pub fn eval(&mut self, line: &str) -> Result<Option<String>> {
        let command = match Command::parse(line) {
            Ok(command) => command,
            Err(e) => return Ok(Some(format!("{e}\n"))),
        };

        let output = match command {
            Command::Monster(name) => {
                let Some(name) = self.name_or_prompt(name, "monster name: ")? else {
                    return Ok(Some(String::new()));
                };
                self.lookup(&name, QueryKind::Entity)
            }
            Command::Item(name) => {
                let Some(name) = self.name_or_prompt(name, "item name: ")? else {
                    return Ok(Some(String::new()));
                };
                self.lookup(&name, QueryKind::Item)
            }
            Command::Table(name) => self.lookup(&name, QueryKind::Table),
            Command::Reload => {
                let summary = self.session.reload();
                self.refresh_keywords();
                format_reload(&summary)
            }
            Command::Warnings => self.format_warnings(),
            Command::Help => help_text(),
            Command::Quit => return Ok(None),
        };
        Ok(Some(output))
    }

    fn name_or_prompt(&mut self, name: Option<String>, prompt: &str) -> Result<Option<String>> {
        if let Some(name) = name {
            return Ok(Some(name));
        }
        match self.editor.read_line(prompt)? {
            ReadResult::Line(line) if !line.trim().is_empty() => Ok(Some(line.trim().to_string())),
            _ => Ok(None),
        }
    }

    fn lookup(&self, text: &str, kind: QueryKind) -> String {
        let outcome = self.session.query(&self.engine, text, kind);
        format_outcome(text, &outcome)
    }

    fn format_warnings(&self) -> String {
        let snapshot = self.session.snapshot();
        let diagnostics = snapshot.diagnostics();
        if diagnostics.is_empty() {
            return "No warnings.\n".to_string();
        }
        let mut out = String::new();
        for diagnostic in diagnostics {
            let _ = writeln!(out, "{diagnostic}");
        }
        out
    }

    /// Offers commands and every loaded name for completion.
    fn refresh_keywords(&mut self) {
        let snapshot = self.session.snapshot();
        let model = snapshot.model();
        let mut keywords: Vec<String> = COMMANDS.iter().map(|c| (*c).to_string()).collect();
        keywords.extend(model.entity_names().map(String::from));
        keywords.extend(model.table_names().map(String::from));
        keywords.extend(snapshot.index().items().map(String::from));
        keywords.sort();
        keywords.dedup();
        self.editor.set_keywords(keywords);
    }

    /// Prints the welcome banner.
    fn print_banner(&self) {
        let snapshot = self.session.snapshot();
        println!("\x1b[1;36mLoottable v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
        println!(
            "{} monsters, {} tables loaded. Type `help` for commands, Ctrl+D to exit.\n",
            snapshot.model().entity_count(),
            snapshot.model().table_count()
        );
        let _ = io::stdout().flush();
    }
}

// =============================================================================
// Formatting
// =============================================================================

fn format_outcome(text: &str, outcome: &QueryOutcome<Match>) -> String {
    let mut out = String::new();
    match outcome {
        QueryOutcome::Confident(matches) => {
            for m in matches {
                format_match(&mut out, m);
            }
        }
        QueryOutcome::BestEffort { best, alternatives } => {
            let _ = writeln!(out, "No close match for `{text}`; showing the nearest.");
            format_match(&mut out, best);
            if !alternatives.is_empty() {
                let names: Vec<&str> = alternatives.iter().map(|h| h.name.as_str()).collect();
                let _ = writeln!(out, "Did you mean: {}", names.join(", "));
            }
        }
        QueryOutcome::NoMatch => {
            let _ = writeln!(out, "No matches for `{text}`.");
        }
    }
    out
}

fn format_match(out: &mut String, m: &Match) {
    let Hit { name, score } = &m.hit;
    let _ = writeln!(out, "\x1b[1m{name}\x1b[0m ({score}%)");
    match &m.payload {
        Payload::Drops(drops) if drops.is_empty() => {
            let _ = writeln!(out, "  (no drops)");
        }
        Payload::Drops(drops) => {
            for drop in drops {
                let _ = writeln!(out, "  {}", format_drop(drop));
            }
        }
        Payload::Sources(sources) => {
            for source in sources {
                format_source(out, source);
            }
        }
    }
}

/// One line per drop: item, chance, quantity, rarity, members, path.
#[must_use]
pub fn format_drop(drop: &ResolvedDrop) -> String {
    let (label, quantity) = match &drop.kind {
        ResolvedKind::Item { item, quantity } => (item.clone(), quantity.to_string()),
        ResolvedKind::Cycle { table } => (format!("<cycle: {table}>"), String::new()),
        ResolvedKind::MissingTable { table } => (format!("<missing: {table}>"), String::new()),
        ResolvedKind::Overflow { table } => (format!("<overflow: {table}>"), String::new()),
    };
    let members = if drop.members_only { "members" } else { "" };
    let mut line = format!(
        "{label:<24} {:>18} {quantity:>8} {:<9} {members:<7}",
        format_chance(drop.chance),
        drop.rarity().name()
    );
    if !drop.path.is_empty() {
        let _ = write!(line, " via {}", drop.path.join(" > "));
    }
    line.trim_end().to_string()
}

fn format_source(out: &mut String, source: &ItemSource) {
    for entry in &source.entries {
        let members = if entry.members_only { "members" } else { "" };
        let _ = writeln!(
            out,
            "  {:<24} {:>18} {:>8} {:<9} {members}",
            source.entity,
            format_chance(entry.chance),
            entry.quantity.to_string(),
            entry.rarity.name()
        );
    }
}

/// Exact chance in lowest terms, plus the `1/N` reading when it differs.
fn format_chance(chance: Fraction) -> String {
    let exact = chance.reduced();
    let unit = chance.reduce_to_unit_numerator();
    if exact == unit {
        exact.to_string()
    } else {
        format!("{exact} (~{unit})")
    }
}

fn format_reload(summary: &ReloadSummary) -> String {
    let mut out = format!(
        "Reloaded {} monsters and {} tables with {} warnings.\n",
        summary.entities, summary.tables, summary.diagnostics
    );
    for path in &summary.skipped {
        let _ = writeln!(out, "  skipped {}", path.display());
    }
    out
}

fn help_text() -> String {
    "\
Commands:
  monster <name>   (1)  Drops of a monster, nested tables expanded
  item <name>      (2)  Monsters that drop an item
  table <name>          Contents of a shared table
  reload                Re-read every source file
  warnings              Diagnostics from the last load
  help                  This list
  quit             (3)  Leave
"
    .to_string()
}

/// Prints an error to stderr.
pub fn print_error(error: &loottable_foundation::Error) {
    eprintln!("\x1b[31mError: {error}\x1b[0m");
}
