//! Shared drop tables.
//!
//! A shared-tables file holds many `[proc,name]` procedures. Each one is a
//! reusable table that answers with `return(item, quantity)` or delegates
//! to another table with `return(~other)`:
//!
//! ```text
//! [proc,randomherb]()(namedobj, int)
//! if (map_members = false) return(coins, 20);
//! def_int $random = random(128);
//! if ($random < 32) {
//!     return(unidentified_guam, 1);
//! } else if ($random < 64) {
//!     return(~randomjewel);
//! }
//! switch_int(random(3)) {
//!     case 0 : return(law_rune, 10);
//!     case default : return(nature_rune, 10);
//! }
//! ```

use std::ops::Range;

use loottable_foundation::{Diagnostic, DropEntry, Fraction};
use tracing::debug;

use crate::branch::{Emission, Extractor, RandomTotal, UnitDrops, call_args, has_members_check};
use crate::config::ExtractConfig;
use crate::lexer::Lexer;
use crate::procedure::{Procedure, split_procedures};
use crate::token::{Token, TokenKind};

/// Every non-empty table parsed from a shared-tables source.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SharedTables {
    /// Tables keyed by procedure name, in source order.
    pub tables: Vec<UnitDrops>,
    /// Public name to procedure name, for aliased tables that exist.
    pub aliases: Vec<(String, String)>,
    /// Findings across all procedures, including skipped ones.
    pub diagnostics: Vec<Diagnostic>,
}

impl SharedTables {
    /// Looks up a table by procedure name or public alias.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&UnitDrops> {
        let internal = self
            .aliases
            .iter()
            .find(|(public, _)| public == name)
            .map_or(name, |(_, internal)| internal.as_str());
        self.tables.iter().find(|t| t.name == internal)
    }
}

/// Parses every procedure in a shared-tables source.
#[must_use]
pub fn resolve_shared(source: &str, config: &ExtractConfig) -> SharedTables {
    let tokens = Lexer::tokenize(source);
    let mut shared = SharedTables::default();

    for procedure in split_procedures(&tokens) {
        if !procedure.is_proc() {
            debug!(trigger = %procedure.trigger, name = %procedure.name, "skipping non-proc block");
            continue;
        }
        let mut table = extract_procedure(&procedure, source, config);
        shared.diagnostics.append(&mut table.diagnostics);
        if !table.is_empty() {
            shared.tables.push(table);
        }
    }

    for (public, internal) in &config.aliases {
        if shared.tables.iter().any(|t| t.name == *internal) {
            shared.aliases.push((public.clone(), internal.clone()));
        }
    }

    debug!(
        tables = shared.tables.len(),
        aliases = shared.aliases.len(),
        "resolved shared tables"
    );
    shared
}

/// Extracts one procedure's table.
#[must_use]
pub fn extract_procedure(
    procedure: &Procedure<'_>,
    source: &str,
    config: &ExtractConfig,
) -> UnitDrops {
    let body = procedure.body;
    let mut extractor = Extractor::new(&procedure.name, source, Emission::Return);
    let random = RandomTotal::find(body, config);
    let mut entries = Vec::new();
    let mut masked: Vec<Range<usize>> = Vec::new();

    if let Some((args, range)) = find_members_guard(body) {
        if let Some((item, quantity)) = extractor.emitted(&args) {
            entries.push(DropEntry::new(item, quantity, Fraction::ONE, false));
        }
        masked.push(range);
    }

    let switches = find_switches(body);
    masked.extend(switches.iter().map(|s| s.range.clone()));

    let remaining: Vec<Token> = body
        .iter()
        .enumerate()
        .filter(|(i, _)| !masked.iter().any(|r| r.contains(i)))
        .map(|(_, t)| t.clone())
        .collect();
    entries.extend(extractor.branches(&remaining, &random));

    for switch in &switches {
        for arm in &switch.arms {
            let Ok(chance) = Fraction::new(arm.labels, switch.spread + 1) else {
                continue;
            };
            let arm_tokens = &body[arm.body.clone()];
            let members_only = has_members_check(arm_tokens, "true");
            for (item, quantity) in extractor.emissions(arm_tokens) {
                entries.push(DropEntry::new(item, quantity, chance, members_only));
            }
        }
    }

    if config.is_rare_table(&procedure.name) {
        apply_rare_table_rule(&mut entries);
    }

    extractor.finish(entries)
}

/// Forces every entry after the first to members-only.
///
/// Only the first slot of the rare drop table is open to non-members. This
/// is a fixed rule for that one table, not something read from the script.
pub fn apply_rare_table_rule(entries: &mut [DropEntry]) {
    for entry in entries.iter_mut().skip(1) {
        entry.members_only = true;
    }
}

/// Finds `if (map_members = false) return(...);`, braces optional.
///
/// Returns the `return` arguments and the token range the guard covers.
fn find_members_guard(tokens: &[Token]) -> Option<(Vec<&[Token]>, Range<usize>)> {
    let start = tokens.windows(6).position(|w| {
        w[0].is_ident("if")
            && w[1].kind == TokenKind::LParen
            && w[2].is_ident("map_members")
            && w[3].kind == TokenKind::Eq
            && w[4].is_ident("false")
            && w[5].kind == TokenKind::RParen
    })?;

    let mut at = start + 6;
    let braced = tokens.get(at).is_some_and(|t| t.kind == TokenKind::LBrace);
    if braced {
        at += 1;
    }
    let is_return = tokens.get(at).is_some_and(|t| t.is_ident("return"))
        && tokens.get(at + 1).is_some_and(|t| t.kind == TokenKind::LParen);
    if !is_return {
        return None;
    }

    let (args, close) = call_args(tokens, at + 1)?;
    let mut end = close + 1;
    if tokens.get(end).is_some_and(|t| t.kind == TokenKind::Semicolon) {
        end += 1;
    }
    if braced && tokens.get(end).is_some_and(|t| t.kind == TokenKind::RBrace) {
        end += 1;
    }
    Some((args, start..end))
}

/// A `switch_int(random(N)) { ... }` block.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SwitchBlock {
    /// `N` in `random(N)`.
    spread: u64,
    /// Token range of the whole block, header included.
    range: Range<usize>,
    /// The `case` arms in order.
    arms: Vec<SwitchArm>,
}

/// One `case a, b :` arm.
#[derive(Clone, Debug, PartialEq, Eq)]
struct SwitchArm {
    /// Number of labels (`default` counts as one).
    labels: u64,
    /// Token range of the arm body.
    body: Range<usize>,
}

/// Finds every top-level random switch block.
fn find_switches(tokens: &[Token]) -> Vec<SwitchBlock> {
    let mut blocks = Vec::new();
    let mut i = 0;

    while i + 8 <= tokens.len() {
        let w = &tokens[i..i + 8];
        let header = w[0].is_ident("switch_int")
            && w[1].kind == TokenKind::LParen
            && w[2].is_ident("random")
            && w[3].kind == TokenKind::LParen
            && w[5].kind == TokenKind::RParen
            && w[6].kind == TokenKind::RParen
            && w[7].kind == TokenKind::LBrace;
        let spread = match w[4].kind {
            TokenKind::Int(n) if header => u64::try_from(n).ok(),
            _ => None,
        };
        let Some(spread) = spread else {
            i += 1;
            continue;
        };

        let open = i + 7;
        let Some(close) = matching_brace(tokens, open) else {
            break;
        };
        blocks.push(SwitchBlock {
            spread,
            range: i..close + 1,
            arms: switch_arms(tokens, open, close),
        });
        i = close + 1;
    }

    blocks
}

/// Returns the index of the `}` matching the `{` at `open`.
fn matching_brace(tokens: &[Token], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, token) in tokens.iter().enumerate().skip(open) {
        match token.kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Splits the inside of a switch block into arms.
fn switch_arms(tokens: &[Token], open: usize, close: usize) -> Vec<SwitchArm> {
    let mut arms = Vec::new();
    let mut current: Option<(u64, usize)> = None;
    let mut depth = 0usize;
    let mut k = open + 1;

    while k < close {
        match tokens[k].kind {
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => depth = depth.saturating_sub(1),
            _ if depth == 0 && tokens[k].is_ident("case") => {
                if let Some((labels, start)) = current.take() {
                    arms.push(SwitchArm {
                        labels,
                        body: start..k,
                    });
                }
                let mut labels = 1u64;
                let mut m = k + 1;
                while m < close && tokens[m].kind != TokenKind::Colon {
                    if tokens[m].kind == TokenKind::Comma {
                        labels += 1;
                    }
                    m += 1;
                }
                current = Some((labels, (m + 1).min(close)));
                k = m;
            }
            _ => {}
        }
        k += 1;
    }

    if let Some((labels, start)) = current {
        arms.push(SwitchArm {
            labels,
            body: start..close,
        });
    }
    arms
}
