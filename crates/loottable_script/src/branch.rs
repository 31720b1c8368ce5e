//! Branch extraction.
//!
//! A drop script rolls a counter once (`def_int $random = random(128);`) and
//! then walks a ladder of cumulative bounds:
//!
//! ```text
//! if ($random < 32) {
//!     obj_add(npc_coord, bones, 1, ^lootdrop_duration);
//! } else if ($random < 128) {
//!     obj_add(npc_coord, coins, calc(random(50) + 1), ^lootdrop_duration);
//! }
//! ```
//!
//! Each header opens a branch whose width is its bound minus the previous
//! bound. Every emission inside the branch becomes a [`DropEntry`] with chance
//! `width / total`.

use loottable_foundation::{Diagnostic, DiagnosticKind, DropEntry, DropItem, Fraction, Quantity};
use tracing::{debug, warn};

use crate::config::ExtractConfig;
use crate::lexer::Lexer;
use crate::quantity::try_parse_quantity;
use crate::token::{Token, TokenKind};

/// Item id that scripts use for "no drop".
const NULL_ITEM: &str = "null";

/// The drops extracted from one source unit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitDrops {
    /// Entity or procedure name.
    pub name: String,
    /// Extracted entries in source order.
    pub entries: Vec<DropEntry>,
    /// Data-quality findings for this unit.
    pub diagnostics: Vec<Diagnostic>,
}

impl UnitDrops {
    /// Returns true if no entries were extracted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The call form that emits a drop inside a branch body.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Emission {
    /// `obj_add(coord, item, quantity, duration)`, used by entity scripts.
    DropCall,
    /// `return(item, quantity)` or `return(~table)`, used by procedures.
    Return,
}

impl Emission {
    const fn callee(self) -> &'static str {
        match self {
            Self::DropCall => "obj_add",
            Self::Return => "return",
        }
    }
}

/// The counter a unit rolls and the total it rolls against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RandomTotal {
    /// Local variable tested by branch headers, without the `$`.
    pub counter: String,
    /// Branch denominator.
    pub total: u64,
}

impl RandomTotal {
    /// Finds the `$counter = random(N)` assignment whose local is tested by a
    /// branch header, falling back to the configured defaults.
    ///
    /// Other random locals, such as a roll for an amount, are ignored.
    #[must_use]
    pub fn find(tokens: &[Token], config: &ExtractConfig) -> Self {
        tokens
            .windows(6)
            .filter_map(|w| match (&w[0].kind, &w[4].kind) {
                (TokenKind::Local(counter), TokenKind::Int(n))
                    if w[1].kind == TokenKind::Eq
                        && w[2].is_ident("random")
                        && w[3].kind == TokenKind::LParen
                        && w[5].kind == TokenKind::RParen
                        && *n > 0 =>
                {
                    Some(Self {
                        counter: counter.clone(),
                        total: n.unsigned_abs(),
                    })
                }
                _ => None,
            })
            .find(|random| !find_headers(tokens, &random.counter).is_empty())
            .unwrap_or_else(|| Self {
                counter: config.default_counter.clone(),
                total: config.default_total,
            })
    }
}

/// Extracts the drop list of one entity script.
///
/// Units that mention `npc_param(death_drop)` get a guaranteed
/// `default_drop` entry ahead of their branch entries.
#[must_use]
pub fn extract_entity(name: &str, source: &str, config: &ExtractConfig) -> UnitDrops {
    let tokens = Lexer::tokenize(source);
    let random = RandomTotal::find(&tokens, config);
    let mut extractor = Extractor::new(name, source, Emission::DropCall);

    let mut entries = Vec::new();
    if has_death_drop(&tokens) {
        entries.push(DropEntry::default_drop());
    }
    entries.extend(extractor.branches(&tokens, &random));

    extractor.finish(entries)
}

/// A branch header located in a token stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Header {
    /// Index of the first header token (`else` when present).
    start: usize,
    /// Index of the first body token.
    body_start: usize,
    /// Cumulative upper bound.
    bound: u64,
    /// Source line of the header.
    line: u32,
}

/// Walks branch ladders and emission calls for one unit.
pub(crate) struct Extractor<'a> {
    unit: &'a str,
    source: &'a str,
    emission: Emission,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Extractor<'a> {
    pub(crate) fn new(unit: &'a str, source: &'a str, emission: Emission) -> Self {
        Self {
            unit,
            source,
            emission,
            diagnostics: Vec::new(),
        }
    }

    /// Records a diagnostic and logs it.
    pub(crate) fn report(&mut self, diagnostic: Diagnostic) {
        warn!(unit = self.unit, line = ?diagnostic.line, "{}", diagnostic.kind);
        self.diagnostics.push(diagnostic);
    }

    /// Wraps up the unit, flagging it when nothing was extracted.
    pub(crate) fn finish(mut self, entries: Vec<DropEntry>) -> UnitDrops {
        if entries.is_empty() {
            self.report(Diagnostic::new(self.unit, DiagnosticKind::UnparsableUnit));
        } else {
            debug!(unit = self.unit, entries = entries.len(), "extracted unit");
        }
        UnitDrops {
            name: self.unit.to_string(),
            entries,
            diagnostics: self.diagnostics,
        }
    }

    /// Extracts entries from every branch of the ladder in `tokens`.
    pub(crate) fn branches(&mut self, tokens: &[Token], random: &RandomTotal) -> Vec<DropEntry> {
        let headers = find_headers(tokens, &random.counter);
        let mut entries = Vec::new();
        let mut previous = 0u64;

        for (i, header) in headers.iter().enumerate() {
            let end = headers.get(i + 1).map_or(tokens.len(), |next| next.start);
            let body = &tokens[header.body_start..end];

            if header.bound <= previous {
                if header.bound < previous {
                    self.report(
                        Diagnostic::new(
                            self.unit,
                            DiagnosticKind::NonMonotonicBounds {
                                previous,
                                bound: header.bound,
                            },
                        )
                        .at_line(header.line),
                    );
                }
                continue;
            }

            let Ok(chance) = Fraction::new(header.bound - previous, random.total) else {
                continue;
            };
            let members_only = has_members_marker(body);
            for (item, quantity) in self.emissions(body) {
                entries.push(DropEntry::new(item, quantity, chance, members_only));
            }
            previous = header.bound;
        }

        entries
    }

    /// Collects every emission call in `tokens`.
    pub(crate) fn emissions(&mut self, tokens: &[Token]) -> Vec<(DropItem, Quantity)> {
        let callee = self.emission.callee();
        let mut found = Vec::new();
        let mut i = 0;

        while i < tokens.len() {
            let is_call = tokens[i].is_ident(callee)
                && tokens.get(i + 1).is_some_and(|t| t.kind == TokenKind::LParen);
            if !is_call {
                i += 1;
                continue;
            }
            let Some((args, close)) = call_args(tokens, i + 1) else {
                break;
            };
            if let Some(emitted) = self.emitted(&args) {
                found.push(emitted);
            }
            i = close + 1;
        }

        found
    }

    /// Interprets the arguments of one emission call.
    pub(crate) fn emitted(&mut self, args: &[&[Token]]) -> Option<(DropItem, Quantity)> {
        let (item_arg, quantity_arg) = match self.emission {
            Emission::DropCall => {
                let item = args.get(1)?;
                let quantity = if args.len() >= 4 { args.get(2) } else { None };
                (item, quantity)
            }
            Emission::Return => (args.first()?, args.get(1)),
        };

        let item = self.item(item_arg)?;
        let quantity = match (&item, quantity_arg) {
            (DropItem::TableRef(_), _) | (_, None) => Quantity::ONE,
            (DropItem::Item(_), Some(arg)) => self.quantity(arg),
        };
        Some((item, quantity))
    }

    /// Decides once whether an argument is a concrete item or a table reference.
    fn item(&self, arg: &[Token]) -> Option<DropItem> {
        if let [token] = arg {
            if let TokenKind::ProcRef(name) = &token.kind {
                return Some(DropItem::TableRef(name.clone()));
            }
        }
        let text = arg_text(self.source, arg);
        if text.is_empty() || text == NULL_ITEM {
            return None;
        }
        Some(DropItem::Item(text.to_string()))
    }

    fn quantity(&mut self, arg: &[Token]) -> Quantity {
        let text = arg_text(self.source, arg);
        if let Some(quantity) = try_parse_quantity(text) {
            return quantity;
        }
        let mut diagnostic = Diagnostic::new(
            self.unit,
            DiagnosticKind::MalformedQuantity {
                text: text.to_string(),
            },
        );
        if let Some(first) = arg.first() {
            diagnostic = diagnostic.at_line(first.span.line);
        }
        self.report(diagnostic);
        Quantity::ONE
    }
}

/// Locates every `[else] if ($counter < BOUND)` header in source order.
fn find_headers(tokens: &[Token], counter: &str) -> Vec<Header> {
    let mut headers = Vec::new();
    for (i, w) in tokens.windows(6).enumerate() {
        let matches_counter = matches!(&w[2].kind, TokenKind::Local(c) if c == counter);
        if !(w[0].is_ident("if")
            && w[1].kind == TokenKind::LParen
            && matches_counter
            && w[3].kind == TokenKind::Lt
            && w[5].kind == TokenKind::RParen)
        {
            continue;
        }
        let TokenKind::Int(bound) = w[4].kind else {
            continue;
        };
        let Ok(bound) = u64::try_from(bound) else {
            continue;
        };
        let start = if i > 0 && tokens[i - 1].is_ident("else") {
            i - 1
        } else {
            i
        };
        headers.push(Header {
            start,
            body_start: i + 6,
            bound,
            line: w[0].span.line,
        });
    }
    headers
}

/// Splits the arguments of a call whose `(` is at `open`.
///
/// Returns the top-level arguments and the index of the closing `)`, or
/// `None` if the call is unterminated.
pub(crate) fn call_args(tokens: &[Token], open: usize) -> Option<(Vec<&[Token]>, usize)> {
    let mut args = Vec::new();
    let mut depth = 0usize;
    let mut arg_start = open + 1;

    for (i, token) in tokens.iter().enumerate().skip(open + 1) {
        match token.kind {
            TokenKind::LParen => depth += 1,
            TokenKind::RParen if depth > 0 => depth -= 1,
            TokenKind::RParen => {
                let last = &tokens[arg_start..i];
                if !(args.is_empty() && last.is_empty()) {
                    args.push(last);
                }
                return Some((args, i));
            }
            TokenKind::Comma if depth == 0 => {
                args.push(&tokens[arg_start..i]);
                arg_start = i + 1;
            }
            TokenKind::Eof => return None,
            _ => {}
        }
    }
    None
}

/// Returns the source text covered by an argument's tokens.
pub(crate) fn arg_text<'s>(source: &'s str, arg: &[Token]) -> &'s str {
    match (arg.first(), arg.last()) {
        (Some(first), Some(last)) => first.span.to(last.span).text(source).trim(),
        _ => "",
    }
}

/// Returns true if the tokens contain `map_members = <value>`.
pub(crate) fn has_members_check(tokens: &[Token], value: &str) -> bool {
    tokens.windows(3).any(|w| {
        w[0].is_ident("map_members") && w[1].kind == TokenKind::Eq && w[2].is_ident(value)
    })
}

fn has_members_marker(tokens: &[Token]) -> bool {
    has_members_check(tokens, "true")
}

fn has_death_drop(tokens: &[Token]) -> bool {
    tokens.windows(4).any(|w| {
        w[0].is_ident("npc_param")
            && w[1].kind == TokenKind::LParen
            && w[2].is_ident("death_drop")
            && w[3].kind == TokenKind::RParen
    })
}
