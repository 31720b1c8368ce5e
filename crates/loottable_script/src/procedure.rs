//! Splitting a script file into `[trigger,name]` blocks.

use crate::token::{Token, TokenKind};

/// One `[trigger,name]` block and the tokens that follow it.
#[derive(Clone, Debug, PartialEq)]
pub struct Procedure<'t> {
    /// Trigger kind, e.g. `proc` or `ai_queue3`.
    pub trigger: String,
    /// Block name, e.g. `randomherb`.
    pub name: String,
    /// Line of the header.
    pub line: u32,
    /// Tokens between this header and the next one.
    pub body: &'t [Token],
}

impl Procedure<'_> {
    /// Returns true if this block is a `[proc,...]`.
    #[must_use]
    pub fn is_proc(&self) -> bool {
        self.trigger == "proc"
    }
}

/// Splits a token stream at every `[trigger,name]` header.
///
/// Tokens before the first header belong to no block and are ignored.
#[must_use]
pub fn split_procedures(tokens: &[Token]) -> Vec<Procedure<'_>> {
    let headers: Vec<(usize, String, String, u32)> = tokens
        .windows(5)
        .enumerate()
        .filter_map(|(i, w)| match (&w[1].kind, &w[3].kind) {
            (TokenKind::Ident(trigger), TokenKind::Ident(name))
                if w[0].kind == TokenKind::LBracket
                    && w[2].kind == TokenKind::Comma
                    && w[4].kind == TokenKind::RBracket =>
            {
                Some((i, trigger.clone(), name.clone(), w[0].span.line))
            }
            _ => None,
        })
        .collect();

    headers
        .iter()
        .enumerate()
        .map(|(n, (start, trigger, name, line))| {
            let end = headers.get(n + 1).map_or(tokens.len(), |next| next.0);
            Procedure {
                trigger: trigger.clone(),
                name: name.clone(),
                line: *line,
                body: &tokens[start + 5..end],
            }
        })
        .collect()
}
