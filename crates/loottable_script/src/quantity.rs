//! Quantity expression parsing.
//!
//! Recognizes an integer literal or `calc(random(N) + M)`. Anything else
//! falls back to a quantity of one.

use loottable_foundation::Quantity;

use crate::lexer::Lexer;
use crate::token::TokenKind;

/// Parses quantity text, defaulting to one when it is not recognized.
#[must_use]
pub fn parse_quantity(text: &str) -> Quantity {
    try_parse_quantity(text).unwrap_or(Quantity::ONE)
}

/// Parses quantity text, returning `None` when it is not recognized.
#[must_use]
pub fn try_parse_quantity(text: &str) -> Option<Quantity> {
    let tokens = Lexer::tokenize(text);
    let kinds: Vec<&TokenKind> = tokens.iter().map(|t| &t.kind).collect();

    match kinds.as_slice() {
        [TokenKind::Int(n), TokenKind::Eof] => u32::try_from(*n).ok().map(Quantity::Fixed),
        [
            TokenKind::Ident(calc),
            TokenKind::LParen,
            TokenKind::Ident(random),
            TokenKind::LParen,
            TokenKind::Int(spread),
            TokenKind::RParen,
            TokenKind::Plus,
            TokenKind::Int(offset),
            TokenKind::RParen,
            TokenKind::Eof,
        ] if calc == "calc" && random == "random" => {
            let spread = u32::try_from(*spread).ok()?;
            let offset = u32::try_from(*offset).ok()?;
            Some(Quantity::from_random(spread, offset))
        }
        _ => None,
    }
}
