//! Token types for drop scripts.
//!
//! Tokens are the output of the lexer and the input to branch extraction.

use crate::span::Span;

/// A token from lexical analysis.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// The type and value of this token.
    pub kind: TokenKind,
    /// Source location of this token.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns the text this token covers in the given source.
    #[must_use]
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        self.span.text(source)
    }

    /// Returns true if this token is the identifier `name`.
    #[must_use]
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(s) if s == name)
    }
}

/// Token types for drop scripts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Delimiters
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `:`
    Colon,

    // Operators
    /// `=` (assignment and equality)
    Eq,
    /// `!`
    Bang,
    /// `!=`
    BangEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%` not followed by a name
    Percent,
    /// `&`
    Amp,
    /// `|`
    Pipe,

    // Literals and names
    /// Integer literal like `128`
    Int(i64),
    /// String literal like `"Oh dear"`
    String(String),
    /// Bare identifier like `obj_add`, `coins` or `2h_sword`
    Ident(String),
    /// Local variable like `$random` (name without sigil)
    Local(String),
    /// Constant like `^lootdrop_duration` (name without sigil)
    Constant(String),
    /// Procedure reference like `~randomherb` (name without sigil)
    ProcRef(String),
    /// Label like `@npc_death` (name without sigil)
    Label(String),
    /// Player variable like `%quest_points` (name without sigil)
    Varp(String),

    // Meta
    /// Comment text (including the `//` or `/*` marker)
    Comment(String),
    /// End of input
    Eof,
    /// Lexer error
    Error(String),
}

impl TokenKind {
    /// Returns true if this token kind should be ignored during extraction.
    #[must_use]
    pub const fn is_trivia(&self) -> bool {
        matches!(self, Self::Comment(_))
    }

    /// Returns a human-readable name for this token kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBracket => "'['",
            Self::RBracket => "']'",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Colon => "':'",
            Self::Eq => "'='",
            Self::Bang => "'!'",
            Self::BangEq => "'!='",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Amp => "'&'",
            Self::Pipe => "'|'",
            Self::Int(_) => "integer",
            Self::String(_) => "string",
            Self::Ident(_) => "identifier",
            Self::Local(_) => "local variable",
            Self::Constant(_) => "constant",
            Self::ProcRef(_) => "procedure reference",
            Self::Label(_) => "label",
            Self::Varp(_) => "player variable",
            Self::Comment(_) => "comment",
            Self::Eof => "end of input",
            Self::Error(_) => "error",
        }
    }
}
