//! Lexer for drop scripts.
//!
//! The lexer converts script source text into a stream of tokens. It never
//! fails: unexpected input becomes a [`TokenKind::Error`] token and scanning
//! continues.

use crate::span::Span;
use crate::token::{Token, TokenKind};

/// Lexer for script source code.
pub struct Lexer<'src> {
    /// Source text being tokenized.
    source: &'src str,
    /// Remaining source text.
    rest: &'src str,
    /// Current byte offset in source.
    position: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    column: u32,
}

impl<'src> Lexer<'src> {
    /// Creates a new lexer for the given source.
    #[must_use]
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Returns the next token from the source.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.position;
        let start_line = self.line;
        let start_column = self.column;

        let Some(c) = self.peek_char() else {
            return Token::new(
                TokenKind::Eof,
                Span::new(start, start, start_line, start_column),
            );
        };

        let kind = match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBracket),
            ']' => self.single(TokenKind::RBracket),
            '{' => self.single(TokenKind::LBrace),
            '}' => self.single(TokenKind::RBrace),
            ',' => self.single(TokenKind::Comma),
            ';' => self.single(TokenKind::Semicolon),
            ':' => self.single(TokenKind::Colon),
            '=' => self.single(TokenKind::Eq),
            '!' => self.with_eq(TokenKind::Bang, TokenKind::BangEq),
            '+' => self.single(TokenKind::Plus),
            '-' => self.single(TokenKind::Minus),
            '*' => self.single(TokenKind::Star),
            '&' => self.single(TokenKind::Amp),
            '|' => self.single(TokenKind::Pipe),
            '<' => self.with_eq(TokenKind::Lt, TokenKind::LtEq),
            '>' => self.with_eq(TokenKind::Gt, TokenKind::GtEq),
            '/' => self.scan_slash(),
            '"' => self.scan_string(),
            '$' => self.scan_sigil(TokenKind::Local, '$'),
            '^' => self.scan_sigil(TokenKind::Constant, '^'),
            '~' => self.scan_sigil(TokenKind::ProcRef, '~'),
            '@' => self.scan_sigil(TokenKind::Label, '@'),
            '%' => {
                self.advance();
                if self.peek_char().is_some_and(is_name_char) {
                    TokenKind::Varp(self.scan_name_text())
                } else {
                    TokenKind::Percent
                }
            }
            c if c.is_ascii_digit() => self.scan_number(),
            c if is_name_start(c) => TokenKind::Ident(self.scan_name_text()),
            c => {
                self.advance();
                TokenKind::Error(format!("unexpected character: {c}"))
            }
        };

        Token::new(
            kind,
            Span::new(start, self.position, start_line, start_column),
        )
    }

    /// Tokenizes all source and returns a vector of tokens.
    ///
    /// Comments are included in the output. The last token is always `Eof`.
    #[must_use]
    pub fn tokenize_all(source: &str) -> Vec<Token> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }

    /// Tokenizes all source, dropping comments.
    #[must_use]
    pub fn tokenize(source: &str) -> Vec<Token> {
        Self::tokenize_all(source)
            .into_iter()
            .filter(|t| !t.kind.is_trivia())
            .collect()
    }

    /// Peeks at the next character without consuming it.
    fn peek_char(&self) -> Option<char> {
        self.rest.chars().next()
    }

    /// Peeks at the character `n` places ahead.
    fn peek_char_n(&self, n: usize) -> Option<char> {
        self.rest.chars().nth(n)
    }

    /// Advances past the next character.
    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            let len = c.len_utf8();
            self.rest = &self.rest[len..];
            self.position += len;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    /// Consumes one character and returns `kind`.
    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    /// Consumes `<` or `>` with an optional trailing `=`.
    fn with_eq(&mut self, bare: TokenKind, with_eq: TokenKind) -> TokenKind {
        self.advance();
        if self.peek_char() == Some('=') {
            self.advance();
            with_eq
        } else {
            bare
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    /// Scans `/`, a line comment, or a block comment.
    fn scan_slash(&mut self) -> TokenKind {
        match self.peek_char_n(1) {
            Some('/') => {
                let start = self.position;
                while self.peek_char().is_some_and(|c| c != '\n') {
                    self.advance();
                }
                TokenKind::Comment(self.source[start..self.position].to_string())
            }
            Some('*') => {
                let start = self.position;
                self.advance();
                self.advance();
                loop {
                    match self.peek_char() {
                        Some('*') if self.peek_char_n(1) == Some('/') => {
                            self.advance();
                            self.advance();
                            break;
                        }
                        Some(_) => self.advance(),
                        None => return TokenKind::Error("unterminated block comment".into()),
                    }
                }
                TokenKind::Comment(self.source[start..self.position].to_string())
            }
            _ => self.single(TokenKind::Slash),
        }
    }

    /// Scans a string literal.
    fn scan_string(&mut self) -> TokenKind {
        self.advance(); // consume opening '"'
        let mut text = String::new();
        loop {
            match self.peek_char() {
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    match self.peek_char() {
                        Some(c) => {
                            self.advance();
                            text.push(c);
                        }
                        None => {
                            return TokenKind::Error(
                                "unexpected end of input in string escape".into(),
                            );
                        }
                    }
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
                None => {
                    return TokenKind::Error("unterminated string literal".into());
                }
            }
        }
        TokenKind::String(text)
    }

    /// Scans a sigiled name such as `$random` or `~randomherb`.
    fn scan_sigil(&mut self, make: fn(String) -> TokenKind, sigil: char) -> TokenKind {
        self.advance(); // consume sigil
        let name = self.scan_name_text();
        if name.is_empty() {
            TokenKind::Error(format!("expected name after '{sigil}'"))
        } else {
            make(name)
        }
    }

    /// Scans an integer, or an identifier that starts with digits.
    fn scan_number(&mut self) -> TokenKind {
        let start = self.position;
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }

        if self.peek_char().is_some_and(is_name_char) {
            // Names like `2h_sword` or `3dose_potion`
            self.scan_name_text();
            return TokenKind::Ident(self.source[start..self.position].to_string());
        }

        let text = &self.source[start..self.position];
        match text.parse::<i64>() {
            Ok(n) => TokenKind::Int(n),
            Err(e) => TokenKind::Error(format!("invalid integer: {e}")),
        }
    }

    /// Scans name characters and returns them.
    fn scan_name_text(&mut self) -> String {
        let start = self.position;
        while self.peek_char().is_some_and(is_name_char) {
            self.advance();
        }
        self.source[start..self.position].to_string()
    }
}

/// Returns true if `c` can start a bare identifier.
fn is_name_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '.'
}

/// Returns true if `c` can appear in a name.
fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '.'
}
