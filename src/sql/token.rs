//! Tokens tie a kind to the span it was lexed from.
use crate::sql::{keyword::Keyword, token_kind::TokenKind};
use crate::TokenLocation;

/// A lexical token. `K` is the dialect's token vocabulary.
///
/// Locations always refer to the script handed to the lexer, so the lexeme is
/// `location.extract(script)`. End-of-input tokens have an empty lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<K = TokenKind> {
    pub kind: K,
    pub location: TokenLocation,
}

impl<K> Token<K> {
    pub const fn new(kind: K, location: TokenLocation) -> Self {
        Self { kind, location }
    }

    pub const fn start(&self) -> usize {
        self.location.start_offset
    }

    pub fn text<'a>(&self, sql: &'a str) -> &'a str {
        self.location.extract(sql)
    }
}

impl Token {
    pub fn is_keyword(&self, kw: Keyword) -> bool {
        self.kind.is_keyword(kw)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}
