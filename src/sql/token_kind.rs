//! Token kinds produced by the built-in lexer.
//!
//! A `TokenKind` carries no text; the lexeme is recovered from the token's
//! location in the source script.

use crate::sql::keyword::Keyword;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Bare, `[bracketed]` or `"quoted"` identifier.
    Ident,
    Keyword(Keyword),
    /// `'...'` or `N'...'` literal, possibly unterminated.
    StringLit,
    Number,
    Comma,
    Dot,
    ParenOpen,
    ParenClose,
    Semicolon,
    Star,
    Plus,
    Minus,
    Slash,
    Percent,
    Equals,
    /// `<>` or `!=`.
    NotEquals,
    Less,
    LessEquals,
    Greater,
    GreaterEquals,
    /// End of input; always the last token of a stream.
    Eof,
}

impl TokenKind {
    pub const COMPARISONS: [Self; 6] = [
        TokenKind::Equals,
        TokenKind::NotEquals,
        TokenKind::Less,
        TokenKind::LessEquals,
        TokenKind::Greater,
        TokenKind::GreaterEquals,
    ];

    pub fn is_keyword(&self, kw: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == kw)
    }

    pub fn is_ident(&self) -> bool {
        matches!(self, TokenKind::Ident)
    }

    pub fn is_punctuation(&self) -> bool {
        matches!(
            self,
            TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::ParenOpen
                | TokenKind::ParenClose
                | TokenKind::Semicolon
        )
    }

    /// Vocabulary display name: keywords by their spelling, fixed symbols as
    /// quoted literals and variable lexemes by their symbolic name.
    pub const fn display_name(&self) -> &'static str {
        match self {
            TokenKind::Ident => "ID",
            TokenKind::Keyword(keyword) => keyword.as_str(),
            TokenKind::StringLit => "STRING",
            TokenKind::Number => "DECIMAL",
            TokenKind::Comma => "','",
            TokenKind::Dot => "'.'",
            TokenKind::ParenOpen => "'('",
            TokenKind::ParenClose => "')'",
            TokenKind::Semicolon => "';'",
            TokenKind::Star => "'*'",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Slash => "'/'",
            TokenKind::Percent => "'%'",
            TokenKind::Equals => "'='",
            TokenKind::NotEquals => "'<>'",
            TokenKind::Less => "'<'",
            TokenKind::LessEquals => "'<='",
            TokenKind::Greater => "'>'",
            TokenKind::GreaterEquals => "'>='",
            TokenKind::Eof => "<EOF>",
        }
    }
}
