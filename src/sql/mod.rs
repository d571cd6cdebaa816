//! Lexical layer of the built-in dialect.
//!
//! Modules:
//! - `keyword`    : reserved words, matched case-insensitively.
//! - `token_kind` : the token vocabulary (keywords, literals, punctuation, EOF).
//! - `token`      : a kind paired with its source location.
//! - `tokenizer`  : lenient single pass lexer that reports instead of failing.
//! - `whitespace` : whitespace splitter used to find the word under a cursor.
//!
//! Both lexers accept any input, including incomplete or invalid SQL, and
//! work in UTF-8 byte offsets.
//!
//! Example:
//! ```rust
//! use sqlsurveyor::prelude::*;
//!
//! let sql = "SELECT a, b FROM my_table";
//! let tokens = tokenize(sql);
//! assert!(tokens[0].is_keyword(Keyword::Select));
//! assert!(tokens.iter().any(|t| t.text(sql) == "my_table"));
//! ```

pub mod keyword;
pub mod token;
pub mod token_kind;
pub mod tokenizer;
pub mod whitespace;

pub use keyword::Keyword;
pub use token::Token;
pub use token_kind::TokenKind;
pub use tokenizer::{tokenize, tokenize_with, unquote_identifier};
pub use whitespace::{RawToken, RawTokenKind, WhitespaceLexer};

/// Convenience prelude re-exporting the most commonly used items.
///
/// Import with:
/// `use sqlsurveyor::prelude::*;`
pub mod prelude {
    pub use super::{Keyword, Token, TokenKind, WhitespaceLexer, tokenize};
}
