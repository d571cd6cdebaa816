use crate::*;

/// A caret position in a script, as a byte offset. The caret sits before the
/// character at `offset`; an offset at or past the end means "after the text".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    offset: usize,
}

impl Cursor {
    pub const fn new(offset: usize) -> Self {
        Self { offset }
    }

    pub fn end_of(sql: &str) -> Self {
        Self::new(sql.len())
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// The script up to and including the character at the cursor, widened to
    /// a character boundary and clamped to the script.
    pub fn truncate<'a>(&self, sql: &'a str) -> &'a str {
        let mut end = self.offset.saturating_add(1).min(sql.len());
        while !sql.is_char_boundary(end) {
            end += 1;
        }
        &sql[..end]
    }
}

/// Index of the whitespace token the cursor belongs to.
///
/// That is the token before the first one starting after `offset`. With no
/// such token, a script ending in whitespace puts the cursor on the
/// end-of-input token (a fresh word) and any other script on its last word.
/// `None` when the cursor precedes every token or there are none.
pub fn token_index_at(tokens: &[RawToken], sql: &str, offset: usize) -> Option<usize> {
    if let Some(next) = tokens
        .iter()
        .position(|token| !token.is_eof() && token.start > offset)
    {
        return next.checked_sub(1);
    }
    if sql.ends_with(char::is_whitespace) {
        return tokens.iter().position(RawToken::is_eof);
    }
    tokens.iter().rposition(|token| !token.is_eof())
}

/// What the user has typed of `token` up to the cursor.
pub fn typed_prefix<'a>(token: &RawToken, sql: &'a str, offset: usize) -> &'a str {
    if token.is_eof() || offset == 0 {
        return "";
    }
    let stop = token.stop.min(offset - 1);
    TokenLocation::new(token.line, token.line, token.start, stop).extract(sql)
}

/// Whether only whitespace separates `token` from a cursor past its end, so
/// the cursor starts a new word rather than extending `token`.
pub fn is_past_word(token: &RawToken, sql: &str, offset: usize) -> bool {
    if token.is_eof() || token.stop + 1 >= offset {
        return false;
    }
    sql.get(token.stop + 1..offset)
        .is_some_and(|gap| gap.chars().all(char::is_whitespace))
}

/// Index of the grammar token where completion happens: the first one
/// starting at or after the whitespace token, or end of input.
pub fn caret_token_index<K>(tokens: &[Token<K>], raw: &RawToken) -> usize {
    if raw.is_eof() {
        return tokens.len().saturating_sub(1);
    }
    first_token_from(tokens, raw.start)
}

/// Index of the first grammar token starting at or after `offset`, or of the
/// end-of-input token.
pub fn first_token_from<K>(tokens: &[Token<K>], offset: usize) -> usize {
    tokens
        .iter()
        .position(|token| token.start() >= offset)
        .unwrap_or(tokens.len().saturating_sub(1))
}
