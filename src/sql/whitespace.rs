//! Whitespace tokenizer used to locate the word under a cursor.
//!
//! Splits a script into maximal runs of non-whitespace characters. A `;`
//! outside quotes is a token on its own and also ends the run before it.
//! Single quotes toggle a quoted state (unless escaped with `\`) in which
//! whitespace and `;` belong to the current run.

use crate::TokenLocation;

const TERMINATOR: char = ';';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawTokenKind {
    Word,
    Terminator,
    Eof,
}

/// A run of text with inclusive byte offsets. The end-of-input token sits at
/// `start == stop == text.len()` and has no text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawToken {
    pub kind: RawTokenKind,
    pub start: usize,
    pub stop: usize,
    pub line: usize,
}

impl RawToken {
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, RawTokenKind::Eof)
    }

    pub const fn location(&self) -> TokenLocation {
        TokenLocation::new(self.line, self.line, self.start, self.stop)
    }

    pub fn text<'a>(&self, sql: &'a str) -> &'a str {
        self.location().extract(sql)
    }
}

pub struct WhitespaceLexer<'a> {
    text: &'a str,
    position: usize,
    line: usize,
    inside_quote: bool,
    finished: bool,
}

impl<'a> WhitespaceLexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            position: 0,
            line: 1,
            inside_quote: false,
            finished: false,
        }
    }

    /// Rewind to the start of the text.
    pub fn reset(&mut self) {
        self.position = 0;
        self.line = 1;
        self.inside_quote = false;
        self.finished = false;
    }

    fn advance(&mut self, ch: char) {
        if ch == '\n' {
            self.line += 1;
        }
        self.position += ch.len_utf8();
    }

    fn is_escaped(&self, index: usize) -> bool {
        self.text[..index].ends_with('\\')
    }
}

impl Iterator for WhitespaceLexer<'_> {
    type Item = RawToken;

    fn next(&mut self) -> Option<RawToken> {
        if self.finished {
            return None;
        }
        let mut start: Option<(usize, usize)> = None;
        while let Some(ch) = self.text[self.position..].chars().next() {
            let index = self.position;
            if ch == '\'' && !self.is_escaped(index) {
                self.inside_quote = !self.inside_quote;
            }
            let in_word = self.inside_quote || !(ch.is_whitespace() || ch == TERMINATOR);
            if in_word {
                start.get_or_insert((index, self.line));
            } else if let Some((offset, line)) = start {
                // The character ending the run is revisited on the next call.
                return Some(RawToken {
                    kind: RawTokenKind::Word,
                    start: offset,
                    stop: index - 1,
                    line,
                });
            } else if ch == TERMINATOR {
                let line = self.line;
                self.advance(ch);
                return Some(RawToken {
                    kind: RawTokenKind::Terminator,
                    start: index,
                    stop: index,
                    line,
                });
            }
            self.advance(ch);
        }
        if let Some((offset, line)) = start {
            return Some(RawToken {
                kind: RawTokenKind::Word,
                start: offset,
                stop: self.text.len() - 1,
                line,
            });
        }
        self.finished = true;
        let end = self.text.len();
        Some(RawToken {
            kind: RawTokenKind::Eof,
            start: end,
            stop: end,
            line: self.line,
        })
    }
}
