use derive_more::Display;

/// An inclusive span of the source script.
///
/// Lines are 1-based. Offsets are byte offsets into the UTF-8 text; both ends
/// are inclusive, so a one character token has `start_offset == end_offset`.
/// A span whose end lies before its start is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{start_line}:{start_offset}..{end_line}:{end_offset}")]
pub struct TokenLocation {
    pub start_line: usize,
    pub end_line: usize,
    pub start_offset: usize,
    pub end_offset: usize,
}

impl TokenLocation {
    pub const fn new(start_line: usize, end_line: usize, start_offset: usize, end_offset: usize) -> Self {
        Self {
            start_line,
            end_line,
            start_offset,
            end_offset,
        }
    }

    /// The substring of `text` covered by this span, or `""` when the span is
    /// empty or does not fall on character boundaries of `text`.
    pub fn extract<'a>(&self, text: &'a str) -> &'a str {
        if self.end_offset < self.start_offset {
            return "";
        }
        text.get(self.start_offset..=self.end_offset).unwrap_or_default()
    }

    pub const fn contains(&self, offset: usize) -> bool {
        self.start_offset <= offset && offset <= self.end_offset
    }

    pub const fn encloses(&self, other: &TokenLocation) -> bool {
        self.start_offset <= other.start_offset && other.end_offset <= self.end_offset
    }

    /// Span running from the start of `self` to the end of `last`.
    pub const fn to(&self, last: &TokenLocation) -> Self {
        Self::new(self.start_line, last.end_line, self.start_offset, last.end_offset)
    }
}
