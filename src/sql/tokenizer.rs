use crate::sql::{keyword::Keyword, token::Token, token_kind::TokenKind};
use crate::{ErrorStrategy, SyntaxError, TokenLocation, TrackingErrorStrategy};

/// Tokenize `sql`, discarding lexical errors.
pub fn tokenize(sql: &str) -> Vec<Token> {
    tokenize_with(sql, &mut TrackingErrorStrategy::default())
}

/// Lenient SQL lexer producing a flat stream of [`Token`]s.
///
/// Behavior:
/// - Skips whitespace, `-- line` and `/* block */` comments.
/// - Words made of `[A-Za-z0-9_@#$]` (not starting with a digit or `$`) are
///   keywords when they match case-insensitively, identifiers otherwise.
/// - `[name]` and `"name"` are identifiers; `'text'` and `N'text'` are
///   strings with `''` as the escaped quote.
/// - Unterminated strings, quoted identifiers and comments run to the end of
///   the input and are reported; unknown characters are reported and skipped.
///
/// Guarantees:
/// - Never fails; every problem goes to `errors` as a lexical [`SyntaxError`].
/// - The stream always ends with a single [`TokenKind::Eof`] token located at
///   `sql.len()`.
/// - Token offsets fall on character boundaries of `sql`.
pub fn tokenize_with<E>(sql: &str, errors: &mut E) -> Vec<Token>
where
    E: ErrorStrategy + ?Sized,
{
    let mut scanner = Scanner::new(sql);
    let mut out = Vec::new();

    while let Some(b) = scanner.peek() {
        let start = scanner.pos;
        let line = scanner.line;

        if b.is_ascii_whitespace() {
            scanner.bump();
            continue;
        }

        let kind = match b {
            b'-' if scanner.peek_at(1) == Some(b'-') => {
                scanner.bump_while(|b| b != b'\n');
                continue;
            }
            b'/' if scanner.peek_at(1) == Some(b'*') => {
                scanner.bump_n(2);
                if !scanner.bump_past(b"*/") {
                    errors.report(SyntaxError::lexical(
                        scanner.location(start, line),
                        "unterminated block comment".into(),
                    ));
                }
                continue;
            }
            b'\'' => {
                scanner.string_literal(start, line, errors);
                TokenKind::StringLit
            }
            b'N' | b'n' if scanner.peek_at(1) == Some(b'\'') => {
                scanner.bump();
                scanner.string_literal(start, line, errors);
                TokenKind::StringLit
            }
            b'[' => {
                scanner.quoted_identifier(b']', start, line, errors);
                TokenKind::Ident
            }
            b'"' => {
                scanner.quoted_identifier(b'"', start, line, errors);
                TokenKind::Ident
            }
            b'0'..=b'9' => {
                scanner.bump_while(|b| b.is_ascii_digit());
                if scanner.peek() == Some(b'.') && scanner.peek_at(1).is_some_and(|b| b.is_ascii_digit()) {
                    scanner.bump();
                    scanner.bump_while(|b| b.is_ascii_digit());
                }
                TokenKind::Number
            }
            b if is_word_start(b) => {
                scanner.bump_while(is_word_part);
                let upper = sql[start..scanner.pos].to_ascii_uppercase();
                Keyword::from_upper(&upper)
                    .map(TokenKind::Keyword)
                    .unwrap_or(TokenKind::Ident)
            }
            _ => match scanner.operator() {
                Some(kind) => kind,
                None => {
                    scanner.bump_char();
                    let location = scanner.location(start, line);
                    let message = format!("token recognition error at: '{}'", location.extract(sql));
                    errors.report(SyntaxError::lexical(location, message));
                    continue;
                }
            },
        };
        out.push(Token::new(kind, scanner.location(start, line)));
    }

    let end = sql.len();
    out.push(Token::new(
        TokenKind::Eof,
        TokenLocation::new(scanner.line, scanner.line, end, end),
    ));
    out
}

/// The name an identifier lexeme refers to: surrounding `[]` or `""` removed,
/// `""` inside a double-quoted name collapsed.
pub fn unquote_identifier(text: &str) -> String {
    if let Some(inner) = text.strip_prefix('[') {
        return inner.strip_suffix(']').unwrap_or(inner).to_string();
    }
    if let Some(inner) = text.strip_prefix('"') {
        return inner.strip_suffix('"').unwrap_or(inner).replace("\"\"", "\"");
    }
    text.to_string()
}

fn is_word_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || matches!(b, b'_' | b'@' | b'#')
}

fn is_word_part(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'_' | b'@' | b'#' | b'$')
}

struct Scanner<'a> {
    sql: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    fn new(sql: &'a str) -> Self {
        Self {
            sql,
            bytes: sql.as_bytes(),
            pos: 0,
            line: 1,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, n: usize) -> Option<u8> {
        self.bytes.get(self.pos + n).copied()
    }

    fn bump(&mut self) {
        if let Some(b) = self.peek() {
            if b == b'\n' {
                self.line += 1;
            }
            self.pos += 1;
        }
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    /// Consume one whole character, however many bytes it takes.
    fn bump_char(&mut self) {
        let width = self
            .sql
            .get(self.pos..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        self.bump_n(width);
    }

    fn bump_while(&mut self, accept: impl Fn(u8) -> bool) {
        while self.peek().is_some_and(&accept) {
            self.bump();
        }
    }

    /// Consume up to and including `closing`; false when the input ran out first.
    fn bump_past(&mut self, closing: &[u8]) -> bool {
        while self.peek().is_some() {
            if self.bytes[self.pos..].starts_with(closing) {
                self.bump_n(closing.len());
                return true;
            }
            self.bump();
        }
        false
    }

    fn string_literal<E: ErrorStrategy + ?Sized>(&mut self, start: usize, line: usize, errors: &mut E) {
        self.bump();
        loop {
            match self.peek() {
                None => {
                    errors.report(SyntaxError::lexical(
                        self.location(start, line),
                        "unterminated string literal".into(),
                    ));
                    return;
                }
                Some(b'\'') if self.peek_at(1) == Some(b'\'') => self.bump_n(2),
                Some(b'\'') => {
                    self.bump();
                    return;
                }
                Some(_) => self.bump(),
            }
        }
    }

    fn quoted_identifier<E: ErrorStrategy + ?Sized>(
        &mut self,
        closing: u8,
        start: usize,
        line: usize,
        errors: &mut E,
    ) {
        self.bump();
        if !self.bump_past(&[closing]) {
            errors.report(SyntaxError::lexical(
                self.location(start, line),
                "unterminated quoted identifier".into(),
            ));
        }
    }

    fn operator(&mut self) -> Option<TokenKind> {
        let (kind, width) = match (self.peek()?, self.peek_at(1)) {
            (b'<', Some(b'>')) | (b'!', Some(b'=')) => (TokenKind::NotEquals, 2),
            (b'<', Some(b'=')) => (TokenKind::LessEquals, 2),
            (b'>', Some(b'=')) => (TokenKind::GreaterEquals, 2),
            (b'<', _) => (TokenKind::Less, 1),
            (b'>', _) => (TokenKind::Greater, 1),
            (b'=', _) => (TokenKind::Equals, 1),
            (b',', _) => (TokenKind::Comma, 1),
            (b'.', _) => (TokenKind::Dot, 1),
            (b'(', _) => (TokenKind::ParenOpen, 1),
            (b')', _) => (TokenKind::ParenClose, 1),
            (b';', _) => (TokenKind::Semicolon, 1),
            (b'*', _) => (TokenKind::Star, 1),
            (b'+', _) => (TokenKind::Plus, 1),
            (b'-', _) => (TokenKind::Minus, 1),
            (b'/', _) => (TokenKind::Slash, 1),
            (b'%', _) => (TokenKind::Percent, 1),
            _ => return None,
        };
        self.bump_n(width);
        Some(kind)
    }

    /// Span from `start` up to the last consumed byte.
    fn location(&self, start: usize, line: usize) -> TokenLocation {
        TokenLocation::new(line, self.line, start, self.pos.saturating_sub(1).max(start))
    }
}
