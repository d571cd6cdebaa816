use crate::*;
use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum ErrorKind {
    #[display("lexical")]
    Lexical,
    #[display("syntax")]
    Syntax,
}

/// A recoverable problem found while lexing or parsing, located at the
/// offending token.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{kind} error at {location}: {message}")]
pub struct SyntaxError {
    pub kind: ErrorKind,
    pub location: TokenLocation,
    pub message: String,
}

impl SyntaxError {
    pub fn lexical(location: TokenLocation, message: String) -> Self {
        Self {
            kind: ErrorKind::Lexical,
            location,
            message,
        }
    }

    pub fn syntax(location: TokenLocation, message: String) -> Self {
        Self {
            kind: ErrorKind::Syntax,
            location,
            message,
        }
    }
}

/// Receives every recoverable error. Implementations must not abort the
/// lexer or parser.
pub trait ErrorStrategy {
    fn report(&mut self, error: SyntaxError);
}

/// Records errors in report order.
#[derive(Debug, Clone, Default)]
pub struct TrackingErrorStrategy {
    errors: Vec<SyntaxError>,
}

impl TrackingErrorStrategy {
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }
}

impl ErrorStrategy for TrackingErrorStrategy {
    fn report(&mut self, error: SyntaxError) {
        trace!(%error, "recorded");
        self.errors.push(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_in_report_order() {
        let mut strategy = TrackingErrorStrategy::default();
        assert!(strategy.is_empty());
        strategy.report(SyntaxError::syntax(TokenLocation::new(1, 1, 9, 9), "second".into()));
        strategy.report(SyntaxError::lexical(TokenLocation::new(1, 1, 2, 2), "first".into()));
        let messages: Vec<_> = strategy.errors().iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(
            strategy.into_errors()[1].to_string(),
            "lexical error at 1:2..1:2: first"
        );
    }
}
