use crate::*;
use derive_more::Display;

/// A syntax or lexical error bound to the query it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{message} at {token}")]
pub struct QueryError {
    pub kind: ErrorKind,
    /// The offending token, with its text resolved from the script.
    pub token: QueryToken,
    pub message: String,
}

impl QueryError {
    pub fn resolve(error: &SyntaxError, sql: &str) -> Self {
        Self {
            kind: error.kind,
            token: QueryToken::new(error.location, error.location.extract(sql)),
            message: error.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_offending_text() {
        let sql = "SELECT a FROM WHERE";
        let error = SyntaxError::syntax(
            TokenLocation::new(1, 1, 14, 18),
            "missing ID at 'WHERE'".into(),
        );
        let resolved = QueryError::resolve(&error, sql);
        assert_eq!(resolved.token.text, "WHERE");
        assert_eq!(resolved.kind, ErrorKind::Syntax);
        assert_eq!(resolved.to_string(), "missing ID at 'WHERE' at 'WHERE' at 1:14..1:18");
    }
}
