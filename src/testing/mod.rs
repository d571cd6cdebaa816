#![cfg(test)]
pub use rstest::*;

pub(crate) fn common_init() {
    use std::sync::Once;
    use tracing_subscriber::EnvFilter;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        // Only initialize once for all tests
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env()) // <- reads RUST_LOG
            .with_test_writer()
            .try_init();
    });
}

/// Display text of every option, markers as `<TABLE>` / `<COLUMN>`.
pub(crate) fn option_values(options: &[crate::AutocompleteOption]) -> Vec<String> {
    options.iter().map(ToString::to_string).collect()
}

pub(crate) fn token_texts<'a>(tokens: impl IntoIterator<Item = &'a crate::QueryToken>) -> Vec<&'a str> {
    tokens.into_iter().map(|token| token.text.as_str()).collect()
}

/// The only top-level query of a survey.
pub(crate) fn single_query(parsed: &crate::ParsedSql) -> &crate::ParsedQuery {
    assert_eq!(parsed.parsed_queries.len(), 1, "expected exactly one top-level query");
    parsed.queries().next().unwrap()
}
