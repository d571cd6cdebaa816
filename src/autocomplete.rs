use crate::*;
use std::collections::HashSet;

crate::reexport!(cursor);
crate::reexport!(suggestion);
#[cfg(test)]
mod suggestion_tests;

/// Completion options for `sql` with the caret before the character at byte
/// offset `at`, or after the whole script when `at` is `None`.
///
/// Runs candidate collection twice over the script truncated after the
/// caret character: once preferring the dialect's table rules, once its
/// column rules. Table-pass results come first. Returns `None` when the caret
/// cannot be placed on a token.
pub fn complete<D: Dialect>(dialect: &D, sql: &str, at: Option<usize>) -> Option<Vec<AutocompleteOption>> {
    let cursor = at.map_or_else(|| Cursor::end_of(sql), Cursor::new);
    let script = cursor.truncate(sql);
    let mut errors = TrackingErrorStrategy::default();
    let tokens = dialect.tokenize(script, &mut errors);

    let raw_tokens: Vec<_> = WhitespaceLexer::new(sql).collect();
    let Some(index) = token_index_at(&raw_tokens, sql, cursor.offset()) else {
        debug!(offset = cursor.offset(), "no token at cursor");
        return None;
    };
    let raw = raw_tokens[index];
    let (prefix, caret) = if is_past_word(&raw, sql, cursor.offset()) {
        ("", first_token_from(&tokens, cursor.offset()))
    } else {
        (
            typed_prefix(&raw, sql, cursor.offset()),
            caret_token_index(&tokens, &raw),
        )
    };
    debug!(offset = cursor.offset(), prefix, caret, "completing");

    let ignored: HashSet<_> = dialect.ignored_tokens().iter().copied().collect();
    let table_rules: HashSet<_> = dialect.table_rules().iter().copied().collect();
    let column_rules: HashSet<_> = dialect.column_rules().iter().copied().collect();

    let mut suggestions = SuggestionList::new(prefix);
    for preferred in [&table_rules, &column_rules] {
        let candidates = dialect.collect_candidates(script, &tokens, caret, preferred, &ignored);
        trace!(?candidates, "collected");
        let keywords = candidates.tokens.iter().map(|(kind, follow)| {
            let follow: Vec<_> = follow.iter().map(|k| dialect.display_name(*k)).collect();
            stitch(&dialect.display_name(*kind), follow.iter().map(|name| &**name))
        });
        let table = candidates.rules.iter().any(|rule| table_rules.contains(rule));
        let column = candidates.rules.iter().any(|rule| column_rules.contains(rule));
        suggestions.push_pass(table, column, keywords);
    }
    Some(suggestions.into_options())
}
