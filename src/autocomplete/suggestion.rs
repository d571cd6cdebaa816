use crate::*;
use std::collections::HashSet;

/// Display name without surrounding literal quotes: `'('` becomes `(`.
pub fn strip_literal_quotes(name: &str) -> &str {
    name.strip_prefix('\'')
        .and_then(|inner| inner.strip_suffix('\''))
        .unwrap_or(name)
}

/// Whether `text` is a single character that is neither a word character nor
/// whitespace, and so is glued to the text before it.
fn is_glued(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => !(c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace()),
        _ => false,
    }
}

/// Join a candidate's display name with those of its follow-on tokens.
pub fn stitch<'n>(candidate: &str, follow: impl IntoIterator<Item = &'n str>) -> String {
    let mut value = strip_literal_quotes(candidate).to_string();
    for name in follow {
        let next = strip_literal_quotes(name);
        if !is_glued(next) {
            value.push(' ');
        }
        value.push_str(next);
    }
    value
}

/// Accumulates completion options across passes.
///
/// Keywords are kept only when they start with the typed prefix (ignoring
/// case) and only the first time they are seen in any pass. Each pass's
/// markers go in front of that pass's keywords.
#[derive(Debug, Default)]
pub struct SuggestionList {
    prefix: String,
    seen: HashSet<String>,
    options: Vec<AutocompleteOption>,
}

impl SuggestionList {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_uppercase(),
            ..Self::default()
        }
    }

    fn accepts(&self, value: &str) -> bool {
        self.prefix.is_empty() || value.to_uppercase().starts_with(&self.prefix)
    }

    pub fn push_pass(&mut self, table: bool, column: bool, keywords: impl IntoIterator<Item = String>) {
        let mut pass = Vec::new();
        for keyword in keywords {
            if self.accepts(&keyword) && self.seen.insert(keyword.clone()) {
                pass.push(AutocompleteOption::keyword(keyword));
            }
        }
        if table {
            pass.insert(0, AutocompleteOption::table());
        }
        if column {
            pass.insert(0, AutocompleteOption::column());
        }
        self.options.extend(pass);
    }

    pub fn into_options(self) -> Vec<AutocompleteOption> {
        self.options
    }
}
