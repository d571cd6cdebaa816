use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum AutocompleteOptionType {
    #[display("KEYWORD")]
    Keyword,
    #[display("TABLE")]
    Table,
    #[display("COLUMN")]
    Column,
}

/// A completion suggestion. Keywords carry their text; table and column
/// options are markers telling the caller to offer names from its own
/// catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AutocompleteOption {
    pub value: Option<String>,
    pub option_type: AutocompleteOptionType,
}

impl AutocompleteOption {
    pub fn keyword(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            option_type: AutocompleteOptionType::Keyword,
        }
    }

    pub const fn table() -> Self {
        Self {
            value: None,
            option_type: AutocompleteOptionType::Table,
        }
    }

    pub const fn column() -> Self {
        Self {
            value: None,
            option_type: AutocompleteOptionType::Column,
        }
    }

    pub fn is_keyword(&self) -> bool {
        self.option_type == AutocompleteOptionType::Keyword
    }
}

impl std::fmt::Display for AutocompleteOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => f.write_str(value),
            None => write!(f, "<{}>", self.option_type),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(AutocompleteOption::keyword("GROUP BY").to_string(), "GROUP BY");
        assert_eq!(AutocompleteOption::table().to_string(), "<TABLE>");
        assert_eq!(AutocompleteOption::column().to_string(), "<COLUMN>");
        assert!(AutocompleteOption::keyword("FROM").is_keyword());
        assert!(!AutocompleteOption::table().is_keyword());
    }
}
