//! Reserved words recognized by the built-in dialect.
//!
//! Words are matched case-insensitively through [`Keyword::from_upper`], which
//! expects an already upper-cased slice. [`Keyword::as_str`] gives the
//! canonical upper-case spelling, which is also the word's display name in
//! completion results.

macro_rules! keywords {
    ($($variant:ident => $text:literal),* $(,)?) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum Keyword {
            $($variant),*
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Keyword] = &[$(Keyword::$variant),*];

            /// Classify an *upper-cased* word. Returns `None` for plain identifiers.
            pub fn from_upper(word: &str) -> Option<Self> {
                match word {
                    $($text => Some(Keyword::$variant),)*
                    _ => None,
                }
            }

            /// Canonical upper-case spelling.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Keyword::$variant => $text),*
                }
            }
        }
    };
}

keywords! {
    All => "ALL",
    And => "AND",
    As => "AS",
    Asc => "ASC",
    Between => "BETWEEN",
    By => "BY",
    Case => "CASE",
    Cross => "CROSS",
    Delete => "DELETE",
    Desc => "DESC",
    Distinct => "DISTINCT",
    Else => "ELSE",
    End => "END",
    Except => "EXCEPT",
    Exists => "EXISTS",
    From => "FROM",
    Full => "FULL",
    Group => "GROUP",
    Having => "HAVING",
    In => "IN",
    Inner => "INNER",
    Insert => "INSERT",
    Intersect => "INTERSECT",
    Into => "INTO",
    Is => "IS",
    Join => "JOIN",
    Left => "LEFT",
    Like => "LIKE",
    Not => "NOT",
    Null => "NULL",
    On => "ON",
    Or => "OR",
    Order => "ORDER",
    Outer => "OUTER",
    Right => "RIGHT",
    Select => "SELECT",
    Set => "SET",
    Then => "THEN",
    Top => "TOP",
    Union => "UNION",
    Update => "UPDATE",
    Values => "VALUES",
    When => "WHEN",
    Where => "WHERE",
    With => "WITH",
}

impl Keyword {
    /// Keywords that can open a top-level statement.
    pub const STATEMENT_STARTS: [Self; 5] = [
        Keyword::With,
        Keyword::Select,
        Keyword::Insert,
        Keyword::Update,
        Keyword::Delete,
    ];
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SELECT", Keyword::Select)]
    #[case("FROM", Keyword::From)]
    #[case("GROUP", Keyword::Group)]
    #[case("BY", Keyword::By)]
    #[case("INTERSECT", Keyword::Intersect)]
    #[case("WITH", Keyword::With)]
    fn recognizes_known_keywords(#[case] word: &str, #[case] expected: Keyword) {
        assert_eq!(Keyword::from_upper(word), Some(expected));
    }

    #[rstest]
    #[case("select")]
    #[case("users")]
    #[case("LIMIT")]
    #[case("")]
    fn rejects_other_words(#[case] word: &str) {
        assert_eq!(Keyword::from_upper(word), None);
    }

    #[test]
    fn spelling_round_trips_for_every_keyword() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_upper(keyword.as_str()), Some(*keyword));
            assert_eq!(keyword.to_string(), keyword.as_str());
        }
    }
}
