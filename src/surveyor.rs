use crate::*;

/// Entry point tying the survey and autocomplete operations to a dialect.
#[derive(Debug, Clone, Default)]
pub struct SqlSurveyor<D = GenericDialect> {
    dialect: D,
}

impl<D: Dialect> SqlSurveyor<D> {
    pub fn new(dialect: D) -> Self {
        Self { dialect }
    }

    pub fn dialect(&self) -> &D {
        &self.dialect
    }

    /// Structural survey of `sql`. Never fails; syntax errors are recorded on
    /// the queries they occur in.
    pub fn survey(&self, sql: &str) -> ParsedSql {
        survey_with(&self.dialect, sql)
    }

    /// Completion options at byte offset `at` (end of script when `None`).
    pub fn autocomplete(&self, sql: &str, at: Option<usize>) -> Option<Vec<AutocompleteOption>> {
        complete(&self.dialect, sql, at)
    }
}

/// [`SqlSurveyor::survey`] with the built-in dialect.
pub fn survey(sql: &str) -> ParsedSql {
    SqlSurveyor::<GenericDialect>::default().survey(sql)
}

/// [`SqlSurveyor::autocomplete`] with the built-in dialect.
pub fn autocomplete(sql: &str, at: Option<usize>) -> Option<Vec<AutocompleteOption>> {
    SqlSurveyor::<GenericDialect>::default().autocomplete(sql, at)
}
