use crate::*;
use indexmap::IndexSet;
use itertools::Itertools;

/// A table named by a query, merged across every mention of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferencedTable {
    pub table_name: String,
    pub schema_name: Option<String>,
    pub database_name: Option<String>,
    /// Aliases the table is known by, in first-seen order.
    pub aliases: IndexSet<String>,
}

impl ReferencedTable {
    /// Build from dotted name parts, innermost last: `[db, schema, table]`.
    /// Parts beyond three are folded into the database name.
    pub fn from_parts(parts: &[String]) -> Option<Self> {
        let (table_name, qualifiers) = parts.split_last()?;
        let (schema_name, database) = match qualifiers.split_last() {
            Some((schema, rest)) => (Some(schema.clone()), rest),
            None => (None, &[][..]),
        };
        let database_name = (!database.is_empty()).then(|| database.join("."));
        Some(Self {
            table_name: table_name.clone(),
            schema_name,
            database_name,
            aliases: IndexSet::new(),
        })
    }

    /// `db.schema.table` with absent parts left out.
    pub fn qualified_name(&self) -> String {
        [&self.database_name, &self.schema_name]
            .into_iter()
            .flatten()
            .chain(std::iter::once(&self.table_name))
            .join(".")
    }
}

/// One syntactic mention of a table, before mentions are merged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMention {
    pub name: Vec<String>,
    pub alias: Option<String>,
    pub location: TokenLocation,
}
