use crate::*;
use derive_more::Display;
use indexmap::IndexMap;

/// Identifies a query within one survey. Ids are handed out in discovery
/// order, so a nested query always has a larger id than its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("#{_0}")]
pub struct QueryId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum QueryType {
    #[display("SELECT")]
    Select,
    #[display("INSERT")]
    Insert,
    #[display("UPDATE")]
    Update,
    #[display("DELETE")]
    Delete,
}

/// A lexed token as seen by a query.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("'{text}' at {location}")]
pub struct QueryToken {
    pub location: TokenLocation,
    pub text: String,
}

impl QueryToken {
    pub fn new(location: TokenLocation, text: impl Into<String>) -> Self {
        Self {
            location,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuery {
    pub id: QueryId,
    pub query_type: QueryType,
    pub location: TokenLocation,
    pub parent: Option<QueryId>,
    pub subqueries: Vec<ParsedQuery>,
    /// Keyed by CTE name once the survey completes.
    pub common_table_expressions: IndexMap<String, ParsedQuery>,
    /// Keyed by qualified table name.
    pub referenced_tables: IndexMap<String, ReferencedTable>,
    /// Every token inside `location`, including those of nested queries.
    pub tokens: Vec<QueryToken>,
    pub query_errors: Vec<QueryError>,
    pub(crate) table_mentions: Vec<TableMention>,
}

impl ParsedQuery {
    pub fn new(id: QueryId, query_type: QueryType, location: TokenLocation, parent: Option<QueryId>) -> Self {
        Self {
            id,
            query_type,
            location,
            parent,
            subqueries: Vec::new(),
            common_table_expressions: IndexMap::new(),
            referenced_tables: IndexMap::new(),
            tokens: Vec::new(),
            query_errors: Vec::new(),
            table_mentions: Vec::new(),
        }
    }

    pub fn subquery_at(&self, offset: usize) -> Option<&ParsedQuery> {
        self.subqueries.iter().find(|q| q.location.contains(offset))
    }

    pub fn cte_at(&self, offset: usize) -> Option<&ParsedQuery> {
        self.common_table_expressions
            .values()
            .find(|q| q.location.contains(offset))
    }

    /// The directly nested query containing `offset`, CTEs first.
    pub fn child_at(&self, offset: usize) -> Option<&ParsedQuery> {
        self.cte_at(offset).or_else(|| self.subquery_at(offset))
    }

    pub(crate) fn child_at_mut(&mut self, offset: usize) -> Option<&mut ParsedQuery> {
        let cte = self
            .common_table_expressions
            .values()
            .position(|q| q.location.contains(offset));
        if let Some(index) = cte {
            return self
                .common_table_expressions
                .get_index_mut(index)
                .map(|(_, query)| query);
        }
        self.subqueries
            .iter_mut()
            .find(|q| q.location.contains(offset))
    }

    /// The deepest query at `offset`, starting from this one.
    pub fn innermost_at(&self, offset: usize) -> Option<&ParsedQuery> {
        if !self.location.contains(offset) {
            return None;
        }
        let mut query = self;
        while let Some(child) = query.child_at(offset) {
            query = child;
        }
        Some(query)
    }

    /// Tokens that belong to this query and to none of its nested queries.
    pub fn own_tokens(&self) -> impl Iterator<Item = &QueryToken> {
        self.tokens
            .iter()
            .filter(|token| self.child_at(token.location.start_offset).is_none())
    }

    /// The table a name refers to in this query, by alias or by table name.
    pub fn table_for_alias(&self, alias: &str) -> Option<&ReferencedTable> {
        let values = || self.referenced_tables.values();
        values()
            .find(|t| t.aliases.iter().any(|a| a.eq_ignore_ascii_case(alias)))
            .or_else(|| values().find(|t| t.table_name.eq_ignore_ascii_case(alias)))
    }

    /// This query followed by every nested query, depth first, CTEs before
    /// subqueries.
    pub fn all_queries(&self) -> impl Iterator<Item = &ParsedQuery> {
        let mut pending = vec![self];
        std::iter::from_fn(move || {
            let query = pending.pop()?;
            pending.extend(query.subqueries.iter().rev());
            pending.extend(query.common_table_expressions.values().rev());
            Some(query)
        })
    }

    /// Merge raw table mentions into `referenced_tables`, recursively.
    pub(crate) fn consolidate_tables(&mut self) {
        for mention in self.table_mentions.drain(..) {
            let Some(table) = ReferencedTable::from_parts(&mention.name) else {
                continue;
            };
            let entry = self
                .referenced_tables
                .entry(table.qualified_name())
                .or_insert(table);
            if let Some(alias) = mention.alias {
                entry.aliases.insert(alias);
            }
        }
        self.for_each_child(Self::consolidate_tables);
    }

    /// Re-key CTEs by the text of their first token, recursively.
    ///
    /// A later CTE with an already used name replaces the earlier one in place.
    pub(crate) fn resolve_cte_names(&mut self) {
        let pending = std::mem::take(&mut self.common_table_expressions);
        for (key, mut cte) in pending {
            cte.resolve_cte_names();
            let name = cte
                .tokens
                .first()
                .map(|token| unquote_identifier(&token.text))
                .unwrap_or(key);
            self.common_table_expressions.insert(name, cte);
        }
        for subquery in &mut self.subqueries {
            subquery.resolve_cte_names();
        }
    }

    fn for_each_child(&mut self, mut visit: impl FnMut(&mut ParsedQuery)) {
        self.common_table_expressions.values_mut().for_each(&mut visit);
        self.subqueries.iter_mut().for_each(visit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(id: usize, start: usize, end: usize) -> ParsedQuery {
        ParsedQuery::new(QueryId(id), QueryType::Select, TokenLocation::new(1, 1, start, end), None)
    }

    fn mention(name: &[&str], alias: Option<&str>) -> TableMention {
        TableMention {
            name: name.iter().map(|s| s.to_string()).collect(),
            alias: alias.map(String::from),
            location: TokenLocation::new(1, 1, 0, 0),
        }
    }

    #[test]
    fn children_resolve_cte_before_subquery() {
        let mut root = query(0, 0, 50);
        root.common_table_expressions.insert("#1".into(), query(1, 5, 20));
        root.subqueries.push(query(2, 10, 15));
        root.subqueries.push(query(3, 30, 40));

        assert_eq!(root.child_at(12).map(|q| q.id), Some(QueryId(1)));
        assert_eq!(root.child_at(35).map(|q| q.id), Some(QueryId(3)));
        assert_eq!(root.child_at(25), None);
        assert_eq!(root.child_at_mut(12).map(|q| q.id), Some(QueryId(1)));
        assert_eq!(root.innermost_at(31).map(|q| q.id), Some(QueryId(3)));
        assert_eq!(root.innermost_at(60), None);
    }

    #[test]
    fn mentions_merge_by_qualified_name() {
        let mut root = query(0, 0, 50);
        root.table_mentions = vec![
            mention(&["t"], Some("a")),
            mention(&["dbo", "t"], None),
            mention(&["t"], Some("b")),
            mention(&["t"], Some("a")),
            mention(&[], Some("ignored")),
        ];
        root.consolidate_tables();

        let keys: Vec<_> = root.referenced_tables.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["t", "dbo.t"]);
        let t = &root.referenced_tables["t"];
        assert_eq!(t.aliases.iter().map(String::as_str).collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(root.table_for_alias("B").map(|t| t.qualified_name()), Some("t".into()));
        assert_eq!(root.table_for_alias("t").map(|t| t.qualified_name()), Some("t".into()));
        assert!(root.table_for_alias("c").is_none());
        assert!(root.table_mentions.is_empty());
    }

    #[test]
    fn all_queries_is_depth_first() {
        let mut root = query(0, 0, 50);
        let mut cte = query(1, 5, 20);
        cte.subqueries.push(query(2, 10, 15));
        root.common_table_expressions.insert("c".into(), cte);
        root.subqueries.push(query(3, 30, 40));

        let ids: Vec<_> = root.all_queries().map(|q| q.id.0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
    }
}
