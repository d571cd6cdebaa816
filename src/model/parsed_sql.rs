use crate::*;
use indexmap::IndexMap;

/// The survey of a whole script.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedSql {
    /// Top-level queries in source order.
    pub parsed_queries: IndexMap<QueryId, ParsedQuery>,
    /// Errors found where no query could take them (a script with no queries).
    pub unbound_errors: Vec<QueryError>,
    /// Top-level spans sorted by start offset.
    index: Vec<(TokenLocation, QueryId)>,
}

impl ParsedSql {
    pub(crate) fn insert(&mut self, query: ParsedQuery) {
        let position = self
            .index
            .partition_point(|(location, _)| location.start_offset <= query.location.start_offset);
        self.index.insert(position, (query.location, query.id));
        self.parsed_queries.insert(query.id, query);
    }

    /// Number of top-level spans starting at or before `offset`.
    fn starting_before(&self, offset: usize) -> usize {
        self.index
            .partition_point(|(location, _)| location.start_offset <= offset)
    }

    fn id_at(&self, offset: usize) -> Option<QueryId> {
        let count = self.starting_before(offset);
        let (location, id) = self.index.get(count.checked_sub(1)?)?;
        location.contains(offset).then_some(*id)
    }

    /// The top-level query whose span contains `offset`.
    pub fn query_at(&self, offset: usize) -> Option<&ParsedQuery> {
        self.parsed_queries.get(&self.id_at(offset)?)
    }

    pub(crate) fn query_at_mut(&mut self, offset: usize) -> Option<&mut ParsedQuery> {
        let id = self.id_at(offset)?;
        self.parsed_queries.get_mut(&id)
    }

    /// The deepest query, at any nesting level, whose span contains `offset`.
    pub fn innermost_query_at(&self, offset: usize) -> Option<&ParsedQuery> {
        self.query_at(offset)?.innermost_at(offset)
    }

    /// The query an error at `offset` belongs to: the top-level query
    /// containing it, else the nearest one before it, else the first one.
    pub(crate) fn error_target_mut(&mut self, offset: usize) -> Option<&mut ParsedQuery> {
        let count = self.starting_before(offset);
        let (_, id) = match count {
            0 => self.index.first()?,
            n => self.index.get(n - 1)?,
        };
        let id = *id;
        self.parsed_queries.get_mut(&id)
    }

    pub fn queries(&self) -> impl Iterator<Item = &ParsedQuery> {
        self.parsed_queries.values()
    }

    /// Every query at every nesting level, depth first.
    pub fn all_queries(&self) -> impl Iterator<Item = &ParsedQuery> {
        self.queries().flat_map(ParsedQuery::all_queries)
    }

    /// Every error of the survey: bound errors in query order, then unbound ones.
    pub fn errors(&self) -> impl Iterator<Item = &QueryError> {
        self.all_queries()
            .flat_map(|query| query.query_errors.iter())
            .chain(self.unbound_errors.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.parsed_queries.is_empty()
    }
}
