//! Builds a [`ParsedSql`] from a dialect's syntax tree.
//!
//! The survey runs in four passes over the script:
//! 1. walk the tree, creating a query per statement, subquery and CTE and
//!    recording table mentions on the innermost query;
//! 2. merge mentions into referenced tables;
//! 3. hand each token to the top-level query containing it and to every
//!    nested query down the containment chain;
//! 4. name each CTE after its first token.
//!
//! Errors are bound last through the top-level span index.
use crate::*;


pub fn survey_with<D: SyntaxTreeProvider>(dialect: &D, sql: &str) -> ParsedSql {
    let mut errors = TrackingErrorStrategy::default();
    let tokens = dialect.tokenize(sql, &mut errors);
    let tree = dialect.parse(sql, &tokens, &mut errors);

    let mut builder = QueryStructureBuilder::default();
    tree.walk(&mut builder);
    let mut parsed = builder.finish();

    for query in parsed.parsed_queries.values_mut() {
        query.consolidate_tables();
    }
    assign_tokens(&mut parsed, sql, &tokens);
    for query in parsed.parsed_queries.values_mut() {
        query.resolve_cte_names();
    }

    let mut errors = errors.into_errors();
    errors.sort_by_key(|error| error.location.start_offset);
    bind_errors(&mut parsed, sql, &errors);

    debug!(
        queries = parsed.parsed_queries.len(),
        tokens = tokens.len(),
        errors = errors.len(),
        "surveyed script"
    );
    parsed
}

/// Turns enter/exit events into nested [`ParsedQuery`]s.
#[derive(Debug, Default)]
pub struct QueryStructureBuilder {
    next_id: usize,
    open: Vec<(Construct, ParsedQuery)>,
    parsed: ParsedSql,
}

impl QueryStructureBuilder {
    pub fn finish(self) -> ParsedSql {
        self.parsed
    }

    fn open_query(&mut self, construct: &Construct, query_type: QueryType, location: TokenLocation) {
        let id = QueryId(self.next_id);
        self.next_id += 1;
        let parent = self.open.last().map(|(_, query)| query.id);
        trace!(%id, %query_type, %location, "entering query");
        self.open
            .push((construct.clone(), ParsedQuery::new(id, query_type, location, parent)));
    }

    fn close_query(&mut self) {
        let Some((construct, query)) = self.open.pop() else {
            return;
        };
        match (self.open.last_mut(), construct) {
            (Some((_, parent)), Construct::CommonTableExpression) => {
                parent
                    .common_table_expressions
                    .insert(query.id.to_string(), query);
            }
            (Some((_, parent)), _) => parent.subqueries.push(query),
            (None, _) => self.parsed.insert(query),
        }
    }

    fn mention(&mut self, name: Vec<String>, alias: Option<String>, location: TokenLocation) {
        match self.open.last_mut() {
            Some((_, query)) if !name.is_empty() => {
                query.table_mentions.push(TableMention { name, alias, location });
            }
            _ => trace!(%location, "table mention outside any query"),
        }
    }
}

impl SyntaxVisitor for QueryStructureBuilder {
    fn enter(&mut self, node: &SyntaxNode) {
        match &node.construct {
            Construct::Statement(query_type) => {
                self.open_query(&node.construct, *query_type, node.location)
            }
            Construct::Subquery | Construct::CommonTableExpression => {
                self.open_query(&node.construct, QueryType::Select, node.location)
            }
            Construct::TableReference { name, alias } => {
                self.mention(name.clone(), alias.clone(), node.location)
            }
            Construct::DerivedTable { alias } => {
                if let Some(alias) = alias {
                    self.mention(vec![alias.clone()], None, node.location);
                }
            }
        }
    }

    fn exit(&mut self, node: &SyntaxNode) {
        if node.construct.is_query() {
            self.close_query();
        }
    }
}

/// Attach every non-empty token to the top-level query containing it and to
/// each nested query below that also contains it.
fn assign_tokens<K>(parsed: &mut ParsedSql, sql: &str, tokens: &[Token<K>]) {
    for token in tokens {
        let text = token.text(sql);
        if text.is_empty() {
            continue;
        }
        let offset = token.start();
        let Some(mut query) = parsed.query_at_mut(offset) else {
            trace!(offset, text, "token outside every query");
            continue;
        };
        let mut previous: Option<QueryId> = None;
        loop {
            // Ids grow with depth; anything else would be a cycle.
            if previous.is_some_and(|id| query.id <= id) {
                warn!(id = %query.id, offset, "query revisited while assigning tokens");
                break;
            }
            previous = Some(query.id);
            query.tokens.push(QueryToken::new(token.location, text));
            match query.child_at_mut(offset) {
                Some(child) => query = child,
                None => break,
            }
        }
    }
}

fn bind_errors(parsed: &mut ParsedSql, sql: &str, errors: &[SyntaxError]) {
    for error in errors {
        let resolved = QueryError::resolve(error, sql);
        match parsed.error_target_mut(error.location.start_offset) {
            Some(query) => query.query_errors.push(resolved),
            None => parsed.unbound_errors.push(resolved),
        }
    }
}
