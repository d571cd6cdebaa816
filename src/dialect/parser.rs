use super::Rule;
use crate::*;
use itertools::Itertools;
use std::collections::HashSet;

/// Deepest nesting of expressions, subqueries and CTEs before the parser gives
/// up on the rest of the input.
const MAX_NESTING_DEPTH: usize = 200;

const QUERY_STARTS: [TokenKind; 2] = [kw(Keyword::Select), kw(Keyword::With)];

const fn kw(keyword: Keyword) -> TokenKind {
    TokenKind::Keyword(keyword)
}

struct Frame {
    start: usize,
    children: Vec<SyntaxNode>,
}

struct Completion<'a> {
    caret: usize,
    preferred: &'a HashSet<Rule>,
    ignored: &'a HashSet<TokenKind>,
    candidates: CandidateSet<TokenKind, Rule>,
}

/// Recursive-descent parser for the built-in dialect.
///
/// In survey mode it builds a [`SyntaxTree`] of query constructs, reporting
/// and recovering from errors. In caret mode (see [`Parser::with_caret`])
/// tokens at and after the caret are invisible: every token the grammar tests
/// for at the caret is recorded as a candidate, and a mandatory token there
/// stops the parse.
///
/// The token slice must end with [`TokenKind::Eof`]. Every loop either
/// consumes a token or exits, so parsing always terminates.
pub(crate) struct Parser<'a, E: ErrorStrategy + ?Sized> {
    sql: &'a str,
    tokens: &'a [Token],
    pos: usize,
    /// Index of the last consumed token.
    last: Option<usize>,
    errors: &'a mut E,
    rules: Vec<Rule>,
    /// Active rules for which [`Rule::nests`] holds.
    nesting: usize,
    frames: Vec<Frame>,
    roots: Vec<SyntaxNode>,
    completion: Option<Completion<'a>>,
    halted: bool,
}

impl<'a, E: ErrorStrategy + ?Sized> Parser<'a, E> {
    pub(crate) fn new(sql: &'a str, tokens: &'a [Token], errors: &'a mut E) -> Self {
        Self {
            sql,
            tokens,
            pos: 0,
            last: None,
            errors,
            rules: Vec::new(),
            nesting: 0,
            frames: Vec::new(),
            roots: Vec::new(),
            completion: None,
            halted: false,
        }
    }

    pub(crate) fn with_caret(
        mut self,
        caret: usize,
        preferred: &'a HashSet<Rule>,
        ignored: &'a HashSet<TokenKind>,
    ) -> Self {
        self.completion = Some(Completion {
            caret,
            preferred,
            ignored,
            candidates: CandidateSet::default(),
        });
        self
    }

    pub(crate) fn parse(mut self) -> SyntaxTree {
        self.file();
        SyntaxTree::new(self.roots)
    }

    pub(crate) fn candidates(mut self) -> CandidateSet<TokenKind, Rule> {
        self.file();
        self.completion
            .map(|completion| completion.candidates)
            .unwrap_or_default()
    }

    // ---- token access -------------------------------------------------

    fn is_caret(&self) -> bool {
        self.completion
            .as_ref()
            .is_some_and(|completion| self.pos >= completion.caret)
    }

    /// Kind of the token `n` ahead; end-of-input once halted or past the caret.
    fn peek_nth(&self, n: usize) -> TokenKind {
        let index = self.pos + n;
        let hidden = self
            .completion
            .as_ref()
            .is_some_and(|completion| index >= completion.caret);
        if self.halted || hidden {
            return TokenKind::Eof;
        }
        self.tokens.get(index).map_or(TokenKind::Eof, |token| token.kind)
    }

    fn peek(&self) -> TokenKind {
        self.peek_nth(0)
    }

    fn nth_is(&self, n: usize, kind: TokenKind) -> bool {
        self.peek_nth(n) == kind
    }

    fn finished(&self) -> bool {
        self.peek() == TokenKind::Eof
    }

    fn current(&self) -> &'a Token {
        let tokens = self.tokens;
        &tokens[self.pos.min(tokens.len() - 1)]
    }

    fn current_text(&self) -> &'a str {
        let token = self.current();
        match token.kind {
            TokenKind::Eof => "<EOF>",
            _ => token.text(self.sql),
        }
    }

    fn identifier(&self) -> String {
        unquote_identifier(self.current().text(self.sql))
    }

    fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.last = Some(self.pos);
            self.pos += 1;
        }
    }

    fn bump_n(&mut self, n: usize) {
        for _ in 0..n {
            self.bump();
        }
    }

    // ---- matching -----------------------------------------------------

    /// Whether the current token starts `chain`. At the caret the first token
    /// is offered with the rest as its follow-on tokens, and the answer is no.
    fn at_chain(&mut self, chain: &[TokenKind]) -> bool {
        let Some((&first, follow)) = chain.split_first() else {
            return false;
        };
        if self.halted {
            return false;
        }
        if self.is_caret() {
            self.offer(first, follow);
            return false;
        }
        self.peek() == first
    }

    fn at(&mut self, kind: TokenKind) -> bool {
        self.at_chain(&[kind])
    }

    fn at_kw(&mut self, keyword: Keyword) -> bool {
        self.at(kw(keyword))
    }

    /// Like [`Self::at`] for several kinds; every kind is offered at the caret.
    fn at_any(&mut self, kinds: &[TokenKind]) -> bool {
        let mut found = false;
        for &kind in kinds {
            found |= self.at(kind);
        }
        found
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            return true;
        }
        false
    }

    fn eat_kw(&mut self, keyword: Keyword) -> bool {
        self.eat(kw(keyword))
    }

    /// Consume a mandatory token. A single extraneous token in front of it is
    /// skipped; otherwise the token is reported missing and nothing is consumed.
    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            return true;
        }
        if self.halted {
            return false;
        }
        if self.is_caret() {
            self.halted = true;
            return false;
        }
        let text = self.current_text();
        if !self.finished() && self.nth_is(1, kind) {
            self.report(format!("extraneous input '{text}' expecting {}", kind.display_name()));
            self.bump_n(2);
            return true;
        }
        self.report(format!("missing {} at '{text}'", kind.display_name()));
        false
    }

    fn expect_kw(&mut self, keyword: Keyword) -> bool {
        self.expect(kw(keyword))
    }

    /// No alternative matched the current token.
    fn fail(&mut self) {
        if self.halted {
            return;
        }
        if self.is_caret() {
            self.halted = true;
            return;
        }
        let text = self.current_text();
        self.report(format!("no viable alternative at input '{text}'"));
    }

    fn report(&mut self, message: String) {
        let location = self.current().location;
        self.errors.report(SyntaxError::syntax(location, message));
    }

    fn offer(&mut self, kind: TokenKind, follow: &[TokenKind]) {
        let Some(completion) = self.completion.as_mut() else {
            return;
        };
        if let Some(rule) = self.rules.iter().find(|rule| completion.preferred.contains(*rule)) {
            completion.candidates.rules.insert(*rule);
        } else if !completion.ignored.contains(&kind) {
            completion
                .candidates
                .tokens
                .entry(kind)
                .or_insert_with(|| follow.to_vec());
        }
    }

    // ---- tree building ------------------------------------------------

    fn rule<T>(&mut self, rule: Rule, parse: impl FnOnce(&mut Self) -> T) -> T {
        let nests = rule.nests();
        if nests && self.nesting >= MAX_NESTING_DEPTH && !self.halted {
            self.report("maximum nesting depth exceeded".into());
            self.halted = true;
        }
        self.nesting += usize::from(nests);
        self.rules.push(rule);
        let result = parse(self);
        self.rules.pop();
        self.nesting -= usize::from(nests);
        result
    }

    fn open(&mut self) {
        self.frames.push(Frame {
            start: self.pos,
            children: Vec::new(),
        });
    }

    /// Finish the innermost open construct. One that consumed nothing leaves
    /// no node; its children move up to the enclosing construct.
    fn close(&mut self, construct: Construct) {
        let Some(frame) = self.frames.pop() else {
            return;
        };
        match self.last.filter(|&last| last >= frame.start) {
            Some(last) => {
                let location = self.tokens[frame.start]
                    .location
                    .to(&self.tokens[last].location);
                self.attach(SyntaxNode::new(construct, location, frame.children));
            }
            None => frame.children.into_iter().for_each(|child| self.attach(child)),
        }
    }

    fn attach(&mut self, node: SyntaxNode) {
        match self.frames.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.roots.push(node),
        }
    }

    // ---- statements ---------------------------------------------------

    fn file(&mut self) {
        self.rule(Rule::File, |p| loop {
            if p.eat(TokenKind::Semicolon) {
                continue;
            }
            if p.at_statement_start() {
                p.statement();
                continue;
            }
            if p.finished() {
                break;
            }
            p.skip_extraneous();
        });
    }

    fn at_statement_start(&mut self) -> bool {
        self.at_any(&Keyword::STATEMENT_STARTS.map(kw))
    }

    /// Report the current token and skip to the next statement boundary.
    fn skip_extraneous(&mut self) {
        let text = self.current_text();
        let expected = Keyword::STATEMENT_STARTS.iter().join(", ");
        self.report(format!("extraneous input '{text}' expecting {{<EOF>, ';', {expected}}}"));
        self.bump();
        while !self.finished()
            && !self.nth_is(0, TokenKind::Semicolon)
            && !Keyword::STATEMENT_STARTS.iter().any(|&k| self.nth_is(0, kw(k)))
        {
            self.bump();
        }
    }

    fn statement(&mut self) {
        self.rule(Rule::Statement, |p| {
            let query_type = match p.peek() {
                TokenKind::Keyword(Keyword::Insert) => QueryType::Insert,
                TokenKind::Keyword(Keyword::Update) => QueryType::Update,
                TokenKind::Keyword(Keyword::Delete) => QueryType::Delete,
                _ => QueryType::Select,
            };
            p.open();
            match query_type {
                QueryType::Select => p.select_statement(),
                QueryType::Insert => p.insert_statement(),
                QueryType::Update => p.update_statement(),
                QueryType::Delete => p.delete_statement(),
            }
            p.close(Construct::Statement(query_type));
        });
    }

    fn select_statement(&mut self) {
        self.rule(Rule::SelectStatement, |p| {
            if p.eat_kw(Keyword::With) {
                p.with_clause();
            }
            p.query_expression();
            if p.at_chain(&[kw(Keyword::Order), kw(Keyword::By)]) {
                p.order_by_clause();
            }
        });
    }

    fn with_clause(&mut self) {
        self.rule(Rule::WithClause, |p| loop {
            p.common_table_expression();
            if !p.eat(TokenKind::Comma) {
                break;
            }
        });
    }

    fn common_table_expression(&mut self) {
        self.rule(Rule::CommonTableExpression, |p| {
            p.open();
            p.expect(TokenKind::Ident);
            if p.eat(TokenKind::ParenOpen) {
                p.column_name_list();
                p.expect(TokenKind::ParenClose);
            }
            p.expect_kw(Keyword::As);
            if p.expect(TokenKind::ParenOpen) {
                p.select_statement();
                p.expect(TokenKind::ParenClose);
            }
            p.close(Construct::CommonTableExpression);
        });
    }

    fn query_expression(&mut self) {
        self.rule(Rule::QueryExpression, |p| {
            p.query_specification();
            loop {
                if p.eat_kw(Keyword::Union) {
                    p.eat_kw(Keyword::All);
                } else if !(p.eat_kw(Keyword::Except) || p.eat_kw(Keyword::Intersect)) {
                    break;
                }
                p.query_specification();
            }
        });
    }

    fn query_specification(&mut self) {
        self.rule(Rule::QuerySpecification, |p| {
            if !p.expect_kw(Keyword::Select) {
                return;
            }
            if !p.eat_kw(Keyword::All) {
                p.eat_kw(Keyword::Distinct);
            }
            if p.eat_kw(Keyword::Top) {
                p.primary();
            }
            p.select_list();
            if p.eat_kw(Keyword::From) {
                p.table_sources();
            }
            if p.eat_kw(Keyword::Where) {
                p.expression();
            }
            if p.at_chain(&[kw(Keyword::Group), kw(Keyword::By)]) {
                p.group_by_clause();
            }
            if p.eat_kw(Keyword::Having) {
                p.expression();
            }
        });
    }

    fn select_list(&mut self) {
        self.rule(Rule::SelectList, |p| loop {
            p.column_elem();
            if !p.eat(TokenKind::Comma) {
                break;
            }
        });
    }

    fn column_elem(&mut self) {
        self.rule(Rule::ColumnElem, |p| {
            if p.eat(TokenKind::Star) {
                return;
            }
            if p.nth_is(0, TokenKind::Ident) && p.nth_is(1, TokenKind::Dot) && p.nth_is(2, TokenKind::Star) {
                p.bump_n(3);
                return;
            }
            p.expression();
            p.as_alias(Rule::ColumnAlias);
        });
    }

    /// `AS? alias`, the alias being parsed under `rule`.
    fn as_alias(&mut self, rule: Rule) -> Option<String> {
        let explicit = self.eat_kw(Keyword::As);
        self.rule(rule, |p| {
            if p.at(TokenKind::Ident) || (rule == Rule::ColumnAlias && p.at(TokenKind::StringLit)) {
                let alias = p.identifier();
                p.bump();
                return Some(alias);
            }
            if explicit {
                p.expect(TokenKind::Ident);
            }
            None
        })
    }

    fn group_by_clause(&mut self) {
        self.rule(Rule::GroupByClause, |p| {
            p.bump();
            p.expect_kw(Keyword::By);
            p.expression_list();
        });
    }

    fn order_by_clause(&mut self) {
        self.rule(Rule::OrderByClause, |p| {
            p.bump();
            p.expect_kw(Keyword::By);
            loop {
                p.order_by_elem();
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
        });
    }

    fn order_by_elem(&mut self) {
        self.rule(Rule::OrderByElem, |p| {
            p.expression();
            if !p.eat_kw(Keyword::Asc) {
                p.eat_kw(Keyword::Desc);
            }
        });
    }

    fn insert_statement(&mut self) {
        self.rule(Rule::InsertStatement, |p| {
            p.bump();
            p.eat_kw(Keyword::Into);
            p.table_reference();
            if p.at(TokenKind::ParenOpen) && !QUERY_STARTS.iter().any(|&k| p.nth_is(1, k)) {
                p.bump();
                p.column_name_list();
                p.expect(TokenKind::ParenClose);
            }
            if p.eat_kw(Keyword::Values) {
                loop {
                    if p.expect(TokenKind::ParenOpen) {
                        p.expression_list();
                        p.expect(TokenKind::ParenClose);
                    }
                    if !p.eat(TokenKind::Comma) {
                        break;
                    }
                }
            } else if p.eat(TokenKind::ParenOpen) {
                p.subquery();
                p.expect(TokenKind::ParenClose);
            } else if p.at_any(&QUERY_STARTS) {
                p.subquery();
            } else {
                p.fail();
            }
        });
    }

    fn update_statement(&mut self) {
        self.rule(Rule::UpdateStatement, |p| {
            p.bump();
            p.table_reference();
            p.expect_kw(Keyword::Set);
            loop {
                p.update_elem();
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            if p.eat_kw(Keyword::From) {
                p.table_sources();
            }
            if p.eat_kw(Keyword::Where) {
                p.expression();
            }
        });
    }

    fn update_elem(&mut self) {
        self.rule(Rule::UpdateElem, |p| {
            if !p.full_column_name() {
                p.fail();
                return;
            }
            p.expect(TokenKind::Equals);
            p.expression();
        });
    }

    fn delete_statement(&mut self) {
        self.rule(Rule::DeleteStatement, |p| {
            p.bump();
            p.eat_kw(Keyword::From);
            p.table_reference();
            if p.eat_kw(Keyword::Where) {
                p.expression();
            }
        });
    }

    fn column_name_list(&mut self) {
        self.rule(Rule::ColumnNameList, |p| loop {
            p.expect(TokenKind::Ident);
            if !p.eat(TokenKind::Comma) {
                break;
            }
        });
    }

    // ---- table sources ------------------------------------------------

    fn table_sources(&mut self) {
        self.rule(Rule::TableSources, |p| loop {
            p.table_source();
            if !p.eat(TokenKind::Comma) {
                break;
            }
        });
    }

    fn table_source(&mut self) {
        self.rule(Rule::TableSource, |p| {
            p.table_source_item();
            while p.join_part() {}
        });
    }

    fn table_source_item(&mut self) {
        self.rule(Rule::TableSourceItem, |p| {
            p.open();
            if p.eat(TokenKind::ParenOpen) {
                p.subquery();
                p.expect(TokenKind::ParenClose);
                let alias = p.as_alias(Rule::TableAlias);
                p.close(Construct::DerivedTable { alias });
            } else {
                let name = p.table_name();
                let alias = p.as_alias(Rule::TableAlias);
                p.close(Construct::TableReference { name, alias });
            }
        });
    }

    /// A bare table name, as in DML targets.
    fn table_reference(&mut self) {
        self.open();
        let name = self.table_name();
        self.close(Construct::TableReference { name, alias: None });
    }

    fn table_name(&mut self) -> Vec<String> {
        self.rule(Rule::TableName, Self::full_table_name)
    }

    fn full_table_name(&mut self) -> Vec<String> {
        self.rule(Rule::FullTableName, |p| {
            let mut parts = Vec::new();
            loop {
                if !p.at(TokenKind::Ident) {
                    p.expect(TokenKind::Ident);
                    break;
                }
                parts.push(p.identifier());
                p.bump();
                if parts.len() == 4 || !p.eat(TokenKind::Dot) {
                    break;
                }
            }
            parts
        })
    }

    /// Returns whether a join was consumed.
    fn join_part(&mut self) -> bool {
        self.rule(Rule::JoinPart, |p| {
            if p.at_chain(&[kw(Keyword::Cross), kw(Keyword::Join)]) {
                p.bump();
                p.expect_kw(Keyword::Join);
                p.table_source_item();
                return true;
            }
            let typed = if p.eat_kw(Keyword::Inner) {
                true
            } else if p.eat_kw(Keyword::Left) || p.eat_kw(Keyword::Right) || p.eat_kw(Keyword::Full) {
                p.eat_kw(Keyword::Outer);
                true
            } else {
                false
            };
            if !p.eat_kw(Keyword::Join) {
                if !typed {
                    return false;
                }
                p.expect_kw(Keyword::Join);
            }
            p.table_source_item();
            if p.expect_kw(Keyword::On) {
                p.expression();
            }
            true
        })
    }

    // ---- expressions --------------------------------------------------

    fn subquery(&mut self) {
        self.rule(Rule::Subquery, |p| {
            p.open();
            p.select_statement();
            p.close(Construct::Subquery);
        });
    }

    fn parenthesized_subquery(&mut self) {
        if self.expect(TokenKind::ParenOpen) {
            self.subquery();
            self.expect(TokenKind::ParenClose);
        }
    }

    fn expression_list(&mut self) {
        loop {
            self.expression();
            if !self.eat(TokenKind::Comma) {
                break;
            }
        }
    }

    fn expression(&mut self) {
        self.rule(Rule::Expression, |p| {
            p.and_expression();
            while p.eat_kw(Keyword::Or) {
                p.and_expression();
            }
        });
    }

    fn and_expression(&mut self) {
        self.not_expression();
        while self.eat_kw(Keyword::And) {
            self.not_expression();
        }
    }

    fn not_expression(&mut self) {
        while self.eat_kw(Keyword::Not) {}
        self.predicate();
    }

    fn predicate(&mut self) {
        self.additive();
        if self.at_any(&TokenKind::COMPARISONS) {
            self.bump();
            self.additive();
            return;
        }
        if self.eat_kw(Keyword::Is) {
            self.eat_kw(Keyword::Not);
            self.expect_kw(Keyword::Null);
            return;
        }
        let negated = self.eat_kw(Keyword::Not);
        if self.eat_kw(Keyword::In) {
            self.in_list();
        } else if self.eat_kw(Keyword::Like) {
            self.additive();
        } else if self.eat_kw(Keyword::Between) {
            self.additive();
            self.expect_kw(Keyword::And);
            self.additive();
        } else if negated {
            self.fail();
        }
    }

    fn in_list(&mut self) {
        if !self.expect(TokenKind::ParenOpen) {
            return;
        }
        if self.at_any(&QUERY_STARTS) {
            self.subquery();
        } else {
            self.expression_list();
        }
        self.expect(TokenKind::ParenClose);
    }

    fn additive(&mut self) {
        self.multiplicative();
        while self.at_any(&[TokenKind::Plus, TokenKind::Minus]) {
            self.bump();
            self.multiplicative();
        }
    }

    fn multiplicative(&mut self) {
        self.unary();
        while self.at_any(&[TokenKind::Star, TokenKind::Slash, TokenKind::Percent]) {
            self.bump();
            self.unary();
        }
    }

    fn unary(&mut self) {
        while self.at_any(&[TokenKind::Plus, TokenKind::Minus]) {
            self.bump();
        }
        self.primary();
    }

    fn primary(&mut self) {
        if self.nth_is(0, TokenKind::Ident) && self.nth_is(1, TokenKind::ParenOpen) {
            self.function_call();
            return;
        }
        if self.full_column_name() {
            return;
        }
        if self.eat(TokenKind::Number) || self.eat(TokenKind::StringLit) || self.eat_kw(Keyword::Null) {
            return;
        }
        if self.at_kw(Keyword::Case) {
            self.case_expression();
            return;
        }
        if self.at_chain(&[kw(Keyword::Exists), TokenKind::ParenOpen]) {
            self.bump();
            self.parenthesized_subquery();
            return;
        }
        if self.eat(TokenKind::ParenOpen) {
            if self.at_any(&QUERY_STARTS) {
                self.subquery();
            } else {
                self.expression_list();
            }
            self.expect(TokenKind::ParenClose);
            return;
        }
        self.fail();
    }

    fn full_column_name(&mut self) -> bool {
        self.rule(Rule::FullColumnName, |p| {
            if !p.eat(TokenKind::Ident) {
                return false;
            }
            while p.eat(TokenKind::Dot) {
                p.expect(TokenKind::Ident);
            }
            true
        })
    }

    fn function_call(&mut self) {
        self.rule(Rule::FunctionCall, |p| {
            p.bump_n(2);
            if !p.eat(TokenKind::Star) && !p.at(TokenKind::ParenClose) {
                p.eat_kw(Keyword::Distinct);
                p.expression_list();
            }
            p.expect(TokenKind::ParenClose);
        });
    }

    fn case_expression(&mut self) {
        self.rule(Rule::CaseExpression, |p| {
            p.bump();
            if !p.at_kw(Keyword::When) {
                p.expression();
            }
            while p.eat_kw(Keyword::When) {
                p.expression();
                p.expect_kw(Keyword::Then);
                p.expression();
            }
            if p.eat_kw(Keyword::Else) {
                p.expression();
            }
            p.expect_kw(Keyword::End);
        });
    }
}
