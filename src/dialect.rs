//! The built-in dialect: a T-SQL flavoured subset covering queries, common
//! table expressions, joins, set operations and the DML statements.
use crate::*;
use std::{borrow::Cow, collections::HashSet};

mod parser;
crate::reexport!(rule);
#[cfg(test)]
mod parser_tests;

use parser::Parser;

/// Tokens never offered as completions: punctuation that is rarely typed on
/// request and lexemes with no fixed spelling.
const IGNORED_TOKENS: &[TokenKind] = &[
    TokenKind::Dot,
    TokenKind::Ident,
    TokenKind::ParenOpen,
    TokenKind::ParenClose,
    TokenKind::StringLit,
    TokenKind::Number,
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenericDialect;

impl Lexer for GenericDialect {
    type Kind = TokenKind;

    fn tokenize(&self, sql: &str, errors: &mut dyn ErrorStrategy) -> Vec<Token> {
        tokenize_with(sql, errors)
    }

    fn display_name(&self, kind: TokenKind) -> Cow<'static, str> {
        Cow::Borrowed(kind.display_name())
    }
}

impl SyntaxTreeProvider for GenericDialect {
    fn parse(&self, sql: &str, tokens: &[Token], errors: &mut dyn ErrorStrategy) -> SyntaxTree {
        if tokens.is_empty() {
            return SyntaxTree::default();
        }
        Parser::new(sql, tokens, errors).parse()
    }
}

impl CandidateCollector for GenericDialect {
    type Rule = Rule;

    fn collect_candidates(
        &self,
        sql: &str,
        tokens: &[Token],
        caret: usize,
        preferred: &HashSet<Rule>,
        ignored: &HashSet<TokenKind>,
    ) -> CandidateSet<TokenKind, Rule> {
        if tokens.is_empty() {
            return CandidateSet::default();
        }
        let mut discarded = TrackingErrorStrategy::default();
        Parser::new(sql, tokens, &mut discarded)
            .with_caret(caret, preferred, ignored)
            .candidates()
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn table_rules(&self) -> &[Rule] {
        Rule::TABLE
    }

    fn column_rules(&self) -> &[Rule] {
        Rule::COLUMN
    }

    fn ignored_tokens(&self) -> &[TokenKind] {
        IGNORED_TOKENS
    }
}
