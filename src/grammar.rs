//! Seams between the surveyor and a concrete SQL dialect.
//!
//! A dialect lexes scripts into [`Token`]s, parses token streams into a
//! [`SyntaxTree`] of query-shaped constructs, and predicts which tokens and
//! rules may appear at a caret. The surveyor only ever talks to a dialect
//! through these traits.
use crate::*;
use std::{borrow::Cow, collections::HashSet, fmt::Debug, hash::Hash};

crate::reexport!(candidates);
crate::reexport!(strategy);
crate::reexport!(syntax);

pub trait Lexer {
    /// Token vocabulary of the dialect.
    type Kind: Copy + Eq + Hash + Debug;

    /// Lex `sql` without failing. Problems go to `errors`; the returned stream
    /// always ends with an end-of-input token located at `sql.len()`.
    fn tokenize(&self, sql: &str, errors: &mut dyn ErrorStrategy) -> Vec<Token<Self::Kind>>;

    /// Vocabulary display name of `kind`. Fixed symbols are quoted literals
    /// such as `'('`; keywords are their spelling.
    fn display_name(&self, kind: Self::Kind) -> Cow<'static, str>;
}

pub trait SyntaxTreeProvider: Lexer {
    /// Parse a token stream produced by [`Lexer::tokenize`] over `sql`,
    /// recovering from syntax errors and reporting them to `errors`.
    fn parse(&self, sql: &str, tokens: &[Token<Self::Kind>], errors: &mut dyn ErrorStrategy) -> SyntaxTree;
}

pub trait CandidateCollector: Lexer {
    type Rule: Copy + Eq + Hash + Debug;

    /// Tokens and rules that may appear at `tokens[caret]`.
    ///
    /// A possible token reached while a `preferred` rule is active is reported
    /// as that rule instead. Tokens in `ignored` are never reported. Text at
    /// and after the caret does not influence the result.
    fn collect_candidates(
        &self,
        sql: &str,
        tokens: &[Token<Self::Kind>],
        caret: usize,
        preferred: &HashSet<Self::Rule>,
        ignored: &HashSet<Self::Kind>,
    ) -> CandidateSet<Self::Kind, Self::Rule>;
}

/// Everything the surveyor needs from a SQL dialect.
pub trait Dialect: SyntaxTreeProvider + CandidateCollector {
    fn name(&self) -> &'static str;

    /// Rules marking a position where a table name goes.
    fn table_rules(&self) -> &[Self::Rule];

    /// Rules marking a position where a column name goes.
    fn column_rules(&self) -> &[Self::Rule];

    /// Tokens never offered as completions.
    fn ignored_tokens(&self) -> &[Self::Kind];
}
