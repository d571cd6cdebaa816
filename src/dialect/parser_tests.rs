#![cfg(test)]
use crate::*;
use rstest::rstest;
use std::collections::HashSet;

fn parse(sql: &str) -> (SyntaxTree, Vec<SyntaxError>) {
    common_init();
    let mut errors = TrackingErrorStrategy::default();
    let tokens = GenericDialect.tokenize(sql, &mut errors);
    let tree = GenericDialect.parse(sql, &tokens, &mut errors);
    (tree, errors.into_errors())
}

/// One line per node: indentation for depth, a label, then the covered text.
fn outline(sql: &str) -> Vec<String> {
    fn visit(node: &SyntaxNode, sql: &str, depth: usize, out: &mut Vec<String>) {
        let alias = |alias: &Option<String>| alias.as_ref().map(|a| format!(" as {a}")).unwrap_or_default();
        let label = match &node.construct {
            Construct::Statement(query_type) => query_type.to_string(),
            Construct::Subquery => "subquery".into(),
            Construct::CommonTableExpression => "cte".into(),
            Construct::TableReference { name, alias: a } => format!("table {}{}", name.join("."), alias(a)),
            Construct::DerivedTable { alias: a } => format!("derived{}", alias(a)),
        };
        out.push(format!("{}{label}: {}", "  ".repeat(depth), node.location.extract(sql)));
        for child in &node.children {
            visit(child, sql, depth + 1, out);
        }
    }
    let (tree, _) = parse(sql);
    let mut out = Vec::new();
    for node in &tree.nodes {
        visit(node, sql, 0, &mut out);
    }
    out
}

fn messages(sql: &str) -> Vec<String> {
    parse(sql).1.into_iter().map(|e| e.message).collect()
}

fn candidates(sql: &str, caret: Option<usize>, preferred: &[Rule]) -> CandidateSet<TokenKind, Rule> {
    let tokens = tokenize(sql);
    let caret = caret.unwrap_or(tokens.len() - 1);
    let preferred: HashSet<_> = preferred.iter().copied().collect();
    let ignored: HashSet<_> = GenericDialect.ignored_tokens().iter().copied().collect();
    GenericDialect.collect_candidates(sql, &tokens, caret, &preferred, &ignored)
}

fn kw(keyword: Keyword) -> TokenKind {
    TokenKind::Keyword(keyword)
}

#[test]
fn simple_select() {
    assert_eq!(outline("SELECT a FROM t"), vec!["SELECT: SELECT a FROM t", "  table t: t"]);
}

#[test]
fn derived_table_wraps_subquery_without_parentheses() {
    assert_eq!(
        outline("SELECT a FROM (SELECT b FROM u) x"),
        vec![
            "SELECT: SELECT a FROM (SELECT b FROM u) x",
            "  derived as x: (SELECT b FROM u) x",
            "    subquery: SELECT b FROM u",
            "      table u: u",
        ]
    );
}

#[test]
fn common_table_expression_starts_at_its_name() {
    assert_eq!(
        outline("WITH c (n) AS (SELECT 1) SELECT * FROM c"),
        vec![
            "SELECT: WITH c (n) AS (SELECT 1) SELECT * FROM c",
            "  cte: c (n) AS (SELECT 1)",
            "  table c: c",
        ]
    );
}

#[test]
fn statements_split_on_terminators_and_keywords() {
    assert_eq!(
        outline("SELECT 1; DELETE FROM t WHERE a IN (SELECT a FROM u) SELECT 2"),
        vec![
            "SELECT: SELECT 1",
            "DELETE: DELETE FROM t WHERE a IN (SELECT a FROM u)",
            "  table t: t",
            "  subquery: SELECT a FROM u",
            "    table u: u",
            "SELECT: SELECT 2",
        ]
    );
}

#[test]
fn joins_and_aliases() {
    assert_eq!(
        outline("SELECT * FROM a x JOIN b AS y ON x.id = y.id LEFT OUTER JOIN dbo.c ON 1 = 1 CROSS JOIN [d e]"),
        vec![
            "SELECT: SELECT * FROM a x JOIN b AS y ON x.id = y.id LEFT OUTER JOIN dbo.c ON 1 = 1 CROSS JOIN [d e]",
            "  table a as x: a x",
            "  table b as y: b AS y",
            "  table dbo.c: dbo.c",
            "  table d e: [d e]",
        ]
    );
}

#[rstest]
#[case("INSERT INTO t (a, b) SELECT c, d FROM u", "INSERT")]
#[case("INSERT INTO t VALUES (1, 'x'), (2, 'y')", "INSERT")]
#[case("UPDATE t SET a = 1, b = b + 1 WHERE c IS NOT NULL", "UPDATE")]
#[case("DELETE t WHERE a BETWEEN 1 AND 2", "DELETE")]
#[case("SELECT DISTINCT TOP 5 a, COUNT(*) FROM t GROUP BY a HAVING COUNT(*) > 1 ORDER BY a DESC", "SELECT")]
#[case("SELECT CASE WHEN a LIKE 'x%' THEN 1 ELSE -2 END AS v FROM t", "SELECT")]
#[case("SELECT a FROM t WHERE NOT EXISTS (SELECT 1 FROM u) UNION ALL SELECT b FROM v", "SELECT")]
#[case("SELECT t.*, [x].y FROM t, [x]", "SELECT")]
fn valid_statements_parse_cleanly(#[case] sql: &str, #[case] query_type: &str) {
    let (tree, errors) = parse(sql);
    assert!(errors.is_empty(), "{sql}: {errors:?}");
    assert_eq!(tree.nodes.len(), 1);
    assert_eq!(tree.nodes[0].construct, Construct::Statement(match query_type {
        "INSERT" => QueryType::Insert,
        "UPDATE" => QueryType::Update,
        "DELETE" => QueryType::Delete,
        _ => QueryType::Select,
    }));
    assert_eq!(tree.nodes[0].location.extract(sql), sql);
}

#[rstest]
#[case("SELECT a FROM (SELECT b FROM u", vec!["missing ')' at '<EOF>'"])]
#[case("SELECT FROM t", vec!["no viable alternative at input 'FROM'"])]
#[case("SELECT a FROM t WHERE", vec!["no viable alternative at input '<EOF>'"])]
#[case("SELECT a FROM t WHERE a IN (1 2)", vec!["extraneous input '2' expecting ')'"])]
#[case(
    "SELECT a b c FROM t",
    vec!["extraneous input 'c' expecting {<EOF>, ';', WITH, SELECT, INSERT, UPDATE, DELETE}"]
)]
#[case("INSERT INTO t VALUES (1, 2", vec!["missing ')' at '<EOF>'"])]
#[case("SELECT a FROM t x JOIN u ON", vec!["no viable alternative at input '<EOF>'"])]
#[case("SELECT a FROM dbo. ORDER BY a", vec!["missing ID at 'ORDER'"])]
fn recovers_from_syntax_errors(#[case] sql: &str, #[case] expected: Vec<&str>) {
    assert_eq!(messages(sql), expected);
}

#[test]
fn error_points_at_offending_token() {
    let (_, errors) = parse("SELECT a FROM (SELECT b FROM u");
    assert_eq!(errors[0].kind, ErrorKind::Syntax);
    assert_eq!(errors[0].location, TokenLocation::new(1, 1, 30, 30));
}

#[test]
fn garbage_between_statements_is_skipped() {
    assert_eq!(
        outline("FOO BAR SELECT 1"),
        vec!["SELECT: SELECT 1"]
    );
    assert_eq!(messages("FOO BAR SELECT 1").len(), 1);
}

#[test]
fn deep_nesting_is_cut_off() {
    let worker = std::thread::Builder::new()
        .stack_size(64 * 1024 * 1024)
        .spawn(|| {
            let sql = format!("SELECT {}1{}", "(".repeat(500), ")".repeat(500));
            let (tree, errors) = parse(&sql);
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            (tree.nodes.len(), messages)
        })
        .unwrap();
    let (statements, messages) = worker.join().unwrap();
    assert_eq!(statements, 1);
    assert_eq!(messages, vec!["maximum nesting depth exceeded"]);
}

#[test]
fn moderate_nesting_is_fine() {
    let sql = format!("SELECT {}1{} FROM t", "(".repeat(40), ")".repeat(40));
    assert_eq!(messages(&sql), Vec::<String>::new());
}

#[test]
fn mandatory_token_at_caret_is_the_only_candidate() {
    let set = candidates("SELECT * FROM t GROUP ", None, &[]);
    assert_eq!(set.tokens.keys().copied().collect::<Vec<_>>(), vec![kw(Keyword::By)]);
    assert!(set.rules.is_empty());
}

#[test]
fn table_position_reports_table_rule() {
    let set = candidates("SELECT * FROM ", None, Rule::TABLE);
    assert!(set.tokens.is_empty());
    assert_eq!(set.rules.iter().copied().collect::<Vec<_>>(), vec![Rule::TableName]);

    assert!(candidates("SELECT * FROM ", None, Rule::COLUMN).is_empty());
}

#[test]
fn optional_continuations_are_all_offered_in_order() {
    let set = candidates("SELECT a FROM t ", None, &[]);
    let expected = [
        kw(Keyword::As),
        kw(Keyword::Cross),
        kw(Keyword::Inner),
        kw(Keyword::Left),
        kw(Keyword::Right),
        kw(Keyword::Full),
        kw(Keyword::Join),
        TokenKind::Comma,
        kw(Keyword::Where),
        kw(Keyword::Group),
        kw(Keyword::Having),
        kw(Keyword::Union),
        kw(Keyword::Except),
        kw(Keyword::Intersect),
        kw(Keyword::Order),
        TokenKind::Semicolon,
        kw(Keyword::With),
        kw(Keyword::Select),
        kw(Keyword::Insert),
        kw(Keyword::Update),
        kw(Keyword::Delete),
    ];
    assert_eq!(set.tokens.keys().copied().collect::<Vec<_>>(), expected);
    assert_eq!(set.tokens[&kw(Keyword::Group)], vec![kw(Keyword::By)]);
    assert_eq!(set.tokens[&kw(Keyword::Order)], vec![kw(Keyword::By)]);
    assert_eq!(set.tokens[&kw(Keyword::Cross)], vec![kw(Keyword::Join)]);
    assert!(set.tokens[&kw(Keyword::Where)].is_empty());
}

#[test]
fn text_after_the_caret_is_ignored() {
    let full = candidates("SELECT a FROM t WHERE x = 1", Some(2), Rule::COLUMN);
    let cut = candidates("SELECT a ", None, Rule::COLUMN);
    assert_eq!(full, cut);
    assert_eq!(full.rules.iter().copied().collect::<Vec<_>>(), vec![Rule::FullColumnName]);
}

#[test]
fn column_list_reports_column_rule() {
    let set = candidates("INSERT INTO t (", None, Rule::COLUMN);
    assert_eq!(set.rules.iter().copied().collect::<Vec<_>>(), vec![Rule::ColumnNameList]);
    assert!(set.tokens.is_empty());
}
