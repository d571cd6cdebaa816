#![cfg(test)]
use crate::*;
use rstest::rstest;

fn values(sql: &str, at: Option<usize>) -> Vec<String> {
    common_init();
    let options = autocomplete(sql, at).unwrap_or_else(|| panic!("no completion for {sql:?} at {at:?}"));
    option_values(&options)
}

#[test]
fn table_marker_after_from() {
    assert_eq!(autocomplete("SELECT * FROM ", None), Some(vec![AutocompleteOption::table()]));
}

#[test]
fn select_list_start() {
    assert_eq!(
        values("SELECT ", None),
        vec!["ALL", "DISTINCT", "TOP", "*", "NOT", "+", "-", "NULL", "CASE", "EXISTS(", "<COLUMN>"]
    );
}

#[test]
fn text_after_the_caret_is_ignored() {
    let sql = "SELECT a FROM t WHERE a = 1;SELECT";
    assert_eq!(values(sql, Some(13)), vec!["FROM", "<COLUMN>"]);
    assert_eq!(autocomplete(sql, Some(13)), autocomplete("SELECT a FROM t", Some(13)));
}

#[test]
fn caret_before_a_table_name() {
    let sql = "SELECT * FROM t WHERE x = 1";
    assert_eq!(values(sql, Some(14)), vec!["<TABLE>"]);
    assert_eq!(autocomplete(sql, Some(14)), autocomplete("SELECT * FROM ", None));
}

#[test]
fn caret_after_whitespace_starts_a_new_word() {
    assert_eq!(values("SELECT   FROM t", Some(8)), values("SELECT ", None));
    assert_eq!(values("SELECT * FROM  WHERE x = 1", Some(14)), vec!["<TABLE>"]);
    assert_eq!(
        autocomplete("SELECT * FROM  WHERE x = 1", Some(14)),
        autocomplete("SELECT * FROM  ", None)
    );
}

#[test]
fn partial_keyword_is_completed() {
    assert_eq!(values("SELECT a FROM t WH", None), vec!["<TABLE>", "WHERE"]);
}

#[rstest]
#[case("SELECT a FROM t GR")]
#[case("select a from t gr")]
#[case("SELECT a FROM t gR")]
fn prefix_matching_ignores_case(#[case] sql: &str) {
    assert_eq!(values(sql, None), vec!["<TABLE>", "GROUP BY"]);
}

#[test]
fn clauses_after_a_table() {
    assert_eq!(
        values("SELECT a FROM t ", None),
        vec![
            "<TABLE>", "AS", "CROSS JOIN", "INNER", "LEFT", "RIGHT", "FULL", "JOIN", ",", "WHERE", "GROUP BY",
            "HAVING", "UNION", "EXCEPT", "INTERSECT", "ORDER BY", ";", "WITH", "SELECT", "INSERT", "UPDATE",
            "DELETE",
        ]
    );
}

#[test]
fn operators_after_a_column() {
    let values = values("SELECT * FROM t WHERE a ", None);
    for expected in ["<COLUMN>", "AND", "OR", "IS", "NOT", "IN", "LIKE", "BETWEEN", "=", "<>", "<=", "GROUP BY"] {
        assert!(values.contains(&expected.to_string()), "{expected} missing from {values:?}");
    }
    assert!(!values.contains(&"<TABLE>".to_string()));
}

#[test]
fn qualified_column_reference() {
    assert_eq!(values("SELECT t.", None), vec!["<COLUMN>"]);
}

#[rstest]
#[case("INSERT INTO t (", vec!["<TABLE>"])]
#[case("INSERT INTO t ( ", vec!["<COLUMN>"])]
#[case("UPDATE t SET ", vec!["<COLUMN>"])]
#[case("DELETE ", vec!["<TABLE>", "FROM"])]
#[case("SELECT * FROM t GROUP ", vec!["BY"])]
fn statement_positions(#[case] sql: &str, #[case] expected: Vec<&str>) {
    assert_eq!(values(sql, None), expected);
}

#[rstest]
#[case("SELECT ", None)]
#[case("SELECT a FROM t ", None)]
#[case("WITH c AS (SELECT 1) SELECT * FROM c WHERE ", None)]
#[case("SELECT a FROM t WHERE a = 1;SELECT", Some(13))]
fn options_are_unique_and_stable(#[case] sql: &str, #[case] at: Option<usize>) {
    let first = values(sql, at);
    let mut unique = first.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), first.len());
    assert_eq!(first, values(sql, at));
}

#[test]
fn keyword_options_match_the_typed_prefix() {
    let options = autocomplete("SELECT a FROM t WHERE a I", None).unwrap();
    let keywords: Vec<_> = options
        .iter()
        .filter(|option| option.is_keyword())
        .filter_map(|option| option.value.as_deref())
        .collect();
    assert!(!keywords.is_empty());
    assert!(keywords.iter().all(|value| value.starts_with('I')), "{keywords:?}");
}

#[test]
fn surveyor_uses_its_dialect() {
    let surveyor = SqlSurveyor::new(GenericDialect);
    assert_eq!(surveyor.dialect().name(), "generic");
    assert_eq!(surveyor.autocomplete("SELECT * FROM ", None), autocomplete("SELECT * FROM ", None));
    assert_eq!(surveyor.survey("SELECT 1"), survey("SELECT 1"));
}
