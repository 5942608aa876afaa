#![allow(dead_code)]

use sqldoc_core::ast::{
    DeleteStatement, InsertStatement, Query, SelectStatement, Statement, UpdateStatement,
};
use sqldoc_core::dialect::Dialect;
use sqldoc_core::{ParseError, Parser, ScriptStatement};

pub fn parse(sql: &str) -> Statement {
    Parser::new(sql)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_with(sql: &str, dialect: &dyn Dialect) -> Statement {
    Parser::with_dialect(sql, dialect)
        .parse_statement()
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_err(sql: &str) -> ParseError {
    Parser::new(sql)
        .parse_statement()
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn parse_script(sql: &str) -> Vec<ScriptStatement> {
    Parser::new(sql)
        .parse_script()
        .unwrap_or_else(|e| panic!("Failed to parse script: {sql}\nError: {e:?}"))
}

pub fn parse_query(sql: &str) -> Query {
    match parse(sql) {
        Statement::Query(q) => *q,
        other => panic!("Expected query, got {other:?}"),
    }
}

pub fn parse_select(sql: &str) -> SelectStatement {
    let query = parse_query(sql);
    match query.as_select() {
        Some(select) => select.clone(),
        None => panic!("Expected a single SELECT block: {sql}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateStatement {
    match parse(sql) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

/// Verifies that `to_string()` produces a fixed point:
/// parse(sql).to_string() can be re-parsed and yields the same
/// string again.
pub fn round_trip(sql: &str) {
    let ast1 = parse(sql);
    let rendered1 = ast1.to_string();
    let ast2 = parse(&rendered1);
    let rendered2 = ast2.to_string();
    assert_eq!(
        rendered1, rendered2,
        "Round-trip failed.\n  Input:    {sql}\n  First:    {rendered1}\n  Second:   {rendered2}"
    );
}

/// Asserts that `sql` renders exactly as `expected`, and that the rendering
/// is itself a fixed point.
pub fn renders_as(sql: &str, expected: &str) {
    assert_eq!(parse(sql).to_string(), expected, "Input: {sql}");
    round_trip(expected);
}
