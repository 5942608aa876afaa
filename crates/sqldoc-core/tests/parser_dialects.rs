//! Tests for dialect-specific syntax.

mod common;
use common::*;

use sqldoc_core::dialect::{
    dialect_for_name, GenericDialect, MySqlDialect, PostgresDialect, SqliteDialect,
};
use sqldoc_core::Parser;

#[test]
fn mysql_backticks_and_hash_comments() {
    let stmt = parse_with(
        "SELECT `order`, name FROM `shop`.`items` # trailing comment",
        &MySqlDialect,
    );
    assert_eq!(
        stmt.to_string(),
        "SELECT \"order\", name FROM shop.items"
    );
}

#[test]
fn backticks_rejected_by_generic() {
    assert!(Parser::with_dialect("SELECT `a` FROM t", &GenericDialect)
        .parse_statement()
        .is_err());
}

#[test]
fn sqlite_brackets_and_limit_comma() {
    let stmt = parse_with("SELECT [first name] FROM t LIMIT 10, 5", &SqliteDialect);
    assert_eq!(
        stmt.to_string(),
        "SELECT \"first name\" FROM t LIMIT 5 OFFSET 10"
    );
}

#[test]
fn limit_comma_rejected_by_postgres() {
    let err = Parser::with_dialect("SELECT * FROM t LIMIT 10, 5", &PostgresDialect)
        .parse_statement()
        .unwrap_err();
    assert_eq!(
        err.message,
        "`LIMIT offset, count` is not supported by the postgres dialect"
    );
}

#[test]
fn postgres_double_colon_cast() {
    let stmt = parse_with("SELECT '42'::int + 1, x::varchar(10) FROM t", &PostgresDialect);
    assert_eq!(
        stmt.to_string(),
        "SELECT '42'::INTEGER + 1, x::VARCHAR(10) FROM t"
    );
}

#[test]
fn double_colon_rejected_by_mysql() {
    let err = Parser::with_dialect("SELECT a::int", &MySqlDialect)
        .parse_statement()
        .unwrap_err();
    assert_eq!(err.message, "`::` casts are not supported by the mysql dialect");
    assert_eq!(err.span.start, 8);
}

#[test]
fn dialect_lookup() {
    for name in ["generic", "MySQL", "postgresql", "sqlite", "ansi"] {
        assert!(dialect_for_name(name).is_some(), "{name}");
    }
    assert!(dialect_for_name("oracle").is_none());
    let dialect = dialect_for_name("postgres").expect("postgres");
    assert_eq!(dialect.name(), "postgres");
    let stmt = parse_with("SELECT a::text", dialect.as_ref());
    assert_eq!(stmt.to_string(), "SELECT a::TEXT");
}
