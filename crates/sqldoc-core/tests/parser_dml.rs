//! Tests for INSERT, UPDATE and DELETE.

mod common;
use common::*;

use sqldoc_core::ast::{BinaryOp, Expr, InsertSource};

#[test]
fn insert_values_with_columns() {
    let i = parse_insert("INSERT INTO users (name, email) VALUES ('Ann', 'ann@example.com')");
    assert_eq!(i.table.name(), "users");
    assert_eq!(i.columns, vec!["name", "email"]);
    let InsertSource::Values(rows) = &i.source else {
        panic!("expected VALUES");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], Expr::string("Ann"));
    round_trip("INSERT INTO users (name, email) VALUES ('Ann', 'ann@example.com')");
}

#[test]
fn insert_multiple_rows() {
    let i = parse_insert("INSERT INTO t VALUES (1, 'a'), (2, 'b'), (3, NULL)");
    assert!(i.columns.is_empty());
    assert!(matches!(&i.source, InsertSource::Values(rows) if rows.len() == 3));
    renders_as(
        "insert into t values (1,'a'),(2,'b'),(3,null)",
        "INSERT INTO t VALUES (1, 'a'), (2, 'b'), (3, NULL)",
    );
}

#[test]
fn insert_from_select() {
    let i = parse_insert("INSERT INTO archive (id) SELECT id FROM orders WHERE placed < 100");
    assert!(matches!(i.source, InsertSource::Query(_)));
    round_trip("INSERT INTO archive (id) SELECT id FROM orders WHERE placed < 100");
}

#[test]
fn insert_from_parenthesized_select() {
    let i = parse_insert("INSERT INTO archive (SELECT * FROM orders)");
    assert!(i.columns.is_empty());
    assert!(matches!(i.source, InsertSource::Query(_)));
}

#[test]
fn insert_default_values() {
    let i = parse_insert("INSERT INTO counters DEFAULT VALUES");
    assert_eq!(i.source, InsertSource::DefaultValues);
    renders_as(
        "INSERT INTO counters DEFAULT VALUES",
        "INSERT INTO counters DEFAULT VALUES",
    );
}

#[test]
fn insert_with_parameters() {
    let i = parse_insert("INSERT INTO t (a, b, c) VALUES (?, :name, $1)");
    let InsertSource::Values(rows) = &i.source else {
        panic!("expected VALUES");
    };
    assert_eq!(rows[0][1], Expr::Parameter(":name".into()));
    round_trip("INSERT INTO t (a, b, c) VALUES (?, :name, $1)");
}

#[test]
fn update_with_where() {
    let u = parse_update("UPDATE products SET price = price * 1.1, stock = 0 WHERE id = 5");
    assert_eq!(u.assignments.len(), 2);
    assert_eq!(u.assignments[1].column, "stock");
    assert!(matches!(
        u.where_clause,
        Some(Expr::Binary {
            op: BinaryOp::Eq,
            ..
        })
    ));
    round_trip("UPDATE products SET price = price * 1.1, stock = 0 WHERE id = 5");
}

#[test]
fn update_with_alias_and_from() {
    let u = parse_update(
        "UPDATE orders o SET status = 'late' FROM customers c WHERE o.customer_id = c.id",
    );
    assert_eq!(u.alias.as_deref(), Some("o"));
    assert_eq!(u.from.len(), 1);
    renders_as(
        "UPDATE orders o SET status = 'late' FROM customers c WHERE o.customer_id = c.id",
        "UPDATE orders AS o SET status = 'late' FROM customers AS c WHERE o.customer_id = c.id",
    );
}

#[test]
fn delete_statements() {
    let d = parse_delete("DELETE FROM sessions");
    assert!(d.where_clause.is_none());
    let d = parse_delete("DELETE FROM sessions s WHERE s.expires < 100");
    assert_eq!(d.alias.as_deref(), Some("s"));
    assert!(d.where_clause.is_some());
    round_trip("DELETE FROM sessions AS s WHERE s.expires < 100");
}

#[test]
fn delete_with_subquery() {
    round_trip("DELETE FROM orders WHERE customer_id IN (SELECT id FROM customers WHERE active = FALSE)");
}

#[test]
fn dml_errors() {
    assert_eq!(
        parse_err("INSERT users VALUES (1)").expected.as_deref(),
        Some("INTO")
    );
    assert_eq!(
        parse_err("UPDATE t WHERE id = 1").expected.as_deref(),
        Some("SET")
    );
    assert_eq!(
        parse_err("DELETE t WHERE id = 1").expected.as_deref(),
        Some("FROM")
    );
    let _ = parse_err("INSERT INTO t (a) VALUES (1,)");
}
