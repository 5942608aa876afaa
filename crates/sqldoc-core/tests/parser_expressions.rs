//! Tests for expression parsing and operator precedence.

mod common;
use common::*;

use sqldoc_core::ast::{BinaryOp, DataType, Expr, Literal, Quantifier, UnaryOp};

fn expr(sql: &str) -> Expr {
    let s = parse_select(&format!("SELECT {sql}"));
    s.columns.into_iter().next().map(|c| c.expr).expect("one column")
}

fn where_expr(condition: &str) -> Expr {
    parse_select(&format!("SELECT * FROM t WHERE {condition}"))
        .where_clause
        .expect("WHERE clause")
}

#[test]
fn arithmetic_precedence() {
    let Expr::Binary { op, right, .. } = expr("1 + 2 * 3") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Add);
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::Mul, .. }));

    let Expr::Binary { op, left, .. } = expr("10 - 4 - 3") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Sub);
    assert!(matches!(*left, Expr::Binary { op: BinaryOp::Sub, .. }));
}

#[test]
fn parentheses_are_kept() {
    let Expr::Binary { left, .. } = expr("(1 + 2) * 3") else {
        panic!("expected binary");
    };
    assert!(matches!(*left, Expr::Paren(_)));
    renders_as("SELECT (1+2)*3", "SELECT (1 + 2) * 3");
}

#[test]
fn and_binds_tighter_than_or() {
    let Expr::Binary { op, right, .. } = where_expr("a = 1 OR b = 2 AND c = 3") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Or);
    assert!(matches!(*right, Expr::Binary { op: BinaryOp::And, .. }));
}

#[test]
fn not_applies_to_comparison() {
    let Expr::Unary { op, operand } = where_expr("NOT price > 10") else {
        panic!("expected NOT");
    };
    assert_eq!(op, UnaryOp::Not);
    assert!(matches!(*operand, Expr::Binary { op: BinaryOp::Gt, .. }));
}

#[test]
fn unary_minus_binds_tightest() {
    let Expr::Binary { left, op, .. } = expr("-a * b") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Mul);
    assert!(matches!(*left, Expr::Unary { op: UnaryOp::Neg, .. }));
    renders_as("SELECT - -5", "SELECT - -5");
}

#[test]
fn comparison_operators() {
    for (sql, op) in [
        ("a = 1", BinaryOp::Eq),
        ("a == 1", BinaryOp::Eq),
        ("a <> 1", BinaryOp::NotEq),
        ("a != 1", BinaryOp::NotEq),
        ("a < 1", BinaryOp::Lt),
        ("a <= 1", BinaryOp::LtEq),
        ("a > 1", BinaryOp::Gt),
        ("a >= 1", BinaryOp::GtEq),
    ] {
        assert!(
            matches!(where_expr(sql), Expr::Binary { op: found, .. } if found == op),
            "{sql}"
        );
    }
    renders_as("SELECT * FROM t WHERE a != 1", "SELECT * FROM t WHERE a <> 1");
}

#[test]
fn bitwise_and_concat() {
    let Expr::Binary { op, .. } = expr("a | b & c") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::BitOr);
    let Expr::Binary { op, .. } = expr("first_name || ' ' || last_name") else {
        panic!("expected binary");
    };
    assert_eq!(op, BinaryOp::Concat);
    round_trip("SELECT a << 2, b >> 1, ~c, d % 3 FROM t");
}

#[test]
fn is_null_and_is_bool() {
    assert!(matches!(
        where_expr("email IS NULL"),
        Expr::IsNull { negated: false, .. }
    ));
    assert!(matches!(
        where_expr("email IS NOT NULL"),
        Expr::IsNull { negated: true, .. }
    ));
    assert!(matches!(
        where_expr("active IS NOT TRUE"),
        Expr::IsBool {
            value: true,
            negated: true,
            ..
        }
    ));
    round_trip("SELECT * FROM t WHERE a IS NULL AND b IS NOT FALSE");
}

#[test]
fn in_list_and_subquery() {
    assert!(matches!(
        where_expr("id IN (1, 2, 3)"),
        Expr::InList { negated: false, ref list, .. } if list.len() == 3
    ));
    assert!(matches!(
        where_expr("id NOT IN (SELECT user_id FROM banned)"),
        Expr::InSubquery { negated: true, .. }
    ));
    round_trip("SELECT * FROM t WHERE id NOT IN (1, 2) AND x IN (SELECT y FROM u)");
}

#[test]
fn between_binds_its_and() {
    let Expr::Binary { op, left, .. } = where_expr("price BETWEEN 10 AND 20 AND stock > 0") else {
        panic!("expected AND");
    };
    assert_eq!(op, BinaryOp::And);
    assert!(matches!(*left, Expr::Between { negated: false, .. }));
    round_trip("SELECT * FROM t WHERE price NOT BETWEEN 10 AND 20");
}

#[test]
fn like_with_escape() {
    assert!(matches!(
        where_expr("name LIKE 'A%'"),
        Expr::Like { negated: false, escape: None, .. }
    ));
    assert!(matches!(
        where_expr("name NOT LIKE 'a\\_%' ESCAPE '\\'"),
        Expr::Like { negated: true, escape: Some(_), .. }
    ));
    round_trip("SELECT * FROM t WHERE name NOT LIKE 'a!%' ESCAPE '!'");
}

#[test]
fn exists_and_quantified_subqueries() {
    assert!(matches!(
        where_expr("EXISTS (SELECT 1 FROM orders)"),
        Expr::Exists { negated: false, .. }
    ));
    assert!(matches!(
        where_expr("NOT EXISTS (SELECT 1 FROM orders)"),
        Expr::Exists { negated: true, .. }
    ));
    assert!(matches!(
        where_expr("price > ALL (SELECT price FROM sale)"),
        Expr::Quantified {
            op: BinaryOp::Gt,
            quantifier: Quantifier::All,
            ..
        }
    ));
    round_trip("SELECT * FROM t WHERE a = ANY (SELECT b FROM u) OR a < SOME (SELECT c FROM v)");
}

#[test]
fn case_expressions() {
    let Expr::Case {
        operand,
        when_clauses,
        else_clause,
    } = expr("CASE WHEN qty > 10 THEN 'bulk' WHEN qty > 0 THEN 'retail' ELSE 'none' END")
    else {
        panic!("expected CASE");
    };
    assert!(operand.is_none());
    assert_eq!(when_clauses.len(), 2);
    assert!(else_clause.is_some());

    let Expr::Case { operand, .. } = expr("CASE status WHEN 1 THEN 'on' END") else {
        panic!("expected CASE");
    };
    assert!(operand.is_some());
    round_trip("SELECT CASE status WHEN 1 THEN 'on' ELSE 'off' END AS label FROM t");
}

#[test]
fn cast_expression() {
    let Expr::Cast {
        data_type,
        shorthand,
        ..
    } = expr("CAST(price AS DECIMAL(10, 2))")
    else {
        panic!("expected CAST");
    };
    assert_eq!(
        data_type,
        DataType::Decimal {
            precision: Some(10),
            scale: Some(2)
        }
    );
    assert!(!shorthand);
    renders_as("SELECT cast(x as int)", "SELECT CAST(x AS INTEGER)");
}

#[test]
fn function_calls() {
    let Expr::Function(call) = expr("COUNT(DISTINCT customer_id)") else {
        panic!("expected function");
    };
    assert!(call.distinct);
    assert!(call.is_aggregate());

    let Expr::Function(call) = expr("COUNT(*)") else {
        panic!("expected function");
    };
    assert_eq!(call.args, vec![Expr::Wildcard { table: None }]);

    let Expr::Function(call) = expr("NOW()") else {
        panic!("expected function");
    };
    assert!(call.args.is_empty());
    round_trip("SELECT UPPER(name), COALESCE(nick, name, 'n/a'), ROUND(price, 2) FROM t");
}

#[test]
fn keyword_named_functions() {
    round_trip("SELECT LEFT(name, 3), RIGHT(name, 2), REPLACE(name, 'a', 'b') FROM t");
}

#[test]
fn window_functions() {
    let Expr::Function(call) =
        expr("ROW_NUMBER() OVER (PARTITION BY dept ORDER BY salary DESC)")
    else {
        panic!("expected function");
    };
    let window = call.over.expect("OVER clause");
    assert_eq!(window.partition_by.len(), 1);
    assert_eq!(window.order_by.len(), 1);
    round_trip("SELECT name, RANK() OVER (ORDER BY score DESC) AS pos FROM players");
    round_trip("SELECT SUM(x) OVER () FROM t");
}

#[test]
fn extract_and_typed_strings() {
    assert!(matches!(
        expr("EXTRACT(year FROM placed_at)"),
        Expr::Extract { ref field, .. } if field == "YEAR"
    ));
    assert!(matches!(
        expr("DATE '2024-01-31'"),
        Expr::TypedString {
            data_type: DataType::Date,
            ..
        }
    ));
    round_trip("SELECT * FROM t WHERE placed >= DATE '2024-01-01' AND EXTRACT(MONTH FROM placed) = 3");
}

#[test]
fn columns_and_qualifiers() {
    let Expr::Column {
        qualifier,
        name,
        span,
    } = expr("shop.orders.total")
    else {
        panic!("expected column");
    };
    assert_eq!(qualifier, vec!["shop", "orders"]);
    assert_eq!(name, "total");
    assert_eq!(span.start, 7);
    assert_eq!(span.end, 24);
}

#[test]
fn column_named_like_a_type() {
    assert!(matches!(expr("date"), Expr::Column { ref name, .. } if name == "date"));
    round_trip("SELECT date, count FROM events");
}

#[test]
fn literals() {
    assert_eq!(expr("42"), Expr::Literal(Literal::Number("42".into())));
    assert_eq!(expr("3.14"), Expr::Literal(Literal::Number("3.14".into())));
    assert_eq!(expr("'it''s'"), Expr::string("it's"));
    assert_eq!(expr("X'CAFE'"), Expr::Literal(Literal::Blob(vec![0xCA, 0xFE])));
    assert_eq!(expr("NULL"), Expr::Literal(Literal::Null));
    assert_eq!(expr("TRUE"), Expr::Literal(Literal::Boolean(true)));
    renders_as("SELECT 'it''s'", "SELECT 'it''s'");
}

#[test]
fn parameters() {
    assert_eq!(expr("?"), Expr::Parameter("?".into()));
    assert_eq!(expr("@user"), Expr::Parameter("@user".into()));
    round_trip("SELECT * FROM t WHERE a = ? AND b = :b AND c = $2");
}
