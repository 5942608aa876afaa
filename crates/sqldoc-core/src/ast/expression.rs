//! Expression AST types.

use std::fmt;

use super::display::{comma, Ident, QuotedString};
use super::query::{OrderBy, Query};
use super::types::DataType;
use crate::lexer::Span;

/// A literal value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// Numeric literal, as written.
    Number(String),
    /// String literal.
    String(String),
    /// Hex blob literal.
    Blob(Vec<u8>),
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    /// `NULL`.
    Null,
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(n),
            Self::String(s) => write!(f, "{}", QuotedString(s)),
            Self::Blob(bytes) => {
                f.write_str("X'")?;
                for byte in bytes {
                    write!(f, "{byte:02X}")?;
                }
                f.write_str("'")
            }
            Self::Boolean(true) => f.write_str("TRUE"),
            Self::Boolean(false) => f.write_str("FALSE"),
            Self::Null => f.write_str("NULL"),
        }
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,

    // Bitwise
    BitAnd,
    BitOr,
    LeftShift,
    RightShift,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::BitAnd => "&",
            Self::BitOr => "|",
            Self::LeftShift => "<<",
            Self::RightShift => ">>",
        }
    }

    /// Returns true for `=`, `<>`, `<`, `<=`, `>` and `>=`.
    #[must_use]
    pub const fn is_comparison(&self) -> bool {
        matches!(
            self,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// `-`
    Neg,
    /// `+`
    Plus,
    /// `NOT`
    Not,
    /// `~`
    BitNot,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "NOT",
            Self::BitNot => "~",
        }
    }
}

/// `ANY`, `SOME` or `ALL` in a quantified comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// `ANY`
    Any,
    /// `SOME`
    Some,
    /// `ALL`
    All,
}

impl Quantifier {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "ANY",
            Self::Some => "SOME",
            Self::All => "ALL",
        }
    }
}

/// The `OVER (...)` clause of a window function.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSpec {
    /// `PARTITION BY` expressions.
    pub partition_by: Vec<Expr>,
    /// `ORDER BY` items.
    pub order_by: Vec<OrderBy>,
}

impl fmt::Display for WindowSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        if !self.partition_by.is_empty() {
            write!(f, "PARTITION BY {}", comma(&self.partition_by))?;
        }
        if !self.order_by.is_empty() {
            if !self.partition_by.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "ORDER BY {}", comma(&self.order_by))?;
        }
        f.write_str(")")
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name as written.
    pub name: String,
    /// The arguments; `COUNT(*)` has a single wildcard argument.
    pub args: Vec<Expr>,
    /// Whether `DISTINCT` preceded the arguments.
    pub distinct: bool,
    /// Window specification for `f(...) OVER (...)`.
    pub over: Option<WindowSpec>,
}

impl FunctionCall {
    /// Returns true if the call is one of the standard aggregates.
    #[must_use]
    pub fn is_aggregate(&self) -> bool {
        ["COUNT", "SUM", "AVG", "MIN", "MAX"]
            .iter()
            .any(|name| self.name.eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for FunctionCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Keyword-named functions such as LEFT() stay bare.
        if self.name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            write!(f, "{}(", self.name)?;
        } else {
            write!(f, "{}(", Ident(&self.name))?;
        }
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{})", comma(&self.args))?;
        if let Some(window) = &self.over {
            write!(f, " OVER {window}")?;
        }
        Ok(())
    }
}

/// A SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A typed string literal such as `DATE '2024-01-31'`.
    TypedString {
        /// The type named before the string.
        data_type: DataType,
        /// The string contents.
        value: String,
    },

    /// A column reference, optionally qualified (`t.c`, `s.t.c`).
    Column {
        /// Qualifying names, outermost first.
        qualifier: Vec<String>,
        /// Column name.
        name: String,
        /// Source span of the reference.
        span: Span,
    },

    /// `*` or `t.*`.
    Wildcard {
        /// Table qualifier.
        table: Option<String>,
    },

    /// A parameter placeholder, as written.
    Parameter(String),

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// A function call.
    Function(FunctionCall),

    /// A scalar subquery.
    Subquery(Box<Query>),

    /// `[NOT] EXISTS (query)`.
    Exists {
        /// The subquery.
        query: Box<Query>,
        /// Whether this is `NOT EXISTS`.
        negated: bool,
    },

    /// `expr IS [NOT] NULL`.
    IsNull {
        /// The tested expression.
        expr: Box<Expr>,
        /// Whether this is `IS NOT NULL`.
        negated: bool,
    },

    /// `expr IS [NOT] TRUE|FALSE`.
    IsBool {
        /// The tested expression.
        expr: Box<Expr>,
        /// The truth value tested for.
        value: bool,
        /// Whether `NOT` was given.
        negated: bool,
    },

    /// `expr [NOT] IN (list)`.
    InList {
        /// The tested expression.
        expr: Box<Expr>,
        /// Candidate values.
        list: Vec<Expr>,
        /// Whether this is `NOT IN`.
        negated: bool,
    },

    /// `expr [NOT] IN (query)`.
    InSubquery {
        /// The tested expression.
        expr: Box<Expr>,
        /// The subquery.
        query: Box<Query>,
        /// Whether this is `NOT IN`.
        negated: bool,
    },

    /// `expr [NOT] BETWEEN low AND high`.
    Between {
        /// The tested expression.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is `NOT BETWEEN`.
        negated: bool,
    },

    /// `expr [NOT] LIKE pattern [ESCAPE c]`.
    Like {
        /// The tested expression.
        expr: Box<Expr>,
        /// The pattern.
        pattern: Box<Expr>,
        /// Escape character expression.
        escape: Option<Box<Expr>>,
        /// Whether this is `NOT LIKE`.
        negated: bool,
    },

    /// `left op ANY|SOME|ALL (query)`.
    Quantified {
        /// Left operand.
        left: Box<Expr>,
        /// Comparison operator.
        op: BinaryOp,
        /// The quantifier.
        quantifier: Quantifier,
        /// The subquery.
        query: Box<Query>,
    },

    /// `CASE [operand] WHEN .. THEN .. [ELSE ..] END`.
    Case {
        /// The operand of a simple `CASE`.
        operand: Option<Box<Expr>>,
        /// `WHEN`/`THEN` pairs.
        when_clauses: Vec<(Expr, Expr)>,
        /// `ELSE` result.
        else_clause: Option<Box<Expr>>,
    },

    /// `CAST(expr AS type)` or `expr::type`.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        data_type: DataType,
        /// Whether the `::` shorthand was used.
        shorthand: bool,
    },

    /// `EXTRACT(field FROM expr)`.
    Extract {
        /// The date part, upper-cased.
        field: String,
        /// The source expression.
        expr: Box<Expr>,
    },

    /// A parenthesized expression.
    Paren(Box<Expr>),
}

impl Expr {
    /// Creates an unqualified column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            qualifier: vec![],
            name: name.into(),
            span: Span::default(),
        }
    }

    /// Creates a numeric literal.
    #[must_use]
    pub fn number(value: impl ToString) -> Self {
        Self::Literal(Literal::Number(value.to_string()))
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::Literal(Literal::String(value.into()))
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Visits this expression and every expression nested in it,
    /// including those inside subqueries, parents before children.
    pub fn walk(&self, visit: &mut dyn FnMut(&Self)) {
        visit(self);
        match self {
            Self::Literal(_)
            | Self::TypedString { .. }
            | Self::Column { .. }
            | Self::Wildcard { .. }
            | Self::Parameter(_) => {}
            Self::Binary { left, right, .. } => {
                left.walk(visit);
                right.walk(visit);
            }
            Self::Unary { operand, .. } => operand.walk(visit),
            Self::Function(call) => {
                for arg in &call.args {
                    arg.walk(visit);
                }
                if let Some(window) = &call.over {
                    for expr in &window.partition_by {
                        expr.walk(visit);
                    }
                    for item in &window.order_by {
                        item.expr.walk(visit);
                    }
                }
            }
            Self::Subquery(query) | Self::Exists { query, .. } => query.walk_exprs(visit),
            Self::IsNull { expr, .. }
            | Self::IsBool { expr, .. }
            | Self::Cast { expr, .. }
            | Self::Extract { expr, .. }
            | Self::Paren(expr) => expr.walk(visit),
            Self::InList { expr, list, .. } => {
                expr.walk(visit);
                for item in list {
                    item.walk(visit);
                }
            }
            Self::InSubquery { expr, query, .. } => {
                expr.walk(visit);
                query.walk_exprs(visit);
            }
            Self::Between {
                expr, low, high, ..
            } => {
                expr.walk(visit);
                low.walk(visit);
                high.walk(visit);
            }
            Self::Like {
                expr,
                pattern,
                escape,
                ..
            } => {
                expr.walk(visit);
                pattern.walk(visit);
                if let Some(escape) = escape {
                    escape.walk(visit);
                }
            }
            Self::Quantified { left, query, .. } => {
                left.walk(visit);
                query.walk_exprs(visit);
            }
            Self::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                if let Some(operand) = operand {
                    operand.walk(visit);
                }
                for (when, then) in when_clauses {
                    when.walk(visit);
                    then.walk(visit);
                }
                if let Some(else_clause) = else_clause {
                    else_clause.walk(visit);
                }
            }
        }
    }
}

fn not(negated: bool) -> &'static str {
    if negated {
        "NOT "
    } else {
        ""
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(lit) => write!(f, "{lit}"),
            Self::TypedString { data_type, value } => {
                write!(f, "{data_type} {}", QuotedString(value))
            }
            Self::Column {
                qualifier, name, ..
            } => {
                for part in qualifier {
                    write!(f, "{}.", Ident(part))?;
                }
                write!(f, "{}", Ident(name))
            }
            Self::Wildcard { table: None } => f.write_str("*"),
            Self::Wildcard { table: Some(t) } => write!(f, "{}.*", Ident(t)),
            Self::Parameter(p) => f.write_str(p),
            Self::Binary { left, op, right } => write!(f, "{left} {} {right}", op.as_str()),
            Self::Unary { op: UnaryOp::Not, operand } => write!(f, "NOT {operand}"),
            Self::Unary { op, operand } => {
                // `- -x` must not collapse into a `--` comment.
                let spaced = matches!(
                    operand.as_ref(),
                    Self::Unary {
                        op: UnaryOp::Neg | UnaryOp::Plus,
                        ..
                    }
                );
                let gap = if spaced { " " } else { "" };
                write!(f, "{}{gap}{operand}", op.as_str())
            }
            Self::Function(call) => write!(f, "{call}"),
            Self::Subquery(query) => write!(f, "({query})"),
            Self::Exists { query, negated } => write!(f, "{}EXISTS ({query})", not(*negated)),
            Self::IsNull { expr, negated } => write!(f, "{expr} IS {}NULL", not(*negated)),
            Self::IsBool {
                expr,
                value,
                negated,
            } => {
                let value = if *value { "TRUE" } else { "FALSE" };
                write!(f, "{expr} IS {}{value}", not(*negated))
            }
            Self::InList {
                expr,
                list,
                negated,
            } => write!(f, "{expr} {}IN ({})", not(*negated), comma(list)),
            Self::InSubquery {
                expr,
                query,
                negated,
            } => write!(f, "{expr} {}IN ({query})", not(*negated)),
            Self::Between {
                expr,
                low,
                high,
                negated,
            } => write!(f, "{expr} {}BETWEEN {low} AND {high}", not(*negated)),
            Self::Like {
                expr,
                pattern,
                escape,
                negated,
            } => {
                write!(f, "{expr} {}LIKE {pattern}", not(*negated))?;
                if let Some(escape) = escape {
                    write!(f, " ESCAPE {escape}")?;
                }
                Ok(())
            }
            Self::Quantified {
                left,
                op,
                quantifier,
                query,
            } => write!(f, "{left} {} {} ({query})", op.as_str(), quantifier.as_str()),
            Self::Case {
                operand,
                when_clauses,
                else_clause,
            } => {
                f.write_str("CASE")?;
                if let Some(operand) = operand {
                    write!(f, " {operand}")?;
                }
                for (when, then) in when_clauses {
                    write!(f, " WHEN {when} THEN {then}")?;
                }
                if let Some(else_clause) = else_clause {
                    write!(f, " ELSE {else_clause}")?;
                }
                f.write_str(" END")
            }
            Self::Cast {
                expr,
                data_type,
                shorthand: true,
            } => write!(f, "{expr}::{data_type}"),
            Self::Cast {
                expr, data_type, ..
            } => write!(f, "CAST({expr} AS {data_type})"),
            Self::Extract { field, expr } => write!(f, "EXTRACT({field} FROM {expr})"),
            Self::Paren(expr) => write!(f, "({expr})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_display() {
        assert_eq!(Literal::Number("3.50".into()).to_string(), "3.50");
        assert_eq!(Literal::String("O'Reilly".into()).to_string(), "'O''Reilly'");
        assert_eq!(Literal::Blob(vec![0xCA, 0xFE]).to_string(), "X'CAFE'");
        assert_eq!(Literal::Null.to_string(), "NULL");
    }

    #[test]
    fn test_binary_display() {
        let expr = Expr::column("price").binary(BinaryOp::NotEq, Expr::number(10));
        assert_eq!(expr.to_string(), "price <> 10");
        assert!(BinaryOp::LtEq.is_comparison());
        assert!(!BinaryOp::And.is_comparison());
    }

    #[test]
    fn test_double_negation_keeps_space() {
        let expr = Expr::Unary {
            op: UnaryOp::Neg,
            operand: Box::new(Expr::Unary {
                op: UnaryOp::Neg,
                operand: Box::new(Expr::number(1)),
            }),
        };
        assert_eq!(expr.to_string(), "- -1");
    }

    #[test]
    fn test_aggregate_detection() {
        let call = FunctionCall {
            name: "count".into(),
            args: vec![Expr::Wildcard { table: None }],
            distinct: false,
            over: None,
        };
        assert!(call.is_aggregate());
        assert_eq!(call.to_string(), "count(*)");
    }

    #[test]
    fn test_walk_visits_nested_expressions() {
        let expr = Expr::column("a")
            .binary(BinaryOp::Add, Expr::number(1))
            .binary(BinaryOp::Gt, Expr::column("b"));
        let mut columns = vec![];
        expr.walk(&mut |e| {
            if let Expr::Column { name, .. } = e {
                columns.push(name.clone());
            }
        });
        assert_eq!(columns, vec!["a", "b"]);
    }
}
