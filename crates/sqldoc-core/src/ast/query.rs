//! Query AST types: `SELECT`, set operations, `FROM` items and ordering.

use std::fmt;

use super::display::{comma, Ident, IdentList};
use super::expression::Expr;
use super::statement::ObjectName;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderDirection {
    /// Ascending order.
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

impl NullOrdering {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::First => "NULLS FIRST",
            Self::Last => "NULLS LAST",
        }
    }
}

/// An ORDER BY entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// Explicit direction; `None` means the default ascending order.
    pub direction: Option<OrderDirection>,
    /// Null ordering.
    pub nulls: Option<NullOrdering>,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(direction) = self.direction {
            write!(f, " {}", direction.as_str())?;
        }
        if let Some(nulls) = self.nulls {
            write!(f, " {}", nulls.as_str())?;
        }
        Ok(())
    }
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// `[INNER] JOIN`
    Inner,
    /// `LEFT [OUTER] JOIN`
    Left,
    /// `RIGHT [OUTER] JOIN`
    Right,
    /// `FULL [OUTER] JOIN`
    Full,
    /// `CROSS JOIN`
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// How the rows of a join are matched.
#[derive(Debug, Clone, PartialEq)]
pub enum JoinConstraint {
    /// `ON expr`
    On(Expr),
    /// `USING (cols)`
    Using(Vec<String>),
    /// `NATURAL` join on identically named columns.
    Natural,
    /// No condition (`CROSS JOIN`).
    None,
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The joined table.
    pub table: TableRef,
    /// The join condition.
    pub constraint: JoinConstraint,
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.constraint == JoinConstraint::Natural {
            match self.join_type {
                JoinType::Inner => f.write_str("NATURAL JOIN")?,
                other => write!(f, "NATURAL {}", other.as_str())?,
            }
        } else {
            f.write_str(self.join_type.as_str())?;
        }
        match &self.table {
            TableRef::Join { .. } => write!(f, " ({})", self.table)?,
            table => write!(f, " {table}")?,
        }
        match &self.constraint {
            JoinConstraint::On(expr) => write!(f, " ON {expr}"),
            JoinConstraint::Using(cols) => write!(f, " USING ({})", IdentList(cols)),
            JoinConstraint::Natural | JoinConstraint::None => Ok(()),
        }
    }
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone, PartialEq)]
pub enum TableRef {
    /// A named table.
    Table {
        /// Possibly schema-qualified name.
        name: ObjectName,
        /// Alias.
        alias: Option<String>,
    },
    /// A derived table.
    Subquery {
        /// The subquery.
        query: Box<Query>,
        /// Alias.
        alias: Option<String>,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
    },
}

impl TableRef {
    /// Creates a simple table reference.
    #[must_use]
    pub fn table(name: impl Into<String>) -> Self {
        Self::Table {
            name: ObjectName(vec![name.into()]),
            alias: None,
        }
    }

    /// Returns the names of every table this reference reads, left to right.
    #[must_use]
    pub fn table_names(&self) -> Vec<&ObjectName> {
        match self {
            Self::Table { name, .. } => vec![name],
            Self::Subquery { .. } => vec![],
            Self::Join { left, join } => {
                let mut names = left.table_names();
                names.extend(join.table.table_names());
                names
            }
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alias = match self {
            Self::Table { name, alias } => {
                write!(f, "{name}")?;
                alias
            }
            Self::Subquery { query, alias } => {
                write!(f, "({query})")?;
                alias
            }
            Self::Join { left, join } => return write!(f, "{left} {join}"),
        };
        if let Some(alias) = alias {
            write!(f, " AS {}", Ident(alias))?;
        }
        Ok(())
    }
}

/// An item in the SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    /// The expression.
    pub expr: Expr,
    /// Column alias.
    pub alias: Option<String>,
}

impl fmt::Display for SelectItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.expr)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", Ident(alias))?;
        }
        Ok(())
    }
}

/// A single `SELECT ... FROM ... WHERE ... GROUP BY ... HAVING ...` block.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectStatement {
    /// Whether `DISTINCT` was given.
    pub distinct: bool,
    /// The select list.
    pub columns: Vec<SelectItem>,
    /// FROM items; more than one means an implicit cross join.
    pub from: Vec<TableRef>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
}

impl fmt::Display for SelectStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SELECT ")?;
        if self.distinct {
            f.write_str("DISTINCT ")?;
        }
        write!(f, "{}", comma(&self.columns))?;
        if !self.from.is_empty() {
            write!(f, " FROM {}", comma(&self.from))?;
        }
        if let Some(expr) = &self.where_clause {
            write!(f, " WHERE {expr}")?;
        }
        if !self.group_by.is_empty() {
            write!(f, " GROUP BY {}", comma(&self.group_by))?;
        }
        if let Some(expr) = &self.having {
            write!(f, " HAVING {expr}")?;
        }
        Ok(())
    }
}

/// Set operators combining query blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOperator {
    /// `UNION`
    Union,
    /// `INTERSECT`
    Intersect,
    /// `EXCEPT`
    Except,
}

impl SetOperator {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
        }
    }
}

/// The body of a query: select blocks combined with set operators.
#[derive(Debug, Clone, PartialEq)]
pub enum SetExpr {
    /// A plain select block.
    Select(Box<SelectStatement>),
    /// `left op [ALL] right`.
    SetOperation {
        /// The operator.
        op: SetOperator,
        /// Whether `ALL` keeps duplicates.
        all: bool,
        /// Left operand.
        left: Box<SetExpr>,
        /// Right operand.
        right: Box<SetExpr>,
    },
    /// A parenthesized query.
    Query(Box<Query>),
}

impl fmt::Display for SetExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select(select) => write!(f, "{select}"),
            Self::SetOperation {
                op,
                all,
                left,
                right,
            } => {
                let all = if *all { " ALL" } else { "" };
                write!(f, "{left} {}{all} {right}", op.as_str())
            }
            Self::Query(query) => write!(f, "({query})"),
        }
    }
}

/// A common table expression in a WITH clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Cte {
    /// The CTE name.
    pub name: String,
    /// Optional column list.
    pub columns: Vec<String>,
    /// The defining query.
    pub query: Box<Query>,
}

impl fmt::Display for Cte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Ident(&self.name))?;
        if !self.columns.is_empty() {
            write!(f, " ({})", IdentList(&self.columns))?;
        }
        write!(f, " AS ({})", self.query)
    }
}

/// A WITH clause.
#[derive(Debug, Clone, PartialEq)]
pub struct With {
    /// Whether `RECURSIVE` was given.
    pub recursive: bool,
    /// The common table expressions.
    pub ctes: Vec<Cte>,
}

/// A complete query.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// Optional WITH clause.
    pub with: Option<With>,
    /// The query body.
    pub body: SetExpr,
    /// ORDER BY items.
    pub order_by: Vec<OrderBy>,
    /// LIMIT expression.
    pub limit: Option<Expr>,
    /// OFFSET expression.
    pub offset: Option<Expr>,
}

impl Query {
    /// Wraps a single select block in a query with no extra clauses.
    #[must_use]
    pub fn from_select(select: SelectStatement) -> Self {
        Self {
            with: None,
            body: SetExpr::Select(Box::new(select)),
            order_by: vec![],
            limit: None,
            offset: None,
        }
    }

    /// Returns the select block if the body is a single one.
    #[must_use]
    pub fn as_select(&self) -> Option<&SelectStatement> {
        match &self.body {
            SetExpr::Select(select) => Some(select),
            _ => None,
        }
    }

    /// Visits every expression in the query, including nested subqueries.
    pub fn walk_exprs(&self, visit: &mut dyn FnMut(&Expr)) {
        if let Some(with) = &self.with {
            for cte in &with.ctes {
                cte.query.walk_exprs(visit);
            }
        }
        walk_set_expr(&self.body, visit);
        for item in &self.order_by {
            item.expr.walk(visit);
        }
        for expr in self.limit.iter().chain(self.offset.iter()) {
            expr.walk(visit);
        }
    }
}

fn walk_set_expr(body: &SetExpr, visit: &mut dyn FnMut(&Expr)) {
    match body {
        SetExpr::Select(select) => {
            for item in &select.columns {
                item.expr.walk(visit);
            }
            for table in &select.from {
                walk_table_ref(table, visit);
            }
            for expr in select
                .where_clause
                .iter()
                .chain(&select.group_by)
                .chain(select.having.iter())
            {
                expr.walk(visit);
            }
        }
        SetExpr::SetOperation { left, right, .. } => {
            walk_set_expr(left, visit);
            walk_set_expr(right, visit);
        }
        SetExpr::Query(query) => query.walk_exprs(visit),
    }
}

fn walk_table_ref(table: &TableRef, visit: &mut dyn FnMut(&Expr)) {
    match table {
        TableRef::Table { .. } => {}
        TableRef::Subquery { query, .. } => query.walk_exprs(visit),
        TableRef::Join { left, join } => {
            walk_table_ref(left, visit);
            walk_table_ref(&join.table, visit);
            if let JoinConstraint::On(expr) = &join.constraint {
                expr.walk(visit);
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(with) = &self.with {
            f.write_str("WITH ")?;
            if with.recursive {
                f.write_str("RECURSIVE ")?;
            }
            write!(f, "{} ", comma(&with.ctes))?;
        }
        write!(f, "{}", self.body)?;
        if !self.order_by.is_empty() {
            write!(f, " ORDER BY {}", comma(&self.order_by))?;
        }
        if let Some(limit) = &self.limit {
            write!(f, " LIMIT {limit}")?;
        }
        if let Some(offset) = &self.offset {
            write!(f, " OFFSET {offset}")?;
        }
        Ok(())
    }
}
