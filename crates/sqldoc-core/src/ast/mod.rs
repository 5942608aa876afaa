//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Every node implements `Display`, producing canonical SQL that parses
//! back to the same tree.

mod display;
mod expression;
mod query;
mod statement;
mod types;

pub use expression::{BinaryOp, Expr, FunctionCall, Literal, Quantifier, UnaryOp, WindowSpec};
pub use query::{
    Cte, JoinClause, JoinConstraint, JoinType, NullOrdering, OrderBy, OrderDirection, Query,
    SelectItem, SelectStatement, SetExpr, SetOperator, TableRef, With,
};
pub use statement::{
    render_script, AlterColumnAction, AlterTableOperation, AlterTableStatement, Assignment,
    CreateDatabaseStatement, CreateIndexStatement, CreateTableBody, CreateTableStatement,
    CreateViewStatement, DeleteStatement, DropBehavior, DropStatement, GrantStatement, Grantee,
    InsertSource, InsertStatement, ObjectName, ObjectType, Privileges, RevokeStatement, Statement,
    StatementCategory, TransactionStatement, UpdateStatement,
};
pub use types::{
    ColumnConstraint, ColumnDef, DataType, ForeignKeyRef, NamedColumnConstraint,
    ReferentialAction, TableConstraint, TableConstraintKind,
};
