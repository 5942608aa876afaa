//! Statement AST types.

use std::fmt;

use super::display::{comma, Ident, IdentList, QuotedString, Separated};
use super::expression::Expr;
use super::query::{OrderBy, Query, TableRef};
use super::types::{ColumnDef, DataType, TableConstraint};

/// A possibly qualified object name such as `shop.customers`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(pub Vec<String>);

impl ObjectName {
    /// Returns the unqualified (last) part of the name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.last().map_or("", String::as_str)
    }
}

impl From<&str> for ObjectName {
    fn from(name: &str) -> Self {
        Self(vec![name.to_string()])
    }
}

impl fmt::Display for ObjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, part) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            // `db.*` in GRANT targets
            if part == "*" {
                f.write_str("*")?;
            } else {
                write!(f, "{}", Ident(part))?;
            }
        }
        Ok(())
    }
}

/// Source of rows for an INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub enum InsertSource {
    /// `VALUES (...), (...)`
    Values(Vec<Vec<Expr>>),
    /// `INSERT ... SELECT ...`
    Query(Box<Query>),
    /// `DEFAULT VALUES`
    DefaultValues,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertStatement {
    /// Target table.
    pub table: ObjectName,
    /// Column list; empty means all columns in table order.
    pub columns: Vec<String>,
    /// Rows to insert.
    pub source: InsertSource,
}

impl fmt::Display for InsertStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "INSERT INTO {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", IdentList(&self.columns))?;
        }
        match &self.source {
            InsertSource::Values(rows) => {
                f.write_str(" VALUES ")?;
                for (i, row) in rows.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "({})", comma(row))?;
                }
                Ok(())
            }
            InsertSource::Query(query) => write!(f, " {query}"),
            InsertSource::DefaultValues => f.write_str(" DEFAULT VALUES"),
        }
    }
}

/// A `column = value` pair in UPDATE.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Column being set.
    pub column: String,
    /// New value.
    pub value: Expr,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", Ident(&self.column), self.value)
    }
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    /// Target table.
    pub table: ObjectName,
    /// Table alias.
    pub alias: Option<String>,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// Additional FROM items (PostgreSQL style).
    pub from: Vec<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
}

impl fmt::Display for UpdateStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UPDATE {}", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", Ident(alias))?;
        }
        write!(f, " SET {}", comma(&self.assignments))?;
        if !self.from.is_empty() {
            write!(f, " FROM {}", comma(&self.from))?;
        }
        if let Some(expr) = &self.where_clause {
            write!(f, " WHERE {expr}")?;
        }
        Ok(())
    }
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteStatement {
    /// Target table.
    pub table: ObjectName,
    /// Table alias.
    pub alias: Option<String>,
    /// WHERE clause; `None` deletes every row.
    pub where_clause: Option<Expr>,
}

impl fmt::Display for DeleteStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DELETE FROM {}", self.table)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", Ident(alias))?;
        }
        if let Some(expr) = &self.where_clause {
            write!(f, " WHERE {expr}")?;
        }
        Ok(())
    }
}

/// What a CREATE TABLE statement defines its columns from.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateTableBody {
    /// An explicit element list.
    Columns {
        /// Column definitions.
        columns: Vec<ColumnDef>,
        /// Table-level constraints.
        constraints: Vec<TableConstraint>,
    },
    /// `AS query`
    AsQuery(Box<Query>),
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTableStatement {
    /// `TEMP` / `TEMPORARY`.
    pub temporary: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Table name.
    pub name: ObjectName,
    /// Definition.
    pub body: CreateTableBody,
}

impl fmt::Display for CreateTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.temporary {
            f.write_str("TEMPORARY ")?;
        }
        f.write_str("TABLE ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)?;
        match &self.body {
            CreateTableBody::Columns {
                columns,
                constraints,
            } => {
                write!(f, " ({}", comma(columns))?;
                for constraint in constraints {
                    write!(f, ", {constraint}")?;
                }
                f.write_str(")")
            }
            CreateTableBody::AsQuery(query) => write!(f, " AS {query}"),
        }
    }
}

/// A CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndexStatement {
    /// `UNIQUE`.
    pub unique: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Index name.
    pub name: ObjectName,
    /// Indexed table.
    pub table: ObjectName,
    /// Indexed columns with optional direction.
    pub columns: Vec<OrderBy>,
}

impl fmt::Display for CreateIndexStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.unique {
            f.write_str("UNIQUE ")?;
        }
        f.write_str("INDEX ")?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(
            f,
            "{} ON {} ({})",
            self.name,
            self.table,
            comma(&self.columns)
        )
    }
}

/// A CREATE VIEW statement.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateViewStatement {
    /// `OR REPLACE`.
    pub or_replace: bool,
    /// View name.
    pub name: ObjectName,
    /// Optional column names.
    pub columns: Vec<String>,
    /// The defining query.
    pub query: Box<Query>,
}

impl fmt::Display for CreateViewStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CREATE ")?;
        if self.or_replace {
            f.write_str("OR REPLACE ")?;
        }
        write!(f, "VIEW {}", self.name)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", IdentList(&self.columns))?;
        }
        write!(f, " AS {}", self.query)
    }
}

/// Kinds of schema objects that can be created or dropped by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    /// `TABLE`
    Table,
    /// `VIEW`
    View,
    /// `INDEX`
    Index,
    /// `DATABASE`
    Database,
    /// `SCHEMA`
    Schema,
}

impl ObjectType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::View => "VIEW",
            Self::Index => "INDEX",
            Self::Database => "DATABASE",
            Self::Schema => "SCHEMA",
        }
    }
}

/// `CREATE DATABASE` or `CREATE SCHEMA`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDatabaseStatement {
    /// Either [`ObjectType::Database`] or [`ObjectType::Schema`].
    pub object_type: ObjectType,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Database name.
    pub name: ObjectName,
}

impl fmt::Display for CreateDatabaseStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CREATE {} ", self.object_type.as_str())?;
        if self.if_not_exists {
            f.write_str("IF NOT EXISTS ")?;
        }
        write!(f, "{}", self.name)
    }
}

/// `CASCADE` or `RESTRICT` on DROP and REVOKE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropBehavior {
    /// `CASCADE`
    Cascade,
    /// `RESTRICT`
    Restrict,
}

impl DropBehavior {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
        }
    }
}

/// A DROP statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropStatement {
    /// What is dropped.
    pub object_type: ObjectType,
    /// `IF EXISTS`.
    pub if_exists: bool,
    /// Dropped objects.
    pub names: Vec<ObjectName>,
    /// `CASCADE` / `RESTRICT`.
    pub behavior: Option<DropBehavior>,
}

impl fmt::Display for DropStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DROP {} ", self.object_type.as_str())?;
        if self.if_exists {
            f.write_str("IF EXISTS ")?;
        }
        write!(f, "{}", comma(&self.names))?;
        if let Some(behavior) = self.behavior {
            write!(f, " {}", behavior.as_str())?;
        }
        Ok(())
    }
}

/// A change to an existing column in `ALTER TABLE ... ALTER COLUMN`.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterColumnAction {
    /// `[SET DATA] TYPE type`, or a bare type.
    SetDataType(DataType),
    /// `SET DEFAULT expr`
    SetDefault(Expr),
    /// `DROP DEFAULT`
    DropDefault,
    /// `SET NOT NULL`
    SetNotNull,
    /// `DROP NOT NULL`
    DropNotNull,
}

impl fmt::Display for AlterColumnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetDataType(data_type) => write!(f, "TYPE {data_type}"),
            Self::SetDefault(expr) => write!(f, "SET DEFAULT {expr}"),
            Self::DropDefault => f.write_str("DROP DEFAULT"),
            Self::SetNotNull => f.write_str("SET NOT NULL"),
            Self::DropNotNull => f.write_str("DROP NOT NULL"),
        }
    }
}

/// One operation of an ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableOperation {
    /// `ADD [COLUMN] def`
    AddColumn(ColumnDef),
    /// `ADD [CONSTRAINT n] constraint`
    AddConstraint(TableConstraint),
    /// `DROP [COLUMN] [IF EXISTS] name`
    DropColumn {
        /// Column name.
        name: String,
        /// `IF EXISTS`.
        if_exists: bool,
    },
    /// `RENAME TO name`
    RenameTable(ObjectName),
    /// `RENAME [COLUMN] old TO new`
    RenameColumn {
        /// Current name.
        old: String,
        /// New name.
        new: String,
    },
    /// `ALTER [COLUMN] name action`
    AlterColumn {
        /// Column name.
        name: String,
        /// The change.
        action: AlterColumnAction,
    },
    /// `MODIFY [COLUMN] def` (MySQL)
    ModifyColumn(ColumnDef),
}

impl fmt::Display for AlterTableOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddColumn(column) => write!(f, "ADD COLUMN {column}"),
            Self::AddConstraint(constraint) => write!(f, "ADD {constraint}"),
            Self::DropColumn { name, if_exists } => {
                f.write_str("DROP COLUMN ")?;
                if *if_exists {
                    f.write_str("IF EXISTS ")?;
                }
                write!(f, "{}", Ident(name))
            }
            Self::RenameTable(name) => write!(f, "RENAME TO {name}"),
            Self::RenameColumn { old, new } => {
                write!(f, "RENAME COLUMN {} TO {}", Ident(old), Ident(new))
            }
            Self::AlterColumn { name, action } => {
                write!(f, "ALTER COLUMN {} {action}", Ident(name))
            }
            Self::ModifyColumn(column) => write!(f, "MODIFY COLUMN {column}"),
        }
    }
}

/// An ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTableStatement {
    /// Table name.
    pub name: ObjectName,
    /// Operations, applied in order.
    pub operations: Vec<AlterTableOperation>,
}

impl fmt::Display for AlterTableStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ALTER TABLE {} {}", self.name, comma(&self.operations))
    }
}

/// Privileges named in GRANT and REVOKE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Privileges {
    /// `ALL [PRIVILEGES]`
    All,
    /// Individual privileges, upper-cased.
    Actions(Vec<String>),
}

impl fmt::Display for Privileges {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("ALL PRIVILEGES"),
            Self::Actions(actions) => write!(f, "{}", comma(actions)),
        }
    }
}

/// The receiver of a privilege.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grantee {
    /// A role or user name, including `PUBLIC`.
    Name(String),
    /// MySQL `'user'@'host'`.
    UserHost {
        /// User part.
        user: String,
        /// Host part.
        host: String,
    },
}

impl fmt::Display for Grantee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{}", Ident(name)),
            Self::UserHost { user, host } => {
                write!(f, "{}@{}", QuotedString(user), QuotedString(host))
            }
        }
    }
}

/// A GRANT statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantStatement {
    /// Granted privileges.
    pub privileges: Privileges,
    /// Target object; the last part may be `*`.
    pub object: ObjectName,
    /// Receivers.
    pub grantees: Vec<Grantee>,
    /// `WITH GRANT OPTION`.
    pub with_grant_option: bool,
}

impl fmt::Display for GrantStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GRANT {} ON {} TO {}",
            self.privileges,
            self.object,
            comma(&self.grantees)
        )?;
        if self.with_grant_option {
            f.write_str(" WITH GRANT OPTION")?;
        }
        Ok(())
    }
}

/// A REVOKE statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevokeStatement {
    /// Revoked privileges.
    pub privileges: Privileges,
    /// Target object.
    pub object: ObjectName,
    /// Users losing the privileges.
    pub grantees: Vec<Grantee>,
    /// `CASCADE` / `RESTRICT`.
    pub behavior: Option<DropBehavior>,
}

impl fmt::Display for RevokeStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "REVOKE {} ON {} FROM {}",
            self.privileges,
            self.object,
            comma(&self.grantees)
        )?;
        if let Some(behavior) = self.behavior {
            write!(f, " {}", behavior.as_str())?;
        }
        Ok(())
    }
}

/// Transaction control statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatement {
    /// `BEGIN [TRANSACTION|WORK]`
    Begin,
    /// `START TRANSACTION`
    Start,
    /// `COMMIT [WORK]`
    Commit,
    /// `ROLLBACK [WORK] [TO [SAVEPOINT] name]`
    Rollback {
        /// Savepoint to roll back to.
        savepoint: Option<String>,
    },
    /// `SAVEPOINT name`
    Savepoint(String),
    /// `RELEASE [SAVEPOINT] name`
    Release(String),
}

impl fmt::Display for TransactionStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Begin => f.write_str("BEGIN"),
            Self::Start => f.write_str("START TRANSACTION"),
            Self::Commit => f.write_str("COMMIT"),
            Self::Rollback { savepoint: None } => f.write_str("ROLLBACK"),
            Self::Rollback {
                savepoint: Some(name),
            } => write!(f, "ROLLBACK TO SAVEPOINT {}", Ident(name)),
            Self::Savepoint(name) => write!(f, "SAVEPOINT {}", Ident(name)),
            Self::Release(name) => write!(f, "RELEASE SAVEPOINT {}", Ident(name)),
        }
    }
}

/// The statement families SQL tutorials group statements into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatementCategory {
    /// Data query language.
    Dql,
    /// Data manipulation language.
    Dml,
    /// Data definition language.
    Ddl,
    /// Data control language.
    Dcl,
    /// Transaction control language.
    Tcl,
}

impl StatementCategory {
    /// Returns the conventional abbreviation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Dql => "DQL",
            Self::Dml => "DML",
            Self::Ddl => "DDL",
            Self::Dcl => "DCL",
            Self::Tcl => "TCL",
        }
    }
}

impl fmt::Display for StatementCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A query (`SELECT`, `WITH`, set operations).
    Query(Box<Query>),
    /// INSERT statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
    /// CREATE TABLE statement.
    CreateTable(CreateTableStatement),
    /// CREATE INDEX statement.
    CreateIndex(CreateIndexStatement),
    /// CREATE VIEW statement.
    CreateView(CreateViewStatement),
    /// CREATE DATABASE / SCHEMA statement.
    CreateDatabase(CreateDatabaseStatement),
    /// DROP statement.
    Drop(DropStatement),
    /// ALTER TABLE statement.
    AlterTable(AlterTableStatement),
    /// `TRUNCATE [TABLE] name`
    Truncate(ObjectName),
    /// `USE database`
    Use(String),
    /// GRANT statement.
    Grant(GrantStatement),
    /// REVOKE statement.
    Revoke(RevokeStatement),
    /// Transaction control.
    Transaction(TransactionStatement),
}

impl Statement {
    /// Returns the family this statement belongs to.
    #[must_use]
    pub const fn category(&self) -> StatementCategory {
        match self {
            Self::Query(_) => StatementCategory::Dql,
            Self::Insert(_) | Self::Update(_) | Self::Delete(_) => StatementCategory::Dml,
            Self::CreateTable(_)
            | Self::CreateIndex(_)
            | Self::CreateView(_)
            | Self::CreateDatabase(_)
            | Self::Drop(_)
            | Self::AlterTable(_)
            | Self::Truncate(_)
            | Self::Use(_) => StatementCategory::Ddl,
            Self::Grant(_) | Self::Revoke(_) => StatementCategory::Dcl,
            Self::Transaction(_) => StatementCategory::Tcl,
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Query(query) => write!(f, "{query}"),
            Self::Insert(stmt) => write!(f, "{stmt}"),
            Self::Update(stmt) => write!(f, "{stmt}"),
            Self::Delete(stmt) => write!(f, "{stmt}"),
            Self::CreateTable(stmt) => write!(f, "{stmt}"),
            Self::CreateIndex(stmt) => write!(f, "{stmt}"),
            Self::CreateView(stmt) => write!(f, "{stmt}"),
            Self::CreateDatabase(stmt) => write!(f, "{stmt}"),
            Self::Drop(stmt) => write!(f, "{stmt}"),
            Self::AlterTable(stmt) => write!(f, "{stmt}"),
            Self::Truncate(name) => write!(f, "TRUNCATE TABLE {name}"),
            Self::Use(name) => write!(f, "USE {}", Ident(name)),
            Self::Grant(stmt) => write!(f, "{stmt}"),
            Self::Revoke(stmt) => write!(f, "{stmt}"),
            Self::Transaction(stmt) => write!(f, "{stmt}"),
        }
    }
}

/// Renders statements as a script, one per line, each terminated by `;`.
#[must_use]
pub fn render_script(statements: &[Statement]) -> String {
    let mut out = Separated(statements, ";\n").to_string();
    if !out.is_empty() {
        out.push(';');
    }
    out
}
