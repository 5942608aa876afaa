//! Data types, column definitions and constraints.

use std::fmt;

use super::display::{Ident, IdentList};
use super::expression::Expr;
use super::statement::ObjectName;

/// SQL data types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    /// `TINYINT`.
    Tinyint,
    /// `SMALLINT`.
    Smallint,
    /// `INT` / `INTEGER`.
    Integer,
    /// `BIGINT`.
    Bigint,
    /// `REAL`.
    Real,
    /// `DOUBLE` / `DOUBLE PRECISION`.
    Double,
    /// `FLOAT[(p)]`.
    Float(Option<u32>),
    /// `DECIMAL[(p[, s])]` / `DEC`.
    Decimal {
        /// Total number of digits.
        precision: Option<u32>,
        /// Digits after the decimal point.
        scale: Option<u32>,
    },
    /// `NUMERIC[(p[, s])]`.
    Numeric {
        /// Total number of digits.
        precision: Option<u32>,
        /// Digits after the decimal point.
        scale: Option<u32>,
    },
    /// `CHAR[(n)]` / `CHARACTER[(n)]`.
    Char(Option<u32>),
    /// `VARCHAR[(n)]` / `CHARACTER VARYING[(n)]`.
    Varchar(Option<u32>),
    /// `TEXT`.
    Text,
    /// `BLOB`.
    Blob,
    /// `BOOLEAN` / `BOOL`.
    Boolean,
    /// `DATE`.
    Date,
    /// `TIME`.
    Time,
    /// `TIMESTAMP`.
    Timestamp,
    /// `DATETIME`.
    Datetime,
    /// Any other type name, with its numeric arguments.
    Custom {
        /// Type name as written, upper-cased.
        name: String,
        /// Arguments such as the `10` in `NVARCHAR(10)`.
        args: Vec<u32>,
    },
}

impl DataType {
    /// Resolves a type name and its numeric arguments.
    ///
    /// Returns `None` when a known type is given more arguments than it
    /// accepts.
    #[must_use]
    pub fn from_parts(name: &str, args: &[u32]) -> Option<Self> {
        let upper = name.to_ascii_uppercase();
        let no_args = |ty: Self| args.is_empty().then_some(ty);
        let one_arg = |make: fn(Option<u32>) -> Self| {
            (args.len() <= 1).then(|| make(args.first().copied()))
        };
        match upper.as_str() {
            "TINYINT" => no_args(Self::Tinyint),
            "SMALLINT" => no_args(Self::Smallint),
            "INT" | "INTEGER" => no_args(Self::Integer),
            "BIGINT" => no_args(Self::Bigint),
            "REAL" => no_args(Self::Real),
            "DOUBLE" => no_args(Self::Double),
            "FLOAT" => one_arg(Self::Float),
            "DECIMAL" | "DEC" => (args.len() <= 2).then(|| Self::Decimal {
                precision: args.first().copied(),
                scale: args.get(1).copied(),
            }),
            "NUMERIC" => (args.len() <= 2).then(|| Self::Numeric {
                precision: args.first().copied(),
                scale: args.get(1).copied(),
            }),
            "CHAR" | "CHARACTER" => one_arg(Self::Char),
            "VARCHAR" => one_arg(Self::Varchar),
            "TEXT" => no_args(Self::Text),
            "BLOB" => no_args(Self::Blob),
            "BOOLEAN" | "BOOL" => no_args(Self::Boolean),
            "DATE" => no_args(Self::Date),
            "TIME" => no_args(Self::Time),
            "TIMESTAMP" => no_args(Self::Timestamp),
            "DATETIME" => no_args(Self::Datetime),
            _ => Some(Self::Custom {
                name: upper,
                args: args.to_vec(),
            }),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn sized(f: &mut fmt::Formatter<'_>, name: &str, len: Option<u32>) -> fmt::Result {
            match len {
                Some(n) => write!(f, "{name}({n})"),
                None => f.write_str(name),
            }
        }
        fn exact(
            f: &mut fmt::Formatter<'_>,
            name: &str,
            precision: Option<u32>,
            scale: Option<u32>,
        ) -> fmt::Result {
            match (precision, scale) {
                (Some(p), Some(s)) => write!(f, "{name}({p}, {s})"),
                (Some(p), None) => write!(f, "{name}({p})"),
                _ => f.write_str(name),
            }
        }

        match self {
            Self::Tinyint => f.write_str("TINYINT"),
            Self::Smallint => f.write_str("SMALLINT"),
            Self::Integer => f.write_str("INTEGER"),
            Self::Bigint => f.write_str("BIGINT"),
            Self::Real => f.write_str("REAL"),
            Self::Double => f.write_str("DOUBLE PRECISION"),
            Self::Float(p) => sized(f, "FLOAT", *p),
            Self::Decimal { precision, scale } => exact(f, "DECIMAL", *precision, *scale),
            Self::Numeric { precision, scale } => exact(f, "NUMERIC", *precision, *scale),
            Self::Char(n) => sized(f, "CHAR", *n),
            Self::Varchar(n) => sized(f, "VARCHAR", *n),
            Self::Text => f.write_str("TEXT"),
            Self::Blob => f.write_str("BLOB"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Date => f.write_str("DATE"),
            Self::Time => f.write_str("TIME"),
            Self::Timestamp => f.write_str("TIMESTAMP"),
            Self::Datetime => f.write_str("DATETIME"),
            Self::Custom { name, args } => {
                f.write_str(name)?;
                if !args.is_empty() {
                    write!(f, "({})", super::display::comma(args))?;
                }
                Ok(())
            }
        }
    }
}

/// What happens to referencing rows when the referenced row changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferentialAction {
    /// `CASCADE`
    Cascade,
    /// `RESTRICT`
    Restrict,
    /// `SET NULL`
    SetNull,
    /// `SET DEFAULT`
    SetDefault,
    /// `NO ACTION`
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// The target of a foreign key.
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyRef {
    /// Referenced table.
    pub table: ObjectName,
    /// Referenced columns (empty means the primary key).
    pub columns: Vec<String>,
    /// `ON DELETE` action.
    pub on_delete: Option<ReferentialAction>,
    /// `ON UPDATE` action.
    pub on_update: Option<ReferentialAction>,
}

impl fmt::Display for ForeignKeyRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "REFERENCES {}", self.table)?;
        if !self.columns.is_empty() {
            write!(f, " ({})", IdentList(&self.columns))?;
        }
        if let Some(action) = self.on_delete {
            write!(f, " ON DELETE {}", action.as_str())?;
        }
        if let Some(action) = self.on_update {
            write!(f, " ON UPDATE {}", action.as_str())?;
        }
        Ok(())
    }
}

/// A constraint attached to a single column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    /// `PRIMARY KEY [ASC|DESC]`
    PrimaryKey(Option<super::OrderDirection>),
    /// `NOT NULL`
    NotNull,
    /// `NULL`
    Null,
    /// `UNIQUE`
    Unique,
    /// `DEFAULT expr`
    Default(Expr),
    /// `CHECK (expr)`
    Check(Expr),
    /// `REFERENCES table [(cols)] [ON ...]`
    References(ForeignKeyRef),
    /// `AUTOINCREMENT` (SQLite) or `AUTO_INCREMENT` (MySQL).
    AutoIncrement {
        /// True for the MySQL spelling.
        underscore: bool,
    },
}

impl fmt::Display for ColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PrimaryKey(None) => f.write_str("PRIMARY KEY"),
            Self::PrimaryKey(Some(dir)) => write!(f, "PRIMARY KEY {}", dir.as_str()),
            Self::NotNull => f.write_str("NOT NULL"),
            Self::Null => f.write_str("NULL"),
            Self::Unique => f.write_str("UNIQUE"),
            Self::Default(expr) => write!(f, "DEFAULT {expr}"),
            Self::Check(expr) => write!(f, "CHECK ({expr})"),
            Self::References(fk) => write!(f, "{fk}"),
            Self::AutoIncrement { underscore: true } => f.write_str("AUTO_INCREMENT"),
            Self::AutoIncrement { underscore: false } => f.write_str("AUTOINCREMENT"),
        }
    }
}

/// A column constraint with its optional `CONSTRAINT name`.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColumnConstraint {
    /// Constraint name.
    pub name: Option<String>,
    /// The constraint itself.
    pub constraint: ColumnConstraint,
}

impl fmt::Display for NamedColumnConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", Ident(name))?;
        }
        write!(f, "{}", self.constraint)
    }
}

/// A column definition in `CREATE TABLE` or `ALTER TABLE`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Declared type; SQLite allows columns without one.
    pub data_type: Option<DataType>,
    /// Column constraints in declaration order.
    pub constraints: Vec<NamedColumnConstraint>,
}

impl ColumnDef {
    /// Creates a column definition without constraints.
    #[must_use]
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type: Some(data_type),
            constraints: vec![],
        }
    }

    /// Returns true if the column declares a `PRIMARY KEY` constraint.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.constraint, ColumnConstraint::PrimaryKey(_)))
    }
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Ident(&self.name))?;
        if let Some(data_type) = &self.data_type {
            write!(f, " {data_type}")?;
        }
        for constraint in &self.constraints {
            write!(f, " {constraint}")?;
        }
        Ok(())
    }
}

/// A table-level constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    /// `PRIMARY KEY (cols)`
    PrimaryKey(Vec<String>),
    /// `UNIQUE (cols)`
    Unique(Vec<String>),
    /// `CHECK (expr)`
    Check(Expr),
    /// `FOREIGN KEY (cols) REFERENCES ...`
    ForeignKey {
        /// Referencing columns.
        columns: Vec<String>,
        /// Referenced table and columns.
        references: ForeignKeyRef,
    },
}

/// A table-level constraint with its optional `CONSTRAINT name`.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    /// Constraint name.
    pub name: Option<String>,
    /// The constraint itself.
    pub kind: TableConstraintKind,
}

impl fmt::Display for TableConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = &self.name {
            write!(f, "CONSTRAINT {} ", Ident(name))?;
        }
        match &self.kind {
            TableConstraintKind::PrimaryKey(cols) => write!(f, "PRIMARY KEY ({})", IdentList(cols)),
            TableConstraintKind::Unique(cols) => write!(f, "UNIQUE ({})", IdentList(cols)),
            TableConstraintKind::Check(expr) => write!(f, "CHECK ({expr})"),
            TableConstraintKind::ForeignKey {
                columns,
                references,
            } => write!(f, "FOREIGN KEY ({}) {references}", IdentList(columns)),
        }
    }
}
