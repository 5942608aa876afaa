//! Token types for the SQL lexer.

use std::fmt;

use super::Span;

/// SQL keywords recognized by the lexer.
///
/// Function names and data type names are deliberately *not* keywords:
/// they lex as identifiers and are interpreted by the parser, so that
/// tutorial tables can have columns called `date`, `name` or `count`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Queries
    Select,
    From,
    Where,
    Group,
    By,
    Having,
    Order,
    Limit,
    Offset,
    Distinct,
    All,
    As,
    With,
    Recursive,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    Natural,
    On,
    Using,

    // Set operations
    Union,
    Intersect,
    Except,

    // Data manipulation
    Insert,
    Into,
    Values,
    Update,
    Set,
    Delete,
    Truncate,

    // Data definition
    Create,
    Drop,
    Alter,
    Table,
    Index,
    View,
    Database,
    Schema,
    Add,
    Column,
    Rename,
    Modify,
    To,
    If,
    Temp,
    Temporary,
    Replace,
    Use,

    // Constraints
    Constraint,
    Primary,
    Foreign,
    Key,
    References,
    Unique,
    Check,
    Default,
    Cascade,
    Restrict,
    No,
    Action,
    Autoincrement,
    AutoIncrement,

    // Operators and predicates
    And,
    Or,
    Not,
    In,
    Between,
    Like,
    Escape,
    Is,
    Null,
    True,
    False,
    Exists,
    Any,
    Some,

    // Expressions
    Case,
    When,
    Then,
    Else,
    End,
    Cast,
    Over,
    Partition,

    // Ordering
    Asc,
    Desc,
    Nulls,
    First,
    Last,

    // Access control
    Grant,
    Revoke,
    Privileges,
    Option,

    // Transactions
    Begin,
    Start,
    Transaction,
    Work,
    Commit,
    Rollback,
    Savepoint,
    Release,
}

impl Keyword {
    /// Every keyword, in declaration order.
    pub const ALL: &'static [Self] = &[
        Self::Select,
        Self::From,
        Self::Where,
        Self::Group,
        Self::By,
        Self::Having,
        Self::Order,
        Self::Limit,
        Self::Offset,
        Self::Distinct,
        Self::All,
        Self::As,
        Self::With,
        Self::Recursive,
        Self::Join,
        Self::Inner,
        Self::Left,
        Self::Right,
        Self::Full,
        Self::Outer,
        Self::Cross,
        Self::Natural,
        Self::On,
        Self::Using,
        Self::Union,
        Self::Intersect,
        Self::Except,
        Self::Insert,
        Self::Into,
        Self::Values,
        Self::Update,
        Self::Set,
        Self::Delete,
        Self::Truncate,
        Self::Create,
        Self::Drop,
        Self::Alter,
        Self::Table,
        Self::Index,
        Self::View,
        Self::Database,
        Self::Schema,
        Self::Add,
        Self::Column,
        Self::Rename,
        Self::Modify,
        Self::To,
        Self::If,
        Self::Temp,
        Self::Temporary,
        Self::Replace,
        Self::Use,
        Self::Constraint,
        Self::Primary,
        Self::Foreign,
        Self::Key,
        Self::References,
        Self::Unique,
        Self::Check,
        Self::Default,
        Self::Cascade,
        Self::Restrict,
        Self::No,
        Self::Action,
        Self::Autoincrement,
        Self::AutoIncrement,
        Self::And,
        Self::Or,
        Self::Not,
        Self::In,
        Self::Between,
        Self::Like,
        Self::Escape,
        Self::Is,
        Self::Null,
        Self::True,
        Self::False,
        Self::Exists,
        Self::Any,
        Self::Some,
        Self::Case,
        Self::When,
        Self::Then,
        Self::Else,
        Self::End,
        Self::Cast,
        Self::Over,
        Self::Partition,
        Self::Asc,
        Self::Desc,
        Self::Nulls,
        Self::First,
        Self::Last,
        Self::Grant,
        Self::Revoke,
        Self::Privileges,
        Self::Option,
        Self::Begin,
        Self::Start,
        Self::Transaction,
        Self::Work,
        Self::Commit,
        Self::Rollback,
        Self::Savepoint,
        Self::Release,
    ];

    /// Looks a keyword up by name, ignoring ASCII case.
    #[must_use]
    pub fn lookup(word: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kw| kw.as_str().eq_ignore_ascii_case(word))
    }

    /// Returns the canonical upper-case spelling.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Group => "GROUP",
            Self::By => "BY",
            Self::Having => "HAVING",
            Self::Order => "ORDER",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::As => "AS",
            Self::With => "WITH",
            Self::Recursive => "RECURSIVE",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::Natural => "NATURAL",
            Self::On => "ON",
            Self::Using => "USING",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::Insert => "INSERT",
            Self::Into => "INTO",
            Self::Values => "VALUES",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Delete => "DELETE",
            Self::Truncate => "TRUNCATE",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Alter => "ALTER",
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::View => "VIEW",
            Self::Database => "DATABASE",
            Self::Schema => "SCHEMA",
            Self::Add => "ADD",
            Self::Column => "COLUMN",
            Self::Rename => "RENAME",
            Self::Modify => "MODIFY",
            Self::To => "TO",
            Self::If => "IF",
            Self::Temp => "TEMP",
            Self::Temporary => "TEMPORARY",
            Self::Replace => "REPLACE",
            Self::Use => "USE",
            Self::Constraint => "CONSTRAINT",
            Self::Primary => "PRIMARY",
            Self::Foreign => "FOREIGN",
            Self::Key => "KEY",
            Self::References => "REFERENCES",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
            Self::Default => "DEFAULT",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::No => "NO",
            Self::Action => "ACTION",
            Self::Autoincrement => "AUTOINCREMENT",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::In => "IN",
            Self::Between => "BETWEEN",
            Self::Like => "LIKE",
            Self::Escape => "ESCAPE",
            Self::Is => "IS",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Exists => "EXISTS",
            Self::Any => "ANY",
            Self::Some => "SOME",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Then => "THEN",
            Self::Else => "ELSE",
            Self::End => "END",
            Self::Cast => "CAST",
            Self::Over => "OVER",
            Self::Partition => "PARTITION",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::First => "FIRST",
            Self::Last => "LAST",
            Self::Grant => "GRANT",
            Self::Revoke => "REVOKE",
            Self::Privileges => "PRIVILEGES",
            Self::Option => "OPTION",
            Self::Begin => "BEGIN",
            Self::Start => "START",
            Self::Transaction => "TRANSACTION",
            Self::Work => "WORK",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::Savepoint => "SAVEPOINT",
            Self::Release => "RELEASE",
        }
    }

    /// Returns true if the keyword can never be used as a bare identifier.
    ///
    /// Non-reserved keywords (`KEY`, `FIRST`, `INDEX`, ...) are accepted
    /// wherever the grammar expects a name.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Select
                | Self::From
                | Self::Where
                | Self::Group
                | Self::By
                | Self::Having
                | Self::Order
                | Self::Limit
                | Self::Offset
                | Self::Distinct
                | Self::All
                | Self::As
                | Self::With
                | Self::Join
                | Self::Inner
                | Self::Left
                | Self::Right
                | Self::Full
                | Self::Outer
                | Self::Cross
                | Self::Natural
                | Self::On
                | Self::Using
                | Self::Union
                | Self::Intersect
                | Self::Except
                | Self::Insert
                | Self::Into
                | Self::Values
                | Self::Update
                | Self::Set
                | Self::Delete
                | Self::Create
                | Self::Drop
                | Self::Alter
                | Self::Table
                | Self::To
                | Self::Constraint
                | Self::Primary
                | Self::Foreign
                | Self::References
                | Self::Unique
                | Self::Check
                | Self::Default
                | Self::And
                | Self::Or
                | Self::Not
                | Self::In
                | Self::Between
                | Self::Like
                | Self::Is
                | Self::Null
                | Self::True
                | Self::False
                | Self::Exists
                | Self::Case
                | Self::When
                | Self::Then
                | Self::Else
                | Self::End
                | Self::Cast
                | Self::Grant
                | Self::Revoke
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The kind of token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    /// Numeric literal, kept as written (`42`, `3.14`, `.5`, `1e10`).
    Number(String),
    /// String literal with quotes removed and `''` unescaped.
    String(String),
    /// Hex blob literal (`X'CAFE'`).
    Blob(Vec<u8>),
    /// Bare or quoted identifier.
    Identifier {
        /// The identifier text, unescaped.
        value: String,
        /// Whether the identifier was delimited by quotes.
        quoted: bool,
    },
    /// SQL keyword.
    Keyword(Keyword),
    /// Parameter placeholder, kept as written (`?`, `:name`, `@name`, `$1`).
    Placeholder(String),

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `=` or `==`
    Eq,
    /// `!=` or `<>`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    LtEq,
    /// `>`
    Gt,
    /// `>=`
    GtEq,
    /// `||`
    Concat,
    /// `&`
    BitAnd,
    /// `|`
    BitOr,
    /// `~`
    BitNot,
    /// `<<`
    LeftShift,
    /// `>>`
    RightShift,

    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `::`
    DoubleColon,
    /// `@` not followed by a name
    At,

    /// End of input.
    Eof,
    /// A lexical error, with a description.
    Error(String),
}

impl TokenKind {
    /// Creates an unquoted identifier token kind.
    #[must_use]
    pub fn ident(value: impl Into<String>) -> Self {
        Self::Identifier {
            value: value.into(),
            quoted: false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "number {n}"),
            Self::String(s) => write!(f, "string '{s}'"),
            Self::Blob(_) => f.write_str("blob literal"),
            Self::Identifier { value, .. } => write!(f, "identifier `{value}`"),
            Self::Keyword(kw) => write!(f, "keyword {kw}"),
            Self::Placeholder(p) => write!(f, "parameter {p}"),
            Self::Plus => f.write_str("`+`"),
            Self::Minus => f.write_str("`-`"),
            Self::Star => f.write_str("`*`"),
            Self::Slash => f.write_str("`/`"),
            Self::Percent => f.write_str("`%`"),
            Self::Eq => f.write_str("`=`"),
            Self::NotEq => f.write_str("`<>`"),
            Self::Lt => f.write_str("`<`"),
            Self::LtEq => f.write_str("`<=`"),
            Self::Gt => f.write_str("`>`"),
            Self::GtEq => f.write_str("`>=`"),
            Self::Concat => f.write_str("`||`"),
            Self::BitAnd => f.write_str("`&`"),
            Self::BitOr => f.write_str("`|`"),
            Self::BitNot => f.write_str("`~`"),
            Self::LeftShift => f.write_str("`<<`"),
            Self::RightShift => f.write_str("`>>`"),
            Self::LeftParen => f.write_str("`(`"),
            Self::RightParen => f.write_str("`)`"),
            Self::Comma => f.write_str("`,`"),
            Self::Semicolon => f.write_str("`;`"),
            Self::Dot => f.write_str("`.`"),
            Self::DoubleColon => f.write_str("`::`"),
            Self::At => f.write_str("`@`"),
            Self::Eof => f.write_str("end of input"),
            Self::Error(message) => f.write_str(message),
        }
    }
}

/// A token with its location in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Where the token appears in the source.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Returns true if this is the end-of-input token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_lookup_ignores_case() {
        assert_eq!(Keyword::lookup("SELECT"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("select"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("AUTO_INCREMENT"), Some(Keyword::AutoIncrement));
        assert_eq!(Keyword::lookup("customers"), None);
    }

    #[test]
    fn test_every_keyword_round_trips_through_lookup() {
        for kw in Keyword::ALL {
            assert_eq!(Keyword::lookup(kw.as_str()), Some(*kw), "{kw}");
        }
    }

    #[test]
    fn test_function_and_type_names_are_not_keywords() {
        for word in ["count", "sum", "varchar", "date", "name", "coalesce"] {
            assert_eq!(Keyword::lookup(word), None, "{word}");
        }
    }

    #[test]
    fn test_reserved_split() {
        assert!(Keyword::Select.is_reserved());
        assert!(Keyword::Left.is_reserved());
        assert!(!Keyword::Key.is_reserved());
        assert!(!Keyword::First.is_reserved());
        assert!(!Keyword::Index.is_reserved());
    }

    #[test]
    fn test_token_as_keyword() {
        let select = Token::new(TokenKind::Keyword(Keyword::Select), Span::new(0, 6));
        let plus = Token::new(TokenKind::Plus, Span::new(0, 1));
        assert_eq!(select.as_keyword(), Some(Keyword::Select));
        assert_eq!(plus.as_keyword(), None);
        assert!(Token::new(TokenKind::Eof, Span::default()).is_eof());
    }
}
