//! SQL dialect support.
//!
//! Tutorials are written against a particular database. A dialect toggles the
//! handful of lexical and syntactic features that differ between them; the
//! grammar itself is shared.

mod generic;
mod mysql;
mod postgres;
mod sqlite;

pub use generic::GenericDialect;
pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: std::fmt::Debug {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the closing delimiter if `open` starts a quoted identifier.
    fn identifier_close(&self, open: char) -> Option<char> {
        (open == '"').then_some('"')
    }

    /// Whether `# ...` starts a line comment.
    fn supports_hash_comments(&self) -> bool {
        false
    }

    /// Whether `expr::type` casts are allowed.
    fn supports_double_colon_cast(&self) -> bool {
        false
    }

    /// Whether `LIMIT offset, count` is allowed.
    fn supports_limit_comma(&self) -> bool {
        false
    }

    /// Quotes an identifier using the dialect's preferred delimiter.
    fn quote_identifier(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

/// Names accepted by [`dialect_for_name`].
pub const DIALECT_NAMES: &[&str] = &["generic", "mysql", "postgres", "sqlite"];

/// Returns the dialect with the given name (case-insensitive).
///
/// `postgresql` and `ansi` are accepted as aliases.
#[must_use]
pub fn dialect_for_name(name: &str) -> Option<Box<dyn Dialect>> {
    match name.to_ascii_lowercase().as_str() {
        "generic" | "ansi" => Some(Box::new(GenericDialect)),
        "mysql" | "mariadb" => Some(Box::new(MySqlDialect)),
        "postgres" | "postgresql" => Some(Box::new(PostgresDialect)),
        "sqlite" => Some(Box::new(SqliteDialect)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_for_name() {
        assert_eq!(dialect_for_name("MySQL").unwrap().name(), "mysql");
        assert_eq!(dialect_for_name("postgresql").unwrap().name(), "postgres");
        assert_eq!(dialect_for_name("ansi").unwrap().name(), "generic");
        assert!(dialect_for_name("oracle").is_none());
    }

    #[test]
    fn test_every_listed_name_resolves() {
        for name in DIALECT_NAMES {
            assert_eq!(dialect_for_name(name).unwrap().name(), *name);
        }
    }
}
