//! SQLite dialect.

use super::Dialect;

/// SQLite accepts every common identifier quoting style.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn identifier_close(&self, open: char) -> Option<char> {
        match open {
            '"' => Some('"'),
            '`' => Some('`'),
            '[' => Some(']'),
            _ => None,
        }
    }

    fn supports_limit_comma(&self) -> bool {
        true
    }
}
