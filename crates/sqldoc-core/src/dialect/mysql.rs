//! MySQL / MariaDB dialect.

use super::Dialect;

/// MySQL: backtick identifiers, `#` comments and `LIMIT offset, count`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn identifier_close(&self, open: char) -> Option<char> {
        match open {
            '`' => Some('`'),
            '"' => Some('"'),
            _ => None,
        }
    }

    fn supports_hash_comments(&self) -> bool {
        true
    }

    fn supports_limit_comma(&self) -> bool {
        true
    }

    fn quote_identifier(&self, name: &str) -> String {
        format!("`{}`", name.replace('`', "``"))
    }
}
