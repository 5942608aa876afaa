//! PostgreSQL dialect.

use super::Dialect;

/// PostgreSQL: standard quoting plus `expr::type` casts.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn supports_double_colon_cast(&self) -> bool {
        true
    }
}
