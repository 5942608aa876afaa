//! Error types for document validation.
//!
//! SQL that fails to parse is not an error here: it is recorded in the
//! report as a failed example.

use std::path::PathBuf;

use sqldoc_core::dialect::DIALECT_NAMES;

/// Errors that can occur while validating documents.
#[derive(Debug, thiserror::Error)]
pub enum SqlDocError {
    /// A document or configuration file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML or has unknown keys.
    #[error("invalid configuration in {}: {source}", .path.display())]
    Config {
        /// The configuration file.
        path: PathBuf,
        /// The TOML error.
        #[source]
        source: toml::de::Error,
    },

    /// A dialect name that no dialect answers to.
    #[error(
        "unknown dialect '{name}' (expected one of: {names})",
        name = .0,
        names = DIALECT_NAMES.join(", ")
    )]
    UnknownDialect(String),

    /// Writing a JSON report failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for validation operations.
pub type Result<T> = std::result::Result<T, SqlDocError>;
