//! Configuration loaded from `sqldoc.toml`.
//!
//! Every key is optional; a missing file means defaults. Command-line flags
//! are applied on top by the binary.
//!
//! ```toml
//! languages = ["sql", "mysql"]
//! dialect = "mysql"
//! require_semicolon = true
//! skip_attributes = ["ignore"]
//!
//! [lints]
//! heading_skip = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sqldoc_core::dialect::{dialect_for_name, Dialect};
use tracing::debug;

use crate::error::{Result, SqlDocError};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "sqldoc.toml";

/// Validator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Info-string languages that mark a fenced block as SQL.
    pub languages: Vec<String>,
    /// Dialect used to parse examples.
    pub dialect: String,
    /// Whether every statement must end with `;`.
    pub require_semicolon: bool,
    /// Info-string attributes that exclude a block from checking.
    pub skip_attributes: Vec<String>,
    /// Lint rule toggles.
    pub lints: LintConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            languages: ["sql", "mysql", "postgres", "postgresql", "psql", "sqlite"]
                .into_iter()
                .map(String::from)
                .collect(),
            dialect: String::from("generic"),
            require_semicolon: false,
            skip_attributes: ["ignore", "no-check", "skip"]
                .into_iter()
                .map(String::from)
                .collect(),
            lints: LintConfig::default(),
        }
    }
}

/// Enables or disables each lint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Links must target an existing heading anchor.
    pub broken_anchor: bool,
    /// Heading levels must not be skipped.
    pub heading_skip: bool,
    /// SQL blocks must be closed.
    pub unclosed_fence: bool,
    /// SQL blocks must contain a statement.
    pub empty_example: bool,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            broken_anchor: true,
            heading_skip: true,
            unclosed_fence: true,
            empty_example: true,
        }
    }
}

impl Config {
    /// Parses a configuration from TOML text; `path` is used in errors.
    ///
    /// # Errors
    ///
    /// Returns [`SqlDocError::Config`] on invalid TOML or unknown keys.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| SqlDocError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SqlDocError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text, path)?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Finds the configuration to use.
    ///
    /// An explicit path must exist. Otherwise `sqldoc.toml` in `dir` is
    /// used when present, and defaults when not.
    ///
    /// # Errors
    ///
    /// Returns an error if the chosen file cannot be read or is invalid.
    pub fn discover(explicit: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let candidate: PathBuf = dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            debug!("no {CONFIG_FILE_NAME} found, using defaults");
            Ok(Self::default())
        }
    }

    /// Resolves the configured dialect.
    ///
    /// # Errors
    ///
    /// Returns [`SqlDocError::UnknownDialect`] if no dialect has that name.
    pub fn resolve_dialect(&self) -> Result<Box<dyn Dialect>> {
        dialect_for_name(&self.dialect)
            .ok_or_else(|| SqlDocError::UnknownDialect(self.dialect.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = Config::from_toml("", Path::new("sqldoc.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.languages.contains(&"sql".to_string()));
        assert!(config.lints.broken_anchor);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config = Config::from_toml(
            "dialect = \"mysql\"\n[lints]\nheading_skip = false\n",
            Path::new("sqldoc.toml"),
        )
        .unwrap();
        assert_eq!(config.dialect, "mysql");
        assert!(!config.lints.heading_skip);
        assert!(config.lints.unclosed_fence);
        assert_eq!(config.skip_attributes, Config::default().skip_attributes);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = Config::from_toml("dialekt = \"mysql\"", Path::new("conf.toml")).unwrap_err();
        assert!(matches!(err, SqlDocError::Config { .. }));
        assert!(err.to_string().starts_with("invalid configuration in conf.toml"));
    }

    #[test]
    fn test_resolve_dialect() {
        let mut config = Config::default();
        assert_eq!(config.resolve_dialect().unwrap().name(), "generic");
        config.dialect = "db2".into();
        let err = config.resolve_dialect().unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown dialect 'db2' (expected one of: generic, mysql, postgres, sqlite)"
        );
    }
}
