//! # sqldoc
//!
//! Validates the SQL examples in markdown documentation.
//!
//! A document goes through three stages:
//! - [`Extractor`] yields the fenced code blocks tagged as SQL
//! - [`SyntaxChecker`] parses each block with `sqldoc-core`
//! - [`Linter`] checks the document structure and the examples
//!
//! The results are collected into a [`Report`].
//!
//! ```rust
//! use sqldoc::{Config, Validator};
//!
//! let validator = Validator::new(&Config::default()).unwrap();
//! let doc = validator.check_str(
//!     "tutorial.md",
//!     "# Select\n\n```sql\nSELECT name FROM customers;\n```\n",
//! );
//! assert_eq!(doc.examples.len(), 1);
//! assert!(!doc.examples[0].is_failed());
//! ```

pub mod checker;
pub mod config;
pub mod document;
pub mod error;
pub mod extractor;
pub mod lint;
pub mod report;

use std::path::{Path, PathBuf};

use tracing::info;

pub use checker::{CheckOptions, ExampleResult, ExampleStatus, SnippetError, SyntaxChecker};
pub use config::{Config, LintConfig};
pub use document::{Document, Heading, Link};
pub use error::{Result, SqlDocError};
pub use extractor::{CodeBlock, Extractor};
pub use lint::{Diagnostic, Linter, Rule, Severity};
pub use report::{DocumentReport, Report, Summary};

/// Checks documents against one configuration.
#[derive(Debug)]
pub struct Validator {
    languages: Vec<String>,
    checker: SyntaxChecker,
    linter: Linter,
}

impl Validator {
    /// Builds a validator from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SqlDocError::UnknownDialect`] if the dialect is unknown.
    pub fn new(config: &Config) -> Result<Self> {
        let dialect = config.resolve_dialect()?;
        Ok(Self {
            languages: config.languages.clone(),
            checker: SyntaxChecker::new(dialect, CheckOptions::from(config)),
            linter: Linter::new(config.lints),
        })
    }

    /// Returns the checker used for examples.
    #[must_use]
    pub const fn checker(&self) -> &SyntaxChecker {
        &self.checker
    }

    /// Returns the SQL blocks of a document.
    #[must_use]
    pub fn extract<'a>(&self, markdown: &'a str) -> Extractor<'a> {
        Extractor::new(markdown, &self.languages)
    }

    /// Checks markdown text; `path` is only used to label the report.
    #[must_use]
    pub fn check_str(&self, path: impl Into<PathBuf>, markdown: &str) -> DocumentReport {
        let path = path.into();
        let mut diagnostics = self.linter.lint_document(&Document::parse(markdown));
        let mut examples = vec![];

        for block in self.extract(markdown) {
            let result = self.checker.check(&block);
            diagnostics.extend(self.linter.lint_example(&block, &result));
            examples.push(result);
        }
        diagnostics.sort_by_key(|d| (d.line, d.column));

        info!(
            path = %path.display(),
            examples = examples.len(),
            failed = examples.iter().filter(|e| e.is_failed()).count(),
            diagnostics = diagnostics.len(),
            "checked document"
        );
        DocumentReport {
            path,
            examples,
            diagnostics,
        }
    }

    /// Reads and checks a markdown file.
    ///
    /// # Errors
    ///
    /// Returns [`SqlDocError::Io`] if the file cannot be read.
    pub fn check_file(&self, path: &Path) -> Result<DocumentReport> {
        let markdown = read_document(path)?;
        Ok(self.check_str(path, &markdown))
    }

    /// Checks several files into one report.
    ///
    /// # Errors
    ///
    /// Stops at the first file that cannot be read.
    pub fn check_files<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Report> {
        let mut report = Report::default();
        for path in paths {
            report.push(self.check_file(path.as_ref())?);
        }
        Ok(report)
    }
}

/// Reads a document into memory.
///
/// # Errors
///
/// Returns [`SqlDocError::Io`] if the file cannot be read.
pub fn read_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| SqlDocError::Io {
        path: path.to_path_buf(),
        source,
    })
}
