//! Aggregated results and their text and JSON renderings.

use std::io::{self, Write};
use std::path::PathBuf;

use serde::Serialize;

use crate::checker::{ExampleResult, ExampleStatus};
use crate::lint::{Diagnostic, Severity};

/// Results for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentReport {
    pub path: PathBuf,
    pub examples: Vec<ExampleResult>,
    pub diagnostics: Vec<Diagnostic>,
}

impl DocumentReport {
    fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

/// Results for every checked document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub documents: Vec<DocumentReport>,
}

/// Totals over a [`Report`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub documents: usize,
    pub examples: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub lint_errors: usize,
    pub lint_warnings: usize,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    documents: &'a [DocumentReport],
    summary: Summary,
}

impl Report {
    pub fn push(&mut self, document: DocumentReport) {
        self.documents.push(document);
    }

    /// Counts examples by status and diagnostics by severity.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            documents: self.documents.len(),
            ..Summary::default()
        };
        for doc in &self.documents {
            for example in &doc.examples {
                summary.examples += 1;
                match example.status {
                    ExampleStatus::Passed { .. } => summary.passed += 1,
                    ExampleStatus::Failed { .. } => summary.failed += 1,
                    ExampleStatus::Skipped { .. } => summary.skipped += 1,
                }
            }
            summary.lint_errors += doc.count(Severity::Error);
            summary.lint_warnings += doc.count(Severity::Warning);
        }
        summary
    }

    /// Returns true if the run should fail: an example failed or an error
    /// diagnostic fired, or under `strict` any warning fired.
    #[must_use]
    pub fn has_failures(&self, strict: bool) -> bool {
        let summary = self.summary();
        summary.failed > 0 || summary.lint_errors > 0 || (strict && summary.lint_warnings > 0)
    }

    /// Writes a human-readable report.
    ///
    /// Passing and skipped examples are listed only when `verbose` is set.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn render_text(&self, out: &mut impl Write, verbose: bool) -> io::Result<()> {
        for doc in &self.documents {
            let path = doc.path.display();
            for example in &doc.examples {
                match &example.status {
                    ExampleStatus::Passed { statements } => {
                        if verbose {
                            writeln!(
                                out,
                                "ok    {path}:{} ({} example, {statements} statement{})",
                                example.line,
                                example.language,
                                plural(*statements)
                            )?;
                        }
                    }
                    ExampleStatus::Skipped { reason } => {
                        if verbose {
                            writeln!(out, "skip  {path}:{} ({reason})", example.line)?;
                        }
                    }
                    ExampleStatus::Failed { errors } => {
                        writeln!(out, "FAIL  {path}:{} ({} example)", example.line, example.language)?;
                        for err in errors {
                            writeln!(out, "      {path}:{}:{}: {}", err.line, err.column, err.message)?;
                        }
                    }
                }
            }
            for diag in &doc.diagnostics {
                writeln!(
                    out,
                    "{}: {path}:{}:{}: {} [{}]",
                    diag.severity, diag.line, diag.column, diag.message, diag.rule
                )?;
            }
        }

        let s = self.summary();
        writeln!(
            out,
            "{} document{}, {} example{}: {} passed, {} failed, {} skipped; {} lint error{}, {} warning{}",
            s.documents,
            plural(s.documents),
            s.examples,
            plural(s.examples),
            s.passed,
            s.failed,
            s.skipped,
            s.lint_errors,
            plural(s.lint_errors),
            s.lint_warnings,
            plural(s.lint_warnings)
        )
    }

    /// Writes the report and its summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn render_json(&self, out: &mut impl Write) -> crate::Result<()> {
        let json = JsonReport {
            documents: &self.documents,
            summary: self.summary(),
        };
        serde_json::to_writer_pretty(&mut *out, &json)?;
        writeln!(out).map_err(serde_json::Error::io)?;
        Ok(())
    }
}

const fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
