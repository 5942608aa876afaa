//! Documentation-quality checks.

use std::fmt;

use serde::Serialize;

use crate::checker::{ExampleResult, ExampleStatus};
use crate::config::LintConfig;
use crate::document::Document;
use crate::extractor::CodeBlock;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, fails only under `--strict`.
    Warning,
    /// Always fails the check.
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// The lint rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// A link targets an anchor no heading defines.
    BrokenAnchor,
    /// A heading is more than one level deeper than the previous one.
    HeadingSkip,
    /// A SQL block runs to the end of the file.
    UnclosedFence,
    /// A SQL block holds no statement.
    EmptyExample,
}

impl Rule {
    /// Returns the rule name as used in reports.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BrokenAnchor => "broken-anchor",
            Self::HeadingSkip => "heading-skip",
            Self::UnclosedFence => "unclosed-fence",
            Self::EmptyExample => "empty-example",
        }
    }

    /// Returns the severity diagnostics of this rule carry.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::BrokenAnchor | Self::UnclosedFence => Severity::Error,
            Self::HeadingSkip | Self::EmptyExample => Severity::Warning,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A lint finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub rule: Rule,
    pub message: String,
    /// 1-based document line.
    pub line: usize,
    /// 1-based document column.
    pub column: usize,
}

impl Diagnostic {
    fn new(rule: Rule, message: String, line: usize, column: usize) -> Self {
        Self {
            severity: rule.severity(),
            rule,
            message,
            line,
            column,
        }
    }
}

/// Runs the enabled lint rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct Linter {
    config: LintConfig,
}

impl Linter {
    #[must_use]
    pub const fn new(config: LintConfig) -> Self {
        Self { config }
    }

    /// Checks links and heading levels.
    #[must_use]
    pub fn lint_document(&self, doc: &Document) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];

        if self.config.broken_anchor {
            for link in doc.links.iter().filter(|l| !doc.has_anchor(&l.target)) {
                diagnostics.push(Diagnostic::new(
                    Rule::BrokenAnchor,
                    format!("link `{}` targets missing anchor `#{}`", link.text, link.target),
                    link.line,
                    link.column,
                ));
            }
        }

        if self.config.heading_skip {
            for pair in doc.headings.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                if next.level > prev.level + 1 {
                    diagnostics.push(Diagnostic::new(
                        Rule::HeadingSkip,
                        format!(
                            "heading level {} follows level {} (line {})",
                            next.level, prev.level, prev.line
                        ),
                        next.line,
                        1,
                    ));
                }
            }
        }

        diagnostics.sort_by_key(|d| (d.line, d.column));
        diagnostics
    }

    /// Checks one example and its result.
    #[must_use]
    pub fn lint_example(&self, block: &CodeBlock, result: &ExampleResult) -> Vec<Diagnostic> {
        let mut diagnostics = vec![];
        if self.config.unclosed_fence && !block.closed {
            diagnostics.push(Diagnostic::new(
                Rule::UnclosedFence,
                format!("`{}` block is never closed", block.language),
                block.fence_line,
                block.indent + 1,
            ));
        }
        if self.config.empty_example
            && matches!(result.status, ExampleStatus::Passed { statements: 0 })
        {
            diagnostics.push(Diagnostic::new(
                Rule::EmptyExample,
                format!("`{}` block contains no statement", block.language),
                block.fence_line,
                block.indent + 1,
            ));
        }
        diagnostics
    }
}
