//! Syntax checking of extracted examples.

use serde::Serialize;
use sqldoc_core::dialect::{dialect_for_name, Dialect};
use sqldoc_core::{Lexer, Parser, ScriptStatement, Span, Statement, TokenKind};
use tracing::debug;

use crate::config::Config;
use crate::extractor::CodeBlock;

/// Options controlling how snippets are checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOptions {
    /// Every statement must end with `;`.
    pub require_semicolon: bool,
    /// Blocks carrying one of these attributes are skipped.
    pub skip_attributes: Vec<String>,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for CheckOptions {
    fn from(config: &Config) -> Self {
        Self {
            require_semicolon: config.require_semicolon,
            skip_attributes: config.skip_attributes.clone(),
        }
    }
}

/// A syntax error located in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetError {
    /// What went wrong.
    pub message: String,
    /// 1-based document line.
    pub line: usize,
    /// 1-based document column.
    pub column: usize,
}

/// The outcome of checking one example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExampleStatus {
    /// Every statement parsed.
    Passed {
        /// Number of statements in the snippet.
        statements: usize,
    },
    /// At least one statement failed to parse.
    Failed {
        /// One error per failing statement.
        errors: Vec<SnippetError>,
    },
    /// The block was excluded from checking.
    Skipped {
        /// Why it was skipped.
        reason: String,
    },
}

/// The result of checking one example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleResult {
    /// Index of the block among all fenced blocks of the document.
    pub index: usize,
    /// The block's language tag.
    pub language: String,
    /// 1-based line of the opening fence.
    pub line: usize,
    /// The outcome.
    #[serde(flatten)]
    pub status: ExampleStatus,
}

impl ExampleResult {
    /// Returns true if the example failed to parse.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self.status, ExampleStatus::Failed { .. })
    }
}

/// Parses examples with a dialect.
#[derive(Debug)]
pub struct SyntaxChecker {
    dialect: Box<dyn Dialect>,
    options: CheckOptions,
}

impl SyntaxChecker {
    /// Creates a checker.
    #[must_use]
    pub fn new(dialect: Box<dyn Dialect>, options: CheckOptions) -> Self {
        Self { dialect, options }
    }

    /// Returns the dialect untagged examples are parsed with.
    #[must_use]
    pub fn dialect(&self) -> &dyn Dialect {
        self.dialect.as_ref()
    }

    /// Checks one example.
    #[must_use]
    pub fn check(&self, block: &CodeBlock) -> ExampleResult {
        let status = match self.skip_reason(block) {
            Some(reason) => ExampleStatus::Skipped { reason },
            None => {
                let tagged = tagged_dialect(&block.language);
                let dialect = tagged.as_deref().unwrap_or(self.dialect.as_ref());
                self.check_content(block, dialect)
            }
        };
        debug!(index = block.index, line = block.fence_line, ?status, "checked example");
        ExampleResult {
            index: block.index,
            language: block.language.clone(),
            line: block.fence_line,
            status,
        }
    }

    /// Parses an example into statements.
    ///
    /// # Errors
    ///
    /// Returns the first syntax error, located in the document.
    pub fn parse(&self, block: &CodeBlock) -> Result<Vec<Statement>, SnippetError> {
        let tagged = tagged_dialect(&block.language);
        let dialect = tagged.as_deref().unwrap_or(self.dialect.as_ref());
        let statements = Parser::with_dialect(&block.content, dialect)
            .parse_script()
            .map_err(|err| locate(block, 0, &err.message, err.span))?;
        if let Some(err) = self.missing_semicolon(block, 0, &statements) {
            return Err(err);
        }
        Ok(statements.into_iter().map(|s| s.statement).collect())
    }

    /// Returns true if the block carries a skip attribute.
    #[must_use]
    pub fn is_skipped(&self, block: &CodeBlock) -> bool {
        self.skip_reason(block).is_some()
    }

    fn skip_reason(&self, block: &CodeBlock) -> Option<String> {
        self.options
            .skip_attributes
            .iter()
            .find(|attr| block.has_attribute(attr))
            .map(|attr| format!("marked `{attr}`"))
    }

    /// Parses the whole snippet, resuming after the next `;` on each error
    /// so that every broken statement is reported.
    fn check_content(&self, block: &CodeBlock, dialect: &dyn Dialect) -> ExampleStatus {
        let content = block.content.as_str();
        let mut offset = 0;
        let mut statements = 0;
        let mut errors = vec![];

        while offset < content.len() {
            let rest = &content[offset..];
            match Parser::with_dialect(rest, dialect).parse_script() {
                Ok(parsed) => {
                    statements += parsed.len();
                    errors.extend(self.missing_semicolon(block, offset, &parsed));
                    break;
                }
                Err(err) => {
                    errors.push(locate(block, offset, &err.message, err.span));
                    match next_semicolon(rest, dialect, err.span.start) {
                        Some(end) => offset += end,
                        None => break,
                    }
                }
            }
        }

        if errors.is_empty() {
            ExampleStatus::Passed { statements }
        } else {
            ExampleStatus::Failed { errors }
        }
    }

    fn missing_semicolon(
        &self,
        block: &CodeBlock,
        offset: usize,
        statements: &[ScriptStatement],
    ) -> Option<SnippetError> {
        if !self.options.require_semicolon {
            return None;
        }
        statements.iter().find(|s| !s.terminated).map(|s| {
            locate(
                block,
                offset,
                "missing `;` after statement",
                Span::new(s.span.end, s.span.end),
            )
        })
    }

}

/// Returns the dialect a block's language tag names, such as `mysql` or
/// `psql`. Plain `sql` names none.
fn tagged_dialect(language: &str) -> Option<Box<dyn Dialect>> {
    match language {
        "psql" => dialect_for_name("postgres"),
        other => dialect_for_name(other),
    }
}

/// Returns the end of the first `;` token at or after `from`.
fn next_semicolon(source: &str, dialect: &dyn Dialect, from: usize) -> Option<usize> {
    let mut lexer = Lexer::with_dialect(source, dialect);
    loop {
        let token = lexer.next_token();
        match token.kind {
            TokenKind::Eof => return None,
            TokenKind::Semicolon if token.span.start >= from => return Some(token.span.end),
            _ => {}
        }
    }
}

/// Maps a span within `block.content[offset..]` to a document position.
fn locate(block: &CodeBlock, offset: usize, message: &str, span: Span) -> SnippetError {
    let absolute = Span::new(span.start + offset, span.end + offset);
    let (line, column) = absolute.line_col(&block.content);
    let (line, column) = block.document_position(line, column);
    SnippetError {
        message: message.to_string(),
        line,
        column,
    }
}
