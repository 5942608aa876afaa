//! Fenced code block extraction.
//!
//! Blocks are found by a line scanner over the document and handed out one
//! at a time through [`Extractor`], which implements `Iterator`.

use std::str::Lines;

use serde::Serialize;
use tracing::{debug, warn};

/// A fenced code block whose language is one of the requested tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Position among all fenced blocks of the document, starting at 0.
    pub index: usize,
    /// The language tag, lower-cased.
    pub language: String,
    /// The remaining words of the info string.
    pub attributes: Vec<String>,
    /// The block content, de-indented by the fence's indentation.
    pub content: String,
    /// 1-based line of the opening fence.
    pub fence_line: usize,
    /// 1-based line of the first content line.
    pub content_line: usize,
    /// Spaces removed from the start of each content line.
    pub indent: usize,
    /// Whether a closing fence was found.
    pub closed: bool,
}

impl CodeBlock {
    /// Returns true if the info string carries the given attribute.
    #[must_use]
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Maps a 1-based `(line, column)` within the content to the document.
    #[must_use]
    pub const fn document_position(&self, line: usize, column: usize) -> (usize, usize) {
        (self.content_line + line - 1, column + self.indent)
    }
}

/// An opening or closing fence line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Fence<'a> {
    pub indent: usize,
    pub marker: char,
    pub len: usize,
    pub info: &'a str,
}

impl<'a> Fence<'a> {
    /// Parses a fence line: up to three spaces, then at least three
    /// backticks or tildes.
    pub(crate) fn parse(line: &'a str) -> Option<Self> {
        let indent = line.len() - line.trim_start_matches(' ').len();
        if indent > 3 {
            return None;
        }
        let rest = &line[indent..];
        let marker = rest.chars().next().filter(|c| matches!(c, '`' | '~'))?;
        let len = rest.len() - rest.trim_start_matches(marker).len();
        if len < 3 {
            return None;
        }
        let info = rest[len..].trim();
        // A backtick in a backtick fence's info string makes it inline code
        if marker == '`' && info.contains('`') {
            return None;
        }
        Some(Self {
            indent,
            marker,
            len,
            info,
        })
    }

    /// Returns true if `line` closes a block opened by this fence.
    pub(crate) fn is_closed_by(&self, line: &str) -> bool {
        Fence::parse(line).is_some_and(|close| {
            close.marker == self.marker && close.len >= self.len && close.info.is_empty()
        })
    }

    /// Splits the info string into the language and its attributes.
    ///
    /// Words are separated by whitespace, `,`, `{` and `}`, so `sql,ignore`
    /// and `{.sql .skip}` both work.
    fn language_and_attributes(&self) -> Option<(String, Vec<String>)> {
        let mut words = self
            .info
            .split(|c: char| c.is_whitespace() || matches!(c, ',' | '{' | '}'))
            .filter(|w| !w.is_empty())
            .map(|w| w.trim_start_matches('.').to_string());
        let language = words.next()?.to_lowercase();
        Some((language, words.collect()))
    }
}

/// Lazily yields the code blocks of a markdown document tagged with one of
/// the given languages.
pub struct Extractor<'a> {
    lines: std::iter::Enumerate<Lines<'a>>,
    languages: Vec<String>,
    next_index: usize,
}

impl<'a> Extractor<'a> {
    /// Creates an extractor for `markdown`, matching languages
    /// case-insensitively.
    #[must_use]
    pub fn new(markdown: &'a str, languages: &[String]) -> Self {
        Self {
            lines: markdown.lines().enumerate(),
            languages: languages.iter().map(|l| l.to_lowercase()).collect(),
            next_index: 0,
        }
    }

    fn wants(&self, language: &str) -> bool {
        self.languages.iter().any(|l| l == language)
    }

    /// Consumes lines up to and including the fence closing `open`.
    ///
    /// Returns the de-indented content lines and whether a closing fence
    /// was found.
    fn read_body(&mut self, open: &Fence<'_>, keep: bool) -> (Vec<String>, bool) {
        let mut body = vec![];
        for (_, line) in self.lines.by_ref() {
            if open.is_closed_by(line) {
                return (body, true);
            }
            if keep {
                let strip = line.len() - line.trim_start_matches(' ').len();
                body.push(line[strip.min(open.indent)..].to_string());
            }
        }
        (body, false)
    }
}

impl Iterator for Extractor<'_> {
    type Item = CodeBlock;

    fn next(&mut self) -> Option<CodeBlock> {
        while let Some((number, line)) = self.lines.next() {
            let Some(open) = Fence::parse(line) else {
                continue;
            };
            let index = self.next_index;
            self.next_index += 1;

            let tagged = open
                .language_and_attributes()
                .filter(|(language, _)| self.wants(language));
            let (body, closed) = self.read_body(&open, tagged.is_some());
            let Some((language, attributes)) = tagged else {
                continue;
            };

            let fence_line = number + 1;
            if !closed {
                warn!(line = fence_line, "code block is never closed");
            }
            debug!(index, line = fence_line, %language, "extracted code block");

            let mut content = body.join("\n");
            if !body.is_empty() {
                content.push('\n');
            }
            return Some(CodeBlock {
                index,
                language,
                attributes,
                content,
                fence_line,
                content_line: fence_line + 1,
                indent: open.indent,
                closed,
            });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sql() -> Vec<String> {
        vec!["sql".to_string()]
    }

    #[test]
    fn test_fence_parse() {
        let fence = Fence::parse("  ```sql ignore").unwrap();
        assert_eq!(fence.indent, 2);
        assert_eq!(fence.marker, '`');
        assert_eq!(fence.len, 3);
        assert_eq!(fence.info, "sql ignore");

        assert!(Fence::parse("    ```sql").is_none());
        assert!(Fence::parse("``sql").is_none());
        assert!(Fence::parse("``` `x` ```").is_none());
        assert_eq!(Fence::parse("~~~~").unwrap().len, 4);
    }

    #[test]
    fn test_closing_fence_rules() {
        let open = Fence::parse("````sql").unwrap();
        assert!(!open.is_closed_by("```"));
        assert!(!open.is_closed_by("~~~~"));
        assert!(!open.is_closed_by("```` sql"));
        assert!(open.is_closed_by("`````"));
        assert!(open.is_closed_by("   ````  "));
    }

    #[test]
    fn test_info_string_words() {
        let words = |info: &str| {
            Fence::parse(&format!("```{info}"))
                .and_then(|f| f.language_and_attributes())
        };
        assert_eq!(
            words("SQL,ignore"),
            Some(("sql".to_string(), vec!["ignore".to_string()]))
        );
        assert_eq!(
            words("{.sql .skip}"),
            Some(("sql".to_string(), vec!["skip".to_string()]))
        );
        assert_eq!(words(""), None);
    }

    #[test]
    fn test_extracts_only_requested_languages() {
        let doc = "# T\n\n```rust\nfn main() {}\n```\n\n```sql\nSELECT 1;\n```\n";
        let blocks: Vec<_> = Extractor::new(doc, &sql()).collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].index, 1);
        assert_eq!(blocks[0].fence_line, 7);
        assert_eq!(blocks[0].content_line, 8);
        assert_eq!(blocks[0].content, "SELECT 1;\n");
        assert!(blocks[0].closed);
    }

    #[test]
    fn test_document_position_adds_indent() {
        let doc = "- item\n\n   ```sql\n   SELECT\n     1;\n   ```\n";
        let block = Extractor::new(doc, &sql()).next().unwrap();
        assert_eq!(block.content, "SELECT\n  1;\n");
        assert_eq!(block.document_position(2, 3), (5, 6));
    }
}
