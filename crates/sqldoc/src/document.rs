//! Markdown document structure: headings, anchors and in-document links.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::extractor::Fence;

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ {0,3}(#{1,6})(?:[ \t]+(.*))?$").expect("valid heading regex")
});

static ANCHOR_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\[([^\]]*)\]\(#([^)\s]*)(?:\s+(?:"[^"]*"|'[^']*'))?\s*\)"#)
        .expect("valid link regex")
});

// Inline links and images in heading text; only the label reaches the anchor
static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!?\[([^\]]*)\]\([^)]*\)").expect("valid inline link regex")
});

static INLINE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`[^`]*`").expect("valid inline code regex"));

/// An ATX heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    /// Level from 1 (`#`) to 6 (`######`).
    pub level: u8,
    /// Heading text without the markers.
    pub text: String,
    /// The anchor a renderer derives from the text.
    pub anchor: String,
    /// 1-based line number.
    pub line: usize,
}

/// A link to an anchor in the same document, such as `[Joins](#joins)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The link text.
    pub text: String,
    /// The target anchor, without `#`.
    pub target: String,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column of the `[`.
    pub column: usize,
}

/// The structure of a markdown document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    /// Headings in document order.
    pub headings: Vec<Heading>,
    /// In-document links in document order.
    pub links: Vec<Link>,
}

impl Document {
    /// Parses headings and anchor links, ignoring fenced code blocks and
    /// inline code.
    #[must_use]
    pub fn parse(markdown: &str) -> Self {
        let mut doc = Self::default();
        let mut slugs = Slugger::default();
        let mut open_fence: Option<Fence<'_>> = None;

        for (number, line) in markdown.lines().enumerate() {
            let line_number = number + 1;
            if let Some(fence) = &open_fence {
                if fence.is_closed_by(line) {
                    open_fence = None;
                }
                continue;
            }
            if let Some(fence) = Fence::parse(line) {
                open_fence = Some(fence);
                continue;
            }

            if let Some(caps) = HEADING.captures(line) {
                let text = heading_text(caps.get(2).map_or("", |m| m.as_str()));
                doc.headings.push(Heading {
                    level: u8::try_from(caps[1].len()).unwrap_or(6),
                    anchor: slugs.slug(&text),
                    text,
                    line: line_number,
                });
            }

            let visible = INLINE_CODE.replace_all(line, |caps: &regex::Captures<'_>| {
                " ".repeat(caps[0].len())
            });
            for caps in ANCHOR_LINK.captures_iter(&visible) {
                let start = caps.get(0).map_or(0, |m| m.start());
                doc.links.push(Link {
                    text: caps[1].to_string(),
                    target: caps[2].to_string(),
                    line: line_number,
                    column: visible[..start].chars().count() + 1,
                });
            }
        }
        doc
    }

    /// Returns true if some heading has the given anchor.
    #[must_use]
    pub fn has_anchor(&self, anchor: &str) -> bool {
        self.headings.iter().any(|h| h.anchor == anchor)
    }
}

/// Strips the optional closing `#` sequence of an ATX heading.
fn heading_text(raw: &str) -> String {
    let text = raw.trim();
    let without_closing = text.trim_end_matches('#');
    if without_closing.is_empty() || without_closing.ends_with([' ', '\t']) {
        without_closing.trim_end().to_string()
    } else {
        text.to_string()
    }
}

/// Derives GitHub-style anchors, numbering repeats.
#[derive(Debug, Default)]
struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    fn slug(&mut self, text: &str) -> String {
        let label = INLINE_LINK.replace_all(text, "$1");
        let base: String = label
            .trim()
            .to_lowercase()
            .chars()
            .filter_map(|c| match c {
                ' ' => Some('-'),
                '-' | '_' => Some(c),
                c if c.is_alphanumeric() => Some(c),
                _ => None,
            })
            .collect();
        let count = self.seen.entry(base.clone()).or_insert(0);
        let slug = if *count == 0 {
            base
        } else {
            format!("{base}-{count}")
        };
        *count += 1;
        slug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs() {
        let mut slugs = Slugger::default();
        assert_eq!(slugs.slug("Getting Started"), "getting-started");
        assert_eq!(slugs.slug("SQL `JOIN` types!"), "sql-join-types");
        assert_eq!(slugs.slug("INNER/OUTER joins"), "innerouter-joins");
        assert_eq!(slugs.slug("snake_case & more"), "snake_case--more");
        assert_eq!(slugs.slug("Getting Started"), "getting-started-1");
        assert_eq!(slugs.slug("Getting Started"), "getting-started-2");
    }

    #[test]
    fn test_slug_keeps_only_link_labels() {
        let mut slugs = Slugger::default();
        assert_eq!(slugs.slug("[Link](x)"), "link");
        assert_eq!(slugs.slug("See [the docs](https://example.com/a) now"), "see-the-docs-now");
    }

    #[test]
    fn test_links_with_titles() {
        let doc = Document::parse(
            "# Joins\n\n[a](#joins \"Join types\") [b](#missing 'gone') [c](#joins)\n",
        );
        let targets: Vec<_> = doc.links.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["joins", "missing", "joins"]);
        assert_eq!(doc.links[1].text, "b");
    }

    #[test]
    fn test_heading_with_link_gets_label_anchor() {
        let doc = Document::parse("## [Link](x)\n\n[back](#link)\n");
        assert_eq!(doc.headings[0].anchor, "link");
        assert!(doc.has_anchor(&doc.links[0].target));
    }

    #[test]
    fn test_heading_text() {
        assert_eq!(heading_text("Title ##"), "Title");
        assert_eq!(heading_text("C#"), "C#");
        assert_eq!(heading_text("  Spaced  "), "Spaced");
        assert_eq!(heading_text("###"), "");
    }

    #[test]
    fn test_parse_headings_and_links() {
        let doc = Document::parse(
            "# SQL Tutorial\n\
             \n\
             - [Select](#select)\n\
             - [Joins](#joins) and `[not](#a-link)`\n\
             \n\
             ## Select ##\n\
             ```sql\n\
             # not a heading\n\
             ```\n\
             ### Joins\n",
        );
        let anchors: Vec<_> = doc.headings.iter().map(|h| h.anchor.as_str()).collect();
        assert_eq!(anchors, vec!["sql-tutorial", "select", "joins"]);
        assert_eq!(doc.headings[1].level, 2);
        assert_eq!(doc.headings[1].line, 6);

        let targets: Vec<_> = doc.links.iter().map(|l| l.target.as_str()).collect();
        assert_eq!(targets, vec!["select", "joins"]);
        assert_eq!(doc.links[1].line, 4);
        assert_eq!(doc.links[1].column, 3);
        assert!(doc.has_anchor("joins"));
        assert!(!doc.has_anchor("a-link"));
    }

    #[test]
    fn test_hash_without_space_is_not_a_heading() {
        let doc = Document::parse("#hashtag\n####### seven\n");
        assert!(doc.headings.is_empty());
    }

    #[test]
    fn test_external_links_are_ignored() {
        let doc = Document::parse("See [docs](https://example.com#x) and [here](other.md#y).\n");
        assert!(doc.links.is_empty());
    }
}
