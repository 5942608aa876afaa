//! Source location tracking for tokens, statements and errors.

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the smallest span covering both `self` and `other`.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the text this span covers, or `None` if it is out of bounds.
    #[must_use]
    pub fn slice<'a>(&self, source: &'a str) -> Option<&'a str> {
        source.get(self.start..self.end)
    }

    /// Returns the 1-based `(line, column)` of the span start in `source`.
    ///
    /// Columns count characters, not bytes.
    #[must_use]
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = self.start.min(source.len());
        let before = source.get(..offset).unwrap_or(source);
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        (line, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_len() {
        let span = Span::new(5, 10);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert!(Span::new(3, 3).is_empty());
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::new(8, 15).merge(Span::new(5, 10));
        assert_eq!(merged, Span::new(5, 15));
    }

    #[test]
    fn test_span_slice() {
        assert_eq!(Span::new(7, 9).slice("SELECT id"), Some("id"));
        assert_eq!(Span::new(7, 90).slice("SELECT id"), None);
    }

    #[test]
    fn test_line_col() {
        let source = "SELECT\n  id\nFROM t";
        assert_eq!(Span::new(0, 1).line_col(source), (1, 1));
        assert_eq!(Span::new(9, 11).line_col(source), (2, 3));
        assert_eq!(Span::new(12, 16).line_col(source), (3, 1));
    }

    #[test]
    fn test_line_col_counts_chars() {
        let source = "SELECT 'é', x";
        let x = source.find('x').unwrap();
        assert_eq!(Span::new(x, x + 1).line_col(source), (1, 13));
    }
}
