//! Helpers shared by the `Display` implementations of the AST.

use std::fmt;

use crate::lexer::Keyword;

/// An identifier, quoted only when it could not be read back bare.
pub(crate) struct Ident<'a>(pub &'a str);

impl Ident<'_> {
    fn needs_quotes(name: &str) -> bool {
        let mut chars = name.chars();
        let Some(first) = chars.next() else {
            return true;
        };
        if !(first.is_alphabetic() || first == '_') {
            return true;
        }
        if !chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$') {
            return true;
        }
        Keyword::lookup(name).is_some_and(|kw| kw.is_reserved())
    }
}

impl fmt::Display for Ident<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if Self::needs_quotes(self.0) {
            write!(f, "\"{}\"", self.0.replace('"', "\"\""))
        } else {
            f.write_str(self.0)
        }
    }
}

/// A comma-separated list of identifiers.
pub(crate) struct IdentList<'a>(pub &'a [String]);

impl fmt::Display for IdentList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", Ident(name))?;
        }
        Ok(())
    }
}

/// Items joined by a separator.
pub(crate) struct Separated<'a, T>(pub &'a [T], pub &'static str);

impl<T: fmt::Display> fmt::Display for Separated<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(self.1)?;
            }
            write!(f, "{item}")?;
        }
        Ok(())
    }
}

/// Shorthand for a comma-separated list.
pub(crate) const fn comma<T>(items: &[T]) -> Separated<'_, T> {
    Separated(items, ", ")
}

/// A string literal, with embedded quotes doubled.
pub(crate) struct QuotedString<'a>(pub &'a str);

impl fmt::Display for QuotedString<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}'", self.0.replace('\'', "''"))
    }
}
