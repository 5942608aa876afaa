//! SQL tokenizer implementation.

use super::{Keyword, Span, Token, TokenKind};
use crate::dialect::{Dialect, GenericDialect};

static GENERIC: GenericDialect = GenericDialect;

/// A lexer that turns SQL text into tokens on demand.
///
/// Lexical problems never abort scanning: they surface as
/// [`TokenKind::Error`] tokens and the parser reports them.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    dialect: &'a dyn Dialect,
    /// Current byte position.
    pos: usize,
    /// Byte position where the current token starts.
    start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a lexer using the generic dialect.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, &GENERIC)
    }

    /// Creates a lexer for a specific dialect.
    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: &'a dyn Dialect) -> Self {
        Self {
            input,
            dialect,
            pos: 0,
            start: 0,
        }
    }

    /// Returns the source text being scanned.
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.input
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        let mut chars = self.input[self.pos..].chars();
        chars.next();
        chars.next()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, pred: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.start, self.pos))
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.make_token(TokenKind::Error(message.into()))
    }

    /// Skips whitespace and comments.
    ///
    /// Returns an error token for a block comment that never closes.
    fn skip_trivia(&mut self) -> Option<Token> {
        loop {
            self.advance_while(char::is_whitespace);
            self.start = self.pos;

            let line_comment = match (self.peek(), self.peek_next()) {
                (Some('-'), Some('-')) => true,
                (Some('#'), _) => self.dialect.supports_hash_comments(),
                _ => false,
            };
            if line_comment {
                self.advance_while(|c| c != '\n');
                continue;
            }

            if self.peek() == Some('/') && self.peek_next() == Some('*') {
                self.advance();
                self.advance();
                loop {
                    match self.advance() {
                        Some('*') if self.peek() == Some('/') => {
                            self.advance();
                            break;
                        }
                        Some(_) => {}
                        None => return Some(self.error("unterminated block comment")),
                    }
                }
                continue;
            }

            return None;
        }
    }

    fn scan_word(&mut self) -> Token {
        self.advance_while(|c| c.is_alphanumeric() || c == '_' || c == '$');
        let text = &self.input[self.start..self.pos];
        match Keyword::lookup(text) {
            Some(keyword) => self.make_token(TokenKind::Keyword(keyword)),
            None => self.make_token(TokenKind::ident(text)),
        }
    }

    /// Scans text up to an unescaped `close`, doubling `close` escapes it.
    fn scan_delimited(&mut self, close: char) -> Option<String> {
        let mut value = String::new();
        loop {
            match self.advance() {
                Some(c) if c == close => {
                    if close != ']' && self.peek() == Some(close) {
                        self.advance();
                        value.push(close);
                    } else {
                        return Some(value);
                    }
                }
                Some(c) => value.push(c),
                None => return None,
            }
        }
    }

    fn scan_quoted_identifier(&mut self, close: char) -> Token {
        match self.scan_delimited(close) {
            Some(value) if value.is_empty() => self.error("empty quoted identifier"),
            Some(value) => self.make_token(TokenKind::Identifier {
                value,
                quoted: true,
            }),
            None => self.error("unterminated quoted identifier"),
        }
    }

    fn scan_string(&mut self) -> Token {
        match self.scan_delimited('\'') {
            Some(value) => self.make_token(TokenKind::String(value)),
            None => self.error("unterminated string literal"),
        }
    }

    fn scan_number(&mut self) -> Token {
        self.advance_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }
        if self.peek().is_some_and(|c| c == 'e' || c == 'E') {
            let exponent_sign = self.peek_next().is_some_and(|c| c == '+' || c == '-');
            self.advance();
            if exponent_sign {
                self.advance();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return self.error("malformed exponent in number");
            }
            self.advance_while(|c| c.is_ascii_digit());
        }
        if self.peek().is_some_and(|c| c.is_alphabetic() || c == '_') {
            self.advance_while(|c| c.is_alphanumeric() || c == '_');
            return self.error(format!(
                "invalid number `{}`",
                &self.input[self.start..self.pos]
            ));
        }
        self.make_token(TokenKind::Number(
            self.input[self.start..self.pos].to_string(),
        ))
    }

    fn scan_blob(&mut self) -> Token {
        let Some(digits) = self.scan_delimited('\'') else {
            return self.error("unterminated blob literal");
        };
        let digits: String = digits.chars().filter(|c| !c.is_whitespace()).collect();
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return self.error("invalid character in blob literal");
        }
        if digits.len() % 2 != 0 {
            return self.error("odd number of hex digits in blob literal");
        }
        let bytes = (0..digits.len())
            .step_by(2)
            .filter_map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
            .collect();
        self.make_token(TokenKind::Blob(bytes))
    }

    fn scan_named_placeholder(&mut self) -> Token {
        self.advance_while(|c| c.is_alphanumeric() || c == '_');
        self.make_token(TokenKind::Placeholder(
            self.input[self.start..self.pos].to_string(),
        ))
    }

    /// Chooses between a one-character token and a two-character one.
    fn either(&mut self, next: char, long: TokenKind, short: TokenKind) -> Token {
        if self.peek() == Some(next) {
            self.advance();
            self.make_token(long)
        } else {
            self.make_token(short)
        }
    }

    /// Scans the next token.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        if let Some(error) = self.skip_trivia() {
            return error;
        }

        let Some(c) = self.advance() else {
            return self.make_token(TokenKind::Eof);
        };

        match c {
            '(' => self.make_token(TokenKind::LeftParen),
            ')' => self.make_token(TokenKind::RightParen),
            ',' => self.make_token(TokenKind::Comma),
            ';' => self.make_token(TokenKind::Semicolon),
            '+' => self.make_token(TokenKind::Plus),
            '-' => self.make_token(TokenKind::Minus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '~' => self.make_token(TokenKind::BitNot),
            '&' => self.make_token(TokenKind::BitAnd),
            '=' => self.either('=', TokenKind::Eq, TokenKind::Eq),
            '|' => self.either('|', TokenKind::Concat, TokenKind::BitOr),
            '<' => match self.peek() {
                Some('=') => self.either('=', TokenKind::LtEq, TokenKind::Lt),
                Some('>') => self.either('>', TokenKind::NotEq, TokenKind::Lt),
                _ => self.either('<', TokenKind::LeftShift, TokenKind::Lt),
            },
            '>' => match self.peek() {
                Some('=') => self.either('=', TokenKind::GtEq, TokenKind::Gt),
                _ => self.either('>', TokenKind::RightShift, TokenKind::Gt),
            },
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::NotEq)
                } else {
                    self.error("unexpected character `!`")
                }
            }
            ':' => match self.peek() {
                Some(':') => self.either(':', TokenKind::DoubleColon, TokenKind::DoubleColon),
                Some(n) if n.is_alphabetic() || n == '_' => self.scan_named_placeholder(),
                _ => self.error("unexpected character `:`"),
            },
            '?' => {
                self.advance_while(|c| c.is_ascii_digit());
                self.make_token(TokenKind::Placeholder(
                    self.input[self.start..self.pos].to_string(),
                ))
            }
            '@' => match self.peek() {
                Some(n) if n.is_alphabetic() || n == '_' => self.scan_named_placeholder(),
                _ => self.make_token(TokenKind::At),
            },
            '$' if self.peek().is_some_and(|n| n.is_ascii_digit()) => {
                self.scan_named_placeholder()
            }
            '.' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.scan_number(),
            '.' => self.make_token(TokenKind::Dot),
            '\'' => self.scan_string(),
            'X' | 'x' if self.peek() == Some('\'') => {
                self.advance();
                self.scan_blob()
            }
            c if c.is_ascii_digit() => self.scan_number(),
            c if c.is_alphabetic() || c == '_' => self.scan_word(),
            c => match self.dialect.identifier_close(c) {
                Some(close) => self.scan_quoted_identifier(close),
                None => self.error(format!("unexpected character `{c}`")),
            },
        }
    }

    /// Tokenizes the entire input, ending with an `Eof` token.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let is_eof = token.is_eof();
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::{MySqlDialect, SqliteDialect};

    fn token_kinds(input: &str) -> Vec<TokenKind> {
        Lexer::new(input).tokenize().into_iter().map(|t| t.kind).collect()
    }

    fn number(text: &str) -> TokenKind {
        TokenKind::Number(text.to_string())
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(token_kinds(""), vec![TokenKind::Eof]);
        assert_eq!(token_kinds("  \n\t "), vec![TokenKind::Eof]);
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            token_kinds("SELECT -- the columns\n/* all of them */ *"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::Star,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let kinds = token_kinds("SELECT /* oops");
        assert!(matches!(&kinds[1], TokenKind::Error(m) if m.contains("block comment")));
    }

    #[test]
    fn test_hash_comment_depends_on_dialect() {
        let mysql = MySqlDialect;
        let tokens = Lexer::with_dialect("# note\nSELECT", &mysql).tokenize();
        assert_eq!(tokens[0].kind, TokenKind::Keyword(Keyword::Select));

        let generic = token_kinds("# note");
        assert!(matches!(&generic[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            token_kinds("select Name from Customers"),
            vec![
                TokenKind::Keyword(Keyword::Select),
                TokenKind::ident("Name"),
                TokenKind::Keyword(Keyword::From),
                TokenKind::ident("Customers"),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_quoted_identifiers() {
        assert_eq!(
            token_kinds("\"Order Details\" \"a\"\"b\""),
            vec![
                TokenKind::Identifier {
                    value: "Order Details".into(),
                    quoted: true
                },
                TokenKind::Identifier {
                    value: "a\"b".into(),
                    quoted: true
                },
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_bracket_and_backtick_identifiers() {
        let sqlite = SqliteDialect;
        let kinds: Vec<_> = Lexer::with_dialect("[first name] `last`", &sqlite)
            .tokenize()
            .into_iter()
            .map(|t| t.kind)
            .collect();
        assert!(matches!(&kinds[0], TokenKind::Identifier { value, quoted: true } if value == "first name"));
        assert!(matches!(&kinds[1], TokenKind::Identifier { value, quoted: true } if value == "last"));

        assert!(matches!(&token_kinds("`last`")[0], TokenKind::Error(_)));
    }

    #[test]
    fn test_numbers_keep_their_text() {
        assert_eq!(
            token_kinds("42 3.14 .5 1e10 2.5E-3 7."),
            vec![
                number("42"),
                number("3.14"),
                number(".5"),
                number("1e10"),
                number("2.5E-3"),
                number("7."),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(matches!(&token_kinds("1e")[0], TokenKind::Error(_)));
        assert!(matches!(&token_kinds("12abc")[0], TokenKind::Error(m) if m.contains("12abc")));
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            token_kinds("'Berlin' 'it''s' ''"),
            vec![
                TokenKind::String("Berlin".into()),
                TokenKind::String("it's".into()),
                TokenKind::String(String::new()),
                TokenKind::Eof,
            ]
        );
        assert!(matches!(&token_kinds("'open")[0], TokenKind::Error(m) if m.contains("string")));
    }

    #[test]
    fn test_blob() {
        assert_eq!(
            token_kinds("X'CAFE'")[0],
            TokenKind::Blob(vec![0xCA, 0xFE])
        );
        assert!(matches!(&token_kinds("x'ABC'")[0], TokenKind::Error(_)));
        assert_eq!(token_kinds("x")[0], TokenKind::ident("x"));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            token_kinds("+ - * / % = == != <> < <= > >= || | & ~ << >>"),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eq,
                TokenKind::Eq,
                TokenKind::NotEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::Concat,
                TokenKind::BitOr,
                TokenKind::BitAnd,
                TokenKind::BitNot,
                TokenKind::LeftShift,
                TokenKind::RightShift,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(
            token_kinds("? ?2 :name @user $1 ::"),
            vec![
                TokenKind::Placeholder("?".into()),
                TokenKind::Placeholder("?2".into()),
                TokenKind::Placeholder(":name".into()),
                TokenKind::Placeholder("@user".into()),
                TokenKind::Placeholder("$1".into()),
                TokenKind::DoubleColon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_at_before_string() {
        assert_eq!(
            token_kinds("'app'@'localhost'"),
            vec![
                TokenKind::String("app".into()),
                TokenKind::At,
                TokenKind::String("localhost".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_span_tracking() {
        let tokens = Lexer::new("SELECT  id\n FROM t").tokenize();
        assert_eq!(tokens[0].span, Span::new(0, 6));
        assert_eq!(tokens[1].span, Span::new(8, 10));
        assert_eq!(tokens[2].span, Span::new(12, 16));
        assert_eq!(tokens[4].span, Span::new(18, 18));
    }

    #[test]
    fn test_error_span_covers_bad_character() {
        let tokens = Lexer::new("SELECT ^").tokenize();
        assert_eq!(tokens[1].span, Span::new(7, 8));
        assert!(matches!(&tokens[1].kind, TokenKind::Error(m) if m.contains('^')));
    }
}
