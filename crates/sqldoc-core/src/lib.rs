//! # sqldoc-core
//!
//! A SQL lexer, parser and renderer for checking the examples in SQL
//! documentation.
//!
//! This crate provides:
//! - A hand-written lexer producing tokens with byte spans
//! - A recursive descent parser with Pratt expression parsing
//! - An AST whose `Display` output is canonical SQL
//! - Dialects toggling the lexical features that differ between databases
//!
//! ## Parsing a script
//!
//! ```rust
//! use sqldoc_core::Parser;
//!
//! let statements = Parser::new("SELECT id FROM users; DELETE FROM users WHERE id = 1;")
//!     .parse_script()
//!     .unwrap();
//! assert_eq!(statements.len(), 2);
//! assert!(statements.iter().all(|s| s.terminated));
//! ```
//!
//! ## Canonical rendering
//!
//! ```rust
//! use sqldoc_core::Parser;
//!
//! let stmt = Parser::new("select name from users u where u.id=1")
//!     .parse_statement()
//!     .unwrap();
//! assert_eq!(stmt.to_string(), "SELECT name FROM users AS u WHERE u.id = 1");
//! ```

pub mod ast;
pub mod dialect;
pub mod lexer;
pub mod parser;

pub use ast::{Expr, Statement, StatementCategory};
pub use dialect::{dialect_for_name, Dialect};
pub use lexer::{Lexer, Span, Token, TokenKind};
pub use parser::{ParseError, Parser, ScriptStatement};
