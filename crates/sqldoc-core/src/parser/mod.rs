//! SQL parser.
//!
//! A hand-written recursive descent parser with Pratt parsing for
//! expressions.

mod error;
#[allow(clippy::module_inception)]
mod parser;
mod pratt;

pub use error::ParseError;
pub use parser::{Parser, ScriptStatement};
