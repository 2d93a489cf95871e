//! S-expression reader for lispython.
//!
//! Turns source text into a [`Program`](rhizome_lispython_ir::Program):
//! one [`Form`](rhizome_lispython_ir::Form) per top-level parenthesized
//! expression. Whitespace only separates tokens; there is no operator
//! precedence, every operator application is written as its own form.

mod lexer;
mod parser;

pub use lexer::{Token, TokenKind, tokenize};
pub use parser::{MAX_DEPTH, ParseError, parse};
