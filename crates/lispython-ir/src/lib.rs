//! Parse tree types for the lispython dialect.
//!
//! This crate defines the tree produced by the s-expression reader and
//! consumed by code generation backends.
//!
//! # Tree format
//!
//! A node is either:
//! - An atom: identifier, operator symbol, or double-quoted string literal
//! - A form: a parenthesized list of nodes, classified by its head
//!
//! Serialized to JSON, atoms become strings and forms become arrays:
//! ```json
//! ["def", "f", ["x"],
//!   ["return", ["+", "x", "1"]]
//! ]
//! ```

mod node;

pub use node::{Atom, AtomKind, Form, Node, Program, OPERATORS};
