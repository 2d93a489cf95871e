//! Python code generation for lispython.
//!
//! Translation runs in two phases:
//! - every form is lowered bottom-up into a [`CommandSequence`] of text,
//!   newline and indentation commands;
//! - each top-level sequence is replayed top-down by an [`Emitter`], which
//!   is the only place indentation depth is known.

mod command;
mod construct;
mod emitter;
pub mod loader;
pub mod samples;

pub use command::{Action, CommandSequence, Fragment};
pub use construct::{
    BinaryOp, Construct, EMPTY_TUPLE, Keyword, PLACEHOLDER_NAME, PLACEHOLDER_STATEMENT,
    PLACEHOLDER_VALUE, lower,
};
pub use emitter::Emitter;
pub use loader::{DIALECT, LoadError, Loaded, load_file, load_source};

use rhizome_lispython_syntax_sexpr::{ParseError, parse};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during translation.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("invalid options: {0}")]
    InvalidOptions(String),

    #[error("formatting error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EmitOptions {
    /// Spaces per indentation level.
    pub indent_width: usize,
}

impl Default for EmitOptions {
    fn default() -> Self {
        Self { indent_width: 4 }
    }
}

impl EmitOptions {
    pub fn validate(&self) -> Result<(), TranslateError> {
        if self.indent_width == 0 {
            return Err(TranslateError::InvalidOptions(
                "indent_width must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Translate lispython source to Python with default options.
pub fn translate(source: &str) -> Result<String, TranslateError> {
    translate_with(source, &EmitOptions::default())
}

/// Translate lispython source to Python.
///
/// The whole source is read before anything is generated; a syntax error
/// returns no output at all. Each top-level form is followed by a blank line.
pub fn translate_with(source: &str, options: &EmitOptions) -> Result<String, TranslateError> {
    options.validate()?;

    let program = parse(source)?;
    debug!(forms = program.len(), "parsed program");

    let lowered: Vec<CommandSequence> = program.forms().iter().map(lower).collect();

    let mut out = String::new();
    for commands in &lowered {
        Emitter::new(&mut out, options).replay(commands)?;
        out.push('\n');
    }

    debug!(bytes = out.len(), "emitted python");
    Ok(out)
}
