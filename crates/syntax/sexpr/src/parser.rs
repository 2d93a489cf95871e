//! Grammar: tokens to forms.

use crate::lexer::{TokenKind, tokenize};
use rhizome_lispython_ir::{Atom, Form, Node, Program};
use thiserror::Error;

/// Deepest form nesting accepted. Code generation recurses once per level.
pub const MAX_DEPTH: usize = 256;

/// Errors that abort reading. Offsets are byte offsets into the source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected character {found:?} at byte {offset}")]
    UnexpectedChar { found: char, offset: usize },

    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString { offset: usize },

    #[error("unclosed '(' opened at byte {offset}")]
    UnclosedForm { offset: usize },

    #[error("unmatched ')' at byte {offset}")]
    UnexpectedClose { offset: usize },

    #[error("expected '(' at byte {offset}, got {found:?}")]
    TopLevelAtom { found: String, offset: usize },

    #[error("forms nested deeper than {limit} levels at byte {offset}")]
    TooDeep { offset: usize, limit: usize },

    #[error("program contains no forms")]
    EmptyProgram,
}

/// Read a whole program.
///
/// Every top-level element must be a parenthesized form, and at least one
/// form must be present. Forms may nest at most [`MAX_DEPTH`] levels.
/// Nothing is returned on failure.
pub fn parse(source: &str) -> Result<Program, ParseError> {
    let tokens = tokenize(source)?;

    // Open forms, innermost last, with the offset of their '('.
    let mut stack: Vec<(usize, Vec<Node>)> = Vec::new();
    let mut forms = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::Open => {
                if stack.len() >= MAX_DEPTH {
                    return Err(ParseError::TooDeep {
                        offset: token.offset,
                        limit: MAX_DEPTH,
                    });
                }
                stack.push((token.offset, Vec::new()));
            }
            TokenKind::Close => {
                let (_, items) = stack
                    .pop()
                    .ok_or(ParseError::UnexpectedClose {
                        offset: token.offset,
                    })?;
                let form = Form::new(items);
                match stack.last_mut() {
                    Some((_, parent)) => parent.push(Node::Form(form)),
                    None => forms.push(form),
                }
            }
            TokenKind::Atom(kind) => match stack.last_mut() {
                Some((_, items)) => items.push(Node::Atom(Atom::new(kind, token.text))),
                None => {
                    return Err(ParseError::TopLevelAtom {
                        found: token.text.to_string(),
                        offset: token.offset,
                    });
                }
            },
        }
    }

    // Report the outermost unclosed form.
    if let Some((offset, _)) = stack.first() {
        return Err(ParseError::UnclosedForm { offset: *offset });
    }

    if forms.is_empty() {
        return Err(ParseError::EmptyProgram);
    }

    Ok(Program::new(forms))
}
