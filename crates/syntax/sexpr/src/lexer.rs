//! Tokenizer.

use crate::ParseError;
use rhizome_lispython_ir::{AtomKind, OPERATORS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Open,
    Close,
    Atom(AtomKind),
}

/// A token and the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
}

fn is_identifier_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_' || c == b'.'
}

/// Longest operator symbol that prefixes `rest`.
fn match_operator(rest: &str) -> Option<&'static str> {
    OPERATORS
        .iter()
        .copied()
        .filter(|op| rest.starts_with(op))
        .max_by_key(|op| op.len())
}

/// Split source text into tokens.
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let c = bytes[pos];
        let start = pos;

        if c.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let kind = match c {
            b'(' => {
                pos += 1;
                TokenKind::Open
            }
            b')' => {
                pos += 1;
                TokenKind::Close
            }
            b'"' => {
                pos = scan_string(bytes, start)?;
                TokenKind::Atom(AtomKind::Str)
            }
            c if is_identifier_char(c) => {
                while pos < bytes.len() && is_identifier_char(bytes[pos]) {
                    pos += 1;
                }
                TokenKind::Atom(AtomKind::Identifier)
            }
            _ => match match_operator(&source[start..]) {
                Some(op) => {
                    pos += op.len();
                    TokenKind::Atom(AtomKind::Operator)
                }
                None => {
                    let found = source[start..].chars().next().unwrap_or_default();
                    return Err(ParseError::UnexpectedChar {
                        found,
                        offset: start,
                    });
                }
            },
        };

        tokens.push(Token {
            kind,
            text: &source[start..pos],
            offset: start,
        });
    }

    Ok(tokens)
}

/// Scan a double-quoted literal starting at `start`; returns the offset just
/// past the closing quote. Backslash escapes the next character. Literals may
/// not span lines.
fn scan_string(bytes: &[u8], start: usize) -> Result<usize, ParseError> {
    let mut pos = start + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'"' => return Ok(pos + 1),
            b'\\' if pos + 1 < bytes.len() && !matches!(bytes[pos + 1], b'\n' | b'\r') => {
                pos += 2;
            }
            b'\n' | b'\r' | b'\\' => break,
            _ => pos += 1,
        }
    }
    Err(ParseError::UnterminatedString { offset: start })
}
