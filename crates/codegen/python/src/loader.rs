//! Load-time translation of files tagged with the lispython coding
//! declaration.
//!
//! A tagged file starts with a PEP 263 style comment such as
//! `# coding: lispython`. Loading it reads the whole file, translates it,
//! and returns Python source that can be executed in its place. Nothing is
//! registered globally; callers opt in by routing their reads through here.

use crate::{EmitOptions, TranslateError, translate_with};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Coding name that marks a file as lispython.
pub const DIALECT: &str = "lispython";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Translate(#[from] TranslateError),
}

/// Source ready to be executed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Loaded {
    /// The file was not tagged and is returned unchanged.
    Native(String),
    /// The file was tagged and this is its translation.
    Translated(String),
}

impl Loaded {
    pub fn source(&self) -> &str {
        match self {
            Loaded::Native(source) | Loaded::Translated(source) => source,
        }
    }

    pub fn into_source(self) -> String {
        match self {
            Loaded::Native(source) | Loaded::Translated(source) => source,
        }
    }

    pub fn is_translated(&self) -> bool {
        matches!(self, Loaded::Translated(_))
    }
}

fn is_coding_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')
}

/// Coding name declared on a single comment line, if any.
fn coding_on_line(line: &str) -> Option<&str> {
    let comment = line.trim_start_matches([' ', '\t', '\x0c']);
    if !comment.starts_with('#') {
        return None;
    }
    for (idx, _) in comment.match_indices("coding") {
        let rest = &comment[idx + "coding".len()..];
        let Some(rest) = rest.strip_prefix([':', '=']) else {
            continue;
        };
        let rest = rest.trim_start_matches([' ', '\t']);
        let end = rest
            .find(|c: char| !is_coding_name_char(c))
            .unwrap_or(rest.len());
        if end > 0 {
            return Some(&rest[..end]);
        }
    }
    None
}

fn is_blank_or_comment(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// The coding declared in the first two lines.
///
/// The second line is only considered when the first is blank or a comment.
pub fn declared_coding(source: &str) -> Option<&str> {
    let mut lines = source.lines();
    let first = lines.next()?;
    if let Some(coding) = coding_on_line(first) {
        return Some(coding);
    }
    if !is_blank_or_comment(first) {
        return None;
    }
    lines.next().and_then(coding_on_line)
}

/// Whether the source declares the lispython coding.
pub fn is_lispython(source: &str) -> bool {
    declared_coding(source) == Some(DIALECT)
}

/// Translate `source` if it is tagged, otherwise hand it back unchanged.
///
/// The leading run of blank and comment lines (which holds the declaration)
/// is dropped before translation, since comments are not part of the
/// dialect.
pub fn load_source(source: &str, options: &EmitOptions) -> Result<Loaded, TranslateError> {
    if !is_lispython(source) {
        return Ok(Loaded::Native(source.to_string()));
    }

    let mut body = source;
    while !body.is_empty() {
        let line_end = body.find('\n').map_or(body.len(), |idx| idx + 1);
        if !is_blank_or_comment(&body[..line_end]) {
            break;
        }
        body = &body[line_end..];
    }

    translate_with(body, options).map(Loaded::Translated)
}

/// Read a whole file and run it through [`load_source`].
pub fn load_file(path: impl AsRef<Path>, options: &EmitOptions) -> Result<Loaded, LoadError> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let loaded = load_source(&source, options)?;
    debug!(
        path = %path.display(),
        translated = loaded.is_translated(),
        "loaded source"
    );
    Ok(loaded)
}
