//! Replays command sequences into indented text.

use crate::EmitOptions;
use crate::command::{Action, CommandSequence, Fragment};
use std::fmt::{self, Write};

/// Top-down replayer for one top-level form.
///
/// Indentation changes take effect on the next line that receives text;
/// a line that stays empty gets no padding.
pub struct Emitter<'w, W: Write> {
    out: &'w mut W,
    indent_width: usize,
    level: usize,
    at_line_start: bool,
}

impl<'w, W: Write> Emitter<'w, W> {
    pub fn new(out: &'w mut W, options: &EmitOptions) -> Self {
        Self {
            out,
            indent_width: options.indent_width,
            level: 0,
            at_line_start: true,
        }
    }

    /// Current indentation level, in indent units.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn replay(&mut self, commands: &CommandSequence) -> fmt::Result {
        for action in commands.actions() {
            match action {
                Action::Newline => self.newline()?,
                Action::Indent => self.level += 1,
                Action::Dedent => self.level = self.level.saturating_sub(1),
                Action::Nested(nested) => self.replay(nested)?,
                Action::Group(fragments) => {
                    for fragment in fragments {
                        match fragment {
                            Fragment::Literal(text) => self.write_literal(text)?,
                            Fragment::Nested(nested) => self.replay(nested)?,
                        }
                    }
                }
                Action::Literal(text) => self.write_literal(text)?,
            }
        }
        Ok(())
    }

    fn write_literal(&mut self, text: &str) -> fmt::Result {
        if self.at_line_start {
            let padding = self.level * self.indent_width;
            write!(self.out, "{:padding$}", "")?;
            self.at_line_start = false;
        }
        self.out.write_str(text)
    }

    fn newline(&mut self) -> fmt::Result {
        self.out.write_char('\n')?;
        self.at_line_start = true;
        Ok(())
    }
}
