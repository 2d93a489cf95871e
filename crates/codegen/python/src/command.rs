//! Deferred output commands.
//!
//! Dispatch runs bottom-up, so a node cannot know how deeply its code will
//! be indented. Handlers record what to write as a [`CommandSequence`]; the
//! [`Emitter`](crate::Emitter) resolves indentation when replaying it.

/// A piece of inline text inside a [`Action::Group`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Literal(String),
    Nested(CommandSequence),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Text written as-is.
    Literal(String),
    /// Line terminator.
    Newline,
    /// Raise the indentation level for the lines that follow.
    Indent,
    /// Lower the indentation level for the lines that follow.
    Dedent,
    /// A child node's commands.
    Nested(CommandSequence),
    /// Fragments written back to back on the current line.
    Group(Vec<Fragment>),
}

/// Append-only list of actions recorded for a single form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandSequence {
    actions: Vec<Action>,
}

impl CommandSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }

    pub fn literal(&mut self, text: impl Into<String>) {
        self.push(Action::Literal(text.into()));
    }

    pub fn newline(&mut self) {
        self.push(Action::Newline);
    }

    pub fn group(&mut self, fragments: Vec<Fragment>) {
        self.push(Action::Group(fragments));
    }

    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Whether every `Indent` in this sequence (not counting nested ones) is
    /// closed by a later `Dedent`.
    pub fn is_balanced(&self) -> bool {
        let mut depth: usize = 0;
        for action in &self.actions {
            match action {
                Action::Indent => depth += 1,
                Action::Dedent => match depth.checked_sub(1) {
                    Some(d) => depth = d,
                    None => return false,
                },
                _ => {}
            }
        }
        depth == 0
    }
}
