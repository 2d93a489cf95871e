//! Atoms, forms and programs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Binary operator symbols recognized by the reader, in no particular order.
pub const OPERATORS: &[&str] = &[
    "+", "-", "*", "/", "&", "^", "%", ">", "<", "<=", ">=", "=", "==",
];

/// Lexical category of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AtomKind {
    /// Alphanumerics plus `_` and `.` (covers numbers and dotted names).
    Identifier,
    /// One of [`OPERATORS`].
    Operator,
    /// Double-quoted literal, quotes included.
    Str,
}

impl AtomKind {
    /// Infers the kind of already-tokenized text.
    pub fn classify(text: &str) -> Self {
        if text.starts_with('"') {
            AtomKind::Str
        } else if OPERATORS.contains(&text) {
            AtomKind::Operator
        } else {
            AtomKind::Identifier
        }
    }
}

/// A leaf token. The text is kept exactly as it appeared in the source.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    kind: AtomKind,
    text: String,
}

impl Atom {
    pub fn new(kind: AtomKind, text: impl Into<String>) -> Self {
        Atom {
            kind,
            text: text.into(),
        }
    }

    pub fn identifier(text: impl Into<String>) -> Self {
        Atom::new(AtomKind::Identifier, text)
    }

    pub fn operator(text: impl Into<String>) -> Self {
        Atom::new(AtomKind::Operator, text)
    }

    pub fn string(text: impl Into<String>) -> Self {
        Atom::new(AtomKind::Str, text)
    }

    pub fn kind(&self) -> AtomKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for Atom {
    fn from(text: &str) -> Self {
        Atom::new(AtomKind::classify(text), text)
    }
}

/// A parenthesized list of nodes.
///
/// The first child is the head and decides how the form is translated.
/// Forms are built once by the reader and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Form {
    items: Vec<Node>,
}

impl Form {
    pub fn new(items: Vec<Node>) -> Self {
        Form { items }
    }

    /// Returns the head node, if the form is not empty.
    pub fn head(&self) -> Option<&Node> {
        self.items.first()
    }

    /// Returns the nodes after the head.
    pub fn operands(&self) -> &[Node] {
        self.items.get(1..).unwrap_or(&[])
    }

    pub fn items(&self) -> &[Node] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<Node> {
        self.items
    }
}

/// Either a leaf atom or a nested form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    Atom(Atom),
    Form(Form),
}

impl Node {
    /// Returns the atom if this node is one.
    pub fn as_atom(&self) -> Option<&Atom> {
        match self {
            Node::Atom(atom) => Some(atom),
            Node::Form(_) => None,
        }
    }

    /// Returns the form if this node is one.
    pub fn as_form(&self) -> Option<&Form> {
        match self {
            Node::Form(form) => Some(form),
            Node::Atom(_) => None,
        }
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Node::Atom(_))
    }
}

impl From<Atom> for Node {
    fn from(atom: Atom) -> Self {
        Node::Atom(atom)
    }
}

impl From<Form> for Node {
    fn from(form: Form) -> Self {
        Node::Form(form)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Atom(atom) => atom.fmt(f),
            Node::Form(form) => form.fmt(f),
        }
    }
}

impl fmt::Display for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (idx, item) in self.items.iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            item.fmt(f)?;
        }
        f.write_str(")")
    }
}

/// The ordered top-level forms of one source text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    forms: Vec<Form>,
}

impl Program {
    pub fn new(forms: Vec<Form>) -> Self {
        Program { forms }
    }

    pub fn forms(&self) -> &[Form] {
        &self.forms
    }

    pub fn len(&self) -> usize {
        self.forms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms.is_empty()
    }

    pub fn into_forms(self) -> Vec<Form> {
        self.forms
    }
}

impl IntoIterator for Program {
    type Item = Form;
    type IntoIter = std::vec::IntoIter<Form>;

    fn into_iter(self) -> Self::IntoIter {
        self.forms.into_iter()
    }
}

// Serialization/deserialization support
impl Serialize for Atom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.text)
    }
}

impl<'de> Deserialize<'de> for Atom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        Ok(Atom::new(AtomKind::classify(&text), text))
    }
}

impl Serialize for Form {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Form {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Form::new(Vec::deserialize(deserializer)?))
    }
}

impl Serialize for Program {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.forms.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Program {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Program::new(Vec::deserialize(deserializer)?))
    }
}
