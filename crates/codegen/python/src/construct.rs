//! Form classification and per-construct command generation.
//!
//! Every form is classified by its head into a [`Construct`] and lowered
//! into a [`CommandSequence`]. Operands are lowered before the form that
//! contains them, so nested forms already carry their own sequences when
//! the parent's handler runs.

use crate::command::{Action, CommandSequence, Fragment};
use rhizome_lispython_ir::{AtomKind, Form, Node};
use tracing::trace;

/// No-op statement emitted for empty block bodies.
pub const PLACEHOLDER_STATEMENT: &str = "pass";

/// Value emitted for a missing expression operand.
pub const PLACEHOLDER_VALUE: &str = "None";

/// Expression emitted for `()` in operand position.
pub const EMPTY_TUPLE: &str = "()";

/// Name emitted for a missing definition name or loop variable.
pub const PLACEHOLDER_NAME: &str = "_";

/// Infix operators rewritten from prefix position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    BitAnd,
    BitXor,
    Mod,
    Gt,
    Lt,
    Le,
    Ge,
    Assign,
    Eq,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "&" => BinaryOp::BitAnd,
            "^" => BinaryOp::BitXor,
            "%" => BinaryOp::Mod,
            ">" => BinaryOp::Gt,
            "<" => BinaryOp::Lt,
            "<=" => BinaryOp::Le,
            ">=" => BinaryOp::Ge,
            "=" => BinaryOp::Assign,
            "==" => BinaryOp::Eq,
            _ => return None,
        })
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::BitAnd => "&",
            BinaryOp::BitXor => "^",
            BinaryOp::Mod => "%",
            BinaryOp::Gt => ">",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::Assign => "=",
            BinaryOp::Eq => "==",
        }
    }
}

/// Simple statements introduced by a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Return,
    Import,
    Break,
    Continue,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Return => "return",
            Keyword::Import => "import",
            Keyword::Break => "break",
            Keyword::Continue => "continue",
        }
    }

    /// Whether the keyword may be followed by one operand.
    pub fn takes_operand(self) -> bool {
        matches!(self, Keyword::Return | Keyword::Import)
    }
}

/// What a form translates to, decided by its head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Def,
    Lambda,
    Class,
    While,
    For,
    If,
    Infix(BinaryOp),
    Keyword(Keyword),
    /// Anything else: the head is called with the remaining operands.
    Call,
    /// `()` produces no output.
    Empty,
}

impl Construct {
    /// Classify a form by the literal text of its head.
    ///
    /// Only identifier atoms can be keywords and only operator atoms are
    /// infix; string literals and nested forms in head position are calls.
    pub fn classify(form: &Form) -> Self {
        let Some(head) = form.head() else {
            return Construct::Empty;
        };
        let Node::Atom(atom) = head else {
            return Construct::Call;
        };

        match atom.kind() {
            AtomKind::Operator => BinaryOp::from_symbol(atom.as_str())
                .map_or(Construct::Call, Construct::Infix),
            AtomKind::Str => Construct::Call,
            AtomKind::Identifier => match atom.as_str() {
                "def" => Construct::Def,
                "lambda" => Construct::Lambda,
                "class" => Construct::Class,
                "while" => Construct::While,
                "for" => Construct::For,
                "if" => Construct::If,
                "return" => Construct::Keyword(Keyword::Return),
                "import" => Construct::Keyword(Keyword::Import),
                "break" => Construct::Keyword(Keyword::Break),
                "continue" => Construct::Keyword(Keyword::Continue),
                _ => Construct::Call,
            },
        }
    }
}

/// Build the command sequence for a form.
pub fn lower(form: &Form) -> CommandSequence {
    let construct = Construct::classify(form);
    trace!(?construct, arity = form.operands().len(), "lowering form");

    let args = form.operands();
    let mut out = CommandSequence::new();

    match construct {
        Construct::Empty => {}
        Construct::Def => lower_definition("def", args, &mut out),
        Construct::Class => lower_definition("class", args, &mut out),
        Construct::Lambda => lower_lambda(args, &mut out),
        Construct::While => {
            let header = vec![
                Fragment::Literal("while ".into()),
                value(args.first()),
                Fragment::Literal(":".into()),
            ];
            block(&mut out, header, args.get(1..).unwrap_or(&[]));
        }
        Construct::For => lower_for(args, &mut out),
        Construct::If => lower_if(args, &mut out),
        Construct::Infix(op) => lower_infix(op, args, &mut out),
        Construct::Keyword(keyword) => {
            let mut fragments = vec![Fragment::Literal(keyword.as_str().into())];
            if keyword.takes_operand() {
                if let Some(arg) = args.first() {
                    fragments.push(Fragment::Literal(" ".into()));
                    fragments.push(operand(arg));
                }
            }
            out.group(fragments);
        }
        Construct::Call => lower_call(form, &mut out),
    }

    debug_assert!(out.is_balanced(), "unbalanced indentation for {}", form);
    out
}

/// Render a node inline: atoms as their text, forms as their commands.
/// An empty form has no commands of its own and becomes an empty tuple.
fn operand(node: &Node) -> Fragment {
    match node {
        Node::Atom(atom) => Fragment::Literal(atom.as_str().to_string()),
        Node::Form(form) if form.is_empty() => Fragment::Literal(EMPTY_TUPLE.into()),
        Node::Form(form) => Fragment::Nested(lower(form)),
    }
}

/// An expression operand that may be absent.
fn value(node: Option<&Node>) -> Fragment {
    node.map_or_else(|| Fragment::Literal(PLACEHOLDER_VALUE.into()), operand)
}

/// A node in statement position.
fn statement(node: &Node) -> Action {
    match node {
        Node::Atom(atom) => Action::Literal(atom.as_str().to_string()),
        Node::Form(form) if form.is_empty() => Action::Literal(EMPTY_TUPLE.into()),
        Node::Form(form) => Action::Nested(lower(form)),
    }
}

/// Elements of a parameter, base or variable list. A bare atom is a
/// one-element list.
fn list_items(node: Option<&Node>) -> &[Node] {
    match node {
        None => &[],
        Some(Node::Form(form)) => form.items(),
        Some(atom) => std::slice::from_ref(atom),
    }
}

/// Push `items` rendered inline and separated by `, `.
fn push_joined(fragments: &mut Vec<Fragment>, items: &[Node], separator: &str) {
    for (idx, item) in items.iter().enumerate() {
        if idx > 0 {
            fragments.push(Fragment::Literal(separator.to_string()));
        }
        fragments.push(operand(item));
    }
}

/// Header line, then each body statement on its own indented line. An empty
/// body becomes a single placeholder statement.
fn block(out: &mut CommandSequence, header: Vec<Fragment>, body: &[Node]) {
    out.group(header);
    out.newline();
    out.push(Action::Indent);
    if body.is_empty() {
        out.literal(PLACEHOLDER_STATEMENT);
        out.newline();
    } else {
        for node in body {
            out.push(statement(node));
            out.newline();
        }
    }
    out.push(Action::Dedent);
}

/// `(def name (params) body...)` and `(class Name (bases) body...)`.
fn lower_definition(keyword: &str, args: &[Node], out: &mut CommandSequence) {
    let mut header = vec![Fragment::Literal(format!("{} ", keyword))];
    header.push(
        args.first()
            .map_or_else(|| Fragment::Literal(PLACEHOLDER_NAME.into()), operand),
    );
    header.push(Fragment::Literal("(".into()));
    push_joined(&mut header, list_items(args.get(1)), ", ");
    header.push(Fragment::Literal("):".into()));
    block(out, header, args.get(2..).unwrap_or(&[]));
}

/// `(lambda (params) expr)`; operands past the expression are ignored.
fn lower_lambda(args: &[Node], out: &mut CommandSequence) {
    let params = list_items(args.first());
    let mut fragments = vec![Fragment::Literal("lambda".into())];
    if !params.is_empty() {
        fragments.push(Fragment::Literal(" ".into()));
        push_joined(&mut fragments, params, ", ");
    }
    fragments.push(Fragment::Literal(": ".into()));
    fragments.push(value(args.get(1)));
    out.group(fragments);
}

/// `(for (vars) iterable body...)`.
fn lower_for(args: &[Node], out: &mut CommandSequence) {
    let vars = list_items(args.first());
    let mut header = vec![Fragment::Literal("for ".into())];
    if vars.is_empty() {
        header.push(Fragment::Literal(PLACEHOLDER_NAME.into()));
    } else {
        push_joined(&mut header, vars, ", ");
    }
    header.push(Fragment::Literal(" in ".into()));
    header.push(value(args.get(1)));
    header.push(Fragment::Literal(":".into()));
    block(out, header, args.get(2..).unwrap_or(&[]));
}

/// `(if cond (then...) (else...))`. Branches are lists of statements; a
/// branch given as a bare atom is a single statement.
fn lower_if(args: &[Node], out: &mut CommandSequence) {
    let header = vec![
        Fragment::Literal("if ".into()),
        value(args.first()),
        Fragment::Literal(":".into()),
    ];
    block(out, header, list_items(args.get(1)));

    if let Some(otherwise) = args.get(2) {
        block(
            out,
            vec![Fragment::Literal("else:".into())],
            list_items(Some(otherwise)),
        );
    }
}

/// Prefix to infix. Operands are written as-is, without regrouping, so
/// `(* (+ a b) c)` becomes `a + b * c`. Extra operands chain with the same
/// operator.
fn lower_infix(op: BinaryOp, args: &[Node], out: &mut CommandSequence) {
    let separator = format!(" {} ", op.symbol());
    let mut fragments = Vec::new();
    if args.len() >= 2 {
        push_joined(&mut fragments, args, &separator);
    } else {
        fragments.push(value(args.first()));
        fragments.push(Fragment::Literal(separator));
        fragments.push(Fragment::Literal(PLACEHOLDER_VALUE.into()));
    }
    out.group(fragments);
}

/// `(callee args...)` to `callee(a, b)`; a callee that is itself a form is
/// parenthesized first.
fn lower_call(form: &Form, out: &mut CommandSequence) {
    let mut fragments = Vec::new();
    match form.head() {
        Some(Node::Form(callee)) => {
            fragments.push(Fragment::Literal("(".into()));
            fragments.push(Fragment::Nested(lower(callee)));
            fragments.push(Fragment::Literal(")(".into()));
        }
        Some(Node::Atom(callee)) => {
            fragments.push(Fragment::Literal(callee.as_str().to_string()));
            fragments.push(Fragment::Literal("(".into()));
        }
        None => return,
    }
    push_joined(&mut fragments, form.operands(), ", ");
    fragments.push(Fragment::Literal(")".into()));
    out.group(fragments);
}
