//! Syntax tree produced by the parser. Names are still prefixed; the compiler resolves them.

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Binary { op: BinaryOp, left: Box<Expr>, right: Box<Expr> },
    Negate(Box<Expr>),
    Union(Vec<Expr>),
    Path(PathExpr),
    Filter { primary: Box<Expr>, predicates: Vec<Expr> },
    Literal(Literal),
    FunctionCall { name: PrefixedName, args: Vec<Expr> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixedName {
    pub prefix: Option<String>,
    pub local: String,
}

impl PrefixedName {
    pub fn parse(lexical: &str) -> Self {
        match lexical.split_once(':') {
            Some((p, l)) => Self { prefix: Some(p.to_string()), local: l.to_string() },
            None => Self { prefix: None, local: lexical.to_string() },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathExpr {
    pub start: PathStart,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathStart {
    /// `/...`: the root of the context node's tree.
    Root,
    /// A relative path evaluated from the context node.
    Context,
    /// A filter expression followed by steps, e.g. `(a|b)/c`.
    Expr(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub axis: Axis,
    pub test: NodeTest,
    pub predicates: Vec<Expr>,
}

impl Step {
    pub(crate) fn descendant_or_self_node() -> Self {
        Self { axis: Axis::DescendantOrSelf, test: NodeTest::AnyKind, predicates: Vec::new() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
    DescendantOrSelf,
    Parent,
    Ancestor,
    AncestorOrSelf,
    FollowingSibling,
    PrecedingSibling,
    Following,
    Preceding,
    Attribute,
    SelfAxis,
}

impl Axis {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "child" => Axis::Child,
            "descendant" => Axis::Descendant,
            "descendant-or-self" => Axis::DescendantOrSelf,
            "parent" => Axis::Parent,
            "ancestor" => Axis::Ancestor,
            "ancestor-or-self" => Axis::AncestorOrSelf,
            "following-sibling" => Axis::FollowingSibling,
            "preceding-sibling" => Axis::PrecedingSibling,
            "following" => Axis::Following,
            "preceding" => Axis::Preceding,
            "attribute" => Axis::Attribute,
            "self" => Axis::SelfAxis,
            _ => return None,
        })
    }

    /// Reverse axes number their proximity positions against document order.
    pub fn is_reverse(self) -> bool {
        matches!(self, Axis::Parent | Axis::Ancestor | Axis::AncestorOrSelf | Axis::PrecedingSibling | Axis::Preceding)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeTest {
    Name(PrefixedName),
    Wildcard,
    NsWildcard(String),
    AnyKind,
    Text,
    Comment,
    ProcessingInstruction(Option<String>),
}
