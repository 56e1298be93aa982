use crate::functions::CoreFunction;
use crate::model::ExpandedName;

pub use crate::parser::ast::{Axis as AxisIR, BinaryOp};

#[derive(Debug, Clone, PartialEq)]
pub enum NodeTestIR {
    AnyKind,                                   // node()
    Name(ExpandedName),                        // QName
    WildcardAny,                               // *
    NsWildcard(String),                        // ns:*
    KindText,                                  // text()
    KindComment,                               // comment()
    KindProcessingInstruction(Option<String>), // processing-instruction('target'?)
}

pub type Predicates = Vec<ExprIR>;

#[derive(Debug, Clone, PartialEq)]
pub struct StepIR {
    pub axis: AxisIR,
    pub test: NodeTestIR,
    pub predicates: Predicates,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PathStartIR {
    Root,
    ContextItem,
    Expr(Box<ExprIR>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprIR {
    String(String),
    Number(f64),
    Binary { op: BinaryOp, left: Box<ExprIR>, right: Box<ExprIR> },
    Negate(Box<ExprIR>),
    Union(Vec<ExprIR>),
    Path { start: PathStartIR, steps: Vec<StepIR> },
    Filter { input: Box<ExprIR>, predicates: Predicates },
    Call { function: CoreFunction, args: Vec<ExprIR> },
}
