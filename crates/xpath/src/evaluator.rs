use std::collections::HashSet;

use smallvec::SmallVec;

use crate::compiler::ir::{AxisIR, BinaryOp, ExprIR, NodeTestIR, PathStartIR, StepIR};
use crate::functions;
use crate::model::{NodeKind, XdmNode};
use crate::runtime::{Error, ErrorCode};
use crate::xdm::{XdmValue, string_to_number};

type NodeBuf<N> = SmallVec<[N; 8]>;

/// The dynamic focus: context node, proximity position and context size.
#[derive(Debug, Clone)]
pub(crate) struct Focus<N> {
    pub item: N,
    pub position: usize,
    pub size: usize,
}

pub fn evaluate<N: XdmNode>(expr: &ExprIR, context: &N) -> Result<XdmValue<N>, Error> {
    let focus = Focus { item: context.clone(), position: 1, size: 1 };
    eval(expr, &focus)
}

fn type_error<N: XdmNode>(what: &str, got: &XdmValue<N>) -> Error {
    Error::from_code(ErrorCode::XPTY0004, format!("{what} requires a node-set, got {}", got.type_name()))
}

fn eval<N: XdmNode>(e: &ExprIR, focus: &Focus<N>) -> Result<XdmValue<N>, Error> {
    Ok(match e {
        ExprIR::String(s) => XdmValue::String(s.clone()),
        ExprIR::Number(n) => XdmValue::Number(*n),
        ExprIR::Negate(inner) => XdmValue::Number(-eval(inner, focus)?.to_number()),
        ExprIR::Binary { op: BinaryOp::Or, left, right } => {
            XdmValue::Boolean(eval(left, focus)?.to_boolean() || eval(right, focus)?.to_boolean())
        }
        ExprIR::Binary { op: BinaryOp::And, left, right } => {
            XdmValue::Boolean(eval(left, focus)?.to_boolean() && eval(right, focus)?.to_boolean())
        }
        ExprIR::Binary { op, left, right } => {
            let l = eval(left, focus)?;
            let r = eval(right, focus)?;
            match op {
                BinaryOp::Add => XdmValue::Number(l.to_number() + r.to_number()),
                BinaryOp::Sub => XdmValue::Number(l.to_number() - r.to_number()),
                BinaryOp::Mul => XdmValue::Number(l.to_number() * r.to_number()),
                BinaryOp::Div => XdmValue::Number(l.to_number() / r.to_number()),
                BinaryOp::Mod => XdmValue::Number(l.to_number() % r.to_number()),
                _ => XdmValue::Boolean(compare_values(*op, &l, &r)),
            }
        }
        ExprIR::Union(parts) => {
            let mut out = Vec::new();
            for p in parts {
                let v = eval(p, focus)?;
                match v {
                    XdmValue::NodeSet(nodes) => out.extend(nodes),
                    other => return Err(type_error("union operand", &other)),
                }
            }
            XdmValue::NodeSet(doc_order_distinct(out))
        }
        ExprIR::Path { start, steps } => {
            let mut nodes = match start {
                PathStartIR::Root => vec![focus.item.root()],
                PathStartIR::ContextItem => vec![focus.item.clone()],
                PathStartIR::Expr(e) => match eval(e, focus)? {
                    XdmValue::NodeSet(nodes) => nodes,
                    other => return Err(type_error("path step input", &other)),
                },
            };
            for step in steps {
                nodes = apply_step(&nodes, step)?;
            }
            XdmValue::NodeSet(nodes)
        }
        ExprIR::Filter { input, predicates } => {
            let mut nodes: NodeBuf<N> = match eval(input, focus)? {
                XdmValue::NodeSet(nodes) => nodes.into_iter().collect(),
                other => return Err(type_error("predicate", &other)),
            };
            for p in predicates {
                nodes = filter(nodes, p)?;
            }
            XdmValue::NodeSet(nodes.into_vec())
        }
        ExprIR::Call { function, args } => {
            let values = args.iter().map(|a| eval(a, focus)).collect::<Result<Vec<_>, _>>()?;
            let result = functions::call(*function, focus, values)?;
            tracing::trace!(function = ?function, result = %functions::describe(&result), "xpath function call");
            result
        }
    })
}

fn apply_step<N: XdmNode>(nodes: &[N], step: &StepIR) -> Result<Vec<N>, Error> {
    let mut out = Vec::new();
    for n in nodes {
        let mut matched: NodeBuf<N> = axis_nodes(n, step.axis).into_iter().filter(|c| node_test(c, step)).collect();
        for p in &step.predicates {
            matched = filter(matched, p)?;
        }
        out.extend(matched);
    }
    Ok(doc_order_distinct(out))
}

/// Keep the candidates for which the predicate holds. A numeric predicate selects by position.
fn filter<N: XdmNode>(candidates: NodeBuf<N>, predicate: &ExprIR) -> Result<NodeBuf<N>, Error> {
    let size = candidates.len();
    let mut kept = NodeBuf::new();
    for (i, c) in candidates.into_iter().enumerate() {
        let focus = Focus { item: c, position: i + 1, size };
        let keep = match eval(predicate, &focus)? {
            XdmValue::Number(x) => x == focus.position as f64,
            other => other.to_boolean(),
        };
        if keep {
            kept.push(focus.item);
        }
    }
    Ok(kept)
}

fn node_test<N: XdmNode>(n: &N, step: &StepIR) -> bool {
    let principal = if step.axis == AxisIR::Attribute { NodeKind::Attribute } else { NodeKind::Element };
    match &step.test {
        NodeTestIR::AnyKind => true,
        NodeTestIR::KindText => n.kind() == NodeKind::Text,
        NodeTestIR::KindComment => n.kind() == NodeKind::Comment,
        NodeTestIR::KindProcessingInstruction(target) => {
            n.kind() == NodeKind::ProcessingInstruction
                && target.as_ref().is_none_or(|t| n.name().is_some_and(|q| &q.local == t))
        }
        NodeTestIR::WildcardAny => n.kind() == principal,
        NodeTestIR::NsWildcard(uri) => {
            n.kind() == principal && n.name().and_then(|q| q.ns_uri).is_some_and(|u| &u == uri)
        }
        NodeTestIR::Name(expected) => n.kind() == principal && n.name().is_some_and(|q| &q.expanded() == expected),
    }
}

fn push_descendants<N: XdmNode>(n: &N, out: &mut Vec<N>) {
    for c in n.children() {
        out.push(c.clone());
        push_descendants(&c, out);
    }
}

/// Subtree of `n` in reverse document order, `n` itself last.
fn push_subtree_reversed<N: XdmNode>(n: &N, out: &mut Vec<N>) {
    for c in n.children().iter().rev() {
        push_subtree_reversed(c, out);
    }
    out.push(n.clone());
}

fn siblings<N: XdmNode>(n: &N) -> (Vec<N>, Vec<N>) {
    if n.kind() == NodeKind::Attribute {
        return (Vec::new(), Vec::new());
    }
    let Some(parent) = n.parent() else {
        return (Vec::new(), Vec::new());
    };
    let all = parent.children();
    match all.iter().position(|c| c == n) {
        Some(i) => (all[..i].to_vec(), all[i + 1..].to_vec()),
        None => (Vec::new(), Vec::new()),
    }
}

/// Nodes reachable along `axis`, in axis order (reverse document order for reverse axes).
fn axis_nodes<N: XdmNode>(n: &N, axis: AxisIR) -> Vec<N> {
    let mut out = Vec::new();
    match axis {
        AxisIR::SelfAxis => out.push(n.clone()),
        AxisIR::Child => out = n.children(),
        AxisIR::Attribute => out = n.attributes(),
        AxisIR::Descendant => push_descendants(n, &mut out),
        AxisIR::DescendantOrSelf => {
            out.push(n.clone());
            push_descendants(n, &mut out);
        }
        AxisIR::Parent => out.extend(n.parent()),
        AxisIR::Ancestor | AxisIR::AncestorOrSelf => {
            if axis == AxisIR::AncestorOrSelf {
                out.push(n.clone());
            }
            let mut cur = n.parent();
            while let Some(p) = cur {
                cur = p.parent();
                out.push(p);
            }
        }
        AxisIR::FollowingSibling => out = siblings(n).1,
        AxisIR::PrecedingSibling => out = siblings(n).0.into_iter().rev().collect(),
        AxisIR::Following => {
            let mut cur = n.clone();
            if n.kind() == NodeKind::Attribute {
                if let Some(owner) = n.parent() {
                    push_descendants(&owner, &mut out);
                    cur = owner;
                }
            }
            loop {
                for s in siblings(&cur).1 {
                    out.push(s.clone());
                    push_descendants(&s, &mut out);
                }
                match cur.parent() {
                    Some(p) => cur = p,
                    None => break,
                }
            }
        }
        AxisIR::Preceding => {
            let mut cur = match n.kind() {
                NodeKind::Attribute => n.parent().unwrap_or_else(|| n.clone()),
                _ => n.clone(),
            };
            loop {
                for s in siblings(&cur).0.iter().rev() {
                    push_subtree_reversed(s, &mut out);
                }
                match cur.parent() {
                    Some(p) => cur = p,
                    None => break,
                }
            }
        }
    }
    out
}

fn doc_order_distinct<N: XdmNode>(nodes: Vec<N>) -> Vec<N> {
    let mut seen = HashSet::with_capacity(nodes.len());
    let mut out: Vec<N> = nodes.into_iter().filter(|n| seen.insert(n.clone())).collect();
    out.sort_by(|a, b| a.compare_document_order(b));
    out
}

fn compare_numbers(op: BinaryOp, a: f64, b: f64) -> bool {
    match op {
        BinaryOp::Eq => a == b,
        BinaryOp::Ne => a != b,
        BinaryOp::Lt => a < b,
        BinaryOp::Le => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::Ge => a >= b,
        _ => false,
    }
}

fn is_equality(op: BinaryOp) -> bool {
    matches!(op, BinaryOp::Eq | BinaryOp::Ne)
}

fn flip(op: BinaryOp) -> BinaryOp {
    match op {
        BinaryOp::Lt => BinaryOp::Gt,
        BinaryOp::Le => BinaryOp::Ge,
        BinaryOp::Gt => BinaryOp::Lt,
        BinaryOp::Ge => BinaryOp::Le,
        other => other,
    }
}

fn compare_strings(op: BinaryOp, a: &str, b: &str) -> bool {
    if is_equality(op) {
        (a == b) == (op == BinaryOp::Eq)
    } else {
        compare_numbers(op, string_to_number(a), string_to_number(b))
    }
}

/// XPath 1.0 comparison: node sets compare existentially against the other operand.
fn compare_values<N: XdmNode>(op: BinaryOp, l: &XdmValue<N>, r: &XdmValue<N>) -> bool {
    match (l, r) {
        (XdmValue::NodeSet(a), XdmValue::NodeSet(b)) => {
            let right: Vec<String> = b.iter().map(|n| n.string_value()).collect();
            a.iter().any(|x| {
                let sx = x.string_value();
                right.iter().any(|sy| compare_strings(op, &sx, sy))
            })
        }
        (XdmValue::NodeSet(a), XdmValue::Boolean(b)) => {
            compare_scalars::<N>(op, &XdmValue::Boolean(!a.is_empty()), &XdmValue::Boolean(*b))
        }
        (XdmValue::NodeSet(a), XdmValue::Number(x)) => {
            a.iter().any(|n| compare_numbers(op, string_to_number(&n.string_value()), *x))
        }
        (XdmValue::NodeSet(a), XdmValue::String(s)) => a.iter().any(|n| compare_strings(op, &n.string_value(), s)),
        (_, XdmValue::NodeSet(_)) => compare_values(flip(op), r, l),
        _ => compare_scalars(op, l, r),
    }
}

fn compare_scalars<N: XdmNode>(op: BinaryOp, l: &XdmValue<N>, r: &XdmValue<N>) -> bool {
    if !is_equality(op) {
        return compare_numbers(op, l.to_number(), r.to_number());
    }
    let eq = match (l, r) {
        (XdmValue::Boolean(_), _) | (_, XdmValue::Boolean(_)) => l.to_boolean() == r.to_boolean(),
        (XdmValue::Number(_), _) | (_, XdmValue::Number(_)) => l.to_number() == r.to_number(),
        _ => l.to_string_value() == r.to_string_value(),
    };
    eq == (op == BinaryOp::Eq)
}
