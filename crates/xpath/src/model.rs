use core::cmp::Ordering;
use core::fmt;
use core::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QName {
    pub prefix: Option<String>,
    pub local: String,
    pub ns_uri: Option<String>,
}

impl QName {
    pub fn local(local: impl Into<String>) -> Self {
        Self { prefix: None, local: local.into(), ns_uri: None }
    }

    pub fn expanded(&self) -> ExpandedName {
        ExpandedName { ns_uri: self.ns_uri.clone(), local: self.local.clone() }
    }
}

impl fmt::Display for QName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.prefix {
            Some(p) if !p.is_empty() => write!(f, "{p}:{}", self.local),
            _ => f.write_str(&self.local),
        }
    }
}

/// A namespace-resolved name. Two nodes match a name test when their expanded names are equal,
/// regardless of the prefix either side used.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedName {
    pub ns_uri: Option<String>,
    pub local: String,
}

impl ExpandedName {
    pub fn new(ns_uri: Option<String>, local: impl Into<String>) -> Self {
        Self { ns_uri, local: local.into() }
    }
}

impl fmt::Display for ExpandedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ns_uri {
            Some(ns) => write!(f, "Q{{{ns}}}{}", self.local),
            None => f.write_str(&self.local),
        }
    }
}

/// Compare two nodes by ancestry and stable sibling order.
///
/// - If one node is an ancestor of the other, the ancestor precedes the descendant.
/// - Among siblings, attributes come first, then child nodes; within each group the order
///   provided by the tree is preserved.
/// - Nodes of unrelated trees compare as `Equal`; trees that can hold nodes from several roots
///   must override [`XdmNode::compare_document_order`].
pub fn compare_by_ancestry<N: XdmNode>(a: &N, b: &N) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }
    fn path_to_root<N: XdmNode>(n: &N) -> Vec<N> {
        let mut p = vec![n.clone()];
        let mut cur = n.parent();
        while let Some(parent) = cur {
            cur = parent.parent();
            p.push(parent);
        }
        p.reverse();
        p
    }
    let pa = path_to_root(a);
    let pb = path_to_root(b);
    let len = pa.len().min(pb.len());
    let mut i = 0usize;
    while i < len && pa[i] == pb[i] {
        i += 1;
    }
    if i == len {
        return pa.len().cmp(&pb.len());
    }
    if i == 0 {
        return Ordering::Equal;
    }
    let parent = &pa[i - 1];
    let mut sibs: Vec<N> = parent.attributes();
    sibs.extend(parent.children());
    let posa = sibs.iter().position(|n| n == &pa[i]);
    let posb = sibs.iter().position(|n| n == &pb[i]);
    match (posa, posb) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => Ordering::Equal,
    }
}

/// Read-only view of a node in an XML tree. Equality is node identity, never value equality.
pub trait XdmNode: Clone + Eq + Hash + fmt::Debug + Send + Sync {
    fn kind(&self) -> NodeKind;
    fn name(&self) -> Option<QName>;
    fn string_value(&self) -> String;

    fn parent(&self) -> Option<Self>;
    fn children(&self) -> Vec<Self>;
    fn attributes(&self) -> Vec<Self>;

    fn compare_document_order(&self, other: &Self) -> Ordering {
        compare_by_ancestry(self, other)
    }

    fn root(&self) -> Self {
        let mut cur = self.clone();
        while let Some(p) = cur.parent() {
            cur = p;
        }
        cur
    }

    /// True when `self` is a proper ancestor of `other`. Attributes count as descendants of
    /// their owner element.
    fn is_ancestor_of(&self, other: &Self) -> bool {
        let mut cur = other.parent();
        while let Some(p) = cur {
            if &p == self {
                return true;
            }
            cur = p.parent();
        }
        false
    }
}
