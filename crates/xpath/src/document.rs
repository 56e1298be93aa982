//! Immutable XML trees for request `<Content>`.
//!
//! A document is parsed once and stored as an arena in pre-order: every element is followed by
//! its attributes and then its descendants, so the arena index doubles as the document-order key.
//! Nodes are cheap handles (`Arc` + index) and can be shared across threads.
//!
//! ```
//! use xacml_xpath::{XmlDocument, XdmNode, NodeKind};
//!
//! let doc = XmlDocument::parse(r#"<record id="7"><name>Ann</name></record>"#).unwrap();
//! let record = doc.document_element().unwrap();
//! assert_eq!(record.kind(), NodeKind::Element);
//! assert_eq!(record.attributes().len(), 1);
//! assert_eq!(record.string_value(), "Ann");
//! ```
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use roxmltree::NodeType;

use crate::model::{NodeKind, QName, XdmNode};
use crate::runtime::{Error, ErrorCode};

#[derive(Debug)]
struct NodeData {
    kind: NodeKind,
    name: Option<QName>,
    value: Option<String>,
    parent: Option<usize>,
    attributes: Vec<usize>,
    children: Vec<usize>,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<NodeData>,
}

/// A parsed XML document. Cloning shares the underlying tree.
#[derive(Clone)]
pub struct XmlDocument {
    tree: Arc<Tree>,
}

impl fmt::Debug for XmlDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlDocument").field("nodes", &self.tree.nodes.len()).finish()
    }
}

impl XmlDocument {
    pub fn parse(text: &str) -> Result<Self, Error> {
        let source = roxmltree::Document::parse(text)
            .map_err(|e| Error::from_code(ErrorCode::FODC0006, format!("malformed XML content: {e}")))?;
        let mut nodes = Vec::new();
        append(&mut nodes, None, source.root());
        Ok(Self { tree: Arc::new(Tree { nodes }) })
    }

    /// The document node.
    pub fn root(&self) -> XmlNode {
        XmlNode { tree: self.tree.clone(), idx: 0 }
    }

    pub fn document_element(&self) -> Option<XmlNode> {
        self.root().children().into_iter().find(|n| n.kind() == NodeKind::Element)
    }

    /// Number of nodes in the tree, attributes included.
    pub fn len(&self) -> usize {
        self.tree.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.nodes.len() <= 1
    }

    pub fn same_document(&self, other: &XmlDocument) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree)
    }
}

fn push(nodes: &mut Vec<NodeData>, parent: Option<usize>, kind: NodeKind, name: Option<QName>, value: Option<String>) -> usize {
    let idx = nodes.len();
    nodes.push(NodeData { kind, name, value, parent, attributes: Vec::new(), children: Vec::new() });
    idx
}

fn append(nodes: &mut Vec<NodeData>, parent: Option<usize>, node: roxmltree::Node<'_, '_>) {
    let idx = match node.node_type() {
        NodeType::Root => push(nodes, None, NodeKind::Document, None, None),
        NodeType::Element => {
            let tag = node.tag_name();
            let ns_uri = tag.namespace().map(str::to_string);
            let prefix = tag
                .namespace()
                .and_then(|uri| node.lookup_prefix(uri))
                .filter(|p| !p.is_empty())
                .map(str::to_string);
            let name = QName { prefix, local: tag.name().to_string(), ns_uri };
            let idx = push(nodes, parent, NodeKind::Element, Some(name), None);
            for attr in node.attributes() {
                let ns_uri = attr.namespace().map(str::to_string);
                let prefix = attr
                    .namespace()
                    .and_then(|uri| node.lookup_prefix(uri))
                    .filter(|p| !p.is_empty())
                    .map(str::to_string);
                let name = QName { prefix, local: attr.name().to_string(), ns_uri };
                let a = push(nodes, Some(idx), NodeKind::Attribute, Some(name), Some(attr.value().to_string()));
                nodes[idx].attributes.push(a);
            }
            idx
        }
        NodeType::Text => push(nodes, parent, NodeKind::Text, None, node.text().map(str::to_string)),
        NodeType::Comment => push(nodes, parent, NodeKind::Comment, None, node.text().map(str::to_string)),
        NodeType::PI => {
            let (target, value) = node
                .pi()
                .map(|pi| (pi.target.to_string(), pi.value.map(str::to_string)))
                .unwrap_or_default();
            push(nodes, parent, NodeKind::ProcessingInstruction, Some(QName::local(target)), value)
        }
    };
    if let Some(p) = parent {
        nodes[p].children.push(idx);
    }
    for child in node.children() {
        append(nodes, Some(idx), child);
    }
}

/// Handle to a node of an [`XmlDocument`].
#[derive(Clone)]
pub struct XmlNode {
    tree: Arc<Tree>,
    idx: usize,
}

impl XmlNode {
    fn data(&self) -> &NodeData {
        &self.tree.nodes[self.idx]
    }

    fn at(&self, idx: usize) -> XmlNode {
        XmlNode { tree: self.tree.clone(), idx }
    }

    /// Pre-order position inside the owning document.
    pub fn position(&self) -> usize {
        self.idx
    }

    pub fn document(&self) -> XmlDocument {
        XmlDocument { tree: self.tree.clone() }
    }
}

impl PartialEq for XmlNode {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.tree, &other.tree) && self.idx == other.idx
    }
}

impl Eq for XmlNode {}

impl Hash for XmlNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Arc::as_ptr(&self.tree).hash(state);
        self.idx.hash(state);
    }
}

impl fmt::Debug for XmlNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.data();
        f.debug_struct("XmlNode").field("kind", &d.kind).field("name", &d.name).field("idx", &self.idx).finish()
    }
}

impl XdmNode for XmlNode {
    fn kind(&self) -> NodeKind {
        self.data().kind
    }

    fn name(&self) -> Option<QName> {
        self.data().name.clone()
    }

    fn string_value(&self) -> String {
        let d = self.data();
        match d.kind {
            NodeKind::Element | NodeKind::Document => {
                let mut out = String::new();
                let mut stack: Vec<usize> = d.children.iter().rev().copied().collect();
                while let Some(i) = stack.pop() {
                    let n = &self.tree.nodes[i];
                    if n.kind == NodeKind::Text {
                        if let Some(v) = &n.value {
                            out.push_str(v);
                        }
                    }
                    stack.extend(n.children.iter().rev().copied());
                }
                out
            }
            _ => d.value.clone().unwrap_or_default(),
        }
    }

    fn parent(&self) -> Option<Self> {
        self.data().parent.map(|p| self.at(p))
    }

    fn children(&self) -> Vec<Self> {
        self.data().children.iter().map(|&i| self.at(i)).collect()
    }

    fn attributes(&self) -> Vec<Self> {
        self.data().attributes.iter().map(|&i| self.at(i)).collect()
    }

    fn compare_document_order(&self, other: &Self) -> Ordering {
        if Arc::ptr_eq(&self.tree, &other.tree) {
            self.idx.cmp(&other.idx)
        } else {
            (Arc::as_ptr(&self.tree) as usize).cmp(&(Arc::as_ptr(&other.tree) as usize))
        }
    }

    fn root(&self) -> Self {
        self.at(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arena_is_in_document_order() {
        let doc = XmlDocument::parse(r#"<a x="1"><b/><c y="2">t</c></a>"#).unwrap();
        let a = doc.document_element().unwrap();
        let x = a.attributes()[0].clone();
        let b = a.children()[0].clone();
        let c = a.children()[1].clone();
        assert!(a.position() < x.position());
        assert!(x.position() < b.position());
        assert_eq!(b.compare_document_order(&c), Ordering::Less);
        assert_eq!(x.parent(), Some(a.clone()));
        assert!(a.is_ancestor_of(&x));
        assert_eq!(c.string_value(), "t");
    }

    #[test]
    fn namespaces_are_resolved_on_elements_and_attributes() {
        let doc = XmlDocument::parse(r#"<md:r xmlns:md="urn:m" md:k="v"><plain/></md:r>"#).unwrap();
        let r = doc.document_element().unwrap();
        let name = r.name().unwrap();
        assert_eq!(name.ns_uri.as_deref(), Some("urn:m"));
        assert_eq!(name.prefix.as_deref(), Some("md"));
        assert_eq!(name.to_string(), "md:r");
        let attr = r.attributes()[0].name().unwrap();
        assert_eq!(attr.ns_uri.as_deref(), Some("urn:m"));
        assert_eq!(r.children()[0].name().unwrap().ns_uri, None);
    }

    #[test]
    fn malformed_content_is_rejected() {
        let err = XmlDocument::parse("<a><b></a>").unwrap_err();
        assert_eq!(err.code, ErrorCode::FODC0006);
    }

    #[test]
    fn identity_differs_between_parses() {
        let d1 = XmlDocument::parse("<a/>").unwrap();
        let d2 = XmlDocument::parse("<a/>").unwrap();
        assert_ne!(d1.root(), d2.root());
        assert!(!d1.same_document(&d2));
    }
}
