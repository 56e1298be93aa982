//! XML content documents and XPath location paths for attribute `<Content>`.
//!
//! Expressions use XPath 1.0 syntax and value semantics (node sets, numbers, strings, booleans)
//! without variables. Namespace prefixes are bound through a [`StaticContext`] at compile time.
//!
//! ```
//! use xacml_xpath::{StaticContext, XmlDocument, compile_xpath};
//!
//! let doc = XmlDocument::parse(r#"<md:record xmlns:md="urn:example:med"><md:patient/></md:record>"#).unwrap();
//! let ctx = StaticContext::builder().with_namespace("m", "urn:example:med").build();
//! let exe = compile_xpath("/m:record/m:patient", &ctx).unwrap();
//! assert_eq!(exe.select_nodes(&doc.root()).unwrap().len(), 1);
//! ```
#![warn(unused_crate_dependencies)]
pub mod compiler;
mod document;
mod evaluator;
pub mod functions;
pub mod model;
pub mod parser;
pub mod runtime;
pub mod xdm;

pub use document::{XmlDocument, XmlNode};
pub use model::{ExpandedName, NodeKind, QName, XdmNode};
pub use parser::parse_xpath;
pub use runtime::{Error, ErrorCode, StaticContext, StaticContextBuilder, XML_NS};
pub use xdm::XdmValue;

/// A compiled expression, reusable across documents and threads.
#[derive(Debug, Clone, PartialEq)]
pub struct XPathExecutable {
    ir: compiler::ir::ExprIR,
    source: String,
}

pub fn compile_xpath(expr: &str, static_ctx: &StaticContext) -> Result<XPathExecutable, Error> {
    let ir = compiler::compile_expr(expr, static_ctx)?;
    Ok(XPathExecutable { ir, source: expr.to_string() })
}

impl XPathExecutable {
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn evaluate<N: XdmNode>(&self, context: &N) -> Result<XdmValue<N>, Error> {
        evaluator::evaluate(&self.ir, context)
    }

    /// Evaluate and require a node set (`err:XPTY0004` otherwise).
    pub fn select_nodes<N: XdmNode>(&self, context: &N) -> Result<Vec<N>, Error> {
        match self.evaluate(context)? {
            XdmValue::NodeSet(nodes) => Ok(nodes),
            other => Err(Error::from_code(
                ErrorCode::XPTY0004,
                format!("expression '{}' returned a {}, not a node-set", self.source, other.type_name()),
            )),
        }
    }
}
