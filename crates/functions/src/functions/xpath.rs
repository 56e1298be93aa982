//! Node-set queries over the `<Content>` of a request category.
//!
//! Each expression is evaluated with the document node of its category's content as the
//! context node. A category without content selects nothing.
use num_bigint::BigInt;
use xacml_core::datatypes::XPathValue;
use xacml_core::{ExpressionValue, FunctionArgument, Request};
use xacml_xpath::{XdmNode, XmlNode};

use super::{boolean, value};
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_value};

fn request<'c>(ctx: &CallCtx<'c>) -> Result<&'c Request, Error> {
    let eval_ctx = ctx.eval_ctx.ok_or_else(|| Error::processing("Got null EvaluationContext"))?;
    eval_ctx.request().ok_or_else(|| Error::processing("Got null Request in EvaluationContext"))
}

fn select(request: &Request, args: &[FunctionArgument], index: usize) -> Result<Vec<XmlNode>, Error> {
    let null = || Error::processing(format!("XPathExpression returned null at index {index}"));
    if matches!(args.get(index), None | Some(FunctionArgument::Missing)) {
        return Err(null());
    }
    let expr = expect_value::<XPathValue>(args, index)?;
    let executable = expr.executable().ok_or_else(null)?;
    let category = expr.category().ok_or_else(|| Error::syntax(format!("Got null Category at index {index}")))?;
    let content = match request.contents_for(category).as_slice() {
        [] => return Ok(Vec::new()),
        [content] => *content,
        _ => return Err(Error::syntax(format!("More than one Content section for id '{category}'"))),
    };
    executable.select_nodes(&content.root()).map_err(|e| {
        Error::processing(format!("Error evaluating XPath expression '{}' at index {index}: {e}", expr.path()))
    })
}

fn two_node_sets(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<(Vec<XmlNode>, Vec<XmlNode>), Error> {
    check_arity(args, 2, Some(2))?;
    let request = request(ctx)?;
    Ok((select(request, args, 0)?, select(request, args, 1)?))
}

pub fn node_count(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    let nodes = select(request(ctx)?, args, 0)?;
    Ok(value(BigInt::from(nodes.len())))
}

/// Both expressions select the same non-empty set of nodes.
pub fn node_equal(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (a, b) = two_node_sets(ctx, args)?;
    let equal = !a.is_empty() && a.len() == b.len() && a.iter().all(|n| b.contains(n));
    Ok(boolean(equal))
}

/// Every node of the second set is, or lies under, a node of the first. Attributes lie under
/// their owner element.
pub fn node_match(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (a, b) = two_node_sets(ctx, args)?;
    if a.is_empty() || b.is_empty() {
        return Ok(boolean(false));
    }
    let matched = b.iter().all(|n| a.iter().any(|m| m == n || m.is_ancestor_of(n)));
    Ok(boolean(matched))
}
