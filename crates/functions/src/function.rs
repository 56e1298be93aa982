use core::fmt;
use std::sync::Arc;

use xacml_core::{DataType, EvaluationContext, ExpressionResult, ExpressionValue, FunctionArgument};

use crate::error::Error;

/// Resolves function identifiers while a call is in flight (predicates of higher-order functions).
pub trait FunctionLookup: Send + Sync {
    fn lookup(&self, id: &str) -> Option<Arc<dyn FunctionDefinition>>;
}

/// Everything a function body may consult besides its arguments.
#[derive(Clone, Copy)]
pub struct CallCtx<'a> {
    pub eval_ctx: Option<&'a dyn EvaluationContext>,
    pub functions: &'a dyn FunctionLookup,
}

impl<'a> CallCtx<'a> {
    pub fn new(eval_ctx: Option<&'a dyn EvaluationContext>, functions: &'a dyn FunctionLookup) -> Self {
        Self { eval_ctx, functions }
    }
}

impl fmt::Debug for CallCtx<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallCtx").field("has_eval_ctx", &self.eval_ctx.is_some()).finish_non_exhaustive()
    }
}

/// Declared shape of one parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSpec {
    Value(DataType),
    Bag(DataType),
    /// A function identifier (anyURI) resolved through [`FunctionLookup`].
    Function,
    /// Any value or bag; checked by the function body.
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub params: Vec<ParamSpec>,
    /// The last parameter repeats.
    pub variadic: bool,
    /// `None` when the type depends on a predicate resolved at call time.
    pub returns: Option<DataType>,
    pub returns_bag: bool,
}

impl Signature {
    pub fn new(params: impl IntoIterator<Item = ParamSpec>, returns: DataType) -> Self {
        Self { params: params.into_iter().collect(), variadic: false, returns: Some(returns), returns_bag: false }
    }

    pub fn polymorphic(params: impl IntoIterator<Item = ParamSpec>) -> Self {
        Self { params: params.into_iter().collect(), variadic: false, returns: None, returns_bag: true }
    }

    #[must_use]
    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    #[must_use]
    pub fn bag(mut self) -> Self {
        self.returns_bag = true;
        self
    }
}

/// A function of the standard library. Implementations are stateless and shared across threads.
pub trait FunctionDefinition: Send + Sync + fmt::Debug {
    fn id(&self) -> &str;

    fn signature(&self) -> &Signature;

    fn evaluate(&self, ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> ExpressionResult;

    fn return_type(&self) -> Option<DataType> {
        self.signature().returns
    }

    fn returns_bag(&self) -> bool {
        self.signature().returns_bag
    }
}

pub type FunctionImpl =
    Arc<dyn Fn(&CallCtx<'_>, &[FunctionArgument]) -> Result<ExpressionValue, Error> + Send + Sync>;

/// `function:<name>`: the part of an identifier used to prefix diagnostics.
pub fn short_name(id: &str) -> &str {
    id.find("function:").map_or(id, |i| &id[i..])
}

/// A function backed by a closure. Errors leave with the `function:<name>` prefix attached.
#[derive(Clone)]
pub struct StdFunction {
    id: String,
    signature: Signature,
    imp: FunctionImpl,
}

impl StdFunction {
    pub fn new<F>(id: impl Into<String>, signature: Signature, f: F) -> Self
    where
        F: 'static + Send + Sync + Fn(&CallCtx<'_>, &[FunctionArgument]) -> Result<ExpressionValue, Error>,
    {
        Self { id: id.into(), signature, imp: Arc::new(f) }
    }

    /// Same body under another identifier.
    pub fn alias(&self, id: impl Into<String>) -> Self {
        Self { id: id.into(), signature: self.signature.clone(), imp: Arc::clone(&self.imp) }
    }
}

impl fmt::Debug for StdFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StdFunction").field("id", &self.id).field("signature", &self.signature).finish()
    }
}

impl FunctionDefinition for StdFunction {
    fn id(&self) -> &str {
        &self.id
    }

    fn signature(&self) -> &Signature {
        &self.signature
    }

    fn evaluate(&self, ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> ExpressionResult {
        (self.imp)(ctx, args).map_err(|err| {
            tracing::trace!(function = %self.id, code = ?err.code, message = %err.message, "function failed");
            err.into_status(short_name(&self.id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names() {
        assert_eq!(short_name("urn:oasis:names:tc:xacml:1.0:function:string-equal"), "function:string-equal");
        assert_eq!(short_name("urn:example:custom"), "urn:example:custom");
    }
}
