//! `<type>-from-string` and `string-from-<type>`.
use xacml_core::{ExpressionValue, FunctionArgument, Lexical, TypedValue};

use super::value;
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_value};

/// Malformed text is a syntax error carrying the parser's diagnostic.
pub fn from_string<T: TypedValue + Lexical>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    let text = expect_value::<String>(args, 0)?;
    Ok(value(T::parse_lexical(text)?))
}

pub fn to_string<T: TypedValue + Lexical>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    Ok(value(expect_value::<T>(args, 0)?.to_lexical()))
}
