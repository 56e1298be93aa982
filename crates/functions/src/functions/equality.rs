use xacml_core::{ExpressionValue, FunctionArgument, TypedValue};

use super::boolean;
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_value};

pub fn equal<T: TypedValue>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, Some(2))?;
    let a = expect_value::<T>(args, 0)?;
    let b = expect_value::<T>(args, 1)?;
    Ok(boolean(a == b))
}

/// Equal after both strings are lower-cased.
pub fn string_equal_ignore_case(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, Some(2))?;
    let a = expect_value::<String>(args, 0)?;
    let b = expect_value::<String>(args, 1)?;
    Ok(boolean(a.to_lowercase() == b.to_lowercase()))
}
