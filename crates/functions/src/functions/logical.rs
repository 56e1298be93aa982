use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use xacml_core::{ExpressionValue, FunctionArgument};

use super::boolean;
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_value};

/// True at the first true argument; later arguments are not checked.
pub fn or(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    for i in 0..args.len() {
        if *expect_value::<bool>(args, i)? {
            return Ok(boolean(true));
        }
    }
    Ok(boolean(false))
}

/// False at the first false argument; later arguments are not checked.
pub fn and(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    for i in 0..args.len() {
        if !*expect_value::<bool>(args, i)? {
            return Ok(boolean(false));
        }
    }
    Ok(boolean(true))
}

/// True once `n` of the remaining arguments are true.
pub fn n_of(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, None)?;
    let n = expect_value::<BigInt>(args, 0)?;
    if !n.is_positive() {
        return Ok(boolean(true));
    }
    let available = args.len() - 1;
    let needed = n.to_usize().filter(|needed| *needed <= available).ok_or_else(|| {
        Error::processing(format!("First argument requires {n} true arguments, only {available} given"))
    })?;
    let mut count = 0;
    for i in 1..args.len() {
        if *expect_value::<bool>(args, i)? {
            count += 1;
            if count == needed {
                return Ok(boolean(true));
            }
        }
    }
    Ok(boolean(false))
}

pub fn not(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    Ok(boolean(!*expect_value::<bool>(args, 0)?))
}
