use core::cmp::Ordering;

use xacml_core::datatypes::Time;
use xacml_core::{ExpressionValue, FunctionArgument, TypedValue};

use super::boolean;
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_value};

/// `None` for unordered operands (NaN), which makes every comparison false.
fn compare<T: TypedValue + PartialOrd>(args: &[FunctionArgument]) -> Result<Option<Ordering>, Error> {
    check_arity(args, 2, Some(2))?;
    let a = expect_value::<T>(args, 0)?;
    let b = expect_value::<T>(args, 1)?;
    Ok(a.partial_cmp(b))
}

pub fn greater_than<T: TypedValue + PartialOrd>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    Ok(boolean(compare::<T>(args)? == Some(Ordering::Greater)))
}

pub fn greater_than_or_equal<T: TypedValue + PartialOrd>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    Ok(boolean(matches!(compare::<T>(args)?, Some(Ordering::Greater | Ordering::Equal))))
}

pub fn less_than<T: TypedValue + PartialOrd>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    Ok(boolean(compare::<T>(args)? == Some(Ordering::Less)))
}

pub fn less_than_or_equal<T: TypedValue + PartialOrd>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    Ok(boolean(matches!(compare::<T>(args)?, Some(Ordering::Less | Ordering::Equal))))
}

/// `time-in-range(t, lower, upper)`, inclusive. When `upper` is before `lower` the range
/// spans midnight. Times are compared in UTC.
pub fn time_in_range(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 3, Some(3))?;
    let t = expect_value::<Time>(args, 0)?.utc_nanos_of_day();
    let lower = expect_value::<Time>(args, 1)?.utc_nanos_of_day();
    let upper = expect_value::<Time>(args, 2)?.utc_nanos_of_day();
    let inside = if lower <= upper { lower <= t && t <= upper } else { t >= lower || t <= upper };
    Ok(boolean(inside))
}
