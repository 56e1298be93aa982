use num_bigint::BigInt;
use xacml_core::{Bag, ExpressionValue, FunctionArgument, TypedValue};

use super::{boolean, value};
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_bag, expect_value};

pub fn one_and_only<T: TypedValue>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    let bag = expect_bag(args, 0)?;
    let [only] = bag.iter().as_slice() else {
        return Err(Error::processing(format!("Expected a bag with exactly one element, got {}", bag.len())));
    };
    let v = T::from_value(only).ok_or_else(|| {
        Error::processing(format!(
            "Expected data type '{}' saw '{}' in bag",
            T::DATA_TYPE.short_name(),
            only.data_type().short_name()
        ))
    })?;
    Ok(value(v.clone()))
}

pub fn bag_size<T: TypedValue>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    Ok(value(BigInt::from(expect_bag(args, 0)?.len())))
}

pub fn is_in<T: TypedValue>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, Some(2))?;
    let needle = expect_value::<T>(args, 0)?;
    let bag = expect_bag(args, 1)?;
    Ok(boolean(bag.typed::<T>().any(|v| v == needle)))
}

/// A bag of the arguments, in order. No arguments gives the empty bag.
pub fn bag<T: TypedValue>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let values = (0..args.len()).map(|i| expect_value::<T>(args, i).cloned()).collect::<Result<Vec<T>, _>>()?;
    Ok(ExpressionValue::Bag(Bag::of(values)))
}
