//! Bags treated as sets of one element type.
//!
//! Elements of another datatype never match and never appear in results.
use xacml_core::{Bag, ExpressionValue, FunctionArgument, TypedValue};

use super::boolean;
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_bag};

fn operands(args: &[FunctionArgument]) -> Result<(&Bag, &Bag), Error> {
    check_arity(args, 2, Some(2))?;
    Ok((expect_bag(args, 0)?, expect_bag(args, 1)?))
}

/// Distinct values in first-occurrence order.
fn distinct<'a, T: PartialEq + 'a>(values: impl IntoIterator<Item = &'a T>) -> Vec<&'a T> {
    let mut out: Vec<&T> = Vec::new();
    for v in values {
        if !out.contains(&v) {
            out.push(v);
        }
    }
    out
}

fn occurs_in<T: TypedValue>(value: &T, bag: &Bag) -> bool {
    bag.typed::<T>().any(|v| v == value)
}

fn is_subset<T: TypedValue>(a: &Bag, b: &Bag) -> bool {
    a.typed::<T>().all(|v| occurs_in(v, b))
}

fn bag_of<T: TypedValue>(values: Vec<&T>) -> ExpressionValue {
    ExpressionValue::Bag(Bag::of(values.into_iter().cloned()))
}

pub fn intersection<T: TypedValue>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (a, b) = operands(args)?;
    Ok(bag_of(distinct(a.typed::<T>().filter(|v| occurs_in(*v, b)))))
}

pub fn union<T: TypedValue>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (a, b) = operands(args)?;
    Ok(bag_of(distinct(a.typed::<T>().chain(b.typed::<T>()))))
}

pub fn at_least_one_member_of<T: TypedValue>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    let (a, b) = operands(args)?;
    Ok(boolean(a.typed::<T>().any(|v| occurs_in(v, b))))
}

/// Vacuously true for an empty first bag.
pub fn subset<T: TypedValue>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (a, b) = operands(args)?;
    Ok(boolean(is_subset::<T>(a, b)))
}

pub fn set_equals<T: TypedValue>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (a, b) = operands(args)?;
    Ok(boolean(is_subset::<T>(a, b) && is_subset::<T>(b, a)))
}
