use core::ops::{Add, Div, Mul, Sub};

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use xacml_core::datatypes::format_double;
use xacml_core::{ExpressionValue, FunctionArgument, TypedValue};

use super::value;
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_value};

fn fold<T, F>(args: &[FunctionArgument], op: F) -> Result<ExpressionValue, Error>
where
    T: TypedValue,
    F: Fn(T, T) -> T,
{
    check_arity(args, 2, None)?;
    let mut acc = expect_value::<T>(args, 0)?.clone();
    for i in 1..args.len() {
        acc = op(acc, expect_value::<T>(args, i)?.clone());
    }
    Ok(value(acc))
}

fn binary<T: TypedValue>(args: &[FunctionArgument]) -> Result<(&T, &T), Error> {
    check_arity(args, 2, Some(2))?;
    Ok((expect_value::<T>(args, 0)?, expect_value::<T>(args, 1)?))
}

pub fn add<T: TypedValue + Add<Output = T>>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    fold::<T, _>(args, |a, b| a + b)
}

pub fn multiply<T: TypedValue + Mul<Output = T>>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    fold::<T, _>(args, |a, b| a * b)
}

pub fn subtract<T: TypedValue + Sub<Output = T>>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    let (a, b) = binary::<T>(args)?;
    Ok(value(a.clone() - b.clone()))
}

/// Integer division truncates toward zero. A zero divisor is an error for both numeric types.
pub fn divide<T: TypedValue + Zero + Div<Output = T>>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    let (a, b) = binary::<T>(args)?;
    if b.is_zero() {
        return Err(Error::processing("Divide by zero"));
    }
    Ok(value(a.clone() / b.clone()))
}

pub fn modulo(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (a, b) = binary::<BigInt>(args)?;
    if b.is_zero() {
        return Err(Error::processing("Divide by zero"));
    }
    Ok(value(a % b))
}

pub fn abs<T: TypedValue + Signed>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    Ok(value(expect_value::<T>(args, 0)?.abs()))
}

fn unary_double(args: &[FunctionArgument]) -> Result<f64, Error> {
    check_arity(args, 1, Some(1))?;
    expect_value::<f64>(args, 0).copied()
}

/// Halves round toward positive infinity.
pub fn round(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let x = unary_double(args)?;
    Ok(value(if x.fract() == -0.5 { x.ceil() } else { x.round() }))
}

pub fn floor(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    Ok(value(unary_double(args)?.floor()))
}

/// Truncates toward zero.
pub fn double_to_integer(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let x = unary_double(args)?;
    BigInt::from_f64(x.trunc())
        .map(value)
        .ok_or_else(|| Error::processing(format!("Cannot convert {} to integer", format_double(x))))
}

pub fn integer_to_double(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    let i = expect_value::<BigInt>(args, 0)?;
    i.to_f64().map(value).ok_or_else(|| Error::processing(format!("Cannot convert {i} to double")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::FunctionLookup;
    use rstest::rstest;
    use std::sync::Arc;
    use xacml_core::AttributeValue;

    struct NoFunctions;

    impl FunctionLookup for NoFunctions {
        fn lookup(&self, _id: &str) -> Option<Arc<dyn crate::FunctionDefinition>> {
            None
        }
    }

    fn call(
        f: fn(&CallCtx<'_>, &[FunctionArgument]) -> Result<ExpressionValue, Error>,
        args: &[AttributeValue],
    ) -> Result<AttributeValue, Error> {
        let args: Vec<FunctionArgument> = args.iter().cloned().map(Into::into).collect();
        let ctx = CallCtx::new(None, &NoFunctions);
        f(&ctx, &args).map(|v| v.as_value().cloned().unwrap())
    }

    fn int(i: i64) -> AttributeValue {
        AttributeValue::from(i)
    }

    #[rstest]
    #[case(2.5, 3.0)]
    #[case(-2.5, -2.0)]
    #[case(-2.6, -3.0)]
    #[case(1.2, 1.0)]
    fn rounding(#[case] input: f64, #[case] expected: f64) {
        assert_eq!(call(round, &[AttributeValue::Double(input)]).unwrap(), AttributeValue::Double(expected));
    }

    #[test]
    fn variadic_integer_add() {
        assert_eq!(call(add::<BigInt>, &[int(1), int(2), int(3)]).unwrap(), int(6));
        assert_eq!(call(add::<BigInt>, &[int(1)]).unwrap_err().message, "Expected at least 2 arguments, got 1");
    }

    #[rstest]
    #[case(7, 2, 3)]
    #[case(-7, 2, -3)]
    fn integer_division_truncates(#[case] a: i64, #[case] b: i64, #[case] q: i64) {
        assert_eq!(call(divide::<BigInt>, &[int(a), int(b)]).unwrap(), int(q));
    }

    #[test]
    fn zero_divisors() {
        assert_eq!(call(divide::<BigInt>, &[int(1), int(0)]).unwrap_err().message, "Divide by zero");
        let doubles = [AttributeValue::Double(1.0), AttributeValue::Double(0.0)];
        assert_eq!(call(divide::<f64>, &doubles).unwrap_err().message, "Divide by zero");
        assert_eq!(call(modulo, &[int(1), int(0)]).unwrap_err().message, "Divide by zero");
    }

    #[test]
    fn numeric_conversions() {
        assert_eq!(call(double_to_integer, &[AttributeValue::Double(-3.9)]).unwrap(), int(-3));
        assert!(call(double_to_integer, &[AttributeValue::Double(f64::NAN)]).is_err());
        assert_eq!(call(integer_to_double, &[int(5)]).unwrap(), AttributeValue::Double(5.0));
        assert_eq!(call(abs::<BigInt>, &[int(-5)]).unwrap(), int(5));
    }
}
