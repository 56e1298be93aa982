use num_bigint::BigInt;
use num_traits::ToPrimitive;
use xacml_core::datatypes::AnyUri;
use xacml_core::{ExpressionValue, FunctionArgument, TypedValue};

use super::{boolean, value};
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_value};

/// Payloads searched as text.
pub trait Text: TypedValue {
    fn text(&self) -> &str;
}

impl Text for String {
    fn text(&self) -> &str {
        self
    }
}

impl Text for AnyUri {
    fn text(&self) -> &str {
        self.as_str()
    }
}

pub fn concatenate(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, None)?;
    let mut out = String::new();
    for i in 0..args.len() {
        out.push_str(expect_value::<String>(args, i)?);
    }
    Ok(value(out))
}

/// Strips leading and trailing whitespace; inner runs are kept.
pub fn normalize_space(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    Ok(value(expect_value::<String>(args, 0)?.trim().to_string()))
}

pub fn normalize_to_lower_case(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 1, Some(1))?;
    Ok(value(expect_value::<String>(args, 0)?.to_lowercase()))
}

/// `(needle: string, haystack: T)`.
fn needle_and_haystack<T: Text>(args: &[FunctionArgument]) -> Result<(&str, &str), Error> {
    check_arity(args, 2, Some(2))?;
    Ok((expect_value::<String>(args, 0)?, expect_value::<T>(args, 1)?.text()))
}

pub fn starts_with<T: Text>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (needle, haystack) = needle_and_haystack::<T>(args)?;
    Ok(boolean(haystack.starts_with(needle)))
}

pub fn ends_with<T: Text>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (needle, haystack) = needle_and_haystack::<T>(args)?;
    Ok(boolean(haystack.ends_with(needle)))
}

pub fn contains<T: Text>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (needle, haystack) = needle_and_haystack::<T>(args)?;
    Ok(boolean(haystack.contains(needle)))
}

/// Characters `begin..end` of the first argument; `end == -1` runs to the end.
pub fn substring<T: Text>(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 3, Some(3))?;
    let text = expect_value::<T>(args, 0)?.text();
    let begin = expect_value::<BigInt>(args, 1)?;
    let end = expect_value::<BigInt>(args, 2)?;
    let len = text.chars().count();
    let begin_at = begin
        .to_usize()
        .filter(|b| *b <= len)
        .ok_or_else(|| Error::processing(format!("Begin index {begin} out of range for length {len}")))?;
    let end_at = if *end == BigInt::from(-1) {
        len
    } else {
        end.to_usize()
            .filter(|e| *e >= begin_at && *e <= len)
            .ok_or_else(|| Error::processing(format!("End index {end} out of range for length {len}")))?
    };
    Ok(value(text.chars().skip(begin_at).take(end_at - begin_at).collect::<String>()))
}
