use fancy_regex::RegexBuilder;
use xacml_core::{ExpressionValue, FunctionArgument, Lexical, TypedValue};

use super::boolean;
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_value};

/// Unanchored match of the pattern against the canonical text of the second argument.
pub fn regexp_match<T: TypedValue + Lexical>(
    _ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, Some(2))?;
    let pattern = expect_value::<String>(args, 0)?;
    let text = expect_value::<T>(args, 1)?.to_lexical();
    let re = RegexBuilder::new(pattern)
        .build()
        .map_err(|e| Error::syntax(format!("Invalid regular expression '{pattern}': {e}")))?;
    let matched = re.is_match(&text).map_err(|e| Error::processing(format!("Regular expression failed: {e}")))?;
    Ok(boolean(matched))
}
