use xacml_core::datatypes::{Rfc822Name, X500Name};
use xacml_core::{ExpressionValue, FunctionArgument};

use super::boolean;
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_value};

/// True when the first name's RDNs are the terminal sequence of the second's.
pub fn x500_name_match(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, Some(2))?;
    let pattern = expect_value::<X500Name>(args, 0)?;
    let name = expect_value::<X500Name>(args, 1)?;
    Ok(boolean(pattern.is_terminal_sequence_of(name)))
}

/// The pattern is a full mailbox, a domain, or a `.sub.domain` suffix.
pub fn rfc822_name_match(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, Some(2))?;
    let pattern = expect_value::<String>(args, 0)?;
    let name = expect_value::<Rfc822Name>(args, 1)?;
    Ok(boolean(name.matches_pattern(pattern)))
}
