//! Argument checks shared by every function, so each family reports shape errors the same way.
use xacml_core::{Bag, FunctionArgument, TypedValue};

use crate::error::Error;

pub fn check_arity(args: &[FunctionArgument], min: usize, max: Option<usize>) -> Result<(), Error> {
    let got = args.len();
    match max {
        Some(max) if min == max && got != min => Err(Error::processing(format!("Expected {min} arguments, got {got}"))),
        _ if got < min => Err(Error::processing(format!("Expected at least {min} arguments, got {got}"))),
        Some(max) if got > max => Err(Error::processing(format!("Expected at most {max} arguments, got {got}"))),
        _ => Ok(()),
    }
}

fn typed<T: TypedValue>(arg: Option<&FunctionArgument>, index: Option<usize>) -> Result<&T, Error> {
    let mismatch = |saw: &str| {
        let mut msg = format!("Expected data type '{}' saw '{saw}'", T::DATA_TYPE.short_name());
        if let Some(i) = index {
            msg.push_str(&format!(" at arg index {i}"));
        }
        Error::processing(msg)
    };
    match arg {
        None | Some(FunctionArgument::Missing) => Err(Error::processing("Got null attribute")),
        Some(FunctionArgument::Value(v)) => T::from_value(v).ok_or_else(|| mismatch(v.data_type().short_name())),
        Some(FunctionArgument::Bag(_)) => Err(mismatch("bag")),
    }
}

/// The value at `index`, which must be of type `T`.
pub fn expect_value<T: TypedValue>(args: &[FunctionArgument], index: usize) -> Result<&T, Error> {
    typed(args.get(index), Some(index))
}

/// Like [`expect_value`] with the index left out of the mismatch message.
pub fn expect_operand<T: TypedValue>(args: &[FunctionArgument], index: usize) -> Result<&T, Error> {
    typed(args.get(index), None)
}

pub fn expect_bag(args: &[FunctionArgument], index: usize) -> Result<&Bag, Error> {
    match args.get(index) {
        Some(FunctionArgument::Bag(b)) => Ok(b),
        Some(FunctionArgument::Value(_)) => Err(Error::processing("Expected a bag, saw a simple value")),
        None | Some(FunctionArgument::Missing) => Err(Error::processing("Got null argument")),
    }
}
