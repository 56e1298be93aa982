//! Bag combinators that apply a predicate function named by their first argument.
//!
//! The single-bag forms (`any-of`, `all-of`, `map`) take any number of bound arguments and
//! exactly one bag; the predicate receives the arguments in their original order with the bag
//! replaced by one of its elements. The dual-bag forms take the predicate and two bags.
use std::sync::Arc;

use itertools::Itertools;
use xacml_core::{AttributeValue, Bag, DataType, ExpressionValue, FunctionArgument};

use super::boolean;
use crate::error::Error;
use crate::function::{CallCtx, FunctionDefinition};
use crate::toolkit::check_arity;

fn type_uri(arg: &FunctionArgument) -> &'static str {
    match arg {
        FunctionArgument::Value(v) => v.data_type().uri(),
        FunctionArgument::Bag(_) => "bag",
        FunctionArgument::Missing => "null",
    }
}

/// Resolve the predicate in the first argument. Boolean combinators require a predicate
/// returning a single boolean; `map` accepts any single-valued predicate.
fn resolve_predicate(
    ctx: &CallCtx<'_>,
    args: &[FunctionArgument],
    boolean_result: bool,
) -> Result<Arc<dyn FunctionDefinition>, Error> {
    let uri = match args.first() {
        None | Some(FunctionArgument::Missing) => {
            return Err(Error::processing("Predicate Function (first argument) was null"));
        }
        Some(FunctionArgument::Value(AttributeValue::AnyUri(uri))) => uri,
        Some(other) => return Err(Error::processing(format!("First argument expected URI, got {}", type_uri(other)))),
    };
    let predicate = ctx
        .functions
        .lookup(uri.as_str())
        .ok_or_else(|| Error::processing(format!("Predicate Function '{uri}' is not defined")))?;
    if predicate.returns_bag() {
        return Err(Error::processing(format!(
            "Predicate Function must return a single value, but '{}' returns a bag",
            predicate.id()
        )));
    }
    if boolean_result && predicate.return_type() != Some(DataType::Boolean) {
        let returns = predicate.return_type().map_or("any", DataType::uri);
        return Err(Error::processing(format!(
            "Predicate Function must return boolean, but '{}' returns '{returns}'",
            predicate.id()
        )));
    }
    Ok(predicate)
}

fn invoke(
    ctx: &CallCtx<'_>,
    predicate: &dyn FunctionDefinition,
    args: &[FunctionArgument],
) -> Result<ExpressionValue, Error> {
    predicate.evaluate(ctx, args).map_err(|status| {
        tracing::trace!(predicate = %predicate.id(), message = %status.message, "predicate failed");
        Error::from_code(status.code, format!("Predicate error: {}", status.message))
    })
}

fn test(ctx: &CallCtx<'_>, predicate: &dyn FunctionDefinition, args: &[FunctionArgument]) -> Result<bool, Error> {
    invoke(ctx, predicate, args)?.as_bool().ok_or_else(|| {
        Error::processing(format!("Predicate Function '{}' did not return a boolean value", predicate.id()))
    })
}

/// Arguments after the predicate, with the position of the one bag among them.
struct Bound<'a> {
    template: Vec<FunctionArgument>,
    slot: usize,
    bag: &'a Bag,
}

impl Bound<'_> {
    fn split(args: &[FunctionArgument]) -> Result<Bound<'_>, Error> {
        let mut found: Option<(usize, &Bag)> = None;
        for (i, arg) in args.iter().enumerate().skip(1) {
            match arg {
                FunctionArgument::Missing => return Err(Error::processing(format!("Got null argument at index {i}"))),
                FunctionArgument::Bag(bag) => {
                    if let Some((first, _)) = found {
                        return Err(Error::processing(format!(
                            "must have only 1 bag; found one at index {first} and another at {i}"
                        )));
                    }
                    found = Some((i, bag));
                }
                FunctionArgument::Value(_) => {}
            }
        }
        let (index, bag) =
            found.ok_or_else(|| Error::processing("Did not get any Bag argument; must have at least 1"))?;
        Ok(Bound { template: args[1..].to_vec(), slot: index - 1, bag })
    }

    /// Predicate arguments for one bag element.
    fn with(&mut self, element: &AttributeValue) -> &[FunctionArgument] {
        self.template[self.slot] = FunctionArgument::Value(element.clone());
        &self.template
    }
}

fn bag_at<'a>(args: &'a [FunctionArgument], index: usize, ordinal: &str) -> Result<&'a Bag, Error> {
    match &args[index] {
        FunctionArgument::Bag(bag) => Ok(bag),
        other => Err(Error::processing(format!("{ordinal} argument must be bag, got '{}'", type_uri(other)))),
    }
}

/// Predicate plus the two bags of a dual-bag combinator.
fn dual<'a>(
    ctx: &CallCtx<'_>,
    args: &'a [FunctionArgument],
) -> Result<(Arc<dyn FunctionDefinition>, &'a Bag, &'a Bag), Error> {
    check_arity(args, 3, Some(3))?;
    let predicate = resolve_predicate(ctx, args, true)?;
    Ok((predicate, bag_at(args, 1, "2nd")?, bag_at(args, 2, "3rd")?))
}

fn pair(a: &AttributeValue, b: &AttributeValue) -> [FunctionArgument; 2] {
    [FunctionArgument::Value(a.clone()), FunctionArgument::Value(b.clone())]
}

/// ∃ b ∈ B: p(…, b, …)
pub fn any_of(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, None)?;
    let predicate = resolve_predicate(ctx, args, true)?;
    let mut bound = Bound::split(args)?;
    let bag = bound.bag;
    for element in bag {
        if test(ctx, &*predicate, bound.with(element))? {
            return Ok(boolean(true));
        }
    }
    Ok(boolean(false))
}

/// ∀ b ∈ B: p(…, b, …)
pub fn all_of(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, None)?;
    let predicate = resolve_predicate(ctx, args, true)?;
    let mut bound = Bound::split(args)?;
    let bag = bound.bag;
    for element in bag {
        if !test(ctx, &*predicate, bound.with(element))? {
            return Ok(boolean(false));
        }
    }
    Ok(boolean(true))
}

/// ∃ (a, b) ∈ A × B: p(a, b)
pub fn any_of_any(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (predicate, a, b) = dual(ctx, args)?;
    for (x, y) in a.iter().cartesian_product(b.iter()) {
        if test(ctx, &*predicate, &pair(x, y))? {
            return Ok(boolean(true));
        }
    }
    Ok(boolean(false))
}

/// ∀ (a, b) ∈ A × B: p(a, b)
pub fn all_of_all(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (predicate, a, b) = dual(ctx, args)?;
    for (x, y) in a.iter().cartesian_product(b.iter()) {
        if !test(ctx, &*predicate, &pair(x, y))? {
            return Ok(boolean(false));
        }
    }
    Ok(boolean(true))
}

/// ∀ a ∈ A ∃ b ∈ B: p(a, b)
pub fn all_of_any(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (predicate, a, b) = dual(ctx, args)?;
    for x in a {
        if !exists(ctx, &*predicate, x, b)? {
            return Ok(boolean(false));
        }
    }
    Ok(boolean(true))
}

/// ∃ a ∈ A ∀ b ∈ B: p(a, b)
pub fn any_of_all(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    let (predicate, a, b) = dual(ctx, args)?;
    for x in a {
        if for_all(ctx, &*predicate, x, b)? {
            return Ok(boolean(true));
        }
    }
    Ok(boolean(false))
}

fn exists(
    ctx: &CallCtx<'_>,
    predicate: &dyn FunctionDefinition,
    x: &AttributeValue,
    b: &Bag,
) -> Result<bool, Error> {
    for y in b {
        if test(ctx, predicate, &pair(x, y))? {
            return Ok(true);
        }
    }
    Ok(false)
}

fn for_all(
    ctx: &CallCtx<'_>,
    predicate: &dyn FunctionDefinition,
    x: &AttributeValue,
    b: &Bag,
) -> Result<bool, Error> {
    for y in b {
        if !test(ctx, predicate, &pair(x, y))? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// The predicate applied to every element, in bag order.
pub fn map(ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, None)?;
    let predicate = resolve_predicate(ctx, args, false)?;
    let mut bound = Bound::split(args)?;
    let bag = bound.bag;
    let mut out = Vec::with_capacity(bag.len());
    for element in bag {
        match invoke(ctx, &*predicate, bound.with(element))? {
            ExpressionValue::Value(v) => out.push(v),
            ExpressionValue::Bag(_) => {
                return Err(Error::processing(format!(
                    "Predicate Function '{}' returned a bag",
                    predicate.id()
                )));
            }
        }
    }
    Ok(ExpressionValue::Bag(Bag::new(out)))
}
