//! Adding and subtracting durations.
//!
//! Day-time durations carry from seconds up through days into the calendar; year-month
//! durations move the month and clamp the day to the end of the target month. The operand's
//! timezone is kept as is. Results beyond the calendar's range are processing errors.
use xacml_core::datatypes::{Date, DateTime, DayTimeDuration, YearMonthDuration};
use xacml_core::{ExpressionValue, FunctionArgument, TypedValue};

use super::value;
use crate::error::Error;
use crate::function::CallCtx;
use crate::toolkit::{check_arity, expect_operand};

fn apply<V: TypedValue, D: TypedValue>(args: &[FunctionArgument], op: fn(&V, &D) -> Option<V>) -> Result<ExpressionValue, Error> {
    check_arity(args, 2, Some(2))?;
    let operand = expect_operand::<V>(args, 0)?;
    let duration = expect_operand::<D>(args, 1)?;
    op(operand, duration).map(value).ok_or_else(|| {
        Error::processing(format!("Result of {} arithmetic is out of range", V::DATA_TYPE.short_name()))
    })
}

pub fn datetime_add_day_time(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    apply::<DateTime, DayTimeDuration>(args, DateTime::add_day_time)
}

pub fn datetime_subtract_day_time(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    apply::<DateTime, DayTimeDuration>(args, DateTime::subtract_day_time)
}

pub fn datetime_add_year_month(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    apply::<DateTime, YearMonthDuration>(args, DateTime::add_year_month)
}

pub fn datetime_subtract_year_month(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    apply::<DateTime, YearMonthDuration>(args, DateTime::subtract_year_month)
}

pub fn date_add_year_month(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    apply::<Date, YearMonthDuration>(args, Date::add_year_month)
}

pub fn date_subtract_year_month(_ctx: &CallCtx<'_>, args: &[FunctionArgument]) -> Result<ExpressionValue, Error> {
    apply::<Date, YearMonthDuration>(args, Date::subtract_year_month)
}
