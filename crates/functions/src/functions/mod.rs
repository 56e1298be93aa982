//! The standard function families and their registration.
use xacml_core::datatypes::{
    AnyUri, Base64Binary, Date, DateTime, DayTimeDuration, DnsName, HexBinary, IpAddress, Rfc822Name, Time, X500Name,
    XPathValue, YearMonthDuration,
};
use xacml_core::{AttributeValue, BigInt, DataType, ExpressionValue, Lexical, TypedValue};

use crate::function::{ParamSpec, Signature, StdFunction};
use crate::ids::{xacml1, xacml2, xacml3};
use crate::registry::Registrar;

pub mod arithmetic;
pub mod bag;
pub mod comparison;
pub mod conversion;
pub mod date_time;
pub mod equality;
pub mod higher_order;
pub mod logical;
pub mod regexp;
pub mod set;
pub mod special_match;
pub mod strings;
pub mod xpath;

pub(crate) fn boolean(b: bool) -> ExpressionValue {
    ExpressionValue::Value(AttributeValue::Boolean(b))
}

pub(crate) fn value<T: TypedValue>(v: T) -> ExpressionValue {
    ExpressionValue::Value(v.into_value())
}

/// Identifier of a per-datatype function; the duration types were added in 3.0.
fn typed_id(dt: DataType, op: &str) -> String {
    let local = format!("{}-{op}", dt.short_name());
    match dt {
        DataType::DayTimeDuration | DataType::YearMonthDuration => xacml3(&local),
        _ => xacml1(&local),
    }
}

fn v(dt: DataType) -> ParamSpec {
    ParamSpec::Value(dt)
}

fn b(dt: DataType) -> ParamSpec {
    ParamSpec::Bag(dt)
}

/// Equality, bag and set functions of one element type.
fn register_typed<T: TypedValue>(r: &mut Registrar<'_>) {
    use DataType::{Boolean, Integer};
    let dt = T::DATA_TYPE;
    r.add(StdFunction::new(typed_id(dt, "equal"), Signature::new([v(dt), v(dt)], Boolean), equality::equal::<T>));
    r.add(StdFunction::new(typed_id(dt, "one-and-only"), Signature::new([b(dt)], dt), bag::one_and_only::<T>));
    r.add(StdFunction::new(typed_id(dt, "bag-size"), Signature::new([b(dt)], Integer), bag::bag_size::<T>));
    r.add(StdFunction::new(typed_id(dt, "is-in"), Signature::new([v(dt), b(dt)], Boolean), bag::is_in::<T>));
    r.add(StdFunction::new(typed_id(dt, "bag"), Signature::new([v(dt)], dt).variadic().bag(), bag::bag::<T>));
    r.add(StdFunction::new(typed_id(dt, "intersection"), Signature::new([b(dt), b(dt)], dt).bag(), set::intersection::<T>));
    r.add(StdFunction::new(
        typed_id(dt, "at-least-one-member-of"),
        Signature::new([b(dt), b(dt)], Boolean),
        set::at_least_one_member_of::<T>,
    ));
    r.add(StdFunction::new(typed_id(dt, "union"), Signature::new([b(dt), b(dt)], dt).bag(), set::union::<T>));
    r.add(StdFunction::new(typed_id(dt, "subset"), Signature::new([b(dt), b(dt)], Boolean), set::subset::<T>));
    r.add(StdFunction::new(typed_id(dt, "set-equals"), Signature::new([b(dt), b(dt)], Boolean), set::set_equals::<T>));
}

fn register_comparisons<T: TypedValue + PartialOrd>(r: &mut Registrar<'_>) {
    let dt = T::DATA_TYPE;
    let sig = || Signature::new([v(dt), v(dt)], DataType::Boolean);
    r.add(StdFunction::new(typed_id(dt, "greater-than"), sig(), comparison::greater_than::<T>));
    r.add(StdFunction::new(typed_id(dt, "greater-than-or-equal"), sig(), comparison::greater_than_or_equal::<T>));
    r.add(StdFunction::new(typed_id(dt, "less-than"), sig(), comparison::less_than::<T>));
    r.add(StdFunction::new(typed_id(dt, "less-than-or-equal"), sig(), comparison::less_than_or_equal::<T>));
}

fn register_conversion<T: TypedValue + Lexical>(r: &mut Registrar<'_>) {
    let dt = T::DATA_TYPE;
    let name = dt.short_name();
    r.add(StdFunction::new(
        xacml3(&format!("{name}-from-string")),
        Signature::new([v(DataType::String)], dt),
        conversion::from_string::<T>,
    ));
    r.add(StdFunction::new(
        xacml3(&format!("string-from-{name}")),
        Signature::new([v(dt)], DataType::String),
        conversion::to_string::<T>,
    ));
}

fn register_regexp<T: TypedValue + Lexical>(r: &mut Registrar<'_>, id: String) {
    r.add(StdFunction::new(
        id,
        Signature::new([v(DataType::String), v(T::DATA_TYPE)], DataType::Boolean),
        regexp::regexp_match::<T>,
    ));
}

/// 3.0 identifier, plus its 1.0 spelling when legacy identifiers are on.
fn add_reidentified(r: &mut Registrar<'_>, local: &str, signature: Signature, f: StdFunctionBody) {
    r.add_with_legacy(StdFunction::new(xacml3(local), signature, f), xacml1(local));
}

type StdFunctionBody = fn(
    &crate::function::CallCtx<'_>,
    &[xacml_core::FunctionArgument],
) -> Result<ExpressionValue, crate::error::Error>;

pub(crate) fn register_standard_functions(r: &mut Registrar<'_>) {
    use DataType::{Boolean, Double, Integer, String as Str};

    // ===== Per-type equality, bag and set functions =====
    register_typed::<String>(r);
    register_typed::<bool>(r);
    register_typed::<BigInt>(r);
    register_typed::<f64>(r);
    register_typed::<Time>(r);
    register_typed::<Date>(r);
    register_typed::<DateTime>(r);
    register_typed::<AnyUri>(r);
    register_typed::<HexBinary>(r);
    register_typed::<Base64Binary>(r);
    register_typed::<DayTimeDuration>(r);
    register_typed::<YearMonthDuration>(r);
    register_typed::<X500Name>(r);
    register_typed::<Rfc822Name>(r);
    r.add(StdFunction::new(
        xacml3("string-equal-ignore-case"),
        Signature::new([v(Str), v(Str)], Boolean),
        equality::string_equal_ignore_case,
    ));

    // ===== Arithmetic =====
    r.add(StdFunction::new(xacml1("integer-add"), Signature::new([v(Integer)], Integer).variadic(), arithmetic::add::<BigInt>));
    r.add(StdFunction::new(xacml1("double-add"), Signature::new([v(Double)], Double).variadic(), arithmetic::add::<f64>));
    r.add(StdFunction::new(
        xacml1("integer-subtract"),
        Signature::new([v(Integer), v(Integer)], Integer),
        arithmetic::subtract::<BigInt>,
    ));
    r.add(StdFunction::new(
        xacml1("double-subtract"),
        Signature::new([v(Double), v(Double)], Double),
        arithmetic::subtract::<f64>,
    ));
    r.add(StdFunction::new(
        xacml1("integer-multiply"),
        Signature::new([v(Integer)], Integer).variadic(),
        arithmetic::multiply::<BigInt>,
    ));
    r.add(StdFunction::new(
        xacml1("double-multiply"),
        Signature::new([v(Double)], Double).variadic(),
        arithmetic::multiply::<f64>,
    ));
    r.add(StdFunction::new(
        xacml1("integer-divide"),
        Signature::new([v(Integer), v(Integer)], Integer),
        arithmetic::divide::<BigInt>,
    ));
    r.add(StdFunction::new(
        xacml1("double-divide"),
        Signature::new([v(Double), v(Double)], Double),
        arithmetic::divide::<f64>,
    ));
    r.add(StdFunction::new(xacml1("integer-mod"), Signature::new([v(Integer), v(Integer)], Integer), arithmetic::modulo));
    r.add(StdFunction::new(xacml1("integer-abs"), Signature::new([v(Integer)], Integer), arithmetic::abs::<BigInt>));
    r.add(StdFunction::new(xacml1("double-abs"), Signature::new([v(Double)], Double), arithmetic::abs::<f64>));
    r.add(StdFunction::new(xacml1("round"), Signature::new([v(Double)], Double), arithmetic::round));
    r.add(StdFunction::new(xacml1("floor"), Signature::new([v(Double)], Double), arithmetic::floor));
    r.add(StdFunction::new(xacml1("double-to-integer"), Signature::new([v(Double)], Integer), arithmetic::double_to_integer));
    r.add(StdFunction::new(xacml1("integer-to-double"), Signature::new([v(Integer)], Double), arithmetic::integer_to_double));

    // ===== Comparison =====
    register_comparisons::<BigInt>(r);
    register_comparisons::<f64>(r);
    register_comparisons::<String>(r);
    register_comparisons::<Time>(r);
    register_comparisons::<Date>(r);
    register_comparisons::<DateTime>(r);
    r.add(StdFunction::new(
        xacml2("time-in-range"),
        Signature::new([v(DataType::Time), v(DataType::Time), v(DataType::Time)], Boolean),
        comparison::time_in_range,
    ));

    // ===== Logical =====
    r.add(StdFunction::new(xacml1("or"), Signature::new([v(Boolean)], Boolean).variadic(), logical::or));
    r.add(StdFunction::new(xacml1("and"), Signature::new([v(Boolean)], Boolean).variadic(), logical::and));
    r.add(StdFunction::new(xacml1("n-of"), Signature::new([v(Integer), v(Boolean)], Boolean).variadic(), logical::n_of));
    r.add(StdFunction::new(xacml1("not"), Signature::new([v(Boolean)], Boolean), logical::not));

    // ===== Strings =====
    r.add(StdFunction::new(
        xacml2("string-concatenate"),
        Signature::new([v(Str)], Str).variadic(),
        strings::concatenate,
    ));
    r.add(StdFunction::new(xacml1("string-normalize-space"), Signature::new([v(Str)], Str), strings::normalize_space));
    r.add(StdFunction::new(
        xacml1("string-normalize-to-lower-case"),
        Signature::new([v(Str)], Str),
        strings::normalize_to_lower_case,
    ));
    for (prefix, dt) in [("string", Str), ("anyURI", DataType::AnyUri)] {
        let sig = || Signature::new([v(Str), v(dt)], Boolean);
        let (starts, ends, contains): (StdFunctionBody, StdFunctionBody, StdFunctionBody) = match dt {
            DataType::AnyUri => (strings::starts_with::<AnyUri>, strings::ends_with::<AnyUri>, strings::contains::<AnyUri>),
            _ => (strings::starts_with::<String>, strings::ends_with::<String>, strings::contains::<String>),
        };
        r.add(StdFunction::new(xacml3(&format!("{prefix}-starts-with")), sig(), starts));
        r.add(StdFunction::new(xacml3(&format!("{prefix}-ends-with")), sig(), ends));
        r.add(StdFunction::new(xacml3(&format!("{prefix}-contains")), sig(), contains));
    }
    r.add(StdFunction::new(
        xacml3("string-substring"),
        Signature::new([v(Str), v(Integer), v(Integer)], Str),
        strings::substring::<String>,
    ));
    r.add(StdFunction::new(
        xacml3("anyURI-substring"),
        Signature::new([v(DataType::AnyUri), v(Integer), v(Integer)], Str),
        strings::substring::<AnyUri>,
    ));

    // ===== Special match and regular expressions =====
    r.add(StdFunction::new(
        xacml1("x500Name-match"),
        Signature::new([v(DataType::X500Name), v(DataType::X500Name)], Boolean),
        special_match::x500_name_match,
    ));
    r.add(StdFunction::new(
        xacml1("rfc822Name-match"),
        Signature::new([v(Str), v(DataType::Rfc822Name)], Boolean),
        special_match::rfc822_name_match,
    ));
    register_regexp::<String>(r, xacml1("string-regexp-match"));
    register_regexp::<AnyUri>(r, xacml2("anyURI-regexp-match"));
    register_regexp::<IpAddress>(r, xacml2("ipAddress-regexp-match"));
    register_regexp::<DnsName>(r, xacml2("dnsName-regexp-match"));
    register_regexp::<Rfc822Name>(r, xacml2("rfc822Name-regexp-match"));
    register_regexp::<X500Name>(r, xacml2("x500Name-regexp-match"));

    // ===== Higher-order bag functions =====
    let fun = ParamSpec::Function;
    let any = ParamSpec::Any;
    r.add(StdFunction::new(xacml3("any-of"), Signature::new([fun, any], Boolean).variadic(), higher_order::any_of));
    r.add(StdFunction::new(xacml3("all-of"), Signature::new([fun, any], Boolean).variadic(), higher_order::all_of));
    r.add(StdFunction::new(xacml3("any-of-any"), Signature::new([fun, any, any], Boolean), higher_order::any_of_any));
    r.add(StdFunction::new(xacml3("all-of-any"), Signature::new([fun, any, any], Boolean), higher_order::all_of_any));
    r.add(StdFunction::new(xacml3("any-of-all"), Signature::new([fun, any, any], Boolean), higher_order::any_of_all));
    r.add(StdFunction::new(xacml3("all-of-all"), Signature::new([fun, any, any], Boolean), higher_order::all_of_all));
    r.add(StdFunction::new(xacml3("map"), Signature::polymorphic([fun, any]).variadic(), higher_order::map));

    // ===== Date and time arithmetic =====
    let dt_sig = |d: DataType| Signature::new([v(DataType::DateTime), v(d)], DataType::DateTime);
    let date_sig = Signature::new([v(DataType::Date), v(DataType::YearMonthDuration)], DataType::Date);
    add_reidentified(
        r,
        "dateTime-add-dayTimeDuration",
        dt_sig(DataType::DayTimeDuration),
        date_time::datetime_add_day_time,
    );
    add_reidentified(
        r,
        "dateTime-subtract-dayTimeDuration",
        dt_sig(DataType::DayTimeDuration),
        date_time::datetime_subtract_day_time,
    );
    add_reidentified(
        r,
        "dateTime-add-yearMonthDuration",
        dt_sig(DataType::YearMonthDuration),
        date_time::datetime_add_year_month,
    );
    add_reidentified(
        r,
        "dateTime-subtract-yearMonthDuration",
        dt_sig(DataType::YearMonthDuration),
        date_time::datetime_subtract_year_month,
    );
    add_reidentified(r, "date-add-yearMonthDuration", date_sig.clone(), date_time::date_add_year_month);
    add_reidentified(r, "date-subtract-yearMonthDuration", date_sig, date_time::date_subtract_year_month);

    // ===== String conversion =====
    register_conversion::<bool>(r);
    register_conversion::<BigInt>(r);
    register_conversion::<f64>(r);
    register_conversion::<Time>(r);
    register_conversion::<Date>(r);
    register_conversion::<DateTime>(r);
    register_conversion::<AnyUri>(r);
    register_conversion::<DayTimeDuration>(r);
    register_conversion::<YearMonthDuration>(r);
    register_conversion::<X500Name>(r);
    register_conversion::<Rfc822Name>(r);
    register_conversion::<IpAddress>(r);
    register_conversion::<DnsName>(r);

    // ===== XPath node functions =====
    if r.config().xpath_functions {
        let x = v(XPathValue::DATA_TYPE);
        add_reidentified(r, "xpath-node-count", Signature::new([x], Integer), xpath::node_count);
        add_reidentified(r, "xpath-node-equal", Signature::new([x, x], Boolean), xpath::node_equal);
        add_reidentified(r, "xpath-node-match", Signature::new([x, x], Boolean), xpath::node_match);
    }
}
