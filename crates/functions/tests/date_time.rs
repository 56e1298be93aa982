use rstest::rstest;
use xacml_core::{AttributeValue, DataType, ExpressionResult, FunctionArgument, StatusCode};
use xacml_functions::FunctionRegistry;
use xacml_functions::ids::{self, xacml1, xacml3};

fn lit(dt: DataType, text: &str) -> FunctionArgument {
    AttributeValue::parse(dt, text).expect("valid literal").into()
}

fn call(id: &str, args: &[FunctionArgument]) -> ExpressionResult {
    FunctionRegistry::standard().evaluate(id, None, args)
}

/// Lexical form of the result, which also shows whether the timezone survived.
fn lexical(id: &str, operand: FunctionArgument, duration: FunctionArgument) -> String {
    call(id, &[operand, duration])
        .expect("arithmetic should succeed")
        .as_value()
        .expect("single value")
        .to_string()
}

#[rstest]
fn adds_day_time_duration_with_carries() {
    let result = lexical(
        ids::DATETIME_ADD_DAYTIMEDURATION,
        lit(DataType::DateTime, "2000-01-12T12:13:14"),
        lit(DataType::DayTimeDuration, "P5DT7H10M3.3S"),
    );
    assert_eq!(result, "2000-01-17T19:23:17.300");
}

#[rstest]
#[case("dateTime-add-dayTimeDuration", "2000-02-28T23:00:00Z", "PT1H", "2000-02-29T00:00:00Z")]
#[case("dateTime-add-dayTimeDuration", "1999-02-28T23:00:00", "PT1H", "1999-03-01T00:00:00")]
#[case("dateTime-add-dayTimeDuration", "2001-12-31T23:59:59.5+05:00", "PT0.5S", "2002-01-01T00:00:00+05:00")]
#[case("dateTime-subtract-dayTimeDuration", "2002-01-01T00:00:00-08:00", "P1DT0.001S", "2001-12-30T23:59:59.999-08:00")]
#[case("dateTime-add-dayTimeDuration", "2002-01-01T00:00:00", "-P1D", "2001-12-31T00:00:00")]
#[case("dateTime-add-yearMonthDuration", "2001-01-31T10:00:00", "P1M", "2001-02-28T10:00:00")]
#[case("dateTime-subtract-yearMonthDuration", "2004-03-31T23:59:59-05:00", "P1M", "2004-02-29T23:59:59-05:00")]
#[case("dateTime-subtract-yearMonthDuration", "2001-03-15T10:00:00Z", "P1Y3M", "1999-12-15T10:00:00Z")]
fn date_time_arithmetic(#[case] local: &str, #[case] operand: &str, #[case] duration: &str, #[case] expected: &str) {
    let duration_type =
        if local.ends_with("yearMonthDuration") { DataType::YearMonthDuration } else { DataType::DayTimeDuration };
    let result = lexical(&xacml3(local), lit(DataType::DateTime, operand), lit(duration_type, duration));
    assert_eq!(result, expected);
}

#[rstest]
#[case("date-add-yearMonthDuration", "2000-02-29", "P1Y", "2001-02-28")]
#[case("date-add-yearMonthDuration", "2001-08-31Z", "P1M", "2001-09-30Z")]
#[case("date-add-yearMonthDuration", "2002-01-15+02:00", "P13M", "2003-02-15+02:00")]
#[case("date-subtract-yearMonthDuration", "2002-01-15Z", "P2M", "2001-11-15Z")]
fn date_arithmetic(#[case] local: &str, #[case] operand: &str, #[case] duration: &str, #[case] expected: &str) {
    let result = lexical(&xacml3(local), lit(DataType::Date, operand), lit(DataType::YearMonthDuration, duration));
    assert_eq!(result, expected);
}

#[rstest]
#[case("2000-01-12T12:13:14", "P5DT7H10M3.3S")]
#[case("2000-02-29T23:59:59.999Z", "P1DT0.002S")]
#[case("-0001-12-31T23:00:00", "PT2H")]
#[case("2003-03-01T00:00:00+14:00", "-P400D")]
fn day_time_subtraction_undoes_addition(#[case] operand: &str, #[case] duration: &str) {
    let v = lit(DataType::DateTime, operand);
    let d = lit(DataType::DayTimeDuration, duration);
    let added = call(&xacml3("dateTime-add-dayTimeDuration"), &[v.clone(), d.clone()]).expect("add");
    let back = lexical(&xacml3("dateTime-subtract-dayTimeDuration"), added.into(), d);
    assert_eq!(lit(DataType::DateTime, &back), v);
    assert_eq!(back, operand);
}

#[rstest]
#[case("2001-01-28", "P1M")]
#[case("-0002-06-15", "P3Y")]
#[case("1999-11-01Z", "-P14M")]
fn year_month_subtraction_undoes_addition(#[case] operand: &str, #[case] duration: &str) {
    let v = lit(DataType::Date, operand);
    let d = lit(DataType::YearMonthDuration, duration);
    let added = call(&xacml3("date-add-yearMonthDuration"), &[v.clone(), d.clone()]).expect("add");
    let back = lexical(&xacml3("date-subtract-yearMonthDuration"), added.into(), d);
    assert_eq!(back, operand);
}

#[rstest]
fn legacy_identifier_evaluates_the_same() {
    let args = [lit(DataType::DateTime, "2000-01-12T12:13:14"), lit(DataType::DayTimeDuration, "P1D")];
    let current = call(ids::DATETIME_ADD_DAYTIMEDURATION, &args).expect("3.0 identifier");
    let legacy = call(&xacml1("dateTime-add-dayTimeDuration"), &args).expect("1.0 identifier");
    assert_eq!(current, legacy);
}

#[rstest]
fn errors_carry_the_called_identifier() {
    let status = call(&xacml1("date-add-yearMonthDuration"), &[FunctionArgument::Missing]).unwrap_err();
    assert_eq!(status.message, "function:date-add-yearMonthDuration Expected 2 arguments, got 1");
}

#[rstest]
#[case(vec![FunctionArgument::Missing, lit(DataType::DayTimeDuration, "P1D")], "function:dateTime-add-dayTimeDuration Got null attribute")]
#[case(vec![lit(DataType::Date, "2000-01-01"), lit(DataType::DayTimeDuration, "P1D")], "function:dateTime-add-dayTimeDuration Expected data type 'dateTime' saw 'date'")]
#[case(vec![lit(DataType::DateTime, "2000-01-01T00:00:00"), lit(DataType::YearMonthDuration, "P1M")], "function:dateTime-add-dayTimeDuration Expected data type 'dayTimeDuration' saw 'yearMonthDuration'")]
fn shape_errors(#[case] args: Vec<FunctionArgument>, #[case] message: &str) {
    let status = call(ids::DATETIME_ADD_DAYTIMEDURATION, &args).unwrap_err();
    assert_eq!(status.code, StatusCode::ProcessingError);
    assert_eq!(status.message, message);
}

#[rstest]
#[case("dateTime-add-yearMonthDuration", DataType::DateTime, "2000-01-01T00:00:00", DataType::YearMonthDuration, "P9999999999Y")]
#[case("dateTime-add-dayTimeDuration", DataType::DateTime, "2000-01-12T00:00:00", DataType::DayTimeDuration, "P9223372036854775807D")]
#[case("dateTime-subtract-dayTimeDuration", DataType::DateTime, "2000-01-12T00:00:00", DataType::DayTimeDuration, "P9223372036854775807D")]
#[case("dateTime-add-dayTimeDuration", DataType::DateTime, "2000-01-12T00:00:00", DataType::DayTimeDuration, "P200000000D")]
#[case("date-add-yearMonthDuration", DataType::Date, "2001-03-31", DataType::YearMonthDuration, "P700000000000000000Y1M")]
#[case("date-subtract-yearMonthDuration", DataType::Date, "2001-03-31", DataType::YearMonthDuration, "P700000000000000000Y1M")]
#[case("dateTime-add-yearMonthDuration", DataType::DateTime, "2001-03-31T00:00:00", DataType::YearMonthDuration, "P300000Y")]
fn overflow_is_a_processing_error(
    #[case] local: &str,
    #[case] operand_type: DataType,
    #[case] operand: &str,
    #[case] duration_type: DataType,
    #[case] duration: &str,
) {
    let args = [lit(operand_type, operand), lit(duration_type, duration)];
    let status = call(&xacml3(local), &args).unwrap_err();
    assert_eq!(status.code, StatusCode::ProcessingError);
    assert_eq!(
        status.message,
        format!("function:{local} Result of {} arithmetic is out of range", operand_type.short_name())
    );
}
