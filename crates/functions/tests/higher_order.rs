use rstest::rstest;
use xacml_core::datatypes::AnyUri;
use xacml_core::{AttributeValue, Bag, BigInt, ExpressionResult, ExpressionValue, FunctionArgument, StatusCode};
use xacml_functions::{FunctionRegistry, ids};

fn function(id: &str) -> FunctionArgument {
    AttributeValue::AnyUri(id.parse::<AnyUri>().expect("valid function id")).into()
}

fn strings(values: &[&str]) -> FunctionArgument {
    Bag::of(values.iter().map(|s| s.to_string())).into()
}

fn ints(values: &[i64]) -> FunctionArgument {
    Bag::of(values.iter().copied().map(BigInt::from)).into()
}

fn s(value: &str) -> FunctionArgument {
    AttributeValue::from(value).into()
}

fn call(id: &str, args: Vec<FunctionArgument>) -> ExpressionResult {
    FunctionRegistry::standard().evaluate(id, None, &args)
}

fn truth(result: ExpressionResult) -> bool {
    result.expect("evaluation should succeed").as_bool().expect("boolean result")
}

#[rstest]
#[case(ids::ANY_OF, false)]
#[case(ids::ALL_OF, true)]
fn single_bag_over_empty_bag(#[case] id: &str, #[case] expected: bool) {
    let result = call(id, vec![function(ids::STRING_EQUAL), s("h"), strings(&[])]);
    assert_eq!(truth(result), expected);
}

#[rstest]
#[case(ids::ANY_OF_ANY, false)]
#[case(ids::ALL_OF_ALL, true)]
#[case(ids::ALL_OF_ANY, false)]
#[case(ids::ANY_OF_ALL, true)]
fn dual_bag_with_empty_second_bag(#[case] id: &str, #[case] expected: bool) {
    let result = call(id, vec![function(ids::STRING_EQUAL), strings(&["a", "b"]), strings(&[])]);
    assert_eq!(truth(result), expected);
}

#[rstest]
#[case(ids::ANY_OF, vec!["x", "h"], true)]
#[case(ids::ANY_OF, vec!["x", "y"], false)]
#[case(ids::ALL_OF, vec!["h", "h"], true)]
#[case(ids::ALL_OF, vec!["h", "y"], false)]
fn single_bag_quantifiers(#[case] id: &str, #[case] bag: Vec<&str>, #[case] expected: bool) {
    let result = call(id, vec![function(ids::STRING_EQUAL), s("h"), strings(&bag)]);
    assert_eq!(truth(result), expected);
}

#[rstest]
fn bound_arguments_keep_their_position() {
    // 10 > b for every b
    let result = call(
        ids::ALL_OF,
        vec![function(ids::INTEGER_GREATER_THAN), AttributeValue::from(10i64).into(), ints(&[1, 5, 9])],
    );
    assert!(truth(result));
    // b > 3 for every b
    let result = call(
        ids::ALL_OF,
        vec![function(ids::INTEGER_GREATER_THAN), ints(&[1, 5, 9]), AttributeValue::from(3i64).into()],
    );
    assert!(!truth(result));
}

#[rstest]
#[case(ids::ANY_OF_ANY, &["a", "b"], &["c", "b"], true)]
#[case(ids::ANY_OF_ANY, &["a", "b"], &["c", "d"], false)]
#[case(ids::ALL_OF_ALL, &["a", "a"], &["a"], true)]
#[case(ids::ALL_OF_ALL, &["a", "b"], &["a"], false)]
#[case(ids::ALL_OF_ANY, &["a", "b"], &["b", "a", "c"], true)]
#[case(ids::ALL_OF_ANY, &["a", "z"], &["b", "a", "c"], false)]
#[case(ids::ANY_OF_ALL, &["a", "b"], &["b", "b"], true)]
#[case(ids::ANY_OF_ALL, &["a", "b"], &["a", "b"], false)]
fn dual_bag_quantifiers(#[case] id: &str, #[case] a: &[&str], #[case] b: &[&str], #[case] expected: bool) {
    let result = call(id, vec![function(ids::STRING_EQUAL), strings(a), strings(b)]);
    assert_eq!(truth(result), expected);
}

#[rstest]
fn map_preserves_order() {
    let result = call(ids::MAP, vec![function(ids::INTEGER_ADD), AttributeValue::from(7i64).into(), ints(&[7, 8, 9])])
        .expect("map should succeed");
    let expected = Bag::of([14i64, 15, 16].map(BigInt::from));
    assert_eq!(result, ExpressionValue::Bag(expected));
}

#[rstest]
fn map_over_empty_bag_is_empty() {
    let result = call(ids::MAP, vec![function(ids::INTEGER_ADD), AttributeValue::from(1i64).into(), ints(&[])])
        .expect("map should succeed");
    assert_eq!(result, ExpressionValue::Bag(Bag::empty()));
}

#[rstest]
#[case(vec![FunctionArgument::Missing, s("h"), strings(&["h"])], "function:any-of Predicate Function (first argument) was null")]
#[case(vec![s("x"), s("h"), strings(&["h"])], "function:any-of First argument expected URI, got http://www.w3.org/2001/XMLSchema#string")]
#[case(vec![function(ids::INTEGER_ADD), s("h"), strings(&["h"])], "function:any-of Predicate Function must return boolean, but 'urn:oasis:names:tc:xacml:1.0:function:integer-add' returns 'http://www.w3.org/2001/XMLSchema#integer'")]
#[case(vec![function("urn:example:nothing"), s("h"), strings(&["h"])], "function:any-of Predicate Function 'urn:example:nothing' is not defined")]
#[case(vec![function(ids::STRING_EQUAL), s("h"), s("h")], "function:any-of Did not get any Bag argument; must have at least 1")]
#[case(vec![function(ids::STRING_EQUAL), strings(&["h"]), strings(&["h"])], "function:any-of must have only 1 bag; found one at index 1 and another at 2")]
#[case(vec![function(ids::STRING_EQUAL), FunctionArgument::Missing, strings(&["h"])], "function:any-of Got null argument at index 1")]
fn single_bag_protocol_errors(#[case] args: Vec<FunctionArgument>, #[case] message: &str) {
    let status = call(ids::ANY_OF, args).unwrap_err();
    assert_eq!(status.code, StatusCode::ProcessingError);
    assert_eq!(status.message, message);
}

#[rstest]
#[case(vec![function(ids::STRING_EQUAL), s("a"), strings(&["a"])], "function:any-of-any 2nd argument must be bag, got 'http://www.w3.org/2001/XMLSchema#string'")]
#[case(vec![function(ids::STRING_EQUAL), strings(&["a"]), s("a")], "function:any-of-any 3rd argument must be bag, got 'http://www.w3.org/2001/XMLSchema#string'")]
#[case(vec![function(ids::STRING_EQUAL), strings(&["a"])], "function:any-of-any Expected 3 arguments, got 2")]
fn dual_bag_protocol_errors(#[case] args: Vec<FunctionArgument>, #[case] message: &str) {
    let status = call(ids::ANY_OF_ANY, args).unwrap_err();
    assert_eq!(status.code, StatusCode::ProcessingError);
    assert_eq!(status.message, message);
}

#[rstest]
fn predicate_failures_are_wrapped() {
    let status = call(ids::ANY_OF, vec![function(ids::STRING_EQUAL), AttributeValue::from(1i64).into(), strings(&["a"])])
        .unwrap_err();
    assert_eq!(status.code, StatusCode::ProcessingError);
    assert_eq!(
        status.message,
        "function:any-of Predicate error: function:string-equal Expected data type 'string' saw 'integer' at arg index 0"
    );
}

#[rstest]
fn bag_returning_predicate_is_rejected() {
    let status = call(ids::MAP, vec![function(ids::STRING_BAG), strings(&["a"])]).unwrap_err();
    assert_eq!(
        status.message,
        "function:map Predicate Function must return a single value, but 'urn:oasis:names:tc:xacml:1.0:function:string-bag' returns a bag"
    );
}
