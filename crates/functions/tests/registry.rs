use rstest::rstest;
use xacml_core::{AttributeValue, DataType, FunctionArgument, StatusCode};
use xacml_functions::ids::{self, xacml1, xacml2, xacml3};
use xacml_functions::{FunctionDefinition, FunctionRegistry, ParamSpec, RegistryConfig};

#[rstest]
fn standard_registry_is_shared() {
    let a: *const FunctionRegistry = FunctionRegistry::standard();
    let b: *const FunctionRegistry = FunctionRegistry::standard();
    assert_eq!(a, b);
    assert!(!FunctionRegistry::standard().is_empty());
}

#[rstest]
#[case(ids::STRING_EQUAL)]
#[case(ids::INTEGER_ADD)]
#[case(ids::ANY_OF)]
#[case(ids::MAP)]
#[case(ids::DATE_FROM_STRING)]
#[case(ids::XPATH_NODE_MATCH)]
#[case("urn:oasis:names:tc:xacml:3.0:function:dayTimeDuration-equal")]
#[case("urn:oasis:names:tc:xacml:1.0:function:rfc822Name-bag-size")]
#[case("urn:oasis:names:tc:xacml:2.0:function:time-in-range")]
#[case("urn:oasis:names:tc:xacml:2.0:function:dnsName-regexp-match")]
#[case("urn:oasis:names:tc:xacml:3.0:function:anyURI-substring")]
#[case("urn:oasis:names:tc:xacml:1.0:function:dateTime-subtract-yearMonthDuration")]
fn standard_identifiers_are_registered(#[case] id: &str) {
    let function = FunctionRegistry::standard().get(id).expect("registered");
    assert_eq!(function.id(), id);
}

#[rstest]
fn signatures_describe_the_functions() {
    let registry = FunctionRegistry::standard();
    let equal = registry.get(ids::STRING_EQUAL).expect("string-equal");
    assert_eq!(equal.signature().params, [ParamSpec::Value(DataType::String), ParamSpec::Value(DataType::String)]);
    assert_eq!(equal.return_type(), Some(DataType::Boolean));
    assert!(!equal.returns_bag());

    let bag = registry.get(ids::STRING_BAG).expect("string-bag");
    assert!(bag.returns_bag());
    assert!(bag.signature().variadic);

    let map = registry.get(ids::MAP).expect("map");
    assert_eq!(map.return_type(), None);
}

#[rstest]
fn unknown_identifier_is_a_processing_error() {
    let status = FunctionRegistry::standard().evaluate("urn:example:nothing", None, &[]).unwrap_err();
    assert_eq!(status.code, StatusCode::ProcessingError);
    assert_eq!(status.message, "Unknown function 'urn:example:nothing'");
}

#[rstest]
fn xpath_functions_can_be_left_out() {
    let config = RegistryConfig::from_json(r#"{ "xpath_functions": false }"#).expect("valid config");
    let registry = FunctionRegistry::new(&config);
    assert!(!registry.contains(ids::XPATH_NODE_COUNT));
    assert!(!registry.contains(&xacml1("xpath-node-count")));
    assert!(registry.contains(ids::STRING_EQUAL));
    assert_eq!(FunctionRegistry::standard().len() - registry.len(), 6);
}

#[rstest]
fn legacy_identifiers_can_be_left_out() {
    let config = RegistryConfig { legacy_identifiers: false, ..RegistryConfig::default() };
    let registry = FunctionRegistry::new(&config);
    assert!(registry.contains(&xacml3("date-add-yearMonthDuration")));
    assert!(!registry.contains(&xacml1("date-add-yearMonthDuration")));
    assert!(!registry.contains(&xacml1("xpath-node-equal")));
}

#[rstest]
fn excluded_functions_are_not_registered() {
    let config = RegistryConfig {
        excluded_functions: vec![ids::STRING_REGEXP_MATCH.to_string()],
        ..RegistryConfig::default()
    };
    let registry = FunctionRegistry::new(&config);
    assert!(!registry.contains(ids::STRING_REGEXP_MATCH));
    assert!(registry.contains(&xacml2("anyURI-regexp-match")));
}

#[rstest]
fn excluded_predicate_is_not_resolvable() {
    let config = RegistryConfig { excluded_functions: vec![ids::STRING_EQUAL.to_string()], ..RegistryConfig::default() };
    let registry = FunctionRegistry::new(&config);
    let predicate: AttributeValue = AttributeValue::parse(DataType::AnyUri, ids::STRING_EQUAL).expect("uri");
    let args: Vec<FunctionArgument> =
        vec![predicate.into(), AttributeValue::from("a").into(), xacml_core::Bag::of(["a".to_string()]).into()];
    let status = registry.evaluate(ids::ANY_OF, None, &args).unwrap_err();
    assert_eq!(
        status.message,
        format!("function:any-of Predicate Function '{}' is not defined", ids::STRING_EQUAL)
    );
}

#[rstest]
fn ids_are_sorted_and_unique() {
    let ids = FunctionRegistry::standard().ids();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids.len(), FunctionRegistry::standard().len());
}

#[rstest]
fn registries_are_shareable_across_threads() {
    let registry = FunctionRegistry::standard();
    let args: Vec<FunctionArgument> = vec![AttributeValue::from(2i64).into(), AttributeValue::from(3i64).into()];
    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                let sum = registry.evaluate(ids::INTEGER_ADD, None, &args).expect("integer-add");
                assert_eq!(sum.as_value(), Some(&AttributeValue::from(5i64)));
            });
        }
    });
}
