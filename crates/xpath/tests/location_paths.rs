use rstest::{fixture, rstest};
use xacml_xpath::{ErrorCode, NodeKind, StaticContext, XdmNode, XdmValue, XmlDocument, XmlNode, compile_xpath};

const RECORD: &str = r#"<md:record xmlns:md="urn:example:med" id="r1">
  <md:patient>
    <md:name>Bart</md:name>
    <md:dob>1992-03-21</md:dob>
  </md:patient>
  <md:visit n="1"/>
  <md:visit n="2"/>
  <md:visit n="3"/>
  <!-- audit -->
</md:record>"#;

#[fixture]
fn record() -> XmlDocument {
    XmlDocument::parse(RECORD).expect("well-formed")
}

fn ctx() -> StaticContext {
    StaticContext::builder().with_namespace("md", "urn:example:med").build()
}

fn select(doc: &XmlDocument, expr: &str) -> Vec<XmlNode> {
    compile_xpath(expr, &ctx()).unwrap().select_nodes(&doc.root()).unwrap()
}

fn eval(doc: &XmlDocument, expr: &str) -> XdmValue<XmlNode> {
    compile_xpath(expr, &ctx()).unwrap().evaluate(&doc.root()).unwrap()
}

#[rstest]
#[case("/md:record", 1)]
#[case("//md:visit", 3)]
#[case("/md:record/*", 4)]
#[case("//md:visit[@n > 1]", 2)]
#[case("//md:visit[2]", 1)]
#[case("//md:visit[last()]/@n", 1)]
#[case("//@*", 4)]
#[case("//comment()", 1)]
#[case("//md:name/text()", 1)]
#[case("//md:name/ancestor::*", 2)]
#[case("//md:patient/following-sibling::md:visit", 3)]
#[case("//md:visit[3]/preceding-sibling::*", 3)]
#[case("//md:dob/preceding::*", 1)]
#[case("//md:patient/following::*", 3)]
#[case("//md:name/..", 1)]
#[case("//md:visit | //md:patient", 4)]
#[case("//record", 0)]
#[case("//md:*[local-name() = 'dob']", 1)]
fn selects_expected_number_of_nodes(record: XmlDocument, #[case] expr: &str, #[case] expected: usize) {
    assert_eq!(select(&record, expr).len(), expected, "{expr}");
}

#[rstest]
fn union_is_in_document_order(record: XmlDocument) {
    let nodes = select(&record, "//md:visit | //md:patient | /md:record");
    let names: Vec<String> = nodes.iter().map(|n| n.name().unwrap().local).collect();
    assert_eq!(names, ["record", "patient", "visit", "visit", "visit"]);
}

#[rstest]
fn reverse_axis_positions_count_backwards(record: XmlDocument) {
    let nodes = select(&record, "//md:visit[3]/preceding-sibling::md:visit[1]");
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].attributes()[0].string_value(), "2");
}

#[rstest]
#[case("count(//md:visit)", 3.0)]
#[case("sum(//md:visit/@n)", 6.0)]
#[case("string-length(//md:name)", 4.0)]
#[case("//md:visit[2]/@n * 10 div 4", 5.0)]
#[case("7 mod 3", 1.0)]
#[case("-(2 + 1)", -3.0)]
#[case("round(2.5) + floor(1.7) + ceiling(0.2)", 5.0)]
fn numeric_expressions(record: XmlDocument, #[case] expr: &str, #[case] expected: f64) {
    assert_eq!(eval(&record, expr), XdmValue::Number(expected), "{expr}");
}

#[rstest]
#[case("concat(//md:name, '-', //md:dob)", "Bart-1992-03-21")]
#[case("substring-before(//md:dob, '-')", "1992")]
#[case("substring-after(//md:dob, '-')", "03-21")]
#[case("substring('12345', 2, 3)", "234")]
#[case("substring('12345', 1.5, 2.6)", "234")]
#[case("normalize-space('  a   b ')", "a b")]
#[case("translate('bar', 'abc', 'ABC')", "BAr")]
#[case("name(/*)", "md:record")]
#[case("namespace-uri(/*)", "urn:example:med")]
#[case("string(/md:record/@id)", "r1")]
fn string_expressions(record: XmlDocument, #[case] expr: &str, #[case] expected: &str) {
    assert_eq!(eval(&record, expr), XdmValue::String(expected.to_string()), "{expr}");
}

#[rstest]
#[case("//md:visit/@n = 2", true)]
#[case("//md:visit/@n != 2", true)]
#[case("//md:visit/@n > 3", false)]
#[case("//md:name = 'Bart'", true)]
#[case("//missing = ''", false)]
#[case("not(//missing)", true)]
#[case("starts-with(//md:name, 'Ba') and contains(//md:dob, '03')", true)]
#[case("boolean(0) or 1 = 1.0", true)]
#[case("'abc' = true()", true)]
fn boolean_expressions(record: XmlDocument, #[case] expr: &str, #[case] expected: bool) {
    assert_eq!(eval(&record, expr), XdmValue::Boolean(expected), "{expr}");
}

#[rstest]
fn attribute_nodes_belong_to_their_element(record: XmlDocument) {
    let attrs = select(&record, "/md:record/@id");
    assert_eq!(attrs[0].kind(), NodeKind::Attribute);
    let owner = select(&record, "/md:record")[0].clone();
    assert!(owner.is_ancestor_of(&attrs[0]));
}

#[rstest]
fn evaluation_from_an_inner_context_node(record: XmlDocument) {
    let patient = select(&record, "//md:patient")[0].clone();
    let exe = compile_xpath("md:name", &ctx()).unwrap();
    assert_eq!(exe.select_nodes(&patient).unwrap().len(), 1);
    let exe = compile_xpath("/md:record/@id", &ctx()).unwrap();
    assert_eq!(exe.select_nodes(&patient).unwrap().len(), 1);
}

#[rstest]
fn non_node_results_are_type_errors_for_selection(record: XmlDocument) {
    let exe = compile_xpath("count(//md:visit)", &ctx()).unwrap();
    assert_eq!(exe.select_nodes(&record.root()).unwrap_err().code, ErrorCode::XPTY0004);
    let exe = compile_xpath("'a' | //md:visit", &ctx()).unwrap();
    assert_eq!(exe.evaluate(&record.root()).unwrap_err().code, ErrorCode::XPTY0004);
}

#[rstest]
#[case("//md:visit[", ErrorCode::XPST0003)]
#[case("//x:visit", ErrorCode::XPST0081)]
#[case("upper-case('a')", ErrorCode::XPST0017)]
fn static_errors(#[case] expr: &str, #[case] code: ErrorCode) {
    let err = compile_xpath(expr, &ctx()).unwrap_err();
    assert_eq!(err.code, code);
    assert!(err.is_static());
}
