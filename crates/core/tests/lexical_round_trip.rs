use rstest::rstest;
use xacml_core::{AttributeValue, DataType};

#[rstest]
#[case(DataType::String, "  spaced text ")]
#[case(DataType::Boolean, "false")]
#[case(DataType::Integer, "+123456789012345678901234567890")]
#[case(DataType::Double, "-1.25E-3")]
#[case(DataType::Double, "INF")]
#[case(DataType::Time, "09:30:15")]
#[case(DataType::Time, "23:59:59.5+05:30")]
#[case(DataType::Date, "2002-09-24")]
#[case(DataType::Date, "-0044-03-15-01:00")]
#[case(DataType::DateTime, "2000-01-12T12:13:14Z")]
#[case(DataType::DateTime, "1999-12-31T23:59:59.000123-08:00")]
#[case(DataType::AnyUri, "http://example.com/a?b=c")]
#[case(DataType::HexBinary, "deadbeef")]
#[case(DataType::Base64Binary, "SGVsbG8gd29ybGQ=")]
#[case(DataType::DayTimeDuration, "-P1DT2H0M30.25S")]
#[case(DataType::DayTimeDuration, "PT36H")]
#[case(DataType::YearMonthDuration, "P2Y15M")]
#[case(DataType::X500Name, "cn=John Smith, o=Acme\\, Inc., c=US")]
#[case(DataType::Rfc822Name, "Anne.Smith@Example.COM")]
#[case(DataType::IpAddress, "10.1.0.0/255.255.0.0:1024-")]
#[case(DataType::IpAddress, "[fe80::1]/64:-1023")]
#[case(DataType::DnsName, "*.Example.org:80-90")]
fn canonical_form_reparses_to_equal_value(#[case] dt: DataType, #[case] literal: &str) {
    let value = AttributeValue::parse(dt, literal).unwrap();
    let rendered = value.to_string();
    let reparsed = AttributeValue::parse(dt, &rendered).unwrap();
    assert_eq!(reparsed, value, "{literal} rendered as {rendered}");
}

#[rstest]
#[case(DataType::Date, "2013-32-12", "Invalid ISO8601 date string \"2013-32-12\" at position 5: month out of range")]
#[case(DataType::Boolean, "TRUE", "Invalid boolean string \"TRUE\" at position 0: expected 'true' or 'false'")]
fn parse_errors_name_the_position(#[case] dt: DataType, #[case] literal: &str, #[case] message: &str) {
    assert_eq!(AttributeValue::parse(dt, literal).unwrap_err().to_string(), message);
}

#[test]
fn temporal_values_compare_by_instant() {
    let a = AttributeValue::parse(DataType::DateTime, "2002-09-24T10:00:00+02:00").unwrap();
    let b = AttributeValue::parse(DataType::DateTime, "2002-09-24T08:00:00Z").unwrap();
    assert_eq!(a, b);
}
