use core::fmt;

use crate::model::XdmNode;

/// Result of evaluating an expression: one of the four XPath 1.0 value types.
///
/// Node sets are kept in document order without duplicates.
#[derive(Debug, Clone, PartialEq)]
pub enum XdmValue<N> {
    NodeSet(Vec<N>),
    Number(f64),
    String(String),
    Boolean(bool),
}

impl<N: XdmNode> XdmValue<N> {
    pub fn type_name(&self) -> &'static str {
        match self {
            XdmValue::NodeSet(_) => "node-set",
            XdmValue::Number(_) => "number",
            XdmValue::String(_) => "string",
            XdmValue::Boolean(_) => "boolean",
        }
    }

    pub fn as_nodes(&self) -> Option<&[N]> {
        match self {
            XdmValue::NodeSet(n) => Some(n),
            _ => None,
        }
    }

    pub fn into_nodes(self) -> Option<Vec<N>> {
        match self {
            XdmValue::NodeSet(n) => Some(n),
            _ => None,
        }
    }

    pub fn to_boolean(&self) -> bool {
        match self {
            XdmValue::NodeSet(n) => !n.is_empty(),
            XdmValue::Number(v) => *v != 0.0 && !v.is_nan(),
            XdmValue::String(s) => !s.is_empty(),
            XdmValue::Boolean(b) => *b,
        }
    }

    pub fn to_number(&self) -> f64 {
        match self {
            XdmValue::Number(v) => *v,
            XdmValue::Boolean(b) => f64::from(u8::from(*b)),
            _ => string_to_number(&self.to_string_value()),
        }
    }

    /// String value; for a node set, the string value of its first node.
    pub fn to_string_value(&self) -> String {
        match self {
            XdmValue::NodeSet(n) => n.first().map(|n| n.string_value()).unwrap_or_default(),
            XdmValue::Number(v) => number_to_string(*v),
            XdmValue::String(s) => s.clone(),
            XdmValue::Boolean(b) => b.to_string(),
        }
    }
}

impl<N: XdmNode> fmt::Display for XdmValue<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_value())
    }
}

/// XPath `number()` applied to a string: optional whitespace, an optional minus sign, and a
/// plain decimal. Everything else is NaN.
pub fn string_to_number(s: &str) -> f64 {
    let t = s.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
    let digits = t.strip_prefix('-').unwrap_or(t);
    let valid = !digits.is_empty()
        && digits != "."
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.matches('.').count() <= 1;
    if valid { t.parse::<f64>().unwrap_or(f64::NAN) } else { f64::NAN }
}

pub fn number_to_string(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() }
    } else if v == 0.0 {
        "0".to_string()
    } else {
        // f64 Display never switches to exponent notation and drops a zero fraction.
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(" 12 ", 12.0)]
    #[case("-1.5", -1.5)]
    #[case(".5", 0.5)]
    #[case("5.", 5.0)]
    fn numeric_strings(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(string_to_number(input), expected);
    }

    #[rstest]
    #[case("")]
    #[case("1e3")]
    #[case("+1")]
    #[case("abc")]
    #[case("1.2.3")]
    fn non_numeric_strings(#[case] input: &str) {
        assert!(string_to_number(input).is_nan());
    }

    #[rstest]
    #[case(2.0, "2")]
    #[case(-0.0, "0")]
    #[case(0.25, "0.25")]
    #[case(f64::NAN, "NaN")]
    #[case(f64::NEG_INFINITY, "-Infinity")]
    fn number_formatting(#[case] v: f64, #[case] expected: &str) {
        assert_eq!(number_to_string(v), expected);
    }
}
