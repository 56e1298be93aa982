use num_bigint::BigInt;

use super::{ParseError, Scanner};

pub fn parse_boolean(s: &str) -> Result<bool, ParseError> {
    match s {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseError::new("boolean", s, 0, "expected 'true' or 'false'")),
    }
}

pub fn parse_integer(s: &str) -> Result<BigInt, ParseError> {
    let mut sc = Scanner::new("integer", s);
    if !sc.eat(b'-') {
        sc.eat(b'+');
    }
    let digits = sc.digits()?;
    sc.finish()?;
    let magnitude = digits.parse::<BigInt>().map_err(|e| ParseError::new("integer", s, 0, e.to_string()))?;
    Ok(if s.starts_with('-') { -magnitude } else { magnitude })
}

/// `xs:double` lexical space: decimal or scientific notation, `INF`, `-INF` and `NaN`.
pub fn parse_double(s: &str) -> Result<f64, ParseError> {
    match s {
        "INF" | "+INF" => return Ok(f64::INFINITY),
        "-INF" => return Ok(f64::NEG_INFINITY),
        "NaN" => return Ok(f64::NAN),
        _ => {}
    }
    let mut sc = Scanner::new("double", s);
    if !sc.eat(b'-') {
        sc.eat(b'+');
    }
    let mantissa_at = sc.pos();
    let mut seen_digit = false;
    while sc.peek().is_some_and(|b| b.is_ascii_digit()) {
        sc.bump();
        seen_digit = true;
    }
    if sc.eat(b'.') {
        while sc.peek().is_some_and(|b| b.is_ascii_digit()) {
            sc.bump();
            seen_digit = true;
        }
    }
    if !seen_digit {
        return Err(sc.error_at(mantissa_at, "expected digit"));
    }
    if sc.eat(b'e') || sc.eat(b'E') {
        if !sc.eat(b'-') {
            sc.eat(b'+');
        }
        sc.digits()?;
    }
    sc.finish()?;
    s.parse::<f64>().map_err(|e| ParseError::new("double", s, 0, e.to_string()))
}

/// Shortest text that parses back to the same double.
pub fn format_double(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v.is_infinite() {
        if v > 0.0 { "INF".to_string() } else { "-INF".to_string() }
    } else {
        format!("{v:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.5", 1.5)]
    #[case("-.5e2", -50.0)]
    #[case("+3", 3.0)]
    #[case("1E3", 1000.0)]
    #[case("INF", f64::INFINITY)]
    fn doubles(#[case] input: &str, #[case] expected: f64) {
        assert_eq!(parse_double(input).unwrap(), expected);
    }

    #[rstest]
    #[case("inf")]
    #[case("infinity")]
    #[case("1e")]
    #[case(".")]
    #[case("1.5f")]
    fn invalid_doubles(#[case] input: &str) {
        assert!(parse_double(input).is_err());
    }

    #[test]
    fn double_formatting_round_trips() {
        for v in [0.1, -2.0, 1e21, 5e-324, f64::MAX] {
            assert_eq!(parse_double(&format_double(v)).unwrap(), v);
        }
        assert!(parse_double(&format_double(f64::NAN)).unwrap().is_nan());
    }

    #[test]
    fn integers_are_arbitrary_precision() {
        let big = parse_integer("-123456789012345678901234567890").unwrap();
        assert_eq!(big.to_string(), "-123456789012345678901234567890");
        assert_eq!(parse_integer("+7").unwrap(), BigInt::from(7));
        let err = parse_integer("12a").unwrap_err();
        assert_eq!(err.position, 2);
    }

    #[test]
    fn booleans_are_strict() {
        assert!(parse_boolean("true").unwrap());
        assert!(parse_boolean("TRUE").is_err());
        assert!(parse_boolean("1").is_err());
    }
}
