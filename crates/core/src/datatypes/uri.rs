use core::fmt;
use core::str::FromStr;

use super::ParseError;

/// `anyURI`: an absolute URI or a relative reference, compared as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnyUri(String);

impl AnyUri {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

fn scheme_len(s: &str) -> Option<usize> {
    let colon = s.find(':')?;
    let scheme = &s[..colon];
    let mut chars = scheme.chars();
    let first = chars.next()?;
    (first.is_ascii_alphabetic() && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')))
        .then_some(colon)
}

impl FromStr for AnyUri {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |at: usize, reason: String| ParseError::new("anyURI", s, at, reason);
        if let Some(i) = s.find(|c: char| c.is_whitespace() || c.is_control() || matches!(c, '<' | '>' | '"' | '{' | '}' | '|' | '\\' | '^' | '`')) {
            return Err(err(i, "character not allowed in a URI".to_string()));
        }
        if scheme_len(s).is_some() {
            url::Url::parse(s).map_err(|e| err(0, e.to_string()))?;
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for AnyUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("urn:oasis:names:tc:xacml:1.0:function:string-equal")]
    #[case("http://example.com/records?id=7#top")]
    #[case("../relative/path")]
    #[case("")]
    fn valid_uris(#[case] input: &str) {
        assert_eq!(input.parse::<AnyUri>().unwrap().as_str(), input);
    }

    #[rstest]
    #[case("http://exa mple.com", 10)]
    #[case("a<b", 1)]
    #[case("http://[::1", 0)]
    fn invalid_uris(#[case] input: &str, #[case] position: usize) {
        assert_eq!(input.parse::<AnyUri>().unwrap_err().position, position);
    }
}
