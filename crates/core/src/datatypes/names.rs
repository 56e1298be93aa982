use core::fmt;
use core::hash::{Hash, Hasher};
use core::str::FromStr;

use super::ParseError;

/// One `type=value` pair of a relative distinguished name.
#[derive(Debug, Clone)]
struct Atav {
    attr_type: String,
    value: String,
}

/// `x500Name`: an RFC 2253 distinguished name, most specific RDN first.
///
/// Comparison ignores the case of attribute types and values, runs of whitespace inside values,
/// and the order of the pairs inside a multi-valued RDN.
#[derive(Debug, Clone)]
pub struct X500Name {
    rdns: Vec<Vec<Atav>>,
}

const X500_KIND: &str = "X.500 name";

fn canonical_rdn(rdn: &[Atav]) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = rdn
        .iter()
        .map(|a| {
            let value = a.value.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase();
            (a.attr_type.to_ascii_lowercase(), value)
        })
        .collect();
    pairs.sort();
    pairs
}

impl X500Name {
    pub fn rdn_count(&self) -> usize {
        self.rdns.len()
    }

    fn canonical(&self) -> Vec<Vec<(String, String)>> {
        self.rdns.iter().map(|r| canonical_rdn(r)).collect()
    }

    /// True when this name equals the trailing (least specific) RDNs of `other`.
    pub fn is_terminal_sequence_of(&self, other: &X500Name) -> bool {
        if self.rdns.len() > other.rdns.len() {
            return false;
        }
        let skip = other.rdns.len() - self.rdns.len();
        self.rdns.iter().zip(&other.rdns[skip..]).all(|(a, b)| canonical_rdn(a) == canonical_rdn(b))
    }
}

impl PartialEq for X500Name {
    fn eq(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }
}

impl Eq for X500Name {}

impl Hash for X500Name {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.canonical().hash(state);
    }
}

struct DnParser<'a> {
    input: &'a str,
    chars: Vec<(usize, char)>,
    idx: usize,
}

impl DnParser<'_> {
    fn pos(&self) -> usize {
        self.chars.get(self.idx).map_or(self.input.len(), |(p, _)| *p)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.idx).map(|(_, c)| *c)
    }

    fn error(&self, reason: &str) -> ParseError {
        ParseError::new(X500_KIND, self.input, self.pos(), reason)
    }

    fn skip_spaces(&mut self) {
        while self.peek() == Some(' ') {
            self.idx += 1;
        }
    }

    fn attr_type(&mut self) -> Result<String, ParseError> {
        self.skip_spaces();
        let mut out = String::new();
        while let Some(c) = self.peek().filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '.') {
            out.push(c);
            self.idx += 1;
        }
        if out.is_empty() {
            return Err(self.error("expected attribute type"));
        }
        self.skip_spaces();
        if self.peek() != Some('=') {
            return Err(self.error("expected '='"));
        }
        self.idx += 1;
        Ok(out)
    }

    fn hex_pair(&mut self) -> Option<u8> {
        let hi = self.peek()?.to_digit(16)?;
        let lo = self.chars.get(self.idx + 1)?.1.to_digit(16)?;
        self.idx += 2;
        Some((hi * 16 + lo) as u8)
    }

    fn value(&mut self) -> Result<String, ParseError> {
        self.skip_spaces();
        if self.peek() == Some('"') {
            self.idx += 1;
            let mut out = String::new();
            loop {
                match self.peek() {
                    None => return Err(self.error("unterminated quoted value")),
                    Some('"') => {
                        self.idx += 1;
                        break;
                    }
                    Some('\\') => {
                        self.idx += 1;
                        let c = self.peek().ok_or_else(|| self.error("dangling escape"))?;
                        out.push(c);
                        self.idx += 1;
                    }
                    Some(c) => {
                        out.push(c);
                        self.idx += 1;
                    }
                }
            }
            self.skip_spaces();
            return Ok(out);
        }
        let mut bytes: Vec<u8> = Vec::new();
        let mut significant = 0usize;
        while let Some(c) = self.peek() {
            match c {
                ',' | ';' | '+' => break,
                '\\' => {
                    self.idx += 1;
                    match self.peek() {
                        Some(e) if ",=+<>#;\\\" ".contains(e) => {
                            let mut buf = [0u8; 4];
                            bytes.extend_from_slice(e.encode_utf8(&mut buf).as_bytes());
                            self.idx += 1;
                        }
                        Some(_) => {
                            let b = self.hex_pair().ok_or_else(|| self.error("invalid escape"))?;
                            bytes.push(b);
                        }
                        None => return Err(self.error("dangling escape")),
                    }
                    significant = bytes.len();
                }
                '"' | '<' | '>' | '=' => return Err(self.error("special character must be escaped")),
                _ => {
                    let mut buf = [0u8; 4];
                    bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
                    if c != ' ' {
                        significant = bytes.len();
                    }
                    self.idx += 1;
                }
            }
        }
        bytes.truncate(significant);
        String::from_utf8(bytes).map_err(|_| self.error("escaped bytes are not UTF-8"))
    }
}

impl FromStr for X500Name {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut p = DnParser { input: s, chars: s.char_indices().collect(), idx: 0 };
        let mut rdns = Vec::new();
        p.skip_spaces();
        if p.peek().is_none() {
            return Ok(Self { rdns });
        }
        let mut rdn = Vec::new();
        loop {
            let attr_type = p.attr_type()?;
            let value = p.value()?;
            rdn.push(Atav { attr_type, value });
            match p.peek() {
                Some('+') => p.idx += 1,
                Some(',' | ';') => {
                    p.idx += 1;
                    rdns.push(std::mem::take(&mut rdn));
                }
                None => {
                    rdns.push(rdn);
                    break;
                }
                Some(_) => return Err(p.error("expected ',' or '+'")),
            }
        }
        Ok(Self { rdns })
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    let last = value.chars().count().saturating_sub(1);
    for (i, c) in value.chars().enumerate() {
        let needs = matches!(c, ',' | '+' | '"' | '\\' | '<' | '>' | ';' | '=')
            || (i == 0 && (c == '#' || c == ' '))
            || (i == last && c == ' ');
        if needs {
            f.write_str("\\")?;
        }
        write!(f, "{c}")?;
    }
    Ok(())
}

impl fmt::Display for X500Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, rdn) in self.rdns.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            for (j, atav) in rdn.iter().enumerate() {
                if j > 0 {
                    f.write_str("+")?;
                }
                write!(f, "{}=", atav.attr_type)?;
                write_escaped(f, &atav.value)?;
            }
        }
        Ok(())
    }
}

/// `rfc822Name`: an e-mail address. The local part is case-sensitive, the domain is not and is
/// kept in lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rfc822Name {
    local: String,
    domain: String,
}

impl Rfc822Name {
    pub fn local_part(&self) -> &str {
        &self.local
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Match against an `rfc822Name-match` pattern: a complete mailbox, a domain
    /// (`example.com`), or any sub-domain of a domain (`.example.com`).
    pub fn matches_pattern(&self, pattern: &str) -> bool {
        if pattern.contains('@') {
            return pattern.parse::<Rfc822Name>().is_ok_and(|p| &p == self);
        }
        let pattern = pattern.to_ascii_lowercase();
        if pattern.starts_with('.') {
            self.domain.len() > pattern.len() && self.domain.ends_with(&pattern)
        } else {
            self.domain == pattern
        }
    }
}

impl FromStr for Rfc822Name {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |at: usize, reason: &str| ParseError::new("RFC 822 name", s, at, reason);
        let at = s.find('@').ok_or_else(|| err(0, "missing '@'"))?;
        let (local, domain) = (&s[..at], &s[at + 1..]);
        if local.is_empty() {
            return Err(err(0, "empty local part"));
        }
        if let Some(i) = local.find(|c: char| c.is_whitespace() || c.is_control()) {
            return Err(err(i, "invalid character in local part"));
        }
        if domain.is_empty() {
            return Err(err(at + 1, "empty domain"));
        }
        if let Some(i) = domain.find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '[' | ']' | ':'))) {
            return Err(err(at + 1 + i, "invalid character in domain"));
        }
        Ok(Self { local: local.to_string(), domain: domain.to_ascii_lowercase() })
    }
}

impl fmt::Display for Rfc822Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.local, self.domain)
    }
}
