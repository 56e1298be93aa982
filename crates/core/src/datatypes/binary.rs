use core::fmt;
use core::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use super::ParseError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct HexBinary(pub Vec<u8>);

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Base64Binary(pub Vec<u8>);

impl HexBinary {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Base64Binary {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for HexBinary {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex::decode(s).map(Self).map_err(|e| {
            let position = match e {
                hex::FromHexError::InvalidHexCharacter { index, .. } => index,
                _ => s.len(),
            };
            ParseError::new("hexBinary", s, position, e.to_string())
        })
    }
}

impl fmt::Display for HexBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(&self.0))
    }
}

impl FromStr for Base64Binary {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_ascii_whitespace()).collect();
        STANDARD.decode(compact.as_bytes()).map(Self).map_err(|e| {
            let position = match e {
                base64::DecodeError::InvalidByte(i, _) | base64::DecodeError::InvalidLastSymbol(i, _) => i,
                _ => s.len(),
            };
            ParseError::new("base64Binary", s, position, e.to_string())
        })
    }
}

impl fmt::Display for Base64Binary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&STANDARD.encode(&self.0))
    }
}
