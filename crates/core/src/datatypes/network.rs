use core::fmt;
use core::str::FromStr;
use std::net::{Ipv4Addr, Ipv6Addr};

use super::ParseError;

/// Inclusive port range; a missing bound is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PortRange {
    pub low: Option<u16>,
    pub high: Option<u16>,
}

impl PortRange {
    pub fn single(port: u16) -> Self {
        Self { low: Some(port), high: Some(port) }
    }

    pub fn is_unbounded(&self) -> bool {
        self.low.is_none() && self.high.is_none()
    }

    pub fn contains(&self, port: u16) -> bool {
        self.low.is_none_or(|l| port >= l) && self.high.is_none_or(|h| port <= h)
    }

    /// Parse `input[start..]`, reporting positions relative to `input`.
    fn parse_in(kind: &'static str, input: &str, start: usize) -> Result<Self, ParseError> {
        let text = &input[start..];
        let port = |s: &str, at: usize| -> Result<u16, ParseError> {
            if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseError::new(kind, input, at, "port must be numeric"));
            }
            s.parse::<u16>().map_err(|_| ParseError::new(kind, input, at, "port out of range"))
        };
        let range = match text.split_once('-') {
            None => Self::single(port(text, start)?),
            Some(("", "")) => return Err(ParseError::new(kind, input, start, "empty port range")),
            Some(("", high)) => Self { low: None, high: Some(port(high, start + 1)?) },
            Some((low, "")) => Self { low: Some(port(low, start)?), high: None },
            Some((low, high)) => Self { low: Some(port(low, start)?), high: Some(port(high, start + low.len() + 1)?) },
        };
        if let (Some(l), Some(h)) = (range.low, range.high) {
            if l > h {
                return Err(ParseError::new(kind, input, start, "port range is inverted"));
            }
        }
        Ok(range)
    }
}

impl FromStr for PortRange {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_in("port range", s, 0)
    }
}

impl fmt::Display for PortRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.low, self.high) {
            (None, None) => Ok(()),
            (Some(l), Some(h)) if l == h => write!(f, "{l}"),
            (Some(l), None) => write!(f, "{l}-"),
            (None, Some(h)) => write!(f, "-{h}"),
            (Some(l), Some(h)) => write!(f, "{l}-{h}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ipv6Mask {
    Prefix(u8),
    Address(Ipv6Addr),
}

/// `ipAddress`: an IPv4 or IPv6 address with an optional mask and port range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IpAddress {
    V4 { address: Ipv4Addr, mask: Option<Ipv4Addr>, ports: PortRange },
    V6 { address: Ipv6Addr, mask: Option<Ipv6Mask>, ports: PortRange },
}

const IP_KIND: &str = "IP address";

impl IpAddress {
    pub fn ports(&self) -> PortRange {
        match self {
            IpAddress::V4 { ports, .. } | IpAddress::V6 { ports, .. } => *ports,
        }
    }

    fn parse_v6(s: &str) -> Result<Self, ParseError> {
        let err = |at: usize, reason: &str| ParseError::new(IP_KIND, s, at, reason);
        let close = s.find(']').ok_or_else(|| err(0, "missing ']'"))?;
        let address = s[1..close].parse::<Ipv6Addr>().map_err(|_| err(1, "invalid IPv6 address"))?;
        let mut pos = close + 1;
        let mut mask = None;
        if s[pos..].starts_with('/') {
            pos += 1;
            if s[pos..].starts_with('[') {
                let end = s[pos..].find(']').map(|i| pos + i).ok_or_else(|| err(pos, "missing ']'"))?;
                let m = s[pos + 1..end].parse::<Ipv6Addr>().map_err(|_| err(pos + 1, "invalid IPv6 mask"))?;
                mask = Some(Ipv6Mask::Address(m));
                pos = end + 1;
            } else {
                let end = s[pos..].find(':').map_or(s.len(), |i| pos + i);
                let prefix = s[pos..end]
                    .parse::<u8>()
                    .ok()
                    .filter(|p| *p <= 128)
                    .ok_or_else(|| err(pos, "invalid IPv6 prefix"))?;
                mask = Some(Ipv6Mask::Prefix(prefix));
                pos = end;
            }
        }
        let ports = Self::parse_port_suffix(s, pos)?;
        Ok(IpAddress::V6 { address, mask, ports })
    }

    fn parse_v4(s: &str) -> Result<Self, ParseError> {
        let err = |at: usize, reason: &str| ParseError::new(IP_KIND, s, at, reason);
        let addr_end = s.find(['/', ':']).unwrap_or(s.len());
        let address = s[..addr_end].parse::<Ipv4Addr>().map_err(|_| err(0, "invalid IPv4 address"))?;
        let mut pos = addr_end;
        let mut mask = None;
        if s[pos..].starts_with('/') {
            pos += 1;
            let end = s[pos..].find(':').map_or(s.len(), |i| pos + i);
            mask = Some(s[pos..end].parse::<Ipv4Addr>().map_err(|_| err(pos, "invalid IPv4 mask"))?);
            pos = end;
        }
        let ports = Self::parse_port_suffix(s, pos)?;
        Ok(IpAddress::V4 { address, mask, ports })
    }

    fn parse_port_suffix(s: &str, pos: usize) -> Result<PortRange, ParseError> {
        if pos >= s.len() {
            return Ok(PortRange::default());
        }
        if !s[pos..].starts_with(':') {
            return Err(ParseError::new(IP_KIND, s, pos, "expected ':'"));
        }
        PortRange::parse_in(IP_KIND, s, pos + 1)
    }
}

impl FromStr for IpAddress {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with('[') { Self::parse_v6(s) } else { Self::parse_v4(s) }
    }
}

impl fmt::Display for IpAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IpAddress::V4 { address, mask, .. } => {
                write!(f, "{address}")?;
                if let Some(m) = mask {
                    write!(f, "/{m}")?;
                }
            }
            IpAddress::V6 { address, mask, .. } => {
                write!(f, "[{address}]")?;
                match mask {
                    Some(Ipv6Mask::Prefix(p)) => write!(f, "/{p}")?,
                    Some(Ipv6Mask::Address(m)) => write!(f, "/[{m}]")?,
                    None => {}
                }
            }
        }
        let ports = self.ports();
        if !ports.is_unbounded() {
            write!(f, ":{ports}")?;
        }
        Ok(())
    }
}

/// `dnsName`: an RFC 2396 host name, optionally with a leading `*` label and a port range.
/// Host names are case-insensitive and kept in lower case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DnsName {
    host: String,
    ports: PortRange,
}

const DNS_KIND: &str = "DNS name";

impl DnsName {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn ports(&self) -> PortRange {
        self.ports
    }

    fn validate_host(input: &str, host: &str) -> Result<(), ParseError> {
        let err = |at: usize, reason: &str| ParseError::new(DNS_KIND, input, at, reason);
        if host.is_empty() {
            return Err(err(0, "empty host name"));
        }
        let trimmed = host.strip_suffix('.').unwrap_or(host);
        let labels: Vec<&str> = trimmed.split('.').collect();
        let mut at = 0usize;
        for (i, label) in labels.iter().enumerate() {
            let wildcard = i == 0 && *label == "*" && labels.len() > 1;
            if !wildcard {
                if label.is_empty() || label.len() > 63 {
                    return Err(err(at, "invalid label length"));
                }
                if let Some(off) = label.bytes().position(|b| !(b.is_ascii_alphanumeric() || b == b'-')) {
                    return Err(err(at + off, "invalid character in host name"));
                }
                if label.starts_with('-') || label.ends_with('-') {
                    return Err(err(at, "label must not start or end with '-'"));
                }
                if i == labels.len() - 1 && !label.as_bytes()[0].is_ascii_alphabetic() {
                    return Err(err(at, "top label must start with a letter"));
                }
            }
            at += label.len() + 1;
        }
        Ok(())
    }
}

impl FromStr for DnsName {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, ports) = match s.find(':') {
            Some(i) => (&s[..i], PortRange::parse_in(DNS_KIND, s, i + 1)?),
            None => (s, PortRange::default()),
        };
        Self::validate_host(s, host)?;
        Ok(Self { host: host.to_ascii_lowercase(), ports })
    }
}

impl fmt::Display for DnsName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.host)?;
        if !self.ports.is_unbounded() {
            write!(f, ":{}", self.ports)?;
        }
        Ok(())
    }
}
