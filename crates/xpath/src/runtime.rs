use core::fmt;
use std::collections::HashMap;

/// Error codes emitted by the engine. A subset of the XPath 2.0 error namespace; the engine never
/// raises codes it does not list here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    XPST0003, // grammar violation
    XPST0017, // unknown function or wrong arity
    XPST0081, // unbound namespace prefix
    XPTY0004, // type error (e.g. a path step applied to a non-node value)
    FODC0006, // content is not well-formed XML
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::XPST0003 => "err:XPST0003",
            ErrorCode::XPST0017 => "err:XPST0017",
            ErrorCode::XPST0081 => "err:XPST0081",
            ErrorCode::XPTY0004 => "err:XPTY0004",
            ErrorCode::FODC0006 => "err:FODC0006",
        }
    }

    /// Static errors are raised while compiling; everything else while evaluating.
    pub fn is_static(self) -> bool {
        matches!(self, ErrorCode::XPST0003 | ErrorCode::XPST0017 | ErrorCode::XPST0081)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct Error {
    pub code: ErrorCode,
    pub message: String,
}

impl Error {
    pub fn from_code(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self { code, message: msg.into() }
    }

    pub fn is_static(&self) -> bool {
        self.code.is_static()
    }
}

/// Compile-time context: the namespace bindings visible to an expression.
///
/// The `xml` prefix is always bound. Unprefixed names in expressions never pick up a default
/// namespace (XPath 1.0 rules).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticContext {
    namespaces: HashMap<String, String>,
}

pub const XML_NS: &str = "http://www.w3.org/XML/1998/namespace";

impl Default for StaticContext {
    fn default() -> Self {
        let mut namespaces = HashMap::new();
        namespaces.insert("xml".to_string(), XML_NS.to_string());
        Self { namespaces }
    }
}

impl StaticContext {
    pub fn builder() -> StaticContextBuilder {
        StaticContextBuilder::default()
    }

    pub fn resolve_prefix(&self, prefix: &str) -> Option<&str> {
        self.namespaces.get(prefix).map(String::as_str)
    }

    pub fn namespaces(&self) -> impl Iterator<Item = (&str, &str)> {
        self.namespaces.iter().map(|(p, u)| (p.as_str(), u.as_str()))
    }
}

#[derive(Debug, Default)]
pub struct StaticContextBuilder {
    ctx: StaticContext,
}

impl StaticContextBuilder {
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.ctx.namespaces.insert(prefix.into(), uri.into());
        self
    }

    pub fn with_namespaces<I, P, U>(mut self, bindings: I) -> Self
    where
        I: IntoIterator<Item = (P, U)>,
        P: Into<String>,
        U: Into<String>,
    {
        for (p, u) in bindings {
            self.ctx.namespaces.insert(p.into(), u.into());
        }
        self
    }

    pub fn build(self) -> StaticContext {
        self.ctx
    }
}
