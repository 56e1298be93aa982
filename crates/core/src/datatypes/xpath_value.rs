use core::fmt;
use std::sync::Arc;

use xacml_xpath::{StaticContext, XPathExecutable, compile_xpath};

/// Payload of an `xpathExpression` value: the expression text, the attribute category whose
/// `<Content>` it addresses, and the compiled form.
#[derive(Debug, Clone)]
pub struct XPathValue {
    path: String,
    category: Option<String>,
    compiled: Option<Arc<XPathExecutable>>,
}

impl XPathValue {
    /// Compile `path` with the namespace bindings in `static_ctx`. A compile failure is logged
    /// and leaves the value without an executable; evaluating it is then a processing error.
    pub fn new(path: impl Into<String>, category: Option<String>, static_ctx: &StaticContext) -> Self {
        let path = path.into();
        let compiled = match compile_xpath(&path, static_ctx) {
            Ok(exe) => Some(Arc::new(exe)),
            Err(err) => {
                tracing::warn!(path = %path, error = %err, "xpath expression does not compile");
                None
            }
        };
        Self { path, category, compiled }
    }

    pub fn unparsed(path: impl Into<String>, category: Option<String>) -> Self {
        Self { path: path.into(), category, compiled: None }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn executable(&self) -> Option<&XPathExecutable> {
        self.compiled.as_deref()
    }
}

impl PartialEq for XPathValue {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path && self.category == other.category
    }
}

impl Eq for XPathValue {}

impl core::hash::Hash for XPathValue {
    fn hash<H: core::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
        self.category.hash(state);
    }
}

impl fmt::Display for XPathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}
