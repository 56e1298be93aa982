use serde::Deserialize;

/// Which functions a [`FunctionRegistry`](crate::FunctionRegistry) carries.
///
/// ```
/// let cfg = xacml_functions::RegistryConfig::from_json(r#"{ "xpath_functions": false }"#).unwrap();
/// assert!(!cfg.xpath_functions);
/// assert!(cfg.legacy_identifiers);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
    /// Register `xpath-node-count`, `xpath-node-equal` and `xpath-node-match`.
    pub xpath_functions: bool,
    /// Also register the XACML 1.0 identifiers of functions re-identified in 3.0.
    pub legacy_identifiers: bool,
    /// Identifiers never registered.
    pub excluded_functions: Vec<String>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { xpath_functions: true, legacy_identifiers: true, excluded_functions: Vec::new() }
    }
}

impl RegistryConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn is_excluded(&self, id: &str) -> bool {
        self.excluded_functions.iter().any(|e| e == id)
    }
}
