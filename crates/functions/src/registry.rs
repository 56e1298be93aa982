use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use xacml_core::{EvaluationContext, ExpressionResult, FunctionArgument, Status};

use crate::config::RegistryConfig;
use crate::function::{CallCtx, FunctionDefinition, FunctionLookup, StdFunction};

/// Immutable map from function identifier to definition.
#[derive(Debug, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, Arc<dyn FunctionDefinition>>,
}

impl FunctionRegistry {
    pub fn new(config: &RegistryConfig) -> Self {
        let mut registrar = Registrar { config, functions: HashMap::new() };
        crate::functions::register_standard_functions(&mut registrar);
        tracing::debug!(
            functions = registrar.functions.len(),
            xpath = config.xpath_functions,
            legacy = config.legacy_identifiers,
            excluded = config.excluded_functions.len(),
            "function registry built"
        );
        Self { functions: registrar.functions }
    }

    /// The default registry, built on first use and shared by the whole process.
    pub fn standard() -> &'static FunctionRegistry {
        static STANDARD: OnceLock<FunctionRegistry> = OnceLock::new();
        STANDARD.get_or_init(|| FunctionRegistry::new(&RegistryConfig::default()))
    }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn FunctionDefinition>> {
        self.functions.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.functions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Evaluate `id` with this registry as the predicate lookup.
    pub fn evaluate(
        &self,
        id: &str,
        eval_ctx: Option<&dyn EvaluationContext>,
        args: &[FunctionArgument],
    ) -> ExpressionResult {
        let function = self.get(id).ok_or_else(|| Status::processing_error(format!("Unknown function '{id}'")))?;
        function.evaluate(&CallCtx::new(eval_ctx, self), args)
    }
}

impl FunctionLookup for FunctionRegistry {
    fn lookup(&self, id: &str) -> Option<Arc<dyn FunctionDefinition>> {
        self.functions.get(id).cloned()
    }
}

/// Collects definitions while a registry is built.
pub(crate) struct Registrar<'c> {
    config: &'c RegistryConfig,
    functions: HashMap<String, Arc<dyn FunctionDefinition>>,
}

impl Registrar<'_> {
    pub(crate) fn config(&self) -> &RegistryConfig {
        self.config
    }

    pub(crate) fn add(&mut self, function: StdFunction) {
        let id = function.id().to_string();
        if self.config.is_excluded(&id) {
            return;
        }
        if self.functions.insert(id.clone(), Arc::new(function)).is_some() {
            tracing::warn!(function = %id, "duplicate function identifier, keeping the later definition");
        }
    }

    /// Register `function` and, when legacy identifiers are enabled, the same body under `legacy_id`.
    pub(crate) fn add_with_legacy(&mut self, function: StdFunction, legacy_id: String) {
        if self.config.legacy_identifiers {
            self.add(function.alias(legacy_id));
        }
        self.add(function);
    }
}
