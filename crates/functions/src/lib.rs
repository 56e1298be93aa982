//! The XACML standard function library.
//!
//! Every function is a [`FunctionDefinition`] registered under its identifier URI in a
//! [`FunctionRegistry`]. Bodies validate their own arguments through [`toolkit`] and fail with an
//! [`Error`]; the registry hands callers a [`Status`](xacml_core::Status) whose message starts with
//! the `function:<name>` part of the identifier.
//!
//! ```
//! use xacml_core::{AttributeValue, ExpressionValue, FunctionArgument};
//! use xacml_functions::{FunctionRegistry, ids};
//!
//! let args: Vec<FunctionArgument> = vec![AttributeValue::from("a").into(), AttributeValue::from("a").into()];
//! let result = FunctionRegistry::standard().evaluate(ids::STRING_EQUAL, None, &args).unwrap();
//! assert_eq!(result, ExpressionValue::Value(AttributeValue::Boolean(true)));
//! ```
#![warn(unused_crate_dependencies)]
pub mod config;
mod error;
pub mod function;
pub mod functions;
pub mod ids;
mod registry;
pub mod toolkit;

pub use config::RegistryConfig;
pub use error::Error;
pub use function::{
    CallCtx, FunctionDefinition, FunctionImpl, FunctionLookup, ParamSpec, Signature, StdFunction, short_name,
};
pub use registry::FunctionRegistry;
