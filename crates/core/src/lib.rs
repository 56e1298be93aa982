//! Attribute values, bags, requests and evaluation results.
//!
//! Everything here is immutable once built and safe to share across threads. Functions that
//! consume these types live in `xacml-functions`.
#![warn(unused_crate_dependencies)]
pub mod argument;
pub mod context;
pub mod datatype;
pub mod datatypes;
pub mod request;
pub mod status;
pub mod value;

pub use argument::{ExpressionResult, ExpressionValue, FunctionArgument};
pub use context::{EvaluationContext, RequestContext};
pub use datatype::DataType;
pub use datatypes::ParseError;
pub use request::{Attribute, Attributes, Content, ContentError, Request};
pub use status::{Status, StatusCode};
pub use value::{AttributeValue, Bag, Lexical, TypedValue};

pub use num_bigint::BigInt;
