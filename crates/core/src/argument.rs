use crate::status::Status;
use crate::value::{AttributeValue, Bag};

/// One argument slot of a function call. `Missing` stands for an absent value.
#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArgument {
    Value(AttributeValue),
    Bag(Bag),
    Missing,
}

impl FunctionArgument {
    pub fn is_bag(&self) -> bool {
        matches!(self, FunctionArgument::Bag(_))
    }

    /// Short description used in diagnostics: the datatype name, `bag` or `null`.
    pub fn kind_name(&self) -> &'static str {
        match self {
            FunctionArgument::Value(v) => v.data_type().short_name(),
            FunctionArgument::Bag(_) => "bag",
            FunctionArgument::Missing => "null",
        }
    }
}

impl From<AttributeValue> for FunctionArgument {
    fn from(v: AttributeValue) -> Self {
        FunctionArgument::Value(v)
    }
}

impl From<Bag> for FunctionArgument {
    fn from(b: Bag) -> Self {
        FunctionArgument::Bag(b)
    }
}

impl From<Option<AttributeValue>> for FunctionArgument {
    fn from(v: Option<AttributeValue>) -> Self {
        v.map_or(FunctionArgument::Missing, FunctionArgument::Value)
    }
}

/// A successful evaluation.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionValue {
    Value(AttributeValue),
    Bag(Bag),
}

impl ExpressionValue {
    pub fn as_value(&self) -> Option<&AttributeValue> {
        match self {
            ExpressionValue::Value(v) => Some(v),
            ExpressionValue::Bag(_) => None,
        }
    }

    pub fn as_bag(&self) -> Option<&Bag> {
        match self {
            ExpressionValue::Bag(b) => Some(b),
            ExpressionValue::Value(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ExpressionValue::Value(AttributeValue::Boolean(b)) => Some(*b),
            _ => None,
        }
    }
}

impl From<ExpressionValue> for FunctionArgument {
    fn from(v: ExpressionValue) -> Self {
        match v {
            ExpressionValue::Value(v) => FunctionArgument::Value(v),
            ExpressionValue::Bag(b) => FunctionArgument::Bag(b),
        }
    }
}

impl From<AttributeValue> for ExpressionValue {
    fn from(v: AttributeValue) -> Self {
        ExpressionValue::Value(v)
    }
}

impl From<Bag> for ExpressionValue {
    fn from(b: Bag) -> Self {
        ExpressionValue::Bag(b)
    }
}

pub type ExpressionResult = Result<ExpressionValue, Status>;
