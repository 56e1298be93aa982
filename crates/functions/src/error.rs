use xacml_core::{ParseError, Status, StatusCode};

/// Failure raised inside a function body, before the identifier prefix is attached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Error {
    pub code: StatusCode,
    pub message: String,
}

impl Error {
    pub fn from_code(code: StatusCode, message: impl Into<String>) -> Self {
        Self { code, message: message.into() }
    }

    pub fn processing(message: impl Into<String>) -> Self {
        Self::from_code(StatusCode::ProcessingError, message)
    }

    pub fn syntax(message: impl Into<String>) -> Self {
        Self::from_code(StatusCode::SyntaxError, message)
    }

    pub(crate) fn into_status(self, short_name: &str) -> Status {
        Status::new(self.code, format!("{short_name} {}", self.message))
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::syntax(err.to_string())
    }
}
