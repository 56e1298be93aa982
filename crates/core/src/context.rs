use crate::request::Request;

/// Access to the request under evaluation. Implementations are read-only and may be shared
/// across threads evaluating nested predicates.
pub trait EvaluationContext: Send + Sync {
    fn request(&self) -> Option<&Request>;
}

/// Context over a borrowed request (or none).
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestContext<'r> {
    request: Option<&'r Request>,
}

impl<'r> RequestContext<'r> {
    pub fn new(request: &'r Request) -> Self {
        Self { request: Some(request) }
    }

    pub fn without_request() -> Self {
        Self { request: None }
    }
}

impl EvaluationContext for RequestContext<'_> {
    fn request(&self) -> Option<&Request> {
        self.request
    }
}
