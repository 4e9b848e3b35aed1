use crate::{InputSource, SanitizationError, ValueKind};

/// Request-scoped debug logging for filter calls.
///
/// Every event carries the request ID, the source, the input name and the
/// value kind. Input values are never logged; a rejection only records the
/// error kind.
#[derive(Debug, Clone, Copy)]
pub struct FilterLog<'a> {
    request_id: Option<&'a str>,
}

impl<'a> FilterLog<'a> {
    pub(crate) fn new(request_id: Option<&'a str>) -> Self {
        Self { request_id }
    }

    /// Returns the request ID attached to every event, if any.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id
    }

    fn id(&self) -> &str {
        self.request_id.unwrap_or("-")
    }

    pub(crate) fn absent(&self, source: InputSource, name: &str, kind: &ValueKind) {
        tracing::debug!(
            request_id = %self.id(),
            source = %source,
            key = name,
            kind = %kind,
            "input absent"
        );
    }

    pub(crate) fn rejected(
        &self,
        source: InputSource,
        name: &str,
        kind: &ValueKind,
        error: &SanitizationError,
    ) {
        tracing::debug!(
            request_id = %self.id(),
            source = %source,
            key = name,
            kind = %kind,
            error = %error.kind(),
            "input rejected"
        );
    }

    pub(crate) fn fallback(&self, name: &str, kind: &ValueKind) {
        tracing::debug!(
            request_id = %self.id(),
            source = %InputSource::Request,
            key = name,
            kind = %kind,
            "form value unusable, falling back to query"
        );
    }
}
