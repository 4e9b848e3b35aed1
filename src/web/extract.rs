//! Extraction boundary traits for web integration.
//!
//! These traits are the seam between a framework's request type and the
//! filter pipeline.

use crate::{InputSource, Tainted};

use super::TaintedInputs;

/// Read-only access to the six input namespaces of one request.
///
/// Missing names are `None`, never an error. Every returned value is
/// tainted. Implementations should resolve [`InputSource::Request`] as the
/// form value when present, else the query value; the filter pipeline itself
/// never calls `lookup` with `Request`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use filter_input::web::InputProvider;
/// use filter_input::{FilterInput, InputSource, Tainted};
///
/// // Environment-only provider
/// struct EnvOnly(HashMap<String, String>);
///
/// impl InputProvider for EnvOnly {
///     fn lookup(&self, source: InputSource, name: &str) -> Option<Tainted<String>> {
///         match source {
///             InputSource::Env => self.0.get(name).cloned().map(Tainted::new),
///             _ => None,
///         }
///     }
/// }
///
/// let vars = HashMap::from([("PORT".to_string(), "8080".to_string())]);
/// let input = FilterInput::new(EnvOnly(vars));
/// assert_eq!(input.integer(InputSource::Env, "PORT").into_value(), Some(8080));
/// ```
pub trait InputProvider {
    /// Looks up `name` in `source`.
    fn lookup(&self, source: InputSource, name: &str) -> Option<Tainted<String>>;

    /// Identifier attached to log events, if the request has one.
    fn request_id(&self) -> Option<&str> {
        None
    }
}

impl<P: InputProvider + ?Sized> InputProvider for &P {
    fn lookup(&self, source: InputSource, name: &str) -> Option<Tainted<String>> {
        (**self).lookup(source, name)
    }

    fn request_id(&self) -> Option<&str> {
        (**self).request_id()
    }
}

/// Extracts tainted inputs from a framework-specific request.
///
/// All values that cross the HTTP boundary MUST be wrapped in `Tainted<T>`
/// here; they stay tainted until a sanitizer verifies them.
///
/// # Examples
///
/// ```
/// use filter_input::web::{ExtractTaintedInputs, RequestAdapter, TaintedInputs};
/// use filter_input::InputSource;
///
/// struct MyFrameworkRequest {
///     id: String,
///     uri_query: String,
///     cookie_header: String,
/// }
///
/// impl ExtractTaintedInputs for MyFrameworkRequest {
///     fn extract_tainted_inputs(&self) -> TaintedInputs {
///         let mut adapter = RequestAdapter::new(self.id.clone());
///         adapter.add_query_string(&self.uri_query);
///         adapter.add_cookie_header(&self.cookie_header);
///         adapter.extract_tainted_inputs()
///     }
/// }
///
/// let req = MyFrameworkRequest {
///     id: "req-1".to_string(),
///     uri_query: "page=2".to_string(),
///     cookie_header: "theme=dark".to_string(),
/// };
/// let inputs = req.extract_tainted_inputs();
/// assert!(inputs.contains(InputSource::Cookie, "theme"));
/// ```
pub trait ExtractTaintedInputs {
    /// Extracts all untrusted inputs from the request.
    fn extract_tainted_inputs(&self) -> TaintedInputs;
}
