//! Request adapter for mapping HTTP requests to tainted input namespaces.

use std::collections::HashMap;

use crate::{InputSource, Tainted};

use super::parse::{cookie_pairs, urlencoded_pairs};
use super::{ExtractTaintedInputs, InputProvider};

/// Collects the raw parts of one request before they are tainted.
///
/// Framework integrations fill an adapter from their own request type and
/// call [`extract_tainted_inputs`](ExtractTaintedInputs::extract_tainted_inputs).
/// When the same name is added twice to one namespace, the later value wins.
///
/// # Examples
///
/// ```
/// use filter_input::web::{ExtractTaintedInputs, RequestAdapter};
/// use filter_input::InputSource;
///
/// let mut adapter = RequestAdapter::new("req-12345".to_string());
/// adapter.add_query_string("search=user+input&page=2");
/// adapter.add_cookie_header("theme=dark; lang=en");
/// adapter.add_server_var("REMOTE_ADDR".to_string(), "203.0.113.9".to_string());
///
/// let inputs = adapter.extract_tainted_inputs();
/// assert!(inputs.contains(InputSource::Query, "search"));
/// assert!(inputs.contains(InputSource::Cookie, "lang"));
/// assert!(!inputs.contains(InputSource::Form, "search"));
/// ```
#[derive(Debug, Clone)]
pub struct RequestAdapter {
    request_id: String,
    query_params: HashMap<String, String>,
    form_fields: HashMap<String, String>,
    cookies: HashMap<String, String>,
    server_vars: HashMap<String, String>,
    env_vars: HashMap<String, String>,
}

impl RequestAdapter {
    /// Creates an empty adapter for the request with the given ID.
    pub fn new(request_id: String) -> Self {
        Self {
            request_id,
            query_params: HashMap::new(),
            form_fields: HashMap::new(),
            cookies: HashMap::new(),
            server_vars: HashMap::new(),
            env_vars: HashMap::new(),
        }
    }

    /// Adds one decoded query parameter.
    pub fn add_query_param(&mut self, key: String, value: String) {
        self.query_params.insert(key, value);
    }

    /// Adds one decoded form field.
    pub fn add_form_field(&mut self, key: String, value: String) {
        self.form_fields.insert(key, value);
    }

    /// Adds one decoded cookie.
    pub fn add_cookie(&mut self, key: String, value: String) {
        self.cookies.insert(key, value);
    }

    /// Adds one server variable such as `REMOTE_ADDR`.
    pub fn add_server_var(&mut self, key: String, value: String) {
        self.server_vars.insert(key, value);
    }

    /// Adds one environment variable.
    pub fn add_env_var(&mut self, key: String, value: String) {
        self.env_vars.insert(key, value);
    }

    /// Parses and adds every parameter of a raw query string.
    pub fn add_query_string(&mut self, query: &str) {
        self.query_params.extend(urlencoded_pairs(query));
    }

    /// Parses and adds every field of an `application/x-www-form-urlencoded` body.
    pub fn add_form_body(&mut self, body: &str) {
        self.form_fields.extend(urlencoded_pairs(body));
    }

    /// Parses and adds every cookie of a `Cookie` header value.
    pub fn add_cookie_header(&mut self, header: &str) {
        self.cookies.extend(cookie_pairs(header));
    }

    /// Copies the current process environment into the env namespace.
    ///
    /// Variables whose name or value is not valid UTF-8 are skipped.
    pub fn capture_process_env(&mut self) {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)));
        self.env_vars.extend(vars);
    }

    /// Returns a reference to the request ID.
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

fn taint(map: &HashMap<String, String>) -> HashMap<String, Tainted<String>> {
    map.iter()
        .map(|(k, v)| (k.clone(), Tainted::new(v.clone())))
        .collect()
}

impl ExtractTaintedInputs for RequestAdapter {
    fn extract_tainted_inputs(&self) -> TaintedInputs {
        TaintedInputs {
            request_id: Some(self.request_id.clone()),
            query_params: taint(&self.query_params),
            form_fields: taint(&self.form_fields),
            cookies: taint(&self.cookies),
            server_vars: taint(&self.server_vars),
            env_vars: taint(&self.env_vars),
        }
    }
}

/// Immutable snapshot of the tainted inputs of one request.
///
/// # Examples
///
/// ```
/// use filter_input::web::{ExtractTaintedInputs, InputProvider, RequestAdapter};
/// use filter_input::{InputSource, Sanitizer, StringSanitizer};
///
/// let mut adapter = RequestAdapter::new("req-1".to_string());
/// adapter.add_query_param("username".to_string(), "alice\u{7}".to_string());
///
/// let inputs = adapter.extract_tainted_inputs();
/// let tainted = inputs.lookup(InputSource::Query, "username").unwrap();
///
/// // Must sanitize before use
/// let verified = StringSanitizer::new().sanitize(tainted).unwrap();
/// assert_eq!(verified.as_ref(), "alice");
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaintedInputs {
    request_id: Option<String>,
    query_params: HashMap<String, Tainted<String>>,
    form_fields: HashMap<String, Tainted<String>>,
    cookies: HashMap<String, Tainted<String>>,
    server_vars: HashMap<String, Tainted<String>>,
    env_vars: HashMap<String, Tainted<String>>,
}

impl TaintedInputs {
    /// Returns the namespace backing `source`.
    ///
    /// `Request` has no namespace of its own and returns `None`.
    pub fn namespace(&self, source: InputSource) -> Option<&HashMap<String, Tainted<String>>> {
        match source {
            InputSource::Query => Some(&self.query_params),
            InputSource::Form => Some(&self.form_fields),
            InputSource::Cookie => Some(&self.cookies),
            InputSource::Server => Some(&self.server_vars),
            InputSource::Env => Some(&self.env_vars),
            InputSource::Request => None,
        }
    }

    /// Returns whether `name` is present in `source`.
    pub fn contains(&self, source: InputSource, name: &str) -> bool {
        match source {
            InputSource::Request => {
                self.form_fields.contains_key(name) || self.query_params.contains_key(name)
            }
            _ => self
                .namespace(source)
                .is_some_and(|ns| ns.contains_key(name)),
        }
    }
}

impl InputProvider for TaintedInputs {
    fn lookup(&self, source: InputSource, name: &str) -> Option<Tainted<String>> {
        let found = match source {
            InputSource::Request => self
                .form_fields
                .get(name)
                .or_else(|| self.query_params.get(name)),
            _ => self.namespace(source)?.get(name),
        };
        found.cloned()
    }

    fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }
}
