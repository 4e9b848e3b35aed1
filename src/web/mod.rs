//! Web framework integration surface.
//!
//! This module is the boundary between an HTTP framework and the filter
//! pipeline. It handles:
//! - Parsing raw request parts (query string, form body, `Cookie` header)
//! - Introducing taint at the boundary (untrusted inputs → `Tainted<T>`)
//! - Request-ID propagation into log events
//!
//! # Design Principles
//!
//! 1. **No Framework Dependencies**: This module contains no framework-specific code.
//!    It defines interfaces that framework-specific code can implement.
//!
//! 2. **Taint at Boundary**: All external inputs are wrapped in `Tainted<T>`
//!    at extraction time.
//!
//! 3. **Immutable Snapshot**: [`TaintedInputs`] cannot be modified after
//!    extraction, so repeated filter calls see the same data.
//!
//! # Integration Model
//!
//! Framework-specific extractors should:
//! 1. Build a [`RequestAdapter`] from the framework request
//! 2. Call `.extract_tainted_inputs()` to get [`TaintedInputs`]
//! 3. Wrap the inputs in a [`FilterInput`](crate::FilterInput) and ask it for
//!    typed values
//!
//! # Example Flow
//!
//! ```
//! use filter_input::web::{ExtractTaintedInputs, RequestAdapter};
//! use filter_input::{FilterInput, InputSource, IpRanges};
//!
//! let mut adapter = RequestAdapter::new("req-42".to_string());
//! adapter.add_form_body("email=alice%40example.com&age=31");
//! adapter.add_server_var("REMOTE_ADDR".to_string(), "10.1.2.3".to_string());
//!
//! let input = FilterInput::new(adapter.extract_tainted_inputs());
//!
//! let email = input.email(InputSource::Form, "email");
//! assert_eq!(email.value().map(String::as_str), Some("alice@example.com"));
//!
//! let public_only = IpRanges::any().without_private();
//! assert!(input.ip(InputSource::Server, "REMOTE_ADDR", public_only).is_invalid());
//! ```

mod adapter;
mod extract;
mod parse;

pub use adapter::{RequestAdapter, TaintedInputs};
pub use extract::{ExtractTaintedInputs, InputProvider};
