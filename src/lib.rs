//! Sanitization and validation of request input.
//!
//! This crate reads named values from the six input namespaces of a web
//! request (query string, form body, merged request, cookies, server
//! variables, environment) and returns them sanitized and validated as one of
//! ten value kinds.
//!
//! - **Taint tracking**: every value that crosses the request boundary is a
//!   [`Tainted<T>`]; only a [`Sanitizer`] can turn it into a [`Verified<T>`]
//! - **One dispatch**: [`FilterInput::filter`] takes an [`InputSource`] and a
//!   [`ValueKind`] instead of one method per combination
//! - **Explicit outcomes**: [`Filtered`] keeps "invalid" and "absent" apart;
//!   [`Sentinel`] collapses them when a caller wants the loose form
//!
//! # Core Types
//!
//! - [`Tainted<T>`]: Wrapper for untrusted input
//! - [`Verified<T>`]: Proof that a sanitizer accepted a value
//! - [`FilterInput`]: Entry point over a request snapshot
//! - [`FilterOptions`]: Absence handling, length limit and e-mail grammar
//! - [`web::RequestAdapter`]: Builds the request snapshot
//!
//! # Examples
//!
//! ```
//! use filter_input::web::RequestAdapter;
//! use filter_input::{FilterInput, FilterValue, InputSource, Sentinel, ValueKind};
//!
//! let mut adapter = RequestAdapter::new("req-123".to_string());
//! adapter.add_query_string("amount=1%2C234.445&count=0x1A&comment=%3Cb%3Ehi%3C%2Fb%3E");
//!
//! let input = FilterInput::from_request(&adapter);
//!
//! assert_eq!(input.float(InputSource::Query, "amount").into_value(), Some(1234.445));
//! assert_eq!(input.integer(InputSource::Query, "count").into_value(), Some(26));
//! assert_eq!(
//!     input.filter(InputSource::Query, "comment", &ValueKind::Html).into_value(),
//!     Some(FilterValue::Text("&lt;b&gt;hi&lt;/b&gt;".to_string()))
//! );
//!
//! // Missing numbers read as false, missing text as an empty string
//! assert_eq!(
//!     input.filter_sentinel(InputSource::Query, "nope", &ValueKind::Integer),
//!     Sentinel::False
//! );
//! assert_eq!(
//!     input.filter_sentinel(InputSource::Query, "nope", &ValueKind::Html),
//!     Sentinel::EmptyString
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod filter;
mod kind;
mod logging;
mod outcome;
mod sanitizer;
mod source;
mod tainted;
mod verified;
pub mod web;

pub use config::FilterOptions;
pub use error::Error;
pub use filter::FilterInput;
pub use kind::ValueKind;
pub use logging::FilterLog;
pub use outcome::{FilterValue, Filtered, Sentinel};
pub use sanitizer::{
    add_slashes, encode_high, encode_quotes, escape_html, is_valid_email, is_valid_email_with,
    normalize_float, parse_integer_literal, sanitize_email_chars, sanitize_url_chars, strip_low,
    strip_tags, url_encode, EmailGrammar, EmailSanitizer, FloatSanitizer, HtmlSanitizer,
    IntegerSanitizer, IpRanges, IpSanitizer, RawSanitizer, SanitizationError,
    SanitizationErrorKind, Sanitizer, SlashEscapeSanitizer, StringSanitizer, UrlEncodedSanitizer,
    UrlSanitizer,
};
pub use source::InputSource;
pub use tainted::Tainted;
pub use verified::Verified;
